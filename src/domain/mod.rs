// Domain layer: mast lease records, query selectors and result shapes, plus the
// record source port. No I/O here.

pub mod model;
pub mod ports;
