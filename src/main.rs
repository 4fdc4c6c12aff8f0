use anyhow::Context;
use clap::Parser;
use mast_report::utils::{logger, validation::Validate};
use mast_report::{CliConfig, CsvFile, MastError, ReportEngine, ReportFormatter, Settings};

fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting mast-report");
    tracing::debug!("CLI config: {:?}", config);

    match run(&config) {
        Ok(report) => {
            println!("{}", report);
            tracing::info!("Report complete");
        }
        Err(e) => {
            let exit_code = match e.downcast_ref::<MastError>() {
                Some(err) => {
                    tracing::error!(
                        "❌ Report failed: {} (Category: {:?}, Severity: {:?})",
                        err,
                        err.category(),
                        err.severity()
                    );
                    eprintln!("❌ {}", err.user_friendly_message());
                    eprintln!("💡 Suggestion: {}", err.recovery_suggestion());
                    err.exit_code()
                }
                None => {
                    tracing::error!("❌ Report failed: {:#}", e);
                    eprintln!("❌ {:#}", e);
                    1
                }
            };
            std::process::exit(exit_code);
        }
    }
}

fn run(config: &CliConfig) -> anyhow::Result<String> {
    config.validate()?;

    let settings = Settings::load_or_default(config.config.as_deref())
        .context("Could not load settings")?;
    let query = config.query()?;

    let engine = ReportEngine::new(CsvFile::new(&config.csv_file, settings.parser));
    let result = engine.run(&query)?;

    let report = ReportFormatter::new(settings.report)?.render(&result, config.format)?;
    Ok(report)
}
