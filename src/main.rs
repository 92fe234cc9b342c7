use appinion::adapters::{GooglePlacesSource, JsonFileSource, PlacesQuery, SampleSource};
use appinion::core::ListingSource;
use appinion::utils::error::ErrorSeverity;
use appinion::utils::logger;
use appinion::{report, AppinionError, CliConfig, Comparison, RankingEngine, Settings, SourceKind};
use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // Logging
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("Comparing '{}' (format {:?})", cli.service, cli.format);

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Comparison failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        // User-facing message and hint
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0, // warning only
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: &CliConfig) -> Result<(), AppinionError> {
    // File config, then CLI overrides
    let file_config = cli.load_file_config()?;
    let settings = cli.resolve(&file_config)?;
    let engine = RankingEngine::from_settings(&settings)?;

    // Pick the listing source and compare
    let output = match &settings.source {
        SourceKind::DataFile(path) => compare(JsonFileSource::new(path), engine, &settings).await?,
        SourceKind::Sample => compare(SampleSource::new()?, engine, &settings).await?,
        SourceKind::GooglePlaces => {
            let query = PlacesQuery {
                location: settings.location.clone(),
                language: settings.language.clone(),
                max_results: settings.max_results,
            };
            let mut source = GooglePlacesSource::new(settings.require_api_key()?.to_string(), query)?
                .with_page_delay(settings.page_delay);
            if let Some(endpoint) = &settings.endpoint {
                source = source.with_endpoint(endpoint.clone());
            }
            compare(source, engine, &settings).await?
        }
    };

    println!("{}", output);
    Ok(())
}

async fn compare<S: ListingSource>(
    source: S,
    engine: RankingEngine,
    settings: &Settings,
) -> Result<String, AppinionError> {
    let evaluation = Comparison::new(source, engine).run(&settings.service).await?;
    report::render(&evaluation, settings.format)
}
