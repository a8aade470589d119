use clap::Parser;
use tourism_forecast::app::report;
use tourism_forecast::utils::{logger, validation::Validate};
use tourism_forecast::{
    CliConfig, CsvDatasetPipeline, DatasetStorage, ForecastEngine, ForecastError, OutputFormat,
    SimulationRequest, SimulationSettings,
};

fn fail(e: &ForecastError) -> ! {
    // 詳細內容只寫入日誌
    tracing::error!(
        "❌ Forecast failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting tourism-forecast");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        fail(&e);
    }

    let settings = SimulationSettings::from_config(&config);
    let request =
        SimulationRequest::from_raw(config.simulations.as_deref(), settings.default_sample_count);
    let format = config.format;
    let show_history = config.show_history;
    let monitor_enabled = config.monitor;

    if monitor_enabled {
        tracing::info!("🔍 Stage monitoring enabled");
    }

    let storage = DatasetStorage::for_source(&config.data);
    let pipeline = CsvDatasetPipeline::new(storage, config);

    let engine = match ForecastEngine::load_with_monitoring(pipeline, settings, monitor_enabled).await
    {
        Ok(engine) => engine,
        Err(e) => fail(&e),
    };

    if show_history {
        println!("{}", report::render_history(engine.history()));
    }

    let forecast = match engine.forecast(request) {
        Ok(forecast) => forecast,
        Err(e) => fail(&e),
    };

    match format {
        OutputFormat::Text => print!("{}", report::render_forecast(&forecast)),
        OutputFormat::Json => println!("{}", report::render_forecast_json(&forecast)?),
    }

    tracing::info!("✅ Forecast completed");
    Ok(())
}
