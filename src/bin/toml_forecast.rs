use anyhow::Context;
use clap::Parser;
use tourism_forecast::app::report;
use tourism_forecast::config::toml_config::TomlConfig;
use tourism_forecast::utils::{logger, validation::Validate};
use tourism_forecast::{
    CsvDatasetPipeline, DatasetStorage, ForecastEngine, ForecastError, OutputFormat,
    SimulationRequest, SimulationSettings,
};

#[derive(Parser)]
#[command(name = "toml-forecast")]
#[command(about = "Tourism forecast driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "forecast.toml")]
    config: String,

    /// Number of simulations (overrides simulation.default_count)
    #[arg(short = 'n', long, allow_hyphen_values = true)]
    simulations: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Load the dataset and show history and distribution without simulating
    #[arg(long)]
    dry_run: bool,
}

fn fail(e: &ForecastError) -> ! {
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
    let args = Args::parse();

    // 設定檔需先載入才知道日誌等級
    let config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    // 驗證通過才採用設定檔的日誌等級
    let validated = config.validate();
    let level = if validated.is_ok() { config.log_level() } else { None };
    logger::init_cli_logger_with_level(args.verbose, level);

    if let Err(e) = validated {
        fail(&e);
    }
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    let settings = SimulationSettings::from_config(&config);
    let request =
        SimulationRequest::from_raw(args.simulations.as_deref(), settings.default_sample_count);
    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    tracing::info!("📋 Dataset: {}", config.dataset.source);
    tracing::info!("🎲 Simulations: {}", request.sample_count);
    if let Some(seed) = settings.seed {
        tracing::info!("🌱 Seed: {}", seed);
    }

    let storage = DatasetStorage::for_source(&config.dataset.source);
    let pipeline = CsvDatasetPipeline::new(storage, config);

    let engine = match ForecastEngine::load_with_monitoring(pipeline, settings, monitor_enabled).await
    {
        Ok(engine) => engine,
        Err(e) => fail(&e),
    };

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no simulation will run");
        println!("{}", report::render_history(engine.history()));
        println!("{}", report::render_distribution(&engine.model().distribution));
        return Ok(());
    }

    let forecast = match engine.forecast(request) {
        Ok(forecast) => forecast,
        Err(e) => fail(&e),
    };

    match args.format {
        OutputFormat::Text => print!("{}", report::render_forecast(&forecast)),
        OutputFormat::Json => println!("{}", report::render_forecast_json(&forecast)?),
    }

    Ok(())
}
