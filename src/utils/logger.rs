use crate::utils::validation::validate_log_level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 不合法的等級不會進入 filter 指令
fn accepted_level(level: Option<&str>) -> Option<&str> {
    level.filter(|level| validate_log_level("log_level", level).is_ok())
}

fn default_filter(verbose: bool, level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match (verbose, accepted_level(level)) {
        (true, _) => EnvFilter::new("tourism_forecast=debug,info"),
        (false, Some(level)) => EnvFilter::new(format!("tourism_forecast={},warn", level)),
        (false, None) => EnvFilter::new("tourism_forecast=info,warn"),
    })
}

pub fn init_cli_logger(verbose: bool) {
    init_cli_logger_with_level(verbose, None);
}

/// `level` 來自設定檔；RUST_LOG 優先
pub fn init_cli_logger_with_level(verbose: bool, level: Option<&str>) {
    tracing_subscriber::registry()
        .with(default_filter(verbose, level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// JSON 格式，供日誌收集系統使用
pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose, None))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .json(),
        )
        .init();
}
