use crate::error::{Result, RunnerError};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// tracing 초기화
///
/// `RUST_LOG` 가 있으면 우선하고, 없으면 `default_level` 을 사용합니다.
/// `log_dir` 이 있으면 `procrunner.log` 일 단위 롤링 파일에도 기록하며,
/// 반환된 guard 가 살아있는 동안만 파일 기록이 보장됩니다.
pub fn init_tracing(default_level: &str, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, "procrunner.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(non_blocking).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| RunnerError::ConfigError(format!("failed to initialize logging: {}", e)))?;

    Ok(guard)
}
