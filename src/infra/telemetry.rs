use tracing_subscriber::EnvFilter;

use super::settings::TelemetrySettings;

/// ログ出力を初期化する。stdout はMCPのフレームが流れるため stderr に書く。
/// `RUST_LOG` があればそれを優先する。二度目以降の呼び出しは無視される。
pub fn init(settings: &TelemetrySettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .ok();
}
