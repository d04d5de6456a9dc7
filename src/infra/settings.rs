use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "NOVELY_ENV";
const CONFIG_DIR_ENV: &str = "NOVELY_CONFIG_DIR";
const ENV_PREFIX: &str = "NOVELY";

/// 階層化された設定。
///
/// 読み込み順: `.env` → `<config_dir>/base.toml` → `<config_dir>/<env>.toml` →
/// `NOVELY__<SECTION>__<KEY>` 環境変数（例: `NOVELY__API__BASE_URL`）。
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl Settings {
    pub fn load() -> anyhow::Result<Self> {
        // `.env` は無くてもよい
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = match std::env::var(CONFIG_DIR_ENV) {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => std::env::current_dir()
                .context("unable to resolve current directory")?
                .join("config"),
        };

        Self::load_from(&config_dir, &environment)
    }

    pub fn load_from(config_dir: &Path, environment: &str) -> anyhow::Result<Self> {
        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{environment}.toml"));

        let cfg = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .with_context(|| "failed to build configuration")?;

        let settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        tracing::debug!(environment, config_dir = %config_dir.display(), "settings loaded");
        Ok(settings)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "ApiSettings::default_base_url")]
    pub base_url: String,
    /// 未指定ならHTTPクライアントの既定に任せる。
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// 起動時のセッショントークン。
    #[serde(default)]
    pub token: Option<String>,
}

impl ApiSettings {
    fn default_base_url() -> String {
        "http://localhost:5000".to_string()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout_ms: None,
            token: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "SearchSettings::default_debounce_ms")]
    pub debounce_ms: u64,
    /// 検索結果画面の件数上限。
    #[serde(default = "SearchSettings::default_limit")]
    pub limit: u32,
}

impl SearchSettings {
    fn default_debounce_ms() -> u64 {
        300
    }

    fn default_limit() -> u32 {
        50
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce_ms: Self::default_debounce_ms(),
            limit: Self::default_limit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "CatalogSettings::default_page_size")]
    pub page_size: u32,
}

impl CatalogSettings {
    fn default_page_size() -> u32 {
        10
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            page_size: Self::default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelemetrySettings {
    /// `RUST_LOG` が無い場合のフィルタ。
    #[serde(default = "TelemetrySettings::default_log_level")]
    pub log_level: String,
}

impl TelemetrySettings {
    fn default_log_level() -> String {
        "info".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let settings = Settings::default();
        assert_eq!(settings.api.base_url, "http://localhost:5000");
        assert_eq!(settings.search.debounce(), Duration::from_millis(300));
        assert_eq!(settings.search.limit, 50);
        assert_eq!(settings.catalog.page_size, 10);
        assert!(settings.api.timeout().is_none());
    }

    #[test]
    fn missing_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(dir.path(), "local").unwrap();
        assert_eq!(settings.search.debounce_ms, 300);
        assert_eq!(settings.telemetry.log_level, "info");
    }

    #[test]
    fn environment_file_overrides_base() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("base.toml"),
            "[api]\nbase_url = \"https://api.example.com\"\n\n[search]\ndebounce_ms = 250\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("staging.toml"),
            "[search]\ndebounce_ms = 500\n\n[api]\ntimeout_ms = 2000\n",
        )
        .unwrap();

        let settings = Settings::load_from(dir.path(), "staging").unwrap();
        assert_eq!(settings.api.base_url, "https://api.example.com");
        assert_eq!(settings.search.debounce_ms, 500);
        assert_eq!(settings.api.timeout(), Some(Duration::from_millis(2000)));
        assert_eq!(settings.catalog.page_size, 10);
    }
}
