use std::path::PathBuf;

use anyhow::Context;
use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::market_data::adapters::coingecko::DEFAULT_ENDPOINT;

pub const ENV_PREFIX: &str = "COINVIEW";

/// Resolved runtime settings. Defaults reproduce the fixed top-10 USD request.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub endpoint: String,
    pub vs_currency: String,
    pub order: String,
    pub per_page: u32,
    pub page: u32,
    pub sparkline: bool,
    pub log_filter: String,
    pub log_file: Option<PathBuf>,
}

/// Command-line overrides; these win over file and environment.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct Overrides {
    /// Settings file (default: ./coinview.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Markets endpoint URL
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
    /// Quote currency, e.g. usd or eur
    #[arg(long, global = true)]
    pub vs_currency: Option<String>,
    /// Rows to request
    #[arg(long, global = true)]
    pub per_page: Option<u32>,
    /// Write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// defaults -> settings file -> COINVIEW_* env -> CLI flags
    pub fn load(overrides: &Overrides) -> anyhow::Result<Self> {
        // dotenvy loads .env, but doesn't override already-set env vars
        dotenvy::dotenv().ok();

        let file = match &overrides.config {
            Some(path) => File::from(path.clone()).required(true),
            None => File::with_name("coinview").required(false),
        };

        let sources = Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true));
        Self::load_from(sources, overrides)
    }

    /// Resolve settings from the given sources. Defaults sit below them and CLI flags above.
    pub fn load_from(
        sources: ConfigBuilder<DefaultState>,
        overrides: &Overrides,
    ) -> anyhow::Result<Self> {
        let settings = sources
            .set_default("endpoint", DEFAULT_ENDPOINT)?
            .set_default("vs_currency", "usd")?
            .set_default("order", "market_cap_desc")?
            .set_default("per_page", 10_i64)?
            .set_default("page", 1_i64)?
            .set_default("sparkline", false)?
            .set_default("log_filter", "info")?
            .set_override_option("endpoint", overrides.endpoint.clone())?
            .set_override_option("vs_currency", overrides.vs_currency.clone())?
            .set_override_option("per_page", overrides.per_page.map(i64::from))?
            .set_override_option(
                "log_file",
                overrides.log_file.as_ref().map(|p| p.display().to_string()),
            )?
            .build()
            .context("failed to read settings")?;

        settings
            .try_deserialize()
            .context("invalid settings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{FileFormat, Map};

    fn env_source(vars: &[(&str, &str)]) -> Environment {
        let map: Map<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Environment::with_prefix(ENV_PREFIX).try_parsing(true).source(Some(map))
    }

    #[test]
    fn test_defaults_match_fixed_request() {
        let settings = Settings::load_from(Config::builder(), &Overrides::default()).unwrap();
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.vs_currency, "usd");
        assert_eq!(settings.order, "market_cap_desc");
        assert_eq!(settings.per_page, 10);
        assert_eq!(settings.page, 1);
        assert!(!settings.sparkline);
        assert_eq!(settings.log_filter, "info");
        assert_eq!(settings.log_file, None);
    }

    #[test]
    fn test_file_then_env_layering() {
        let file = File::from_str("vs_currency = \"eur\"\nper_page = 5\n", FileFormat::Toml);
        let sources = Config::builder()
            .add_source(file)
            .add_source(env_source(&[("COINVIEW_PER_PAGE", "7")]));

        let settings = Settings::load_from(sources, &Overrides::default()).unwrap();
        assert_eq!(settings.vs_currency, "eur");
        assert_eq!(settings.per_page, 7);
        assert_eq!(settings.order, "market_cap_desc");
    }

    #[test]
    fn test_cli_overrides_win() {
        let sources = Config::builder()
            .add_source(env_source(&[("COINVIEW_ENDPOINT", "http://env.invalid/markets")]));
        let overrides = Overrides {
            endpoint: Some("http://localhost:8080/markets".into()),
            per_page: Some(25),
            ..Default::default()
        };
        let settings = Settings::load_from(sources, &overrides).unwrap();
        assert_eq!(settings.endpoint, "http://localhost:8080/markets");
        assert_eq!(settings.per_page, 25);
    }

    #[test]
    fn test_missing_explicit_config_file_is_an_error() {
        let sources = Config::builder()
            .add_source(File::from(PathBuf::from("/nonexistent/coinview.toml")).required(true));
        assert!(Settings::load_from(sources, &Overrides::default()).is_err());
    }
}
