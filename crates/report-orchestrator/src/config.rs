use anyhow::{Context, Result};
use cost_calculator::RateTable;
use report_assembler::{ReportLocale, ReportOptions};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub database_url: String,
    pub output_dir: PathBuf,
    pub locale: ReportLocale,
    pub brand_name: String,
    pub logo_url: Option<String>,
    /// JSON file overriding the default hourly rates and material/service catalogs
    pub rate_table_path: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:screen_reports.db".to_string(),
            output_dir: PathBuf::from("reports"),
            locale: ReportLocale::EnUs,
            brand_name: "Screen Analytics".to_string(),
            logo_url: None,
            rate_table_path: None,
        }
    }
}

impl ReportConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            output_dir: get("REPORT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            locale: get("REPORT_LOCALE")
                .map(|tag| ReportLocale::parse(&tag))
                .unwrap_or(defaults.locale),
            brand_name: get("REPORT_BRAND_NAME").unwrap_or(defaults.brand_name),
            logo_url: get("REPORT_LOGO_URL"),
            rate_table_path: get("RATE_TABLE_PATH").map(PathBuf::from),
        }
    }

    /// Rate tables from `rate_table_path`, or the built-in defaults
    pub fn load_rate_table(&self) -> Result<RateTable> {
        match &self.rate_table_path {
            Some(path) => RateTable::from_file(path)
                .with_context(|| format!("failed to load rate table from {}", path.display())),
            None => Ok(RateTable::default()),
        }
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions::default()
            .with_locale(self.locale)
            .with_brand(self.brand_name.clone(), self.logo_url.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = ReportConfig::from_lookup(|_| None);
        assert_eq!(config.database_url, "sqlite:screen_reports.db");
        assert_eq!(config.output_dir, PathBuf::from("reports"));
        assert_eq!(config.locale, ReportLocale::EnUs);
        assert_eq!(config.brand_name, "Screen Analytics");
        assert!(config.rate_table_path.is_none());
        assert!(config.load_rate_table().is_ok());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("DATABASE_URL", "sqlite::memory:"),
            ("REPORT_OUTPUT_DIR", "/tmp/out"),
            ("REPORT_LOCALE", "es-MX"),
            ("REPORT_BRAND_NAME", "  "),
            ("RATE_TABLE_PATH", "/nonexistent/rates.json"),
        ]);
        let config = ReportConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.locale, ReportLocale::EsMx);
        assert_eq!(config.brand_name, "Screen Analytics");
        assert!(config.load_rate_table().is_err());

        let options = config.report_options();
        assert_eq!(options.locale, ReportLocale::EsMx);
    }
}
