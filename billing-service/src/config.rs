use serde::Deserialize;
use std::fs;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind_addr: String,
}

/// Billing parameters. The per-kWh rate is explicit configuration rather
/// than an ambient constant so tests and deployments can vary it.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    #[serde(default = "default_price_per_kwh")]
    pub price_per_kwh: f64,
}

fn default_price_per_kwh() -> f64 {
    0.5
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            price_per_kwh: default_price_per_kwh(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub billing: BillingConfig,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        use std::env;

        let path = env::var("BILLING_CONFIG").unwrap_or_else(|_| "billing-config.toml".to_string());
        let contents = fs::read_to_string(&path)?;
        let cfg: AppConfig = toml::from_str(&contents)?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_parses_with_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [database]
            url = "sqlite://billing.db?mode=rwc"

            [http]
            bind_addr = "127.0.0.1:8000"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.database.max_connections, 5);
        assert_eq!(cfg.billing.price_per_kwh, 0.5);
    }

    #[test]
    fn price_per_kwh_can_be_overridden() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [database]
            url = "sqlite::memory:"
            max_connections = 1

            [http]
            bind_addr = "127.0.0.1:8000"

            [billing]
            price_per_kwh = 0.75
            "#,
        )
        .unwrap();

        assert_eq!(cfg.billing.price_per_kwh, 0.75);
        assert_eq!(cfg.database.max_connections, 1);
    }
}
