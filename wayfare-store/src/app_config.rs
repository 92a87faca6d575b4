use serde::Deserialize;
use std::env;
use wayfare_booking::{DemoReferenceConfig, NowPaymentsConfig, StripeConfig};
use wayfare_catalog::ExtrasPricingTable;
use wayfare_core::CoreResult;
use wayfare_quote::FeeRule;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub pricing: ExtrasPricingTable,
    /// Applied to every quote that doesn't carry its own fee rules
    #[serde(default)]
    pub fees: Vec<FeeRule>,
    #[serde(default)]
    pub payments: PaymentsConfig,
    #[serde(default)]
    pub demo: DemoReferenceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 { 3000 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PaymentsConfig {
    #[serde(default)]
    pub stripe: StripeConfig,
    #[serde(default)]
    pub nowpayments: NowPaymentsConfig,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Built-in defaults cover everything, so even this file is optional
            .add_source(config::File::with_name("config/default").required(false))
            // Per-environment overrides, e.g. config/production.toml
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `WAYFARE__SERVER__PORT=8080` would set `server.port`
            .add_source(config::Environment::with_prefix("WAYFARE").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    /// Startup check: a table that can't price every cabin is a deployment error.
    pub fn validate(&self) -> CoreResult<()> {
        self.pricing.validate()?;
        tracing::info!(
            "Pricing table loaded: {} ({} cabins, {} bag types, {} default fees)",
            self.pricing.currency,
            self.pricing.seats.len(),
            self.pricing.baggage.len(),
            self.fees.len()
        );
        Ok(())
    }
}
