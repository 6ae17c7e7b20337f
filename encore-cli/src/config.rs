use std::env;
use std::path::Path;

use encore_core::DEFAULT_SUCCESS_RATE;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub event: EventConfig,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EventConfig {
    pub total_tickets: u32,
    /// Inclusive bounds for the random face-price draw, in whole pesos.
    pub price_min: i64,
    pub price_max: i64,
    pub venue_capacity: u32,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            total_tickets: 100,
            price_min: 100,
            price_max: 300,
            venue_capacity: 150,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SimulationConfig {
    pub success_rate: f64,
    /// Pins every random draw (price, method choice, payment outcomes).
    pub seed: Option<u64>,
    pub payment_methods: Vec<String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            success_rate: DEFAULT_SUCCESS_RATE,
            seed: None,
            payment_methods: [
                "GCash",
                "PayMaya",
                "BPI Online",
                "BDO Online",
                "Credit Card",
                "Debit Card",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

impl Config {
    pub fn load(config_dir: &Path) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Every file source is optional: serde defaults cover a bare run
            .add_source(config::File::from(config_dir.join("default")).required(false))
            .add_source(config::File::from(config_dir.join(run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::from(config_dir.join("local")).required(false))
            // Eg. `ENCORE_EVENT__TOTAL_TICKETS=50`
            .add_source(config::Environment::with_prefix("ENCORE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
