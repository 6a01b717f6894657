//! Application configuration management.
//!
//! This module handles loading and merging configuration from multiple sources
//! with a clear precedence order. Configuration can come from default values,
//! a configuration file, and environment variables.

use cw_core::models::{Scenario, ScenarioError, SlopeRange};
use cw_model::{Presenter, SeriesBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{Level, event};

/// The application configuration: the scenario, the slope control and the sampling density
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// The pivot bundle, the price change and the chart bounds
    #[serde(default)]
    pub scenario: Scenario,

    /// The bounds, step and default of the slope control
    #[serde(default)]
    pub slider: SlopeRange,

    /// How densely the curves are sampled
    #[serde(default)]
    pub sampling: SeriesBuilder,
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Environment variables (highest priority)
    /// 2. The config file, if given
    /// 3. Default values (lowest priority)
    ///
    /// Environment variables are mapped using the pattern:
    /// `CW_<SECTION>__<KEY>` maps to `<section>.<key>`
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Study a smaller price drop
    /// export CW_SCENARIO__NEW_PRICE=45
    ///
    /// # Allow flatter demand curves
    /// export CW_SLIDER__MIN=0.1
    /// ```
    ///
    /// Every section is validated while deserializing, so an inconsistent
    /// scenario or slope control is rejected here rather than at compute time.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        Self::load_with_env(path, None)
    }

    // `env` replaces the process environment when given
    fn load_with_env(
        path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> anyhow::Result<Self> {
        let mut config = config::Config::builder();

        // Start with default values
        config = config.add_source(config::Config::try_from(&Self::default())?);

        // Layer on config file if it is specified and exists
        if let Some(path) = path {
            if path.exists() {
                config = config.add_source(config::File::from(path))
            } else {
                return Err(anyhow::anyhow!(
                    "Config file {} does not exist",
                    path.display()
                ));
            }
        }

        // Override with environment variables
        // This maps CW_SCENARIO__NEW_PRICE to scenario.new_price
        config = config.add_source(
            config::Environment::with_prefix("CW")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let built_config = config.build()?;
        let loaded: Self = built_config.try_deserialize()?;
        event!(Level::DEBUG, config = ?loaded, "loaded configuration");
        Ok(loaded)
    }

    /// Replace the scenario's new price, if an override is given
    pub fn with_new_price(mut self, new_price: Option<f64>) -> Result<Self, ScenarioError> {
        if let Some(price) = new_price {
            self.scenario = self.scenario.with_new_price(price)?;
        }
        Ok(self)
    }

    /// The presenter for this configuration
    pub fn presenter(self) -> Presenter {
        Presenter::new(self.scenario, self.slider, self.sampling)
    }
}
