use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::TemplateDescriptor;
use crate::store::{StoreSettings, DEFAULT_CREDITS};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
    /// Replaces the built-in catalog when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates: Option<Vec<TemplateDescriptor>>,
}

/// Store behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Balance for a fresh or reset store (default: 500).
    #[serde(default = "default_starting_credits")]
    pub starting_credits: u64,
    /// Simulated confirmation delay for interactive checkout (default: 1500).
    #[serde(default = "default_checkout_delay_ms")]
    pub checkout_delay_ms: u64,
    /// State file location. Defaults to the platform data dir.
    #[serde(default)]
    pub state_file: Option<PathBuf>,
}

/// Terminal storefront settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event loop tick in milliseconds (default: 100).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_starting_credits() -> u64 {
    DEFAULT_CREDITS
}

fn default_checkout_delay_ms() -> u64 {
    1500
}

fn default_tick_rate_ms() -> u64 {
    100
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            starting_credits: default_starting_credits(),
            checkout_delay_ms: default_checkout_delay_ms(),
            state_file: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl StoreConfig {
    pub fn settings(&self) -> StoreSettings {
        StoreSettings {
            starting_credits: self.starting_credits,
        }
    }

    pub fn checkout_delay(&self) -> Duration {
        Duration::from_millis(self.checkout_delay_ms)
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}
