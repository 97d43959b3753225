mod loader;
mod thresholds;

pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};
pub use thresholds::{DebtConfig, SmellThresholds, SuggestionConfig};

use serde::{Deserialize, Serialize};

/// Engine configuration, read from `.debtlens.toml`.
///
/// Every section is optional; missing values fall back to the built-in
/// thresholds.
///
/// ```toml
/// [thresholds]
/// length_medium = 20
/// params_high = 5
///
/// [debt]
/// minutes_per_finding = 15
///
/// [suggestions]
/// max_suggestions = 2
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub thresholds: SmellThresholds,

    #[serde(default)]
    pub debt: DebtConfig,

    #[serde(default)]
    pub suggestions: SuggestionConfig,
}
