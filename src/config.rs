use std::env;
use std::path::PathBuf;

// Environment variable names
pub const DATA_FILE_ENV_VAR: &str = "RECIPE_VAULT_DATA_FILE";
pub const INGREDIENTS_CSV_ENV_VAR: &str = "RECIPE_VAULT_INGREDIENTS_CSV";
pub const MESSAGES_CSV_ENV_VAR: &str = "RECIPE_VAULT_MESSAGES_CSV";
pub const LOG_ENV_VAR: &str = "RECIPE_VAULT_LOG";

const DEFAULT_DATA_FILE: &str = "recipe_vault.json";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct VaultConfig {
    /// JSON snapshot holding recipes and the ingredient catalog.
    pub data_file: PathBuf,
    /// Reference ingredients merged into the catalog at startup.
    pub ingredients_csv: Option<PathBuf>,
    /// `key,message` overrides for the built-in messages.
    pub messages_csv: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            ingredients_csv: None,
            messages_csv: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl VaultConfig {
    /// Reads settings from the process environment after loading `.env`, if any.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            data_file: non_empty(DATA_FILE_ENV_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.data_file),
            ingredients_csv: non_empty(INGREDIENTS_CSV_ENV_VAR).map(PathBuf::from),
            messages_csv: non_empty(MESSAGES_CSV_ENV_VAR).map(PathBuf::from),
            log_filter: non_empty(LOG_ENV_VAR).unwrap_or(defaults.log_filter),
        }
    }
}
