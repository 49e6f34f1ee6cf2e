use std::path::Path;
use std::sync::Arc;

use crate::rules::{ConfigError, RuleBook};

/// Application-level constants
pub const APP_NAME: &str = "Labsight";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Env var naming a JSON rule file that overrides the builtin tables.
pub const RULES_ENV_VAR: &str = "LABSIGHT_RULES";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "labsight=info,warn"
}

/// Build the shared rule tables: the given file if any, builtin otherwise.
pub fn load_rules(path: Option<&Path>) -> Result<Arc<RuleBook>, ConfigError> {
    let book = match path {
        Some(path) => RuleBook::from_path(path)?,
        None => RuleBook::builtin(),
    };
    Ok(Arc::new(book))
}
