use serde::{Deserialize, Serialize};
use thiserror::Error;

use grit_types::{Type, TypeEnv};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("class not found: {name}")]
    UnknownClass { name: String },
}

/// Host-facing generator configuration.
///
/// `specified_classes` are the classes under test by binary name; they seed
/// the producer search alongside the requested type. The match flags shape
/// the final pool query of each construction call. `seed` fixes the random
/// source: identical pool contents, seed, and horizon give identical runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    pub specified_classes: Vec<String>,
    pub exact_type_match: bool,
    pub only_receivers: bool,
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            specified_classes: Vec::new(),
            exact_type_match: false,
            only_receivers: false,
            seed: 0,
        }
    }
}

impl GeneratorConfig {
    /// Fail-fast validation: every specified class must resolve in the
    /// horizon.
    pub fn validate(&self, env: &dyn TypeEnv) -> Result<(), ConfigError> {
        for name in &self.specified_classes {
            if env.lookup_class(name).is_none() {
                return Err(ConfigError::UnknownClass { name: name.clone() });
            }
        }
        Ok(())
    }
}

/// Resolve class names into types against the horizon, failing on the first
/// unknown name.
pub(crate) fn resolve_class_names<'a>(
    env: &dyn TypeEnv,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<Type>, ConfigError> {
    names
        .into_iter()
        .map(|name| {
            env.lookup_class(name)
                .map(|id| Type::class(id, vec![]))
                .ok_or_else(|| ConfigError::UnknownClass {
                    name: name.to_string(),
                })
        })
        .collect()
}
