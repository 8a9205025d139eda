use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ANALYSIS_KEY_SUFFIX: &str = "-analysis";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviationId(String);

impl DeviationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key of the analysis record stored next to the deviation record.
    pub fn analysis_key(&self) -> String {
        format!("{}{}", self.0, ANALYSIS_KEY_SUFFIX)
    }

    pub fn is_analysis_key(key: &str) -> bool {
        key.ends_with(ANALYSIS_KEY_SUFFIX)
    }
}

impl Default for DeviationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DeviationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
