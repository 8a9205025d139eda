use std::fmt;

use super::namespace::Namespace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKey(String);

impl ObjectKey {
    pub fn new(namespace: Namespace, id: &str) -> Self {
        Self(format!("{}/{}", namespace.as_str(), id))
    }

    pub fn prefix(namespace: Namespace) -> Self {
        Self(namespace.as_str().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
