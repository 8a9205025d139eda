use std::fmt;

/// Logical partition of the object store, each with its own id space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Images,
    Recordings,
    Deviations,
}

impl Namespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Images => "images",
            Namespace::Recordings => "recordings",
            Namespace::Deviations => "deviations",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Namespace::Images => "image/jpeg",
            Namespace::Recordings => "audio/mpeg",
            Namespace::Deviations => "application/json",
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
