use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A top-level domain or public suffix (e.g. `com`, `co.uk`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tld {
    pub id: i32,
    pub name: Arc<str>,
}

impl Tld {
    pub fn new(id: i32, name: impl Into<Arc<str>>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Number of labels in the suffix (`co.uk` has two).
    pub fn label_count(&self) -> usize {
        self.name.split('.').count()
    }
}

impl fmt::Display for Tld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
