use serde::{Deserialize, Serialize};

/// Database configuration for the domain registry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to SQLite database file (default: "./dnsdig.db")
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Directory holding the SQL migrations (default: "./migrations")
    #[serde(default = "default_migrations")]
    pub migrations: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        if self.path.starts_with("sqlite:") {
            self.path.clone()
        } else {
            format!("sqlite:{}", self.path)
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            migrations: default_migrations(),
            max_connections: default_max_connections(),
        }
    }
}

fn default_db_path() -> String {
    "./dnsdig.db".to_string()
}

fn default_migrations() -> String {
    "./migrations".to_string()
}

fn default_max_connections() -> u32 {
    8
}
