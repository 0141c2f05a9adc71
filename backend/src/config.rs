//! Environment-driven server configuration.

pub struct ServerConfig {
    /// TCP port to listen on (PORT, default 5000)
    pub port: u16,
    /// SQLite database URL (DATABASE_URL, default sqlite:clickball.sqlite3)
    pub database_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:clickball.sqlite3".to_string()),
        }
    }
}
