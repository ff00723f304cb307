//! Centralized configuration (environment variables + defaults).
//!
//! Every setting has a hardcoded default so the server starts with no environment at all.

pub const DEFAULT_JWT_SECRET: &str = "dev_secret";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DB_PATH: &str = "db.json";
pub const DEFAULT_PUBLIC_DIR: &str = "public";

/// Token signing secret (`JWT_SECRET`).
pub fn jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string())
}

/// Listen port (`PORT`). Unparseable values fall back to the default.
pub fn port() -> u16 {
    parse_port(std::env::var("PORT").ok().as_deref())
}

/// Path of the JSON document (`DB_PATH`).
pub fn db_path() -> String {
    std::env::var("DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string())
}

/// Directory served for `/` and other static paths (`PUBLIC_DIR`).
pub fn public_dir() -> String {
    std::env::var("PUBLIC_DIR").unwrap_or_else(|_| DEFAULT_PUBLIC_DIR.to_string())
}

fn parse_port(raw: Option<&str>) -> u16 {
    raw.and_then(|v| v.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub port: u16,
    pub db_path: String,
    pub public_dir: String,
}

impl AppConfig {
    /// Reads `.env` (if present) and the process environment.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            jwt_secret: jwt_secret(),
            port: port(),
            db_path: db_path(),
            public_dir: public_dir(),
        }
    }
}
