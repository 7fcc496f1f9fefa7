use serde::Deserialize;

use mentorizon_core::config::Config;

/// Mentorizon service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct MentorizonConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3114). Env var: `MENTORIZON_PORT`.
    #[serde(default = "default_port")]
    pub mentorizon_port: u16,
}

fn default_port() -> u16 {
    3114
}

impl Config for MentorizonConfig {}
