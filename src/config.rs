use std::env;

use dotenvy::dotenv;

/// Process configuration, read from the environment once at startup and
/// passed through the router state. The admin credentials gate the
/// dashboard with a plain equality check.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub admin_username: String,
    pub admin_password: String,
}

impl Config {
    pub fn load() -> Self {
        dotenv().ok();

        Self {
            database_url: var_or("DATABASE_URL", "data/food_orders.db"),
            bind_addr: var_or("BIND_ADDR", "0.0.0.0:8100"),
            admin_username: var_or("ADMIN_USERNAME", "admin"),
            admin_password: var_or("ADMIN_PASSWORD", "admin123"),
        }
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
