use std::env;

use chrono::Duration;
use log::*;
use oc_common::{helpers::parse_boolean_flag, Secret};

const DEFAULT_OC_HOST: &str = "127.0.0.1";
const DEFAULT_OC_PORT: u16 = 8460;
const DEFAULT_SESSION_TTL: Duration = Duration::hours(12);
const DEFAULT_SWEEP_PERIOD_SECONDS: u64 = 25;
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "changeme";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// How long an issued session stays valid. Expiry requires a fresh login; sessions never renew.
    pub session_ttl: Duration,
    /// Period of the background job that reclaims expired sessions and pings stream subscribers.
    pub sweep_period: std::time::Duration,
    /// When false, the bootstrap admin account is not created at startup.
    pub seed_admin: bool,
    pub admin_username: String,
    pub admin_password: Secret<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_OC_HOST.to_string(),
            port: DEFAULT_OC_PORT,
            database_url: String::default(),
            session_ttl: DEFAULT_SESSION_TTL,
            sweep_period: std::time::Duration::from_secs(DEFAULT_SWEEP_PERIOD_SECONDS),
            seed_admin: true,
            admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
            admin_password: Secret::new(DEFAULT_ADMIN_PASSWORD.to_string()),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("OC_HOST").ok().unwrap_or_else(|| DEFAULT_OC_HOST.into());
        let port = env::var("OC_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for OC_PORT. {e} Using the default, {DEFAULT_OC_PORT}, instead."
                    );
                    DEFAULT_OC_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_OC_PORT);
        let database_url = env::var("OC_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ OC_DATABASE_URL is not set. Please set it to the URL for the OrderCast database.");
            String::default()
        });
        let session_ttl = env::var("OC_SESSION_TTL_HOURS")
            .ok()
            .and_then(|s| {
                s.parse::<i64>()
                    .map_err(|e| {
                        error!("🪛️ {s} is not a valid value for OC_SESSION_TTL_HOURS. {e} Using the default instead.");
                        e
                    })
                    .ok()
            })
            .map(Duration::hours)
            .unwrap_or(DEFAULT_SESSION_TTL);
        let sweep_period = env::var("OC_SWEEP_PERIOD_SECONDS")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| {
                        error!(
                            "🪛️ {s} is not a valid value for OC_SWEEP_PERIOD_SECONDS. {e} Using the default instead."
                        );
                        e
                    })
                    .ok()
            })
            .map(std::time::Duration::from_secs)
            .unwrap_or_else(|| std::time::Duration::from_secs(DEFAULT_SWEEP_PERIOD_SECONDS));
        let seed_admin = parse_boolean_flag(env::var("OC_SEED_ADMIN").ok(), true);
        let admin_username = env::var("OC_ADMIN_USERNAME").ok().unwrap_or_else(|| DEFAULT_ADMIN_USERNAME.into());
        let admin_password = env::var("OC_ADMIN_PASSWORD").ok().map(Secret::new).unwrap_or_else(|| {
            warn!(
                "🪛️ OC_ADMIN_PASSWORD is not set. The bootstrap admin account will use the default password; set \
                 the variable and recreate the account for anything beyond local development."
            );
            Secret::new(DEFAULT_ADMIN_PASSWORD.to_string())
        });
        Self {
            host,
            port,
            database_url,
            session_ttl,
            sweep_period,
            seed_admin,
            admin_username,
            admin_password,
        }
    }
}
