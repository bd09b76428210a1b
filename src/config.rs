use std::{env, time::Duration};

/// AppConfig
///
/// Holds the application's entire configuration state. Immutable once loaded and
/// pulled into handlers and middleware via `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls log format and cookie hardening.
    pub env: Env,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // Name of the cookie carrying the opaque session id.
    pub session_cookie: String,
    // Sessions untouched for longer than this are purged.
    pub session_idle_timeout: Duration,
}

/// Env
///
/// Defines the runtime context, used to switch between developer-friendly output
/// and production hardening (JSON logs, `Secure` cookies).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_SESSION_COOKIE: &str = "portal_session";
const DEFAULT_IDLE_MINUTES: u64 = 60;

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for test setup,
    /// without needing to set environment variables.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: "127.0.0.1:0".to_string(),
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
            session_idle_timeout: Duration::from_secs(DEFAULT_IDLE_MINUTES * 60),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing the application configuration at startup.
    /// It reads all parameters from environment variables and implements the **fail-fast** principle.
    ///
    /// # Panics
    /// Panics if `BIND_ADDR` is missing in production, or if `SESSION_IDLE_MINUTES`
    /// is set to something other than a positive integer.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let bind_addr = match env {
            Env::Production => {
                env::var("BIND_ADDR").expect("FATAL: BIND_ADDR must be set in production.")
            }
            Env::Local => env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
        };

        let session_cookie =
            env::var("SESSION_COOKIE").unwrap_or_else(|_| DEFAULT_SESSION_COOKIE.to_string());

        let idle_minutes = match env::var("SESSION_IDLE_MINUTES") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(minutes) if minutes > 0 => minutes,
                _ => panic!("FATAL: SESSION_IDLE_MINUTES must be a positive integer, got '{raw}'."),
            },
            Err(_) => DEFAULT_IDLE_MINUTES,
        };

        Self {
            env,
            bind_addr,
            session_cookie,
            session_idle_timeout: Duration::from_secs(idle_minutes * 60),
        }
    }

    /// Whether session cookies must carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.env == Env::Production
    }
}
