use intern_portal::{AppConfig, config::Env};
use serial_test::serial;
use std::{env, panic, time::Duration};

// --- Setup/Teardown Utilities ---

const CONFIG_VARS: [&str; 4] = ["APP_ENV", "BIND_ADDR", "SESSION_COOKIE", "SESSION_IDLE_MINUTES"];

/// Utility to run a test function and restore environment variables afterward
fn run_with_env<T, R>(test: T) -> std::thread::Result<R>
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    let originals: Vec<(&str, Option<String>)> = CONFIG_VARS
        .iter()
        .map(|&var| (var, env::var(var).ok()))
        .collect();

    let result = panic::catch_unwind(test);

    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            match original_value {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }

    result
}

fn clear_config_vars() {
    unsafe {
        for var in CONFIG_VARS {
            env::remove_var(var);
        }
    }
}

// --- Tests ---

#[test]
#[serial]
fn test_app_config_production_fail_fast() {
    let result = run_with_env(|| {
        clear_config_vars();
        unsafe {
            env::set_var("APP_ENV", "production");
        }
        // BIND_ADDR is missing
        AppConfig::load()
    });

    assert!(
        result.is_err(),
        "Production config loading should panic without BIND_ADDR"
    );
}

#[test]
#[serial]
fn test_app_config_production_with_bind_addr() {
    let config = run_with_env(|| {
        clear_config_vars();
        unsafe {
            env::set_var("APP_ENV", "production");
            env::set_var("BIND_ADDR", "0.0.0.0:8080");
        }
        AppConfig::load()
    })
    .expect("production config with BIND_ADDR should load");

    assert_eq!(config.env, Env::Production);
    assert_eq!(config.bind_addr, "0.0.0.0:8080");
    assert!(config.secure_cookies());
}

#[test]
#[serial]
fn test_app_config_local_env_defaults() {
    let config = run_with_env(|| {
        clear_config_vars();
        unsafe {
            env::set_var("APP_ENV", "local");
        }
        AppConfig::load()
    })
    .expect("local config should never panic");

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.bind_addr, "0.0.0.0:3000");
    assert_eq!(config.session_cookie, "portal_session");
    assert_eq!(config.session_idle_timeout, Duration::from_secs(60 * 60));
    assert!(!config.secure_cookies());
}

#[test]
#[serial]
fn test_app_config_custom_session_settings() {
    let config = run_with_env(|| {
        clear_config_vars();
        unsafe {
            env::set_var("SESSION_COOKIE", "ims_sid");
            env::set_var("SESSION_IDLE_MINUTES", "15");
        }
        AppConfig::load()
    })
    .expect("valid session settings should load");

    assert_eq!(config.session_cookie, "ims_sid");
    assert_eq!(config.session_idle_timeout, Duration::from_secs(15 * 60));
}

#[test]
#[serial]
fn test_app_config_rejects_invalid_idle_minutes() {
    for raw in ["0", "-5", "soon"] {
        let result = run_with_env(|| {
            clear_config_vars();
            unsafe {
                env::set_var("SESSION_IDLE_MINUTES", raw);
            }
            AppConfig::load()
        });
        assert!(result.is_err(), "SESSION_IDLE_MINUTES={raw} should be rejected");
    }
}
