//! Configuration loading from files and `PAYTASK__*` environment variables
//!
//! Tests touching the process environment run serially.

mod helpers;

use std::io::Write;

use assert_matches::assert_matches;
use serial_test::serial;

use helpers::*;
use paytask::{PayTaskError, Settings};

const ENV_KEYS: &[&str] = &[
    "PAYTASK__API__BASE_URL",
    "PAYTASK__API__TIMEOUT_SECONDS",
    "PAYTASK__FEES__PLATFORM_FEE_RATE",
    "PAYTASK__LOGGING__LEVEL",
];

fn clear_env() {
    for key in ENV_KEYS {
        std::env::remove_var(key);
    }
}

fn write_config(ctx: &SimpleTestContext, contents: &str) -> String {
    let path = ctx.temp_path().unwrap().join("paytask.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
#[serial]
fn test_missing_file_uses_defaults() {
    clear_env();
    let ctx = SimpleTestContext::new().unwrap();
    let missing = ctx.temp_path().unwrap().join("absent");

    let settings = Settings::from_file(&missing.to_string_lossy()).unwrap();
    assert_eq!(settings.api.base_url, "http://localhost:5000/api");
    assert_eq!(settings.fees.platform_fee_rate, 0.05);
    assert_eq!(settings.polling.activity_seconds, 5);
    assert!(settings.validate().is_ok());
}

#[test]
#[serial]
fn test_file_values_are_loaded() {
    clear_env();
    let ctx = SimpleTestContext::new().unwrap();
    let path = write_config(
        &ctx,
        r#"
[api]
base_url = "https://api.paytask.example/api"

[fees]
platform_fee_rate = 0.1

[features]
report_errors = true
"#,
    );

    let settings = Settings::from_file(&path).unwrap();
    assert_eq!(settings.api.base_url, "https://api.paytask.example/api");
    assert_eq!(settings.api.timeout_seconds, 15);
    assert_eq!(settings.fees.platform_fee_rate, 0.1);
    assert!(settings.features.report_errors);
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_env();
    let ctx = SimpleTestContext::new().unwrap();
    let path = write_config(&ctx, "[api]\nbase_url = \"https://file.example/api\"\n");

    std::env::set_var("PAYTASK__API__BASE_URL", "https://env.example/api");
    std::env::set_var("PAYTASK__API__TIMEOUT_SECONDS", "42");
    let settings = Settings::from_file(&path);
    clear_env();

    let settings = settings.unwrap();
    assert_eq!(settings.api.base_url, "https://env.example/api");
    assert_eq!(settings.api.timeout_seconds, 42);
}

#[test]
#[serial]
fn test_invalid_environment_values_fail_validation() {
    clear_env();
    let ctx = SimpleTestContext::new().unwrap();
    let missing = ctx.temp_path().unwrap().join("absent");

    std::env::set_var("PAYTASK__FEES__PLATFORM_FEE_RATE", "1.5");
    let settings = Settings::from_file(&missing.to_string_lossy());
    clear_env();
    let err = settings.unwrap().validate().unwrap_err();
    assert_matches!(err, PayTaskError::Config(ref message) if message.contains("Platform fee rate"));

    std::env::set_var("PAYTASK__LOGGING__LEVEL", "loud");
    let settings = Settings::from_file(&missing.to_string_lossy());
    clear_env();
    let err = settings.unwrap().validate().unwrap_err();
    assert_matches!(err, PayTaskError::Config(ref message) if message.contains("Invalid log level"));
}

#[test]
#[serial]
fn test_settings_round_trip_through_toml() {
    clear_env();
    let mut settings = Settings::default();
    settings.fees.platform_fee_rate = 0.08;
    settings.features.report_errors = true;

    let rendered = toml::to_string_pretty(&settings).unwrap();
    assert!(rendered.contains("platform_fee_rate = 0.08"));

    let ctx = SimpleTestContext::new().unwrap();
    let path = write_config(&ctx, &rendered);
    let loaded = Settings::from_file(&path).unwrap();
    assert_eq!(loaded.fees.platform_fee_rate, 0.08);
    assert!(loaded.features.report_errors);
}
