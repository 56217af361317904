// crates/user-search-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: File loading limits, defaults, and section validation.
// Purpose: Ensure config loading fails closed on malformed input.
// =============================================================================

//! Config load validation tests for user-search-config.

use std::fs;
use std::path::Path;

use user_search_config::ConfigError;
use user_search_config::EventSinkKind;
use user_search_config::UserSearchConfig;
use user_search_config::config_toml_example;

type TestResult = Result<(), String>;

fn write_config(dir: &Path, contents: &[u8]) -> Result<std::path::PathBuf, String> {
    let path = dir.join("user-search.toml");
    fs::write(&path, contents).map_err(|err| err.to_string())?;
    Ok(path)
}

fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}

#[test]
fn empty_file_yields_defaults() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = write_config(dir.path(), b"")?;
    let config = UserSearchConfig::load(Some(&path)).map_err(|err| err.to_string())?;
    if config != UserSearchConfig::default() {
        return Err("config differs from defaults".to_string());
    }
    if !config.validation.ssn_format || config.validation.email_format {
        return Err("validator defaults changed".to_string());
    }
    if config.validation.max_value_length != 256 {
        return Err("max_value_length should default to 256".to_string());
    }
    if config.events.sink != EventSinkKind::None {
        return Err("events should default to none".to_string());
    }
    Ok(())
}

#[test]
fn example_config_loads() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = write_config(dir.path(), config_toml_example().as_bytes())?;
    let config = UserSearchConfig::load(Some(&path)).map_err(|err| err.to_string())?;
    if config != UserSearchConfig::default() {
        return Err("example should spell out the defaults".to_string());
    }
    Ok(())
}

#[test]
fn missing_file_is_io_error() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let result = UserSearchConfig::load(Some(&dir.path().join("absent.toml")));
    assert_invalid(result, "config io error")
}

#[test]
fn oversized_file_is_rejected() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let mut contents = b"# ".to_vec();
    contents.resize(1024 * 1024 + 1, b'x');
    let path = write_config(dir.path(), &contents)?;
    assert_invalid(UserSearchConfig::load(Some(&path)), "size limit")
}

#[test]
fn non_utf8_file_is_rejected() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = write_config(dir.path(), &[0xff, 0xfe, 0x00])?;
    assert_invalid(UserSearchConfig::load(Some(&path)), "utf-8")
}

#[test]
fn long_path_component_is_rejected() -> TestResult {
    let long = "a".repeat(256);
    let result = UserSearchConfig::load(Some(Path::new(&format!("{long}.toml"))));
    assert_invalid(result, "component too long")
}

#[test]
fn unknown_keys_are_parse_errors() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = write_config(dir.path(), b"[validation]\nssn_shape = true\n")?;
    assert_invalid(UserSearchConfig::load(Some(&path)), "config parse error")
}

#[test]
fn max_value_length_bounds() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = write_config(dir.path(), b"[validation]\nmax_value_length = 0\n")?;
    assert_invalid(UserSearchConfig::load(Some(&path)), "max_value_length")?;
    let path = write_config(dir.path(), b"[validation]\nmax_value_length = 5000\n")?;
    assert_invalid(UserSearchConfig::load(Some(&path)), "max_value_length")
}

#[test]
fn file_sink_requires_path() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = write_config(dir.path(), b"[events]\nsink = \"file\"\n")?;
    assert_invalid(UserSearchConfig::load(Some(&path)), "events.path is required")?;
    let path = write_config(dir.path(), b"[events]\nsink = \"stderr\"\npath = \"x.jsonl\"\n")?;
    assert_invalid(UserSearchConfig::load(Some(&path)), "only valid for file sink")
}

#[test]
fn file_sink_writes_engine_events() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let log = dir.path().join("events.jsonl");
    let toml = format!("[events]\nsink = \"file\"\npath = '{}'\n", log.display());
    let path = write_config(dir.path(), toml.as_bytes())?;
    let config = UserSearchConfig::load(Some(&path)).map_err(|err| err.to_string())?;
    let mut engine = config.build_engine().map_err(|err| err.to_string())?;
    engine.select_category_label("ID").map_err(|err| err.to_string())?;
    let contents = fs::read_to_string(&log).map_err(|err| err.to_string())?;
    if contents.lines().count() != 1 {
        return Err(format!("expected one event line, got {contents}"));
    }
    Ok(())
}
