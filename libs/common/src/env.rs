//! Helpers for reading service configuration from environment variables
//!
//! Every config struct in the workspace exposes a `from_env()` constructor;
//! these helpers keep the "unset means default" rule in one place.

use std::env;
use std::str::FromStr;

use crate::error::EnvError;

/// Read a string variable, falling back to `default` when unset or empty.
pub fn var_or(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default.to_string(),
    }
}

/// Read an optional string variable. Empty values count as unset.
pub fn var_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Read and parse a variable, falling back to `default` when unset.
///
/// A value that is set but does not parse is reported instead of silently
/// replaced, so a typo in deployment config fails at startup.
pub fn parse_or<T: FromStr>(name: &str, default: T) -> Result<T, EnvError> {
    match parse_opt(name)? {
        Some(value) => Ok(value),
        None => Ok(default),
    }
}

/// Read and parse an optional variable.
pub fn parse_opt<T: FromStr>(name: &str) -> Result<Option<T>, EnvError> {
    match var_opt(name) {
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| EnvError {
            name: name.to_string(),
            value: raw,
        }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_var_or_uses_default_when_unset_or_blank() {
        unsafe {
            env::remove_var("PREMIER_TEST_VAR");
        }
        assert_eq!(var_or("PREMIER_TEST_VAR", "fallback"), "fallback");

        unsafe {
            env::set_var("PREMIER_TEST_VAR", "  ");
        }
        assert_eq!(var_or("PREMIER_TEST_VAR", "fallback"), "fallback");

        unsafe {
            env::set_var("PREMIER_TEST_VAR", "value");
        }
        assert_eq!(var_or("PREMIER_TEST_VAR", "fallback"), "value");

        unsafe {
            env::remove_var("PREMIER_TEST_VAR");
        }
    }

    #[test]
    #[serial]
    fn test_parse_or_rejects_garbage() {
        unsafe {
            env::set_var("PREMIER_TEST_NUM", "twelve");
        }
        let err = parse_or::<u32>("PREMIER_TEST_NUM", 12).unwrap_err();
        assert_eq!(err.name, "PREMIER_TEST_NUM");
        assert_eq!(err.value, "twelve");

        unsafe {
            env::set_var("PREMIER_TEST_NUM", "7");
        }
        assert_eq!(parse_or::<u32>("PREMIER_TEST_NUM", 12), Ok(7));

        unsafe {
            env::remove_var("PREMIER_TEST_NUM");
        }
        assert_eq!(parse_or::<u32>("PREMIER_TEST_NUM", 12), Ok(12));
    }
}
