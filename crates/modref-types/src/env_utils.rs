//! Environment variable parsing utilities.
//!
//! Configuration layers read overrides such as `MODULE_REF_ENTRY_MODULES` or
//! `MODULE_REF_THREADS` from the environment. These helpers keep that parsing in one place.
//!
//! # Example
//!
//! ```
//! use modref_types::env_utils::{env_bool_or, env_list, env_var};
//!
//! let threads: Option<usize> = env_var("MODULE_REF_THREADS");
//! let entry_modules: Vec<String> = env_list("MODULE_REF_ENTRY_MODULES");
//! let fail_on_duplicate = env_bool_or("MODULE_REF_FAIL_ON_DUPLICATE", true);
//! # let _ = (threads, entry_modules, fail_on_duplicate);
//! ```

use std::str::FromStr;

/// Parse an environment variable into a type that implements `FromStr`.
///
/// Returns `None` if the variable is not set or cannot be parsed.
pub fn env_var<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Read a flag, returning `default` when the variable is unset.
///
/// A set variable is true only for "1", "true", "yes" or "on" (case-insensitive).
pub fn env_bool_or(key: &str, default: bool) -> bool {
    match std::env::var(key).ok() {
        Some(v) => is_truthy(&v),
        None => default,
    }
}

/// Parse a comma-separated environment variable into a vector.
///
/// Entries are trimmed and empty entries are dropped, so `"a, ,b,"` yields `["a", "b"]`.
/// Returns an empty vector if the variable is not set.
pub fn env_list(key: &str) -> Vec<String> {
    std::env::var(key)
        .ok()
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_parsing() {
        std::env::set_var("MODREF_TEST_U64", " 42 ");
        let val: Option<u64> = env_var("MODREF_TEST_U64");
        assert_eq!(val, Some(42));

        let missing: Option<u64> = env_var("MODREF_NONEXISTENT_VAR_1");
        assert_eq!(missing, None);

        std::env::set_var("MODREF_TEST_BAD_U64", "many");
        assert_eq!(env_var::<u64>("MODREF_TEST_BAD_U64"), None);
        std::env::remove_var("MODREF_TEST_BAD_U64");
        std::env::remove_var("MODREF_TEST_U64");
    }

    #[test]
    fn test_env_bool_or() {
        std::env::set_var("MODREF_TEST_BOOL_YES", "YES");
        std::env::set_var("MODREF_TEST_BOOL_OFF", "off");

        assert!(env_bool_or("MODREF_TEST_BOOL_YES", false));
        assert!(!env_bool_or("MODREF_NONEXISTENT_VAR_3", false));
        assert!(env_bool_or("MODREF_NONEXISTENT_VAR_4", true));
        assert!(!env_bool_or("MODREF_TEST_BOOL_OFF", true));

        std::env::remove_var("MODREF_TEST_BOOL_YES");
        std::env::remove_var("MODREF_TEST_BOOL_OFF");
    }

    #[test]
    fn test_env_list() {
        std::env::set_var("MODREF_TEST_LIST", "^app$, ,lib.*,");
        assert_eq!(env_list("MODREF_TEST_LIST"), vec!["^app$", "lib.*"]);
        assert!(env_list("MODREF_NONEXISTENT_VAR_5").is_empty());
        std::env::remove_var("MODREF_TEST_LIST");
    }
}
