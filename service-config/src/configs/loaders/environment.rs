use std::env;

/// Reads `env_name`, treating an empty value the same as an unset one.
pub fn optional_env(env_name: &str) -> Option<String> {
    env::var(env_name).ok().filter(|value| !value.trim().is_empty())
}

/// Returns the first of `env_names` that is set.
pub fn first_env(env_names: &[&str]) -> Option<String> {
    env_names.iter().find_map(|name| optional_env(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_optional_env_present() {
        unsafe {
            std::env::set_var("SC_OPT_VAR", "value");
        }
        assert_eq!(optional_env("SC_OPT_VAR"), Some("value".to_string()));

        unsafe {
            std::env::remove_var("SC_OPT_VAR");
        }
    }

    #[test]
    #[serial]
    fn test_optional_env_missing() {
        unsafe {
            std::env::remove_var("SC_MISSING_OPT");
        }
        assert_eq!(optional_env("SC_MISSING_OPT"), None);
    }

    #[test]
    #[serial]
    fn test_optional_env_blank_is_missing() {
        unsafe {
            std::env::set_var("SC_BLANK_VAR", "  ");
        }
        assert_eq!(optional_env("SC_BLANK_VAR"), None);

        unsafe {
            std::env::remove_var("SC_BLANK_VAR");
        }
    }

    #[test]
    #[serial]
    fn test_first_env_prefers_earlier_names() {
        unsafe {
            std::env::set_var("SC_FIRST", "first");
            std::env::set_var("SC_SECOND", "second");
        }
        assert_eq!(first_env(&["SC_FIRST", "SC_SECOND"]), Some("first".to_string()));

        unsafe {
            std::env::remove_var("SC_FIRST");
        }
        assert_eq!(first_env(&["SC_FIRST", "SC_SECOND"]), Some("second".to_string()));

        unsafe {
            std::env::remove_var("SC_SECOND");
        }
        assert_eq!(first_env(&["SC_FIRST", "SC_SECOND"]), None);
    }
}
