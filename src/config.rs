//! Runtime configuration loaded from environment variables.

use std::time::Duration;

/// Default name of the cookie carrying the session id.
pub const DEFAULT_COOKIE_NAME: &str = "todos_session";
/// Sessions idle for longer than this are discarded.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Session and HTTP settings.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Session cookie name (from TODOS_SESSION_COOKIE)
    pub cookie_name: String,
    /// Idle lifetime of a session (from TODOS_SESSION_TTL_SECS)
    pub ttl: Duration,
    /// Allowed CORS origins (from TODOS_CORS_ORIGINS, comma-separated)
    pub cors_origins: Option<Vec<String>>,
}

impl SessionConfig {
    /// Load configuration from environment variables, falling back to defaults
    /// for anything unset or unparsable.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key/value source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let cookie_name = lookup("TODOS_SESSION_COOKIE")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());

        let ttl = lookup("TODOS_SESSION_TTL_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_SESSION_TTL);

        let cors_origins = lookup("TODOS_CORS_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty());

        Self {
            cookie_name,
            ttl,
            cors_origins,
        }
    }

    /// True when every origin may make requests: no origins configured, or
    /// a `*` among them.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins
            .as_ref()
            .map_or(true, |origins| origins.iter().any(|origin| origin == "*"))
    }

    /// Create a config with a specific session lifetime.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            ..Self::default_values()
        }
    }

    fn default_values() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            ttl: DEFAULT_SESSION_TTL,
            cors_origins: None,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::default_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn default_config_uses_standard_cookie_and_ttl() {
        let config = SessionConfig::default();
        assert_eq!(config.cookie_name, "todos_session");
        assert_eq!(config.ttl, DEFAULT_SESSION_TTL);
        assert!(config.cors_origins.is_none());
        assert!(config.allows_any_origin());
    }

    fn config_from(vars: &[(&str, &str)]) -> SessionConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        SessionConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn reads_all_settings() {
        let config = config_from(&[
            ("TODOS_SESSION_COOKIE", "sid"),
            ("TODOS_SESSION_TTL_SECS", "600"),
            ("TODOS_CORS_ORIGINS", "https://a.example, https://b.example"),
        ]);

        assert_eq!(config.cookie_name, "sid");
        assert_eq!(config.ttl, Duration::from_secs(600));
        assert_eq!(
            config.cors_origins,
            Some(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ])
        );
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn unparsable_ttl_falls_back_to_default() {
        let config = config_from(&[("TODOS_SESSION_TTL_SECS", "a day")]);

        assert_eq!(config.ttl, DEFAULT_SESSION_TTL);
    }

    #[test]
    fn blank_cookie_name_falls_back_to_default() {
        let config = config_from(&[("TODOS_SESSION_COOKIE", "   ")]);

        assert_eq!(config.cookie_name, DEFAULT_COOKIE_NAME);
    }

    #[test]
    fn empty_cors_entries_are_dropped() {
        let config = config_from(&[("TODOS_CORS_ORIGINS", "https://a.example,, ,")]);
        assert_eq!(config.cors_origins, Some(vec!["https://a.example".to_string()]));

        let config = config_from(&[("TODOS_CORS_ORIGINS", " , ")]);
        assert!(config.cors_origins.is_none());
    }

    #[test]
    fn wildcard_origin_allows_any_origin() {
        let config = config_from(&[("TODOS_CORS_ORIGINS", "https://a.example,*")]);

        assert!(config.allows_any_origin());
    }

    #[test]
    fn with_ttl_overrides_only_the_lifetime() {
        let config = SessionConfig::with_ttl(Duration::from_secs(5));
        assert_eq!(config.ttl, Duration::from_secs(5));
        assert_eq!(config.cookie_name, DEFAULT_COOKIE_NAME);
    }
}
