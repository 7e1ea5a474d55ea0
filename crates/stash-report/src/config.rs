use stash_common::{league::League, secret::SecretString};
use stash_model::transport::http::HttpConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone)]
pub struct Configuration {
    pub account_name: String,
    pub session_id: SecretString,
    pub league: League,
    pub http: HttpConfig,
}

impl Configuration {
    pub fn from_env() -> Result<Configuration, ConfigError> {
        let mut http = HttpConfig::default();
        if let Some(base_url) = read_string_from_env("POE_BASE_URL") {
            http.base_url = base_url;
        }
        if let Some(user_agent) = read_string_from_env("POE_USER_AGENT") {
            http.user_agent = user_agent;
        }

        Ok(Configuration {
            account_name: ensure_string_from_env("POE_ACCOUNT_NAME")?,
            session_id: SecretString::new(ensure_string_from_env("POE_SESSION_ID")?),
            league: read_string_from_env("POE_LEAGUE")
                .map(League::new)
                .unwrap_or_default(),
            http,
        })
    }
}

fn ensure_string_from_env(name: &'static str) -> Result<String, ConfigError> {
    read_string_from_env(name).ok_or(ConfigError::Missing(name))
}

fn read_string_from_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
