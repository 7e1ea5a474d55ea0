use std::sync::Arc;

use bytes::Bytes;
use reqwest::{
    blocking::{Client, Response},
    cookie::Jar,
    Url,
};
use stash_common::{league::League, secret::SecretString};
use tracing::{debug, info};

use crate::error::TransportError;

use super::{check_status, Transport};

pub const DEFAULT_BASE_URL: &str = "https://www.pathofexile.com";
pub const DEFAULT_USER_AGENT: &str = "stash-report/0.1";

const SESSION_COOKIE: &str = "POESESSID";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub base_url: String,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

/// Blocking client for the character-window endpoints of the web service, authenticated
/// through the session cookie of a logged in browser.
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    jar: Arc<Jar>,
    base_url: Url,
    account_name: Option<String>,
}

impl HttpTransport {
    pub fn new(config: HttpConfig) -> Result<Self, TransportError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        let jar = Arc::new(Jar::default());
        let client = Client::builder()
            .cookie_provider(jar.clone())
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self {
            client,
            jar,
            base_url,
            account_name: None,
        })
    }

    fn account_name(&self) -> Result<&str, TransportError> {
        self.account_name.as_deref().ok_or(TransportError::NoSession)
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<String, TransportError> {
        endpoint(&self.base_url, path, query)
    }

    #[tracing::instrument(skip(self))]
    fn get(&self, url: &str) -> Result<Bytes, TransportError> {
        debug!("Requesting {}", url);
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()?;
        read_body(response)
    }
}

fn endpoint(base_url: &Url, path: &str, query: &[(&str, &str)]) -> Result<String, TransportError> {
    let url = base_url
        .join(path)
        .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", path, e)))?;

    if query.is_empty() {
        return Ok(url.to_string());
    }

    Ok(format!("{}?{}", url, serde_urlencoded::to_string(query)?))
}

fn read_body(response: Response) -> Result<Bytes, TransportError> {
    let status = response.status().as_u16();
    let rate_limit = response
        .headers()
        .get("x-rate-limit-ip")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    check_status(status, rate_limit.as_deref())?;

    Ok(response.bytes()?)
}

impl Transport for HttpTransport {
    fn authenticate(
        &mut self,
        identity: &str,
        secret: &SecretString,
    ) -> Result<(), TransportError> {
        let cookie = SecretString::new(format!(
            "{}={}; Path=/",
            SESSION_COOKIE,
            secret.expose()
        ));
        self.jar.add_cookie_str(cookie.expose(), &self.base_url);

        let url = self.endpoint("/character-window/get-account-name", &[])?;
        self.get(&url)?;

        info!("Authenticated {}", identity);
        self.account_name = Some(identity.to_owned());

        Ok(())
    }

    fn stash_document(
        &mut self,
        tab_index: usize,
        league: &League,
        _force_refresh: bool,
    ) -> Result<Bytes, TransportError> {
        let tab_index = tab_index.to_string();
        let url = self.endpoint(
            "/character-window/get-stash-items",
            &[
                ("league", league.as_ref()),
                ("tabs", "1"),
                ("tabIndex", tab_index.as_str()),
                ("accountName", self.account_name()?),
            ],
        )?;
        self.get(&url)
    }

    fn characters_document(&mut self) -> Result<Bytes, TransportError> {
        let url = self.endpoint(
            "/character-window/get-characters",
            &[("accountName", self.account_name()?)],
        )?;
        self.get(&url)
    }

    fn inventory_document(&mut self, character: &str) -> Result<Bytes, TransportError> {
        let url = self.endpoint(
            "/character-window/get-items",
            &[("character", character), ("accountName", self.account_name()?)],
        )?;
        self.get(&url)
    }

    fn image(&mut self, url: &str) -> Result<Bytes, TransportError> {
        // Icons are usually absolute CDN urls, older documents use site-relative paths.
        let url = self.endpoint(url, &[])?;
        self.get(&url)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Url;

    use crate::error::TransportError;

    use super::{endpoint, HttpConfig, HttpTransport};

    #[test]
    fn test_endpoint_encodes_query() {
        let base = Url::parse("https://www.pathofexile.com").unwrap();
        let url = endpoint(
            &base,
            "/character-window/get-stash-items",
            &[("league", "Hardcore Settlers"), ("tabIndex", "3")],
        )
        .unwrap();

        assert_eq!(
            url,
            "https://www.pathofexile.com/character-window/get-stash-items?league=Hardcore+Settlers&tabIndex=3"
        );
    }

    #[test]
    fn test_endpoint_keeps_absolute_urls() {
        let base = Url::parse("https://www.pathofexile.com").unwrap();
        let url = endpoint(&base, "https://web.poecdn.com/image/Art/chaos.png", &[]).unwrap();

        assert_eq!(url, "https://web.poecdn.com/image/Art/chaos.png");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpTransport::new(HttpConfig {
            base_url: "not a url".into(),
            ..HttpConfig::default()
        });

        assert!(matches!(result, Err(TransportError::InvalidUrl(_))));
    }

    #[test]
    fn test_requests_need_a_session() {
        let mut transport = HttpTransport::new(HttpConfig::default()).unwrap();

        assert!(matches!(
            super::Transport::characters_document(&mut transport),
            Err(TransportError::NoSession)
        ));
    }
}
