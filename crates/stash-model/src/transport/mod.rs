pub mod cached;
pub mod http;

use std::time::Duration;

use bytes::Bytes;
use stash_common::{league::League, secret::SecretString};

use crate::error::TransportError;

/// Wire access to the remote service. Every call blocks until the document is complete.
pub trait Transport {
    fn authenticate(
        &mut self,
        identity: &str,
        secret: &SecretString,
    ) -> Result<(), TransportError>;

    fn stash_document(
        &mut self,
        tab_index: usize,
        league: &League,
        force_refresh: bool,
    ) -> Result<Bytes, TransportError>;

    fn characters_document(&mut self) -> Result<Bytes, TransportError>;

    fn inventory_document(&mut self, character: &str) -> Result<Bytes, TransportError>;

    fn image(&mut self, url: &str) -> Result<Bytes, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn authenticate(
        &mut self,
        identity: &str,
        secret: &SecretString,
    ) -> Result<(), TransportError> {
        (**self).authenticate(identity, secret)
    }

    fn stash_document(
        &mut self,
        tab_index: usize,
        league: &League,
        force_refresh: bool,
    ) -> Result<Bytes, TransportError> {
        (**self).stash_document(tab_index, league, force_refresh)
    }

    fn characters_document(&mut self) -> Result<Bytes, TransportError> {
        (**self).characters_document()
    }

    fn inventory_document(&mut self, character: &str) -> Result<Bytes, TransportError> {
        (**self).inventory_document(character)
    }

    fn image(&mut self, url: &str) -> Result<Bytes, TransportError> {
        (**self).image(url)
    }
}

const DEFAULT_RATE_LIMIT_TIMER: u64 = 60;

/// Reads the penalty from an `x-rate-limit-ip` style header (`hits:period:penalty`).
pub fn parse_rate_limit_timer(input: Option<&str>) -> Duration {
    let seconds = input
        .and_then(|v| v.split(':').next_back())
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_RATE_LIMIT_TIMER);

    Duration::from_secs(seconds)
}

/// Maps a response status onto the transport error taxonomy.
pub fn check_status(status: u16, rate_limit_header: Option<&str>) -> Result<(), TransportError> {
    match status {
        200..=299 => Ok(()),
        401 | 403 => Err(TransportError::Unauthorized { status }),
        429 => Err(TransportError::RateLimited(parse_rate_limit_timer(
            rate_limit_header,
        ))),
        _ => Err(TransportError::Http { status }),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::error::TransportError;

    use super::{check_status, parse_rate_limit_timer};

    #[test]
    fn test_parse_rate_limit_timer() {
        assert_eq!(parse_rate_limit_timer(None), Duration::from_secs(60));
        assert_eq!(
            parse_rate_limit_timer(Some("something")),
            Duration::from_secs(60)
        );
        assert_eq!(
            parse_rate_limit_timer(Some("_:_:abc")),
            Duration::from_secs(60)
        );
        assert_eq!(
            parse_rate_limit_timer(Some("_:_:120")),
            Duration::from_secs(120)
        );
    }

    #[test]
    fn test_check_status() {
        assert!(check_status(200, None).is_ok());
        assert!(matches!(
            check_status(403, None),
            Err(TransportError::Unauthorized { status: 403 })
        ));
        assert!(matches!(
            check_status(429, Some("45:60:300")),
            Err(TransportError::RateLimited(d)) if d == Duration::from_secs(300)
        ));
        assert!(matches!(
            check_status(503, None),
            Err(TransportError::Http { status: 503 })
        ));
    }
}
