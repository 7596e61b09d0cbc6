//! Client configuration.
//!
//! The base address is injected, never compiled in. `ClientConfig` can be
//! built in code or loaded from `NETLIB_`-prefixed environment variables
//! (`NETLIB_BASE_URL`, `NETLIB_TIMEOUT_SECS`).

use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::ApiError;

const ENV_PREFIX: &str = "NETLIB_";

/// A validated base address.
///
/// Always an absolute `http`/`https` URL with a host, no query or fragment,
/// and a trailing `/`, so endpoint paths can be appended verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    pub fn parse(raw: &str) -> Result<Self, ApiError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ApiError::InvalidBaseUrl("empty".to_string()));
        }
        let url = Url::parse(raw).map_err(|e| ApiError::InvalidBaseUrl(format!("{raw}: {e}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl(format!(
                "{raw}: unsupported scheme {}",
                url.scheme()
            )));
        }
        if !url.has_host() {
            return Err(ApiError::InvalidBaseUrl(format!("{raw}: missing host")));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ApiError::InvalidBaseUrl(format!(
                "{raw}: query and fragment are not allowed"
            )));
        }

        let mut base = raw.to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        // Only accept text the parser left untouched (apart from the root `/`
        // it adds to a bare authority), so `base + path` stays well formed.
        if url.as_str() != raw && url.as_str() != base {
            return Err(ApiError::InvalidBaseUrl(format!(
                "{raw}: not in canonical form (expected {url})"
            )));
        }
        Ok(Self(base))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `base + path`, with no separator handling beyond the trailing `/`.
    pub fn join(&self, path: &str) -> String {
        format!("{}{path}", self.0)
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Configuration for an API client.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Backend address all endpoint paths are appended to.
    pub base_url: String,

    /// Request timeout. Unset means the transport's default (none for reqwest).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = Some(timeout.as_secs());
        self
    }

    /// Load configuration from `NETLIB_*` environment variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed(ENV_PREFIX).from_env()
    }

    /// Load configuration from an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX).from_iter(vars)
    }

    pub fn base(&self) -> Result<BaseUrl, ApiError> {
        BaseUrl::parse(&self.base_url)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn trailing_slash_is_added() {
        let base = BaseUrl::parse("http://192.168.0.2:8080").unwrap();
        assert_eq!(base.as_str(), "http://192.168.0.2:8080/");
        assert_eq!(base.join("login"), "http://192.168.0.2:8080/login");
    }

    #[test]
    fn trailing_slash_is_kept() {
        let base = BaseUrl::parse("http://host/api/").unwrap();
        assert_eq!(base.as_str(), "http://host/api/");
    }

    #[test]
    fn empty_base_is_rejected() {
        assert!(matches!(BaseUrl::parse("  "), Err(ApiError::InvalidBaseUrl(_))));
    }

    #[test]
    fn relative_base_is_rejected() {
        assert!(matches!(BaseUrl::parse("api/"), Err(ApiError::InvalidBaseUrl(_))));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        assert!(matches!(
            BaseUrl::parse("ftp://host/"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn query_is_rejected() {
        assert!(matches!(
            BaseUrl::parse("http://host/?x=1"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn unescaped_space_is_rejected() {
        assert!(matches!(
            BaseUrl::parse("http://host/a b"),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn text_the_parser_would_rewrite_is_rejected() {
        for raw in ["HTTP://host/", "http://Host/api/", "http://host:80/", "http://host/a/../b/"] {
            assert!(
                matches!(BaseUrl::parse(raw), Err(ApiError::InvalidBaseUrl(_))),
                "{raw}"
            );
        }
    }

    #[test]
    fn canonical_text_is_kept_verbatim() {
        for raw in ["http://host/api", "https://example.com:8443/v1/", "http://10.0.0.1:8080"] {
            let base = BaseUrl::parse(raw).unwrap();
            assert!(base.as_str().starts_with(raw), "{raw}");
            assert!(base.as_str().ends_with('/'), "{raw}");
        }
    }

    #[test]
    fn config_from_vars_applies_defaults() {
        let config = ClientConfig::from_vars(vars(&[("NETLIB_BASE_URL", "http://host/api")])).unwrap();
        assert_eq!(config.base_url, "http://host/api");
        assert_eq!(config.timeout_secs, None);
        assert_eq!(config.base().unwrap().as_str(), "http://host/api/");
    }

    #[test]
    fn config_from_vars_reads_timeout() {
        let config = ClientConfig::from_vars(vars(&[
            ("NETLIB_BASE_URL", "https://example.com/"),
            ("NETLIB_TIMEOUT_SECS", "15"),
            ("UNRELATED", "ignored"),
        ]))
        .unwrap();
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn timeout_can_be_set_in_code() {
        let config = ClientConfig::new("http://host").with_timeout(Duration::from_secs(30));
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn config_without_base_url_fails() {
        assert!(ClientConfig::from_vars(vars(&[("NETLIB_TIMEOUT_SECS", "3")])).is_err());
    }
}
