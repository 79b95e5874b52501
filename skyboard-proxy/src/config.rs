//! Relay configuration.
//!
//! Read from the environment after loading an optional `.env` file:
//! - `NEWS_API_KEY` (required): credential appended to upstream requests
//! - `SKYBOARD_PROXY_ADDR`: bind address, default `127.0.0.1:3001`
//! - `SKYBOARD_STATIC_DIR`: directory served at `/`, default `static`
//! - `NEWS_API_BASE_URL`: upstream host, default `https://newsapi.org`

use anyhow::{Context, Result, anyhow};
use std::{net::SocketAddr, path::PathBuf};

pub const DEFAULT_ADDR: &str = "127.0.0.1:3001";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_NEWS_BASE_URL: &str = "https://newsapi.org";

#[derive(Clone)]
pub struct ProxyConfig {
    pub bind_addr: SocketAddr,
    pub news_api_key: String,
    pub news_base_url: String,
    pub static_dir: PathBuf,
}

impl std::fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("bind_addr", &self.bind_addr)
            .field("news_api_key", &"<redacted>")
            .field("news_base_url", &self.news_base_url)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let news_api_key = lookup("NEWS_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| anyhow!("NEWS_API_KEY is not set. Add it to the environment or a .env file."))?;

        let addr = lookup("SKYBOARD_PROXY_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let bind_addr = addr
            .parse()
            .with_context(|| format!("Invalid SKYBOARD_PROXY_ADDR '{addr}'"))?;

        let news_base_url = lookup("NEWS_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_NEWS_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let static_dir = lookup("SKYBOARD_STATIC_DIR")
            .unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string())
            .into();

        Ok(Self {
            bind_addr,
            news_api_key,
            news_base_url,
            static_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let cfg = ProxyConfig::from_lookup(lookup(&[("NEWS_API_KEY", "secret")])).unwrap();

        assert_eq!(cfg.bind_addr, DEFAULT_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.news_base_url, DEFAULT_NEWS_BASE_URL);
        assert_eq!(cfg.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = ProxyConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("NEWS_API_KEY"));

        let err = ProxyConfig::from_lookup(lookup(&[("NEWS_API_KEY", "  ")])).unwrap_err();
        assert!(err.to_string().contains("NEWS_API_KEY"));
    }

    #[test]
    fn bad_address_is_reported() {
        let err = ProxyConfig::from_lookup(lookup(&[
            ("NEWS_API_KEY", "secret"),
            ("SKYBOARD_PROXY_ADDR", "not-an-addr"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("not-an-addr"));
    }

    #[test]
    fn debug_output_hides_key() {
        let cfg = ProxyConfig::from_lookup(lookup(&[("NEWS_API_KEY", "secret")])).unwrap();
        let shown = format!("{cfg:?}");
        assert!(!shown.contains("secret"));
        assert!(shown.contains("<redacted>"));
    }
}
