//! Exchange configuration

use std::env;

const DEFAULT_TIMEOUT_MS: u64 = 30000;

/// 거래소 설정
///
/// Credentials and transport settings supplied by the caller. Anything the
/// exchange itself declares (endpoints, version, hash algorithm) lives in the
/// exchange description instead.
#[derive(Debug, Clone)]
pub struct ExchangeConfig {
    api_key: Option<String>,
    api_secret: Option<String>,
    timeout_ms: u64,
    api_url: Option<String>,
    user_agent: Option<String>,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ExchangeConfig {
    /// 새로운 빈 설정 생성
    pub fn new() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            api_url: None,
            user_agent: None,
        }
    }

    /// Build a configuration from `<PREFIX>_API_KEY`, `<PREFIX>_SECRET`,
    /// `<PREFIX>_API_URL` and `<PREFIX>_TIMEOUT_MS`.
    ///
    /// Unset or empty variables leave the default in place; an unparsable
    /// timeout is ignored.
    pub fn from_env(prefix: &str) -> Self {
        let var = |name: &str| {
            env::var(format!("{prefix}_{name}"))
                .ok()
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::new();
        config.api_key = var("API_KEY");
        config.api_secret = var("SECRET");
        config.api_url = var("API_URL");
        if let Some(timeout_ms) = var("TIMEOUT_MS").and_then(|t| t.parse().ok()) {
            config.timeout_ms = timeout_ms;
        }
        config
    }

    /// API 키 설정
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// API 시크릿 설정
    pub fn with_api_secret(mut self, secret: impl Into<String>) -> Self {
        self.api_secret = Some(secret.into());
        self
    }

    /// 인증 정보로 설정
    pub fn with_credentials(
        mut self,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        self.api_key = Some(api_key.into());
        self.api_secret = Some(api_secret.into());
        self
    }

    /// 타임아웃 설정 (밀리초)
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Override the API root (scheme + host), e.g. for a mock server
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    // === Getters ===

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// secret 별칭 (CCXT 호환)
    pub fn secret(&self) -> Option<&str> {
        self.api_secret.as_deref()
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn api_url(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }

    /// 인증 정보 유효성 확인
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some() && self.api_secret.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ExchangeConfig::new()
            .with_api_key("test_key")
            .with_api_secret("test_secret")
            .with_api_url("http://127.0.0.1:8080")
            .with_timeout(5000);

        assert_eq!(config.api_key(), Some("test_key"));
        assert_eq!(config.secret(), Some("test_secret"));
        assert_eq!(config.api_url(), Some("http://127.0.0.1:8080"));
        assert_eq!(config.timeout_ms(), 5000);
        assert!(config.has_credentials());
    }

    #[test]
    fn test_config_default() {
        let config = ExchangeConfig::default();
        assert!(config.api_key().is_none());
        assert!(!config.has_credentials());
        assert_eq!(config.timeout_ms(), DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_key_without_secret_is_not_credentials() {
        let config = ExchangeConfig::new().with_api_key("only_key");
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_from_env() {
        env::set_var("CZTEST_API_KEY", "env_key");
        env::set_var("CZTEST_SECRET", "env_secret");
        env::set_var("CZTEST_TIMEOUT_MS", "1500");
        env::set_var("CZTEST_API_URL", "");

        let config = ExchangeConfig::from_env("CZTEST");
        assert_eq!(config.api_key(), Some("env_key"));
        assert_eq!(config.secret(), Some("env_secret"));
        assert_eq!(config.timeout_ms(), 1500);
        assert!(config.api_url().is_none());
    }
}
