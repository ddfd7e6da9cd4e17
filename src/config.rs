use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://tcube.technossus.com/api/";

pub const APP_ID_VAR: &str = "ASK_APPID";
pub const AUTH_TOKEN_OVERRIDE_VAR: &str = "AUTH_TOKEN_OVERRIDE";
pub const API_URL_VAR: &str = "TCUBE_API_URL";

/// Settings read once at startup and handed to every component that needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillConfig {
    /// When set, events addressed to any other application are rejected.
    pub app_id: Option<String>,
    /// Bypasses the session access token. Only meant for local testing.
    pub auth_token_override: Option<String>,
    /// Always ends with `/`.
    pub api_base_url: String,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            auth_token_override: None,
            api_base_url: DEFAULT_API_URL.into(),
        }
    }
}

impl SkillConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            app_id: read(APP_ID_VAR),
            auth_token_override: read(AUTH_TOKEN_OVERRIDE_VAR),
            api_base_url: read(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.into()),
        }
        .normalized()
    }

    pub fn with_api_base_url(self, api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..self
        }
        .normalized()
    }

    fn normalized(mut self) -> Self {
        if !self.api_base_url.ends_with('/') {
            self.api_base_url.push('/');
        }
        self
    }

    pub fn api_url(&self, path: &str) -> String {
        let result = format!("{}{path}", self.api_base_url);
        debug!("Preparing to call '{result}'");
        result
    }
}
