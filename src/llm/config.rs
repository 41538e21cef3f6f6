//! Backend configuration from the environment

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration for the Gemini backend
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    /// Gateway base URL replacing the public Gemini endpoint
    pub gateway: Option<String>,
    pub model: Option<String>,
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable source; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            api_key: get("GEMINI_API_KEY").or_else(|| get("API_KEY")),
            gateway: get("LLM_GATEWAY"),
            model: get("GEMINI_MODEL"),
        }
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// A session can be created with either a key or a gateway
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() || self.gateway.is_some()
    }
}
