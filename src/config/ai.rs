use anyhow::Result;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_COMPLETION_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_COMPLETION_MODEL: &str = "llama-3.3-70b-versatile";

/// Relative to the static root.
pub const FALLBACK_IMAGE_ASSET: &str = "images/fallback/general.jpg";

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn secs_var(name: &str, default: u64) -> Duration {
    let secs = env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default);
    Duration::from_secs(secs)
}

/// Chat-completion endpoint settings
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl CompletionConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_key: optional_var("GROQ_API_KEY"),
            base_url: env::var("GROQ_API_BASE")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_BASE_URL.to_string()),
            model: env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_COMPLETION_MODEL.to_string()),
            timeout: secs_var("COMPLETION_TIMEOUT_SECS", 30),
        })
    }

    /// Configuration pointing at an arbitrary OpenAI-compatible endpoint
    pub fn with_base_url(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            model: DEFAULT_COMPLETION_MODEL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Image provider credentials, endpoints and timeouts.
///
/// Passed to the image resolver when it is built; nothing here is read from
/// global state afterwards.
#[derive(Debug, Clone)]
pub struct ImageConfig {
    pub stability_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub pexels_api_key: Option<String>,
    pub unsplash_access_key: Option<String>,

    pub stability_base_url: String,
    pub openai_base_url: String,
    pub pexels_base_url: String,
    pub unsplash_base_url: String,

    pub stability_timeout: Duration,
    pub dalle_timeout: Duration,
    pub pexels_timeout: Duration,
    pub unsplash_timeout: Duration,
    pub download_timeout: Duration,

    pub static_root: PathBuf,
    pub fallback_asset: String,
}

impl ImageConfig {
    /// No credentials, public endpoints and default timeouts
    pub fn new(static_root: impl Into<PathBuf>) -> Self {
        Self {
            stability_api_key: None,
            openai_api_key: None,
            pexels_api_key: None,
            unsplash_access_key: None,
            stability_base_url: "https://api.stability.ai".to_string(),
            openai_base_url: "https://api.openai.com".to_string(),
            pexels_base_url: "https://api.pexels.com".to_string(),
            unsplash_base_url: "https://api.unsplash.com".to_string(),
            stability_timeout: Duration::from_secs(20),
            dalle_timeout: Duration::from_secs(10),
            pexels_timeout: Duration::from_secs(10),
            unsplash_timeout: Duration::from_secs(5),
            download_timeout: Duration::from_secs(10),
            static_root: static_root.into(),
            fallback_asset: FALLBACK_IMAGE_ASSET.to_string(),
        }
    }

    pub fn from_env(static_root: impl Into<PathBuf>) -> Result<Self> {
        let mut config = Self::new(static_root);

        config.stability_api_key = optional_var("STABILITY_API_KEY");
        config.openai_api_key = optional_var("OPENAI_API_KEY");
        config.pexels_api_key = optional_var("PEXELS_API_KEY");
        config.unsplash_access_key = optional_var("UNSPLASH_ACCESS_KEY");

        if let Some(url) = optional_var("STABILITY_API_BASE") {
            config.stability_base_url = url;
        }
        if let Some(url) = optional_var("OPENAI_API_BASE") {
            config.openai_base_url = url;
        }
        if let Some(url) = optional_var("PEXELS_API_BASE") {
            config.pexels_base_url = url;
        }
        if let Some(url) = optional_var("UNSPLASH_API_BASE") {
            config.unsplash_base_url = url;
        }

        config.download_timeout = secs_var("IMAGE_DOWNLOAD_TIMEOUT_SECS", 10);

        Ok(config)
    }

    /// Public reference of the fallback asset, e.g. `/static/images/fallback/general.jpg`
    pub fn fallback_reference(&self) -> String {
        format!("/static/{}", self.fallback_asset.trim_start_matches('/'))
    }

    pub fn generated_dir(&self) -> PathBuf {
        self.static_root.join("generated")
    }
}
