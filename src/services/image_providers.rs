use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::multipart::Form;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ImageConfig;

/// What a provider hands back for a query
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderImage {
    /// Remote image that still has to be downloaded and stored locally
    RemoteUrl(String),
    /// Image bytes produced directly by the provider
    Bytes(Bytes),
    /// Path relative to the static root; used as-is
    LocalAsset(String),
}

impl ProviderImage {
    /// Classify a location returned by a URL-style provider
    pub fn from_location(location: impl Into<String>) -> Self {
        let location = location.into();
        if location.starts_with("http") {
            ProviderImage::RemoteUrl(location)
        } else {
            ProviderImage::LocalAsset(location)
        }
    }
}

/// An external image-acquisition integration.
///
/// `request` returns `Ok(None)` when the provider has nothing to offer (no
/// credentials, empty search result). Errors are never propagated past the
/// resolver; they only move it on to the next provider.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Upper bound the resolver allows for one `request` call
    fn timeout(&self) -> Duration;

    async fn request(&self, query: &str) -> Result<Option<ProviderImage>>;
}

/// The four built-in providers, in their nominal order
pub fn default_providers(config: &ImageConfig, client: Client) -> Vec<Arc<dyn ImageProvider>> {
    vec![
        Arc::new(StabilityProvider {
            client: client.clone(),
            api_key: config.stability_api_key.clone(),
            base_url: config.stability_base_url.clone(),
            timeout: config.stability_timeout,
        }),
        Arc::new(DalleProvider {
            client: client.clone(),
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.clone(),
            timeout: config.dalle_timeout,
        }),
        Arc::new(PexelsProvider {
            client: client.clone(),
            api_key: config.pexels_api_key.clone(),
            base_url: config.pexels_base_url.clone(),
            timeout: config.pexels_timeout,
        }),
        Arc::new(UnsplashProvider {
            client,
            access_key: config.unsplash_access_key.clone(),
            base_url: config.unsplash_base_url.clone(),
            timeout: config.unsplash_timeout,
        }),
    ]
}

fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

// ============================================================================
// Stability AI: binary image generation
// ============================================================================

pub struct StabilityProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

#[async_trait]
impl ImageProvider for StabilityProvider {
    fn name(&self) -> &'static str {
        "stability"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn request(&self, query: &str) -> Result<Option<ProviderImage>> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(None);
        };

        let form = Form::new()
            .text("prompt", query.to_string())
            .text("output_format", "png")
            .text("model", "sd3")
            .text("aspect_ratio", "16:9");

        let bytes = self
            .client
            .post(join_url(&self.base_url, "/v2beta/stable-image/generate/core"))
            .bearer_auth(api_key)
            .header(ACCEPT, "image/*")
            .multipart(form)
            .send()
            .await
            .context("Stability request failed")?
            .error_for_status()
            .context("Stability returned an error status")?
            .bytes()
            .await
            .context("Failed to read Stability image body")?;

        Ok((!bytes.is_empty()).then_some(ProviderImage::Bytes(bytes)))
    }
}

// ============================================================================
// OpenAI DALL-E: JSON with a generated image URL
// ============================================================================

#[derive(Debug, Deserialize)]
struct DalleResponse {
    data: Vec<DalleImage>,
}

#[derive(Debug, Deserialize)]
struct DalleImage {
    url: Option<String>,
}

pub struct DalleProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

#[async_trait]
impl ImageProvider for DalleProvider {
    fn name(&self) -> &'static str {
        "dalle"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn request(&self, query: &str) -> Result<Option<ProviderImage>> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(None);
        };

        let response: DalleResponse = self
            .client
            .post(join_url(&self.base_url, "/v1/images/generations"))
            .bearer_auth(api_key)
            .json(&json!({
                "prompt": query,
                "n": 1,
                "size": "1024x1024",
                "model": "dall-e-3",
                "quality": "standard"
            }))
            .send()
            .await
            .context("DALL-E request failed")?
            .error_for_status()
            .context("DALL-E returned an error status")?
            .json()
            .await
            .context("Failed to parse DALL-E response")?;

        Ok(response
            .data
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .map(ProviderImage::from_location))
    }
}

// ============================================================================
// Pexels: stock photo search
// ============================================================================

#[derive(Debug, Deserialize)]
struct PexelsSearch {
    photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    src: PexelsSources,
}

#[derive(Debug, Deserialize)]
struct PexelsSources {
    large: String,
}

pub struct PexelsProvider {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

#[async_trait]
impl ImageProvider for PexelsProvider {
    fn name(&self) -> &'static str {
        "pexels"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn request(&self, query: &str) -> Result<Option<ProviderImage>> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Ok(None);
        };

        let search: PexelsSearch = self
            .client
            .get(join_url(&self.base_url, "/v1/search"))
            .header(AUTHORIZATION, api_key)
            .query(&[("query", query), ("per_page", "1")])
            .send()
            .await
            .context("Pexels request failed")?
            .error_for_status()
            .context("Pexels returned an error status")?
            .json()
            .await
            .context("Failed to parse Pexels response")?;

        Ok(search
            .photos
            .into_iter()
            .next()
            .map(|photo| ProviderImage::from_location(photo.src.large)))
    }
}

// ============================================================================
// Unsplash: random photo for a query
// ============================================================================

#[derive(Debug, Deserialize)]
struct UnsplashPhoto {
    urls: UnsplashUrls,
}

#[derive(Debug, Deserialize)]
struct UnsplashUrls {
    regular: String,
}

pub struct UnsplashProvider {
    client: Client,
    access_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

#[async_trait]
impl ImageProvider for UnsplashProvider {
    fn name(&self) -> &'static str {
        "unsplash"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn request(&self, query: &str) -> Result<Option<ProviderImage>> {
        let Some(access_key) = self.access_key.as_deref() else {
            return Ok(None);
        };

        let photo: UnsplashPhoto = self
            .client
            .get(join_url(&self.base_url, "/photos/random"))
            .query(&[
                ("query", query),
                ("client_id", access_key),
                ("orientation", "landscape"),
            ])
            .send()
            .await
            .context("Unsplash request failed")?
            .error_for_status()
            .context("Unsplash returned an error status")?
            .json()
            .await
            .context("Failed to parse Unsplash response")?;

        Ok(Some(ProviderImage::from_location(photo.urls.regular)))
    }
}
