use anyhow::{Context, Result};
use bytes::Bytes;
use chrono::Utc;
use rand::seq::SliceRandom;
use reqwest::Client;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::config::ImageConfig;
use crate::services::image_providers::{default_providers, ImageProvider, ProviderImage};

const SLUG_LENGTH: usize = 20;

/// Result of one provider attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    Success(ProviderImage),
    NoResult,
}

/// Resolves a text query to an image reference under `/static`.
///
/// Providers are tried in a fresh random order on every call, each once and
/// with its own timeout. The first provider whose image can be stored wins;
/// when none can, the configured fallback asset is returned. `resolve` never
/// fails.
#[derive(Clone)]
pub struct ImageResolver {
    providers: Vec<Arc<dyn ImageProvider>>,
    client: Client,
    config: ImageConfig,
}

impl std::fmt::Debug for ImageResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageResolver")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("static_root", &self.config.static_root)
            .finish()
    }
}

impl ImageResolver {
    /// Resolver over the four built-in providers
    pub fn from_config(config: ImageConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;
        let providers = default_providers(&config, client.clone());

        Ok(Self {
            providers,
            client,
            config,
        })
    }

    pub fn with_providers(config: ImageConfig, providers: Vec<Arc<dyn ImageProvider>>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            providers,
            client,
            config,
        })
    }

    pub fn fallback_reference(&self) -> String {
        self.config.fallback_reference()
    }

    /// Resolve `query` to a displayable image reference
    #[instrument(skip(self))]
    pub async fn resolve(&self, query: &str) -> String {
        match self.first_success(query).await {
            Some(reference) => reference,
            None => {
                warn!("No image provider produced a result, using fallback asset");
                self.fallback_reference()
            }
        }
    }

    /// Walk the shuffled providers and stop at the first stored image
    async fn first_success(&self, query: &str) -> Option<String> {
        for provider in self.shuffled_providers() {
            let ProviderOutcome::Success(image) = self.attempt(provider.as_ref(), query).await else {
                continue;
            };

            match self.store(image, query).await {
                Ok(reference) => {
                    info!(provider = provider.name(), %reference, "Resolved image");
                    return Some(reference);
                }
                Err(e) => warn!(provider = provider.name(), "Failed to store image: {:#}", e),
            }
        }

        None
    }

    fn shuffled_providers(&self) -> Vec<Arc<dyn ImageProvider>> {
        let mut order = self.providers.clone();
        order.shuffle(&mut rand::thread_rng());
        order
    }

    async fn attempt(&self, provider: &dyn ImageProvider, query: &str) -> ProviderOutcome {
        match tokio::time::timeout(provider.timeout(), provider.request(query)).await {
            Ok(Ok(Some(image))) => ProviderOutcome::Success(image),
            Ok(Ok(None)) => {
                debug!(provider = provider.name(), "Provider had no result");
                ProviderOutcome::NoResult
            }
            Ok(Err(e)) => {
                warn!(provider = provider.name(), "Provider failed: {:#}", e);
                ProviderOutcome::NoResult
            }
            Err(_) => {
                warn!(
                    provider = provider.name(),
                    timeout_ms = provider.timeout().as_millis() as u64,
                    "Provider timed out"
                );
                ProviderOutcome::NoResult
            }
        }
    }

    async fn store(&self, image: ProviderImage, query: &str) -> Result<String> {
        match image {
            ProviderImage::LocalAsset(path) => Ok(format!("/static/{}", path.trim_start_matches('/'))),
            ProviderImage::Bytes(bytes) => self.persist(bytes, query).await,
            ProviderImage::RemoteUrl(url) => {
                let bytes = self
                    .client
                    .get(&url)
                    .timeout(self.config.download_timeout)
                    .send()
                    .await
                    .with_context(|| format!("Failed to download {}", url))?
                    .error_for_status()
                    .with_context(|| format!("Download of {} returned an error status", url))?
                    .bytes()
                    .await
                    .context("Failed to read downloaded image")?;

                self.persist(bytes, query).await
            }
        }
    }

    async fn persist(&self, bytes: Bytes, query: &str) -> Result<String> {
        let directory = self.config.generated_dir();
        tokio::fs::create_dir_all(&directory)
            .await
            .with_context(|| format!("Failed to create {}", directory.display()))?;

        let filename = generated_filename(query);
        let path: PathBuf = directory.join(&filename);
        tokio::fs::write(&path, &bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(format!("/static/generated/{}", filename))
    }
}

/// Path-safe form of the first characters of a query
pub fn query_slug(query: &str) -> String {
    let slug: String = query
        .trim()
        .chars()
        .take(SLUG_LENGTH)
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();

    if slug.is_empty() {
        "image".to_string()
    } else {
        slug
    }
}

/// `<timestamp>_<slug>_<suffix>.png`, unique across concurrent requests
pub fn generated_filename(query: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{}_{}_{}.png",
        Utc::now().format("%Y%m%d%H%M%S%3f"),
        query_slug(query),
        &suffix[..8]
    )
}
