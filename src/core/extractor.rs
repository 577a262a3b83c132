use crate::core::PlayerPage;
use anyhow::Result;
use async_trait::async_trait;
use url::Url;

/// A site-specific source of player pages.
#[async_trait]
pub trait Extractor: Send + Sync {
    fn name(&self) -> &'static str;
    fn suitable(&self, url: &Url) -> bool;
    async fn extract(&self, url: &Url) -> Result<PlayerPage>;
}

pub struct ExtractorEngine {
    pub extractors: Vec<Box<dyn Extractor>>,
}

impl ExtractorEngine {
    pub fn new() -> Self {
        Self { extractors: vec![] }
    }

    pub fn register_extractor(&mut self, extractor: Box<dyn Extractor>) {
        self.extractors.push(extractor);
    }

    pub async fn extract(&self, url: &str) -> Result<PlayerPage> {
        let parsed_url = Url::parse(url)?;

        for extractor in &self.extractors {
            if extractor.suitable(&parsed_url) {
                tracing::info!("Using {} extractor", extractor.name());
                return extractor.extract(&parsed_url).await;
            }
        }

        anyhow::bail!("No suitable extractor found for URL: {}", url);
    }
}

impl Default for ExtractorEngine {
    fn default() -> Self {
        Self::new()
    }
}
