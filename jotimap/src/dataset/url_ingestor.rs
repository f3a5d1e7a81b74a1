use async_trait::async_trait;
use bytes::Bytes;

use crate::dataset::{DatasetDecoder, DatasetIngestor, Feature};
use crate::error::JotimapError;

/// Ingestor downloading the dataset over HTTP and decoding it with `D`.
///
/// There is no retry and no cache: every call to
/// [`fetch_features`](DatasetIngestor::fetch_features) makes one request.
#[derive(Debug, Clone)]
pub struct UrlDatasetIngestor<D> {
    http_client: reqwest::Client,
    decoder: D,
}

impl<D: DatasetDecoder> UrlDatasetIngestor<D> {
    /// Creates an ingestor with its own HTTP client.
    pub fn new(decoder: D) -> Result<Self, JotimapError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("jotimap/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            decoder,
        })
    }

    /// Decoder used for the downloaded documents.
    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    async fn load_from_web(&self, url: &str) -> Result<Bytes, JotimapError> {
        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::info!("Failed to load {url}: {status}");
            return Err(JotimapError::Http(status.as_u16()));
        }

        Ok(response.bytes().await?)
    }
}

#[async_trait]
impl<D: DatasetDecoder + Send + Sync> DatasetIngestor for UrlDatasetIngestor<D> {
    async fn fetch_features(&self, url: &str) -> Result<Vec<Feature>, JotimapError> {
        let bytes = self.load_from_web(url).await?;
        log::debug!("Loaded {} bytes from {url}", bytes.len());

        let features = self.decoder.decode(bytes)?;
        log::info!("Decoded {} features from {url}", features.len());

        Ok(features)
    }
}
