use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{BookRecord, BooksAndDog, GatewayError};

pub const DEFAULT_BOOKS_ENDPOINT: &str = "https://fakerapi.it/api/v2/books";
pub const DEFAULT_DOG_ENDPOINT: &str = "https://dog.ceo/api/breeds/image/random";

/// What the gateway does with transport, HTTP and decode failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log and return an empty result. Callers cannot tell "nothing came back"
    /// from "the request failed".
    #[default]
    Absorb,
    /// Return the failure so the caller can show an error indicator.
    Surface,
}

#[derive(Debug, Clone)]
pub struct GatewaySettings {
    pub books_endpoint: String,
    pub dog_endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    pub failure_policy: FailurePolicy,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            books_endpoint: DEFAULT_BOOKS_ENDPOINT.to_string(),
            dog_endpoint: DEFAULT_DOG_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 1024 * 1024,
            failure_policy: FailurePolicy::Absorb,
        }
    }
}

/// Boundary between the two public endpoints and in-process values.
///
/// `Err` means the failure reached the caller. With [`FailurePolicy::Absorb`]
/// the reqwest implementation never returns one for ordinary network trouble.
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    async fn fetch_books(&self, quantity: u32) -> Result<Vec<BookRecord>, GatewayError>;

    async fn fetch_dog_image(&self) -> Result<Option<String>, GatewayError>;

    /// Whether the image behind `url` can actually be retrieved.
    async fn probe_image(&self, url: &str) -> bool;

    fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::Absorb
    }

    /// Books first, then the dog; the dog request does not start until the
    /// books request is done. A failure in either step empties both halves
    /// unless the policy surfaces it.
    async fn fetch_books_and_dog(&self, quantity: u32) -> Result<BooksAndDog, GatewayError> {
        let outcome = async {
            let books = self.fetch_books(quantity).await?;
            let dog_image = self.fetch_dog_image().await?;
            Ok::<_, GatewayError>(BooksAndDog { books, dog_image })
        }
        .await;

        match outcome {
            Ok(both) => Ok(both),
            Err(err) => match self.failure_policy() {
                FailurePolicy::Absorb => {
                    engine_warn!("Failed to fetch books and dog: {}", err);
                    Ok(BooksAndDog::default())
                }
                FailurePolicy::Surface => Err(err),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct BooksEnvelope {
    #[serde(default)]
    data: Option<Vec<BookRecord>>,
}

#[derive(Debug, Deserialize)]
struct DogEnvelope {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    settings: GatewaySettings,
    client: reqwest::Client,
}

impl ReqwestGateway {
    pub fn new(settings: GatewaySettings) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| GatewayError::Network(err.to_string()))?;
        Ok(Self { settings, client })
    }

    /// Fetches books without applying the failure policy.
    pub async fn try_fetch_books(&self, quantity: u32) -> Result<Vec<BookRecord>, GatewayError> {
        let mut url = reqwest::Url::parse(&self.settings.books_endpoint)
            .map_err(|err| GatewayError::InvalidUrl(err.to_string()))?;
        url.query_pairs_mut()
            .append_pair("_quantity", &quantity.to_string());

        let envelope: BooksEnvelope = self.get_json(url).await?;
        let mut books = envelope.data.unwrap_or_default();
        let wanted = quantity as usize;
        books.truncate(wanted);
        // Either exactly `quantity` books or none at all.
        if !books.is_empty() && books.len() != wanted {
            return Err(GatewayError::Decode(format!(
                "expected {wanted} books, got {}",
                books.len()
            )));
        }
        Ok(books)
    }

    /// Fetches one dog image URL without applying the failure policy.
    pub async fn try_fetch_dog_image(&self) -> Result<Option<String>, GatewayError> {
        let url = reqwest::Url::parse(&self.settings.dog_endpoint)
            .map_err(|err| GatewayError::InvalidUrl(err.to_string()))?;

        let envelope: DogEnvelope = self.get_json(url).await?;
        if envelope.status.as_deref() == Some("error") {
            return Err(GatewayError::Decode(format!(
                "dog endpoint reported an error: {}",
                envelope.message.unwrap_or_default()
            )));
        }
        Ok(envelope
            .message
            .filter(|message| !message.trim().is_empty()))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: reqwest::Url) -> Result<T, GatewayError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::HttpStatus(status.as_u16()));
        }

        let body = self.read_body(response).await?;
        serde_json::from_slice(&body).map_err(|err| GatewayError::Decode(err.to_string()))
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, GatewayError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(GatewayError::TooLarge {
                    max_bytes,
                    actual: Some(content_len),
                });
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(GatewayError::TooLarge {
                    max_bytes,
                    actual: Some(next_len),
                });
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }

    fn absorb<T: Default>(&self, what: &str, err: GatewayError) -> Result<T, GatewayError> {
        match self.settings.failure_policy {
            FailurePolicy::Absorb => {
                engine_warn!("Failed to fetch {}: {}", what, err);
                Ok(T::default())
            }
            FailurePolicy::Surface => Err(err),
        }
    }
}

#[async_trait::async_trait]
impl Gateway for ReqwestGateway {
    async fn fetch_books(&self, quantity: u32) -> Result<Vec<BookRecord>, GatewayError> {
        match self.try_fetch_books(quantity).await {
            Ok(books) => Ok(books),
            Err(err) => self.absorb("books", err),
        }
    }

    async fn fetch_dog_image(&self) -> Result<Option<String>, GatewayError> {
        match self.try_fetch_dog_image().await {
            Ok(image) => Ok(image),
            Err(err) => self.absorb("dog image", err),
        }
    }

    async fn probe_image(&self, url: &str) -> bool {
        let parsed = match reqwest::Url::parse(url) {
            Ok(parsed) => parsed,
            Err(err) => {
                engine_debug!("Dog image url {} is not valid: {}", url, err);
                return false;
            }
        };
        match self.client.get(parsed).send().await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                engine_debug!("Dog image {} answered {}", url, response.status());
                false
            }
            Err(err) => {
                engine_debug!("Dog image {} did not resolve: {}", url, map_reqwest_error(err));
                false
            }
        }
    }

    fn failure_policy(&self) -> FailurePolicy {
        self.settings.failure_policy
    }
}

fn map_reqwest_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        return GatewayError::Timeout(err.to_string());
    }
    if err.is_decode() {
        return GatewayError::Decode(err.to_string());
    }
    GatewayError::Network(err.to_string())
}
