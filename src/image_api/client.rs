use std::env;
use std::error::Error;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::types::{ImageGenerationRequest, ImageGenerationResponse};

pub const DEFAULT_IMAGE_API_URL: &str = "https://api.openai.com/v1/images/generations";

const IMAGE_SIZE: &str = "512x512";

// Illustration is best-effort; a hung collaborator must not stall synthesis.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug)]
pub enum ImageApiError {
    MissingApiKey(String),
    NetworkError(reqwest::Error),
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
    MalformedResponse(String),
}

impl fmt::Display for ImageApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageApiError::MissingApiKey(key_name) => {
                write!(f, "API key not found in environment: {}", key_name)
            }
            ImageApiError::NetworkError(err) => write!(f, "Network error: {}", err),
            ImageApiError::ApiError { status, error_body } => {
                write!(f, "Image API error {}: {}", status, error_body)
            }
            ImageApiError::MalformedResponse(detail) => {
                write!(f, "Malformed image API response: {}", detail)
            }
        }
    }
}

impl Error for ImageApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ImageApiError::NetworkError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ImageApiError {
    fn from(err: reqwest::Error) -> Self {
        ImageApiError::NetworkError(err)
    }
}

/// Trait for the image-generation collaborator, enabling mockability in tests.
/// Any error leaves the recipe without an illustration; callers decide that,
/// not this layer.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Request one illustration for a recipe, returning its URL.
    async fn generate_image(
        &self,
        recipe_name: &str,
        ingredients: &[String],
    ) -> Result<String, ImageApiError>;
}

fn build_prompt(recipe_name: &str, ingredients: &[String]) -> String {
    format!(
        "Create an image of {} with ingredients: {}.",
        recipe_name,
        ingredients.join(", ")
    )
}

/// Production client for the OpenAI image-generation endpoint. The API key is
/// resolved from the environment at call time; only the variable name is held
/// here so a missing key surfaces per request rather than at construction.
pub struct OpenAiImageClient {
    http: Client,
    api_key_env_var: String,
    endpoint: String,
}

impl OpenAiImageClient {
    pub fn new(api_key_env_var: &str) -> Result<Self, reqwest::Error> {
        Self::with_endpoint(api_key_env_var, DEFAULT_IMAGE_API_URL)
    }

    /// Point the client at a different endpoint URL. Used by tests.
    pub fn with_endpoint(api_key_env_var: &str, endpoint: &str) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_key_env_var: api_key_env_var.to_string(),
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageClient {
    async fn generate_image(
        &self,
        recipe_name: &str,
        ingredients: &[String],
    ) -> Result<String, ImageApiError> {
        let api_key = env::var(&self.api_key_env_var)
            .map_err(|_| ImageApiError::MissingApiKey(self.api_key_env_var.clone()))?;

        let request = ImageGenerationRequest {
            prompt: build_prompt(recipe_name, ingredients),
            n: 1,
            size: IMAGE_SIZE.to_string(),
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if response.status().is_success() {
            let body = response.json::<ImageGenerationResponse>().await?;
            match body.data.into_iter().next() {
                Some(image) => Ok(image.url),
                None => Err(ImageApiError::MalformedResponse(
                    "response contained no images".to_string(),
                )),
            }
        } else {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            Err(ImageApiError::ApiError { status, error_body })
        }
    }
}

/// Canned response for MockImageGenerator.
#[derive(Clone)]
pub enum MockImageResponse {
    Url(String),
    Error(String),
}

/// Mock image collaborator for testing.
pub struct MockImageGenerator {
    response: MockImageResponse,
}

impl MockImageGenerator {
    pub fn with_url(url: &str) -> Self {
        Self {
            response: MockImageResponse::Url(url.to_string()),
        }
    }

    pub fn with_error(error: &str) -> Self {
        Self {
            response: MockImageResponse::Error(error.to_string()),
        }
    }
}

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate_image(
        &self,
        _recipe_name: &str,
        _ingredients: &[String],
    ) -> Result<String, ImageApiError> {
        match &self.response {
            MockImageResponse::Url(url) => Ok(url.clone()),
            MockImageResponse::Error(e) => Err(ImageApiError::MalformedResponse(e.clone())),
        }
    }
}
