pub mod client;
pub mod types;

// Re-export key structs/functions for easier access from outside the module
pub use client::{
    ImageApiError, ImageGenerator, MockImageGenerator, MockImageResponse, OpenAiImageClient,
    DEFAULT_IMAGE_API_URL,
};
pub use types::{GeneratedImage, ImageGenerationRequest, ImageGenerationResponse};
