use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Clone)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub n: u32,
    pub size: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImageGenerationResponse {
    pub data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GeneratedImage {
    pub url: String,
}
