use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::image_api::ImageGenerator;
use crate::recipe_generator::RecipeGenerator;

const DEFAULT_RECIPE_COUNT: usize = 10;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub images: Arc<dyn ImageGenerator>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Builds the application router. Kept separate from socket binding so tests
/// can drive it in process.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/generate_recipes", get(generate_recipes))
        .with_state(state)
}

async fn generate_recipes(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let num = match params.get("num") {
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) => n,
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("'num' must be a non-negative integer, got '{}'", raw),
                    }),
                )
                    .into_response()
            }
        },
        None => DEFAULT_RECIPE_COUNT,
    };

    let generator = RecipeGenerator::new(state.catalog.clone(), state.images.clone());
    // StdRng rather than thread_rng: the handler future must stay Send across
    // the illustration await.
    let mut rng = StdRng::from_entropy();

    match generator.generate(num, &mut rng).await {
        Ok(recipes) => (StatusCode::OK, Json(recipes)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "recipe generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
