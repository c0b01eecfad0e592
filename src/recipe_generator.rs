use std::error::Error;
use std::fmt;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::Catalog;
use crate::image_api::ImageGenerator;
use crate::nutrition::{calculate_nutrition, NutritionTotals};
use crate::variation::{generate_variations, Variation};

const MIN_INGREDIENTS: usize = 3;
const MAX_INGREDIENTS: usize = 7;

/// One synthesized recipe. Response-only value; nothing is persisted.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Recipe {
    pub name: String,
    pub ingredients: Vec<String>,
    pub nutrition: NutritionTotals,
    pub variations: Vec<Variation>,
    pub image_url: Option<String>,
}

#[derive(Debug)]
pub enum GenerateError {
    /// The catalog holds fewer ingredients than one recipe needs. Samples are
    /// exact; a short catalog is an error, not a smaller recipe.
    InsufficientCatalog { wanted: usize, available: usize },
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::InsufficientCatalog { wanted, available } => write!(
                f,
                "Catalog has {} ingredients but {} were requested",
                available, wanted
            ),
        }
    }
}

impl Error for GenerateError {}

/// Orchestrates the synthesis pipeline: ingredient sampling, nutrition
/// aggregation, variation generation, and best-effort illustration.
pub struct RecipeGenerator {
    catalog: Arc<Catalog>,
    images: Arc<dyn ImageGenerator>,
}

impl RecipeGenerator {
    pub fn new(catalog: Arc<Catalog>, images: Arc<dyn ImageGenerator>) -> Self {
        Self { catalog, images }
    }

    /// Generate `count` recipes, named "Recipe 1".."Recipe {count}" in order.
    ///
    /// Each recipe samples 3-7 distinct ingredients from the catalog without
    /// replacement. An illustration failure downgrades to `image_url: None`;
    /// a catalog smaller than the drawn sample size aborts the whole batch.
    pub async fn generate<R: Rng + Send>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Recipe>, GenerateError> {
        let mut recipes = Vec::with_capacity(count);

        for i in 0..count {
            let ingredient_count = rng.gen_range(MIN_INGREDIENTS..=MAX_INGREDIENTS);
            if ingredient_count > self.catalog.len() {
                return Err(GenerateError::InsufficientCatalog {
                    wanted: ingredient_count,
                    available: self.catalog.len(),
                });
            }

            let selected_ingredients: Vec<String> = self
                .catalog
                .ingredients()
                .choose_multiple(rng, ingredient_count)
                .map(|ingredient| ingredient.name.clone())
                .collect();

            let nutrition = calculate_nutrition(&self.catalog, &selected_ingredients);
            let variations = generate_variations(rng, &selected_ingredients);
            let recipe_name = format!("Recipe {}", i + 1);

            let image_url = match self
                .images
                .generate_image(&recipe_name, &selected_ingredients)
                .await
            {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!(recipe = %recipe_name, error = %e, "image generation failed");
                    None
                }
            };

            recipes.push(Recipe {
                name: recipe_name,
                ingredients: selected_ingredients,
                nutrition,
                variations,
                image_url,
            });
        }

        Ok(recipes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Ingredient;
    use crate::image_api::MockImageGenerator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entry(name: &str, calories: f32) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            calories,
            carbs: 1.0,
            fat: 1.0,
            protein: 1.0,
            fiber: 1.0,
        }
    }

    fn test_catalog() -> Arc<Catalog> {
        let entries = [
            "chicken", "beef", "pork", "tofu", "spinach", "rice", "broccoli", "potato",
        ]
        .iter()
        .map(|name| entry(name, 100.0))
        .collect();
        Arc::new(Catalog::from_entries(entries).unwrap())
    }

    fn generator_with(images: MockImageGenerator) -> RecipeGenerator {
        RecipeGenerator::new(test_catalog(), Arc::new(images))
    }

    #[tokio::test]
    async fn test_generates_requested_count_in_order() {
        let generator = generator_with(MockImageGenerator::with_url("https://img.example/r.png"));
        let mut rng = StdRng::seed_from_u64(1);

        let recipes = generator.generate(10, &mut rng).await.unwrap();

        assert_eq!(recipes.len(), 10);
        for (i, recipe) in recipes.iter().enumerate() {
            assert_eq!(recipe.name, format!("Recipe {}", i + 1));
        }
    }

    #[tokio::test]
    async fn test_zero_count_yields_empty_batch() {
        let generator = generator_with(MockImageGenerator::with_url("https://img.example/r.png"));
        let mut rng = StdRng::seed_from_u64(1);

        let recipes = generator.generate(0, &mut rng).await.unwrap();
        assert!(recipes.is_empty());
    }

    #[tokio::test]
    async fn test_ingredient_sets_are_catalog_subsets_of_valid_size() {
        let catalog = test_catalog();
        let generator = generator_with(MockImageGenerator::with_url("https://img.example/r.png"));

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            for recipe in generator.generate(5, &mut rng).await.unwrap() {
                assert!((3..=7).contains(&recipe.ingredients.len()), "seed {}", seed);

                let mut distinct = recipe.ingredients.clone();
                distinct.sort();
                distinct.dedup();
                assert_eq!(distinct.len(), recipe.ingredients.len(), "seed {}", seed);

                for name in &recipe.ingredients {
                    assert!(catalog.get(name).is_some(), "seed {}: '{}'", seed, name);
                }
            }
        }
    }

    #[tokio::test]
    async fn test_variations_stay_within_recipe_ingredients() {
        let generator = generator_with(MockImageGenerator::with_url("https://img.example/r.png"));

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            for recipe in generator.generate(3, &mut rng).await.unwrap() {
                assert!((1..=3).contains(&recipe.variations.len()), "seed {}", seed);
                for variation in &recipe.variations {
                    assert!(variation.ingredients.len() >= 2, "seed {}", seed);
                    assert!(
                        variation.ingredients.len() <= recipe.ingredients.len(),
                        "seed {}",
                        seed
                    );
                    for name in &variation.ingredients {
                        assert!(recipe.ingredients.contains(name), "seed {}", seed);
                    }
                }
            }
        }
    }

    #[tokio::test]
    async fn test_nutrition_matches_aggregator_output() {
        let generator = generator_with(MockImageGenerator::with_url("https://img.example/r.png"));
        let mut rng = StdRng::seed_from_u64(5);

        for recipe in generator.generate(3, &mut rng).await.unwrap() {
            // Every test-catalog entry carries 100 kcal, so the total is a
            // direct function of the sample size.
            let expected = 100.0 * recipe.ingredients.len() as f32;
            assert!((recipe.nutrition.total_calories - expected).abs() < 1e-4);
        }
    }

    #[tokio::test]
    async fn test_image_failure_never_aborts_synthesis() {
        let generator = generator_with(MockImageGenerator::with_error("collaborator down"));
        let mut rng = StdRng::seed_from_u64(2);

        let recipes = generator.generate(5, &mut rng).await.unwrap();

        assert_eq!(recipes.len(), 5);
        for recipe in &recipes {
            assert!(recipe.image_url.is_none());
        }
    }

    #[tokio::test]
    async fn test_successful_images_are_attached() {
        let generator = generator_with(MockImageGenerator::with_url("https://img.example/r.png"));
        let mut rng = StdRng::seed_from_u64(3);

        let recipes = generator.generate(2, &mut rng).await.unwrap();
        for recipe in recipes {
            assert_eq!(recipe.image_url.as_deref(), Some("https://img.example/r.png"));
        }
    }

    #[tokio::test]
    async fn test_small_catalog_is_an_error_not_a_truncated_sample() {
        let small = Arc::new(
            Catalog::from_entries(vec![entry("chicken", 335.0), entry("spinach", 23.0)]).unwrap(),
        );
        let generator = RecipeGenerator::new(
            small,
            Arc::new(MockImageGenerator::with_url("https://img.example/r.png")),
        );
        let mut rng = StdRng::seed_from_u64(4);

        let result = generator.generate(1, &mut rng).await;
        assert!(matches!(
            result,
            Err(GenerateError::InsufficientCatalog {
                available: 2,
                ..
            })
        ));
    }
}
