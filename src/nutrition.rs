use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// Aggregate nutrition over a recipe's ingredient set. Field names follow the
/// JSON the frontend already consumes.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NutritionTotals {
    pub total_calories: f32,
    pub carbs: f32,
    pub fat: f32,
    pub protein: f32,
    pub fiber: f32,
}

/// Sums the nutrition profiles of the named ingredients over the catalog.
///
/// Names absent from the catalog contribute zero rather than erroring; the
/// upstream data never guaranteed a profile for every selectable ingredient,
/// and callers rely on the tolerant behavior.
///
/// # Arguments
/// * `catalog`: The loaded ingredient catalog.
/// * `ingredients`: Ingredient names selected for one recipe.
///
/// # Returns
/// The summed totals, all-zero for an empty input.
pub fn calculate_nutrition(catalog: &Catalog, ingredients: &[String]) -> NutritionTotals {
    let mut totals = NutritionTotals::default();

    for name in ingredients {
        if let Some(entry) = catalog.get(name) {
            totals.total_calories += entry.calories;
            totals.carbs += entry.carbs;
            totals.fat += entry.fat;
            totals.protein += entry.protein;
            totals.fiber += entry.fiber;
        }
    }

    totals
}
