use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One entry of the ingredient catalog: a unique name plus its nutrition
/// profile. All nutrition values are per typical serving and non-negative.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Ingredient {
    pub name: String,
    pub calories: f32,
    pub carbs: f32,
    pub fat: f32,
    pub protein: f32,
    pub fiber: f32,
}

/// Static reference table of ingredients, loaded once at startup and never
/// mutated afterwards. Lookups go through an index by name.
#[derive(Debug, Clone)]
pub struct Catalog {
    ingredients: Vec<Ingredient>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Load the catalog from a JSON file containing an array of ingredient
    /// objects. Any structural problem fails the load; the process must not
    /// start serving with a partial catalog.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Ingredient catalog not found at: {:?}", path));
        }

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read ingredient catalog at {:?}", path))?;
        let entries: Vec<Ingredient> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse ingredient catalog at {:?}", path))?;

        Self::from_entries(entries)
            .with_context(|| format!("Invalid ingredient catalog at {:?}", path))
    }

    /// Build a catalog from already-parsed entries, validating names and
    /// nutrition values. Used directly by tests to avoid file I/O.
    pub fn from_entries(entries: Vec<Ingredient>) -> Result<Self> {
        if entries.is_empty() {
            return Err(anyhow::anyhow!("No ingredients in catalog"));
        }

        let mut by_name = HashMap::with_capacity(entries.len());
        for (idx, ingredient) in entries.iter().enumerate() {
            if ingredient.name.trim().is_empty() {
                return Err(anyhow::anyhow!("Ingredient at index {} has an empty name", idx));
            }
            for (field, value) in [
                ("calories", ingredient.calories),
                ("carbs", ingredient.carbs),
                ("fat", ingredient.fat),
                ("protein", ingredient.protein),
                ("fiber", ingredient.fiber),
            ] {
                if !value.is_finite() || value < 0.0 {
                    return Err(anyhow::anyhow!(
                        "Ingredient '{}' has invalid {}: {}",
                        ingredient.name,
                        field,
                        value
                    ));
                }
            }
            if by_name.insert(ingredient.name.clone(), idx).is_some() {
                return Err(anyhow::anyhow!(
                    "Duplicate ingredient name in catalog: '{}'",
                    ingredient.name
                ));
            }
        }

        Ok(Self {
            ingredients: entries,
            by_name,
        })
    }

    pub fn get(&self, name: &str) -> Option<&Ingredient> {
        self.by_name.get(name).map(|&idx| &self.ingredients[idx])
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}
