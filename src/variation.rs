use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An alternate take on a recipe: a shuffled subset of its ingredients.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Variation {
    pub variation_name: String,
    pub ingredients: Vec<String>,
}

/// Generates 1-3 randomized variations of a recipe's ingredient set.
///
/// Each variation shuffles a copy of the input and keeps a random-length
/// prefix of at least 2 ingredients (or 1 when the base set is that small).
/// An empty base set produces no variations.
pub fn generate_variations<R: Rng + ?Sized>(rng: &mut R, ingredients: &[String]) -> Vec<Variation> {
    if ingredients.is_empty() {
        return Vec::new();
    }

    let min_len = ingredients.len().min(2);
    let count = rng.gen_range(1..=3);

    let mut variations = Vec::with_capacity(count);
    for k in 1..=count {
        let mut varied: Vec<String> = ingredients.to_vec();
        varied.shuffle(rng);
        let len = rng.gen_range(min_len..=ingredients.len());
        varied.truncate(len);

        variations.push(Variation {
            variation_name: format!("Variation {}", k),
            ingredients: varied,
        });
    }
    variations
}
