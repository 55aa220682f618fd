use crate::domain::{Recipe, RecipeInput};

use super::ingredients::merge_ingredients;

/// Merges a requested recipe into the stored one, or into a fresh recipe when
/// nothing is stored yet. Without a request the stored recipe passes through.
///
/// The result is ready to persist; validation has to happen before.
pub fn merge_recipe(existing: Option<Recipe>, requested: Option<&RecipeInput>) -> Option<Recipe> {
    match requested {
        Some(requested) => Some(merge_into(existing, requested)),
        None => existing,
    }
}

/// Copies the requested scalar fields and reconciles the ingredient list.
/// Identity and creation time of `existing` are kept.
pub fn merge_into(existing: Option<Recipe>, requested: &RecipeInput) -> Recipe {
    let mut recipe = existing.unwrap_or_default();
    recipe.name = requested.name.clone();
    recipe.instructions = requested.instructions.clone();
    recipe.servings = requested.servings;
    recipe.vegetarian = requested.vegetarian;

    let current = std::mem::take(&mut recipe.ingredients);
    recipe.ingredients = merge_ingredients(current, &requested.ingredients);
    recipe
}
