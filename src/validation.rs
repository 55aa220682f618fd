//! Name uniqueness checks run before a recipe write.
//!
//! Both paths stop at the first violation. Recipe names are compared
//! case-insensitively against the store, ingredient names are lower-cased and
//! checked case-insensitively against the catalog and against each other.

use std::collections::HashMap;
use tracing::debug;

use crate::domain::{IngredientAssociation, IngredientId, IngredientInput, Recipe, RecipeInput};
use crate::error::VaultError;
use crate::store::{IngredientStore, RecipeStore};

pub struct UniquenessValidator<'a, R: ?Sized, I: ?Sized> {
    recipes: &'a R,
    ingredients: &'a I,
}

impl<'a, R, I> UniquenessValidator<'a, R, I>
where
    R: RecipeStore + ?Sized,
    I: IngredientStore + ?Sized,
{
    pub fn new(recipes: &'a R, ingredients: &'a I) -> Self {
        Self { recipes, ingredients }
    }

    pub fn validate_create(&self, candidate: &RecipeInput) -> Result<(), VaultError> {
        self.check_recipe_name(&candidate.name)?;
        self.check_ingredient_names(candidate.ingredients.iter())
    }

    /// Like [`validate_create`](Self::validate_create), except that the name
    /// check is skipped when the name is unchanged (exact comparison) and only
    /// new associations are checked against the catalog.
    pub fn validate_update(&self, existing: &Recipe, candidate: &RecipeInput) -> Result<(), VaultError> {
        if candidate.name != existing.name {
            self.check_recipe_name(&candidate.name)?;
        }

        let by_ingredient_id: HashMap<IngredientId, &IngredientAssociation> = existing
            .ingredients
            .iter()
            .filter_map(|association| association.ingredient.id.map(|id| (id, association)))
            .collect();

        self.check_ingredient_names(
            candidate
                .ingredients
                .iter()
                .filter(|input| is_new_association(&by_ingredient_id, input)),
        )
    }

    fn check_recipe_name(&self, name: &str) -> Result<(), VaultError> {
        if self.recipes.exists_by_name_ignore_case(name)? {
            debug!(name, "recipe name already taken");
            return Err(VaultError::DuplicateRecipeName(name.to_string()));
        }
        Ok(())
    }

    fn check_ingredient_names<'i>(
        &self,
        inputs: impl Iterator<Item = &'i IngredientInput>,
    ) -> Result<(), VaultError> {
        // lower-cased name -> spelling seen first in this request
        let mut spellings: HashMap<String, &str> = HashMap::new();
        for input in inputs {
            let name = input.name.to_lowercase();
            if self.ingredients.exists_by_name_ignore_case(&name)? {
                debug!(name = %name, "ingredient name already in catalog");
                return Err(VaultError::DuplicateIngredientName(name));
            }
            match spellings.get(name.as_str()) {
                // exact repeats collapse into one association
                Some(first) if *first != input.name => {
                    debug!(name = %name, "ingredient spelled two ways in one request");
                    return Err(VaultError::DuplicateIngredientName(name));
                }
                Some(_) => {}
                None => {
                    spellings.insert(name, input.name.as_str());
                }
            }
        }
        Ok(())
    }
}

/// An input is new when no stored association references its ingredient id,
/// or when one does but under a different ingredient name (the slot is being
/// re-pointed).
fn is_new_association(
    by_ingredient_id: &HashMap<IngredientId, &IngredientAssociation>,
    input: &IngredientInput,
) -> bool {
    let found = input
        .ingredient_id
        .and_then(|id| by_ingredient_id.get(&id));
    match found {
        None => true,
        Some(association) => association.ingredient.name != input.name,
    }
}
