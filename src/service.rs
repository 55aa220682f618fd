use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{IngredientId, Recipe, RecipeId, RecipeInput};
use crate::error::VaultError;
use crate::messages::{self, MessageResolver};
use crate::reconcile::merge_into;
use crate::search::{compile, RecipePredicate, SearchRequest};
use crate::store::{IngredientStore, RecipeStore};
use crate::validation::UniquenessValidator;

/// Outcome of a create or update.
///
/// A rejected write is not an error: it carries the rendered reason and no
/// recipes, and the caller decides how to present it.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RecipeResponse {
    pub accepted: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recipes: Vec<Recipe>,
}

pub struct RecipeService<R, I, M> {
    recipes: R,
    ingredients: I,
    messages: M,
}

impl<R, I, M> RecipeService<R, I, M>
where
    R: RecipeStore,
    I: IngredientStore,
    M: MessageResolver,
{
    pub fn new(recipes: R, ingredients: I, messages: M) -> Self {
        Self {
            recipes,
            ingredients,
            messages,
        }
    }

    pub fn recipe_store(&self) -> &R {
        &self.recipes
    }

    pub fn ingredient_store(&self) -> &I {
        &self.ingredients
    }

    /// Renders an error through the message resolver.
    pub fn describe(&self, err: &VaultError) -> String {
        let (key, args) = err.message_key();
        self.messages.resolve(key, &args)
    }

    pub fn search(&self, request: &SearchRequest) -> Result<Vec<Recipe>, VaultError> {
        let predicate = compile(request);
        debug!(%predicate, "searching recipes");
        Ok(self.recipes.find_all(&predicate)?)
    }

    pub fn list_all(&self) -> Result<Vec<Recipe>, VaultError> {
        Ok(self.recipes.find_all(&RecipePredicate::Always)?)
    }

    pub fn get_by_id(&self, id: RecipeId) -> Result<Recipe, VaultError> {
        self.recipes.find_by_id(id)?.ok_or(VaultError::NotFound(id))
    }

    pub fn create(&self, source: RecipeInput) -> Result<RecipeResponse, VaultError> {
        let validator = UniquenessValidator::new(&self.recipes, &self.ingredients);
        if let Err(err) = validator.validate_create(&source) {
            return self.reject(err);
        }

        self.commit(merge_into(None, &source), messages::RECIPE_CREATED)
    }

    pub fn update(&self, id: RecipeId, source: RecipeInput) -> Result<RecipeResponse, VaultError> {
        let existing = self.get_by_id(id)?;

        let validator = UniquenessValidator::new(&self.recipes, &self.ingredients);
        if let Err(err) = validator.validate_update(&existing, &source) {
            return self.reject(err);
        }

        self.commit(merge_into(Some(existing), &source), messages::RECIPE_UPDATED)
    }

    pub fn delete(&self, id: RecipeId) -> Result<(), VaultError> {
        if !self.recipes.exists_by_id(id)? {
            return Err(VaultError::NotFound(id));
        }
        self.recipes.delete_by_id(id)?;
        info!(recipe_id = id, "recipe deleted");
        Ok(())
    }

    pub fn deleted_message(&self) -> String {
        self.messages.resolve(messages::RECIPE_DELETED, &[])
    }

    /// Adds unresolved ingredients to the catalog, then saves the recipe.
    fn commit(&self, mut recipe: Recipe, success_key: &str) -> Result<RecipeResponse, VaultError> {
        if let Err(err) = self.persist(&mut recipe) {
            return self.reject(err);
        }
        info!(recipe_id = ?recipe.id, name = %recipe.name, "recipe saved");

        Ok(RecipeResponse {
            accepted: true,
            message: self.messages.resolve(success_key, &[]),
            recipes: self.list_all()?,
        })
    }

    /// All or nothing: catalog rows added here are removed again if a later
    /// insert or the recipe save fails.
    fn persist(&self, recipe: &mut Recipe) -> Result<(), VaultError> {
        let mut inserted = Vec::new();
        let outcome = self.insert_and_save(recipe, &mut inserted);
        if outcome.is_err() {
            self.roll_back(&inserted);
        }
        outcome
    }

    fn insert_and_save(&self, recipe: &mut Recipe, inserted: &mut Vec<IngredientId>) -> Result<(), VaultError> {
        for association in &mut recipe.ingredients {
            if association.ingredient.id.is_none() {
                association.ingredient = self.ingredients.insert(association.ingredient.clone())?;
                inserted.extend(association.ingredient.id);
            }
        }
        *recipe = self.recipes.save(std::mem::take(recipe))?;
        Ok(())
    }

    fn roll_back(&self, inserted: &[IngredientId]) {
        for &id in inserted {
            // keep going, the write error is the one reported
            if let Err(err) = self.ingredients.delete_by_id(id) {
                warn!(ingredient_id = id, error = %err, "could not roll back catalog insert");
            }
        }
        if !inserted.is_empty() {
            debug!(count = inserted.len(), "rolled back catalog inserts");
        }
    }

    /// Validation failures become a rejected response; anything else stays an error.
    fn reject(&self, err: VaultError) -> Result<RecipeResponse, VaultError> {
        if !err.is_validation() {
            return Err(err);
        }
        let message = self.describe(&err);
        warn!(reason = %err, "recipe write rejected");
        Ok(RecipeResponse {
            accepted: false,
            message,
            recipes: Vec::new(),
        })
    }
}
