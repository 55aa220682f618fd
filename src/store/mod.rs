//! Collaborator interfaces the service writes through.
//!
//! Stores enforce name uniqueness themselves and report a clash as
//! [`StoreError::UniqueViolation`], which is the backstop when two validated
//! writes race for the same name.

pub mod in_memory;

use crate::domain::{Ingredient, IngredientId, Recipe, RecipeId};
use crate::error::StoreError;
use crate::search::RecipePredicate;

pub use in_memory::{InMemoryIngredientStore, InMemoryRecipeStore, VaultSnapshot};

pub trait RecipeStore: Send + Sync {
    fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, StoreError>;

    fn exists_by_id(&self, id: RecipeId) -> Result<bool, StoreError>;

    fn exists_by_name_ignore_case(&self, name: &str) -> Result<bool, StoreError>;

    /// Inserts or replaces a recipe, assigning ids to it and to any new associations.
    fn save(&self, recipe: Recipe) -> Result<Recipe, StoreError>;

    /// Returns whether a recipe was removed.
    fn delete_by_id(&self, id: RecipeId) -> Result<bool, StoreError>;

    fn find_all(&self, predicate: &RecipePredicate) -> Result<Vec<Recipe>, StoreError>;
}

pub trait IngredientStore: Send + Sync {
    fn exists_by_name_ignore_case(&self, name: &str) -> Result<bool, StoreError>;

    /// Adds an ingredient to the catalog and returns it with its id.
    fn insert(&self, ingredient: Ingredient) -> Result<Ingredient, StoreError>;

    /// Returns whether an ingredient was removed.
    fn delete_by_id(&self, id: IngredientId) -> Result<bool, StoreError>;

    fn find_all(&self) -> Result<Vec<Ingredient>, StoreError>;
}
