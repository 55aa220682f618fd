use std::fmt;
use thiserror::Error;

use crate::domain::RecipeId;
use crate::messages;

/// Which uniquely-named collection rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Recipe,
    Ingredient,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Recipe => f.write_str("recipe"),
            Entity::Ingredient => f.write_str("ingredient"),
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{entity} name already taken: {value}")]
    UniqueViolation { entity: Entity, value: String },

    #[error("store lock poisoned")]
    Poisoned,

    #[error("snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum VaultError {
    #[error("a recipe named '{0}' already exists")]
    DuplicateRecipeName(String),

    #[error("an ingredient named '{0}' already exists")]
    DuplicateIngredientName(String),

    #[error("recipe {0} not found")]
    NotFound(RecipeId),

    #[error("store error: {0}")]
    Store(StoreError),
}

impl VaultError {
    /// Message key and positional arguments used to render this error for a caller.
    pub fn message_key(&self) -> (&'static str, Vec<String>) {
        match self {
            VaultError::DuplicateRecipeName(name) => (messages::RECIPE_NAME_EXISTS, vec![name.clone()]),
            VaultError::DuplicateIngredientName(name) => {
                (messages::INGREDIENT_NAME_EXISTS, vec![name.clone()])
            }
            VaultError::NotFound(id) => (messages::RECIPE_NOT_FOUND, vec![id.to_string()]),
            VaultError::Store(err) => (messages::STORE_FAILURE, vec![err.to_string()]),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            VaultError::DuplicateRecipeName(_) | VaultError::DuplicateIngredientName(_)
        )
    }
}

impl From<StoreError> for VaultError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation {
                entity: Entity::Recipe,
                value,
            } => VaultError::DuplicateRecipeName(value),
            // ingredient names are reported lower-cased, like the validator does
            StoreError::UniqueViolation {
                entity: Entity::Ingredient,
                value,
            } => VaultError::DuplicateIngredientName(value.to_lowercase()),
            other => VaultError::Store(other),
        }
    }
}
