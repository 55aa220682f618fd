//! Reference store kept in process memory.
//!
//! Collections are ordered by id so `find_all` is stable. The whole vault can
//! be captured as a [`VaultSnapshot`] and written out as JSON, which is how the
//! command line tool persists between runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use super::{IngredientStore, RecipeStore};
use crate::domain::{Ingredient, IngredientId, Recipe, RecipeId};
use crate::error::{Entity, StoreError};
use crate::search::RecipePredicate;

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn take_id(next: &mut u64) -> u64 {
    let id = *next;
    *next += 1;
    id
}

/// Keeps `next` past an id chosen by the caller.
fn claim_id(next: &mut u64, id: u64) -> u64 {
    *next = (*next).max(id + 1);
    id
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, StoreError> {
    lock.read().map_err(|_| StoreError::Poisoned)
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, StoreError> {
    lock.write().map_err(|_| StoreError::Poisoned)
}

#[derive(Debug)]
struct RecipeTable {
    rows: BTreeMap<RecipeId, Recipe>,
    next_recipe_id: u64,
    next_association_id: u64,
}

#[derive(Debug)]
pub struct InMemoryRecipeStore {
    table: RwLock<RecipeTable>,
}

impl InMemoryRecipeStore {
    pub fn new() -> Self {
        Self::from_recipes(Vec::new())
    }

    /// Seeds the store. Recipes or associations lacking an id get one.
    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        let next_recipe_id = recipes.iter().filter_map(|r| r.id).max().unwrap_or(0) + 1;
        let next_association_id = recipes
            .iter()
            .flat_map(|r| r.ingredients.iter().filter_map(|a| a.id))
            .max()
            .unwrap_or(0)
            + 1;

        let mut table = RecipeTable {
            rows: BTreeMap::new(),
            next_recipe_id,
            next_association_id,
        };
        for mut recipe in recipes {
            let id = recipe.id.unwrap_or_else(|| take_id(&mut table.next_recipe_id));
            recipe.id = Some(id);
            for association in &mut recipe.ingredients {
                if association.id.is_none() {
                    association.id = Some(take_id(&mut table.next_association_id));
                }
            }
            table.rows.insert(id, recipe);
        }

        Self {
            table: RwLock::new(table),
        }
    }

    pub fn recipes(&self) -> Result<Vec<Recipe>, StoreError> {
        Ok(read(&self.table)?.rows.values().cloned().collect())
    }
}

impl Default for InMemoryRecipeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeStore for InMemoryRecipeStore {
    fn find_by_id(&self, id: RecipeId) -> Result<Option<Recipe>, StoreError> {
        Ok(read(&self.table)?.rows.get(&id).cloned())
    }

    fn exists_by_id(&self, id: RecipeId) -> Result<bool, StoreError> {
        Ok(read(&self.table)?.rows.contains_key(&id))
    }

    fn exists_by_name_ignore_case(&self, name: &str) -> Result<bool, StoreError> {
        Ok(read(&self.table)?
            .rows
            .values()
            .any(|recipe| same_name(&recipe.name, name)))
    }

    fn save(&self, mut recipe: Recipe) -> Result<Recipe, StoreError> {
        let mut table = write(&self.table)?;

        let clash = table
            .rows
            .values()
            .any(|other| other.id != recipe.id && same_name(&other.name, &recipe.name));
        if clash {
            return Err(StoreError::UniqueViolation {
                entity: Entity::Recipe,
                value: recipe.name,
            });
        }

        let id = match recipe.id {
            Some(id) => claim_id(&mut table.next_recipe_id, id),
            None => take_id(&mut table.next_recipe_id),
        };
        recipe.id = Some(id);
        recipe.created_at = table
            .rows
            .get(&id)
            .and_then(|stored| stored.created_at)
            .or(recipe.created_at)
            .or_else(|| Some(unix_now()));

        for association in &mut recipe.ingredients {
            association.id = Some(match association.id {
                Some(id) => claim_id(&mut table.next_association_id, id),
                None => take_id(&mut table.next_association_id),
            });
        }

        debug!(recipe_id = id, name = %recipe.name, "saving recipe");
        table.rows.insert(id, recipe.clone());
        Ok(recipe)
    }

    fn delete_by_id(&self, id: RecipeId) -> Result<bool, StoreError> {
        let removed = write(&self.table)?.rows.remove(&id).is_some();
        debug!(recipe_id = id, removed, "deleting recipe");
        Ok(removed)
    }

    fn find_all(&self, predicate: &RecipePredicate) -> Result<Vec<Recipe>, StoreError> {
        Ok(read(&self.table)?
            .rows
            .values()
            .filter(|recipe| predicate.matches(recipe))
            .cloned()
            .collect())
    }
}

#[derive(Debug)]
struct IngredientTable {
    rows: BTreeMap<IngredientId, Ingredient>,
    next_id: u64,
}

#[derive(Debug)]
pub struct InMemoryIngredientStore {
    table: RwLock<IngredientTable>,
}

impl InMemoryIngredientStore {
    pub fn new() -> Self {
        Self::from_ingredients(Vec::new())
    }

    pub fn from_ingredients(ingredients: Vec<Ingredient>) -> Self {
        let mut table = IngredientTable {
            rows: BTreeMap::new(),
            next_id: ingredients.iter().filter_map(|i| i.id).max().unwrap_or(0) + 1,
        };
        for mut ingredient in ingredients {
            let id = ingredient.id.unwrap_or_else(|| take_id(&mut table.next_id));
            ingredient.id = Some(id);
            table.rows.insert(id, ingredient);
        }
        Self {
            table: RwLock::new(table),
        }
    }
}

impl Default for InMemoryIngredientStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IngredientStore for InMemoryIngredientStore {
    fn exists_by_name_ignore_case(&self, name: &str) -> Result<bool, StoreError> {
        Ok(read(&self.table)?
            .rows
            .values()
            .any(|ingredient| same_name(&ingredient.name, name)))
    }

    fn insert(&self, mut ingredient: Ingredient) -> Result<Ingredient, StoreError> {
        let mut table = write(&self.table)?;
        if table.rows.values().any(|other| same_name(&other.name, &ingredient.name)) {
            return Err(StoreError::UniqueViolation {
                entity: Entity::Ingredient,
                value: ingredient.name,
            });
        }

        let id = take_id(&mut table.next_id);
        ingredient.id = Some(id);
        debug!(ingredient_id = id, name = %ingredient.name, "adding ingredient to catalog");
        table.rows.insert(id, ingredient.clone());
        Ok(ingredient)
    }

    fn delete_by_id(&self, id: IngredientId) -> Result<bool, StoreError> {
        let removed = write(&self.table)?.rows.remove(&id).is_some();
        debug!(ingredient_id = id, removed, "removing ingredient from catalog");
        Ok(removed)
    }

    fn find_all(&self) -> Result<Vec<Ingredient>, StoreError> {
        Ok(read(&self.table)?.rows.values().cloned().collect())
    }
}

/// Serializable image of both stores.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct VaultSnapshot {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

impl VaultSnapshot {
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn capture(
        recipes: &InMemoryRecipeStore,
        ingredients: &InMemoryIngredientStore,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            recipes: recipes.recipes()?,
            ingredients: ingredients.find_all()?,
        })
    }

    pub fn into_stores(self) -> (InMemoryRecipeStore, InMemoryIngredientStore) {
        (
            InMemoryRecipeStore::from_recipes(self.recipes),
            InMemoryIngredientStore::from_ingredients(self.ingredients),
        )
    }
}
