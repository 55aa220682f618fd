use serde::{Deserialize, Serialize};

pub type RecipeId = u64;
pub type IngredientId = u64;
pub type AssociationId = u64;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MeasureUnit {
    Gram,
    Kilogram,
    Milligram,
    Liter,
    Milliliter,
    Teaspoon,
    Tablespoon,
    Cup,
    Piece,
    Pinch,
}

/// Shared reference data. Recipes never own an ingredient, only an association to one.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Ingredient {
    #[serde(default)]
    pub id: Option<IngredientId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_benefit: Option<String>,
}

impl Ingredient {
    /// An ingredient not yet present in the catalog.
    pub fn unresolved(name: impl Into<String>, health_benefit: Option<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            health_benefit,
        }
    }
}

/// Per-recipe link to an ingredient, keyed within its recipe by the ingredient name.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IngredientAssociation {
    #[serde(default)]
    pub id: Option<AssociationId>,
    pub ingredient: Ingredient,
    pub measure: f64,
    pub unit: MeasureUnit,
}

impl IngredientAssociation {
    pub fn name(&self) -> &str {
        &self.ingredient.name
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Recipe {
    #[serde(default)]
    pub id: Option<RecipeId>,
    pub name: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub servings: u32,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<u64>,
    #[serde(default)]
    pub ingredients: Vec<IngredientAssociation>,
}

impl Recipe {
    pub fn has_ingredient(&self, name: &str) -> bool {
        self.ingredients.iter().any(|association| association.name() == name)
    }
}

/// Incoming ingredient line of a create or update request. Lines are matched
/// to stored associations by name, so no association id is carried.
///
/// `ingredient_id` is the identity of the referenced catalog ingredient as the
/// caller last saw it; it drives the "new association" rule on update.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IngredientInput {
    #[serde(default)]
    pub ingredient_id: Option<IngredientId>,
    pub name: String,
    #[serde(default)]
    pub health_benefit: Option<String>,
    pub measure: f64,
    pub unit: MeasureUnit,
}

impl IngredientInput {
    pub fn new(name: impl Into<String>, measure: f64, unit: MeasureUnit) -> Self {
        Self {
            ingredient_id: None,
            name: name.into(),
            health_benefit: None,
            measure,
            unit,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct RecipeInput {
    pub name: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub servings: u32,
    #[serde(default)]
    pub vegetarian: bool,
    #[serde(default)]
    pub ingredients: Vec<IngredientInput>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_input_accepts_minimal_json() {
        let input: RecipeInput = serde_json::from_str(
            r#"{"name":"Soup","ingredients":[{"name":"salt","measure":1.5,"unit":"pinch"}]}"#,
        )
        .unwrap();
        assert_eq!(input.name, "Soup");
        assert_eq!(input.servings, 0);
        assert!(!input.vegetarian);
        assert_eq!(input.ingredients[0].unit, MeasureUnit::Pinch);
        assert_eq!(input.ingredients[0].ingredient_id, None);
    }

    #[test]
    fn test_has_ingredient_is_case_sensitive() {
        let recipe = Recipe {
            name: "Salad".to_string(),
            ingredients: vec![IngredientAssociation {
                id: Some(1),
                ingredient: Ingredient::unresolved("Tomato", None),
                measure: 2.0,
                unit: MeasureUnit::Piece,
            }],
            ..Default::default()
        };
        assert!(recipe.has_ingredient("Tomato"));
        assert!(!recipe.has_ingredient("tomato"));
    }

    #[test]
    fn test_recipe_input_ignores_client_ids() {
        // The update target comes from the call, ingredient lines match by name.
        let input: RecipeInput = serde_json::from_str(
            r#"{"id":9,"name":"Soup","ingredients":[{"id":4,"ingredient_id":2,"name":"salt","measure":1.0,"unit":"gram"}]}"#,
        )
        .unwrap();
        assert_eq!(input.ingredients[0].ingredient_id, Some(2));
        assert_eq!(
            serde_json::to_value(&input).unwrap()["ingredients"][0].get("id"),
            None
        );
    }
}
