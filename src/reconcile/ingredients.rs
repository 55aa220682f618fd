use std::collections::HashMap;

use crate::domain::{Ingredient, IngredientAssociation, IngredientInput};

/// Collapses requested lines sharing an ingredient name. The last occurrence
/// wins and takes the position of the first one.
fn collapse_by_name(requested: &[IngredientInput]) -> Vec<&IngredientInput> {
    let mut positions: HashMap<&str, usize> = HashMap::with_capacity(requested.len());
    let mut collapsed: Vec<&IngredientInput> = Vec::with_capacity(requested.len());
    for input in requested {
        match positions.get(input.name.as_str()) {
            Some(&idx) => collapsed[idx] = input,
            None => {
                positions.insert(input.name.as_str(), collapsed.len());
                collapsed.push(input);
            }
        }
    }
    collapsed
}

fn new_association(input: &IngredientInput) -> IngredientAssociation {
    IngredientAssociation {
        id: None,
        ingredient: Ingredient::unresolved(input.name.clone(), input.health_benefit.clone()),
        measure: input.measure,
        unit: input.unit,
    }
}

/// Merges the requested ingredient lines into a recipe's current associations.
///
/// Associations are matched by ingredient name. A match keeps its identity and
/// ingredient reference and takes the requested measure and unit; anything
/// else becomes a new, unresolved association. Current associations that were
/// not requested are dropped, so an empty request empties the recipe.
pub fn merge_ingredients(
    current: Vec<IngredientAssociation>,
    requested: &[IngredientInput],
) -> Vec<IngredientAssociation> {
    if requested.is_empty() {
        return Vec::new();
    }

    let mut by_name: HashMap<String, IngredientAssociation> = current
        .into_iter()
        .map(|association| (association.ingredient.name.clone(), association))
        .collect();

    collapse_by_name(requested)
        .into_iter()
        .map(|input| match by_name.remove(&input.name) {
            Some(mut found) => {
                found.measure = input.measure;
                found.unit = input.unit;
                found
            }
            None => new_association(input),
        })
        .collect()
}
