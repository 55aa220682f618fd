use serde::{Deserialize, Serialize};

use super::predicate::RecipePredicate;

/// Partially-specified search. Every absent field leaves recipes unconstrained.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SearchRequest {
    #[serde(default)]
    pub vegetarian: Option<bool>,
    #[serde(default)]
    pub servings: Option<u32>,
    /// Case-sensitive substring looked up in the instructions.
    #[serde(default)]
    pub search_key: Option<String>,
    /// Recipes with at least one of these ingredients.
    #[serde(default)]
    pub include_ingredients: Option<Vec<String>>,
    /// Recipes with none of these ingredients.
    #[serde(default)]
    pub exclude_ingredients: Option<Vec<String>>,
}

fn scalar_predicates(request: &SearchRequest, predicates: &mut Vec<RecipePredicate>) {
    if let Some(vegetarian) = request.vegetarian {
        predicates.push(RecipePredicate::Vegetarian(vegetarian));
    }
    if let Some(servings) = request.servings {
        predicates.push(RecipePredicate::Servings(servings));
    }
    if let Some(key) = request.search_key.as_deref().filter(|k| !k.trim().is_empty()) {
        predicates.push(RecipePredicate::InstructionsContain(key.to_string()));
    }
}

fn ingredient_predicates(request: &SearchRequest, predicates: &mut Vec<RecipePredicate>) {
    let excluded = request
        .exclude_ingredients
        .iter()
        .flatten()
        .map(|name| RecipePredicate::HasIngredient(name.clone()).negate())
        .reduce(RecipePredicate::and);
    if let Some(excluded) = excluded {
        predicates.push(excluded);
    }

    let included = request
        .include_ingredients
        .iter()
        .flatten()
        .map(|name| RecipePredicate::HasIngredient(name.clone()))
        .reduce(RecipePredicate::or);
    if let Some(included) = included {
        predicates.push(included);
    }
}

/// Compiles a search request into a single predicate over recipes.
///
/// Scalar fields become equality tests, the exclude list a conjunction of
/// negated memberships and the include list a disjunction of memberships.
/// Everything is conjoined; a request that constrains nothing compiles to
/// [`RecipePredicate::Always`].
pub fn compile(request: &SearchRequest) -> RecipePredicate {
    let mut predicates = Vec::new();
    scalar_predicates(request, &mut predicates);
    ingredient_predicates(request, &mut predicates);

    match predicates.len() {
        0 => RecipePredicate::Always,
        1 => predicates.remove(0),
        _ => RecipePredicate::And(predicates),
    }
}
