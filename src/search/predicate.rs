use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::Recipe;

/// Boolean test over a recipe, kept as data so a store can evaluate it in
/// memory or translate it into its own query language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecipePredicate {
    Always,
    Vegetarian(bool),
    Servings(u32),
    /// Case-sensitive substring of the instructions.
    InstructionsContain(String),
    /// Some association references an ingredient with exactly this name.
    HasIngredient(String),
    Not(Box<RecipePredicate>),
    /// Empty conjunction is true.
    And(Vec<RecipePredicate>),
    /// Empty disjunction is false.
    Or(Vec<RecipePredicate>),
}

impl RecipePredicate {
    pub fn matches(&self, recipe: &Recipe) -> bool {
        match self {
            RecipePredicate::Always => true,
            RecipePredicate::Vegetarian(flag) => recipe.vegetarian == *flag,
            RecipePredicate::Servings(count) => recipe.servings == *count,
            RecipePredicate::InstructionsContain(text) => recipe.instructions.contains(text.as_str()),
            RecipePredicate::HasIngredient(name) => recipe.has_ingredient(name),
            RecipePredicate::Not(inner) => !inner.matches(recipe),
            RecipePredicate::And(parts) => parts.iter().all(|p| p.matches(recipe)),
            RecipePredicate::Or(parts) => parts.iter().any(|p| p.matches(recipe)),
        }
    }

    pub fn and(self, other: RecipePredicate) -> RecipePredicate {
        match self {
            RecipePredicate::Always => other,
            RecipePredicate::And(mut parts) => {
                parts.push(other);
                RecipePredicate::And(parts)
            }
            lhs => RecipePredicate::And(vec![lhs, other]),
        }
    }

    pub fn or(self, other: RecipePredicate) -> RecipePredicate {
        match self {
            RecipePredicate::Or(mut parts) => {
                parts.push(other);
                RecipePredicate::Or(parts)
            }
            lhs => RecipePredicate::Or(vec![lhs, other]),
        }
    }

    pub fn negate(self) -> RecipePredicate {
        RecipePredicate::Not(Box::new(self))
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, parts: &[RecipePredicate], op: &str) -> fmt::Result {
    f.write_str("(")?;
    for (idx, part) in parts.iter().enumerate() {
        if idx > 0 {
            write!(f, " {} ", op)?;
        }
        write!(f, "{}", part)?;
    }
    f.write_str(")")
}

impl fmt::Display for RecipePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipePredicate::Always => f.write_str("true"),
            RecipePredicate::Vegetarian(flag) => write!(f, "vegetarian = {}", flag),
            RecipePredicate::Servings(count) => write!(f, "servings = {}", count),
            RecipePredicate::InstructionsContain(text) => write!(f, "instructions ~ {:?}", text),
            RecipePredicate::HasIngredient(name) => write!(f, "has {:?}", name),
            RecipePredicate::Not(inner) => write!(f, "not {}", inner),
            RecipePredicate::And(parts) => write_joined(f, parts, "and"),
            RecipePredicate::Or(parts) => write_joined(f, parts, "or"),
        }
    }
}
