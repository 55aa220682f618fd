pub mod ingredients;
pub mod recipe;

pub use ingredients::merge_ingredients;
pub use recipe::{merge_into, merge_recipe};
