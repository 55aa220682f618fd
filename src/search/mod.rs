pub mod filter;
pub mod predicate;

pub use filter::{compile, SearchRequest};
pub use predicate::RecipePredicate;
