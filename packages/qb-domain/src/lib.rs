pub mod catalog;
pub mod filter;
pub mod matching;
pub mod persona;
pub mod query;
pub mod recipe;

pub use filter::{BudgetBucket, FilterSelection, GoalBucket, TimeBucket};
pub use persona::{PersonaTag, UnknownPersona};
pub use query::{SearchQuery, compose_query};
pub use recipe::Recipe;
