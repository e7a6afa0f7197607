pub mod category;

pub use category::{Category, CategoryFilter, NewCategory};
