// Category management: hierarchical content categories

pub mod handlers;
pub mod models;
pub mod repository;
pub mod tree;

pub use handlers::*;
pub use models::{Category, CreateCategory, CreatedId, NewCategory, UpdateCategory};
pub use repository::{CategoryRepository, CategoryStore};
pub use tree::{build_tree, CategoryNode};
