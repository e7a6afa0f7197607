//! Hierarchical category tree (e.g. product categories).
//!
//! Categories form a tree through `parent_id`. Sibling names are unique,
//! depth and fan-out are capped by configuration, and a category cannot be
//! deactivated while it still has active children. Deleting a category
//! removes its whole subtree.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/categories` | No | Create a root or child category |
//! | GET | `/api/categories` | No | Search by name substring / status |
//! | GET | `/api/categories/{id}` | No | Get one category, optionally with children |
//! | PUT | `/api/categories/{id}` | No | Update name and/or status |
//! | DELETE | `/api/categories/{id}` | No | Delete a category and its subtree |

pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgCategoryRepository;
pub use services::CategoryService;
