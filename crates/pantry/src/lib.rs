//! Recipe discovery over TheMealDB.
//!
//! [`MealDb`] exposes one cached, error-swallowing query per upstream
//! endpoint, and [`MealDb::fetch_recipes`] combines them to answer
//! selections the upstream cannot: several filter dimensions at once,
//! comma-separated ingredient search, and pages of distinct random recipes.
//!
//! Transport, retry and caching come from [`pantry_fetch`].
//!
//! ```no_run
//! # async fn run() {
//! use pantry::{MealDb, Selection};
//!
//! let mealdb = MealDb::from_env();
//! let page = mealdb
//!     .fetch_recipes(&Selection::new().category("Dessert").cuisine("French"), 15)
//!     .await;
//! for recipe in &page.recipes {
//!     println!("{} ({})", recipe.name, recipe.id);
//! }
//! # }
//! ```

mod aggregate;
mod api;
mod catalog;
mod config;
mod error;
mod model;
mod tracker;

pub use aggregate::{RecipePage, Selection, Strategy, dedup_by_id, matches_all_terms, search_terms};
pub use api::MealDb;
pub use catalog::{FEATURED_MEAL_IDS, MEAL_AREAS, MEAL_CATEGORIES, MEAL_INGREDIENTS};
pub use config::{BASE_URL_ENV, Config, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use model::{
    Area, Category, INGREDIENT_SLOTS, Ingredient, IngredientSlot, Recipe, extract_ingredients,
    meal_has_ingredient, youtube_id,
};
pub use tracker::{RequestTicket, RequestTracker};

pub use pantry_fetch::{Clock, FetchOptions, HttpClient, RawResponse, SystemClock};
