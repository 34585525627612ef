//! Compound recipe queries the upstream cannot answer in one call.
//!
//! A request picks exactly one fetch strategy by priority, then narrows the
//! candidates with post-filters, deduplicates by id and cuts a page.

use std::collections::{HashMap, HashSet};

use futures_util::future::join_all;
use pantry_fetch::{Clock, HttpClient};
use serde::Serialize;
use tracing::debug;

use crate::api::MealDb;
use crate::model::{Recipe, meal_has_ingredient};

/// Independently optional filter dimensions. Blank values count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub category: Option<String>,
    pub cuisine: Option<String>,
    pub ingredient: Option<String>,
    pub search_term: Option<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    #[must_use]
    pub fn ingredient(mut self, ingredient: impl Into<String>) -> Self {
        self.ingredient = Some(ingredient.into());
        self
    }

    #[must_use]
    pub fn search_term(mut self, search_term: impl Into<String>) -> Self {
        self.search_term = Some(search_term.into());
        self
    }

    fn category_value(&self) -> Option<&str> {
        non_blank(&self.category)
    }

    fn cuisine_value(&self) -> Option<&str> {
        non_blank(&self.cuisine)
    }

    fn ingredient_value(&self) -> Option<&str> {
        non_blank(&self.ingredient)
    }

    /// How many of category, cuisine and ingredient are set.
    fn dimension_count(&self) -> usize {
        [
            self.category_value(),
            self.cuisine_value(),
            self.ingredient_value(),
        ]
        .iter()
        .flatten()
        .count()
    }

    /// Whether `recipe` satisfies every selected dimension on its own.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.category_value()
            .is_none_or(|category| recipe.category.as_deref() == Some(category))
            && self
                .cuisine_value()
                .is_none_or(|cuisine| recipe.area.as_deref() == Some(cuisine))
            && self
                .ingredient_value()
                .is_none_or(|ingredient| meal_has_ingredient(recipe, ingredient))
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// The primary fetch path for a [`Selection`], first match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Lower-cased terms, at least two.
    MultiTermSearch(Vec<String>),
    NameSearch(String),
    Category(String),
    Area(String),
    Ingredient(String),
    Random,
}

impl Strategy {
    pub fn select(selection: &Selection) -> Self {
        let raw = selection.search_term.as_deref().unwrap_or_default();
        let terms: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();

        match terms.as_slice() {
            [] => {}
            // Name search keeps the user's casing.
            [term] => return Strategy::NameSearch(term.to_string()),
            _ => return Strategy::MultiTermSearch(search_terms(raw)),
        }

        if let Some(category) = selection.category_value() {
            Strategy::Category(category.to_string())
        } else if let Some(cuisine) = selection.cuisine_value() {
            Strategy::Area(cuisine.to_string())
        } else if let Some(ingredient) = selection.ingredient_value() {
            Strategy::Ingredient(ingredient.to_string())
        } else {
            Strategy::Random
        }
    }
}

/// Comma-separated search input as trimmed, lower-cased, non-empty terms.
pub fn search_terms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Every term appears in the name or in some ingredient slot.
///
/// Terms are expected lower-cased, as [`search_terms`] returns them.
pub fn matches_all_terms(recipe: &Recipe, terms: &[String]) -> bool {
    let name = recipe.name.to_lowercase();
    let ingredients: Vec<String> = recipe
        .ingredient_names()
        .map(str::to_lowercase)
        .collect();

    terms.iter().all(|term| {
        name.contains(term.as_str()) || ingredients.iter().any(|i| i.contains(term.as_str()))
    })
}

/// Keep one recipe per id, at the position its id was first seen.
///
/// When an id repeats, the later record replaces the earlier one.
pub fn dedup_by_id(recipes: impl IntoIterator<Item = Recipe>) -> Vec<Recipe> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<Recipe> = Vec::new();

    for recipe in recipes {
        match index.get(&recipe.id) {
            Some(&at) => unique[at] = recipe,
            None => {
                index.insert(recipe.id.clone(), unique.len());
                unique.push(recipe);
            }
        }
    }

    unique
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecipePage {
    pub recipes: Vec<Recipe>,
    /// The page came back full. More results may or may not exist.
    pub has_more: bool,
}

impl<C: HttpClient, K: Clock + Clone> MealDb<C, K> {
    /// Resolve a selection into one page of unique recipes.
    pub async fn fetch_recipes(&self, selection: &Selection, page_size: usize) -> RecipePage {
        let strategy = Strategy::select(selection);
        debug!(?strategy, page_size, "fetching recipes");

        let mut candidates = match strategy {
            Strategy::MultiTermSearch(terms) => {
                let summaries = self.get_meals_by_ingredient(&terms[0]).await;
                let limit = self.config().search_hydrate_limit;
                let mut hydrated = self.hydrate(&summaries, limit).await;
                hydrated.retain(|recipe| matches_all_terms(recipe, &terms));
                hydrated
            }
            Strategy::NameSearch(term) => self.search_meals_by_name(&term).await,
            Strategy::Category(category) => {
                let summaries = self.get_meals_by_category(&category).await;
                self.hydrate(&summaries, self.config().hydrate_limit).await
            }
            Strategy::Area(area) => {
                let summaries = self.get_meals_by_area(&area).await;
                self.hydrate(&summaries, self.config().hydrate_limit).await
            }
            Strategy::Ingredient(ingredient) => {
                let summaries = self.get_meals_by_ingredient(&ingredient).await;
                self.hydrate(&summaries, self.config().hydrate_limit).await
            }
            Strategy::Random => self.sample_unique(page_size).await,
        };

        if selection.dimension_count() > 1 {
            candidates.retain(|recipe| selection.matches(recipe));
        }

        let mut unique = dedup_by_id(candidates);
        let has_more = unique.len() >= page_size;
        unique.truncate(page_size);

        RecipePage {
            recipes: unique,
            has_more,
        }
    }

    /// [`MealDb::fetch_recipes`] with the configured page size.
    pub async fn fetch_first_page(&self, selection: &Selection) -> RecipePage {
        self.fetch_recipes(selection, self.config().page_size).await
    }

    /// Append `page_size` random recipes to `existing` and deduplicate.
    ///
    /// Active filters are not consulted: the additions are unfiltered random
    /// recipes. `has_more` is true iff every random draw returned a recipe.
    pub async fn load_more(&self, existing: Vec<Recipe>, page_size: usize) -> RecipePage {
        let fresh = self.get_multiple_random_meals(page_size).await;
        let has_more = fresh.len() == page_size;

        RecipePage {
            recipes: dedup_by_id(existing.into_iter().chain(fresh)),
            has_more,
        }
    }

    /// [`MealDb::load_more`] with the configured page size.
    pub async fn load_next_page(&self, existing: Vec<Recipe>) -> RecipePage {
        self.load_more(existing, self.config().page_size).await
    }

    /// Full detail for the first `limit` summaries, fetched concurrently.
    ///
    /// Lookups that fail or find nothing are dropped; order is preserved.
    async fn hydrate(&self, summaries: &[Recipe], limit: usize) -> Vec<Recipe> {
        let lookups = summaries
            .iter()
            .take(limit)
            .map(|summary| self.get_meal_by_id(&summary.id));

        join_all(lookups).await.into_iter().flatten().collect()
    }

    /// Draw random recipes in batches until `page_size` distinct ids are held.
    ///
    /// Unbounded: an upstream that can never supply `page_size` distinct
    /// recipes keeps this looping.
    async fn sample_unique(&self, page_size: usize) -> Vec<Recipe> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut recipes = Vec::with_capacity(page_size);
        let mut round = 0usize;

        while recipes.len() < page_size {
            round += 1;
            let batch = page_size - recipes.len();
            debug!(round, batch, held = recipes.len(), "sampling random recipes");

            for recipe in self.get_multiple_random_meals(batch).await {
                if seen.insert(recipe.id.clone()) {
                    recipes.push(recipe);
                }
            }
        }

        recipes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IngredientSlot;

    fn recipe(id: &str, name: &str, ingredients: &[&str]) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: name.to_string(),
            slots: ingredients
                .iter()
                .map(|i| IngredientSlot {
                    ingredient: Some(i.to_string()),
                    measure: None,
                })
                .collect(),
            ..Recipe::default()
        }
    }

    #[test]
    fn search_outranks_filters() {
        let selection = Selection::new().category("Dessert").search_term("cake");
        assert_eq!(
            Strategy::select(&selection),
            Strategy::NameSearch("cake".into())
        );
    }

    #[test]
    fn comma_terms_select_multi_term_search() {
        let selection = Selection::new().search_term("Chicken, garlic ,");
        assert_eq!(
            Strategy::select(&selection),
            Strategy::MultiTermSearch(vec!["chicken".into(), "garlic".into()])
        );
    }

    #[test]
    fn trailing_comma_is_still_single_term() {
        let selection = Selection::new().search_term(" Arrabiata , ");
        assert_eq!(
            Strategy::select(&selection),
            Strategy::NameSearch("Arrabiata".into())
        );
    }

    #[test]
    fn filter_priority_is_category_then_cuisine_then_ingredient() {
        let all = Selection::new()
            .category("Seafood")
            .cuisine("Thai")
            .ingredient("Garlic");
        assert_eq!(Strategy::select(&all), Strategy::Category("Seafood".into()));

        let two = Selection::new().cuisine("Thai").ingredient("Garlic");
        assert_eq!(Strategy::select(&two), Strategy::Area("Thai".into()));

        let one = Selection::new().ingredient("Garlic");
        assert_eq!(Strategy::select(&one), Strategy::Ingredient("Garlic".into()));
    }

    #[test]
    fn blank_selection_is_random() {
        let selection = Selection::new().category("  ").search_term(" , ");
        assert_eq!(Strategy::select(&selection), Strategy::Random);
        assert_eq!(Strategy::select(&Selection::default()), Strategy::Random);
    }

    #[test]
    fn multi_term_match_is_and_across_terms() {
        let terms = search_terms("chicken, garlic");
        let both = recipe("1", "Chicken Curry", &["Garlic", "Onion"]);
        let only_chicken = recipe("2", "Chicken Soup", &["Carrots"]);
        let in_slots = recipe("3", "Stir fry", &["chicken breast", "garlic clove"]);

        assert!(matches_all_terms(&both, &terms));
        assert!(!matches_all_terms(&only_chicken, &terms));
        assert!(matches_all_terms(&in_slots, &terms));
    }

    #[test]
    fn dedup_keeps_first_position_and_last_content() {
        let merged = dedup_by_id(vec![
            recipe("1", "one", &[]),
            recipe("2", "two", &[]),
            recipe("2", "two (newer)", &[]),
            recipe("3", "three", &[]),
        ]);

        let ids: Vec<&str> = merged.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(merged[1].name, "two (newer)");
    }

    #[test]
    fn selection_matches_every_dimension() {
        let mut tart = recipe("1", "Tarte Tatin", &["Apples", "Butter"]);
        tart.category = Some("Dessert".into());
        tart.area = Some("French".into());

        assert!(Selection::new().category("Dessert").cuisine("French").matches(&tart));
        assert!(!Selection::new().category("Dessert").cuisine("British").matches(&tart));
        assert!(Selection::new().cuisine("French").ingredient("apple").matches(&tart));
        assert!(!Selection::new().cuisine("French").ingredient("pear").matches(&tart));
    }

    #[test]
    fn dimension_count_ignores_search_and_blanks() {
        let selection = Selection::new()
            .category("Dessert")
            .cuisine("")
            .search_term("cake");
        assert_eq!(selection.dimension_count(), 1);
    }
}
