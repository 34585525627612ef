//! One query function per upstream endpoint.
//!
//! Every public query is a terminal error boundary: failures are logged and
//! become an empty list or `None`.

use futures_util::future::join_all;
use pantry_fetch::{Clock, Fetcher, HttpClient, ResponseCache, SystemClock};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::catalog::FEATURED_MEAL_IDS;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{Area, Category, Recipe};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endpoint<'a> {
    SearchName(&'a str),
    SearchLetter(&'a str),
    Lookup(&'a str),
    Random,
    Categories,
    Areas,
    FilterCategory(&'a str),
    FilterArea(&'a str),
    FilterIngredient(&'a str),
}

impl Endpoint<'_> {
    fn path(&self) -> &'static str {
        match self {
            Endpoint::SearchName(_) | Endpoint::SearchLetter(_) => "search.php",
            Endpoint::Lookup(_) => "lookup.php",
            Endpoint::Random => "random.php",
            Endpoint::Categories => "categories.php",
            Endpoint::Areas => "list.php",
            Endpoint::FilterCategory(_) | Endpoint::FilterArea(_) | Endpoint::FilterIngredient(_) => {
                "filter.php"
            }
        }
    }

    fn query(&self) -> Option<(&'static str, &str)> {
        match *self {
            Endpoint::SearchName(name) => Some(("s", name)),
            Endpoint::SearchLetter(letter) => Some(("f", letter)),
            Endpoint::Lookup(id) => Some(("i", id)),
            Endpoint::Areas => Some(("a", "list")),
            Endpoint::FilterCategory(category) => Some(("c", category)),
            Endpoint::FilterArea(area) => Some(("a", area)),
            Endpoint::FilterIngredient(ingredient) => Some(("i", ingredient)),
            Endpoint::Random | Endpoint::Categories => None,
        }
    }

    /// Namespaced by query kind so equal parameters of different kinds never collide.
    fn cache_key(&self) -> String {
        match *self {
            Endpoint::SearchName(name) => format!("search:{name}"),
            Endpoint::SearchLetter(letter) => format!("letter:{letter}"),
            Endpoint::Lookup(id) => format!("lookup:{id}"),
            Endpoint::Random => "random".to_string(),
            Endpoint::Categories => "categories".to_string(),
            Endpoint::Areas => "areas".to_string(),
            Endpoint::FilterCategory(category) => format!("category:{category}"),
            Endpoint::FilterArea(area) => format!("area:{area}"),
            Endpoint::FilterIngredient(ingredient) => format!("ingredient:{ingredient}"),
        }
    }

    fn url(&self, base_url: &str) -> Result<Url> {
        let raw = format!("{}/{}", base_url.trim_end_matches('/'), self.path());
        let parsed = match self.query() {
            Some(pair) => Url::parse_with_params(&raw, [pair]),
            None => Url::parse(&raw),
        };
        parsed.map_err(|e| Error::InvalidUrl(format!("{raw}: {e}")))
    }
}

/// A missing or `null` `meals` field both read as `None`.
#[derive(Deserialize)]
struct MealsEnvelope<T> {
    meals: Option<Vec<T>>,
}

#[derive(Deserialize)]
struct CategoriesEnvelope {
    #[serde(default)]
    categories: Option<Vec<Category>>,
}

/// Client for the MealDB API with a per-kind response cache.
#[derive(Debug)]
pub struct MealDb<C: HttpClient, K: Clock + Clone = SystemClock> {
    fetcher: Fetcher<C>,
    meals: ResponseCache<Vec<Recipe>, K>,
    categories: ResponseCache<Vec<Category>, K>,
    areas: ResponseCache<Vec<Area>, K>,
    config: Config,
}

#[cfg(feature = "reqwest")]
impl MealDb<pantry_fetch::ReqwestClient> {
    /// Production client configured from the environment.
    pub fn from_env() -> Self {
        Self::new(pantry_fetch::ReqwestClient::new(), Config::from_env())
    }
}

impl<C: HttpClient> MealDb<C> {
    pub fn new(client: C, config: Config) -> Self {
        Self::with_clock(client, config, SystemClock)
    }
}

impl<C: HttpClient, K: Clock + Clone> MealDb<C, K> {
    pub fn with_clock(client: C, config: Config, clock: K) -> Self {
        Self {
            fetcher: Fetcher::new(client, config.fetch.clone()),
            meals: ResponseCache::with_clock(config.cache_ttl, clock.clone()),
            categories: ResponseCache::with_clock(config.cache_ttl, clock.clone()),
            areas: ResponseCache::with_clock(config.cache_ttl, clock),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn client(&self) -> &C {
        self.fetcher.client()
    }

    /// Recipes whose name matches `name` (cached).
    pub async fn search_meals_by_name(&self, name: &str) -> Vec<Recipe> {
        degrade("search by name", self.cached_meals(Endpoint::SearchName(name)).await)
    }

    /// Recipes whose name starts with `letter` (cached).
    pub async fn search_meals_by_first_letter(&self, letter: &str) -> Vec<Recipe> {
        degrade(
            "search by first letter",
            self.cached_meals(Endpoint::SearchLetter(letter)).await,
        )
    }

    /// Full detail for one recipe, always fetched fresh.
    pub async fn get_meal_by_id(&self, id: &str) -> Option<Recipe> {
        let meals = self.fetch_meals::<Recipe>(Endpoint::Lookup(id)).await;
        degrade("lookup by id", meals.map(first))
    }

    /// [`MealDb::get_meal_by_id`] served from the cache when fresh.
    pub async fn get_meal_by_id_cached(&self, id: &str) -> Option<Recipe> {
        degrade(
            "lookup by id",
            self.cached_meals(Endpoint::Lookup(id)).await.map(first),
        )
    }

    /// One random recipe. Never cached.
    pub async fn get_random_meal(&self) -> Option<Recipe> {
        let meals = self.fetch_meals::<Recipe>(Endpoint::Random).await;
        degrade("random", meals.map(first))
    }

    /// `count` concurrent random draws; failed draws are dropped, duplicates kept.
    pub async fn get_multiple_random_meals(&self, count: usize) -> Vec<Recipe> {
        join_all((0..count).map(|_| self.get_random_meal()))
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    pub async fn get_categories(&self) -> Vec<Category> {
        let endpoint = Endpoint::Categories;
        let result = self
            .categories
            .get_or_fetch(&endpoint.cache_key(), || async {
                let envelope: CategoriesEnvelope = self.fetch_json(endpoint).await?;
                Ok::<_, Error>(envelope.categories.unwrap_or_default())
            })
            .await;
        degrade("categories", result)
    }

    pub async fn get_areas(&self) -> Vec<Area> {
        let endpoint = Endpoint::Areas;
        let result = self
            .areas
            .get_or_fetch(&endpoint.cache_key(), || self.fetch_meals::<Area>(endpoint))
            .await;
        degrade("areas", result)
    }

    /// Summary records (id, name, thumbnail) in `category` (cached).
    pub async fn get_meals_by_category(&self, category: &str) -> Vec<Recipe> {
        degrade(
            "filter by category",
            self.cached_meals(Endpoint::FilterCategory(category)).await,
        )
    }

    /// Summary records for cuisine `area` (cached).
    pub async fn get_meals_by_area(&self, area: &str) -> Vec<Recipe> {
        degrade(
            "filter by area",
            self.cached_meals(Endpoint::FilterArea(area)).await,
        )
    }

    /// Summary records whose main ingredients include `ingredient` (cached).
    pub async fn get_meals_by_ingredient(&self, ingredient: &str) -> Vec<Recipe> {
        degrade(
            "filter by ingredient",
            self.cached_meals(Endpoint::FilterIngredient(ingredient)).await,
        )
    }

    /// The landing-page recipes, in catalog order, missing ones dropped.
    pub async fn get_featured_meals(&self) -> Vec<Recipe> {
        join_all(FEATURED_MEAL_IDS.iter().map(|id| self.get_meal_by_id(id)))
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    /// First recipe using `ingredient`, with full detail when it can be had.
    ///
    /// Blank input finds nothing. If hydration fails the summary is returned.
    pub async fn find_by_ingredient(&self, ingredient: &str) -> Option<Recipe> {
        let ingredient = ingredient.trim();
        if ingredient.is_empty() {
            return None;
        }

        let first = self
            .get_meals_by_ingredient(ingredient)
            .await
            .into_iter()
            .next()?;
        match self.get_meal_by_id(&first.id).await {
            Some(full) => Some(full),
            None => Some(first),
        }
    }

    async fn cached_meals(&self, endpoint: Endpoint<'_>) -> Result<Vec<Recipe>> {
        self.meals
            .get_or_fetch(&endpoint.cache_key(), || self.fetch_meals::<Recipe>(endpoint))
            .await
    }

    /// The `meals` field of the response; absent or `null` means none.
    async fn fetch_meals<T: DeserializeOwned>(&self, endpoint: Endpoint<'_>) -> Result<Vec<T>> {
        let envelope: MealsEnvelope<T> = self.fetch_json(endpoint).await?;
        Ok(envelope.meals.unwrap_or_default())
    }

    async fn fetch_json<T: DeserializeOwned>(&self, endpoint: Endpoint<'_>) -> Result<T> {
        let url = endpoint.url(&self.config.base_url)?;
        let response = self.fetcher.fetch(url.as_str()).await?;
        if !response.is_success() {
            return Err(Error::Client {
                status: response.status,
            });
        }
        debug!(url = url.as_str(), status = response.status, "upstream responded");
        Ok(response.json()?)
    }
}

fn first(meals: Vec<Recipe>) -> Option<Recipe> {
    meals.into_iter().next()
}

fn degrade<T: Default>(query: &str, result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        warn!(query, error = %e, "upstream query failed, returning empty result");
        T::default()
    })
}
