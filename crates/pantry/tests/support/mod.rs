//! In-memory stand-in for the MealDB API.

#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use pantry::{Clock, Config, HttpClient, MealDb, RawResponse};
use serde_json::{Value, json};
use url::Url;

pub const BASE_URL: &str = "http://mealdb.test/api/json/v1/1";

#[derive(Debug)]
pub struct TestError(String);

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for TestError {}

/// A full upstream recipe record.
pub fn recipe(id: &str, name: &str, category: &str, area: &str, ingredients: &[&str]) -> Value {
    let mut record = json!({
        "idMeal": id,
        "strMeal": name,
        "strCategory": category,
        "strArea": area,
        "strInstructions": "Cook it.",
        "strMealThumb": format!("https://img.test/{id}.jpg"),
        "strTags": null,
        "strYoutube": "",
    });
    let fields = record.as_object_mut().expect("object literal");
    for i in 1..=20 {
        let ingredient = ingredients.get(i - 1).copied().unwrap_or("");
        fields.insert(format!("strIngredient{i}"), json!(ingredient));
        fields.insert(format!("strMeasure{i}"), json!(if ingredient.is_empty() { "" } else { "1" }));
    }
    record
}

/// What to do for a request whose path ends with a given endpoint.
#[derive(Debug, Clone)]
pub enum Override {
    Status(u16),
    Body(&'static str),
    Fail,
}

#[derive(Debug, Default)]
pub struct MockUpstream {
    recipes: Vec<Value>,
    random_ids: Vec<String>,
    random_cursor: AtomicUsize,
    broken_lookups: BTreeSet<String>,
    overrides: Mutex<HashMap<String, Override>>,
    calls: Mutex<Vec<Url>>,
}

impl MockUpstream {
    pub fn new(recipes: Vec<Value>) -> Self {
        let random_ids = recipes
            .iter()
            .filter_map(|r| r["idMeal"].as_str().map(str::to_string))
            .collect();
        Self {
            recipes,
            random_ids,
            ..Self::default()
        }
    }

    /// `random.php` serves these ids in order, wrapping around.
    pub fn random_sequence(mut self, ids: &[&str]) -> Self {
        self.random_ids = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    /// `lookup.php` for these ids answers 404.
    pub fn broken_lookups(mut self, ids: &[&str]) -> Self {
        self.broken_lookups = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn set_override(&self, endpoint: &str, behaviour: Override) {
        self.overrides
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), behaviour);
    }

    pub fn clear_override(&self, endpoint: &str) {
        self.overrides.lock().unwrap().remove(endpoint);
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Requests made to `endpoint` (e.g. `"lookup.php"`).
    pub fn calls_to(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|url| url.path().ends_with(endpoint))
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn find(&self, id: &str) -> Option<&Value> {
        self.recipes.iter().find(|r| r["idMeal"] == id)
    }

    fn summary(record: &Value) -> Value {
        json!({
            "idMeal": record["idMeal"],
            "strMeal": record["strMeal"],
            "strMealThumb": record["strMealThumb"],
        })
    }

    fn has_ingredient(record: &Value, wanted: &str) -> bool {
        (1..=20).any(|i| {
            record[format!("strIngredient{i}")]
                .as_str()
                .is_some_and(|name| name.eq_ignore_ascii_case(wanted))
        })
    }

    fn meals(records: Vec<Value>) -> Value {
        if records.is_empty() {
            json!({ "meals": null })
        } else {
            json!({ "meals": records })
        }
    }

    fn filter(&self, keep: impl Fn(&Value) -> bool) -> Value {
        Self::meals(
            self.recipes
                .iter()
                .filter(|r| keep(r))
                .map(Self::summary)
                .collect(),
        )
    }

    fn route(&self, url: &Url) -> RawResponse {
        let endpoint = url.path().rsplit('/').next().unwrap_or_default();
        let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
        let param = |key: &str| params.get(key).cloned().unwrap_or_default();

        let body = match endpoint {
            "search.php" if params.contains_key("f") => {
                let letter = param("f").to_lowercase();
                Self::meals(
                    self.recipes
                        .iter()
                        .filter(|r| {
                            r["strMeal"]
                                .as_str()
                                .is_some_and(|n| n.to_lowercase().starts_with(&letter))
                        })
                        .cloned()
                        .collect(),
                )
            }
            "search.php" => {
                let needle = param("s").to_lowercase();
                Self::meals(
                    self.recipes
                        .iter()
                        .filter(|r| {
                            r["strMeal"]
                                .as_str()
                                .is_some_and(|n| n.to_lowercase().contains(&needle))
                        })
                        .cloned()
                        .collect(),
                )
            }
            "lookup.php" => {
                let id = param("i");
                if self.broken_lookups.contains(&id) {
                    return RawResponse::new(404, "not found");
                }
                Self::meals(self.find(&id).cloned().into_iter().collect())
            }
            "random.php" => {
                if self.random_ids.is_empty() {
                    Self::meals(Vec::new())
                } else {
                    let at = self.random_cursor.fetch_add(1, Ordering::SeqCst) % self.random_ids.len();
                    let id = &self.random_ids[at];
                    Self::meals(self.find(id).cloned().into_iter().collect())
                }
            }
            "categories.php" => json!({
                "categories": [
                    { "idCategory": "1", "strCategory": "Beef", "strCategoryThumb": "https://img.test/beef.png", "strCategoryDescription": "Beef is..." },
                    { "idCategory": "3", "strCategory": "Dessert", "strCategoryThumb": "https://img.test/dessert.png", "strCategoryDescription": "Sweet." }
                ]
            }),
            "list.php" => {
                let areas: BTreeSet<&str> =
                    self.recipes.iter().filter_map(|r| r["strArea"].as_str()).collect();
                json!({ "meals": areas.into_iter().map(|a| json!({ "strArea": a })).collect::<Vec<_>>() })
            }
            "filter.php" if params.contains_key("c") => {
                let category = param("c");
                self.filter(|r| r["strCategory"] == category.as_str())
            }
            "filter.php" if params.contains_key("a") => {
                let area = param("a");
                self.filter(|r| r["strArea"] == area.as_str())
            }
            "filter.php" => {
                let ingredient = param("i");
                self.filter(|r| Self::has_ingredient(r, &ingredient))
            }
            _ => return RawResponse::new(404, "unknown endpoint"),
        };

        RawResponse::new(200, body.to_string())
    }
}

impl HttpClient for MockUpstream {
    type Error = TestError;

    async fn get(&self, url: &str, _headers: &[(String, String)]) -> Result<RawResponse, TestError> {
        let url = Url::parse(url).map_err(|e| TestError(e.to_string()))?;
        self.calls.lock().unwrap().push(url.clone());

        let endpoint = url.path().rsplit('/').next().unwrap_or_default().to_string();
        let behaviour = self.overrides.lock().unwrap().get(&endpoint).cloned();
        match behaviour {
            Some(Override::Status(status)) => Ok(RawResponse::new(status, "{}")),
            Some(Override::Body(body)) => Ok(RawResponse::new(200, body)),
            Some(Override::Fail) => Err(TestError("connection refused".into())),
            None => Ok(self.route(&url)),
        }
    }
}

#[derive(Debug)]
pub struct ManualClock {
    start: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            start: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        })
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock().unwrap()
    }
}

pub type TestDb = MealDb<Arc<MockUpstream>, Arc<ManualClock>>;

pub fn mealdb(upstream: &Arc<MockUpstream>, clock: &Arc<ManualClock>) -> TestDb {
    MealDb::with_clock(
        Arc::clone(upstream),
        Config::default().base_url(BASE_URL),
        Arc::clone(clock),
    )
}
