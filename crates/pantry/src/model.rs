//! Upstream records and the helpers that read them.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of parallel ingredient/measure slots on an upstream recipe.
pub const INGREDIENT_SLOTS: usize = 20;

/// One recipe as the upstream returns it.
///
/// Filter endpoints return summaries that carry only `id`, `name` and
/// `thumbnail`; everything else is then `None` and every slot is empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "WireRecipe", into = "WireRecipe")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub instructions: Option<String>,
    pub thumbnail: Option<String>,
    /// Comma-separated, as upstream sends it. See [`Recipe::tags`].
    pub tags: Option<String>,
    pub youtube: Option<String>,
    pub source: Option<String>,
    /// [`INGREDIENT_SLOTS`] long when deserialized; blank slots are kept as-is.
    pub slots: Vec<IngredientSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IngredientSlot {
    pub ingredient: Option<String>,
    pub measure: Option<String>,
}

impl IngredientSlot {
    /// The ingredient name, unless the slot is blank.
    pub fn name(&self) -> Option<&str> {
        self.ingredient.as_deref().filter(|name| !name.trim().is_empty())
    }
}

/// A non-blank ingredient line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    pub name: String,
    pub measure: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "idCategory")]
    pub id: String,
    #[serde(rename = "strCategory")]
    pub name: String,
    #[serde(rename = "strCategoryThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategoryDescription", default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    #[serde(rename = "strArea")]
    pub name: String,
}

impl Recipe {
    /// Tags split on commas, blanks dropped.
    pub fn tags(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Names of all non-blank ingredient slots, in slot order.
    pub fn ingredient_names(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().filter_map(IngredientSlot::name)
    }
}

/// The non-blank ingredient slots with their measures (empty when missing).
pub fn extract_ingredients(recipe: &Recipe) -> Vec<Ingredient> {
    recipe
        .slots
        .iter()
        .filter_map(|slot| {
            slot.name().map(|name| Ingredient {
                name: name.to_string(),
                measure: slot.measure.clone().unwrap_or_default(),
            })
        })
        .collect()
}

/// Case-insensitive substring match of `needle` against every ingredient slot.
pub fn meal_has_ingredient(recipe: &Recipe, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    recipe
        .ingredient_names()
        .any(|name| name.to_lowercase().contains(&needle))
}

static YOUTUBE_ID: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?:youtube\.com/watch\?v=|youtu\.be/)([^&\n?#]+)").ok());

/// Video id from a `youtube.com/watch?v=` or `youtu.be/` link.
pub fn youtube_id(url: &str) -> Option<&str> {
    let re = YOUTUBE_ID.as_ref()?;
    re.captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Upstream field layout, including the twenty numbered slot pairs.
#[derive(Serialize, Deserialize)]
struct WireRecipe {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal", default)]
    name: Option<String>,
    #[serde(rename = "strCategory", default)]
    category: Option<String>,
    #[serde(rename = "strArea", default)]
    area: Option<String>,
    #[serde(rename = "strInstructions", default)]
    instructions: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    thumbnail: Option<String>,
    #[serde(rename = "strTags", default)]
    tags: Option<String>,
    #[serde(rename = "strYoutube", default)]
    youtube: Option<String>,
    #[serde(rename = "strSource", default)]
    source: Option<String>,
    #[serde(flatten)]
    rest: BTreeMap<String, Value>,
}

fn slot_text(rest: &BTreeMap<String, Value>, key: &str) -> Option<String> {
    rest.get(key).and_then(Value::as_str).map(str::to_string)
}

impl From<WireRecipe> for Recipe {
    fn from(wire: WireRecipe) -> Self {
        let slots = (1..=INGREDIENT_SLOTS)
            .map(|i| IngredientSlot {
                ingredient: slot_text(&wire.rest, &format!("strIngredient{i}")),
                measure: slot_text(&wire.rest, &format!("strMeasure{i}")),
            })
            .collect();

        Recipe {
            id: wire.id,
            name: wire.name.unwrap_or_default(),
            category: wire.category,
            area: wire.area,
            instructions: wire.instructions,
            thumbnail: wire.thumbnail,
            tags: wire.tags,
            youtube: wire.youtube,
            source: wire.source,
            slots,
        }
    }
}

impl From<Recipe> for WireRecipe {
    fn from(recipe: Recipe) -> Self {
        let mut rest = BTreeMap::new();
        for (i, slot) in recipe.slots.into_iter().enumerate() {
            let n = i + 1;
            rest.insert(
                format!("strIngredient{n}"),
                slot.ingredient.map_or(Value::Null, Value::String),
            );
            rest.insert(
                format!("strMeasure{n}"),
                slot.measure.map_or(Value::Null, Value::String),
            );
        }

        WireRecipe {
            id: recipe.id,
            name: Some(recipe.name),
            category: recipe.category,
            area: recipe.area,
            instructions: recipe.instructions,
            thumbnail: recipe.thumbnail,
            tags: recipe.tags,
            youtube: recipe.youtube,
            source: recipe.source,
            rest,
        }
    }
}
