//! Fixed filter vocabularies offered to users.

pub const MEAL_CATEGORIES: &[&str] = &[
    "Beef",
    "Chicken",
    "Dessert",
    "Lamb",
    "Miscellaneous",
    "Pasta",
    "Pork",
    "Seafood",
    "Side",
    "Starter",
    "Vegan",
    "Vegetarian",
    "Breakfast",
    "Goat",
];

pub const MEAL_AREAS: &[&str] = &[
    "American",
    "British",
    "Canadian",
    "Chinese",
    "Croatian",
    "Dutch",
    "Egyptian",
    "Filipino",
    "French",
    "Greek",
    "Indian",
    "Irish",
    "Italian",
    "Jamaican",
    "Japanese",
    "Kenyan",
    "Malaysian",
    "Mexican",
    "Moroccan",
    "Polish",
    "Portuguese",
    "Russian",
    "Spanish",
    "Thai",
    "Tunisian",
    "Turkish",
    "Ukrainian",
    "Vietnamese",
];

/// Common ingredients, not the full upstream list.
pub const MEAL_INGREDIENTS: &[&str] = &[
    "Chicken",
    "Beef",
    "Pork",
    "Salmon",
    "Tuna",
    "Shrimp",
    "Potatoes",
    "Tomatoes",
    "Onions",
    "Garlic",
    "Rice",
    "Pasta",
    "Eggs",
    "Cheese",
    "Milk",
    "Butter",
    "Olive Oil",
    "Mushrooms",
    "Carrots",
    "Broccoli",
    "Spinach",
    "Lettuce",
    "Flour",
    "Sugar",
    "Chocolate",
    "Vanilla",
    "Lemon",
];

/// Recipes shown on the landing page, looked up by id.
pub const FEATURED_MEAL_IDS: &[&str] = &["52772", "52774", "52776", "52778"];
