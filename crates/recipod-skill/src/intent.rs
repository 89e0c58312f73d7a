//! Intent names and slot access.

use std::collections::HashMap;

/// Slot name to slot value, as extracted from the utterance.
pub type Slots = HashMap<String, String>;

pub const INGREDIENTS_FOR_RECIPE: &str = "GetIngredientsForRecipeIntent";
pub const RECIPE_FROM_INGREDIENTS: &str = "GetRecipeFromIngredientsIntent";
pub const ABOUT: &str = "AboutIntent";

pub const SLOT_RECIPE: &str = "recipe";
pub const SLOT_INGREDIENT_ONE: &str = "ingredientone";
pub const SLOT_INGREDIENT_TWO: &str = "ingredienttwo";

/// The intents the skill understands. Anything else is `Unrecognized`,
/// which is a normal outcome rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    IngredientsForRecipe,
    RecipeFromIngredients,
    About,
    Unrecognized(String),
}

impl Intent {
    pub fn from_name(name: &str) -> Self {
        match name {
            INGREDIENTS_FOR_RECIPE => Intent::IngredientsForRecipe,
            RECIPE_FROM_INGREDIENTS => Intent::RecipeFromIngredients,
            ABOUT => Intent::About,
            other => Intent::Unrecognized(other.to_string()),
        }
    }
}

/// Value of `name`, or `""` when the slot is absent.
pub(crate) fn slot<'a>(slots: &'a Slots, name: &str) -> &'a str {
    slots.get(name).map_or("", String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_map_to_intents() {
        assert_eq!(
            Intent::from_name("GetIngredientsForRecipeIntent"),
            Intent::IngredientsForRecipe
        );
        assert_eq!(
            Intent::from_name("GetRecipeFromIngredientsIntent"),
            Intent::RecipeFromIngredients
        );
        assert_eq!(Intent::from_name("AboutIntent"), Intent::About);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(
            Intent::from_name("aboutintent"),
            Intent::Unrecognized("aboutintent".into())
        );
        assert_eq!(Intent::from_name(""), Intent::Unrecognized(String::new()));
    }

    #[test]
    fn absent_slot_reads_as_empty() {
        let mut slots = Slots::new();
        slots.insert("recipe".into(), "toast".into());
        assert_eq!(slot(&slots, "recipe"), "toast");
        assert_eq!(slot(&slots, "ingredientone"), "");
    }
}
