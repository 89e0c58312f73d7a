//! Intent resolution against the recipes collection.
//!
//! Each intent is at most one store call:
//!
//! | Intent | Query | Label |
//! |---|---|---|
//! | `GetIngredientsForRecipeIntent` | `name = recipe` (first match) | `Ingredients` |
//! | `GetRecipeFromIngredientsIntent` | `ingredients ⊇ {one, two}` | `Recipes` |
//! | `AboutIntent` | none | `About` |
//! | anything else | none | `Unknown Request` |

use serde::{Deserialize, Serialize};

use recipod_core::{Filter, Recipe};
use recipod_storage::Collection;

use crate::error::SkillError;
use crate::intent::{self, Intent, Slots};

pub const ABOUT_TEXT: &str = "A recipe assistant that answers from your own recipe collection";
pub const UNRECOGNIZED_TITLE: &str = "Unknown Request";
pub const UNRECOGNIZED_TEXT: &str = "The intent was unrecognized";

const LIST_SEPARATOR: &str = ", ";

/// A titled plain-text answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillResponse {
    pub label: String,
    pub text: String,
}

impl SkillResponse {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        SkillResponse {
            label: label.into(),
            text: text.into(),
        }
    }
}

/// Stateless resolver over a shared recipes collection.
#[derive(Debug, Clone)]
pub struct IntentResolver {
    recipes: Collection,
}

impl IntentResolver {
    pub fn new(recipes: Collection) -> Self {
        IntentResolver { recipes }
    }

    pub async fn resolve(
        &self,
        intent_name: &str,
        slots: &Slots,
    ) -> Result<SkillResponse, SkillError> {
        match Intent::from_name(intent_name) {
            Intent::IngredientsForRecipe => {
                self.ingredients_for(intent::slot(slots, intent::SLOT_RECIPE))
                    .await
            }
            Intent::RecipeFromIngredients => {
                self.recipes_with(
                    intent::slot(slots, intent::SLOT_INGREDIENT_ONE),
                    intent::slot(slots, intent::SLOT_INGREDIENT_TWO),
                )
                .await
            }
            Intent::About => Ok(SkillResponse::new("About", ABOUT_TEXT)),
            Intent::Unrecognized(name) => {
                tracing::debug!(intent = %name, "unrecognized intent");
                Ok(SkillResponse::new(UNRECOGNIZED_TITLE, UNRECOGNIZED_TEXT))
            }
        }
    }

    async fn ingredients_for(&self, name: &str) -> Result<SkillResponse, SkillError> {
        if name.is_empty() {
            return Err(SkillError::InvalidInput {
                slot: intent::SLOT_RECIPE,
            });
        }
        let recipe: Recipe = self
            .recipes
            .find_one_as(&Filter::eq(Recipe::NAME_FIELD, name))
            .await?
            .ok_or_else(|| SkillError::NotFound {
                name: name.to_string(),
            })?;
        Ok(SkillResponse::new(
            "Ingredients",
            recipe.ingredients.join(LIST_SEPARATOR),
        ))
    }

    /// Absent slots arrive here as `""` and are matched literally.
    async fn recipes_with(&self, one: &str, two: &str) -> Result<SkillResponse, SkillError> {
        let recipes: Vec<Recipe> = self
            .recipes
            .find_many_as(&Filter::contains_all(Recipe::INGREDIENTS_FIELD, [one, two]))
            .await?;
        let names: Vec<&str> = recipes.iter().map(|r| r.name.as_str()).collect();
        Ok(SkillResponse::new("Recipes", names.join(LIST_SEPARATOR)))
    }
}
