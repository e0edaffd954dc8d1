//! # Edit Form
//!
//! Editors work on a flattened [`RecipeEdit`] where the structured parts of a
//! recipe are plain text:
//!
//! ```text
//! # Salsa
//! - 1 lb tomatillos
//! - 2 jalapeños
//! # Meat
//! - 3 lb pork shoulder
//! ```
//!
//! - A line starting with `#` opens an ingredient group titled by the rest of
//!   the line. Lines before the first heading go into an untitled group.
//! - Every other non-blank line is one ingredient. A leading `-` bullet is
//!   dropped.
//! - Directions are one step per non-blank line.
//!
//! Only `text` survives for ingredients; `unit`, `quantity`, `name` and `prep`
//! are not part of the form.

use crate::model::{DirectionStep, Ingredient, IngredientGroup, Recipe};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeEdit {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub source: String,
    pub tags: Vec<String>,
    pub ingredient_groups: String,
    pub directions: String,
}

impl RecipeEdit {
    /// A blank form for a recipe that does not exist yet.
    pub fn blank(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            ..Default::default()
        }
    }

    pub fn into_recipe(self) -> Recipe {
        Recipe {
            ingredient_groups: parse_ingredient_groups(&self.ingredient_groups),
            directions: parse_directions(&self.directions),
            slug: self.slug,
            title: self.title,
            description: self.description,
            image_url: self.image_url,
            source: self.source,
            tags: self.tags,
            create_date: 0,
            update_date: 0,
        }
    }
}

impl From<&Recipe> for RecipeEdit {
    fn from(recipe: &Recipe) -> Self {
        Self {
            slug: recipe.slug.clone(),
            title: recipe.title.clone(),
            description: recipe.description.clone(),
            image_url: recipe.image_url.clone(),
            source: recipe.source.clone(),
            tags: recipe.tags.clone(),
            ingredient_groups: render_ingredient_groups(&recipe.ingredient_groups),
            directions: render_directions(&recipe.directions),
        }
    }
}

pub fn parse_ingredient_groups(text: &str) -> Vec<IngredientGroup> {
    let mut groups: Vec<IngredientGroup> = Vec::new();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(heading) = line.strip_prefix('#') {
            groups.push(IngredientGroup {
                title: heading.trim().to_string(),
                ingredients: Vec::new(),
            });
            continue;
        }

        let item = line.strip_prefix('-').unwrap_or(line).trim();
        if item.is_empty() {
            continue;
        }
        if groups.is_empty() {
            groups.push(IngredientGroup::default());
        }
        if let Some(group) = groups.last_mut() {
            group.ingredients.push(Ingredient::from_text(item));
        }
    }

    groups
}

pub fn render_ingredient_groups(groups: &[IngredientGroup]) -> String {
    let mut output = String::new();
    for group in groups {
        output.push_str(&format!("# {}\n", group.title));
        for ingredient in &group.ingredients {
            output.push_str(&format!("- {}\n", ingredient.text));
        }
    }
    output
}

pub fn parse_directions(text: &str) -> Vec<DirectionStep> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(DirectionStep::new)
        .collect()
}

pub fn render_directions(steps: &[DirectionStep]) -> String {
    steps
        .iter()
        .map(|step| step.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const GROUPS: &str = "# Salsa\n- 1 lb tomatillos\n- 2 jalapeños\n# Meat\n- 3 lb pork shoulder\n";

    #[test]
    fn parses_groups_and_bullets() {
        let groups = parse_ingredient_groups(GROUPS);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].title, "Salsa");
        assert_eq!(groups[0].ingredients.len(), 2);
        assert_eq!(groups[0].ingredients[1].text, "2 jalapeños");
        assert_eq!(groups[1].title, "Meat");
        assert_eq!(groups[1].ingredients[0].text, "3 lb pork shoulder");
    }

    #[test]
    fn keeps_inner_hyphens() {
        let groups = parse_ingredient_groups("# Dairy\n- 1 cup half-and-half\n");
        assert_eq!(groups[0].ingredients[0].text, "1 cup half-and-half");
    }

    #[test]
    fn lines_before_a_heading_form_an_untitled_group() {
        let groups = parse_ingredient_groups("salt\n\n- pepper\n# Garnish\ncilantro");
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].title, "");
        assert_eq!(groups[0].ingredients.len(), 2);
        assert_eq!(groups[1].ingredients[0].text, "cilantro");
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(parse_ingredient_groups("").is_empty());
        assert!(parse_ingredient_groups("\n  \n").is_empty());
        assert!(parse_directions("").is_empty());
    }

    #[test]
    fn render_reproduces_normalized_text() {
        let groups = parse_ingredient_groups(GROUPS);
        assert_eq!(render_ingredient_groups(&groups), GROUPS);

        let steps = parse_directions("Roast.\r\n\r\nBlend.\nSimmer.");
        assert_eq!(steps.len(), 3);
        assert_eq!(render_directions(&steps), "Roast.\nBlend.\nSimmer.");
    }

    #[test]
    fn form_round_trips_through_recipe() {
        let form = RecipeEdit {
            slug: "chili-verde".into(),
            title: "Chili Verde".into(),
            description: "Green and porky".into(),
            image_url: "http://img/chili.png".into(),
            source: "Grandma".into(),
            tags: vec!["stew".into()],
            ingredient_groups: GROUPS.into(),
            directions: "Roast.\nBlend.".into(),
        };

        let recipe = form.clone().into_recipe();
        assert_eq!(recipe.ingredient_groups.len(), 2);
        assert_eq!(recipe.directions.len(), 2);
        assert_eq!(recipe.image_url, "http://img/chili.png");

        assert_eq!(RecipeEdit::from(&recipe), form);
    }

    #[test]
    fn blank_form_only_has_slug() {
        let form = RecipeEdit::blank("new-thing");
        assert_eq!(form.slug, "new-thing");
        assert!(form.into_recipe().title.is_empty());
    }
}
