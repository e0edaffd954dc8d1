//! Human-readable output. Every renderer returns a `String` so the output can be
//! checked in tests without capturing stdout.

use super::styles::{HEADING, MUTED, SCORE, SLUG, SUCCESS, TITLE};
use chrono::{DateTime, Utc};
use recipeapp::api::{SaveAction, Saved};
use recipeapp::model::{Ingredient, Recipe};
use recipeapp::search::SearchResult;
use std::fmt::Write;
use timeago::Formatter;

pub fn render_list(recipes: &[Recipe], now: DateTime<Utc>) -> String {
    if recipes.is_empty() {
        return "No recipes yet.\n".to_string();
    }

    let width = recipes.iter().map(|r| r.slug.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for recipe in recipes {
        let _ = writeln!(
            out,
            "{}  {}  {}",
            SLUG.apply_to(format!("{:<width$}", recipe.slug)),
            TITLE.apply_to(&recipe.title),
            MUTED.apply_to(format_time_ago(recipe.update_date, now)),
        );
    }
    out
}

pub fn render_recipe(recipe: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", TITLE.apply_to(&recipe.title));
    let _ = writeln!(out, "{}", MUTED.apply_to(&recipe.slug));

    if !recipe.description.trim().is_empty() {
        let _ = writeln!(out, "\n{}", recipe.description.trim());
    }
    if !recipe.tags.is_empty() {
        let _ = writeln!(out, "\nTags: {}", recipe.tags.join(", "));
    }
    if !recipe.source.is_empty() {
        let _ = writeln!(out, "Source: {}", recipe.source);
    }
    if !recipe.image_url.is_empty() {
        let _ = writeln!(out, "Image: {}", recipe.image_url);
    }

    if !recipe.ingredient_groups.is_empty() {
        let _ = writeln!(out, "\n{}", HEADING.apply_to("Ingredients"));
        for group in &recipe.ingredient_groups {
            if !group.title.is_empty() {
                let _ = writeln!(out, "  {}", TITLE.apply_to(&group.title));
            }
            for ingredient in &group.ingredients {
                let _ = writeln!(out, "  - {}", ingredient_line(ingredient));
            }
        }
    }

    if !recipe.directions.is_empty() {
        let _ = writeln!(out, "\n{}", HEADING.apply_to("Directions"));
        for (i, step) in recipe.directions.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, step.text);
        }
    }

    out
}

pub fn render_search(term: &str, results: &[SearchResult]) -> String {
    if results.is_empty() {
        return format!("No recipes match '{}'.\n", term);
    }

    let mut out = String::new();
    for result in results {
        let _ = writeln!(
            out,
            "{} {}  {}",
            SCORE.apply_to(format!("[{}]", result.score)),
            SLUG.apply_to(&result.recipe.slug),
            TITLE.apply_to(&result.recipe.title),
        );
        if let Some(excerpt) = &result.excerpt {
            let _ = writeln!(out, "    {}", MUTED.apply_to(excerpt));
        }
    }
    out
}

/// Plain confirmation for a save, without styling so it can also travel in a
/// JSON envelope.
pub fn saved_message(saved: &Saved) -> String {
    let verb = match saved.action {
        SaveAction::Created => "created",
        SaveAction::Updated => "updated",
    };
    done_message(verb, &saved.recipe)
}

pub fn done_message(verb: &str, recipe: &Recipe) -> String {
    format!("Recipe {} ({}): {}", verb, recipe.slug, recipe.title)
}

pub fn render_done(message: &str) -> String {
    format!("{}\n", SUCCESS.apply_to(message))
}

/// The structured parts of an ingredient win only when there is no free text.
fn ingredient_line(ingredient: &Ingredient) -> String {
    if !ingredient.text.trim().is_empty() {
        return ingredient.text.trim().to_string();
    }

    let quantity = ingredient.quantity.map(format_quantity).unwrap_or_default();
    let mut line = [quantity.as_str(), &ingredient.unit, &ingredient.name]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if !ingredient.prep.is_empty() {
        line.push_str(", ");
        line.push_str(&ingredient.prep);
    }
    line
}

fn format_quantity(q: f64) -> String {
    if q.fract() == 0.0 {
        format!("{}", q as i64)
    } else {
        format!("{}", q)
    }
}

fn format_time_ago(millis: i64, now: DateTime<Utc>) -> String {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(ts) if millis > 0 => {
            let elapsed = now.signed_duration_since(ts).to_std().unwrap_or_default();
            Formatter::new().convert(elapsed)
        }
        _ => "never".to_string(),
    }
}
