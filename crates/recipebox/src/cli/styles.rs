//! Terminal styles shared by the renderers.
//!
//! `console` drops the escape codes when stdout is not a terminal, so piped
//! output and tests see plain text.

use console::Style;
use once_cell::sync::Lazy;

pub static TITLE: Lazy<Style> = Lazy::new(|| Style::new().bold());
pub static SLUG: Lazy<Style> = Lazy::new(|| Style::new().cyan());
pub static MUTED: Lazy<Style> = Lazy::new(|| Style::new().dim());
pub static HEADING: Lazy<Style> = Lazy::new(|| Style::new().yellow().bold());
pub static SCORE: Lazy<Style> = Lazy::new(|| Style::new().magenta());
pub static SUCCESS: Lazy<Style> = Lazy::new(|| Style::new().green());
