//! # CLI Behavior
//!
//! This is **one possible client** for the recipe box. It is the only place
//! that knows about terminal I/O, exit codes, and output formatting.
//!
//! ## Output Modes
//!
//! By default every command prints human-readable text. With `--json` each
//! command prints one [`recipeapp::envelope::Envelope`] instead, on success and
//! on failure alike, so scripts only branch on `success`. Failures still exit
//! with status 1.
//!
//! ## Input
//!
//! `add`, `update` and `save` read JSON from a file argument; `-` reads stdin.
//! `edit` prints the form that `save` accepts, so the usual round trip is:
//!
//! ```text
//! recipebox edit chili > chili.json
//! $EDITOR chili.json
//! recipebox save chili chili.json
//! ```
//!
//! ## Module Structure
//!
//! - `commands`: context setup, dispatch, per-command handlers
//! - `render`: human-readable output
//! - `setup`: argument parsing via clap
//! - `styles`: terminal styling constants

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
