//! # Recipebox CLI Architecture
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/recipeapp/`: core library with UI-agnostic storage, store and search
//! - `crates/recipebox/`: this CLI tool, depends on the `recipeapp` library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/recipebox/src/cli/)                      │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal rendering (render.rs)                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/recipeapp/src/api.rs)                    │
//! │  - Opens storage from config                                │
//! │  - Keeps the search index informed of mutations             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Store + Search (crates/recipeapp/src/store.rs, search.rs)  │
//! │  - Pure business logic + data access                        │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Approach
//!
//! - **Library**: unit tests next to the code, plus filesystem tests in
//!   `crates/recipeapp/tests/`.
//! - **CLI**: parsing and rendering are unit tested in place; end-to-end
//!   tests in `tests/` run the real binary against a temporary data dir.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
