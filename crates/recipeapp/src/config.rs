//! # Configuration
//!
//! Recipe box configuration is managed by [`confique`], which handles layered
//! loading from TOML files, environment variables, and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `RECIPEBOX_DATA_DIR`, `RECIPEBOX_SEARCH_ORDER`.
//! 2. **Config file**: `recipebox.toml`, by default in the OS config directory.
//! 3. **Compiled defaults**: see below.
//!
//! Command-line overrides are applied by the client after loading.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data dir (`directories`) | Where the recipe snapshot lives |
//! | `search_order` | `ascending` | `ascending` or `descending` by score |

use crate::error::{RecipeError, Result};
use crate::search::{SortOrder, UnknownSortOrder};
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "recipebox.toml";

#[derive(Config, Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipesConfig {
    /// Directory holding the recipe snapshot.
    /// When absent, the OS data directory for recipebox is used.
    #[config(env = "RECIPEBOX_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Order of search results by score. When absent, ascending.
    #[config(env = "RECIPEBOX_SEARCH_ORDER", parse_env = parse_search_order)]
    pub search_order: Option<SortOrder>,
}

fn parse_search_order(value: &str) -> std::result::Result<SortOrder, UnknownSortOrder> {
    value.parse()
}

impl RecipesConfig {
    /// Load from the environment and an optional TOML file. A missing file is
    /// not an error.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = file {
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|e| RecipeError::InvalidArgument(format!("invalid configuration: {}", e)))
    }

    /// Where `recipebox.toml` is looked up when no explicit file is given.
    pub fn default_file() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
    }

    /// The data directory, falling back to the OS default.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => project_dirs()
                .map(|dirs| dirs.data_dir().to_path_buf())
                .ok_or_else(|| {
                    RecipeError::InvalidArgument(
                        "could not determine a data directory; set RECIPEBOX_DATA_DIR".to_string(),
                    )
                }),
        }
    }

    pub fn search_order(&self) -> SortOrder {
        self.search_order.unwrap_or_default()
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "recipebox", "recipebox")
}
