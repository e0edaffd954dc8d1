//! # API Facade
//!
//! The API layer is a **thin facade** over the store and the search index. It is
//! the single entry point for UI clients (the bundled CLI, a web layer, ...).
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Wires** storage, store and search together by explicit construction
//! - **Dispatches** each call to the component that owns it
//! - **Notifies** the search index after every successful mutation
//! - **Maps** the edit form to and from recipes
//!
//! ## What the API Does NOT Do
//!
//! - **Validation or invariants**: those live in [`RecipeStore`]
//! - **I/O towards the user**: no stdout, stderr, or formatting
//! - **Process control**: never exits, never panics on bad input
//!
//! ## Generic Over StorageBackend
//!
//! `RecipesApi<B: StorageBackend>` runs on disk in production
//! (`RecipesApi<FsBackend>`) and in memory in tests (`RecipesApi<MemBackend>`).

use crate::config::RecipesConfig;
use crate::edit::RecipeEdit;
use crate::error::Result;
use crate::model::Recipe;
use crate::search::{ScanSearch, SearchIndex, SearchResult, SortOrder};
use crate::storage::backend::StorageBackend;
use crate::storage::fs_backend::FsBackend;
use crate::storage::JsonStorage;
use crate::store::{RecipeStore, RECIPES_KEY};
pub use crate::store::SaveAction;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Serialize)]
pub struct Saved {
    pub action: SaveAction,
    pub recipe: Recipe,
}

pub struct RecipesApi<B: StorageBackend> {
    store: Arc<RecipeStore<B>>,
    search: ScanSearch<B>,
}

impl RecipesApi<FsBackend> {
    /// Open the recipe box described by `config`: create the data directory,
    /// load the snapshot, and set up search.
    pub fn open(config: &RecipesConfig) -> Result<Self> {
        let data_dir = config.data_dir()?;
        info!(data_dir = %data_dir.display(), "opening recipe box");
        Self::with_storage(JsonStorage::on_disk(data_dir), config.search_order())
    }
}

impl<B: StorageBackend> RecipesApi<B> {
    pub fn with_storage(storage: JsonStorage<B>, order: SortOrder) -> Result<Self> {
        storage.ensure_directories()?;
        let store = Arc::new(RecipeStore::initialize(storage));
        let search = ScanSearch::new(Arc::clone(&store)).with_order(order);
        Ok(Self { store, search })
    }

    /// Shared handle to the store, for clients that read it directly.
    pub fn store(&self) -> Arc<RecipeStore<B>> {
        Arc::clone(&self.store)
    }

    /// The file holding the snapshot.
    pub fn snapshot_path(&self) -> Result<PathBuf> {
        self.store.storage().path_for(RECIPES_KEY)
    }

    pub fn list(&self) -> Result<Vec<Recipe>> {
        self.store.list_all()
    }

    pub fn get(&self, slug: &str) -> Result<Recipe> {
        self.store.get(slug)
    }

    pub fn exists(&self, slug: &str) -> Result<bool> {
        self.store.exists(slug)
    }

    pub fn add(&self, recipe: Recipe) -> Result<Recipe> {
        let added = self.store.add(recipe)?;
        self.notify(self.search.index_add(&added), &added.slug);
        Ok(added)
    }

    pub fn update(&self, recipe: Recipe) -> Result<Recipe> {
        let updated = self.store.update(recipe)?;
        self.notify(self.search.index_update(&updated), &updated.slug);
        Ok(updated)
    }

    pub fn delete(&self, slug: &str) -> Result<Recipe> {
        let removed = self.store.delete(slug)?;
        self.notify(self.search.index_remove(&removed), &removed.slug);
        Ok(removed)
    }

    pub fn search(&self, term: &str) -> Result<Vec<SearchResult>> {
        self.search.search(term)
    }

    /// The edit form for `slug`: the stored recipe if there is one, a blank
    /// form carrying the slug otherwise.
    pub fn edit_form(&self, slug: &str) -> Result<RecipeEdit> {
        if self.store.exists(slug)? {
            Ok(RecipeEdit::from(&self.store.get(slug)?))
        } else {
            Ok(RecipeEdit::blank(slug))
        }
    }

    /// Create or replace the recipe at `slug` from an edit form. The slug
    /// argument wins over whatever slug the form carries.
    pub fn save(&self, slug: &str, mut form: RecipeEdit) -> Result<Saved> {
        form.slug = slug.to_string();
        let (action, recipe) = self.store.upsert(form.into_recipe())?;

        let hook = match action {
            SaveAction::Created => self.search.index_add(&recipe),
            SaveAction::Updated => self.search.index_update(&recipe),
        };
        self.notify(hook, &recipe.slug);
        Ok(Saved { action, recipe })
    }

    fn notify(&self, hook: Result<()>, slug: &str) {
        // The mutation is already committed; a lagging index is logged, not fatal.
        if let Err(e) = hook {
            warn!(slug, error = %e, "search index hook failed");
        }
    }
}
