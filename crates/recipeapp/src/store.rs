//! # Recipe Store
//!
//! [`RecipeStore`] is the only owner of the recipe collection. It loads the
//! snapshot once at construction, serves reads from memory, and writes the whole
//! collection back through [`JsonStorage`] on every mutation.
//!
//! ## Commit Protocol
//!
//! Every mutation follows the same steps:
//!
//! 1. Take the writer lock. Mutations never interleave.
//! 2. Validate against the committed collection.
//! 3. Build the next collection as a copy.
//! 4. Persist the copy as the snapshot.
//! 5. Only if the write succeeded, swap the copy in as the committed collection.
//!
//! A failed write therefore leaves memory exactly as it was, and memory never
//! runs ahead of disk.
//!
//! ## Concurrency
//!
//! The store is `Send + Sync` and meant to be shared behind an `Arc`. Readers
//! take the read lock just long enough to clone what they return, so they see
//! either the collection before a mutation or the one after, never a mix.
//! Writers hold the read/write lock only for the final swap, not during I/O.
//!
//! ## Scaling
//!
//! Lookups are linear scans and every mutation rewrites the full snapshot.
//! Both are O(n), which is fine for a collection that fits in a single file.

use crate::error::{RecipeError, Result};
use crate::model::{now_millis, Recipe};
use crate::storage::backend::StorageBackend;
use crate::storage::JsonStorage;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Key the collection is persisted under.
pub const RECIPES_KEY: &str = "recipes";

/// What [`RecipeStore::upsert`] did with the recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveAction {
    Created,
    Updated,
}

pub struct RecipeStore<B: StorageBackend> {
    storage: JsonStorage<B>,
    recipes: RwLock<Vec<Recipe>>,
    writer: Mutex<()>,
}

impl<B: StorageBackend> RecipeStore<B> {
    /// Build the store and load the persisted collection.
    ///
    /// A missing snapshot is a normal first run and yields an empty store. A
    /// snapshot that cannot be read or parsed also yields an empty store; the
    /// failure is logged, not returned.
    pub fn initialize(storage: JsonStorage<B>) -> Self {
        let recipes = match storage.read::<Vec<Recipe>>(RECIPES_KEY) {
            Ok(recipes) => {
                info!(count = recipes.len(), "loaded recipe snapshot");
                recipes
            }
            Err(RecipeError::NotFound(_)) => {
                info!("no recipe snapshot yet, starting empty");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "could not load recipe snapshot, starting empty");
                Vec::new()
            }
        };

        Self {
            storage,
            recipes: RwLock::new(recipes),
            writer: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &JsonStorage<B> {
        &self.storage
    }

    /// Copies of every recipe, in insertion order.
    pub fn list_all(&self) -> Result<Vec<Recipe>> {
        Ok(self.recipes.read().clone())
    }

    pub fn get(&self, slug: &str) -> Result<Recipe> {
        debug!(slug, "get recipe");
        self.recipes
            .read()
            .iter()
            .find(|r| r.slug == slug)
            .cloned()
            .ok_or_else(|| not_found(slug))
    }

    pub fn exists(&self, slug: &str) -> Result<bool> {
        if slug.is_empty() {
            return Err(RecipeError::InvalidArgument("No slug provided".to_string()));
        }
        Ok(self.recipes.read().iter().any(|r| r.slug == slug))
    }

    pub fn len(&self) -> usize {
        self.recipes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.read().is_empty()
    }

    /// Add a new recipe. Dates are assigned here; whatever the caller set is
    /// overwritten. Returns the recipe as stored.
    pub fn add(&self, recipe: Recipe) -> Result<Recipe> {
        let _guard = self.writer.lock();
        let mut next = self.recipes.read().clone();
        let added = insert_into(&mut next, recipe)?;

        self.commit(next)?;
        info!(slug = %added.slug, "added recipe");
        Ok(added)
    }

    /// Replace an existing recipe wholesale, keeping its position and its
    /// original `createDate`. Returns the recipe as stored.
    pub fn update(&self, recipe: Recipe) -> Result<Recipe> {
        let _guard = self.writer.lock();
        let mut next = self.recipes.read().clone();
        let updated = replace_in(&mut next, recipe)?;

        self.commit(next)?;
        info!(slug = %updated.slug, "updated recipe");
        Ok(updated)
    }

    /// Update the recipe if its slug is taken, add it otherwise. The choice is
    /// made under the writer lock, so concurrent upserts of a new slug never
    /// conflict: one creates, the rest update.
    pub fn upsert(&self, recipe: Recipe) -> Result<(SaveAction, Recipe)> {
        let _guard = self.writer.lock();
        let mut next = self.recipes.read().clone();
        let (action, stored) = if next.iter().any(|r| r.slug == recipe.slug) {
            (SaveAction::Updated, replace_in(&mut next, recipe)?)
        } else {
            (SaveAction::Created, insert_into(&mut next, recipe)?)
        };

        self.commit(next)?;
        info!(slug = %stored.slug, ?action, "upserted recipe");
        Ok((action, stored))
    }

    /// Remove a recipe. Returns the removed recipe.
    pub fn delete(&self, slug: &str) -> Result<Recipe> {
        let _guard = self.writer.lock();
        let mut next = self.recipes.read().clone();
        let index = next
            .iter()
            .position(|r| r.slug == slug)
            .ok_or_else(|| not_found(slug))?;
        let removed = next.remove(index);

        self.commit(next)?;
        info!(slug, "deleted recipe");
        Ok(removed)
    }

    /// Persist `next`, then make it the committed collection.
    /// Callers must hold the writer lock.
    fn commit(&self, next: Vec<Recipe>) -> Result<()> {
        if let Err(e) = self.storage.store(RECIPES_KEY, &next) {
            warn!(error = %e, "recipe snapshot write failed, mutation discarded");
            return Err(e);
        }
        *self.recipes.write() = next;
        Ok(())
    }
}

fn insert_into(next: &mut Vec<Recipe>, mut recipe: Recipe) -> Result<Recipe> {
    if recipe.slug.is_empty() {
        return Err(RecipeError::InvalidArgument(
            "Recipe slug must not be empty".to_string(),
        ));
    }
    require_title(&recipe)?;
    if next.iter().any(|r| r.slug == recipe.slug) {
        return Err(RecipeError::Conflict(format!(
            "Recipe '{}' already exists",
            recipe.slug
        )));
    }

    let now = now_millis();
    recipe.create_date = now;
    recipe.update_date = now;
    next.push(recipe.clone());
    Ok(recipe)
}

fn replace_in(next: &mut [Recipe], mut recipe: Recipe) -> Result<Recipe> {
    let index = next
        .iter()
        .position(|r| r.slug == recipe.slug)
        .ok_or_else(|| not_found(&recipe.slug))?;
    require_title(&recipe)?;

    let created = next[index].create_date;
    recipe.create_date = created;
    recipe.update_date = now_millis().max(created);
    next[index] = recipe.clone();
    Ok(recipe)
}

fn not_found(slug: &str) -> RecipeError {
    RecipeError::NotFound(format!("Recipe '{}' not found", slug))
}

fn require_title(recipe: &Recipe) -> Result<()> {
    if recipe.title.trim().is_empty() {
        return Err(RecipeError::InvalidArgument(format!(
            "Recipe '{}' needs a title",
            recipe.slug
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::{DirectionStep, Ingredient, IngredientGroup};
    use crate::storage::mem_backend::MemBackend;
    use crate::storage::MemStorage;
    use std::sync::Arc;
    use std::thread;

    fn make_store() -> RecipeStore<MemBackend> {
        RecipeStore::initialize(MemStorage::in_memory())
    }

    fn chili() -> Recipe {
        let mut recipe = Recipe::new("chili-verde", "Chili Verde")
            .with_description("Pork shoulder braised in tomatillo salsa")
            .with_tags(["pork", "stew"]);
        recipe.ingredient_groups = vec![IngredientGroup {
            title: "Salsa".into(),
            ingredients: vec![Ingredient::from_text("1 lb tomatillos")],
        }];
        recipe.directions = vec![DirectionStep::new("Roast the tomatillos.")];
        recipe
    }

    // --- Initialization ---

    #[test]
    fn initialize_without_snapshot_starts_empty() {
        let store = make_store();
        assert!(store.is_empty());
        assert!(store.list_all().unwrap().is_empty());
    }

    #[test]
    fn initialize_with_corrupt_snapshot_starts_empty() {
        let storage = MemStorage::in_memory();
        storage.backend().insert_raw(RECIPES_KEY, "[{ broken");
        let store = RecipeStore::initialize(storage);
        assert!(store.is_empty());
    }

    #[test]
    fn initialize_with_unreadable_snapshot_starts_empty() {
        let storage = MemStorage::in_memory();
        storage.store(RECIPES_KEY, &vec![chili()]).unwrap();
        storage.backend().set_simulate_read_error(true);
        let store = RecipeStore::initialize(storage);
        assert!(store.is_empty());
    }

    // --- Add ---

    #[test]
    fn add_assigns_dates_and_get_returns_it() {
        let store = make_store();
        let before = now_millis();
        store.add(chili()).unwrap();
        let after = now_millis();

        let stored = store.get("chili-verde").unwrap();
        assert_eq!(stored.create_date, stored.update_date);
        assert!(stored.create_date >= before && stored.create_date <= after);

        let mut expected = chili();
        expected.create_date = stored.create_date;
        expected.update_date = stored.update_date;
        assert_eq!(stored, expected);
    }

    #[test]
    fn add_overwrites_caller_supplied_dates() {
        let store = make_store();
        let mut recipe = chili();
        recipe.create_date = 1;
        recipe.update_date = 2;
        let stored = store.add(recipe).unwrap();
        assert!(stored.create_date > 2);
        assert_eq!(stored.create_date, stored.update_date);
    }

    #[test]
    fn add_duplicate_slug_conflicts_and_keeps_first() {
        let store = make_store();
        let first = store.add(chili()).unwrap();

        let mut second = chili();
        second.title = "Different".into();
        let err = store.add(second).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], first);
    }

    #[test]
    fn add_empty_slug_is_invalid() {
        let store = make_store();
        let err = store.add(Recipe::new("", "Nameless")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(store.is_empty());
    }

    #[test]
    fn add_empty_title_is_invalid() {
        let store = make_store();
        let err = store.add(Recipe::new("soup", "  ")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn slugs_are_case_sensitive() {
        let store = make_store();
        store.add(Recipe::new("Soup", "Soup")).unwrap();
        store.add(Recipe::new("soup", "Other soup")).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.get("Soup").unwrap().title, "Soup");
        assert_eq!(store.get("SOUP").unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn add_keeps_duplicate_tags() {
        let store = make_store();
        let stored = store
            .add(Recipe::new("bread", "Bread").with_tags(["easy", "easy"]))
            .unwrap();
        assert_eq!(stored.tags, vec!["easy", "easy"]);
    }

    // --- Update ---

    #[test]
    fn update_missing_slug_is_not_found_and_leaves_collection() {
        let store = make_store();
        store.add(chili()).unwrap();
        let snapshot = store.list_all().unwrap();

        let err = store.update(Recipe::new("ghost", "Ghost")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(store.list_all().unwrap(), snapshot);
    }

    #[test]
    fn update_keeps_position_and_create_date() {
        let store = make_store();
        store.add(Recipe::new("a", "A")).unwrap();
        let original = store.add(chili()).unwrap();
        store.add(Recipe::new("c", "C")).unwrap();

        let mut replacement = chili();
        replacement.title = "Chili Verde, Revised".into();
        replacement.create_date = 0;
        let stored = store.update(replacement).unwrap();

        assert_eq!(stored.create_date, original.create_date);
        assert!(stored.update_date >= original.update_date);
        let slugs: Vec<String> = store
            .list_all()
            .unwrap()
            .into_iter()
            .map(|r| r.slug)
            .collect();
        assert_eq!(slugs, vec!["a", "chili-verde", "c"]);
        assert_eq!(store.get("chili-verde").unwrap().title, "Chili Verde, Revised");
    }

    #[test]
    fn update_is_whole_record_replace() {
        let store = make_store();
        store.add(chili()).unwrap();
        store.update(Recipe::new("chili-verde", "Bare")).unwrap();

        let stored = store.get("chili-verde").unwrap();
        assert!(stored.tags.is_empty());
        assert!(stored.directions.is_empty());
        assert_eq!(stored.description, "");
    }

    // --- Delete ---

    #[test]
    fn delete_then_get_and_delete_again_are_not_found() {
        let store = make_store();
        store.add(chili()).unwrap();
        store.delete("chili-verde").unwrap();

        assert_eq!(
            store.get("chili-verde").unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            store.delete("chili-verde").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    // --- Reads ---

    #[test]
    fn exists_checks_presence() {
        let store = make_store();
        store.add(chili()).unwrap();
        assert!(store.exists("chili-verde").unwrap());
        assert!(!store.exists("pozole").unwrap());
        assert_eq!(
            store.exists("").unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn list_all_returns_detached_copies() {
        let store = make_store();
        store.add(chili()).unwrap();

        let mut copies = store.list_all().unwrap();
        copies[0].title = "Tampered".into();
        copies.clear();

        assert_eq!(store.get("chili-verde").unwrap().title, "Chili Verde");
    }

    // --- Persistence ---

    #[test]
    fn every_mutation_writes_a_snapshot() {
        let store = make_store();
        store.add(chili()).unwrap();
        store.update(chili()).unwrap();
        store.delete("chili-verde").unwrap();
        assert_eq!(store.storage().backend().write_count(), 3);
        assert_eq!(store.storage().backend().raw(RECIPES_KEY).unwrap(), "[]");
    }

    #[test]
    fn failed_persist_leaves_memory_unchanged() {
        let store = make_store();
        store.add(chili()).unwrap();
        let snapshot = store.list_all().unwrap();

        store.storage().backend().set_simulate_write_error(true);

        let err = store.add(Recipe::new("pozole", "Pozole")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoError);
        let mut changed = chili();
        changed.title = "Changed".into();
        assert_eq!(store.update(changed).unwrap_err().kind(), ErrorKind::IoError);
        assert_eq!(
            store.delete("chili-verde").unwrap_err().kind(),
            ErrorKind::IoError
        );

        assert_eq!(store.list_all().unwrap(), snapshot);

        store.storage().backend().set_simulate_write_error(false);
        store.add(Recipe::new("pozole", "Pozole")).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn reload_from_snapshot_is_element_wise_equal() {
        let store = make_store();
        store.add(chili()).unwrap();
        store.add(Recipe::new("pozole", "Pozole Rojo")).unwrap();
        store.add(Recipe::new("atole", "Atole")).unwrap();
        let original = store.list_all().unwrap();

        let raw = store.storage().backend().raw(RECIPES_KEY).unwrap();
        let storage = MemStorage::in_memory();
        storage.backend().insert_raw(RECIPES_KEY, &raw);
        let reloaded = RecipeStore::initialize(storage);

        assert_eq!(reloaded.list_all().unwrap(), original);
    }

    // --- Concurrency ---

    #[test]
    fn concurrent_adds_of_one_slug_admit_exactly_one() {
        let store = Arc::new(make_store());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.add(Recipe::new("race", format!("Racer {i}"))))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let ok = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(RecipeError::Conflict(_))))
            .count();

        assert_eq!(ok, 1);
        assert_eq!(conflicts, 7);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn upsert_creates_then_updates() {
        let store = make_store();

        let (action, created) = store.upsert(chili()).unwrap();
        assert_eq!(action, SaveAction::Created);

        let mut edited = chili();
        edited.title = "Chili Verde II".into();
        let (action, updated) = store.upsert(edited).unwrap();
        assert_eq!(action, SaveAction::Updated);
        assert_eq!(updated.create_date, created.create_date);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("chili-verde").unwrap().title, "Chili Verde II");
    }

    #[test]
    fn upsert_validates_like_add_and_update() {
        let store = make_store();
        let err = store.upsert(Recipe::new("", "No slug")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        store.add(chili()).unwrap();
        let err = store.upsert(Recipe::new("chili-verde", " ")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(store.get("chili-verde").unwrap().title, "Chili Verde");
    }

    #[test]
    fn concurrent_upserts_of_one_slug_never_conflict() {
        for _ in 0..50 {
            let store = Arc::new(make_store());
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let store = Arc::clone(&store);
                    thread::spawn(move || store.upsert(Recipe::new("soup", format!("Soup {i}"))))
                })
                .collect();

            let actions: Vec<SaveAction> = handles
                .into_iter()
                .map(|h| h.join().unwrap().unwrap().0)
                .collect();
            let created = actions
                .iter()
                .filter(|a| **a == SaveAction::Created)
                .count();

            assert_eq!(created, 1);
            assert_eq!(actions.len(), 4);
            assert_eq!(store.len(), 1);
        }
    }

    #[test]
    fn concurrent_distinct_adds_are_all_persisted() {
        let store = Arc::new(make_store());
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.add(Recipe::new(format!("r{i}"), "Recipe")))
            })
            .collect();
        for h in handles {
            h.join().unwrap().unwrap();
        }

        let raw = store.storage().backend().raw(RECIPES_KEY).unwrap();
        let persisted: Vec<Recipe> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted.len(), 16);
        assert_eq!(persisted, store.list_all().unwrap());
    }
}
