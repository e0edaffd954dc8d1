//! # Recipeapp Architecture
//!
//! Recipeapp is a **UI-agnostic recipe library**. The `recipebox` binary is one
//! client of it; a web layer would be another. Nothing in this crate writes to
//! stdout/stderr or decides how failures are shown to a person.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (recipebox CLI, web routes, ...)                    │
//! │  - Parses input, renders output, maps errors to responses   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Wires storage, store and search by construction          │
//! │  - Edit form mapping, search hook notification              │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                              │
//!                 ▼                              ▼
//! ┌───────────────────────────────┐  ┌─────────────────────────┐
//! │  Store (store.rs)             │◀─│  Search (search.rs)     │
//! │  - Owns the collection        │  │  - Stateless title scan │
//! │  - Slug uniqueness, dates     │  └─────────────────────────┘
//! │  - Snapshot on every mutation │
//! └───────────────────────────────┘
//!                 │
//!                 ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (storage/)                                         │
//! │  - JsonStorage: key normalization + serde                   │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Errors
//!
//! Every fallible operation returns [`error::Result`]. [`error::RecipeError`]
//! carries an [`error::ErrorKind`] so clients can branch on the kind of failure.
//! Clients that want a single serializable shape convert results into an
//! [`envelope::Envelope`].
//!
//! ## Testing Strategy
//!
//! 1. **Store and search**: thorough unit tests over `MemBackend`, including
//!    simulated write failures and concurrent writers.
//! 2. **Storage**: integration tests in `tests/` against real temp directories.
//! 3. **API**: tests that calls reach the right component and that the edit
//!    form maps correctly.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`store`]: The recipe collection and its commit protocol
//! - [`search`]: Title relevance search
//! - [`storage`]: Blob persistence and backends
//! - [`model`]: `Recipe` and its parts
//! - [`edit`]: Text edit form
//! - [`slug`]: Key normalization
//! - [`config`]: Configuration loading
//! - [`error`], [`envelope`]: Error and result types

pub mod api;
pub mod config;
pub mod edit;
pub mod envelope;
pub mod error;
pub mod model;
pub mod search;
pub mod slug;
pub mod storage;
pub mod store;
