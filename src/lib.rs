//! Core of the book/quiz application: score bookkeeping, persistence boundary,
//! layout state, catalog and route dispatch.
//!
//! Everything here is host-neutral so it builds and tests on native targets;
//! the browser front-end lives in `crates/bookquiz_web`.

pub mod catalog;
pub mod config;
pub mod error;
pub mod layout;
pub mod route;
pub mod score;
pub mod shell;
pub mod store;
pub mod viewport;

pub use catalog::{Book, BookEntry, BookId, Catalog, Question};
pub use config::{ResizePolicy, ShellConfig};
pub use error::{CatalogError, ConfigError, StoreError};
pub use layout::{ClickTarget, LayoutController, LayoutState};
pub use route::{dispatch, Route};
pub use score::{reconcile, BookProgress, ScoreRecord, ScoreValue};
pub use shell::{AppShell, MountedShell};
pub use store::{MemoryStore, ScoreStore};
pub use viewport::{classify, ResizeEvents, ResizeHub, Viewport};
