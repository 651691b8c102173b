//! # stremio-addon
//!
//! Builder for Stremio addon HTTP endpoints.
//!
//! Build a [`Manifest`](stremio_model::Manifest), hand it to [`Addon::new`],
//! register catalog handlers, then [`Addon::serve`]. Each registration keeps
//! the manifest's `resources`, `types` and `catalogs` consistent with the
//! routes that exist:
//!
//! | Route | Served by |
//! |---|---|
//! | `GET /manifest.json` | the manifest |
//! | `GET /catalog` | every registered catalog |
//! | `GET /catalog/movie`, `GET /catalog/series/` | catalogs of one type |
//! | `GET /catalog/{type}/{safe-name}.json` | the caller's handler |
//!
//! The server is built on Axum; default headers come from
//! [`middleware::AddonHeadersLayer`].

pub mod addon;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;

pub use addon::{Addon, CatalogDefinition, safe_name};
pub use error::{AppError, AppResult, RegistryError, ServeError};
pub use routes::{AddonState, SharedManifest};

/// Re-export of the model crate so handlers need a single dependency.
pub use stremio_model as model;
