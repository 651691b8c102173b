//! Handler-facing snapshot of the model surface.
//! Prefer importing from this module when writing catalog handlers.

pub use super::catalog::{
    Catalog, CatalogResponse, Extra, Meta, movie_catalog, series_catalog,
};
pub use super::manifest::{BehaviorHints, Manifest};
pub use super::media_type::MediaType;
