//! Data model for Stremio addons: the manifest, its catalogs, and the
//! payloads catalog handlers return.
#![allow(missing_docs)]

pub mod catalog;
pub mod error;
pub mod manifest;
pub mod media_type;
pub mod prelude;
pub mod resource;

// Intentionally curated re-exports for downstream consumers.
pub use catalog::{
    Catalog, CatalogResponse, Extra, Meta, movie_catalog, series_catalog,
};
pub use error::{ModelError, Result as ModelResult};
pub use manifest::{
    BehaviorHints, ConfigFieldKind, ConfigOption, Manifest, ManifestBuilder,
};
pub use media_type::MediaType;
pub use resource::{Resource, ResourceDescriptor, ResourceKind};
