//! Built-in handlers: the manifest and the catalog listings.
//!
//! Each handler reads the shared manifest at request time, so catalogs
//! registered after a route was bound show up in later responses.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderValue, header},
    response::{IntoResponse, Response},
};
use parking_lot::RwLock;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use tracing::error;

use crate::error::{AppError, AppResult};
use stremio_model::{Manifest, MediaType};

pub const MANIFEST_PATH: &str = "/manifest.json";
pub const CATALOGS_PATH: &str = "/catalog";

pub type SharedManifest = Arc<RwLock<Manifest>>;

/// State handed to every route, including caller-supplied catalog handlers.
#[derive(Clone, Debug)]
pub struct AddonState {
    manifest: SharedManifest,
}

impl AddonState {
    pub fn new(manifest: SharedManifest) -> Self {
        Self { manifest }
    }

    pub fn manifest_handle(&self) -> SharedManifest {
        Arc::clone(&self.manifest)
    }

    /// Clone of the manifest as it is right now.
    pub fn manifest(&self) -> Manifest {
        self.manifest.read().clone()
    }

    fn with_manifest<T>(&self, f: impl FnOnce(&Manifest) -> T) -> T {
        let guard = self.manifest.read();
        f(&guard)
    }
}

/// Path of the per-type catalog listing.
///
/// Series keeps its trailing slash; the other types do not. Clients in the
/// wild request these exact paths.
pub const fn type_listing_path(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Movie => "/catalog/movie",
        MediaType::Series => "/catalog/series/",
        MediaType::Channel => "/catalog/channel",
        MediaType::Tv => "/catalog/tv",
    }
}

/// Characters left as-is in a catalog id segment; matches what
/// `encodeURIComponent` leaves alone.
const CATALOG_ID_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Path of a single catalog's handler, e.g. `/catalog/movie/top-movies.json`.
///
/// The router matches the request path before decoding, so the identifier
/// is bound in its percent-encoded form: `"what?"` is served at
/// `/catalog/movie/what%3F.json`.
pub fn catalog_path(media_type: MediaType, safe_name: &str) -> String {
    format!(
        "/catalog/{}/{}.json",
        media_type.as_str(),
        utf8_percent_encode(safe_name, CATALOG_ID_ENCODE)
    )
}

pub async fn manifest_handler(
    State(state): State<AddonState>,
) -> AppResult<Response> {
    state.with_manifest(|manifest| {
        json_response(manifest, "failed to encode manifest")
    })
}

pub async fn catalogs_handler(
    State(state): State<AddonState>,
) -> AppResult<Response> {
    state.with_manifest(|manifest| {
        json_response(&manifest.catalogs, "failed to encode catalogs")
    })
}

pub async fn typed_catalogs_handler(
    state: AddonState,
    media_type: MediaType,
) -> AppResult<Response> {
    let catalogs = state.with_manifest(|manifest| manifest.catalogs_of(media_type));
    json_response(&catalogs, "failed to encode catalogs")
}

pub async fn not_found_handler() -> AppError {
    AppError::not_found("not found")
}

fn json_response<T>(value: &T, failure: &'static str) -> AppResult<Response>
where
    T: Serialize + ?Sized,
{
    let body = serde_json::to_vec(value).map_err(|err| {
        error!(error = %err, "{failure}");
        AppError::internal(failure)
    })?;

    Ok((
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )],
        body,
    )
        .into_response())
}
