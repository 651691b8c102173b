//! The addon registry: binds catalog handlers to routes while keeping the
//! manifest's `resources`, `types` and `catalogs` in step with what has been
//! registered.
//!
//! Usage contract: register everything, then serve. [`Addon::serve`] consumes
//! the addon, so no route can be added once the listener is up. The manifest
//! itself sits behind a read/write lock and is read fresh on every request.

use std::{collections::HashSet, mem, sync::Arc};

use axum::{
    Router,
    extract::State,
    handler::Handler,
    routing::{MethodRouter, get},
};
use parking_lot::RwLock;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::{
    error::{RegistryError, ServeError},
    middleware::AddonHeadersLayer,
    routes::{
        self, AddonState, CATALOGS_PATH, MANIFEST_PATH, SharedManifest,
        catalog_path, type_listing_path,
    },
};
use stremio_model::{Catalog, Extra, Manifest, MediaType, ResourceKind};

/// Derive the URL identifier for a catalog name: lowercase, spaces become
/// hyphens. Nothing else is touched, and an empty name stays empty.
pub fn safe_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// A catalog to register: its type, display name and accepted extras.
#[derive(Debug, Clone)]
pub struct CatalogDefinition {
    pub media_type: MediaType,
    pub name: String,
    pub extra: Vec<Extra>,
}

impl CatalogDefinition {
    pub fn new(media_type: MediaType, name: impl Into<String>) -> Self {
        Self {
            media_type,
            name: name.into(),
            extra: Vec::new(),
        }
    }

    pub fn with_extra(mut self, extra: impl IntoIterator<Item = Extra>) -> Self {
        self.extra.extend(extra);
        self
    }
}

/// Builder for the addon's HTTP surface.
#[derive(Debug)]
pub struct Addon {
    state: AddonState,
    router: Router<AddonState>,
    bound: HashSet<String>,
    headers: AddonHeadersLayer,
}

impl Addon {
    pub fn new(manifest: Manifest) -> Self {
        Self {
            state: AddonState::new(Arc::new(RwLock::new(manifest))),
            router: Router::new(),
            bound: HashSet::new(),
            headers: AddonHeadersLayer::new(),
        }
    }

    /// Override the `Cache-Control` max-age applied to every response.
    pub fn with_cache_max_age(mut self, seconds: u64) -> Self {
        self.headers = AddonHeadersLayer::with_max_age(seconds);
        self
    }

    pub fn manifest(&self) -> Manifest {
        self.state.manifest()
    }

    pub fn manifest_handle(&self) -> SharedManifest {
        self.state.manifest_handle()
    }

    pub fn register_movie_catalog<H, T>(
        &mut self,
        name: &str,
        handler: H,
    ) -> Result<&mut Self, RegistryError>
    where
        H: Handler<T, AddonState>,
        T: 'static,
    {
        self.register_catalog(
            CatalogDefinition::new(MediaType::Movie, name),
            handler,
        )
    }

    pub fn register_series_catalog<H, T>(
        &mut self,
        name: &str,
        handler: H,
    ) -> Result<&mut Self, RegistryError>
    where
        H: Handler<T, AddonState>,
        T: 'static,
    {
        self.register_catalog(
            CatalogDefinition::new(MediaType::Series, name),
            handler,
        )
    }

    /// Register a catalog of any type and bind its handler at
    /// `/catalog/{type}/{safe-name}.json`.
    ///
    /// The first catalog declares the `catalog` resource and binds
    /// `/catalog`; the first catalog of each type declares that type and
    /// binds its listing route. Registering a second catalog whose name
    /// normalizes to an existing identifier of the same type fails without
    /// touching the manifest.
    pub fn register_catalog<H, T>(
        &mut self,
        definition: CatalogDefinition,
        handler: H,
    ) -> Result<&mut Self, RegistryError>
    where
        H: Handler<T, AddonState>,
        T: 'static,
    {
        let CatalogDefinition {
            media_type,
            name,
            extra,
        } = definition;
        let id = safe_name(&name);
        let path = catalog_path(media_type, &id);

        if is_capture_syntax(&path) {
            return Err(RegistryError::UnroutableName { name, id });
        }

        if self.bound.contains(&path) {
            return Err(RegistryError::DuplicateCatalog {
                media_type,
                id,
                path,
            });
        }

        {
            let handle = self.state.manifest_handle();
            let mut manifest = handle.write();
            manifest.declare_resource(ResourceKind::Catalog);
            manifest.push_catalog(
                Catalog::new(media_type, id.clone(), name).with_extra(extra),
            );
            manifest.declare_type(media_type);
        }

        // Listing routes are bound on first use even when the manifest was
        // built with the resource or type already declared.
        self.bind_once(CATALOGS_PATH, get(routes::catalogs_handler));
        self.bind_once(
            type_listing_path(media_type),
            get(move |State(state): State<AddonState>| {
                routes::typed_catalogs_handler(state, media_type)
            }),
        );

        self.bind_once(&path, get(handler));
        info!(%media_type, catalog = %id, %path, "registered catalog");

        Ok(self)
    }

    /// Bind `/manifest.json`. Safe to call more than once.
    pub fn register_manifest(&mut self) -> &mut Self {
        self.bind_once(MANIFEST_PATH, get(routes::manifest_handler));
        self
    }

    /// The complete application: manifest route, registered routes, a JSON
    /// 404 fallback, default headers and request tracing.
    ///
    /// The route table is snapshotted. A catalog registered afterwards shows
    /// up in this router's listings, which read the live manifest, but its
    /// own handler path is 404 here until `router()` is called again.
    pub fn router(&mut self) -> Router {
        self.register_manifest();
        self.router
            .clone()
            .fallback(routes::not_found_handler)
            .layer(self.headers.clone())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Listen on `0.0.0.0:{port}` until the listener fails.
    pub async fn serve(self, port: u16) -> Result<(), ServeError> {
        self.serve_on("0.0.0.0", port).await
    }

    pub async fn serve_on(self, host: &str, port: u16) -> Result<(), ServeError> {
        let addr = format!("{host}:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServeError::Bind {
                addr: addr.clone(),
                source,
            })?;
        self.serve_with_listener(listener).await
    }

    pub async fn serve_with_listener(
        mut self,
        listener: TcpListener,
    ) -> Result<(), ServeError> {
        let app = self.router();
        let port = listener.local_addr()?.port();

        info!("Addon running on http://localhost:{port}/manifest.json");
        info!("To add addon to stremio, go to stremio://localhost:{port}/manifest.json");

        axum::serve(listener, app).await?;
        Ok(())
    }

    fn bind_once(&mut self, path: &str, route: MethodRouter<AddonState>) -> bool {
        if !self.bound.insert(path.to_string()) {
            return false;
        }
        debug!(%path, "binding route");
        self.router = mem::take(&mut self.router).route(path, route);
        true
    }
}

/// Segments starting with `:` or `*` are rejected by the router outright.
/// Encoding takes care of `:`, braces and `/` in identifiers; a leading `*`
/// survives it.
fn is_capture_syntax(path: &str) -> bool {
    path.split('/')
        .any(|segment| segment.starts_with(':') || segment.starts_with('*'))
}
