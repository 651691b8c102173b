mod support;

use axum::{Json, extract::State, http::StatusCode};
use serde_json::json;
use stremio_addon::{
    Addon, AddonState, CatalogDefinition, RegistryError,
    model::{
        CatalogResponse, Extra, Manifest, MediaType, Meta, ResourceKind,
        movie_catalog,
    },
};

use support::{catalog_ids, empty_catalog, get, top_movies, top_series};

fn example_manifest() -> Manifest {
    Manifest::builder()
        .with_id("org.stremio.example")
        .with_name("Example Addon")
        .with_description("An example Stremio addon")
        .with_version("1.0.0")
        .build()
}

#[tokio::test]
async fn top_movies_end_to_end() {
    let mut addon = Addon::new(example_manifest());
    addon.register_movie_catalog("Top Movies", top_movies).unwrap();
    let router = addon.router();

    let response = get(&router, "/catalog/movie/top-movies.json").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.text(),
        r#"{"metas":[{"type":"movie","id":"tt0468569","name":"The Dark Knight"},{"type":"movie","id":"tt1375666","name":"Inception"}]}"#
    );
}

#[tokio::test]
async fn manifest_without_optional_fields() {
    let mut addon = Addon::new(Manifest::default());
    let router = addon.router();

    let response = get(&router, "/manifest.json").await;
    assert_eq!(response.status, StatusCode::OK);

    let raw = response.text();
    for key in [
        "idPrefixes",
        "addonCatalogs",
        "config",
        "background",
        "logo",
        "contactEmail",
        "behaviorHints",
    ] {
        assert!(!raw.contains(key), "{key} present in {raw}");
    }

    let manifest: Manifest = serde_json::from_str(raw).unwrap();
    assert_eq!(manifest, Manifest::default());

    let value = response.json();
    assert_eq!(value["resources"], json!([]));
    assert_eq!(value["types"], json!([]));
    assert_eq!(value["catalogs"], json!([]));
}

#[tokio::test]
async fn types_are_declared_once_per_media_type() {
    let mut addon = Addon::new(example_manifest());
    addon
        .register_movie_catalog("Top Movies", top_movies)
        .unwrap()
        .register_movie_catalog("Recommended Movies", empty_catalog)
        .unwrap()
        .register_series_catalog("Top Series", top_series)
        .unwrap()
        .register_movie_catalog("Classics", empty_catalog)
        .unwrap();
    let router = addon.router();

    let manifest = get(&router, "/manifest.json").await.json();

    assert_eq!(manifest["types"], json!(["movie", "series"]));
    assert_eq!(manifest["resources"], json!(["catalog"]));
    assert_eq!(manifest["catalogs"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn catalog_list_follows_registration_order() {
    let mut addon = Addon::new(example_manifest());
    addon
        .register_series_catalog("Top Series", top_series)
        .unwrap()
        .register_movie_catalog("Top Movies", top_movies)
        .unwrap()
        .register_movie_catalog("Recommended Movies", empty_catalog)
        .unwrap();
    let router = addon.router();

    let response = get(&router, "/catalog").await;
    assert_eq!(response.status, StatusCode::OK);

    let catalogs = response.json();
    assert_eq!(
        catalog_ids(&catalogs),
        vec!["top-series", "top-movies", "recommended-movies"]
    );
    assert_eq!(
        catalogs[0],
        json!({"type": "series", "id": "top-series", "name": "Top Series"})
    );
}

#[tokio::test]
async fn typed_listings_filter_by_media_type() {
    let mut addon = Addon::new(example_manifest());
    addon
        .register_movie_catalog("Top Movies", top_movies)
        .unwrap()
        .register_series_catalog("Top Series", top_series)
        .unwrap()
        .register_movie_catalog("Recommended Movies", empty_catalog)
        .unwrap();
    let router = addon.router();

    let movies = get(&router, "/catalog/movie").await;
    assert_eq!(movies.status, StatusCode::OK);
    let movies = movies.json();
    assert_eq!(catalog_ids(&movies), vec!["top-movies", "recommended-movies"]);
    assert!(
        movies
            .as_array()
            .unwrap()
            .iter()
            .all(|catalog| catalog["type"] == "movie")
    );

    let series = get(&router, "/catalog/series/").await;
    assert_eq!(series.status, StatusCode::OK);
    assert_eq!(catalog_ids(&series.json()), vec!["top-series"]);
}

#[tokio::test]
async fn listing_paths_keep_their_exact_shape() {
    let mut addon = Addon::new(example_manifest());
    addon
        .register_movie_catalog("Top Movies", top_movies)
        .unwrap()
        .register_series_catalog("Top Series", top_series)
        .unwrap();
    let router = addon.router();

    assert_eq!(get(&router, "/catalog/series").await.status, StatusCode::NOT_FOUND);
    assert_eq!(get(&router, "/catalog/movie/").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn late_registrations_are_visible() {
    let mut addon = Addon::new(example_manifest());
    addon.register_movie_catalog("Top Movies", top_movies).unwrap();
    let early_router = addon.router();

    assert_eq!(catalog_ids(&get(&early_router, "/catalog/movie").await.json()).len(), 1);

    addon
        .register_movie_catalog("Recommended Movies", empty_catalog)
        .unwrap();

    let movies = get(&early_router, "/catalog/movie").await.json();
    assert_eq!(catalog_ids(&movies), vec!["top-movies", "recommended-movies"]);

    let all = get(&early_router, "/catalog").await.json();
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn router_snapshots_handler_routes() {
    let mut addon = Addon::new(example_manifest());
    addon.register_movie_catalog("Top Movies", top_movies).unwrap();
    let early_router = addon.router();

    addon
        .register_movie_catalog("Recommended Movies", empty_catalog)
        .unwrap();
    let late_router = addon.router();

    let path = "/catalog/movie/recommended-movies.json";
    assert_eq!(get(&early_router, path).await.status, StatusCode::NOT_FOUND);
    assert_eq!(get(&late_router, path).await.status, StatusCode::OK);
}

#[tokio::test]
async fn listing_routes_only_exist_after_registration() {
    let mut addon = Addon::new(example_manifest());
    let router = addon.router();

    assert_eq!(get(&router, "/catalog").await.status, StatusCode::NOT_FOUND);
    assert_eq!(get(&router, "/catalog/movie").await.status, StatusCode::NOT_FOUND);

    let mut addon = Addon::new(example_manifest());
    addon.register_movie_catalog("Top Movies", top_movies).unwrap();
    let router = addon.router();

    assert_eq!(get(&router, "/catalog").await.status, StatusCode::OK);
    assert_eq!(get(&router, "/catalog/series/").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_identifier_is_rejected() {
    let mut addon = Addon::new(example_manifest());
    addon.register_movie_catalog("Top Movies", top_movies).unwrap();

    let err = addon
        .register_movie_catalog("top movies", empty_catalog)
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::DuplicateCatalog { media_type: MediaType::Movie, ref id, .. } if id == "top-movies"
    ));
    assert_eq!(addon.manifest().catalogs.len(), 1);

    // Same identifier under another type is a different route.
    addon.register_series_catalog("Top Movies", top_series).unwrap();
    let router = addon.router();
    assert_eq!(
        get(&router, "/catalog/series/top-movies.json").await.status,
        StatusCode::OK
    );
}

#[tokio::test]
async fn default_headers_on_every_response() {
    let mut addon = Addon::new(example_manifest());
    addon.register_movie_catalog("Top Movies", top_movies).unwrap();
    let router = addon.router();

    for path in [
        "/manifest.json",
        "/catalog",
        "/catalog/movie",
        "/catalog/movie/top-movies.json",
        "/does-not-exist",
    ] {
        let response = get(&router, path).await;
        assert_eq!(response.headers["access-control-allow-origin"], "*", "{path}");
        assert_eq!(response.headers["connection"], "keep-alive", "{path}");
        assert_eq!(
            response.headers["cache-control"],
            "public, max-age=3600",
            "{path}"
        );
        assert_eq!(response.headers["content-type"], "application/json", "{path}");
    }
}

#[tokio::test]
async fn unknown_route_returns_json_error() {
    let mut addon = Addon::new(example_manifest());
    let router = addon.router();

    let response = get(&router, "/catalog/movie/missing.json").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json(), json!({"error": "not found"}));
}

#[tokio::test]
async fn cache_max_age_is_configurable() {
    let mut addon = Addon::new(example_manifest()).with_cache_max_age(120);
    let router = addon.router();

    let response = get(&router, "/manifest.json").await;
    assert_eq!(response.headers["cache-control"], "public, max-age=120");
}

#[tokio::test]
async fn handlers_can_read_the_manifest() {
    async fn echo_catalog_names(
        State(state): State<AddonState>,
    ) -> Json<CatalogResponse> {
        let manifest = state.manifest();
        Json(movie_catalog(
            manifest
                .catalogs
                .iter()
                .map(|catalog| Meta::movie(catalog.name.clone(), catalog.id.clone())),
        ))
    }

    let mut addon = Addon::new(example_manifest());
    addon
        .register_movie_catalog("Everything", echo_catalog_names)
        .unwrap();
    let router = addon.router();

    let response = get(&router, "/catalog/movie/everything.json").await.json();
    assert_eq!(response["metas"][0]["name"], "Everything");
}

#[tokio::test]
async fn extras_and_other_types_reach_the_manifest() {
    let mut addon = Addon::new(example_manifest());
    addon
        .register_catalog(
            CatalogDefinition::new(MediaType::Tv, "Live Sports")
                .with_extra([Extra::new("genre").with_options(["Football"])]),
            empty_catalog,
        )
        .unwrap();
    let router = addon.router();

    let manifest = addon.manifest();
    assert!(manifest.has_type(MediaType::Tv));
    assert!(manifest.has_resource(ResourceKind::Catalog));
    assert_eq!(manifest.catalogs[0].extra[0].options, vec!["Football"]);

    assert_eq!(get(&router, "/catalog/tv").await.status, StatusCode::OK);
    assert_eq!(
        get(&router, "/catalog/tv/live-sports.json").await.json(),
        json!({"metas": []})
    );
}

#[tokio::test]
async fn capture_syntax_in_names_is_rejected() {
    let mut addon = Addon::new(example_manifest());

    let err = addon
        .register_movie_catalog("*latest", top_movies)
        .unwrap_err();
    assert!(matches!(err, RegistryError::UnroutableName { ref id, .. } if id == "*latest"));
    assert!(addon.manifest().catalogs.is_empty());
    assert!(addon.manifest().types.is_empty());
}

#[tokio::test]
async fn preset_catalog_resource_still_binds_listing() {
    let manifest = Manifest::builder()
        .with_resources([ResourceKind::Catalog, ResourceKind::Meta])
        .build();
    let mut addon = Addon::new(manifest);
    addon.register_movie_catalog("Top Movies", top_movies).unwrap();
    let router = addon.router();

    let manifest = get(&router, "/manifest.json").await.json();
    assert_eq!(manifest["resources"], json!(["catalog", "meta"]));
    assert_eq!(get(&router, "/catalog").await.status, StatusCode::OK);
}

#[tokio::test]
async fn non_ascii_and_reserved_names_are_reachable_encoded() {
    let mut addon = Addon::new(example_manifest());
    addon
        .register_movie_catalog("Películas Épicas", top_movies)
        .unwrap()
        .register_movie_catalog("What?", empty_catalog)
        .unwrap()
        .register_series_catalog(":latest {new}", top_series)
        .unwrap();
    let router = addon.router();

    let ids = catalog_ids(&get(&router, "/catalog").await.json());
    assert_eq!(ids, vec!["películas-épicas", "what?", ":latest-{new}"]);

    let epic = get(&router, "/catalog/movie/pel%C3%ADculas-%C3%A9picas.json").await;
    assert_eq!(epic.status, StatusCode::OK);
    assert_eq!(epic.json()["metas"].as_array().unwrap().len(), 2);

    let what = get(&router, "/catalog/movie/what%3F.json").await;
    assert_eq!(what.status, StatusCode::OK);
    assert_eq!(what.json(), json!({ "metas": [] }));

    let latest = get(&router, "/catalog/series/%3Alatest-%7Bnew%7D.json").await;
    assert_eq!(latest.status, StatusCode::OK);
}

#[tokio::test]
async fn encoded_duplicate_is_rejected() {
    let mut addon = Addon::new(example_manifest());
    addon.register_movie_catalog("What?", top_movies).unwrap();

    let err = addon.register_movie_catalog("WHAT?", empty_catalog).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::DuplicateCatalog { ref path, .. } if path == "/catalog/movie/what%3F.json"
    ));
    assert_eq!(addon.manifest().catalogs.len(), 1);
}
