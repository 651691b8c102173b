use axum::{
    Json, Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode},
};
use serde_json::Value;
use stremio_addon::model::{CatalogResponse, Meta, movie_catalog, series_catalog};
use tower::ServiceExt;

#[allow(unused)]
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

#[allow(unused)]
impl TestResponse {
    pub fn text(&self) -> &str {
        std::str::from_utf8(&self.body).expect("response body is not utf-8")
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not json")
    }
}

#[allow(unused)]
pub async fn get(router: &Router, path: &str) -> TestResponse {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .expect("request");

    let response = router.clone().oneshot(request).await.expect("infallible");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body")
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

#[allow(unused)]
pub async fn top_movies() -> Json<CatalogResponse> {
    Json(movie_catalog([
        Meta::movie("The Dark Knight", "tt0468569"),
        Meta::movie("Inception", "tt1375666"),
    ]))
}

#[allow(unused)]
pub async fn top_series() -> Json<CatalogResponse> {
    Json(series_catalog([Meta::series("Game of Thrones", "tt0944947")]))
}

#[allow(unused)]
pub async fn empty_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse::default())
}

#[allow(unused)]
pub fn catalog_ids(value: &Value) -> Vec<String> {
    value
        .as_array()
        .expect("catalog list is an array")
        .iter()
        .map(|catalog| catalog["id"].as_str().expect("id").to_string())
        .collect()
}
