//! Default response headers and request logging for addon routes.
//!
//! Every response gets:
//! - `Access-Control-Allow-Origin: *` so web clients can load the addon
//! - `Connection: keep-alive`
//! - `Cache-Control: public, max-age=<seconds>` (3600 unless configured)
//! - `Content-Type: application/json`
//!
//! Headers already set by a handler are left untouched.

use axum::{
    body::Body,
    http::{HeaderValue, Request, Response, header},
};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tower::{Layer, Service};
use tracing::{debug, info};

pub const DEFAULT_CACHE_MAX_AGE: u64 = 3600;

/// Layer applying the addon default headers.
#[derive(Clone, Debug)]
pub struct AddonHeadersLayer {
    max_age: u64,
    cache_control: HeaderValue,
}

impl AddonHeadersLayer {
    pub fn new() -> Self {
        Self::with_max_age(DEFAULT_CACHE_MAX_AGE)
    }

    pub fn with_max_age(max_age: u64) -> Self {
        Self {
            max_age,
            cache_control: Self::build_cache_control(max_age),
        }
    }

    pub fn max_age(&self) -> u64 {
        self.max_age
    }

    fn build_cache_control(max_age: u64) -> HeaderValue {
        match max_age {
            DEFAULT_CACHE_MAX_AGE => {
                HeaderValue::from_static("public, max-age=3600")
            }
            _ => HeaderValue::from_str(&format!("public, max-age={max_age}"))
                .unwrap_or_else(|_| {
                    HeaderValue::from_static("public, max-age=3600")
                }),
        }
    }
}

impl Default for AddonHeadersLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Layer<S> for AddonHeadersLayer {
    type Service = AddonHeadersMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        debug!(max_age = self.max_age, "installing addon header layer");
        AddonHeadersMiddleware {
            inner,
            cache_control: self.cache_control.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AddonHeadersMiddleware<S> {
    inner: S,
    cache_control: HeaderValue,
}

impl<S> Service<Request<Body>> for AddonHeadersMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<Body>>
        + Send
        + Clone
        + 'static,
    S::Future: Send + 'static,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = Pin<
        Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut Context<'_>,
    ) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        info!("{} {}", req.method(), req.uri().path());

        // Take the service that was driven to readiness, leave a clone behind
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let cache_control = self.cache_control.clone();

        Box::pin(async move {
            let mut response = inner.call(req).await?;

            let headers = response.headers_mut();
            headers
                .entry(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .or_insert(HeaderValue::from_static("*"));
            headers
                .entry(header::CONNECTION)
                .or_insert(HeaderValue::from_static("keep-alive"));
            headers
                .entry(header::CACHE_CONTROL)
                .or_insert(cache_control);
            headers
                .entry(header::CONTENT_TYPE)
                .or_insert(HeaderValue::from_static("application/json"));

            Ok(response)
        })
    }
}
