//! Response headers added to every page view.
//!
//! Security headers go on every response. Successful GET responses also get a
//! `Cache-Control` header: the dataset never changes while the process runs.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use axum::http::{header, HeaderName, HeaderValue, Method, Request, Response};
use tower::{Layer, Service};

use crate::config::Config;

const SECURITY_HEADERS: [(HeaderName, &str); 4] = [
    (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (header::X_FRAME_OPTIONS, "DENY"),
    (header::REFERRER_POLICY, "strict-origin-when-cross-origin"),
    (header::CONTENT_SECURITY_POLICY, "default-src 'none'; frame-ancestors 'none'"),
];

const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";

#[derive(Clone)]
pub struct SiteHeadersLayer {
    include_hsts: bool,
    cache_control: Option<HeaderValue>,
}

impl SiteHeadersLayer {
    pub fn new(include_hsts: bool, cache_max_age_secs: u64) -> Self {
        let cache_control = (cache_max_age_secs > 0)
            .then(|| format!("public, max-age={}", cache_max_age_secs))
            .and_then(|v| HeaderValue::from_str(&v).ok());
        Self {
            include_hsts,
            cache_control,
        }
    }
}

impl<S> Layer<S> for SiteHeadersLayer {
    type Service = SiteHeadersService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SiteHeadersService {
            inner,
            include_hsts: self.include_hsts,
            cache_control: self.cache_control.clone(),
        }
    }
}

#[derive(Clone)]
pub struct SiteHeadersService<S> {
    inner: S,
    include_hsts: bool,
    cache_control: Option<HeaderValue>,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for SiteHeadersService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = SiteHeadersFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<ReqBody>) -> Self::Future {
        let cache_control = if request.method() == Method::GET {
            self.cache_control.clone()
        } else {
            None
        };
        SiteHeadersFuture {
            future: self.inner.call(request),
            include_hsts: self.include_hsts,
            cache_control,
        }
    }
}

#[pin_project::pin_project]
pub struct SiteHeadersFuture<F> {
    #[pin]
    future: F,
    include_hsts: bool,
    cache_control: Option<HeaderValue>,
}

impl<F, ResBody, E> Future for SiteHeadersFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = Result<Response<ResBody>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let mut response = match this.future.poll(cx) {
            Poll::Ready(Ok(response)) => response,
            other => return other,
        };

        let status = response.status();
        let headers = response.headers_mut();
        for (name, value) in SECURITY_HEADERS {
            headers.insert(name, HeaderValue::from_static(value));
        }
        if *this.include_hsts {
            headers.insert(
                header::STRICT_TRANSPORT_SECURITY,
                HeaderValue::from_static(HSTS_VALUE),
            );
        }
        if status.is_success() {
            if let Some(value) = this.cache_control.take() {
                headers.insert(header::CACHE_CONTROL, value);
            }
        } else {
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
        }

        Poll::Ready(Ok(response))
    }
}

pub fn create_site_headers_layer(config: &Config) -> SiteHeadersLayer {
    if config.production {
        tracing::info!("Headers: HSTS enabled (production mode)");
    } else {
        tracing::info!("Headers: HSTS disabled (development mode)");
    }
    SiteHeadersLayer::new(config.production, config.cache_max_age_secs)
}
