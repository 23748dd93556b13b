//! Request logging middleware
//!
//! One INFO span per request carrying method and path. The query string is
//! left out of the span; 5xx responses are reported at WARN.

use axum::http::Request;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnFailure, DefaultOnResponse, MakeSpan, TraceLayer};
use tower_http::LatencyUnit;
use tracing::{Level, Span};

/// Span builder for incoming requests
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
        )
    }
}

/// Create request logging middleware
pub fn logging_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RequestSpan> {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis)
                .include_headers(false),
        )
        .on_failure(DefaultOnFailure::new().level(Level::WARN).latency_unit(LatencyUnit::Millis))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::response::Response;
    use std::convert::Infallible;
    use tower::{ServiceBuilder, ServiceExt};

    #[tokio::test]
    async fn test_layer_passes_responses_through() {
        let service = ServiceBuilder::new()
            .layer(logging_layer())
            .service_fn(|request: Request<Body>| async move {
                let status = if request.uri().path() == "/broken" {
                    StatusCode::INTERNAL_SERVER_ERROR
                } else {
                    StatusCode::OK
                };
                Ok::<_, Infallible>(Response::builder().status(status).body(Body::empty()).unwrap())
            });

        let ok = Request::builder().uri("/api/defects?x=1").body(Body::empty()).unwrap();
        let response = service.clone().oneshot(ok).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let broken = Request::builder().uri("/broken").body(Body::empty()).unwrap();
        let response = service.oneshot(broken).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
