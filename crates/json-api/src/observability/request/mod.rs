//! Request logging middleware.
//!
//! Every request gets an `x-request-id`, a `http.request` span and an
//! HTTP metrics sample. Probe endpoints pass straight through.

mod parent_context;
mod request_ids;
mod spans;

use std::time::{Duration, Instant};

use salvo::{
    Request, handler,
    http::StatusCode,
    prelude::{Depot, FlowCtrl, Response},
};
use tracing::{Instrument as _, Span, error, info, warn};
use tracing_opentelemetry::OpenTelemetrySpanExt as _;

use super::{metrics, settings};

const REQUEST_ID_DEPOT_KEY: &str = "request_id";

const UNLOGGED_PATHS: [&str; 2] = ["/metrics", "/healthcheck"];

#[handler]
pub(crate) async fn request_logging(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    if UNLOGGED_PATHS.contains(&req.uri().path()) {
        ctrl.call_next(req, depot, res).await;
        return;
    }

    let settings = settings::request_settings();
    let started = Instant::now();

    let request_id =
        request_ids::resolve_request_id(req.header::<String>(request_ids::REQUEST_ID_HEADER));

    depot.insert(REQUEST_ID_DEPOT_KEY, request_id.clone());
    request_ids::set_request_id_header(res, &request_id);

    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let names = spans::request_span_name(&method, &path);
    let _in_flight = metrics::InFlightRequestGuard::track();

    let span = tracing::info_span!(
        parent: None,
        "http.request",
        otel.name = %names.otel_span_name,
        otel.kind = "server",
        request_id = %request_id,
        method = %method,
        path = %path,
        remote_addr = %req.remote_addr(),
        status = tracing::field::Empty,
        duration_ms = tracing::field::Empty
    );

    if settings.parent_propagation
        && let Some(parent) = parent_context::extract_parent_context(req.headers())
        && let Err(source) = span.set_parent(parent)
    {
        warn!("failed to attach remote parent to request span: {source}");
    }

    ctrl.call_next(req, depot, res).instrument(span.clone()).await;

    let elapsed = started.elapsed();
    let status = request_ids::response_status_or_ok(res.status_code);

    metrics::observe_request(&method, &names.otel_path, status.as_u16(), elapsed.as_secs_f64());

    log_completion(&span, status, elapsed, settings.slow_request_threshold);
}

fn log_completion(span: &Span, status: StatusCode, elapsed: Duration, slow_after: Duration) {
    let duration_ms = elapsed.as_millis();

    span.record("status", status.as_u16());
    span.record("duration_ms", duration_ms);

    span.in_scope(|| {
        if status.is_server_error() {
            error!(status = status.as_u16(), duration_ms, "request failed");
        } else if status.is_client_error() {
            warn!(status = status.as_u16(), duration_ms, "request rejected");
        } else {
            info!(status = status.as_u16(), duration_ms, "request completed");
        }

        if elapsed > slow_after {
            warn!(
                duration_ms,
                threshold_ms = slow_after.as_millis(),
                "slow request"
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use salvo::{prelude::*, test::TestClient};

    use super::*;

    #[handler]
    async fn ok() -> &'static str {
        "ok"
    }

    #[tokio::test]
    async fn request_id_is_echoed_back() {
        let service = Service::new(
            Router::new()
                .hoop(request_logging)
                .push(Router::with_path("products").get(ok)),
        );

        let res = TestClient::get("http://example.com/products")
            .add_header(request_ids::REQUEST_ID_HEADER, "checkout-42", true)
            .send(&service)
            .await;

        assert_eq!(
            res.headers()
                .get(request_ids::REQUEST_ID_HEADER)
                .and_then(|value| value.to_str().ok()),
            Some("checkout-42")
        );
    }

    #[tokio::test]
    async fn probes_get_no_request_id() {
        let service = Service::new(
            Router::new()
                .hoop(request_logging)
                .push(Router::with_path("healthcheck").get(ok)),
        );

        let res = TestClient::get("http://example.com/healthcheck")
            .send(&service)
            .await;

        assert!(
            res.headers().get(request_ids::REQUEST_ID_HEADER).is_none(),
            "probe responses are left alone"
        );
    }
}
