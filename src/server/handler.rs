// src/server/handler.rs
use hyper::header::CONTENT_TYPE;
use hyper::{Body, Method, Request, Response, StatusCode};
use std::convert::Infallible;
use tower::Service;
use tracing::{error, info_span, warn};
use uuid::Uuid;

use crate::health::HealthEngine;
use crate::render::{
    render_json, render_prometheus, render_text, Format, RenderError, PROMETHEUS_CONTENT_TYPE,
};

/// Routes `/healthz` and `/metrics` to a fresh report per request.
#[derive(Clone)]
pub struct RequestHandler {
    engine: HealthEngine,
}

impl RequestHandler {
    pub fn new(engine: HealthEngine) -> Self {
        Self { engine }
    }

    pub fn handle(&self, req: &Request<Body>) -> Response<Body> {
        let request_id = Uuid::new_v4();
        let span = info_span!(
            "request",
            id = %request_id,
            method = %req.method(),
            path = req.uri().path()
        );
        let _guard = span.enter();

        if req.method() != Method::GET && req.method() != Method::HEAD {
            return plain(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
        }

        match req.uri().path() {
            "/healthz" => self.healthz(req.uri().query()),
            "/metrics" => self.metrics(),
            _ => plain(StatusCode::NOT_FOUND, "Not Found"),
        }
    }

    fn healthz(&self, query: Option<&str>) -> Response<Body> {
        let format = match requested_format(query) {
            Ok(format) => format,
            Err(e) => {
                warn!(%e, "rejecting healthz request");
                return plain(StatusCode::BAD_REQUEST, &e.to_string());
            }
        };

        let report = self.engine.report();
        let body = match format {
            Format::Text => Ok(render_text(&report)),
            Format::Json => render_json(&report),
        };

        match body {
            Ok(body) => respond(report.http_status(), format.content_type(), body),
            Err(e) => render_failure(e),
        }
    }

    // Always 200: scraping is never gated on the health it reports.
    fn metrics(&self) -> Response<Body> {
        let report = self.engine.report();
        match render_prometheus(&report) {
            Ok(body) => respond(StatusCode::OK, PROMETHEUS_CONTENT_TYPE, body),
            Err(e) => render_failure(e),
        }
    }
}

fn requested_format(query: Option<&str>) -> Result<Format, crate::render::UnknownFormat> {
    let requested = query.and_then(|query| {
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "format")
            .map(|(_, value)| value.into_owned())
    });

    match requested {
        Some(value) => value.parse(),
        None => Ok(Format::default()),
    }
}

fn respond(status: StatusCode, content_type: &'static str, body: String) -> Response<Body> {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, hyper::header::HeaderValue::from_static(content_type));
    response
}

fn plain(status: StatusCode, message: &str) -> Response<Body> {
    respond(status, "text/plain; charset=utf-8", message.to_string())
}

fn render_failure(e: RenderError) -> Response<Body> {
    error!(%e, "failed to render report");
    plain(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
}

impl Service<Request<Body>> for RequestHandler {
    type Response = Response<Body>;
    type Error = Infallible;
    type Future = futures::future::Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        // No I/O happens while building a report, so answer inline.
        futures::future::ready(Ok(self.handle(&req)))
    }
}
