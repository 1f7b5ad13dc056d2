use std::net::SocketAddr;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::state::AppState;
use crate::{auth, pages, plants, uploads, users};

/// Answers a known path hit with a method it has no handler for.
async fn page_not_found(State(state): State<AppState>) -> Response {
    let path = state.config.not_found_page();
    match tokio::fs::read_to_string(&path).await {
        Ok(page) => (StatusCode::NOT_FOUND, Html(page)).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, path = %path.display(), "404 page unreadable");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    // Unmatched routes fall through to the public dir, then to its 404 page.
    let not_found = ServeFile::new(state.config.not_found_page());
    let public = ServeDir::new(&state.config.public_dir).not_found_service(not_found.clone());
    let images = ServeDir::new(&state.config.upload_dir).not_found_service(not_found);

    Router::new()
        .merge(auth::router())
        .merge(plants::router())
        .merge(users::router())
        .merge(uploads::router())
        .merge(pages::router())
        .nest_service("/imagenes", images)
        .method_not_allowed_fallback(page_not_found)
        .fallback_service(public)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, ?latency, "response");
                        } else {
                            tracing::info!(%status, ?latency, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router, host: &str, port: u16) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
