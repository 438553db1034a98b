//! Browser form.

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Single-page form that submits to `/api/generate`.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
