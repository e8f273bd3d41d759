use axum::http::header;
use axum::response::{Html, IntoResponse};

static INDEX_HTML: &str = include_str!("../web/index.html");
static WIDGET_JS: &str = include_str!("../web/widget.js");

// GET /
pub async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}

// GET /widget.js
pub async fn widget_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        WIDGET_JS,
    )
}
