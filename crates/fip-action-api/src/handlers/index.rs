//! Action page.

use axum::extract::State;
use axum::response::Html;

use crate::state::AppState;

const ROOT_PATH_PLACEHOLDERS: [&str; 2] = ["{{ ROOT_PATH }}", "{{ROOT_PATH}}"];

/// Substitute the mount prefix into the page template.
pub fn render_index(template: &str, root_path: &str) -> String {
    ROOT_PATH_PLACEHOLDERS
        .iter()
        .fold(template.to_string(), |html, placeholder| {
            html.replace(placeholder, root_path)
        })
}

/// GET /
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.index_html.to_string())
}
