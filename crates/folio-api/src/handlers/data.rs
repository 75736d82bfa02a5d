//! Portfolio document read/write handlers.

use axum::extract::State;
use axum::Json;

use crate::{ApiError, AppState};
use folio_core::PortfolioDocument;

/// Assemble and return the full portfolio document.
///
/// # Returns
/// - 200 OK with the document
/// - 404 Not Found in file mode when the backing file is absent
/// - 500 on any other read failure
pub async fn get_data(
    State(state): State<AppState>,
) -> Result<Json<PortfolioDocument>, ApiError> {
    let document = state.store.load().await?;
    Ok(Json(document))
}

/// Persist the submitted document so the store exactly matches it.
///
/// The save runs all-or-nothing: settings update, collection deletions,
/// and per-item upserts either all apply or none do.
///
/// # Returns
/// - 200 OK with a confirmation message
/// - 500 on any failure, with the save rolled back
pub async fn save_data(
    State(state): State<AppState>,
    Json(document): Json<PortfolioDocument>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.store.save(document).await?;
    Ok(Json(serde_json::json!({
        "message": "Portfolio data saved."
    })))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::*;
    use crate::test_support::file_state;
    use folio_core::Tool;

    #[tokio::test]
    async fn missing_backing_file_is_a_404() {
        let dir = tempfile::tempdir().unwrap();
        let err = get_data(State(file_state(dir.path())))
            .await
            .err()
            .unwrap();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn save_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let state = file_state(dir.path());

        let mut document = PortfolioDocument::default();
        document.about_me = "hello".to_string();
        document.tools = vec![Tool {
            id: None,
            name: "Git".to_string(),
            icon: "/assets/icon/git.png".to_string(),
        }];

        save_data(State(state.clone()), Json(document.clone()))
            .await
            .unwrap();
        let Json(loaded) = get_data(State(state)).await.unwrap();
        assert_eq!(loaded, document);
    }
}
