use axum::{http::StatusCode, Json};
use contracts::domain::a001_menu_category::RawCategory;

use crate::domain::a001_menu_category::{repository::MenuContentError, service};

/// GET /api/menu/categories
pub async fn list_categories() -> Result<Json<Vec<RawCategory>>, StatusCode> {
    match service::list_categories().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to load menu categories: {:#}", e);
            Err(status_for(&e))
        }
    }
}

fn status_for(error: &anyhow::Error) -> StatusCode {
    match error.downcast_ref::<MenuContentError>() {
        Some(MenuContentError::NotInitialized) | Some(MenuContentError::Io { .. }) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_source_is_unavailable() {
        let error = anyhow::Error::from(MenuContentError::NotInitialized);
        assert_eq!(status_for(&error), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_broken_content_is_server_error() {
        let json_error = serde_json::from_str::<Vec<RawCategory>>("{").unwrap_err();
        let error = anyhow::Error::from(MenuContentError::from(json_error));
        assert_eq!(status_for(&error), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
