//! Categories API endpoints.

use api_types::category::{CategoryListResponse, CategoryView};
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

pub(crate) fn map_category(category: engine::Category) -> CategoryView {
    CategoryView {
        id: category.id,
        title: category.title,
        created_at: category.created_at,
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<CategoryListResponse>, ServerError> {
    let categories = state
        .engine
        .categories()
        .await?
        .into_iter()
        .map(map_category)
        .collect();

    Ok(Json(CategoryListResponse { categories }))
}
