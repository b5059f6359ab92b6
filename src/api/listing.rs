use axum::extract::{Extension, Query};
use axum::response::Html;
use sea_orm::DatabaseConnection;
use serde_json::json;
use tower_cookies::Cookies;

use crate::config::Config;
use crate::error::AppError;
use crate::store::{self, ListingFilters};
use crate::views::Views;

// GET /
pub async fn index(
    Extension(db): Extension<DatabaseConnection>,
    Extension(config): Extension<Config>,
    Extension(views): Extension<Views>,
    cookies: Cookies,
    Query(filters): Query<ListingFilters>,
) -> Result<Html<String>, AppError> {
    let lost_reports = if filters.wants_lost() {
        store::list_lost(&db, &filters).await?
    } else {
        Vec::new()
    };
    let found_reports = if filters.wants_found() {
        store::list_found(&db, &filters).await?
    } else {
        Vec::new()
    };

    let flash = crate::api::take_flash(&cookies);
    views.render(
        "listing",
        &json!({
            "title": "PawTrace — community pet reports",
            "lost_reports": lost_reports,
            "found_reports": found_reports,
            "show_lost": filters.wants_lost(),
            "show_found": filters.wants_found(),
            "search_params": filters,
            "tencent_map_api_key": config.tencent_map_api_key,
            "flash": flash.map(|f| json!({"kind": f.kind(), "message": f.message()})),
        }),
    )
}

// GET /ping — liveness probe for the container orchestrator.
pub async fn ping() -> &'static str {
    "pong"
}
