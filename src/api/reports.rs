use axum::extract::{Extension, Multipart, Path};
use axum::response::{IntoResponse, Redirect, Response};
use sea_orm::DatabaseConnection;
use serde_json::json;
use tower_cookies::Cookies;
use tracing::{error, info, warn};

use crate::api::{set_flash, Flash};
use crate::config::Config;
use crate::error::AppError;
use crate::forms::{self, FormFields};
use crate::store::{self, MarkFoundOutcome};
use crate::uploads::{self, NameScheme, RawPhoto};
use crate::views::Views;

// GET /report/lost
pub async fn lost_form(
    Extension(config): Extension<Config>,
    Extension(views): Extension<Views>,
) -> Result<Response, AppError> {
    render_form(&views, "report_lost_form", &config, &FormFields::new(), None)
}

// GET /report/found
pub async fn found_form(
    Extension(config): Extension<Config>,
    Extension(views): Extension<Views>,
) -> Result<Response, AppError> {
    render_form(&views, "report_found_form", &config, &FormFields::new(), None)
}

// POST /report/lost
pub async fn submit_lost(
    Extension(db): Extension<DatabaseConnection>,
    Extension(config): Extension<Config>,
    Extension(views): Extension<Views>,
    cookies: Cookies,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let (fields, photos) = collect_multipart(multipart).await?;

    let submission = match forms::validate_lost(&fields) {
        Ok(submission) => submission,
        Err(e) => {
            return render_form(&views, "report_lost_form", &config, &fields, Some(e.to_string()))
        }
    };
    if let Err(e) = uploads::check_photos(&photos) {
        return render_form(&views, "report_lost_form", &config, &fields, Some(e.to_string()));
    }

    // Saved files are not rolled back if the insert below fails; a failed
    // submission can leave orphans in the upload directory.
    let stored = match uploads::save_photos(&config.upload_dir, photos, NameScheme::Timestamped) {
        Ok(stored) => stored,
        Err(e) => {
            error!("failed to store lost-report photos: {}", e);
            return render_form(
                &views,
                "report_lost_form",
                &config,
                &fields,
                Some("Failed to save photos, please try again later.".to_string()),
            );
        }
    };

    let coords_ignored = submission.coords_ignored;
    match store::insert_lost(&db, submission, stored).await {
        Ok(report) => {
            info!("lost report {} created", report.id);
            crate::metrics::increment_lost_reports();
            set_flash(
                &cookies,
                if coords_ignored {
                    Flash::LostCreatedCoordsIgnored
                } else {
                    Flash::LostCreated
                },
            );
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => {
            error!("failed to insert lost report: {}", e);
            render_form(
                &views,
                "report_lost_form",
                &config,
                &fields,
                Some("A database error occurred, please try again later.".to_string()),
            )
        }
    }
}

// POST /report/found
pub async fn submit_found(
    Extension(db): Extension<DatabaseConnection>,
    Extension(config): Extension<Config>,
    Extension(views): Extension<Views>,
    cookies: Cookies,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let (fields, photos) = collect_multipart(multipart).await?;

    let submission = match forms::validate_found(&fields) {
        Ok(submission) => submission,
        Err(e) => {
            return render_form(&views, "report_found_form", &config, &fields, Some(e.to_string()))
        }
    };
    if let Err(e) = uploads::check_photos(&photos) {
        return render_form(&views, "report_found_form", &config, &fields, Some(e.to_string()));
    }

    let stored = match uploads::save_photos(&config.upload_dir, photos, NameScheme::Random) {
        Ok(stored) => stored,
        Err(e) => {
            error!("failed to store found-report photos: {}", e);
            return render_form(
                &views,
                "report_found_form",
                &config,
                &fields,
                Some("Failed to save photos, please try again later.".to_string()),
            );
        }
    };

    let coords_ignored = submission.coords_ignored;
    match store::insert_found(&db, submission, stored).await {
        Ok(report) => {
            info!("found report {} created", report.id);
            crate::metrics::increment_found_reports();
            set_flash(
                &cookies,
                if coords_ignored {
                    Flash::FoundCreatedCoordsIgnored
                } else {
                    Flash::FoundCreated
                },
            );
            Ok(Redirect::to("/").into_response())
        }
        Err(e) => {
            error!("failed to insert found report: {}", e);
            render_form(
                &views,
                "report_found_form",
                &config,
                &fields,
                Some("A database error occurred, please try again later.".to_string()),
            )
        }
    }
}

// POST /report/:id/found
pub async fn mark_found(
    Extension(db): Extension<DatabaseConnection>,
    cookies: Cookies,
    Path(report_id): Path<i32>,
) -> Result<Response, AppError> {
    match store::mark_found(&db, report_id).await? {
        None => Err(AppError::NotFound),
        Some(MarkFoundOutcome::Marked) => {
            info!("lost report {} marked as found", report_id);
            crate::metrics::decrement_unresolved_lost_reports();
            set_flash(&cookies, Flash::MarkedFound);
            Ok(Redirect::to("/").into_response())
        }
        Some(MarkFoundOutcome::AlreadyFound) => {
            set_flash(&cookies, Flash::AlreadyFound);
            Ok(Redirect::to("/").into_response())
        }
    }
}

/// Splits the multipart body into text fields and `photos` file parts.
/// Empty file inputs (a form submitted with no photo chosen) are skipped.
async fn collect_multipart(
    mut multipart: Multipart,
) -> Result<(FormFields, Vec<RawPhoto>), AppError> {
    let mut fields = FormFields::new();
    let mut photos = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        if name == "photos" {
            let filename = field.file_name().unwrap_or("").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            if filename.is_empty() || bytes.is_empty() {
                continue;
            }
            photos.push(RawPhoto {
                filename,
                bytes: bytes.to_vec(),
            });
        } else if !name.is_empty() {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            fields.insert(name, value);
        } else {
            warn!("ignoring unnamed multipart field");
        }
    }
    Ok((fields, photos))
}

fn render_form(
    views: &Views,
    template: &str,
    config: &Config,
    fields: &FormFields,
    error: Option<String>,
) -> Result<Response, AppError> {
    let page = views.render(
        template,
        &json!({
            "form_data": fields,
            "error": error,
            "baidu_map_ak": config.baidu_map_ak,
            "tencent_map_api_key": config.tencent_map_api_key,
        }),
    )?;
    Ok(page.into_response())
}
