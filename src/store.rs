use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

use crate::entities::{found_report, lost_report, FoundReport, LostReport, PhotoList};
use crate::forms::{FoundSubmission, LostSubmission};

/// Homepage query parameters. Absent (or empty) filters impose no
/// constraint; present ones AND-compose.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct ListingFilters {
    pub pet_type: Option<String>,
    pub location: Option<String>,
    pub color: Option<String>,
    /// `lost` → unresolved only, `found` → resolved only. Lost reports
    /// only; anything else means both.
    pub status: Option<String>,
    /// `lost` / `found` to show a single section of the page.
    pub report_type: Option<String>,
}

impl ListingFilters {
    pub fn wants_lost(&self) -> bool {
        !matches!(present(&self.report_type), Some("found"))
    }

    pub fn wants_found(&self) -> bool {
        !matches!(present(&self.report_type), Some("lost"))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn contains_insensitive<C>(column: C, needle: &str) -> Condition
where
    C: ColumnTrait,
{
    Condition::all().add(
        Expr::expr(Func::lower(Expr::col(column)))
            .like(format!("%{}%", needle.to_lowercase())),
    )
}

pub fn lost_condition(filters: &ListingFilters) -> Condition {
    let mut cond = Condition::all();
    if let Some(pet_type) = present(&filters.pet_type) {
        cond = cond.add(lost_report::Column::PetType.eq(pet_type));
    }
    if let Some(location) = present(&filters.location) {
        cond = cond.add(contains_insensitive(
            lost_report::Column::LostLocationText,
            location,
        ));
    }
    if let Some(color) = present(&filters.color) {
        cond = cond.add(contains_insensitive(lost_report::Column::Color, color));
    }
    match present(&filters.status) {
        Some("lost") => cond = cond.add(lost_report::Column::IsFound.eq(false)),
        Some("found") => cond = cond.add(lost_report::Column::IsFound.eq(true)),
        _ => {}
    }
    cond
}

pub fn found_condition(filters: &ListingFilters) -> Condition {
    let mut cond = Condition::all();
    if let Some(pet_type) = present(&filters.pet_type) {
        cond = cond.add(found_report::Column::PetType.eq(pet_type));
    }
    if let Some(location) = present(&filters.location) {
        cond = cond.add(contains_insensitive(
            found_report::Column::FoundLocationText,
            location,
        ));
    }
    if let Some(color) = present(&filters.color) {
        cond = cond.add(contains_insensitive(found_report::Column::Color, color));
    }
    cond
}

pub async fn list_lost(
    db: &DatabaseConnection,
    filters: &ListingFilters,
) -> Result<Vec<lost_report::Model>, DbErr> {
    LostReport::find()
        .filter(lost_condition(filters))
        .order_by_desc(lost_report::Column::CreatedAt)
        .all(db)
        .await
}

pub async fn list_found(
    db: &DatabaseConnection,
    filters: &ListingFilters,
) -> Result<Vec<found_report::Model>, DbErr> {
    FoundReport::find()
        .filter(found_condition(filters))
        .order_by_desc(found_report::Column::CreatedAt)
        .all(db)
        .await
}

pub async fn insert_lost(
    db: &DatabaseConnection,
    submission: LostSubmission,
    photos: Vec<String>,
) -> Result<lost_report::Model, DbErr> {
    let now = chrono::Utc::now().naive_utc();
    lost_report::ActiveModel {
        pet_type: Set(submission.pet_type),
        breed: Set(submission.breed.into_stored()),
        color: Set(submission.color),
        gender: Set(submission.gender),
        age: Set(submission.age),
        features: Set(submission.features),
        lost_time: Set(submission.lost_time),
        lost_location_text: Set(submission.lost_location_text),
        latitude: Set(submission.latitude),
        longitude: Set(submission.longitude),
        contact_info: Set(submission.contact_info),
        photos: Set(PhotoList::new(photos)),
        is_found: Set(false),
        found_time: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn insert_found(
    db: &DatabaseConnection,
    submission: FoundSubmission,
    photos: Vec<String>,
) -> Result<found_report::Model, DbErr> {
    let now = chrono::Utc::now().naive_utc();
    found_report::ActiveModel {
        pet_type: Set(submission.pet_type),
        breed: Set(submission.breed.map(|b| b.into_stored())),
        color: Set(submission.color),
        gender: Set(submission.gender),
        features: Set(submission.features),
        found_time: Set(submission.found_time),
        found_location_text: Set(submission.found_location_text),
        latitude: Set(submission.latitude),
        longitude: Set(submission.longitude),
        contact_info: Set(submission.contact_info),
        photos: Set(PhotoList::new(photos)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}

#[derive(Debug, PartialEq, Eq)]
pub enum MarkFoundOutcome {
    /// The report was unresolved and is now marked found.
    Marked,
    /// The report had already been resolved; nothing changed.
    AlreadyFound,
}

/// The one mutation lost reports ever see. Returns `None` for an unknown
/// id; repeating the call is a no-op with a distinct outcome so the
/// handler can word the notification differently.
pub async fn mark_found(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<MarkFoundOutcome>, DbErr> {
    let Some(report) = LostReport::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    if report.is_found {
        return Ok(Some(MarkFoundOutcome::AlreadyFound));
    }

    let now = chrono::Utc::now().naive_utc();
    let mut active: lost_report::ActiveModel = report.into();
    active.is_found = Set(true);
    active.found_time = Set(Some(now));
    active.updated_at = Set(now);
    active.update(db).await?;

    Ok(Some(MarkFoundOutcome::Marked))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    fn lost_sql(filters: &ListingFilters) -> String {
        LostReport::find()
            .filter(lost_condition(filters))
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn empty_filters_impose_no_constraint() {
        let sql = lost_sql(&ListingFilters::default());
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn filters_and_compose() {
        let filters = ListingFilters {
            pet_type: Some("dog".to_string()),
            color: Some("Black".to_string()),
            ..Default::default()
        };
        let sql = lost_sql(&filters);
        assert!(sql.contains(r#""pet_type" = 'dog'"#));
        assert!(sql.contains("LOWER"));
        assert!(sql.contains("'%black%'"));
        assert!(sql.contains(" AND "));
    }

    #[test]
    fn status_filter_targets_resolution() {
        let unresolved = ListingFilters {
            status: Some("lost".to_string()),
            ..Default::default()
        };
        assert!(lost_sql(&unresolved).contains(r#""is_found" = FALSE"#));

        let resolved = ListingFilters {
            status: Some("found".to_string()),
            ..Default::default()
        };
        assert!(lost_sql(&resolved).contains(r#""is_found" = TRUE"#));

        let junk = ListingFilters {
            status: Some("whatever".to_string()),
            ..Default::default()
        };
        assert!(!lost_sql(&junk).contains("is_found"));
    }

    #[test]
    fn location_filter_uses_the_kind_appropriate_column() {
        let filters = ListingFilters {
            location: Some("park".to_string()),
            ..Default::default()
        };
        assert!(lost_sql(&filters).contains("lost_location_text"));

        let found_sql = FoundReport::find()
            .filter(found_condition(&filters))
            .build(DbBackend::Postgres)
            .to_string();
        assert!(found_sql.contains("found_location_text"));
    }

    #[test]
    fn report_type_controls_page_sections() {
        let both = ListingFilters::default();
        assert!(both.wants_lost() && both.wants_found());

        let lost_only = ListingFilters {
            report_type: Some("lost".to_string()),
            ..Default::default()
        };
        assert!(lost_only.wants_lost() && !lost_only.wants_found());

        let found_only = ListingFilters {
            report_type: Some("found".to_string()),
            ..Default::default()
        };
        assert!(!found_only.wants_lost() && found_only.wants_found());
    }
}
