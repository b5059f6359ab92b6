use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use crate::entities::{lost_report, FoundReport, LostReport};

/// Seeds the board gauges from table counts. Called once after migrations;
/// the handlers keep the gauges current from there.
pub async fn init_metrics(db: &DatabaseConnection) {
    let lost_count = LostReport::find().count(db).await.unwrap_or(0);
    metrics::gauge!("pawtrace_lost_reports_total").set(lost_count as f64);

    let found_count = FoundReport::find().count(db).await.unwrap_or(0);
    metrics::gauge!("pawtrace_found_reports_total").set(found_count as f64);

    let unresolved = LostReport::find()
        .filter(lost_report::Column::IsFound.eq(false))
        .count(db)
        .await
        .unwrap_or(0);
    metrics::gauge!("pawtrace_lost_reports_unresolved").set(unresolved as f64);

    tracing::info!(
        "Initialized metrics: Lost={}, Found={}, Unresolved={}",
        lost_count,
        found_count,
        unresolved
    );
}

pub fn increment_lost_reports() {
    metrics::counter!("pawtrace_lost_reports_created_total").increment(1);
    metrics::gauge!("pawtrace_lost_reports_total").increment(1.0);
    metrics::gauge!("pawtrace_lost_reports_unresolved").increment(1.0);
}

pub fn increment_found_reports() {
    metrics::counter!("pawtrace_found_reports_created_total").increment(1);
    metrics::gauge!("pawtrace_found_reports_total").increment(1.0);
}

pub fn decrement_unresolved_lost_reports() {
    metrics::counter!("pawtrace_lost_reports_resolved_total").increment(1);
    metrics::gauge!("pawtrace_lost_reports_unresolved").decrement(1.0);
}
