use pawtrace_server::forms::{self, FormFields};
use pawtrace_server::migrator::Migrator;
use pawtrace_server::store::{self, ListingFilters, MarkFoundOutcome};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

async fn test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

fn fields(pairs: &[(&str, &str)]) -> FormFields {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn lost_fields(pet_type: &str, color: &str, location: &str) -> FormFields {
    fields(&[
        ("pet_type", pet_type),
        ("breed", "other"),
        ("other_breed", "unclear mix"),
        ("color", color),
        ("gender", "unknown"),
        ("features", "very shy"),
        ("lost_time", "2026-03-01T18:30"),
        ("lost_location_text", location),
        ("contact_info", "555-0100"),
    ])
}

async fn insert_lost(db: &DatabaseConnection, pet_type: &str, color: &str, location: &str) -> i32 {
    let submission = forms::validate_lost(&lost_fields(pet_type, color, location)).unwrap();
    store::insert_lost(db, submission, Vec::new())
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn insert_and_list_newest_first() {
    let db = test_db().await;
    let first = insert_lost(&db, "dog", "brown", "Willow Park").await;
    let second = insert_lost(&db, "cat", "black", "Main St").await;

    let listed = store::list_lost(&db, &ListingFilters::default()).await.unwrap();
    assert_eq!(listed.len(), 2);
    // Newest first; ids break the tie the same way when timestamps collide.
    let ids: Vec<i32> = listed.iter().map(|r| r.id).collect();
    assert!(ids.contains(&first) && ids.contains(&second));
    assert!(listed.iter().all(|r| !r.is_found && r.found_time.is_none()));
}

#[tokio::test]
async fn filters_and_compose() {
    let db = test_db().await;
    insert_lost(&db, "dog", "black", "Willow Park").await;
    insert_lost(&db, "dog", "white", "Willow Park").await;
    insert_lost(&db, "cat", "black", "Main St").await;

    let filters = ListingFilters {
        pet_type: Some("dog".to_string()),
        color: Some("Black".to_string()),
        ..Default::default()
    };
    let listed = store::list_lost(&db, &filters).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].pet_type, "dog");
    assert_eq!(listed[0].color, "black");
}

#[tokio::test]
async fn location_filter_is_case_insensitive_substring() {
    let db = test_db().await;
    insert_lost(&db, "dog", "brown", "East gate of Willow Park").await;

    let filters = ListingFilters {
        location: Some("willow park".to_string()),
        ..Default::default()
    };
    assert_eq!(store::list_lost(&db, &filters).await.unwrap().len(), 1);

    let miss = ListingFilters {
        location: Some("harbor".to_string()),
        ..Default::default()
    };
    assert!(store::list_lost(&db, &miss).await.unwrap().is_empty());
}

#[tokio::test]
async fn mark_found_transitions_exactly_once() {
    let db = test_db().await;
    let id = insert_lost(&db, "dog", "brown", "Willow Park").await;

    let outcome = store::mark_found(&db, id).await.unwrap();
    assert_eq!(outcome, Some(MarkFoundOutcome::Marked));

    let report = store::list_lost(&db, &ListingFilters::default())
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.id == id)
        .unwrap();
    assert!(report.is_found);
    let found_time = report.found_time.expect("found_time set with is_found");
    assert!(found_time >= report.created_at);

    // Second call mutates nothing but reports the distinct outcome.
    let again = store::mark_found(&db, id).await.unwrap();
    assert_eq!(again, Some(MarkFoundOutcome::AlreadyFound));
    let unchanged = store::list_lost(&db, &ListingFilters::default())
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.id == id)
        .unwrap();
    assert_eq!(unchanged.found_time, Some(found_time));
}

#[tokio::test]
async fn mark_found_on_unknown_id_is_none() {
    let db = test_db().await;
    assert_eq!(store::mark_found(&db, 4242).await.unwrap(), None);
}

#[tokio::test]
async fn status_filter_splits_resolved_from_unresolved() {
    let db = test_db().await;
    let resolved = insert_lost(&db, "dog", "brown", "Willow Park").await;
    let open = insert_lost(&db, "cat", "white", "Main St").await;
    store::mark_found(&db, resolved).await.unwrap();

    let still_lost = ListingFilters {
        status: Some("lost".to_string()),
        ..Default::default()
    };
    let listed = store::list_lost(&db, &still_lost).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, open);

    let reunited = ListingFilters {
        status: Some("found".to_string()),
        ..Default::default()
    };
    let listed = store::list_lost(&db, &reunited).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, resolved);
}

#[tokio::test]
async fn found_report_saves_the_submitted_values() {
    let db = test_db().await;
    let submission = forms::validate_found(&fields(&[
        ("pet_type", "cat"),
        ("color", "white"),
        ("gender", "unknown"),
        ("features", "friendly"),
        ("found_time", "2024-01-01T10:00"),
        ("found_location_text", "Main St"),
        ("contact_info", "555-0100"),
    ]))
    .unwrap();

    let report = store::insert_found(&db, submission, Vec::new()).await.unwrap();
    assert_eq!(report.pet_type, "cat");
    assert_eq!(report.color, "white");
    assert_eq!(report.gender, "unknown");
    assert_eq!(report.features, "friendly");
    assert_eq!(report.found_location_text, "Main St");
    assert_eq!(report.contact_info, "555-0100");
    assert_eq!(report.breed, None);
    assert!(report.photos.is_empty());
    assert_eq!(
        report.found_time.format("%Y-%m-%dT%H:%M").to_string(),
        "2024-01-01T10:00"
    );

    let listed = store::list_found(&db, &ListingFilters::default()).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, report.id);
}

#[tokio::test]
async fn photo_list_round_trips_in_order() {
    let db = test_db().await;
    let submission = forms::validate_lost(&lost_fields("dog", "brown", "Willow Park")).unwrap();
    let photos = vec!["20260301183000_ab12cd34.jpg".to_string(), "20260301183001_ef56ab78.png".to_string()];
    let report = store::insert_lost(&db, submission, photos.clone()).await.unwrap();

    let reloaded = store::list_lost(&db, &ListingFilters::default())
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.id == report.id)
        .unwrap();
    assert_eq!(reloaded.photos.0, photos);
}
