//! Integration tests for loading the seed dataset.
//!
//! Tests cover:
//! - The built-in demo dataset
//! - Loading a JSON seed file with missing ids and optional fields
//! - Rejecting duplicate ids and invalid rides

mod common;

use common::*;

#[tokio::test]
async fn test_demo_dataset_contents() -> anyhow::Result<()> {
    let store = DashboardStore::from_seed(Seed::default())?;

    assert_eq!(store.offices().len(), 5);
    assert_eq!(store.employees().len(), 5);
    assert_eq!(store.absences().len(), 5);
    assert_eq!(store.live_rides().len(), 2);
    assert_eq!(store.site_info().name, "New Check Road");
    assert_eq!(store.current_stats().sites, 32);
    assert!(store.selected_office().is_none());
    assert_eq!(store.search_term(), "");

    // Every seeded guard starts inside their office's geofence
    for employee in store.employees() {
        let status = store.geofence_status(employee);
        assert!(
            matches!(status, Some(GeofenceStatus::Inside { .. })),
            "{} is {status:?}",
            employee.name
        );
    }

    Ok(())
}

#[tokio::test]
async fn test_seed_file_round_trip() -> anyhow::Result<()> {
    let file = create_seed_file(&Seed::default());

    let loaded = Seed::from_path(file.path())?;

    assert_eq!(loaded.offices, Seed::default().offices);
    assert_eq!(loaded.live_rides, Seed::default().live_rides);
    assert_eq!(loaded.absences[0].id, Id::new("absent1"));

    Ok(())
}

#[tokio::test]
async fn test_seed_file_with_missing_fields() -> anyhow::Result<()> {
    // 1. Minimal JSON: no ids, no image, no rides or stats
    let file = create_json_file(
        r#"{
            "offices": [
                { "name": "Pune Yard", "address": "Hinjewadi, Pune",
                  "location": { "lat": 18.5913, "lng": 73.7389 }, "guardCount": 4 }
            ],
            "employees": [
                { "name": "Ravi", "role": "Guard" },
                { "id": "e2", "name": "Meera", "role": "Supervisor",
                  "location": { "lat": 18.5914, "lng": 73.7389 }, "officeId": "pune" }
            ],
            "absences": [
                { "date": "2025-04-02", "timeRange": "4:00 PM - 12:00 AM", "site": "pune" }
            ]
        }"#,
    );

    // 2. Load and build a store
    let seed = Seed::from_path(file.path())?;
    let store = DashboardStore::from_seed(seed)?;

    // 3. Defaults filled in
    assert_eq!(store.offices().len(), 1);
    assert!(!store.offices().as_slice()[0].id.as_str().is_empty());
    let ravi = &store.employees().as_slice()[0];
    assert_eq!(ravi.image_url, DEFAULT_AVATAR_URL);
    assert_eq!(ravi.location, None);
    assert_eq!(ravi.office_id, None);
    assert_eq!(store.absences().as_slice()[0].date.to_string(), "2025-04-02");
    assert!(store.live_rides().is_empty());
    assert_eq!(store.current_stats(), &CurrentStats::default());

    Ok(())
}

#[tokio::test]
async fn test_missing_seed_file_names_the_path() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("missing.json");

    let err = Seed::from_path(&path).expect_err("file does not exist");

    assert!(format!("{err:#}").contains("missing.json"));

    Ok(())
}

#[tokio::test]
async fn test_malformed_seed_is_rejected() -> anyhow::Result<()> {
    let file = create_json_file(r#"{ "offices": [ { "name": 7 } ] }"#);
    assert!(Seed::from_path(file.path()).is_err());
    Ok(())
}

#[tokio::test]
async fn test_duplicate_ids_are_rejected() -> anyhow::Result<()> {
    let mut seed = Seed::empty();
    seed.offices = vec![
        make_office("same", "First", HYDERABAD),
        make_office("same", "Second", PUNE),
    ];

    let err = DashboardStore::from_seed(seed).expect_err("duplicate office ids");

    assert_eq!(
        err,
        StoreError::DuplicateId {
            kind: "office",
            id: Id::new("same")
        }
    );

    Ok(())
}

#[tokio::test]
async fn test_invalid_ride_is_rejected() -> anyhow::Result<()> {
    let mut seed = Seed::default();
    seed.live_rides[0].battery_percent = Some(150);

    let err = DashboardStore::from_seed(seed).expect_err("battery over 100");

    assert!(matches!(err, StoreError::InvalidRecord { kind: "live ride", .. }));

    Ok(())
}
