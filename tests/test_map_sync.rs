//! Integration tests for marker and geofence synchronisation.
//!
//! Tests cover:
//! - One marker and one 500 m circle per office
//! - Guard colours and popups inside, outside and without an office
//! - Clearing on resync, unmount and drop
//! - Resolving marker clicks back to offices

mod common;

use common::*;

#[tokio::test]
async fn test_sync_places_office_markers_and_geofences() -> anyhow::Result<()> {
    // 1. Sync the demo data
    let store = create_test_store();
    let mut surface = RecordingSurface::default();
    let mut view = MapView::new(&mut surface);
    view.sync(store.offices(), store.employees());
    assert_eq!(view.layer_count(), 15);
    drop(view);

    // 2. Dropping the view removed everything again
    assert!(surface.live.is_empty());
    assert_eq!(surface.removed.len(), 15);
    assert_eq!(surface.views, vec![(INITIAL_CENTER, INITIAL_ZOOM)]);

    Ok(())
}

#[tokio::test]
async fn test_office_marker_popup_and_circle() -> anyhow::Result<()> {
    let offices = vec![make_office("hq", "Hyderabad HQ", HYDERABAD)];
    let employees: Vec<Employee> = Vec::new();
    let mut view = MapView::new(RecordingSurface::default());

    view.sync(&offices, &employees);

    let surface = view.surface();
    let marker = surface.marker_named("Hyderabad HQ").expect("office marker");
    assert_eq!(marker.kind, MarkerKind::Office);
    assert_eq!(marker.color, Color::BLUE);
    assert_eq!(
        marker.popup.as_deref(),
        Some("Hyderabad HQ\nHyderabad HQ address\nGuards: 3")
    );

    let circles = surface.circles();
    assert_eq!(circles.len(), 1);
    assert_eq!(circles[0].center, HYDERABAD);
    assert_eq!(circles[0].radius_m, GEOFENCE_RADIUS_M);
    assert_eq!(circles[0].radius_m, 500.0);

    Ok(())
}

#[tokio::test]
async fn test_guard_outside_geofence_is_flagged() -> anyhow::Result<()> {
    // 1. One guard 501 m north of the office, one 499 m north
    let offices = vec![make_office("hq", "Hyderabad HQ", HYDERABAD)];
    let employees = vec![
        make_employee("far", "Far Guard", Some(geo::offset_north(HYDERABAD, 501.0)), Some("hq")),
        make_employee("near", "Near Guard", Some(geo::offset_north(HYDERABAD, 499.0)), Some("hq")),
    ];
    let mut view = MapView::new(RecordingSurface::default());
    view.sync(&offices, &employees);

    // 2. The far guard is red and says so
    let far = view.surface().marker_named("Far Guard").expect("far marker");
    assert_eq!(far.color, Color::RED);
    assert_eq!(
        far.popup.as_deref(),
        Some("Guard: Far Guard\nOffice: Hyderabad HQ\nOutside Geofence!")
    );
    assert_eq!(
        far.kind,
        MarkerKind::Guard {
            avatar_url: "https://example.test/far.jpg".to_string()
        }
    );

    // 3. The near guard is green without the warning
    let near = view.surface().marker_named("Near Guard").expect("near marker");
    assert_eq!(near.color, Color::GREEN);
    assert_eq!(
        near.popup.as_deref(),
        Some("Guard: Near Guard\nOffice: Hyderabad HQ")
    );

    // 4. Placements agree
    let guards = view.guards();
    assert_eq!(guards.len(), 2);
    assert!(guards[0].status.is_outside());
    assert!(!guards[1].status.is_outside());

    Ok(())
}

#[tokio::test]
async fn test_guard_without_office_is_never_flagged() -> anyhow::Result<()> {
    let offices = vec![make_office("hq", "Hyderabad HQ", HYDERABAD)];
    let employees = vec![
        make_employee("loose", "Loose Guard", Some(PUNE), None),
        make_employee("orphan", "Orphan Guard", Some(PUNE), Some("deleted-office")),
    ];
    let mut view = MapView::new(RecordingSurface::default());
    view.sync(&offices, &employees);

    for name in ["Loose Guard", "Orphan Guard"] {
        let marker = view.surface().marker_named(name).expect("guard marker");
        assert_eq!(marker.color, Color::GREEN);
        assert_eq!(
            marker.popup.as_deref(),
            Some(format!("Guard: {name}\nOffice: N/A").as_str())
        );
    }
    assert!(view
        .guards()
        .iter()
        .all(|guard| guard.status == GeofenceStatus::Unassigned && guard.office_name.is_none()));

    Ok(())
}

#[tokio::test]
async fn test_employee_without_position_has_no_marker() -> anyhow::Result<()> {
    let offices = vec![make_office("hq", "Hyderabad HQ", HYDERABAD)];
    let employees = vec![make_employee("desk", "Desk Guard", None, Some("hq"))];
    let mut view = MapView::new(RecordingSurface::default());

    view.sync(&offices, &employees);

    assert!(view.surface().marker_named("Desk Guard").is_none());
    assert!(view.guards().is_empty());
    assert_eq!(view.layer_count(), 2);

    Ok(())
}

#[tokio::test]
async fn test_resync_replaces_previous_layers() -> anyhow::Result<()> {
    // 1. First sync with the demo data
    let mut store = create_test_store();
    let mut view = MapView::new(RecordingSurface::default());
    view.sync(store.offices(), store.employees());
    let first: Vec<LayerId> = view.surface().live.keys().copied().collect();

    // 2. Remove an office and sync again
    store.delete_office(&Id::new("office5"))?;
    view.sync(store.offices(), store.employees());

    // 3. Every earlier layer is gone, the new set is smaller
    let surface = view.surface();
    assert!(first.iter().all(|layer| !surface.live.contains_key(layer)));
    assert_eq!(surface.live.len(), 13);
    assert_eq!(view.layer_count(), 13);
    assert!(surface.marker_named("Mumbai West").is_none());

    Ok(())
}

#[tokio::test]
async fn test_unmount_is_idempotent() -> anyhow::Result<()> {
    let store = create_test_store();
    let mut view = MapView::new(RecordingSurface::default());
    view.sync(store.offices(), store.employees());

    view.unmount();
    view.unmount();

    assert_eq!(view.layer_count(), 0);
    assert!(view.surface().live.is_empty());
    assert_eq!(view.surface().removed.len(), 15);

    // A later sync works as before
    view.sync(store.offices(), store.employees());
    assert_eq!(view.layer_count(), 15);

    Ok(())
}

#[tokio::test]
async fn test_marker_click_resolves_office() -> anyhow::Result<()> {
    // 1. One office on a scene, nothing else
    let offices = vec![make_office("hq", "Hyderabad HQ", HYDERABAD)];
    let employees = vec![make_employee("g", "Guard", Some(PUNE), None)];
    let mut view = MapView::new(Scene::new());
    view.sync(&offices, &employees);

    // 2. Find the layers by kind
    let scene = view.surface();
    let office_layer = scene
        .markers()
        .find(|(_, marker)| marker.kind == MarkerKind::Office)
        .map(|(layer, _)| layer)
        .expect("office marker");
    let guard_layer = scene
        .markers()
        .find(|(_, marker)| marker.label == "Guard")
        .map(|(layer, _)| layer)
        .expect("guard marker");

    // 3. Only the office marker reports an office
    assert_eq!(view.marker_clicked(office_layer), Some(&Id::new("hq")));
    assert_eq!(view.marker_clicked(guard_layer), None);

    // 4. A click on the projected office position hits its marker
    let (x, y) = scene.project(HYDERABAD, 720.0, 440.0);
    assert_eq!(scene.hit_test(x + 3.0, y - 3.0, 720.0, 440.0), Some(office_layer));
    assert_eq!(scene.hit_test(x + 100.0, y, 720.0, 440.0), None);

    Ok(())
}

#[tokio::test]
async fn test_marker_click_selects_office_in_store() -> anyhow::Result<()> {
    let mut store = create_test_store();
    let mut view = MapView::new(Scene::new());
    view.sync(store.offices(), store.employees());

    let layer = view
        .surface()
        .markers()
        .find(|(_, marker)| marker.label == "Mumbai West")
        .map(|(layer, _)| layer)
        .expect("Mumbai marker");
    let office = view.marker_clicked(layer).cloned().expect("office id");
    store.select_office(&office)?;

    assert_eq!(
        store.selected_office().map(|o| o.name.as_str()),
        Some("Mumbai West")
    );

    Ok(())
}
