//! Store behavior against a mock backend: refresh, chunked bulk
//! mutations, selection clearing, and the undo round-trip.

use std::time::{Duration, Instant};

use httpmock::prelude::*;

use atelier_client::{ApiClient, ApiConfig};
use atelier_core::{ItemStatus, Sheet};
use atelier_engine::{FieldEdit, ItemField, SheetFilter};
use atelier_store::{BatchConfig, ProjectStore, StoreError};

fn store_for(server: &MockServer) -> ProjectStore {
    // Fast pacing for most tests; the rate-limit test uses the default.
    let batch = BatchConfig {
        chunk_size: 20,
        chunk_delay: Duration::from_millis(10),
    };
    ProjectStore::with_batch_config(
        ApiClient::new(ApiConfig::new(server.base_url())),
        "pr_1",
        batch,
    )
}

fn rooms_payload() -> serde_json::Value {
    serde_json::json!([
        { "id": "rm_1", "project_id": "pr_1", "name": "Living Room" },
        { "id": "rm_2", "project_id": "pr_1", "name": "Kitchen" }
    ])
}

fn item_payload(id: &str, room_id: &str, name: &str, status: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "project_id": "pr_1",
        "room_id": room_id,
        "name": name,
        "status": status,
        "quantity": 1,
        "created_date": "2026-08-01T12:00:00Z",
        "created_by": "designer@example.com"
    })
}

fn mock_refresh(server: &MockServer, items: serde_json::Value) {
    server.mock(|when, then| {
        when.method(GET).path("/api/rooms").query_param("project_id", "pr_1");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(rooms_payload());
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/items").query_param("project_id", "pr_1");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(items);
    });
}

#[test]
fn refresh_populates_cache_and_views() {
    let server = MockServer::start();
    mock_refresh(
        &server,
        serde_json::json!([
            item_payload("it_1", "rm_1", "Sofa", "Approved"),
            item_payload("it_2", "rm_1", "Sketch", "Walkthrough"),
        ]),
    );

    let mut store = store_for(&server);
    store.refresh().unwrap();

    assert_eq!(store.rooms().len(), 2);
    assert_eq!(store.items().len(), 2);
    assert_eq!(store.items_for_sheet(Sheet::Ffe).len(), 1);
    assert_eq!(store.items_for_sheet(Sheet::Walkthrough).len(), 1);

    let tree = store.grouped(Sheet::Ffe, &SheetFilter::all());
    assert_eq!(tree.item_count(), 1);
    assert_eq!(tree.rooms[0].room.name, "Living Room");
}

#[test]
fn bulk_delete_chunks_at_twenty_with_one_second_pauses() {
    let server = MockServer::start();
    let items: Vec<serde_json::Value> = (0..45)
        .map(|i| item_payload(&format!("it_{i:02}"), "rm_1", "Chair", "Approved"))
        .collect();
    mock_refresh(&server, serde_json::Value::Array(items));

    let delete_mock = server.mock(|when, then| {
        when.method(DELETE).path_includes("/api/items/");
        then.status(204);
    });

    // Default pacing: 20 per chunk, 1000 ms between chunk starts.
    let mut store = ProjectStore::new(
        ApiClient::new(ApiConfig::new(server.base_url())),
        "pr_1",
    );
    store.refresh().unwrap();

    let ids: Vec<String> = (0..45).map(|i| format!("it_{i:02}")).collect();
    let start = Instant::now();
    let report = store.delete_items(&ids).unwrap();
    let elapsed = start.elapsed();

    // 45 ids → chunks of 20/20/5 → two inter-chunk pauses.
    delete_mock.assert_hits(45);
    assert!(report.ok());
    assert_eq!(report.attempted, 45);
    assert!(
        elapsed >= Duration::from_millis(2000),
        "expected two 1000ms pauses, elapsed {elapsed:?}"
    );
    assert!(store.undo_available());
    assert!(!store.is_processing());
}

#[test]
fn partial_failure_still_covers_every_id() {
    let server = MockServer::start();
    mock_refresh(
        &server,
        serde_json::json!([
            item_payload("it_0", "rm_1", "Chair", "Approved"),
            item_payload("it_1", "rm_1", "Lamp", "Approved"),
            item_payload("it_2", "rm_1", "Rug", "Approved"),
        ]),
    );

    let ok_0 = server.mock(|when, then| {
        when.method(DELETE).path("/api/items/it_0");
        then.status(204);
    });
    let fail_mock = server.mock(|when, then| {
        when.method(DELETE).path("/api/items/it_1");
        then.status(500).body("backend exploded");
    });
    let ok_2 = server.mock(|when, then| {
        when.method(DELETE).path("/api/items/it_2");
        then.status(204);
    });

    let mut store = store_for(&server);
    store.refresh().unwrap();

    let ids: Vec<String> = vec!["it_0".into(), "it_1".into(), "it_2".into()];
    let report = store.delete_items(&ids).unwrap();

    fail_mock.assert();
    ok_0.assert();
    ok_2.assert();
    assert_eq!(report.attempted, 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].id, "it_1");
    assert_eq!(report.summary(), "1 of 3 operations failed");
}

#[test]
fn move_selected_clears_selection_on_success() {
    let server = MockServer::start();
    mock_refresh(
        &server,
        serde_json::json!([
            item_payload("it_1", "rm_1", "Sofa", "Walkthrough"),
            item_payload("it_2", "rm_2", "Stool", "Walkthrough"),
        ]),
    );
    let put_mock = server.mock(|when, then| {
        when.method(PUT)
            .path_includes("/api/items/")
            .json_body(serde_json::json!({ "status": "PICKED" }));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(item_payload("it_1", "rm_1", "Sofa", "PICKED"));
    });

    let mut store = store_for(&server);
    store.refresh().unwrap();

    // Selection spans rooms; the move still works in one action.
    store.selection.toggle("it_1");
    store.selection.toggle("it_2");
    let report = store.move_selected_to(ItemStatus::Picked).unwrap();

    put_mock.assert_hits(2);
    assert!(report.ok());
    assert!(store.selection.is_empty());
}

#[test]
fn move_selected_clears_selection_even_when_calls_fail() {
    let server = MockServer::start();
    mock_refresh(
        &server,
        serde_json::json!([item_payload("it_1", "rm_1", "Sofa", "Walkthrough")]),
    );
    server.mock(|when, then| {
        when.method(PUT).path_includes("/api/items/");
        then.status(500).body("nope");
    });

    let mut store = store_for(&server);
    store.refresh().unwrap();

    store.selection.toggle("it_1");
    let report = store.move_selected_to(ItemStatus::Picked).unwrap();

    assert_eq!(report.failures.len(), 1);
    assert!(store.selection.is_empty());
}

#[test]
fn undo_recreates_without_server_fields() {
    let server = MockServer::start();
    mock_refresh(
        &server,
        serde_json::json!([
            {
                "id": "it_1",
                "project_id": "pr_1",
                "room_id": "rm_1",
                "name": "Brass Pendant",
                "status": "Approved",
                "quantity": 2,
                "category": "LIGHTING",
                "sub_category": "Pendants",
                "vendor_sku": "BP-100",
                "actual_cost": 450.0,
                "created_date": "2026-08-01T12:00:00Z",
                "updated_date": "2026-08-02T09:00:00Z",
                "created_by": "designer@example.com"
            },
            {
                "id": "it_2",
                "project_id": "pr_1",
                "room_id": "rm_2",
                "name": "Oak Dining Table",
                "status": "Ordered",
                "quantity": 1,
                "category": "FURNITURE",
                "created_date": "2026-08-01T12:05:00Z"
            }
        ]),
    );
    server.mock(|when, then| {
        when.method(DELETE).path_includes("/api/items/");
        then.status(204);
    });

    // Non-identifier fields preserved verbatim, server fields absent.
    let bulk_mock = server.mock(|when, then| {
        when.method(POST).path("/api/items/bulk").json_body(serde_json::json!([
            {
                "project_id": "pr_1",
                "room_id": "rm_1",
                "name": "Brass Pendant",
                "status": "Approved",
                "quantity": 2,
                "category": "LIGHTING",
                "sub_category": "Pendants",
                "vendor_sku": "BP-100",
                "actual_cost": 450.0
            },
            {
                "project_id": "pr_1",
                "room_id": "rm_2",
                "name": "Oak Dining Table",
                "status": "Ordered",
                "quantity": 1,
                "category": "FURNITURE"
            }
        ]));
        then.status(201)
            .header("content-type", "application/json")
            .json_body(serde_json::json!([
                item_payload("it_90", "rm_1", "Brass Pendant", "Approved"),
                item_payload("it_91", "rm_2", "Oak Dining Table", "Ordered")
            ]));
    });

    let mut store = store_for(&server);
    store.refresh().unwrap();

    let ids: Vec<String> = vec!["it_1".into(), "it_2".into()];
    store.delete_items(&ids).unwrap();
    assert!(store.undo_available());

    let report = store.undo_last_delete().unwrap();
    bulk_mock.assert();
    assert!(report.ok());
    assert_eq!(report.attempted, 2);
    // The attempt consumed the slot.
    assert!(!store.undo_available());
}

#[test]
fn undo_with_empty_buffer_errors() {
    let server = MockServer::start();
    let mut store = store_for(&server);
    let err = store.undo_last_delete().unwrap_err();
    assert!(matches!(err, StoreError::NothingToUndo));
}

#[test]
fn commit_edit_patches_cache_on_success() {
    let server = MockServer::start();
    mock_refresh(
        &server,
        serde_json::json!([item_payload("it_1", "rm_1", "Sofa", "Approved")]),
    );
    let put_mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/api/items/it_1")
            .json_body(serde_json::json!({ "name": "Sectional Sofa" }));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(item_payload("it_1", "rm_1", "Sectional Sofa", "Approved"));
    });

    let mut store = store_for(&server);
    store.refresh().unwrap();

    let edit = FieldEdit {
        item_id: "it_1".into(),
        field: ItemField::Name,
        value: serde_json::json!("Sectional Sofa"),
    };
    store.commit_edit(&edit).unwrap();

    put_mock.assert();
    assert_eq!(store.item("it_1").unwrap().name, "Sectional Sofa");
}

#[test]
fn failed_edit_is_dropped_and_cache_untouched() {
    let server = MockServer::start();
    mock_refresh(
        &server,
        serde_json::json!([item_payload("it_1", "rm_1", "Sofa", "Approved")]),
    );
    server.mock(|when, then| {
        when.method(PUT).path("/api/items/it_1");
        then.status(500).body("no");
    });

    let mut store = store_for(&server);
    store.refresh().unwrap();

    let edit = FieldEdit {
        item_id: "it_1".into(),
        field: ItemField::Name,
        value: serde_json::json!("Sectional Sofa"),
    };
    let err = store.commit_edit(&edit).unwrap_err();

    assert!(matches!(err, StoreError::Api(_)));
    // The cell reverts: cache still holds the server value.
    assert_eq!(store.item("it_1").unwrap().name, "Sofa");
}

#[test]
fn delete_room_cascades_to_items_then_room() {
    let server = MockServer::start();
    mock_refresh(
        &server,
        serde_json::json!([
            item_payload("it_1", "rm_1", "Sofa", "Approved"),
            item_payload("it_2", "rm_1", "Lamp", "Approved"),
            item_payload("it_3", "rm_2", "Range", "Ordered"),
        ]),
    );
    let item_delete = server.mock(|when, then| {
        when.method(DELETE).path_includes("/api/items/");
        then.status(204);
    });
    let room_delete = server.mock(|when, then| {
        when.method(DELETE).path("/api/rooms/rm_1");
        then.status(204);
    });

    let mut store = store_for(&server);
    store.refresh().unwrap();

    let report = store.delete_room("rm_1").unwrap();

    item_delete.assert_hits(2);
    room_delete.assert();
    assert!(report.ok());
    assert_eq!(report.attempted, 2);
    // Items buffered for undo; the room itself is not restorable.
    assert!(store.undo_available());
}

#[test]
fn delete_section_targets_the_effective_grouping_key() {
    let server = MockServer::start();
    mock_refresh(
        &server,
        serde_json::json!([
            {
                "id": "it_1", "project_id": "pr_1", "room_id": "rm_1",
                "name": "Pendant A", "status": "Approved",
                "category": "LIGHTING", "sub_category": "Pendants"
            },
            {
                "id": "it_2", "project_id": "pr_1", "room_id": "rm_1",
                "name": "Pendant B", "status": "Approved",
                "category": "LIGHTING", "sub_category": "Pendants"
            },
            {
                "id": "it_3", "project_id": "pr_1", "room_id": "rm_1",
                "name": "Sconce", "status": "Approved",
                "category": "LIGHTING", "sub_category": "Sconces"
            },
            {
                "id": "it_4", "project_id": "pr_1", "room_id": "rm_1",
                "name": "Mystery", "status": "Approved"
            }
        ]),
    );
    let delete_mock = server.mock(|when, then| {
        when.method(DELETE).path_includes("/api/items/");
        then.status(204);
    });

    let mut store = store_for(&server);
    store.refresh().unwrap();

    let report = store
        .delete_section("rm_1", "LIGHTING", "Pendants")
        .unwrap();
    assert_eq!(report.attempted, 2);
    delete_mock.assert_hits(2);

    // Items with no stored category live under the derived default key.
    let report = store
        .delete_section("rm_1", "Uncategorized", "Misc.")
        .unwrap();
    assert_eq!(report.attempted, 1);
    delete_mock.assert_hits(3);
}

#[test]
fn seed_rooms_creates_one_room_per_questionnaire_entry() {
    let server = MockServer::start();
    let post_mock = server.mock(|when, then| {
        when.method(POST).path("/api/rooms");
        then.status(201)
            .header("content-type", "application/json")
            .json_body(serde_json::json!({ "id": "rm_9", "project_id": "pr_1", "name": "Kitchen" }));
    });

    let project: atelier_core::Project = serde_json::from_value(serde_json::json!({
        "id": "pr_1",
        "name": "Maple Street",
        "rooms_involved": ["Kitchen", "Primary Bedroom", "Den"]
    }))
    .unwrap();

    let mut store = store_for(&server);
    let created = store.seed_rooms_from_questionnaire(&project).unwrap();

    post_mock.assert_hits(3);
    assert_eq!(created.len(), 3);
    assert_eq!(store.rooms().len(), 3);
}
