// src/tests/router_tests/markers_tests.rs

use crate::router::handle;
use crate::tests::utils::{get, init_test_app, post_json, read_body, read_json};
use serde_json::json;

fn seed_properties() -> serde_json::Value {
    json!([
        {"id": "p1", "name": "Villa Lamai", "location": {"coordinates": {"latitude": 9.72, "longitude": 100.01}}},
        {"id": "p2", "name": "Chaweng Loft", "coordinates": {"latitude": 9.73, "longitude": 100.02}},
        {"id": "p3", "name": "Old Farmhouse", "latitude": 9.71, "longitude": 100.00},
        {"id": "p4", "name": "Unmapped Bungalow", "address": "Somewhere on the island"}
    ])
}

#[test]
fn markers_follow_job_statuses() {
    let app = init_test_app();

    handle(post_json("/properties", seed_properties()), &app).unwrap();
    handle(
        post_json(
            "/jobs",
            json!([
                {"id": "j1", "propertyId": "p1", "status": "accepted", "title": "Deep clean"},
                {"id": "j2", "propertyId": "p3", "status": "pending"},
                {"id": "j3", "propertyId": "p3", "status": "in_progress"}
            ]),
        ),
        &app,
    )
    .unwrap();

    let mut resp = handle(get("/markers"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    let body = read_json(&mut resp);
    let markers = body["markers"].as_array().unwrap();

    // p4 has no coordinates and is left off the map.
    assert_eq!(markers.len(), 3);

    let find = |id: &str| markers.iter().find(|m| m["id"] == id).unwrap().clone();

    let p1 = find("p1");
    assert_eq!(p1["status"], "active");
    assert_eq!(p1["jobs"].as_array().unwrap().len(), 1);
    assert_eq!(p1["coordinates"]["latitude"], 9.72);

    let p2 = find("p2");
    assert_eq!(p2["status"], "inactive");
    assert_eq!(p2["jobs"].as_array().unwrap().len(), 0);

    let p3 = find("p3");
    assert_eq!(p3["status"], "active");
    assert_eq!(p3["jobs"].as_array().unwrap().len(), 2);
}

#[test]
fn filter_and_summary() {
    let app = init_test_app();
    handle(post_json("/properties", seed_properties()), &app).unwrap();
    handle(
        post_json("/jobs", json!({"id": "j1", "propertyId": "p2", "status": "offered"})),
        &app,
    )
    .unwrap();

    let mut resp = handle(get("/markers?status=pending"), &app).unwrap();
    let body = read_json(&mut resp);
    let ids: Vec<_> = body["markers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["p2"]);

    let mut resp = handle(get("/markers/summary"), &app).unwrap();
    assert_eq!(
        read_json(&mut resp),
        json!({"active": 0, "pending": 1, "inactive": 2, "total": 3})
    );

    let err = handle(get("/markers?status=busy"), &app).err().expect("request should fail");
    assert_eq!(err.status_code(), 400);
}

#[test]
fn single_marker_lookup() {
    let app = init_test_app();
    handle(post_json("/properties", seed_properties()), &app).unwrap();

    let mut resp = handle(get("/markers/p2"), &app).unwrap();
    let marker = read_json(&mut resp);
    assert_eq!(marker["name"], "Chaweng Loft");
    assert_eq!(marker["status"], "inactive");

    let err = handle(get("/markers/p4"), &app).err().expect("request should fail");
    assert_eq!(err.status_code(), 404);
}

#[test]
fn overview_page_lists_markers() {
    let app = init_test_app();
    handle(post_json("/properties", seed_properties()), &app).unwrap();

    let mut resp = handle(get("/"), &app).unwrap();
    assert_eq!(resp.status(), 200);

    let body = read_body(&mut resp);
    assert!(body.contains("Villa Lamai"));
    assert!(body.contains("1 properties have no usable coordinates"));
    assert!(!body.contains("Unmapped Bungalow"));
}

#[test]
fn unknown_route_is_not_found() {
    let app = init_test_app();
    let err = handle(get("/nope"), &app).err().expect("request should fail");
    assert_eq!(err.status_code(), 404);
}
