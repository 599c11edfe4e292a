// src/tests/router_tests/properties_tests.rs

use crate::router::handle;
use crate::tests::utils::{get, init_test_app, post_json, read_json};
use serde_json::json;

#[test]
fn reimport_moves_marker() {
    let app = init_test_app();

    handle(
        post_json("/properties", json!([{"id": "p1", "latitude": 9.71, "longitude": 100.0}])),
        &app,
    )
    .unwrap();
    handle(
        post_json(
            "/properties",
            json!([{"id": "p1", "coordinates": {"latitude": 9.55, "longitude": 100.03}}]),
        ),
        &app,
    )
    .unwrap();

    let mut resp = handle(get("/markers/p1"), &app).unwrap();
    let marker = read_json(&mut resp);
    assert_eq!(marker["coordinates"]["latitude"], 9.55);
}

#[test]
fn same_import_twice_is_not_a_change() {
    let app = init_test_app();
    let props = json!([{"id": "p1", "latitude": 9.71, "longitude": 100.0}]);

    let mut first = handle(post_json("/properties", props.clone()), &app).unwrap();
    assert_eq!(read_json(&mut first)["changed"], true);

    let mut second = handle(post_json("/properties", props), &app).unwrap();
    assert_eq!(read_json(&mut second)["changed"], false);
}

#[test]
fn out_of_region_property_still_gets_a_marker() {
    let app = init_test_app();
    let mut resp = handle(
        post_json("/properties", json!([{"id": "far", "latitude": 13.75, "longitude": 100.5}])),
        &app,
    )
    .unwrap();
    assert_eq!(read_json(&mut resp)["markers"], 1);
}

#[test]
fn sync_without_directory_is_bad_request() {
    let app = init_test_app();
    let err = handle(post_json("/properties/sync", json!(null)), &app).err().expect("request should fail");
    assert_eq!(err.status_code(), 400);
}

#[test]
fn non_array_import_is_bad_request() {
    let app = init_test_app();
    let err = handle(post_json("/properties", json!({"id": "p1"})), &app).err().expect("request should fail");
    assert_eq!(err.status_code(), 400);
}
