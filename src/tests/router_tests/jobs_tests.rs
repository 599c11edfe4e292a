// src/tests/router_tests/jobs_tests.rs

use crate::router::handle;
use crate::tests::utils::{get, init_test_app, post_json, read_json};
use serde_json::json;

fn app_with_property() -> crate::app::App {
    let app = init_test_app();
    handle(
        post_json(
            "/properties",
            json!([{"id": "p1", "location": {"coordinates": {"latitude": 9.72, "longitude": 100.01}}}]),
        ),
        &app,
    )
    .unwrap();
    app
}

#[test]
fn unchanged_push_keeps_revision() {
    let app = app_with_property();
    let job = json!({"id": "j1", "propertyId": "p1", "status": "accepted"});

    let mut first = handle(post_json("/jobs", job.clone()), &app).unwrap();
    let first = read_json(&mut first);
    assert_eq!(first["changed"], true);

    let mut second = handle(post_json("/jobs", job), &app).unwrap();
    let second = read_json(&mut second);
    assert_eq!(second["changed"], false);
    assert_eq!(second["revision"], first["revision"]);

    let mut refresh = handle(post_json("/refresh", json!(null)), &app).unwrap();
    assert_eq!(read_json(&mut refresh)["changed"], false);
}

#[test]
fn completed_job_clears_the_marker() {
    let app = app_with_property();

    handle(
        post_json("/jobs", json!({"id": "j1", "propertyId": "p1", "status": "in_progress"})),
        &app,
    )
    .unwrap();
    handle(
        post_json("/jobs", json!({"id": "j1", "propertyId": "p1", "status": "completed"})),
        &app,
    )
    .unwrap();

    let mut resp = handle(get("/markers/p1"), &app).unwrap();
    let marker = read_json(&mut resp);
    assert_eq!(marker["status"], "inactive");
    assert_eq!(marker["jobs"].as_array().unwrap().len(), 0);
}

#[test]
fn jobs_without_property_are_ignored() {
    let app = app_with_property();

    let mut resp = handle(
        post_json("/jobs", json!([{"id": "j9", "status": "accepted"}])),
        &app,
    )
    .unwrap();
    let outcome = read_json(&mut resp);
    assert_eq!(outcome["changed"], false);
    assert_eq!(outcome["jobs_seen"], 1);
}

#[test]
fn malformed_job_is_bad_request() {
    let app = app_with_property();
    let err = handle(post_json("/jobs", json!({"propertyId": "p1"})), &app).err().expect("request should fail");
    assert_eq!(err.status_code(), 400);
}

#[test]
fn refresh_log_records_passes() {
    let app = app_with_property();
    handle(
        post_json("/jobs", json!({"id": "j1", "propertyId": "p1", "status": "assigned"})),
        &app,
    )
    .unwrap();

    let mut resp = handle(get("/refreshes"), &app).unwrap();
    let log = read_json(&mut resp);
    let log = log.as_array().unwrap();

    // startup, property import, job update; newest first
    assert_eq!(log.len(), 3);
    assert_eq!(log[0]["trigger"], "job_update");
    assert_eq!(log[0]["changed"], true);
    assert_eq!(log[2]["trigger"], "startup");
}
