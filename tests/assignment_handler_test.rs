mod common;

use axum::http::StatusCode;
use bson::oid::ObjectId;
use common::{setup_app, TestApp};
use serde_json::{json, Value};

async fn create(app: &TestApp, title: &str, owner: &str, due: &str) -> String {
    let (status, body) = app
        .post(
            "/assignment",
            json!({
                "title": title,
                "difficultyLevel": "easy",
                "assignmentNumber": 1,
                "description": "practice",
                "assignmentLastDate": due,
                "image": "https://img/x.png",
                "ownerEmail": owner,
            }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["acknowledged"], true);
    body["insertedId"].as_str().unwrap().to_string()
}

fn titles(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|a| a["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_list_by_owner_sorted_by_due_date_desc() {
    let app = setup_app();
    create(&app, "early", "teach@x.com", "2024-01-10").await;
    create(&app, "late", "teach@x.com", "2024-03-01").await;
    create(&app, "other", "someone@x.com", "2024-12-31").await;
    create(&app, "middle", "teach@x.com", "2024-02-15").await;

    let (status, body) = app.get("/assignment?email=teach@x.com", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["late", "middle", "early"]);

    let (_, body) = app.get("/allAssignment", None).await;
    assert_eq!(body.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_get_by_id_and_not_found() {
    let app = setup_app();
    let id = create(&app, "graphs", "teach@x.com", "2024-05-01").await;

    let (status, body) = app.get(&format!("/assignment/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "graphs");
    assert_eq!(body["ownerEmail"], "teach@x.com");

    let missing = ObjectId::new().to_hex();
    let (status, body) = app.get(&format!("/assignment/{}", missing), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NotFound");
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = setup_app();
    let (status, body) = app.get("/assignment/not-a-valid-id", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");
}

#[tokio::test]
async fn test_patch_replaces_named_fields() {
    let app = setup_app();
    let id = create(&app, "draft", "teach@x.com", "2024-05-01").await;
    let token = app.token_for("teach@x.com");

    let (status, body) = app
        .patch(
            &format!("/assignment/{}", id),
            Some(json!({
                "title": "final",
                "difficultyLevel": "hard",
                "assignmentNumber": 2,
                "description": "updated",
                "assignmentLastDate": "2024-06-01",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matchedCount"], 1);
    assert_eq!(body["modifiedCount"], 1);
    assert!(body["upsertedId"].is_null());

    let (_, body) = app.get(&format!("/assignment/{}", id), None).await;
    assert_eq!(body["title"], "final");
    assert_eq!(body["difficultyLevel"], "hard");
    // Omitted named fields are cleared; the owner is untouched.
    assert!(body["image"].is_null());
    assert_eq!(body["ownerEmail"], "teach@x.com");
}

#[tokio::test]
async fn test_patch_missing_assignment_matches_nothing() {
    let app = setup_app();
    let token = app.token_for("teach@x.com");
    let missing = ObjectId::new().to_hex();
    let (status, body) = app
        .patch(&format!("/assignment/{}", missing), Some(json!({ "title": "x" })), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matchedCount"], 0);
}

#[tokio::test]
async fn test_delete_existing_and_missing() {
    let app = setup_app();
    let id = create(&app, "doomed", "teach@x.com", "2024-05-01").await;
    let token = app.token_for("teach@x.com");

    let (status, body) = app.delete(&format!("/assignment/{}", id), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "acknowledged": true, "deletedCount": 1 }));

    let (status, body) = app.delete(&format!("/assignment/{}", id), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedCount"], 0);
}

#[tokio::test]
async fn test_owned_list_requires_matching_email() {
    let app = setup_app();
    create(&app, "mine", "teach@x.com", "2024-05-01").await;
    create(&app, "theirs", "other@x.com", "2024-05-02").await;

    let token = app.token_for("teach@x.com");
    let (status, body) = app.get("/assignmentAl?email=teach@x.com", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["mine"]);

    let (status, _) = app.get("/assignmentAl?email=other@x.com", Some(&token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get("/assignmentAl", Some(&token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = setup_app();
    let (status, body) = app.post("/assignment", json!("just a string"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid request body");
}

#[tokio::test]
async fn test_listed_id_drives_by_id_routes() {
    let app = setup_app();
    create(&app, "graphs", "teach@x.com", "2024-05-01").await;
    let token = app.token_for("teach@x.com");

    let (_, listed) = app.get("/allAssignment", None).await;
    let id = listed[0]["_id"].as_str().expect("listed _id is a hex string").to_string();

    let (status, body) = app.get(&format!("/assignment/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["_id"], id);
    assert_eq!(body["title"], "graphs");

    let (status, body) = app.delete(&format!("/assignment/{}", id), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedCount"], 1);
}

#[tokio::test]
async fn test_list_without_email_is_bad_request() {
    let app = setup_app();
    create(&app, "graphs", "teach@x.com", "2024-05-01").await;

    let (status, body) = app.get("/assignment", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadRequest");

    let (status, _) = app.get("/assignment?email=not-an-email", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_loose_number_and_unknown_fields_round_trip() {
    let app = setup_app();
    let (status, body) = app
        .post(
            "/assignment",
            json!({
                "title": "graphs",
                "assignmentNumber": "3",
                "ownerEmail": "teach@x.com",
                "category": "algorithms",
                "rubric": { "max": 60 },
            }),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["insertedId"].as_str().unwrap().to_string();

    let (_, body) = app.get(&format!("/assignment/{}", id), None).await;
    assert_eq!(body["assignmentNumber"], "3");
    assert_eq!(body["category"], "algorithms");
    assert_eq!(body["rubric"]["max"], 60);

    // PATCH replaces the named fields only.
    let token = app.token_for("teach@x.com");
    let (status, _) = app
        .patch(&format!("/assignment/{}", id), Some(json!({ "title": "trees", "assignmentNumber": 4 })), Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = app.get(&format!("/assignment/{}", id), None).await;
    assert_eq!(body["assignmentNumber"], 4);
    assert_eq!(body["category"], "algorithms");
}
