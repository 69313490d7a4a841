//! Function entry point integration tests (inline base64 payloads).
//!
//! Run with: `cargo test -p faceswap-api --test functions_test`

mod helpers;

use faceswap_core::{ImageSize, StorageArea};
use helpers::fixtures::{self, decode, encode};
use helpers::generator::{image_chunk, text_chunk};
use helpers::{setup_test_app, setup_test_app_with_script, TEST_API_TOKEN};
use serde_json::{json, Value};

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

#[tokio::test]
async fn test_generate_returns_inline_images() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/.netlify/functions/generate")
        .json(&json!({
            "user_photo": encode(&fixtures::user_photo_bytes()),
            "template_id": helpers::SEEDED_TEMPLATE,
            "image_size": "2k",
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["text"], "");

    let images = body["images"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["mime_type"], "image/png");
    assert!(images[0]["filename"].as_str().unwrap().ends_with(".png"));
    assert_eq!(
        decode(images[0]["data"].as_str().unwrap()),
        fixtures::create_minimal_png()
    );

    // Inline results are not written to the generated area.
    assert!(app.files_in(StorageArea::Generated).is_empty());
    assert!(app.files_in(StorageArea::UserUploads).is_empty());

    let request = app.generator().last_request();
    assert_eq!(request.image_size, ImageSize::TwoK);
    assert_eq!(request.images[0].1.data, fixtures::user_photo_bytes());
}

#[tokio::test]
async fn test_generate_accepts_data_url_photo() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/.netlify/functions/generate")
        .json(&json!({
            "user_photo": format!("data:image/png;base64,{}", encode(b"face")),
            "template_id": helpers::SEEDED_TEMPLATE,
        }))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(app.generator().last_request().images[0].1.data, b"face".to_vec());
    assert_eq!(app.generator().last_request().image_size, ImageSize::OneK);
}

#[tokio::test]
async fn test_generate_missing_fields_makes_no_remote_call() {
    let app = setup_test_app().await;

    for body in [
        json!({ "template_id": helpers::SEEDED_TEMPLATE }),
        json!({ "user_photo": encode(b"face") }),
        json!({ "user_photo": "", "template_id": helpers::SEEDED_TEMPLATE }),
    ] {
        let response = app
            .client()
            .post("/.netlify/functions/generate")
            .json(&body)
            .await;

        assert_eq!(response.status_code(), 400);
        let body: Value = response.json();
        assert_eq!(body["error"], "Missing required fields");
    }

    assert_eq!(app.generator().calls(), 0);
}

#[tokio::test]
async fn test_generate_invalid_base64_is_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/.netlify/functions/generate")
        .json(&json!({
            "user_photo": "%%% not base64 %%%",
            "template_id": helpers::SEEDED_TEMPLATE,
        }))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(app.generator().calls(), 0);
}

#[tokio::test]
async fn test_generate_unknown_template_is_not_found() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/.netlify/functions/generate")
        .json(&json!({
            "user_photo": encode(b"face"),
            "template_id": "missing.png",
        }))
        .await;

    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"], "Template not found");
    assert_eq!(app.generator().calls(), 0);
}

#[tokio::test]
async fn test_generate_without_images_fails() {
    let app = setup_test_app_with_script(vec![Ok(text_chunk("I cannot do that."))]).await;

    let response = app
        .client()
        .post("/.netlify/functions/generate")
        .json(&json!({
            "user_photo": encode(b"face"),
            "template_id": helpers::SEEDED_TEMPLATE,
        }))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"], "Generation failed");
}

#[tokio::test]
async fn test_generate_remote_failure_is_server_error() {
    let app = setup_test_app_with_script(vec![
        Ok(image_chunk("image/png", b"partial")),
        Err("stream interrupted".to_string()),
    ])
    .await;

    let response = app
        .client()
        .post("/.netlify/functions/generate")
        .json(&json!({
            "user_photo": encode(b"face"),
            "template_id": helpers::SEEDED_TEMPLATE,
        }))
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("stream interrupted"));
}

#[tokio::test]
async fn test_admin_functions_reject_without_valid_token() {
    let app = setup_test_app().await;
    let client = app.client();

    let valid_upload = json!({ "template": encode(&fixtures::create_minimal_png()) });
    let responses = vec![
        client
            .post("/.netlify/functions/admin-upload")
            .json(&valid_upload)
            .await,
        client
            .post("/.netlify/functions/admin-upload")
            .add_header("Authorization", bearer("wrong-token"))
            .json(&valid_upload)
            .await,
        client
            .post("/.netlify/functions/admin-upload")
            .add_header("Authorization", bearer("wrong-token"))
            .json(&json!({}))
            .await,
        client
            .post("/.netlify/functions/admin-upload")
            .add_header("Authorization", TEST_API_TOKEN.to_string())
            .json(&valid_upload)
            .await,
        client
            .delete(&format!(
                "/.netlify/functions/admin-delete/{}",
                helpers::SEEDED_TEMPLATE
            ))
            .add_header("Authorization", bearer("wrong-token"))
            .await,
    ];

    let expected: Value = responses[0].json();
    assert_eq!(expected["error"], "Unauthorized");
    for response in &responses {
        assert_eq!(response.status_code(), 401);
        assert_eq!(response.json::<Value>(), expected);
    }

    assert_eq!(
        app.files_in(StorageArea::Templates),
        vec![helpers::SEEDED_TEMPLATE.to_string()]
    );
}

#[tokio::test]
async fn test_admin_upload_and_delete_with_token() {
    let app = setup_test_app().await;
    let client = app.client();

    let upload = client
        .post("/.netlify/functions/admin-upload")
        .add_header("Authorization", bearer(TEST_API_TOKEN))
        .json(&json!({ "template": encode(&fixtures::create_minimal_png()) }))
        .await;

    assert_eq!(upload.status_code(), 200);
    let body: Value = upload.json();
    let filename = body["filename"].as_str().unwrap().to_string();
    assert!(filename.ends_with(".png"));
    assert_eq!(body["path"], format!("/static/templates_gallery/{}", filename));

    let stored = std::fs::read(app.area_dir(StorageArea::Templates).join(&filename)).unwrap();
    assert_eq!(stored, fixtures::create_minimal_png());

    let delete_path = format!("/.netlify/functions/admin-delete/{}", filename);
    let deleted = client
        .delete(&delete_path)
        .add_header("Authorization", bearer(TEST_API_TOKEN))
        .await;
    assert_eq!(deleted.status_code(), 200);
    assert_eq!(deleted.json::<Value>()["success"], true);

    let again = client
        .delete(&delete_path)
        .add_header("Authorization", bearer(TEST_API_TOKEN))
        .await;
    assert_eq!(again.status_code(), 404);
    assert_eq!(again.json::<Value>()["error"], "File not found");
}

#[tokio::test]
async fn test_admin_upload_without_data_is_rejected() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/.netlify/functions/admin-upload")
        .add_header("Authorization", bearer(TEST_API_TOKEN))
        .json(&json!({}))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"], "No template data provided");
}

#[tokio::test]
async fn test_function_routes_reject_wrong_method() {
    let app = setup_test_app().await;

    let response = app.client().get("/.netlify/functions/generate").await;

    assert_eq!(response.status_code(), 405);
}
