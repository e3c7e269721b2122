use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test};
use serde_json::{Value, json};

use resource_mongodb::repository::Model;
use resource_mongodb::resource::Resource;
use resource_mongodb::routes::resource_scope;
use resource_mongodb::routes::search::QueryStringSearch;

mod common;

fn users(model: Arc<common::InMemoryModel>) -> Resource {
    let model: Arc<dyn Model> = model;
    Resource::new(model).with_hooks(Arc::new(QueryStringSearch::new(None)))
}

#[actix_web::test]
async fn test_create_then_get() {
    let model = common::InMemoryModel::new("id");
    let app = test::init_service(App::new().service(resource_scope("/users", users(model.clone())))).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "name": "Chippy", "rank": 3 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "data": { "id": 1 } }));

    let req = test::TestRequest::get().uri("/users/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "data": { "id": 1, "name": "Chippy", "rank": 3 } })
    );
    assert_eq!(model.len(), 1);
}

#[actix_web::test]
async fn test_create_rejects_non_object_payload() {
    let model = common::InMemoryModel::new("id");
    let app = test::init_service(App::new().service(resource_scope("/users", users(model.clone())))).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!(["Chippy"]))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "payload invalid" }));
    assert_eq!(model.len(), 0);
}

#[actix_web::test]
async fn test_search_paginates_and_filters() {
    let model = common::InMemoryModel::new("id");
    let app = test::init_service(App::new().service(resource_scope("/users", users(model)))).await;

    for (name, active) in [("Chippy", true), ("Patrick", true), ("Adom", true), ("Zed", false)] {
        let req = test::TestRequest::post()
            .uri("/users")
            .set_json(json!({ "name": name, "active": active }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/users?active=true&limit=2&page=2&fields=name")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "data": [{ "name": "Adom" }],
            "meta": {
                "pagination": {
                    "current": { "count": 1, "page": 2, "limit": 2 },
                    "total": { "count": 3, "pages": 2 }
                }
            }
        })
    );
}

#[actix_web::test]
async fn test_search_without_matches_is_no_content() {
    let model = common::InMemoryModel::new("id");
    let app = test::init_service(App::new().service(resource_scope("/users", users(model)))).await;

    let req = test::TestRequest::get().uri("/users?name=Nobody").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let body = test::read_body(resp).await;
    assert!(body.is_empty());
}

#[actix_web::test]
async fn test_search_rejects_operators() {
    let model = common::InMemoryModel::new("id");
    let app = test::init_service(App::new().service(resource_scope("/users", users(model)))).await;

    let req = test::TestRequest::get().uri("/users?%24where=1").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn test_search_without_hooks_needs_params() {
    let model: Arc<dyn Model> = common::InMemoryModel::new("id");
    let app = test::init_service(App::new().service(resource_scope("/users", Resource::new(model)))).await;

    let req = test::TestRequest::get().uri("/users").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "no query parameters detected" }));
}

#[actix_web::test]
async fn test_update_and_remove() {
    let model = common::InMemoryModel::new("id");
    let app = test::init_service(App::new().service(resource_scope("/users", users(model.clone())))).await;

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({ "name": "Chippy" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::patch()
        .uri("/users/1")
        .set_json(json!({ "rank": 5 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/users/1").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["rank"], json!(5));

    let req = test::TestRequest::patch()
        .uri("/users/99")
        .set_json(json!({ "rank": 5 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete().uri("/users/1").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    assert_eq!(model.len(), 0);

    let req = test::TestRequest::delete().uri("/users/1").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_get_missing_document_is_not_found() {
    let model = common::InMemoryModel::new("id");
    let app = test::init_service(App::new().service(resource_scope("/users", users(model)))).await;

    let req = test::TestRequest::get().uri("/users/unknown").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
