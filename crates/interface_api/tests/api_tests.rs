//! End-to-end tests of the HTTP surface over the in-memory store

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use core_kernel::BreedId;
use domain_cattery::{Breed, InMemoryCattery};
use interface_api::{create_router, AppState};
use test_utils::{seeded_store, BreedFixtures, KittenBuilder};

async fn app() -> (Router, InMemoryCattery, Breed) {
    let (store, breed) = seeded_store().await;
    let state = AppState::new(Arc::new(store.clone()), Arc::new(store.clone()));
    (create_router(state), store, breed)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let resp = app
        .clone()
        .oneshot(builder.body(body).expect("failed to build request"))
        .await
        .expect("request failed");

    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response is not JSON")
    };
    (status, value)
}

async fn create(app: &Router, builder: &KittenBuilder) -> Value {
    let (status, body) = send(app, "POST", "/kittens/", Some(builder.json())).await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    body
}

mod create {
    use super::*;

    #[tokio::test]
    async fn returns_kitten_with_breed() {
        let (app, _, breed) = app().await;

        let body = create(&app, &KittenBuilder::new(breed.id)).await;

        assert_eq!(
            body,
            json!({
                "id": 1,
                "color": "black",
                "age": 1,
                "description": "Fluffy",
                "breedId": breed.id,
                "breed": {"id": breed.id, "name": BreedFixtures::SIAMESE},
            })
        );
    }

    #[tokio::test]
    async fn accepts_snake_case_breed_id() {
        let (app, _, breed) = app().await;

        let payload = json!({"color": "grey", "age": 3, "description": "Tom", "breed_id": breed.id});
        let (status, body) = send(&app, "POST", "/kittens", Some(payload)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["breedId"], json!(breed.id));
    }

    #[tokio::test]
    async fn unknown_breed_is_bad_request_with_detail() {
        let (app, _, _) = app().await;

        let payload = KittenBuilder::new(BreedId::new(999)).json();
        let (status, body) = send(&app, "POST", "/kittens/", Some(payload)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
        assert_eq!(
            body["detail"],
            "Key (breed_id)=(999) is not present in table \"breeds\"."
        );
    }

    #[tokio::test]
    async fn missing_field_is_unprocessable() {
        let (app, _, breed) = app().await;

        let payload = json!({"color": "black", "age": 1, "breedId": breed.id});
        let (status, body) = send(&app, "POST", "/kittens/", Some(payload)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn negative_age_is_unprocessable() {
        let (app, _, breed) = app().await;

        let payload = KittenBuilder::new(breed.id).age(-1).json();
        let (status, _) = send(&app, "POST", "/kittens/", Some(payload)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let (app, _, _) = app().await;

        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/kittens/")
                    .header("content-type", "application/json")
                    .body(Body::from("not-json"))
                    .expect("failed to build request"),
            )
            .await
            .expect("request failed");

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

mod read {
    use super::*;

    #[tokio::test]
    async fn list_returns_kittens_in_id_order() {
        let (app, _, breed) = app().await;
        create(&app, &KittenBuilder::new(breed.id).description("first")).await;
        create(&app, &KittenBuilder::new(breed.id).description("second")).await;

        let (status, body) = send(&app, "GET", "/kittens/", None).await;

        assert_eq!(status, StatusCode::OK);
        let descriptions: Vec<_> = body
            .as_array()
            .expect("list is an array")
            .iter()
            .map(|k| k["description"].clone())
            .collect();
        assert_eq!(descriptions, vec![json!("first"), json!("second")]);
    }

    #[tokio::test]
    async fn list_filters_by_breed() {
        let (app, store, siamese) = app().await;
        let persian = store.insert_breed(BreedFixtures::PERSIAN).await.unwrap();
        create(&app, &KittenBuilder::new(siamese.id)).await;
        create(&app, &KittenBuilder::new(persian.id)).await;

        for uri in [
            format!("/kittens?breed_id={}", persian.id),
            format!("/kittens/?breedId={}", persian.id),
        ] {
            let (status, body) = send(&app, "GET", &uri, None).await;
            assert_eq!(status, StatusCode::OK);
            let kittens = body.as_array().expect("list is an array");
            assert_eq!(kittens.len(), 1, "{uri}");
            assert_eq!(kittens[0]["breed"]["name"], BreedFixtures::PERSIAN);
        }
    }

    #[tokio::test]
    async fn list_of_breed_without_kittens_is_empty() {
        let (app, _, _) = app().await;

        let (status, body) = send(&app, "GET", "/kittens/?breed_id=42", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn get_returns_created_kitten() {
        let (app, _, breed) = app().await;
        let created = create(&app, &KittenBuilder::new(breed.id)).await;

        let (status, body) = send(&app, "GET", "/kittens/1", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, created);
    }

    #[tokio::test]
    async fn breeds_are_listed() {
        let (app, store, siamese) = app().await;
        let persian = store.insert_breed(BreedFixtures::PERSIAN).await.unwrap();

        for uri in ["/breeds", "/breeds/"] {
            let (status, body) = send(&app, "GET", uri, None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(
                body,
                json!([
                    {"id": siamese.id, "name": BreedFixtures::SIAMESE},
                    {"id": persian.id, "name": BreedFixtures::PERSIAN},
                ])
            );
        }
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn put_replaces_every_field() {
        let (app, store, siamese) = app().await;
        let persian = store.insert_breed(BreedFixtures::PERSIAN).await.unwrap();
        create(&app, &KittenBuilder::new(siamese.id)).await;

        let replacement = KittenBuilder::new(persian.id)
            .color("white")
            .age(2)
            .description("Mittens");
        let (status, body) = send(&app, "PUT", "/kittens/1", Some(replacement.json())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["color"], "white");
        assert_eq!(body["age"], 2);
        assert_eq!(body["description"], "Mittens");
        assert_eq!(body["breed"]["name"], BreedFixtures::PERSIAN);
    }

    #[tokio::test]
    async fn put_requires_every_field() {
        let (app, _, breed) = app().await;
        create(&app, &KittenBuilder::new(breed.id)).await;

        let (status, _) = send(&app, "PUT", "/kittens/1", Some(json!({"age": 2}))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn patch_changes_only_supplied_fields() {
        let (app, _, breed) = app().await;
        create(&app, &KittenBuilder::new(breed.id)).await;

        let patch = json!({"age": 2, "description": "Mittens"});
        let (status, body) = send(&app, "PATCH", "/kittens/1", Some(patch)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["age"], 2);
        assert_eq!(body["description"], "Mittens");
        assert_eq!(body["color"], "black");
        assert_eq!(body["breedId"], json!(breed.id));
    }

    #[tokio::test]
    async fn empty_patch_leaves_kitten_unchanged() {
        let (app, _, breed) = app().await;
        let created = create(&app, &KittenBuilder::new(breed.id)).await;

        let (status, body) = send(&app, "PATCH", "/kittens/1", Some(json!({}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, created);
    }

    #[tokio::test]
    async fn patch_with_null_is_unprocessable() {
        let (app, _, breed) = app().await;
        create(&app, &KittenBuilder::new(breed.id)).await;

        let (status, body) = send(&app, "PATCH", "/kittens/1", Some(json!({"color": null}))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn patch_to_unknown_breed_is_bad_request() {
        let (app, _, breed) = app().await;
        create(&app, &KittenBuilder::new(breed.id)).await;

        let (status, _) = send(&app, "PATCH", "/kittens/1", Some(json!({"breedId": 999}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = send(&app, "GET", "/kittens/1", None).await;
        assert_eq!(body["breedId"], json!(breed.id));
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn delete_then_not_found() {
        let (app, _, breed) = app().await;
        create(&app, &KittenBuilder::new(breed.id)).await;

        let (status, body) = send(&app, "DELETE", "/kittens/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(true));

        let (status, _) = send(&app, "GET", "/kittens/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", "/kittens/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

mod missing {
    use super::*;

    #[tokio::test]
    async fn every_item_route_reports_not_found() {
        let (app, _, breed) = app().await;
        let full = KittenBuilder::new(breed.id).json();

        let requests = [
            ("GET", None),
            ("PUT", Some(full)),
            ("PATCH", Some(json!({"age": 2}))),
            ("DELETE", None),
        ];

        for (method, body) in requests {
            let (status, body) = send(&app, method, "/kittens/77", body).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method}");
            assert_eq!(
                body,
                json!({"error": "not_found", "detail": "Kitten not found"}),
                "{method}"
            );
        }
    }
}

mod malformed_parameters {
    use super::*;

    async fn raw(app: &Router, method: &str, uri: &str) -> (StatusCode, String, Value) {
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .expect("failed to build request"),
            )
            .await
            .expect("request failed");

        let status = resp.status();
        let content_type = resp
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read body");
        let body = serde_json::from_slice(&bytes).expect("error body is not JSON");
        (status, content_type, body)
    }

    #[tokio::test]
    async fn bad_ids_get_json_validation_errors() {
        let (app, _, _) = app().await;

        for (method, uri) in [
            ("GET", "/kittens/abc"),
            ("DELETE", "/kittens/99999999999"),
            ("PATCH", "/kittens/1.5"),
        ] {
            let (status, content_type, body) = raw(&app, method, uri).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{method} {uri}");
            assert_eq!(content_type, "application/json", "{method} {uri}");
            assert_eq!(body["error"], "validation_error", "{method} {uri}");
            assert!(body["detail"].is_string(), "{method} {uri}");
        }
    }

    #[tokio::test]
    async fn bad_breed_filters_get_json_validation_errors() {
        let (app, _, _) = app().await;

        for uri in [
            "/kittens/?breed_id=abc",
            "/kittens?breedId=1.5",
            "/kittens/?breed_id=1&breedId=1",
        ] {
            let (status, content_type, body) = raw(&app, "GET", uri).await;
            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
            assert_eq!(content_type, "application/json", "{uri}");
            assert_eq!(body["error"], "validation_error", "{uri}");
        }
    }
}

mod health {
    use super::*;

    #[tokio::test]
    async fn liveness_and_readiness() {
        let (app, _, _) = app().await;

        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");

        let (status, body) = send(&app, "GET", "/health/ready", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn store_outage_is_masked() {
        let (app, store, _) = app().await;
        store.set_unavailable(true);

        let (status, body) = send(&app, "GET", "/kittens/", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"error": "internal_error", "detail": "An unexpected error occurred."})
        );

        let (status, _) = send(&app, "GET", "/health/ready", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        let (status, _) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn responses_carry_a_request_id() {
        let (app, _, _) = app().await;

        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("failed to build request"),
            )
            .await
            .expect("request failed");

        assert!(resp.headers().contains_key(interface_api::REQUEST_ID_HEADER));
    }
}
