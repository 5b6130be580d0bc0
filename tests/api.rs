//! Fluxos HTTP completos sobre o router real, com store em memória.

mod common;

use axum::http::{Method, StatusCode};
use catalog_admin::db::CatalogStore;
use common::{access_token, body_json, build_test_app, create, get, send, sign_up};
use serde_json::json;

// ---------------------------------------------------------------------------
// Autenticação
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_routes_require_a_bearer_token() {
    let (app, _) = build_test_app();

    let response = get(&app, "/api/v1/admin/brands", None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await,
        json!({ "status": 401, "message": "unauthorized" })
    );
}

#[tokio::test]
async fn refresh_tokens_do_not_open_admin_routes() {
    let (app, _) = build_test_app();
    let tokens = sign_up(&app).await;
    let refresh = tokens["refresh_token"].as_str().unwrap();

    let response = get(&app, "/api/v1/admin/brands", Some(refresh)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app,
        Method::POST,
        "/api/v1/admin/token-refresh",
        None,
        Some(json!({ "refresh_token": refresh })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let renewed = body_json(response).await;
    let access = renewed["access_token"].as_str().unwrap();
    assert_eq!(get(&app, "/api/v1/admin/brands", Some(access)).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn sign_in_with_wrong_password_is_unauthorized() {
    let (app, _) = build_test_app();
    sign_up(&app).await;

    let response = send(
        &app,
        Method::POST,
        "/api/v1/admin/sign-in",
        None,
        Some(json!({ "email": "admin@example.com", "password": "wrong password" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Catálogo
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cascade_delete_over_http_removes_the_whole_subtree() {
    let (app, store) = build_test_app();
    let token = access_token(&app).await;

    let brand = create(&app, &token, "/api/v1/admin/brands", json!({ "name": "Acme", "slug": "acme" })).await;
    let a = create(&app, &token, "/api/v1/admin/categories", json!({ "name": "A", "slug": "a" })).await;
    let b = create(
        &app,
        &token,
        "/api/v1/admin/categories",
        json!({ "name": "B", "slug": "b", "parent_id": a }),
    )
    .await;
    let c = create(
        &app,
        &token,
        "/api/v1/admin/categories",
        json!({ "name": "C", "slug": "c", "parent_id": b }),
    )
    .await;
    for (slug, category) in [("p1", b), ("p2", c)] {
        create(
            &app,
            &token,
            "/api/v1/admin/products",
            json!({ "brand_id": brand, "category_id": category, "name": slug, "slug": slug, "price_kopeck": 100 }),
        )
        .await;
    }

    let response = send(&app, Method::DELETE, &format!("/api/v1/admin/categories/{a}"), Some(&token), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert!(store.list_categories().await.unwrap().is_empty());
    assert!(store.list_products(false).await.unwrap().is_empty());

    let again = send(&app, Method::DELETE, &format!("/api/v1/admin/categories/{a}"), Some(&token), None).await;
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn price_history_follows_price_changes() {
    let (app, _) = build_test_app();
    let token = access_token(&app).await;
    let brand = create(&app, &token, "/api/v1/admin/brands", json!({ "name": "Acme", "slug": "acme" })).await;
    let shoes = create(&app, &token, "/api/v1/admin/categories", json!({ "name": "Shoes", "slug": "shoes" })).await;
    let product = json!({
        "brand_id": brand,
        "category_id": shoes,
        "name": "Runner",
        "slug": "runner",
        "price_kopeck": 1000
    });
    let id = create(&app, &token, "/api/v1/admin/products", product.clone()).await;

    let uri = format!("/api/v1/admin/products/{id}");
    for price in [1000, 1500, 1500] {
        let mut body = product.clone();
        body["price_kopeck"] = json!(price);
        let response = send(&app, Method::PUT, &uri, Some(&token), Some(body)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get(&app, &format!("{uri}/priceHistory"), Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let history = body_json(response).await;
    let transitions: Vec<(i64, i64)> = history
        .as_array()
        .unwrap()
        .iter()
        .map(|h| (h["old_price_kopeck"].as_i64().unwrap(), h["new_price_kopeck"].as_i64().unwrap()))
        .collect();
    assert_eq!(transitions, vec![(0, 1000), (1000, 1500)]);

    let product = body_json(get(&app, &uri, Some(&token)).await).await;
    assert_eq!(product["description"], "");
    assert_eq!(product["is_active"], true);
}

#[tokio::test]
async fn product_with_unknown_brand_is_not_found() {
    let (app, store) = build_test_app();
    let token = access_token(&app).await;
    let shoes = create(&app, &token, "/api/v1/admin/categories", json!({ "name": "Shoes", "slug": "shoes" })).await;

    let response = send(
        &app,
        Method::POST,
        "/api/v1/admin/products",
        Some(&token),
        Some(json!({ "brand_id": 999, "category_id": shoes, "name": "X", "slug": "x", "price_kopeck": 1 })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(store.list_products(false).await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_brand_slug_is_a_conflict() {
    let (app, _) = build_test_app();
    let token = access_token(&app).await;
    create(&app, &token, "/api/v1/admin/brands", json!({ "name": "Acme", "slug": "acme" })).await;

    let response = send(
        &app,
        Method::POST,
        "/api/v1/admin/brands",
        Some(&token),
        Some(json!({ "name": "Other", "slug": "acme" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await,
        json!({ "status": 409, "message": "slug already exists" })
    );
}

// ---------------------------------------------------------------------------
// Entrada inválida
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_numeric_id_is_a_bad_request() {
    let (app, _) = build_test_app();
    let token = access_token(&app).await;

    let response = get(&app, "/api/v1/admin/products/abc", Some(&token)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["status"], 400);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let (app, _) = build_test_app();
    let token = access_token(&app).await;

    let response = send(
        &app,
        Method::POST,
        "/api/v1/admin/brands",
        Some(&token),
        Some(json!({ "name": "missing slug" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_slug_reports_field_details() {
    let (app, _) = build_test_app();
    let token = access_token(&app).await;

    let response = send(
        &app,
        Method::POST,
        "/api/v1/admin/brands",
        Some(&token),
        Some(json!({ "name": "Acme", "slug": "Not A Slug" })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "validation failed");
    assert!(body["details"]["slug"].is_array());
}

// ---------------------------------------------------------------------------
// Vitrine e documentação
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_reports_up() {
    let (app, _) = build_test_app();

    let response = get(&app, "/api/v1/front/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "up" }));
}

#[tokio::test]
async fn storefront_lists_only_active_products() {
    let (app, _) = build_test_app();
    let token = access_token(&app).await;
    let brand = create(&app, &token, "/api/v1/admin/brands", json!({ "name": "Acme", "slug": "acme" })).await;
    let shoes = create(&app, &token, "/api/v1/admin/categories", json!({ "name": "Shoes", "slug": "shoes" })).await;
    for (slug, is_active) in [("visible", true), ("hidden", false)] {
        create(
            &app,
            &token,
            "/api/v1/admin/products",
            json!({
                "brand_id": brand,
                "category_id": shoes,
                "name": slug,
                "slug": slug,
                "price_kopeck": 100,
                "is_active": is_active
            }),
        )
        .await;
    }

    let products = body_json(get(&app, "/api/v1/front/products", None).await).await;
    let brands = body_json(get(&app, "/api/v1/front/brands", None).await).await;

    assert_eq!(products.as_array().unwrap().len(), 1);
    assert_eq!(products[0]["slug"], "visible");
    assert_eq!(brands.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn openapi_document_lists_the_admin_routes() {
    let (app, _) = build_test_app();

    let response = get(&app, "/api/v1/openapi.json", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    assert!(doc["paths"]["/api/v1/admin/brands"].is_object());
    assert!(doc["paths"]["/api/v1/admin/products/{id}/priceHistory"].is_object());
}
