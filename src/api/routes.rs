//! API routes

use crate::api::handlers::{
    create_popular_shoe, create_product, delete_popular_shoe, delete_product,
    delete_product_photo, get_product, get_shipping_fee, list_orders, list_popular_shoes,
    list_products, update_product, update_shipping_fee, AppState,
};
use crate::auth::handlers::{login, profile, signup};
use crate::auth::middleware::authenticate;
use axum::{
    middleware,
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde_json::{json, Value};

/// Health check endpoint handler
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().timestamp(),
    }))
}

/// Build the API routes
pub fn build_api_routes(state: AppState) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/api/admin/signup", post(signup))
        .route("/api/admin/login", post(login))
        .route("/api/products", get(list_products))
        .route("/api/products/:id", get(get_product))
        .route(
            "/api/shipping-fee",
            get(get_shipping_fee).put(update_shipping_fee),
        )
        .route(
            "/api/popular-shoes",
            get(list_popular_shoes).post(create_popular_shoe),
        )
        .route("/api/popular-shoes/:id", delete(delete_popular_shoe))
        .route("/orders", get(list_orders))
        .route("/api/health", get(health_check));

    // Protected routes: profile plus catalog mutations, all behind the
    // bearer-token middleware applied once to the group
    let protected_routes = Router::new()
        .route("/api/admin/profile", get(profile))
        .route("/api/products", post(create_product))
        .route(
            "/api/products/:id",
            put(update_product).delete(delete_product),
        )
        .route(
            "/api/products/:id/photo/:photo_name",
            delete(delete_product_photo),
        )
        .layer(middleware::from_fn_with_state(state.clone(), authenticate));

    public_routes.merge(protected_routes).with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::issue_token;
    use crate::core::uploads::UploadStore;
    use crate::db::manager::DatabaseManager;
    use crate::db::repository::{
        AdminRepository, OrderRepository, PopularShoeRepository, ProductRepository,
        ShippingFeeRepository,
    };
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::util::ServiceExt; // For oneshot method

    const TEST_SECRET: &str = "test-secret";

    fn test_app() -> (Router, AppState, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let db = Arc::new(DatabaseManager::new_in_memory().unwrap());
        let uploads =
            Arc::new(UploadStore::new(temp_dir.path().join("uploads")).unwrap());

        let state = AppState {
            admin_repo: Arc::new(AdminRepository::new(db.clone())),
            product_repo: Arc::new(ProductRepository::new(db.clone())),
            popular_shoe_repo: Arc::new(PopularShoeRepository::new(db.clone())),
            shipping_fee_repo: Arc::new(ShippingFeeRepository::new(db.clone())),
            order_repo: Arc::new(OrderRepository::new(db)),
            uploads,
            jwt_secret: Arc::new(TEST_SECRET.to_string()),
            token_ttl_secs: 3600,
        };

        (build_api_routes(state.clone()), state, temp_dir)
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn multipart_body(boundary: &str, parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, filename, data) in parts {
            body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
            match filename {
                Some(filename) => body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n",
                        name, filename
                    )
                    .as_bytes(),
                ),
                None => body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                ),
            }
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
        body
    }

    #[tokio::test]
    async fn test_signup_login_profile_flow() {
        let (app, _state, _temp_dir) = test_app();

        // Signup succeeds
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/admin/signup",
                serde_json::json!({
                    "name": "Admin",
                    "email": "a@x.com",
                    "password": "s3cret",
                    "phone_number": "09171234567"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        // Duplicate signup is rejected
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/admin/signup",
                serde_json::json!({
                    "name": "Admin",
                    "email": "a@x.com",
                    "password": "other"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Login with the right password yields a token
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/admin/login",
                serde_json::json!({ "email": "a@x.com", "password": "s3cret" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let token = body["token"].as_str().unwrap().to_string();

        // Profile with that token returns the matching admin
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/admin/profile")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["email"], "a@x.com");
    }

    #[tokio::test]
    async fn test_login_failures() {
        let (app, _state, _temp_dir) = test_app();

        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/admin/signup",
                serde_json::json!({ "name": "Admin", "email": "a@x.com", "password": "s3cret" }),
            ))
            .await
            .unwrap();

        // Unknown email
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/admin/login",
                serde_json::json!({ "email": "b@x.com", "password": "s3cret" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // Wrong password
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/admin/login",
                serde_json::json!({ "email": "a@x.com", "password": "wrong" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_signup_validation() {
        let (app, _state, _temp_dir) = test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/admin/signup",
                serde_json::json!({ "name": "Admin", "email": "", "password": "s3cret" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let (app, _state, _temp_dir) = test_app();

        // No Authorization header
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/admin/profile")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Malformed token
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/admin/profile")
                    .header(header::AUTHORIZATION, "Bearer not-a-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        // Expired token
        let expired = issue_token("admin-1", "a@x.com", TEST_SECRET, -7200).unwrap();
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/admin/profile")
                    .header(header::AUTHORIZATION, format!("Bearer {}", expired))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_product_mutations_require_token() {
        let (app, _state, _temp_dir) = test_app();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/products")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        // Public reads stay public
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/products")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_product_photo_lifecycle_over_http() {
        let (app, state, _temp_dir) = test_app();
        let token = issue_token("admin-1", "a@x.com", TEST_SECRET, 3600).unwrap();
        let boundary = "kicksadminboundary";
        let content_type = format!("multipart/form-data; boundary={}", boundary);

        // Create with one photo
        let body = multipart_body(
            boundary,
            &[
                ("name", None, b"Air Runner"),
                ("price", None, b"129.95"),
                ("photos", Some("a.png"), b"png-bytes-a"),
            ],
        );
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/products")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .header(header::CONTENT_TYPE, &content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        let product_id = created["id"].as_str().unwrap().to_string();
        let photos = created["photos"].as_array().unwrap();
        assert_eq!(photos.len(), 1);
        let first_photo = photos[0].as_str().unwrap().to_string();
        assert!(state.uploads.exists(&first_photo));

        // Update appends a second photo and keeps the first
        let body = multipart_body(boundary, &[("photos", Some("b.png"), b"png-bytes-b")]);
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(format!("/api/products/{}", product_id))
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .header(header::CONTENT_TYPE, &content_type)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated = body_json(response).await;
        let photos = updated["photos"].as_array().unwrap();
        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].as_str().unwrap(), first_photo);

        // Delete the first photo: list shrinks, file removed, order preserved
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/products/{}/photo/{}", product_id, first_photo))
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["product"]["photos"].as_array().unwrap().len(), 1);
        assert!(!state.uploads.exists(&first_photo));

        // Deleting the same photo again still succeeds
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/products/{}/photo/{}", product_id, first_photo))
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_shipping_fee_flow() {
        let (app, _state, _temp_dir) = test_app();

        // No fee configured yet
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/shipping-fee")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // Set, then overwrite
        for fee in [50.0, 75.0] {
            let response = app
                .clone()
                .oneshot(json_request(
                    "PUT",
                    "/api/shipping-fee",
                    serde_json::json!({ "fee": fee }),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/shipping-fee")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["fee"], 75.0);
    }

    #[tokio::test]
    async fn test_orders_endpoint_empty() {
        let (app, _state, _temp_dir) = test_app();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/orders")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_health_check() {
        let (app, _state, _temp_dir) = test_app();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
    }
}
