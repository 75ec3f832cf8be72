//! Round-trip tests for `/api/products` against a real PostgreSQL database.
//!
//! Each test gets a fresh database from `#[sqlx::test]`, which needs
//! `DATABASE_URL` to point at a server where it may create databases. Run
//! with `cargo test -- --ignored`.

mod common;

use axum::http::StatusCode;
use common::{body_bytes, body_json, build_test_app, delete, get, listing_fields, post_multipart, Part};
use showroom_db::models::product::CreateProduct;
use showroom_db::repositories::ProductRepo;
use sqlx::PgPool;

async fn insert(pool: &PgPool, name: &str) -> i64 {
    ProductRepo::create(
        pool,
        &CreateProduct {
            name: Some(name.to_string()),
            category: Some("Decor".to_string()),
            image_url: format!("/uploads/{name}.jpg"),
            ..Default::default()
        },
    )
    .await
    .unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "needs DATABASE_URL"]
async fn create_then_list_round_trip(pool: PgPool) {
    let test = build_test_app(Some(pool.clone()));

    let mut parts = listing_fields("Sofa", "Furniture", "15000");
    parts.push(Part::File {
        name: "image",
        file_name: "sofa.jpg",
        data: b"jpeg-bytes",
    });
    let response = post_multipart(test.app(), "/api/products", &parts).await;
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["message"], "Success");
    let id = created["id"].as_i64().unwrap();

    let response = get(test.app(), "/api/products").await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    let rows = list.as_array().unwrap();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row["id"], id);
    assert_eq!(row["name"], "Sofa");
    assert_eq!(row["category"], "Furniture");
    assert_eq!(row["p_condition"], "Used");
    assert_eq!(row["price"], "15000");
    assert_eq!(row["description"], "Good as new");

    let image_url = row["image_url"].as_str().unwrap();
    assert!(image_url.starts_with("/uploads/prod_"));
    assert!(image_url.ends_with(".jpg"));

    let response = get(test.app(), image_url).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"jpeg-bytes");
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "needs DATABASE_URL"]
async fn list_is_descending_by_id(pool: PgPool) {
    let first = insert(&pool, "lamp").await;
    let second = insert(&pool, "rug").await;
    let third = insert(&pool, "vase").await;

    let test = build_test_app(Some(pool));
    let list = body_json(get(test.app(), "/api/products").await).await;

    let ids: Vec<i64> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![third, second, first]);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "needs DATABASE_URL"]
async fn delete_removes_row_but_keeps_image(pool: PgPool) {
    let test = build_test_app(Some(pool.clone()));

    let mut parts = listing_fields("Lamp", "Decor", "2000");
    parts.push(Part::File {
        name: "image",
        file_name: "lamp.png",
        data: b"png",
    });
    let created = body_json(post_multipart(test.app(), "/api/products", &parts).await).await;
    let id = created["id"].as_i64().unwrap();

    let response = delete(test.app(), &format!("/api/products/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Deleted");

    let rows = ProductRepo::list(&pool).await.unwrap();
    assert!(rows.iter().all(|row| row.id != id));
    assert_eq!(test.uploaded_files().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "needs DATABASE_URL"]
async fn delete_unknown_id_succeeds_and_changes_nothing(pool: PgPool) {
    let kept = insert(&pool, "lamp").await;
    let test = build_test_app(Some(pool.clone()));

    let response = delete(test.app(), &format!("/api/products/{}", kept + 1000)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Deleted");

    let rows = ProductRepo::list(&pool).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, kept);
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "needs DATABASE_URL"]
async fn missing_image_leaves_store_untouched(pool: PgPool) {
    let test = build_test_app(Some(pool.clone()));

    let response = post_multipart(
        test.app(),
        "/api/products",
        &listing_fields("Sofa", "Furniture", "15000"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(ProductRepo::list(&pool).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
#[ignore = "needs DATABASE_URL"]
async fn health_reports_ok_with_store(pool: PgPool) {
    let test = build_test_app(Some(pool));

    let json = body_json(get(test.app(), "/health").await).await;

    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
}
