mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn potential_lifecycle() {
    let app = TestApp::spawn().await;

    assert_eq!(app.get("/cadastro/potencial").await.status, StatusCode::NOT_FOUND);

    let resp = app
        .post_json("/cadastro/potencial", &json!({"cidade": "Fortaleza", "escala": 8}))
        .await;
    assert_eq!(resp.status, StatusCode::CREATED);
    let created = resp.json()["data"].clone();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created, json!({"id": id, "cidade": "Fortaleza", "escala": 8}));
    assert_eq!(
        resp.location(),
        format!("http://localhost/cadastro/potencial/{id}")
    );

    let listed = app.get("/cadastro/potencial").await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.json()["data"]["content"], json!([created]));

    let updated = app
        .put_json(
            &format!("/cadastro/potencial/{id}"),
            &json!({"cidade": "Natal", "escala": 3}),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(
        updated.json()["data"],
        json!({"id": id, "cidade": "Natal", "escala": 3})
    );

    let deleted = app.delete(&format!("/cadastro/potencial/{id}")).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert_eq!(
        app.get(&format!("/cadastro/potencial/{id}")).await.status,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn potential_sorts_by_scale() {
    let app = TestApp::spawn().await;
    for (city, scale) in [("Recife", 5), ("Salvador", 9), ("Maceió", 1)] {
        app.create("/cadastro/potencial", &json!({"cidade": city, "escala": scale}))
            .await;
    }

    let resp = app.get("/cadastro/potencial?sort=escala").await;
    assert_eq!(resp.status, StatusCode::OK);
    let scales: Vec<_> = resp.json()["data"]["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["escala"].as_i64().unwrap())
        .collect();
    assert_eq!(scales, vec![1, 5, 9]);
}

#[tokio::test]
async fn potential_rejects_negative_scale_and_malformed_json() {
    let app = TestApp::spawn().await;

    let negative = app
        .post_json("/cadastro/potencial", &json!({"cidade": "Natal", "escala": -1}))
        .await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);
    assert_eq!(negative.json()["error"]["fields"][0]["field"], json!("escala"));

    let missing_field = app
        .post_json("/cadastro/potencial", &json!({"cidade": "Natal"}))
        .await;
    assert!(missing_field.status.is_client_error());
}

#[tokio::test]
async fn potential_get_by_id_returns_body_and_self_link() {
    let app = TestApp::spawn().await;
    let created = app
        .create("/cadastro/potencial", &json!({"cidade": "Ilhéus", "escala": 4}))
        .await;
    let id = created["id"].as_i64().unwrap();

    let resp = app.get(&format!("/cadastro/potencial/{id}")).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.json(),
        json!({
            "data": {"id": id, "cidade": "Ilhéus", "escala": 4},
            "links": {"self": format!("http://localhost/cadastro/potencial/{id}")}
        })
    );
}

#[tokio::test]
async fn potential_update_links_back_to_the_item() {
    let app = TestApp::spawn().await;
    let created = app
        .create("/cadastro/potencial", &json!({"cidade": "Natal", "escala": 2}))
        .await;
    let id = created["id"].as_i64().unwrap();
    let item_url = format!("http://localhost/cadastro/potencial/{id}");

    let resp = app
        .put_json(
            &format!("/cadastro/potencial/{id}"),
            &json!({"cidade": "Natal", "escala": 6}),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["links"]["self"], json!(item_url));
    assert_eq!(body["links"]["find"], json!(item_url));
}

#[tokio::test]
async fn potential_put_and_delete_on_unknown_id_are_not_found() {
    let app = TestApp::spawn().await;

    let put = app
        .put_json(
            "/cadastro/potencial/999",
            &json!({"cidade": "Natal", "escala": 1}),
        )
        .await;
    assert_eq!(put.status, StatusCode::NOT_FOUND);
    assert!(put.body.is_empty());

    let delete = app.delete("/cadastro/potencial/999").await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    // a failed PUT never creates the row
    assert_eq!(app.get("/cadastro/potencial").await.status, StatusCode::NOT_FOUND);
}
