mod common;

use common::{insert_author, test_db};
use poem::http::StatusCode;
use poem::test::TestClient;
use poem_blog_api::api::build_app;
use serde_json::json;

#[tokio::test]
async fn health_reports_ok() -> anyhow::Result<()> {
    let db = test_db().await?;
    let cli = TestClient::new(build_app(db, false));

    let resp = cli.get("/health").send().await;
    resp.assert_status_is_ok();
    resp.assert_json(json!({ "status": "ok" })).await;
    Ok(())
}

#[tokio::test]
async fn blog_post_lifecycle_over_http() -> anyhow::Result<()> {
    let db = test_db().await?;
    let author = insert_author(&db, "Ana", "ana@example.com").await?;
    let cli = TestClient::new(build_app(db, false));

    let body = json!({
        "title": "Hello",
        "slug": "hello",
        "content": "Body",
        "is_published": true,
        "author_id": author.id,
        "title_pt": "Olá",
    });
    let resp = cli.post("/api/blog").body_json(&body).send().await;
    resp.assert_status(StatusCode::CREATED);

    let resp = cli.post("/api/essays").body_json(&body).send().await;
    resp.assert_status(StatusCode::CONFLICT);
    let json = resp.json().await;
    json.value().object().get("code").assert_string("duplicate_slug");

    let resp = cli.get("/api/blog").query("lang", &"pt").send().await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let page = json.value().object();
    page.get("total").assert_i64(1);
    page.get("pages").assert_i64(1);
    page.get("page_size").assert_i64(10);
    page.get("items").array().get(0).object().get("title").assert_string("Olá");

    let resp = cli.get("/api/blog").query("page", &u64::MAX).send().await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    json.value().object().get("total").assert_i64(1);
    json.value().object().get("items").array().assert_len(0);

    let resp = cli.get("/api/blog/hello").send().await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    json.value().object().get("slug").assert_string("hello");
    json.value().object().get("comments").array().assert_len(0);

    let resp = cli
        .post("/api/blog/hello/comments")
        .body_json(&json!({ "content": "Nice", "author_name": "Bea", "author_email": "bea@example.com" }))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);
    let json = resp.json().await;
    json.value().object().get("is_approved").assert_bool(false);

    let resp = cli.put("/api/blog/hello").body_json(&json!({ "summary": "Short" })).send().await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    json.value().object().get("summary").assert_string("Short");

    let resp = cli.get("/api/essays/hello").send().await;
    resp.assert_status(StatusCode::NOT_FOUND);
    let json = resp.json().await;
    json.value().object().get("code").assert_string("not_found");

    cli.delete("/api/blog/hello").send().await.assert_status(StatusCode::NO_CONTENT);
    cli.delete("/api/blog/hello").send().await.assert_status(StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn invalid_input_is_a_bad_request() -> anyhow::Result<()> {
    let db = test_db().await?;
    let author = insert_author(&db, "Ana", "ana@example.com").await?;
    let cli = TestClient::new(build_app(db, false));

    let resp = cli
        .post("/api/blog")
        .body_json(&json!({ "title": "", "slug": "x", "content": "", "author_id": author.id }))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let json = resp.json().await;
    json.value().object().get("code").assert_string("validation_error");
    Ok(())
}

#[tokio::test]
async fn contact_endpoints() -> anyhow::Result<()> {
    let db = test_db().await?;
    let cli = TestClient::new(build_app(db, false));

    let subscribe = json!({ "email": "reader@example.com" });
    cli.post("/api/contact/subscribe").body_json(&subscribe).send().await.assert_status(StatusCode::CREATED);
    cli.post("/api/contact/subscribe").body_json(&subscribe).send().await.assert_status(StatusCode::CONFLICT);
    cli.post("/api/contact/unsubscribe/reader@example.com")
        .send()
        .await
        .assert_status(StatusCode::NO_CONTENT);
    cli.post("/api/contact/unsubscribe/ghost@example.com")
        .send()
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let message = json!({ "name": "Bea", "email": "bea@example.com", "subject": "Hi", "message": "Hello there" });
    cli.post("/api/contact/message").body_json(&message).send().await.assert_status(StatusCode::CREATED);

    let resp = cli.get("/api/contact/messages").send().await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    json.value().object().get("total").assert_i64(1);
    json.value().object().get("page_size").assert_i64(20);
    Ok(())
}

#[tokio::test]
async fn about_endpoints() -> anyhow::Result<()> {
    let db = test_db().await?;
    let cli = TestClient::new(build_app(db.clone(), false));

    cli.get("/api/about").send().await.assert_status(StatusCode::NOT_FOUND);
    insert_author(&db, "Ana", "ana@example.com").await?;

    let resp = cli.get("/api/about").send().await;
    resp.assert_status_is_ok();
    resp.json().await.value().object().get("name").assert_string("Ana");

    let resp = cli.get("/api/about/stats").send().await;
    resp.assert_status_is_ok();
    resp.json().await.value().object().get("post_count").assert_i64(0);

    let resp = cli.get("/api/about/languages").send().await;
    resp.assert_status_is_ok();
    resp.json().await.value().array().assert_len(2);
    Ok(())
}
