#![allow(dead_code)]

use chrono::{Duration, Utc};
use poem_blog_api::content::models::{PostCreate, PostSummary};
use poem_blog_api::content::{ContentKind, ContentService};
use poem_blog_api::db::init_db;
use poem_blog_api::entities::author;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection};

/// Fresh in-memory database with every migration applied. One connection, so
/// the whole test shares the same memory store.
pub async fn test_db() -> anyhow::Result<DatabaseConnection> {
    init_db("sqlite::memory:", 1).await
}

pub async fn insert_author(db: &DatabaseConnection, name: &str, email: &str) -> anyhow::Result<author::Model> {
    let author = author::ActiveModel {
        name: Set(name.to_string()),
        email: Set(email.to_string()),
        bio: Set(Some(format!("{name} writes here."))),
        avatar: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(author)
}

/// A valid create request; published, dated `days_ago` days in the past.
pub fn new_post(slug: &str, author_id: i32, days_ago: i64) -> PostCreate {
    PostCreate {
        title: format!("Title {slug}"),
        slug: slug.to_string(),
        content: format!("Content of {slug}"),
        summary: Some(format!("Summary of {slug}")),
        is_published: true,
        author_id,
        publish_date: Some(Utc::now().fixed_offset() - Duration::days(days_ago)),
        ..Default::default()
    }
}

pub async fn create(
    service: &ContentService,
    slug: &str,
    author_id: i32,
    days_ago: i64,
    kind: ContentKind,
) -> anyhow::Result<PostSummary> {
    Ok(service.create(new_post(slug, author_id, days_ago), kind).await?)
}
