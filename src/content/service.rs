use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use slug::slugify;
use tracing::{info, warn};
use validator::Validate;

use crate::content::kind::ContentKind;
use crate::content::localize::Localize;
use crate::content::models::{CommentCreate, CommentView, PostCreate, PostDetail, PostPatch, PostSummary, TagView};
use crate::content::pagination::{Page, PageRequest};
use crate::content::query::{self, ListFilter, PostDetailRecord, PostRecord};
use crate::entities::{author, comment, post, post_tag, tag};
use crate::error::{ServiceError, ServiceResult};
use crate::i18n::Language;

/// Longest tag name or slug the store accepts.
pub const TAG_MAX_LEN: usize = 50;

pub(crate) fn now() -> DateTimeWithTimeZone {
    Utc::now().fixed_offset()
}

/// Reads and writes posts and essays.
#[derive(Clone)]
pub struct ContentService {
    db: DatabaseConnection,
}

impl ContentService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// A page of published content of one kind, localized.
    pub async fn list_content(
        &self,
        kind: ContentKind,
        page: PageRequest,
        filter: &ListFilter,
        lang: Language,
    ) -> ServiceResult<Page<PostSummary>> {
        let (records, total) = query::list_content(&self.db, kind, page, filter).await?;
        let items = records.into_iter().map(|r| summary(r).localized(lang)).collect();
        Ok(Page::new(items, total, page))
    }

    /// Single post with comments, or `None` when no post of this kind has the slug.
    pub async fn get_by_slug(&self, slug: &str, kind: ContentKind, lang: Language) -> ServiceResult<Option<PostDetail>> {
        let detail = query::find_detail(&self.db, slug, kind).await?;
        Ok(detail.map(|d| detail_view(d).localized(lang)))
    }

    pub async fn create(&self, data: PostCreate, kind: ContentKind) -> ServiceResult<PostSummary> {
        self.create_with_tags(data, kind, &[]).await
    }

    /// `create`, also linking tags found or created by name. The tags are written
    /// in the same transaction as the post, so a failed create leaves none behind.
    pub async fn create_with_tags(
        &self,
        data: PostCreate,
        kind: ContentKind,
        tag_names: &[String],
    ) -> ServiceResult<PostSummary> {
        data.validate()?;
        if query::slug_taken(&self.db, &data.slug, None).await? {
            return Err(ServiceError::DuplicateSlug(data.slug));
        }

        let txn = self.db.begin().await?;
        let author = author::Entity::find_by_id(data.author_id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::NotFound("author"))?;
        let tags = collect_tags(&txn, data.tag_ids.as_deref().unwrap_or_default(), tag_names).await?;

        let now = now();
        let publish_date = match data.publish_date {
            Some(date) => Some(date),
            None if data.is_published => Some(now),
            None => None,
        };
        let slug = data.slug.clone();
        let created = post::ActiveModel {
            title: Set(data.title),
            slug: Set(data.slug),
            content: Set(data.content),
            summary: Set(data.summary),
            is_published: Set(data.is_published),
            is_essay: Set(kind.is_essay()),
            created_at: Set(now),
            updated_at: Set(now),
            publish_date: Set(publish_date),
            featured_image: Set(data.featured_image),
            author_id: Set(author.id),
            title_pt: Set(data.title_pt),
            content_pt: Set(data.content_pt),
            summary_pt: Set(data.summary_pt),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|err| ServiceError::on_conflict(err, || ServiceError::DuplicateSlug(slug.clone())))?;

        link_tags(&txn, created.id, &tags).await?;
        txn.commit().await?;

        info!(id = created.id, slug = %created.slug, %kind, "created post");
        Ok(PostSummary::from_parts(created, Some(author), tags))
    }

    /// Partial update; `None` when no post of this kind has the slug.
    pub async fn update(&self, slug: &str, kind: ContentKind, patch: PostPatch) -> ServiceResult<Option<PostSummary>> {
        self.update_with_tags(slug, kind, patch, &[]).await
    }

    /// `update`, with named tags joining `tag_ids` in the replacement tag set.
    /// Tags are replaced when either is given.
    pub async fn update_with_tags(
        &self,
        slug: &str,
        kind: ContentKind,
        patch: PostPatch,
        tag_names: &[String],
    ) -> ServiceResult<Option<PostSummary>> {
        patch.check()?;

        let txn = self.db.begin().await?;
        let Some(current) = query::find_by_slug(&txn, slug, kind).await? else {
            return Ok(None);
        };

        if let Some(new_slug) = patch.slug.as_deref().filter(|s| *s != current.slug) {
            if query::slug_taken(&txn, new_slug, Some(current.id)).await? {
                return Err(ServiceError::DuplicateSlug(new_slug.to_string()));
            }
        }
        if let Some(author_id) = patch.author_id {
            if author::Entity::find_by_id(author_id).one(&txn).await?.is_none() {
                return Err(ServiceError::NotFound("author"));
            }
        }
        if patch.tag_ids.is_some() || !tag_names.is_empty() {
            let tags = collect_tags(&txn, patch.tag_ids.as_deref().unwrap_or_default(), tag_names).await?;
            post_tag::Entity::delete_many()
                .filter(post_tag::Column::PostId.eq(current.id))
                .exec(&txn)
                .await?;
            link_tags(&txn, current.id, &tags).await?;
        }

        let target_slug = patch.slug.clone().unwrap_or_else(|| current.slug.clone());
        let mut active: post::ActiveModel = current.clone().into();
        patch.apply(&mut active, &current, now());
        let updated = active
            .update(&txn)
            .await
            .map_err(|err| ServiceError::on_conflict(err, || ServiceError::DuplicateSlug(target_slug)))?;

        let record = query::load_summary(&txn, updated).await?;
        txn.commit().await?;

        info!(id = record.post.id, slug = %record.post.slug, %kind, "updated post");
        Ok(Some(summary(record)))
    }

    /// Removes the post together with its comments and tag links.
    pub async fn delete(&self, slug: &str, kind: ContentKind) -> ServiceResult<bool> {
        let txn = self.db.begin().await?;
        let Some(current) = query::find_by_slug(&txn, slug, kind).await? else {
            return Ok(false);
        };

        comment::Entity::delete_many()
            .filter(comment::Column::PostId.eq(current.id))
            .exec(&txn)
            .await?;
        post_tag::Entity::delete_many()
            .filter(post_tag::Column::PostId.eq(current.id))
            .exec(&txn)
            .await?;
        post::Entity::delete_by_id(current.id).exec(&txn).await?;
        txn.commit().await?;

        info!(id = current.id, slug, %kind, "deleted post");
        Ok(true)
    }

    /// Adds an unapproved comment to a blog post.
    pub async fn add_comment(&self, post_slug: &str, data: CommentCreate) -> ServiceResult<CommentView> {
        data.validate()?;

        let txn = self.db.begin().await?;
        let post = query::find_by_slug(&txn, post_slug, ContentKind::Blog)
            .await?
            .ok_or(ServiceError::NotFound("post"))?;

        if let Some(parent_id) = data.parent_id {
            comment::Entity::find_by_id(parent_id)
                .filter(comment::Column::PostId.eq(post.id))
                .one(&txn)
                .await?
                .ok_or(ServiceError::NotFound("comment"))?;
        }

        let created = comment::ActiveModel {
            content: Set(data.content),
            author_name: Set(data.author_name),
            author_email: Set(data.author_email),
            created_at: Set(now()),
            is_approved: Set(false),
            post_id: Set(post.id),
            parent_id: Set(data.parent_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        info!(id = created.id, post = post_slug, "comment awaiting approval");
        Ok(created.into())
    }

    /// Finds or creates a tag for each name, matching on the slugified name.
    pub async fn ensure_tags(&self, names: &[String]) -> ServiceResult<Vec<TagView>> {
        let txn = self.db.begin().await?;
        let tags = find_or_create_tags(&txn, names).await?;
        txn.commit().await?;

        Ok(tags.into_iter().map(TagView::from).collect())
    }

    /// All tags, alphabetically.
    pub async fn list_tags(&self) -> ServiceResult<Vec<TagView>> {
        let tags = tag::Entity::find().order_by_asc(tag::Column::Name).all(&self.db).await?;
        Ok(tags.into_iter().map(TagView::from).collect())
    }
}

fn summary(record: PostRecord) -> PostSummary {
    PostSummary::from_parts(record.post, record.author, record.tags)
}

fn detail_view(detail: PostDetailRecord) -> PostDetail {
    PostDetail {
        post: summary(detail.record),
        comments: detail.comments.into_iter().map(CommentView::from).collect(),
    }
}

/// Existing tags among `ids`; unknown ids are dropped.
async fn resolve_tags<C: ConnectionTrait>(db: &C, ids: &[i32]) -> ServiceResult<Vec<tag::Model>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let tags = tag::Entity::find()
        .filter(tag::Column::Id.is_in(ids.iter().copied()))
        .order_by_asc(tag::Column::Name)
        .all(db)
        .await?;
    if tags.len() < ids.len() {
        tracing::debug!(requested = ids.len(), found = tags.len(), "ignoring unknown tag ids");
    }
    Ok(tags)
}

/// Tags for each usable name, in input order without repeats. Names that slugify
/// to nothing or exceed `TAG_MAX_LEN` are skipped.
async fn find_or_create_tags<C: ConnectionTrait>(db: &C, names: &[String]) -> ServiceResult<Vec<tag::Model>> {
    let mut tags: Vec<tag::Model> = Vec::with_capacity(names.len());

    for name in names {
        let name = name.trim();
        let slug = slugify(name);
        if slug.is_empty() || tags.iter().any(|t| t.slug == slug) {
            continue;
        }
        if name.chars().count() > TAG_MAX_LEN || slug.len() > TAG_MAX_LEN {
            warn!(name, "skipping tag, name too long");
            continue;
        }
        let existing = tag::Entity::find()
            .filter(tag::Column::Slug.eq(slug.as_str()))
            .one(db)
            .await?;
        let tag = match existing {
            Some(tag) => tag,
            None => {
                info!(name, slug = %slug, "creating tag");
                tag::ActiveModel {
                    name: Set(name.to_string()),
                    slug: Set(slug),
                    ..Default::default()
                }
                .insert(db)
                .await?
            }
        };
        tags.push(tag);
    }
    Ok(tags)
}

/// Tags named by id or by name, merged and sorted like `resolve_tags`.
async fn collect_tags<C: ConnectionTrait>(db: &C, ids: &[i32], names: &[String]) -> ServiceResult<Vec<tag::Model>> {
    let mut tags = resolve_tags(db, ids).await?;
    if names.is_empty() {
        return Ok(tags);
    }
    for tag in find_or_create_tags(db, names).await? {
        if !tags.iter().any(|t| t.id == tag.id) {
            tags.push(tag);
        }
    }
    tags.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(tags)
}

async fn link_tags<C: ConnectionTrait>(db: &C, post_id: i32, tags: &[tag::Model]) -> ServiceResult<()> {
    if tags.is_empty() {
        return Ok(());
    }
    post_tag::Entity::insert_many(tags.iter().map(|t| post_tag::ActiveModel {
        post_id: Set(post_id),
        tag_id: Set(t.id),
    }))
    .exec_without_returning(db)
    .await?;
    Ok(())
}
