use poem_openapi::Object;
use poem_openapi::types::MaybeUndefined;
use sea_orm::entity::prelude::DateTimeWithTimeZone;
use validator::Validate;

use crate::entities::{author, comment, post, tag};
use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone, PartialEq, Eq, Object)]
pub struct TagView {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

impl From<tag::Model> for TagView {
    fn from(m: tag::Model) -> Self {
        Self { id: m.id, name: m.name, slug: m.slug }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Object)]
pub struct AuthorView {
    pub id: i32,
    pub name: String,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub email: String,
}

impl From<author::Model> for AuthorView {
    fn from(m: author::Model) -> Self {
        Self { id: m.id, name: m.name, bio: m.bio, avatar: m.avatar, email: m.email }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Object)]
pub struct CommentView {
    pub id: i32,
    pub content: String,
    pub author_name: String,
    pub author_email: String,
    pub created_at: DateTimeWithTimeZone,
    pub is_approved: bool,
    pub post_id: i32,
    pub parent_id: Option<i32>,
}

impl From<comment::Model> for CommentView {
    fn from(m: comment::Model) -> Self {
        Self {
            id: m.id,
            content: m.content,
            author_name: m.author_name,
            author_email: m.author_email,
            created_at: m.created_at,
            is_approved: m.is_approved,
            post_id: m.post_id,
            parent_id: m.parent_id,
        }
    }
}

/// A post as shown on listing pages: the row plus its author and tags.
///
/// The Portuguese overlay fields are kept on the view so that localizing an
/// already-localized view yields the same result.
#[derive(Debug, Clone, PartialEq, Eq, Object)]
pub struct PostSummary {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub summary: Option<String>,
    pub is_published: bool,
    pub is_essay: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub publish_date: Option<DateTimeWithTimeZone>,
    pub featured_image: Option<String>,
    pub author_id: i32,
    pub title_pt: Option<String>,
    pub content_pt: Option<String>,
    pub summary_pt: Option<String>,
    pub author: Option<AuthorView>,
    pub tags: Vec<TagView>,
}

impl PostSummary {
    pub fn from_parts(post: post::Model, author: Option<author::Model>, tags: Vec<tag::Model>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            content: post.content,
            summary: post.summary,
            is_published: post.is_published,
            is_essay: post.is_essay,
            created_at: post.created_at,
            updated_at: post.updated_at,
            publish_date: post.publish_date,
            featured_image: post.featured_image,
            author_id: post.author_id,
            title_pt: post.title_pt,
            content_pt: post.content_pt,
            summary_pt: post.summary_pt,
            author: author.map(AuthorView::from),
            tags: tags.into_iter().map(TagView::from).collect(),
        }
    }
}

/// A post as shown on its own page, comments included.
#[derive(Debug, Clone, PartialEq, Eq, Object)]
pub struct PostDetail {
    #[oai(flatten)]
    pub post: PostSummary,
    pub comments: Vec<CommentView>,
}

#[derive(Debug, Clone, Default, Object, Validate)]
pub struct PostCreate {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 255))]
    pub slug: String,
    pub content: String,
    pub summary: Option<String>,
    #[oai(default)]
    pub is_published: bool,
    #[validate(length(max = 255))]
    pub featured_image: Option<String>,
    pub author_id: i32,
    pub tag_ids: Option<Vec<i32>>,
    /// Explicit publish date; when absent a published post is stamped with the creation time.
    pub publish_date: Option<DateTimeWithTimeZone>,
    #[validate(length(max = 255))]
    pub title_pt: Option<String>,
    pub content_pt: Option<String>,
    pub summary_pt: Option<String>,
}

/// Partial update of a post. Absent fields are left alone; `null` clears the
/// nullable ones.
#[derive(Debug, Clone, Default, Object)]
pub struct PostPatch {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub summary: MaybeUndefined<String>,
    pub is_published: Option<bool>,
    pub featured_image: MaybeUndefined<String>,
    pub author_id: Option<i32>,
    /// Replaces the whole tag set when present.
    pub tag_ids: Option<Vec<i32>>,
    pub title_pt: MaybeUndefined<String>,
    pub content_pt: MaybeUndefined<String>,
    pub summary_pt: MaybeUndefined<String>,
}

impl PostPatch {
    pub fn check(&self) -> ServiceResult<()> {
        check_length("title", self.title.as_deref(), 1, 255)?;
        check_length("slug", self.slug.as_deref(), 1, 255)?;
        check_length("featured_image", defined(&self.featured_image), 0, 255)?;
        check_length("title_pt", defined(&self.title_pt), 0, 255)
    }
}

fn defined(value: &MaybeUndefined<String>) -> Option<&str> {
    match value {
        MaybeUndefined::Value(v) => Some(v.as_str()),
        _ => None,
    }
}

fn check_length(field: &str, value: Option<&str>, min: usize, max: usize) -> ServiceResult<()> {
    match value {
        Some(v) if v.chars().count() < min || v.chars().count() > max => Err(ServiceError::Validation(
            format!("{field}: length must be between {min} and {max}"),
        )),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Object, Validate)]
pub struct CommentCreate {
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(length(min = 1, max = 100))]
    pub author_name: String,
    #[validate(email)]
    pub author_email: String,
    pub parent_id: Option<i32>,
}
