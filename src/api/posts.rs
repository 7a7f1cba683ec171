use poem_openapi::payload::Json;
use poem_openapi::{ApiResponse, Object};

use crate::content::models::{CommentView, PostDetail, PostPatch, PostSummary};
use crate::content::{ContentKind, ContentService, ListFilter, Page, PageRequest, pagination::DEFAULT_PAGE_SIZE};
use crate::error::ServiceError;
use crate::i18n::Language;

/// Listing envelope.
#[derive(Debug, Object)]
pub struct PostPage {
    pub items: Vec<PostSummary>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub pages: u64,
}

impl From<Page<PostSummary>> for PostPage {
    fn from(p: Page<PostSummary>) -> Self {
        Self { items: p.items, total: p.total, page: p.page, page_size: p.page_size, pages: p.pages }
    }
}

#[derive(ApiResponse)]
pub enum CreatedPost {
    #[oai(status = 201)]
    Created(Json<PostSummary>),
}

#[derive(ApiResponse)]
pub enum CreatedComment {
    #[oai(status = 201)]
    Created(Json<CommentView>),
}

#[derive(ApiResponse)]
pub enum Deleted {
    #[oai(status = 204)]
    NoContent,
}

/// Raw listing query parameters.
pub struct ListParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub tag: Option<String>,
    pub search: Option<String>,
    pub lang: Option<String>,
}

pub async fn list(content: &ContentService, kind: ContentKind, params: ListParams) -> poem::Result<Json<PostPage>> {
    let page = PageRequest::from_query(params.page, params.page_size, DEFAULT_PAGE_SIZE);
    let filter = ListFilter::new(params.tag, params.search);
    let lang = Language::from_param(params.lang.as_deref());
    let found = content.list_content(kind, page, &filter, lang).await?;
    Ok(Json(found.into()))
}

pub async fn detail(
    content: &ContentService,
    kind: ContentKind,
    slug: &str,
    lang: Option<String>,
) -> poem::Result<Json<PostDetail>> {
    let lang = Language::from_param(lang.as_deref());
    let detail = content.get_by_slug(slug, kind, lang).await?;
    detail.map(Json).ok_or_else(|| ServiceError::NotFound(kind_name(kind)).into())
}

pub async fn update(
    content: &ContentService,
    kind: ContentKind,
    slug: &str,
    patch: PostPatch,
) -> poem::Result<Json<PostSummary>> {
    let updated = content.update(slug, kind, patch).await?;
    updated.map(Json).ok_or_else(|| ServiceError::NotFound(kind_name(kind)).into())
}

pub async fn delete(content: &ContentService, kind: ContentKind, slug: &str) -> poem::Result<Deleted> {
    if content.delete(slug, kind).await? {
        Ok(Deleted::NoContent)
    } else {
        Err(ServiceError::NotFound(kind_name(kind)).into())
    }
}

fn kind_name(kind: ContentKind) -> &'static str {
    match kind {
        ContentKind::Blog => "post",
        ContentKind::Essay => "essay",
    }
}
