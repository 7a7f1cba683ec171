use poem_openapi::param::{Path, Query};
use poem_openapi::payload::Json;
use poem_openapi::OpenApi;

use crate::api::posts::{self, CreatedComment, CreatedPost, Deleted, ListParams, PostPage};
use crate::api::ApiTags;
use crate::content::models::{CommentCreate, PostCreate, PostDetail, PostPatch, PostSummary};
use crate::content::{ContentKind, ContentService};

pub struct BlogApi {
    content: ContentService,
}

impl BlogApi {
    pub fn new(content: ContentService) -> Self {
        Self { content }
    }
}

#[OpenApi(tag = "ApiTags::Blog")]
impl BlogApi {
    /// Published blog posts, newest first
    #[oai(path = "/blog", method = "get")]
    async fn list_posts(
        &self,
        Query(page): Query<Option<u64>>,
        Query(page_size): Query<Option<u64>>,
        Query(tag): Query<Option<String>>,
        Query(search): Query<Option<String>>,
        Query(lang): Query<Option<String>>,
    ) -> poem::Result<Json<PostPage>> {
        let params = ListParams { page, page_size, tag, search, lang };
        posts::list(&self.content, ContentKind::Blog, params).await
    }

    /// Single post with its comments
    #[oai(path = "/blog/:slug", method = "get")]
    async fn get_post(&self, Path(slug): Path<String>, Query(lang): Query<Option<String>>) -> poem::Result<Json<PostDetail>> {
        posts::detail(&self.content, ContentKind::Blog, &slug, lang).await
    }

    #[oai(path = "/blog", method = "post")]
    async fn create_post(&self, Json(input): Json<PostCreate>) -> poem::Result<CreatedPost> {
        let created = self.content.create(input, ContentKind::Blog).await?;
        Ok(CreatedPost::Created(Json(created)))
    }

    #[oai(path = "/blog/:slug", method = "put")]
    async fn update_post(&self, Path(slug): Path<String>, Json(patch): Json<PostPatch>) -> poem::Result<Json<PostSummary>> {
        posts::update(&self.content, ContentKind::Blog, &slug, patch).await
    }

    #[oai(path = "/blog/:slug", method = "delete")]
    async fn delete_post(&self, Path(slug): Path<String>) -> poem::Result<Deleted> {
        posts::delete(&self.content, ContentKind::Blog, &slug).await
    }

    /// Comments start unapproved
    #[oai(path = "/blog/:slug/comments", method = "post")]
    async fn add_comment(&self, Path(slug): Path<String>, Json(input): Json<CommentCreate>) -> poem::Result<CreatedComment> {
        let comment = self.content.add_comment(&slug, input).await?;
        Ok(CreatedComment::Created(Json(comment)))
    }
}
