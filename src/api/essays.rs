use poem_openapi::param::{Path, Query};
use poem_openapi::payload::Json;
use poem_openapi::OpenApi;

use crate::api::posts::{self, CreatedPost, Deleted, ListParams, PostPage};
use crate::api::ApiTags;
use crate::content::models::{PostCreate, PostDetail, PostPatch, PostSummary};
use crate::content::{ContentKind, ContentService};

pub struct EssayApi {
    content: ContentService,
}

impl EssayApi {
    pub fn new(content: ContentService) -> Self {
        Self { content }
    }
}

#[OpenApi(tag = "ApiTags::Essays")]
impl EssayApi {
    /// Published essays, newest first
    #[oai(path = "/essays", method = "get")]
    async fn list_essays(
        &self,
        Query(page): Query<Option<u64>>,
        Query(page_size): Query<Option<u64>>,
        Query(tag): Query<Option<String>>,
        Query(search): Query<Option<String>>,
        Query(lang): Query<Option<String>>,
    ) -> poem::Result<Json<PostPage>> {
        let params = ListParams { page, page_size, tag, search, lang };
        posts::list(&self.content, ContentKind::Essay, params).await
    }

    #[oai(path = "/essays/:slug", method = "get")]
    async fn get_essay(&self, Path(slug): Path<String>, Query(lang): Query<Option<String>>) -> poem::Result<Json<PostDetail>> {
        posts::detail(&self.content, ContentKind::Essay, &slug, lang).await
    }

    #[oai(path = "/essays", method = "post")]
    async fn create_essay(&self, Json(input): Json<PostCreate>) -> poem::Result<CreatedPost> {
        let created = self.content.create(input, ContentKind::Essay).await?;
        Ok(CreatedPost::Created(Json(created)))
    }

    #[oai(path = "/essays/:slug", method = "put")]
    async fn update_essay(&self, Path(slug): Path<String>, Json(patch): Json<PostPatch>) -> poem::Result<Json<PostSummary>> {
        posts::update(&self.content, ContentKind::Essay, &slug, patch).await
    }

    #[oai(path = "/essays/:slug", method = "delete")]
    async fn delete_essay(&self, Path(slug): Path<String>) -> poem::Result<Deleted> {
        posts::delete(&self.content, ContentKind::Essay, &slug).await
    }
}
