use poem_openapi::payload::Json;
use poem_openapi::OpenApi;

use crate::about::{AboutService, AuthorPatch, BlogStats};
use crate::api::ApiTags;
use crate::content::models::AuthorView;
use crate::error::ServiceError;
use crate::i18n::{self, LanguageInfo};

pub struct AboutApi {
    about: AboutService,
}

impl AboutApi {
    pub fn new(about: AboutService) -> Self {
        Self { about }
    }
}

#[OpenApi(tag = "ApiTags::About")]
impl AboutApi {
    /// Site author
    #[oai(path = "/about", method = "get")]
    async fn author_info(&self) -> poem::Result<Json<AuthorView>> {
        let author = self.about.get_author_info().await?;
        author.map(Json).ok_or_else(|| ServiceError::NotFound("author").into())
    }

    #[oai(path = "/about", method = "put")]
    async fn update_author_info(&self, Json(patch): Json<AuthorPatch>) -> poem::Result<Json<AuthorView>> {
        let author = self.about.update_author_info(patch).await?;
        author.map(Json).ok_or_else(|| ServiceError::NotFound("author").into())
    }

    #[oai(path = "/about/stats", method = "get")]
    async fn stats(&self) -> poem::Result<Json<BlogStats>> {
        Ok(Json(self.about.get_blog_stats().await?))
    }

    /// Languages content can be requested in
    #[oai(path = "/about/languages", method = "get")]
    async fn languages(&self) -> Json<Vec<LanguageInfo>> {
        Json(i18n::available())
    }
}
