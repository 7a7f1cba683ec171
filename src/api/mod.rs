//! HTTP surface: one `OpenApi` impl per area, mounted under `/api`.

pub mod about;
pub mod blog;
pub mod contact;
pub mod error;
pub mod essays;
pub mod posts;

use poem::middleware::Cors;
use poem::web::Json;
use poem::{get, handler, Endpoint, EndpointExt, Route};
use poem_openapi::{OpenApiService, Tags};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};

use crate::about::AboutService;
use crate::contact::ContactService;
use crate::content::ContentService;

#[derive(Tags)]
pub enum ApiTags {
    /// Blog posts and comments
    Blog,
    /// Long-form essays
    Essays,
    /// Author page and site statistics
    About,
    /// Contact form and newsletter
    Contact,
}

#[handler]
fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Builds the full application. Swagger UI is served at `/docs` when `docs` is set.
pub fn build_app(db: DatabaseConnection, docs: bool) -> impl Endpoint {
    let content = ContentService::new(db.clone());
    let apis = (
        blog::BlogApi::new(content.clone()),
        essays::EssayApi::new(content),
        about::AboutApi::new(AboutService::new(db.clone())),
        contact::ContactApi::new(ContactService::new(db)),
    );
    let api = OpenApiService::new(apis, "Blog API", env!("CARGO_PKG_VERSION")).server("/api");

    let mut app = Route::new().at("/health", get(health));
    if docs {
        app = app.nest("/docs", api.swagger_ui());
    }
    app.nest("/api", api).with(Cors::new())
}
