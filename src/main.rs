// main.rs
use poem::listener::TcpListener;
use poem_blog_api::about::AboutService;
use poem_blog_api::config::Settings;
use poem_blog_api::{api, db, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;
    logging::init(&settings);

    let db = db::init_db(&settings.database_url, settings.database_max_connections).await?;
    if let Some(preset) = &settings.preset_author {
        AboutService::new(db.clone()).ensure_author(preset).await?;
    }

    let app = api::build_app(db, settings.debug);
    let addr = settings.bind_addr();
    tracing::info!(%addr, env = %settings.env, docs = settings.debug, "starting server");

    poem::Server::new(TcpListener::bind(addr))
        .run(app)
        .await?;
    Ok(())
}
