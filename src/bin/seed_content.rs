//! seed-content: loads markdown files into the blog or essay listing.

use std::path::PathBuf;

use clap::Parser;
use poem_blog_api::config::Settings;
use poem_blog_api::content::ContentService;
use poem_blog_api::ingest::{seed_directory, SeedOptions};
use poem_blog_api::{db, logging};

#[derive(Parser, Debug)]
#[command(name = "seed-content")]
#[command(about = "Creates or updates posts from markdown files with YAML front matter", long_about = None)]
struct Args {
    /// Directory to scan (default: CONTENT_DIR/blog, or CONTENT_DIR/essays with --essay)
    #[arg(value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Store the files as essays instead of blog posts
    #[arg(long)]
    essay: bool,

    /// Update posts whose slug already exists
    #[arg(long)]
    overwrite: bool,

    /// Report what would change without writing anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = Settings::from_env()?;
    logging::init(&settings);

    let directory = args.directory.unwrap_or_else(|| {
        if args.essay { settings.essays_dir() } else { settings.blog_dir() }
    });

    let db = db::init_db(&settings.database_url, settings.database_max_connections).await?;
    let content = ContentService::new(db.clone());
    let options = SeedOptions { is_essay: args.essay, overwrite: args.overwrite, dry_run: args.dry_run };

    let report = seed_directory(&content, &db, &directory, options).await?;

    if args.dry_run {
        println!("dry run, nothing written");
    }
    println!("{}: {report}", directory.display());
    if report.errors > 0 {
        std::process::exit(1);
    }
    Ok(())
}
