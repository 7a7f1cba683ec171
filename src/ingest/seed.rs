use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use poem_openapi::types::MaybeUndefined;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::{error, info, warn};

use crate::content::models::{PostCreate, PostPatch};
use crate::content::{query, ContentKind, ContentService};
use crate::entities::author;
use crate::ingest::frontmatter::{parse_document, Document};

#[derive(Debug, Clone, Copy, Default)]
pub struct SeedOptions {
    pub is_essay: bool,
    pub overwrite: bool,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub found: usize,
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "found {}, created {}, updated {}, skipped {}, errors {}",
            self.found, self.created, self.updated, self.skipped, self.errors
        )
    }
}

enum Outcome {
    Created,
    Updated,
    Skipped,
}

/// Markdown files directly inside `dir`, sorted by name.
fn markdown_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Creates or updates one post per markdown file in `dir`.
///
/// A file that cannot be read or stored is logged and counted; it never stops
/// the run. Only an unreadable directory is an error.
pub async fn seed_directory(
    content: &ContentService,
    db: &DatabaseConnection,
    dir: &Path,
    options: SeedOptions,
) -> anyhow::Result<SeedReport> {
    let mut report = SeedReport::default();
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "content directory not found");
        return Ok(report);
    }

    let files = markdown_files(dir)?;
    report.found = files.len();
    info!(dir = %dir.display(), found = files.len(), dry_run = options.dry_run, "seeding content");

    for path in files {
        match seed_file(content, db, &path, options).await {
            Ok(Outcome::Created) => report.created += 1,
            Ok(Outcome::Updated) => report.updated += 1,
            Ok(Outcome::Skipped) => report.skipped += 1,
            Err(err) => {
                error!(file = %path.display(), "failed to seed: {err:#}");
                report.errors += 1;
            }
        }
    }

    info!(%report, "seeding finished");
    Ok(report)
}

async fn seed_file(
    content: &ContentService,
    db: &DatabaseConnection,
    path: &Path,
    options: SeedOptions,
) -> anyhow::Result<Outcome> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let Document { meta, body } = parse_document(&text)?;
    let file = path.display();

    let missing = meta.missing_fields();
    if !missing.is_empty() {
        warn!(%file, ?missing, "skipping file with incomplete front matter");
        return Ok(Outcome::Skipped);
    }
    let (Some(title), Some(slug), Some(author_name)) = (meta.title.clone(), meta.slug.clone(), meta.author.clone())
    else {
        return Ok(Outcome::Skipped);
    };

    let Some(author) = author::Entity::find()
        .filter(author::Column::Name.eq(author_name.as_str()))
        .one(db)
        .await?
    else {
        warn!(%file, author = %author_name, "skipping file, author not found");
        return Ok(Outcome::Skipped);
    };

    let kind = ContentKind::from_is_essay(options.is_essay);
    let existing = query::find_by_slug(db, &slug, kind).await?;
    if existing.is_some() && !options.overwrite {
        info!(%file, slug = %slug, "already exists, skipping (use --overwrite to update)");
        return Ok(Outcome::Skipped);
    }
    if options.dry_run {
        let action = if existing.is_some() { "update" } else { "create" };
        info!(%file, slug = %slug, action, "dry run");
        return Ok(if existing.is_some() { Outcome::Updated } else { Outcome::Created });
    }

    let tag_names = meta.tag_names();
    let publish_date = meta.publish_date();

    if existing.is_some() {
        let patch = PostPatch {
            title: Some(title),
            slug: None,
            content: Some(body),
            summary: nullable(meta.summary),
            is_published: Some(meta.published),
            featured_image: nullable(meta.featured_image),
            author_id: Some(author.id),
            // replaced by `tag_names` alone
            tag_ids: Some(Vec::new()),
            title_pt: nullable(meta.title_pt),
            content_pt: nullable(meta.content_pt),
            summary_pt: nullable(meta.summary_pt),
        };
        content.update_with_tags(&slug, kind, patch, &tag_names).await?;
        info!(%file, slug = %slug, "updated");
        Ok(Outcome::Updated)
    } else {
        let data = PostCreate {
            title,
            slug: slug.clone(),
            content: body,
            summary: meta.summary,
            is_published: meta.published,
            featured_image: meta.featured_image,
            author_id: author.id,
            tag_ids: None,
            publish_date,
            title_pt: meta.title_pt,
            content_pt: meta.content_pt,
            summary_pt: meta.summary_pt,
        };
        content.create_with_tags(data, kind, &tag_names).await?;
        info!(%file, slug = %slug, "created");
        Ok(Outcome::Created)
    }
}

fn nullable(value: Option<String>) -> MaybeUndefined<String> {
    match value {
        Some(v) => MaybeUndefined::Value(v),
        None => MaybeUndefined::Null,
    }
}
