use poem_openapi::Object;
use poem_openapi::types::MaybeUndefined;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use tracing::info;
use validator::ValidateEmail;

use crate::config::PresetAuthor;
use crate::content::models::AuthorView;
use crate::content::patch::{apply_nullable, apply_required};
use crate::entities::{author, comment, post, tag};
use crate::error::{ServiceError, ServiceResult};

/// Partial update of the site author. `null` clears `bio` or `avatar`.
#[derive(Debug, Clone, Default, Object)]
pub struct AuthorPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub bio: MaybeUndefined<String>,
    pub avatar: MaybeUndefined<String>,
}

impl AuthorPatch {
    fn check(&self) -> ServiceResult<()> {
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty() || n.chars().count() > 100) {
            return Err(ServiceError::Validation("name: length must be between 1 and 100".into()));
        }
        if self.email.as_ref().is_some_and(|e| !e.validate_email()) {
            return Err(ServiceError::Validation("email: invalid email address".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Object)]
pub struct BlogStats {
    /// Published blog posts.
    pub post_count: u64,
    /// Published essays.
    pub essay_count: u64,
    pub tag_count: u64,
    /// Approved comments only.
    pub comment_count: u64,
}

#[derive(Clone)]
pub struct AboutService {
    db: DatabaseConnection,
}

impl AboutService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The site author: the author with the lowest id.
    pub async fn get_author_info(&self) -> ServiceResult<Option<AuthorView>> {
        let found = author::Entity::find().order_by_asc(author::Column::Id).one(&self.db).await?;
        Ok(found.map(AuthorView::from))
    }

    /// `None` when no author exists yet.
    pub async fn update_author_info(&self, patch: AuthorPatch) -> ServiceResult<Option<AuthorView>> {
        patch.check()?;

        let txn = self.db.begin().await?;
        let Some(current) = author::Entity::find().order_by_asc(author::Column::Id).one(&txn).await? else {
            return Ok(None);
        };

        let email = patch.email.clone().unwrap_or_else(|| current.email.clone());
        let mut active: author::ActiveModel = current.into();
        apply_required(&mut active.name, patch.name);
        apply_required(&mut active.email, patch.email);
        apply_nullable(&mut active.bio, patch.bio);
        apply_nullable(&mut active.avatar, patch.avatar);

        let updated = active.update(&txn).await.map_err(|err| {
            ServiceError::on_conflict(err, || ServiceError::Validation(format!("email '{email}' belongs to another author")))
        })?;
        txn.commit().await?;

        info!(id = updated.id, "author info updated");
        Ok(Some(updated.into()))
    }

    pub async fn get_blog_stats(&self) -> ServiceResult<BlogStats> {
        let published = |is_essay: bool| {
            post::Entity::find()
                .filter(post::Column::IsPublished.eq(true))
                .filter(post::Column::IsEssay.eq(is_essay))
        };

        Ok(BlogStats {
            post_count: published(false).count(&self.db).await?,
            essay_count: published(true).count(&self.db).await?,
            tag_count: tag::Entity::find().count(&self.db).await?,
            comment_count: comment::Entity::find()
                .filter(comment::Column::IsApproved.eq(true))
                .count(&self.db)
                .await?,
        })
    }

    /// Creates the preset author unless an author with that email exists.
    pub async fn ensure_author(&self, preset: &PresetAuthor) -> ServiceResult<AuthorView> {
        let txn = self.db.begin().await?;
        let existing = author::Entity::find()
            .filter(author::Column::Email.eq(preset.email.as_str()))
            .one(&txn)
            .await?;

        let model = match existing {
            Some(found) => found,
            None => {
                let created = author::ActiveModel {
                    name: Set(preset.name.clone()),
                    email: Set(preset.email.clone()),
                    bio: Set(preset.bio.clone()),
                    avatar: Set(preset.avatar.clone()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
                info!(id = created.id, name = %created.name, "created preset author");
                created
            }
        };
        txn.commit().await?;

        Ok(model.into())
    }
}
