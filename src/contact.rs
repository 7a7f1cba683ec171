use poem_openapi::Object;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use tracing::info;
use validator::Validate;

use crate::content::pagination::{Page, PageRequest};
use crate::content::service::now;
use crate::entities::{contact_message, subscriber};
use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone, Object, Validate)]
pub struct SubscribeRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 100))]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Object)]
pub struct SubscriberView {
    pub id: i32,
    pub email: String,
    pub name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
}

impl From<subscriber::Model> for SubscriberView {
    fn from(m: subscriber::Model) -> Self {
        Self { id: m.id, email: m.email, name: m.name, is_active: m.is_active, created_at: m.created_at }
    }
}

#[derive(Debug, Clone, Object, Validate)]
pub struct ContactMessageCreate {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[validate(length(min = 1))]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Object)]
pub struct ContactMessageView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTimeWithTimeZone,
    pub is_read: bool,
}

impl From<contact_message::Model> for ContactMessageView {
    fn from(m: contact_message::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            subject: m.subject,
            message: m.message,
            created_at: m.created_at,
            is_read: m.is_read,
        }
    }
}

/// Newsletter subscriptions and the contact form inbox.
#[derive(Clone)]
pub struct ContactService {
    db: DatabaseConnection,
}

impl ContactService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a subscriber, or reactivates an inactive one under the same id.
    pub async fn subscribe(&self, data: SubscribeRequest) -> ServiceResult<SubscriberView> {
        data.validate()?;

        let txn = self.db.begin().await?;
        let existing = subscriber::Entity::find()
            .filter(subscriber::Column::Email.eq(data.email.as_str()))
            .one(&txn)
            .await?;

        let saved = match existing {
            Some(sub) if sub.is_active => return Err(ServiceError::AlreadySubscribed(data.email)),
            Some(sub) => {
                let mut active: subscriber::ActiveModel = sub.into();
                active.is_active = Set(true);
                if data.name.is_some() {
                    active.name = Set(data.name);
                }
                let sub = active.update(&txn).await?;
                info!(id = sub.id, "subscriber reactivated");
                sub
            }
            None => {
                let email = data.email.clone();
                let sub = subscriber::ActiveModel {
                    email: Set(data.email),
                    name: Set(data.name),
                    is_active: Set(true),
                    created_at: Set(now()),
                    ..Default::default()
                }
                .insert(&txn)
                .await
                .map_err(|err| ServiceError::on_conflict(err, || ServiceError::AlreadySubscribed(email)))?;
                info!(id = sub.id, "new subscriber");
                sub
            }
        };
        txn.commit().await?;

        Ok(saved.into())
    }

    /// Marks the subscriber inactive. `false` when the email is unknown.
    pub async fn unsubscribe(&self, email: &str) -> ServiceResult<bool> {
        let txn = self.db.begin().await?;
        let Some(sub) = subscriber::Entity::find()
            .filter(subscriber::Column::Email.eq(email))
            .one(&txn)
            .await?
        else {
            return Ok(false);
        };

        let id = sub.id;
        let mut active: subscriber::ActiveModel = sub.into();
        active.is_active = Set(false);
        active.update(&txn).await?;
        txn.commit().await?;

        info!(id, "subscriber deactivated");
        Ok(true)
    }

    pub async fn submit_contact_message(&self, data: ContactMessageCreate) -> ServiceResult<ContactMessageView> {
        data.validate()?;

        let txn = self.db.begin().await?;
        let saved = contact_message::ActiveModel {
            name: Set(data.name),
            email: Set(data.email),
            subject: Set(data.subject),
            message: Set(data.message),
            created_at: Set(now()),
            is_read: Set(false),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        info!(id = saved.id, subject = %saved.subject, "contact message received");
        Ok(saved.into())
    }

    /// Messages newest first.
    pub async fn list_messages(&self, page: PageRequest) -> ServiceResult<Page<ContactMessageView>> {
        let paginator = contact_message::Entity::find()
            .order_by_desc(contact_message::Column::CreatedAt)
            .order_by_desc(contact_message::Column::Id)
            .paginate(&self.db, page.page_size());
        let total = paginator.num_items().await?;
        if !page.starts_within(total) {
            return Ok(Page::new(Vec::new(), total, page));
        }
        let rows = paginator.fetch_page(page.index()).await?;

        Ok(Page::new(rows, total, page).map(ContactMessageView::from))
    }
}
