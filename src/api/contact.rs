use poem_openapi::param::{Path, Query};
use poem_openapi::payload::Json;
use poem_openapi::{ApiResponse, Object, OpenApi};

use crate::api::posts::Deleted;
use crate::api::ApiTags;
use crate::contact::{ContactMessageCreate, ContactMessageView, ContactService, SubscribeRequest, SubscriberView};
use crate::content::{Page, PageRequest};
use crate::error::ServiceError;

const MESSAGES_PAGE_SIZE: u64 = 20;

#[derive(Debug, Object)]
pub struct MessagePage {
    pub items: Vec<ContactMessageView>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub pages: u64,
}

impl From<Page<ContactMessageView>> for MessagePage {
    fn from(p: Page<ContactMessageView>) -> Self {
        Self { items: p.items, total: p.total, page: p.page, page_size: p.page_size, pages: p.pages }
    }
}

#[derive(ApiResponse)]
pub enum CreatedMessage {
    #[oai(status = 201)]
    Created(Json<ContactMessageView>),
}

#[derive(ApiResponse)]
pub enum Subscribed {
    #[oai(status = 201)]
    Created(Json<SubscriberView>),
}

pub struct ContactApi {
    contact: ContactService,
}

impl ContactApi {
    pub fn new(contact: ContactService) -> Self {
        Self { contact }
    }
}

#[OpenApi(tag = "ApiTags::Contact")]
impl ContactApi {
    #[oai(path = "/contact/message", method = "post")]
    async fn submit_message(&self, Json(input): Json<ContactMessageCreate>) -> poem::Result<CreatedMessage> {
        let saved = self.contact.submit_contact_message(input).await?;
        Ok(CreatedMessage::Created(Json(saved)))
    }

    /// Contact messages, newest first
    #[oai(path = "/contact/messages", method = "get")]
    async fn list_messages(
        &self,
        Query(page): Query<Option<u64>>,
        Query(page_size): Query<Option<u64>>,
    ) -> poem::Result<Json<MessagePage>> {
        let page = PageRequest::from_query(page, page_size, MESSAGES_PAGE_SIZE);
        Ok(Json(self.contact.list_messages(page).await?.into()))
    }

    #[oai(path = "/contact/subscribe", method = "post")]
    async fn subscribe(&self, Json(input): Json<SubscribeRequest>) -> poem::Result<Subscribed> {
        let sub = self.contact.subscribe(input).await?;
        Ok(Subscribed::Created(Json(sub)))
    }

    #[oai(path = "/contact/unsubscribe/:email", method = "post")]
    async fn unsubscribe(&self, Path(email): Path<String>) -> poem::Result<Deleted> {
        if self.contact.unsubscribe(&email).await? {
            Ok(Deleted::NoContent)
        } else {
            Err(ServiceError::NotFound("subscriber").into())
        }
    }
}
