//! Posts and essays: querying, pagination, localization and mutations.

pub mod kind;
pub mod localize;
pub mod models;
pub mod pagination;
pub mod patch;
pub mod query;
pub mod service;

pub use kind::ContentKind;
pub use pagination::{Page, PageRequest};
pub use query::ListFilter;
pub use service::ContentService;
