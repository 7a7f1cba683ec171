pub mod author;
pub mod comment;
pub mod contact_message;
pub mod post;
pub mod post_tag;
pub mod subscriber;
pub mod tag;
