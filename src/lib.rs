pub mod about;
pub mod api;
pub mod config;
pub mod contact;
pub mod content;
pub mod db;
pub mod entities;
pub mod error;
pub mod i18n;
pub mod ingest;
pub mod logging;
pub mod migration;
