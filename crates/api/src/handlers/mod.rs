//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod product;
pub mod warranty;
