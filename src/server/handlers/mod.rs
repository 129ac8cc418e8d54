//! HTTP handlers for the server.

pub mod documents;
pub mod locales;
