//! HTTP surface: access middleware, failure responders, and demo routes.

pub mod app;
pub mod config;
pub mod context;
pub mod i18n;
pub mod middleware;
pub mod page;
pub mod responder;
