//! `drawer-api` — HTTP surface over the authenticator and counter engine.

pub mod app;
pub mod config;
pub mod middleware;
