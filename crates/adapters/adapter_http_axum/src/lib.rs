//! # pinhub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve every platform RPC as a **JSON endpoint** under `/api`
//!   (`/api/platform`, `/api/coils/pulse`, `/api/rules`, …)
//! - Stream switch changes to clients over **Server-Sent Events**
//!   (`/api/switches/changes`)
//! - Map HTTP requests into [`Platform`](pinhub_app::platform::Platform)
//!   calls (driving adapter)
//! - Map [`PinHubError`](pinhub_domain::error::PinHubError) into HTTP status
//!   codes
//!
//! ## Dependency rule
//! Depends on `pinhub-app` (for the facade and port traits) and
//! `pinhub-domain` (for wire and domain types). Never leaks axum types into
//! the domain.

pub mod api;
pub mod error;
pub mod router;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;
