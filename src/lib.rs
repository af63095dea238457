//! Renderdesk: client for the PDF template rendering API.
//!
//! The library is the session/request layer: token storage, authenticated
//! dispatch with central session-expiry handling, the action lifecycle, and
//! the page guard. Resource operations (templates, API keys, rendering) are
//! built on top. The CLI is gated behind the `cli` feature and is private to
//! the binary.
//!
//! # Quick start
//!
//! ```no_run
//! use renderdesk::api::RenderdeskClient;
//! use secrecy::SecretString;
//!
//! # async fn demo() -> renderdesk::error::Result<()> {
//! let client = RenderdeskClient::builder("http://127.0.0.1:8000/api").build();
//! let password = SecretString::new("hunter2".to_string());
//! client.login("a@b.com", &password).await.into_result()?;
//! let templates = client.list_templates().await.into_result()?;
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod api;
pub mod config;
pub mod credentials;
pub mod error;
pub mod gateway;
pub mod guard;
pub mod navigate;
pub mod notify;
pub mod ops;
pub mod types;
