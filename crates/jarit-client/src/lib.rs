//! Rust client for the JarIt recipe-extraction API.
//!
//! Two pieces, wired together through a shared [`SessionStore`]:
//!
//! - [`SessionStore`] — reactive session state (auth token, user profile,
//!   API keys, extracted-recipe working data, loading/error flags) with
//!   derived authentication/integration booleans, watch-channel subscriptions,
//!   and write-through token persistence.
//! - [`JaritClient`] — typed HTTP operations that attach the current token to
//!   every call and normalize transport failures and backend error payloads
//!   into the store's error slot. A 401 from any endpoint forces the store
//!   back to a logged-out state.
//!
//! ```no_run
//! use std::sync::Arc;
//! use jarit_client::{JaritClient, SessionStore};
//!
//! # async fn run() -> jarit_client::Result<()> {
//! let session = Arc::new(SessionStore::in_memory());
//! let client = JaritClient::new(session.clone())?;
//!
//! let login = client.login("alice", "hunter2").await?;
//! session.set_token(Some(login.access_token));
//!
//! let extraction = client.extract_recipe("https://youtu.be/abc", None).await?;
//! session.set_extracted_recipe(extraction.recipe);
//! session.set_suggested_recipe(extraction.suggested_version);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;
mod session;
mod storage;
mod types;

pub use client::JaritClient;
pub use config::{ClientConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{
    JaritError, Result, INVALID_CREDENTIALS_MESSAGE, REQUEST_FAILED_MESSAGE,
    SESSION_EXPIRED_MESSAGE, UNKNOWN_ERROR_MESSAGE,
};
pub use session::SessionStore;
pub use storage::{FileTokenStorage, MemoryTokenStorage, TokenStorage};
pub use types::*;
