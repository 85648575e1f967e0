//! Session-scoped reactive state.
//!
//! A [`SessionStore`] is the single source of truth for the auth token, the
//! current user, stored API keys, extracted-recipe working data, and the
//! transient loading/error flags. Every field is published through a
//! [`tokio::sync::watch`] channel: setters notify synchronously, and new
//! subscribers immediately observe the current value.
//!
//! The store is injectable rather than process-global so tests can run against
//! isolated instances.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::storage::{FileTokenStorage, MemoryTokenStorage, TokenStorage};
use crate::types::{ApiKey, Recipe, User};

/// Reactive session state container.
pub struct SessionStore {
    storage: Arc<dyn TokenStorage>,
    token: watch::Sender<Option<String>>,
    user: watch::Sender<Option<User>>,
    api_keys: watch::Sender<Vec<ApiKey>>,
    mealie_key: watch::Sender<Option<ApiKey>>,
    extracted_recipe: watch::Sender<Option<Recipe>>,
    suggested_recipe: watch::Sender<Option<Recipe>>,
    loading: watch::Sender<bool>,
    error: watch::Sender<Option<String>>,
    // Derived channels; recomputed by the setters of their dependencies and
    // never written directly.
    authenticated: watch::Sender<bool>,
    mealie_configured: watch::Sender<bool>,
}

impl SessionStore {
    /// Create a store backed by the given token storage.
    ///
    /// The token is restored from storage; every other field starts empty.
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        let token = storage.load();
        let authenticated = token.is_some();
        Self {
            storage,
            token: watch::channel(token).0,
            user: watch::channel(None).0,
            api_keys: watch::channel(Vec::new()).0,
            mealie_key: watch::channel(None).0,
            extracted_recipe: watch::channel(None).0,
            suggested_recipe: watch::channel(None).0,
            loading: watch::channel(false).0,
            error: watch::channel(None).0,
            authenticated: watch::channel(authenticated).0,
            mealie_configured: watch::channel(false).0,
        }
    }

    /// Create a store with no durable storage (token lives only in memory).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStorage::new()))
    }

    /// Create a store over the platform's default token location, falling
    /// back to in-memory state when the platform has no data directory.
    pub fn from_default_storage() -> Self {
        match FileTokenStorage::from_default_location() {
            Some(storage) => Self::new(Arc::new(storage)),
            None => Self::in_memory(),
        }
    }

    // ---------- Token ----------

    /// Set or clear the auth token.
    ///
    /// The new value is mirrored to durable storage before observers are
    /// notified, and `is_authenticated` is recomputed before this returns.
    /// A storage failure is logged but does not block the in-memory update.
    pub fn set_token(&self, token: Option<String>) {
        let result = match token.as_deref() {
            Some(value) => self.storage.persist(value),
            None => self.storage.clear(),
        };
        if let Err(err) = result {
            warn!("failed to mirror token to storage: {err}");
        }
        let authenticated = token.is_some();
        self.token.send_replace(token);
        self.authenticated.send_replace(authenticated);
    }

    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    /// `true` iff a token is present. Never independently settable.
    pub fn is_authenticated(&self) -> bool {
        *self.authenticated.borrow()
    }

    pub fn subscribe_token(&self) -> watch::Receiver<Option<String>> {
        self.token.subscribe()
    }

    pub fn subscribe_authenticated(&self) -> watch::Receiver<bool> {
        self.authenticated.subscribe()
    }

    // ---------- User ----------

    pub fn set_user(&self, user: Option<User>) {
        self.user.send_replace(user);
    }

    pub fn user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    pub fn subscribe_user(&self) -> watch::Receiver<Option<User>> {
        self.user.subscribe()
    }

    // ---------- API keys ----------

    pub fn set_api_keys(&self, keys: Vec<ApiKey>) {
        self.api_keys.send_replace(keys);
    }

    pub fn api_keys(&self) -> Vec<ApiKey> {
        self.api_keys.borrow().clone()
    }

    pub fn subscribe_api_keys(&self) -> watch::Receiver<Vec<ApiKey>> {
        self.api_keys.subscribe()
    }

    /// Designate the mealie key. Set by the caller, not derived from the key
    /// list; `is_mealie_configured` is recomputed before this returns.
    pub fn set_mealie_key(&self, key: Option<ApiKey>) {
        let configured = key.is_some();
        self.mealie_key.send_replace(key);
        self.mealie_configured.send_replace(configured);
    }

    pub fn mealie_key(&self) -> Option<ApiKey> {
        self.mealie_key.borrow().clone()
    }

    /// `true` iff a mealie key has been designated.
    pub fn is_mealie_configured(&self) -> bool {
        *self.mealie_configured.borrow()
    }

    pub fn subscribe_mealie_key(&self) -> watch::Receiver<Option<ApiKey>> {
        self.mealie_key.subscribe()
    }

    pub fn subscribe_mealie_configured(&self) -> watch::Receiver<bool> {
        self.mealie_configured.subscribe()
    }

    // ---------- Recipes ----------

    pub fn set_extracted_recipe(&self, recipe: Option<Recipe>) {
        self.extracted_recipe.send_replace(recipe);
    }

    pub fn extracted_recipe(&self) -> Option<Recipe> {
        self.extracted_recipe.borrow().clone()
    }

    pub fn subscribe_extracted_recipe(&self) -> watch::Receiver<Option<Recipe>> {
        self.extracted_recipe.subscribe()
    }

    pub fn set_suggested_recipe(&self, recipe: Option<Recipe>) {
        self.suggested_recipe.send_replace(recipe);
    }

    pub fn suggested_recipe(&self) -> Option<Recipe> {
        self.suggested_recipe.borrow().clone()
    }

    pub fn subscribe_suggested_recipe(&self) -> watch::Receiver<Option<Recipe>> {
        self.suggested_recipe.subscribe()
    }

    // ---------- Loading / error ----------

    pub fn set_loading(&self, loading: bool) {
        self.loading.send_replace(loading);
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Overwrite the error message; last write wins.
    pub fn set_error(&self, message: Option<String>) {
        self.error.send_replace(message);
    }

    pub fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn subscribe_error(&self) -> watch::Receiver<Option<String>> {
        self.error.subscribe()
    }

    // ---------- Logout ----------

    /// Reset all session-scoped state: token (and its persisted copy), user,
    /// API keys, mealie key, extracted recipe, and error.
    ///
    /// The loading flag and the suggested-recipe slot are not session-scoped
    /// and are left untouched; callers wanting a fully blank state clear those
    /// explicitly.
    pub fn logout(&self) {
        debug!("clearing session state");
        self.set_token(None);
        self.set_user(None);
        self.set_api_keys(Vec::new());
        self.set_mealie_key(None);
        self.set_extracted_recipe(None);
        self.set_error(None);
    }
}
