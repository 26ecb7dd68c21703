//! HTTP layer for the gigbook booking directory.
//!
//! Exposes an axum [`Router`] over any [`BookingStore`]. Every handler
//! produces a [`page::Page`] view model; rendering it to HTML belongs to the
//! presentation layer.

pub mod error;
pub mod form;
pub mod handlers;
pub mod page;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use gigbook_core::store::BookingStore;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use handlers::{artists, shows, venues};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `GIGBOOK_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:          String,
  pub port:          u16,
  pub database_path: PathBuf,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers. The store is the only
/// persistence handle; handlers never reach for a global.
#[derive(Clone)]
pub struct AppState<S: BookingStore> {
  pub store: Arc<S>,
}

impl<S: BookingStore> AppState<S> {
  pub fn new(store: S) -> Self { Self { store: Arc::new(store) } }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the whole site.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: BookingStore + Clone + 'static,
{
  Router::new()
    .route("/", get(handlers::home))
    // Venues
    .route("/venues", get(venues::list::<S>))
    .route("/venues/search", post(venues::search::<S>))
    .route("/venues/create", get(venues::create_form).post(venues::create_submit::<S>))
    .route("/venues/{id}", get(venues::detail::<S>).delete(venues::delete::<S>))
    .route("/venues/{id}/edit", get(venues::edit_form::<S>).post(venues::edit_submit::<S>))
    // Artists
    .route("/artists", get(artists::list::<S>))
    .route("/artists/search", post(artists::search::<S>))
    .route("/artists/create", get(artists::create_form).post(artists::create_submit::<S>))
    .route("/artists/{id}", get(artists::detail::<S>).delete(artists::delete::<S>))
    .route("/artists/{id}/edit", get(artists::edit_form::<S>).post(artists::edit_submit::<S>))
    // Shows
    .route("/shows", get(shows::list::<S>))
    .route("/shows/create", get(shows::create_form).post(shows::create_submit::<S>))
    .fallback(handlers::not_found)
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
