//! View models handed to the presentation layer.
//!
//! Templating is not done here. A [`Page`] names the template to render and
//! carries its context and any flash messages; the response body is that
//! document as JSON.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};

pub const HOME: &str = "pages/home.html";

// ─── Flash ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashCategory {
  Success,
  Error,
}

/// A one-time notice shown on the page it is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
  pub category: FlashCategory,
  pub message:  String,
}

impl Flash {
  pub fn success(message: impl Into<String>) -> Self {
    Self { category: FlashCategory::Success, message: message.into() }
  }

  pub fn error(message: impl Into<String>) -> Self {
    Self { category: FlashCategory::Error, message: message.into() }
  }
}

// ─── Page ────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Page {
  #[serde(skip)]
  status:   StatusCode,
  template: &'static str,
  context:  Map<String, Value>,
  flashes:  Vec<Flash>,
}

impl Page {
  pub fn new(template: &'static str) -> Self {
    Self {
      status: StatusCode::OK,
      template,
      context: Map::new(),
      flashes: Vec::new(),
    }
  }

  pub fn home() -> Self { Self::new(HOME) }

  /// Add `value` to the template context under `key`.
  pub fn with(mut self, key: &str, value: impl Serialize) -> Result<Self, serde_json::Error> {
    self.context.insert(key.to_owned(), serde_json::to_value(value)?);
    Ok(self)
  }

  pub fn flash(mut self, flash: Flash) -> Self {
    self.flashes.push(flash);
    self
  }

  pub fn status(mut self, status: StatusCode) -> Self {
    self.status = status;
    self
  }
}

impl IntoResponse for Page {
  fn into_response(self) -> Response { (self.status, Json(self)).into_response() }
}
