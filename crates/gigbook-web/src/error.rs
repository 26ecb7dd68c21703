//! Error types and axum `IntoResponse` implementation.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use gigbook_core::{ErrorKind, StoreError};
use thiserror::Error;

use crate::{form::FormError, page::Page};

#[derive(Debug, Error)]
pub enum Error {
  #[error("not found")]
  NotFound,

  #[error("invalid form: {0}")]
  Form(#[from] FormError),

  #[error("failed to build page: {0}")]
  Render(#[from] serde_json::Error),

  #[error("store error ({kind:?}): {source}")]
  Store {
    kind:   ErrorKind,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },
}

impl Error {
  /// Wrap a backend error, keeping its classification.
  pub fn store<E: StoreError>(e: E) -> Self {
    Self::Store { kind: e.kind(), source: Box::new(e) }
  }

  /// Classification used for logging; form problems count as constraint
  /// failures since the row would have been rejected anyway.
  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::NotFound => ErrorKind::NotFound,
      Self::Form(_) => ErrorKind::Constraint,
      Self::Render(_) => ErrorKind::Database,
      Self::Store { kind, .. } => *kind,
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::NotFound => Page::new("errors/404.html")
        .status(StatusCode::NOT_FOUND)
        .into_response(),
      Error::Form(e) => {
        tracing::warn!(error = %e, "rejected form");
        Page::new("errors/400.html")
          .status(StatusCode::BAD_REQUEST)
          .into_response()
      }
      Error::Render(e) => {
        tracing::error!(error = %e, "page context failed to serialise");
        Page::new("errors/500.html")
          .status(StatusCode::INTERNAL_SERVER_ERROR)
          .into_response()
      }
      Error::Store { kind: ErrorKind::NotFound, .. } => Page::new("errors/404.html")
        .status(StatusCode::NOT_FOUND)
        .into_response(),
      Error::Store { kind, source } => {
        tracing::error!(?kind, error = %source, "store error");
        Page::new("errors/500.html")
          .status(StatusCode::INTERNAL_SERVER_ERROR)
          .into_response()
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;

  #[test]
  fn render_failure_is_a_server_error() {
    let bad: HashMap<(i64, i64), i64> = HashMap::from([((1, 2), 3)]);
    let err = Page::home().with("bad", bad).map(|_| ()).map_err(Error::from).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Database);
    assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
