pub mod artists;
pub mod shows;
pub mod venues;

use serde::Serialize;

use crate::{
  error::Error,
  page::{Flash, Page},
};

/// `GET /`
pub async fn home() -> Page { Page::home() }

/// Fallback for every unrouted path.
pub async fn not_found() -> Error { Error::NotFound }

/// Path ids that are not integers name nothing, so they are a 404 rather than
/// a bad request.
pub(crate) fn parse_id(raw: &str) -> Result<i64, Error> {
  raw.parse().map_err(|_| Error::NotFound)
}

/// The failure branch shared by every write handler: log the cause and send
/// the user home with a generic notice.
pub(crate) fn write_failed(action: &'static str, err: &Error, message: &'static str) -> Page {
  tracing::error!(action, kind = ?err.kind(), error = %err, "write failed");
  Page::home().flash(Flash::error(message))
}

/// `{id, name, num_upcoming_shows}` row used by the venue list and both
/// search pages.
#[derive(Debug, Serialize)]
pub(crate) struct Summary {
  pub id:                 i64,
  pub name:               String,
  pub num_upcoming_shows: usize,
}

/// Body of a search page.
#[derive(Debug, Serialize)]
pub(crate) struct SearchResults {
  pub count: usize,
  pub data:  Vec<Summary>,
}

impl From<Vec<Summary>> for SearchResults {
  fn from(data: Vec<Summary>) -> Self { Self { count: data.len(), data } }
}
