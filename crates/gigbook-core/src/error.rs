//! Error types for `gigbook-core`.

use thiserror::Error;

use crate::{artist::ArtistId, show::ShowId, venue::VenueId};

#[derive(Debug, Error)]
pub enum Error {
  #[error("venue not found: {0}")]
  VenueNotFound(VenueId),

  #[error("artist not found: {0}")]
  ArtistNotFound(ArtistId),

  #[error("show not found: {0}")]
  ShowNotFound(ShowId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ─── Classification ──────────────────────────────────────────────────────────

/// Coarse class of a store failure. Handlers branch on this instead of on a
/// backend's concrete error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  /// The addressed row does not exist.
  NotFound,
  /// The write was rejected by a schema constraint (foreign key, NOT NULL,
  /// CHECK, UNIQUE).
  Constraint,
  /// Anything else: I/O, a closed connection, corrupt rows.
  Database,
}

/// Implemented by every [`crate::store::BookingStore::Error`].
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn kind(&self) -> ErrorKind;
}

impl StoreError for Error {
  fn kind(&self) -> ErrorKind {
    match self {
      Self::VenueNotFound(_) | Self::ArtistNotFound(_) | Self::ShowNotFound(_) => {
        ErrorKind::NotFound
      }
    }
  }
}
