//! The `BookingStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `gigbook-store-sqlite`).
//! The web layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  StoreError,
  artist::{Artist, ArtistId, NewArtist},
  show::{NewShow, Show, ShowId, ShowListing},
  venue::{NewVenue, Venue, VenueId},
};

/// Abstraction over a booking store backend.
///
/// Every write commits before the future resolves; a failed write leaves no
/// trace. Referential integrity between shows and their venue/artist is the
/// backend's responsibility.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait BookingStore: Send + Sync {
  type Error: StoreError;

  // ── Venues ────────────────────────────────────────────────────────────

  /// Insert a venue and return it with its assigned id.
  fn add_venue(
    &self,
    input: NewVenue,
  ) -> impl Future<Output = Result<Venue, Self::Error>> + Send + '_;

  /// Retrieve a venue by id. Returns `None` if not found.
  fn get_venue(
    &self,
    id: VenueId,
  ) -> impl Future<Output = Result<Option<Venue>, Self::Error>> + Send + '_;

  /// All venues, ordered by state, city, then name.
  fn list_venues(
    &self,
  ) -> impl Future<Output = Result<Vec<Venue>, Self::Error>> + Send + '_;

  /// Venues whose name contains `term`, ignoring ASCII case.
  fn search_venues<'a>(
    &'a self,
    term: &'a str,
  ) -> impl Future<Output = Result<Vec<Venue>, Self::Error>> + Send + 'a;

  /// Overwrite every editable column of `venue.id` with `venue`.
  fn update_venue(
    &self,
    venue: Venue,
  ) -> impl Future<Output = Result<Venue, Self::Error>> + Send + '_;

  /// Delete a venue. Fails with a constraint error while shows still
  /// reference it.
  fn delete_venue(
    &self,
    id: VenueId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Artists ───────────────────────────────────────────────────────────

  fn add_artist(
    &self,
    input: NewArtist,
  ) -> impl Future<Output = Result<Artist, Self::Error>> + Send + '_;

  fn get_artist(
    &self,
    id: ArtistId,
  ) -> impl Future<Output = Result<Option<Artist>, Self::Error>> + Send + '_;

  /// All artists, ordered by name.
  fn list_artists(
    &self,
  ) -> impl Future<Output = Result<Vec<Artist>, Self::Error>> + Send + '_;

  fn search_artists<'a>(
    &'a self,
    term: &'a str,
  ) -> impl Future<Output = Result<Vec<Artist>, Self::Error>> + Send + 'a;

  fn update_artist(
    &self,
    artist: Artist,
  ) -> impl Future<Output = Result<Artist, Self::Error>> + Send + '_;

  fn delete_artist(
    &self,
    id: ArtistId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Shows ─────────────────────────────────────────────────────────────

  /// Insert a show. Fails with a constraint error if the venue or artist
  /// does not exist.
  fn add_show(
    &self,
    input: NewShow,
  ) -> impl Future<Output = Result<Show, Self::Error>> + Send + '_;

  fn get_show(
    &self,
    id: ShowId,
  ) -> impl Future<Output = Result<Option<Show>, Self::Error>> + Send + '_;

  fn update_show(
    &self,
    show: Show,
  ) -> impl Future<Output = Result<Show, Self::Error>> + Send + '_;

  fn delete_show(
    &self,
    id: ShowId,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Every show as a bare row; used for per-entity counts.
  fn list_shows(
    &self,
  ) -> impl Future<Output = Result<Vec<Show>, Self::Error>> + Send + '_;

  /// Every show joined with venue and artist display fields, ordered by date.
  fn list_show_listings(
    &self,
  ) -> impl Future<Output = Result<Vec<ShowListing>, Self::Error>> + Send + '_;

  /// Joined shows hosted by `venue_id`, ordered by date.
  fn venue_shows(
    &self,
    venue_id: VenueId,
  ) -> impl Future<Output = Result<Vec<ShowListing>, Self::Error>> + Send + '_;

  /// Joined shows played by `artist_id`, ordered by date.
  fn artist_shows(
    &self,
    artist_id: ArtistId,
  ) -> impl Future<Output = Result<Vec<ShowListing>, Self::Error>> + Send + '_;
}
