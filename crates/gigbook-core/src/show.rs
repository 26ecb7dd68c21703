//! Shows: scheduled events joining one venue and one artist.
//!
//! A show is upcoming when its date is strictly after "now"; everything else
//! is past. The split is always computed at read time and never stored.

use std::{collections::HashMap, hash::Hash};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{artist::ArtistId, venue::VenueId};

pub type ShowId = i64;

/// A persisted show row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
  pub id:        ShowId,
  pub venue_id:  VenueId,
  pub artist_id: ArtistId,
  pub date:      DateTime<Utc>,
}

/// Input to [`crate::store::BookingStore::add_show`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShow {
  pub venue_id:  VenueId,
  pub artist_id: ArtistId,
  pub date:      DateTime<Utc>,
}

impl Show {
  pub fn from_new(id: ShowId, input: NewShow) -> Self {
    Self {
      id,
      venue_id: input.venue_id,
      artist_id: input.artist_id,
      date: input.date,
    }
  }

  pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool { self.date > now }
}

// ─── Listing ─────────────────────────────────────────────────────────────────

/// A show joined with the display fields of its venue and artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowListing {
  pub show:              Show,
  pub venue_name:        String,
  pub venue_image_link:  Option<String>,
  pub artist_name:       String,
  pub artist_image_link: Option<String>,
}

impl ShowListing {
  pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
    self.show.is_upcoming(now)
  }

  /// Row on a venue page: who is playing.
  pub fn for_venue(&self) -> Value {
    json!({
      "artist_id":         self.show.artist_id,
      "artist_name":       self.artist_name,
      "artist_image_link": self.artist_image_link,
      "start_time":        self.show.date,
    })
  }

  /// Row on an artist page: where they are playing.
  pub fn for_artist(&self) -> Value {
    json!({
      "venue_id":         self.show.venue_id,
      "venue_name":       self.venue_name,
      "venue_image_link": self.venue_image_link,
      "start_time":       self.show.date,
    })
  }

  /// Row on the `/shows` page.
  pub fn for_listing(&self) -> Value {
    json!({
      "venue_id":          self.show.venue_id,
      "venue_name":        self.venue_name,
      "artist_id":         self.show.artist_id,
      "artist_name":       self.artist_name,
      "artist_image_link": self.artist_image_link,
      "start_time":        self.show.date,
    })
  }
}

// ─── Classification ──────────────────────────────────────────────────────────

/// Shows split around a reference instant. The two halves are disjoint and
/// together contain every input show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<T> {
  pub upcoming: Vec<T>,
  pub past:     Vec<T>,
}

/// Split `listings` into upcoming and past relative to `now`, keeping the
/// input order within each half.
pub fn partition_shows(
  listings: Vec<ShowListing>,
  now: DateTime<Utc>,
) -> Partition<ShowListing> {
  let (upcoming, past) = listings.into_iter().partition(|l| l.is_upcoming(now));
  Partition { upcoming, past }
}

/// Number of upcoming shows per `key` (typically the venue or artist id).
/// Keys with no upcoming show are absent from the map.
pub fn upcoming_counts<'a, K: Eq + Hash>(
  shows: impl IntoIterator<Item = &'a Show>,
  now: DateTime<Utc>,
  key: impl Fn(&Show) -> K,
) -> HashMap<K, usize> {
  let mut counts = HashMap::new();
  for show in shows.into_iter().filter(|s| s.is_upcoming(now)) {
    *counts.entry(key(show)).or_insert(0) += 1;
  }
  counts
}

#[cfg(test)]
mod tests {
  use chrono::Duration;

  use super::*;

  fn listing(id: ShowId, date: DateTime<Utc>) -> ShowListing {
    ShowListing {
      show:              Show { id, venue_id: 1, artist_id: 2, date },
      venue_name:        "The Fillmore".into(),
      venue_image_link:  None,
      artist_name:       "Guns N Petals".into(),
      artist_image_link: Some("http://img/gnp.png".into()),
    }
  }

  #[test]
  fn show_at_now_is_past() {
    let now = Utc::now();
    assert!(!listing(1, now).is_upcoming(now));
    assert!(listing(2, now + Duration::seconds(1)).is_upcoming(now));
  }

  #[test]
  fn partition_is_disjoint_and_exhaustive() {
    let now = Utc::now();
    let input = vec![
      listing(1, now - Duration::days(3)),
      listing(2, now + Duration::days(1)),
      listing(3, now),
      listing(4, now + Duration::days(30)),
    ];

    let split = partition_shows(input, now);
    let up: Vec<_> = split.upcoming.iter().map(|l| l.show.id).collect();
    let past: Vec<_> = split.past.iter().map(|l| l.show.id).collect();
    assert_eq!(up, [2, 4]);
    assert_eq!(past, [1, 3]);
  }

  #[test]
  fn upcoming_counts_ignore_past_shows() {
    let now = Utc::now();
    let mut shows = vec![
      listing(1, now - Duration::hours(1)).show,
      listing(2, now + Duration::hours(1)).show,
      listing(3, now + Duration::hours(2)).show,
    ];
    shows[2].venue_id = 9;

    let counts = upcoming_counts(&shows, now, |s| s.venue_id);
    assert_eq!(counts.get(&1), Some(&1));
    assert_eq!(counts.get(&9), Some(&1));

    let counts = upcoming_counts(&shows[..1], now, |s| s.venue_id);
    assert!(counts.is_empty());
  }

  #[test]
  fn venue_row_carries_artist_fields() {
    let now = Utc::now();
    let row = listing(1, now).for_venue();
    assert_eq!(row["artist_id"], 2);
    assert_eq!(row["artist_name"], "Guns N Petals");
    assert_eq!(row["artist_image_link"], "http://img/gnp.png");
    assert!(row.get("venue_name").is_none());
  }
}
