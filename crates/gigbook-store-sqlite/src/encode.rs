//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with a fixed microsecond
//! precision so that text ordering matches time ordering. Genres are stored
//! as a compact JSON array.

use chrono::{DateTime, SecondsFormat, Utc};
use gigbook_core::{
  artist::Artist,
  show::{Show, ShowListing},
  venue::Venue,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Genres ──────────────────────────────────────────────────────────────────

pub fn encode_genres(genres: &[String]) -> Result<String> {
  Ok(serde_json::to_string(genres)?)
}

pub fn decode_genres(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── LIKE patterns ───────────────────────────────────────────────────────────

/// Build a `LIKE ... ESCAPE '\'` pattern matching `term` anywhere, with the
/// wildcard characters in `term` taken literally.
pub fn contains_pattern(term: &str) -> String {
  let mut out = String::with_capacity(term.len() + 2);
  out.push('%');
  for c in term.chars() {
    if matches!(c, '\\' | '%' | '_') {
      out.push('\\');
    }
    out.push(c);
  }
  out.push('%');
  out
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const VENUE_COLUMNS: &str = "id, name, genres, address, city, state, phone, \
   website, facebook_link, seeking_talent, seeking_description, image_link";

/// Raw values read directly from a `venue` row.
pub struct RawVenue {
  pub id:                  i64,
  pub name:                String,
  pub genres:              String,
  pub address:             String,
  pub city:                String,
  pub state:               String,
  pub phone:               String,
  pub website:             Option<String>,
  pub facebook_link:       String,
  pub seeking_talent:      bool,
  pub seeking_description: String,
  pub image_link:          Option<String>,
}

impl RawVenue {
  /// Map a row selected with [`VENUE_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                  row.get(0)?,
      name:                row.get(1)?,
      genres:              row.get(2)?,
      address:             row.get(3)?,
      city:                row.get(4)?,
      state:               row.get(5)?,
      phone:               row.get(6)?,
      website:             row.get(7)?,
      facebook_link:       row.get(8)?,
      seeking_talent:      row.get(9)?,
      seeking_description: row.get(10)?,
      image_link:          row.get(11)?,
    })
  }

  pub fn into_venue(self) -> Result<Venue> {
    Ok(Venue {
      id:                  self.id,
      name:                self.name,
      genres:              decode_genres(&self.genres)?,
      address:             self.address,
      city:                self.city,
      state:               self.state,
      phone:               self.phone,
      website:             self.website,
      facebook_link:       self.facebook_link,
      seeking_talent:      self.seeking_talent,
      seeking_description: self.seeking_description,
      image_link:          self.image_link,
    })
  }
}

pub const ARTIST_COLUMNS: &str = "id, name, genres, city, state, phone, website, \
   facebook_link, image_link, seeking_venue, seeking_description";

/// Raw values read directly from an `artist` row.
pub struct RawArtist {
  pub id:                  i64,
  pub name:                String,
  pub genres:              String,
  pub city:                String,
  pub state:               String,
  pub phone:               String,
  pub website:             Option<String>,
  pub facebook_link:       String,
  pub image_link:          Option<String>,
  pub seeking_venue:       bool,
  pub seeking_description: String,
}

impl RawArtist {
  /// Map a row selected with [`ARTIST_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                  row.get(0)?,
      name:                row.get(1)?,
      genres:              row.get(2)?,
      city:                row.get(3)?,
      state:               row.get(4)?,
      phone:               row.get(5)?,
      website:             row.get(6)?,
      facebook_link:       row.get(7)?,
      image_link:          row.get(8)?,
      seeking_venue:       row.get(9)?,
      seeking_description: row.get(10)?,
    })
  }

  pub fn into_artist(self) -> Result<Artist> {
    Ok(Artist {
      id:                  self.id,
      name:                self.name,
      genres:              decode_genres(&self.genres)?,
      city:                self.city,
      state:               self.state,
      phone:               self.phone,
      website:             self.website,
      facebook_link:       self.facebook_link,
      image_link:          self.image_link,
      seeking_venue:       self.seeking_venue,
      seeking_description: self.seeking_description,
    })
  }
}

pub const SHOW_COLUMNS: &str = "id, venue_id, artist_id, date";

/// Raw values read directly from a `show` row.
pub struct RawShow {
  pub id:        i64,
  pub venue_id:  i64,
  pub artist_id: i64,
  pub date:      String,
}

impl RawShow {
  /// Map a row selected with [`SHOW_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:        row.get(0)?,
      venue_id:  row.get(1)?,
      artist_id: row.get(2)?,
      date:      row.get(3)?,
    })
  }

  pub fn into_show(self) -> Result<Show> {
    Ok(Show {
      id:        self.id,
      venue_id:  self.venue_id,
      artist_id: self.artist_id,
      date:      decode_dt(&self.date)?,
    })
  }
}

/// `show` joined with `venue` and `artist`; column order matches
/// [`RawShowListing::from_row`].
pub const SHOW_LISTING_SELECT: &str = "
  SELECT s.id, s.venue_id, s.artist_id, s.date,
         v.name, v.image_link,
         a.name, a.image_link
  FROM show s
  JOIN venue  v ON v.id = s.venue_id
  JOIN artist a ON a.id = s.artist_id";

/// Raw values read from a [`SHOW_LISTING_SELECT`] row.
pub struct RawShowListing {
  pub show:              RawShow,
  pub venue_name:        String,
  pub venue_image_link:  Option<String>,
  pub artist_name:       String,
  pub artist_image_link: Option<String>,
}

impl RawShowListing {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      show:              RawShow::from_row(row)?,
      venue_name:        row.get(4)?,
      venue_image_link:  row.get(5)?,
      artist_name:       row.get(6)?,
      artist_image_link: row.get(7)?,
    })
  }

  pub fn into_listing(self) -> Result<ShowListing> {
    Ok(ShowListing {
      show:              self.show.into_show()?,
      venue_name:        self.venue_name,
      venue_image_link:  self.venue_image_link,
      artist_name:       self.artist_name,
      artist_image_link: self.artist_image_link,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn contains_pattern_escapes_wildcards() {
    assert_eq!(contains_pattern("art"), "%art%");
    assert_eq!(contains_pattern("100%_"), "%100\\%\\_%");
    assert_eq!(contains_pattern(""), "%%");
  }

  #[test]
  fn encoded_dates_sort_chronologically() {
    let early = DateTime::parse_from_rfc3339("2030-01-01T09:00:00Z")
      .unwrap()
      .with_timezone(&Utc);
    let late = early + chrono::Duration::milliseconds(1500);
    assert!(encode_dt(early) < encode_dt(late));
    assert_eq!(decode_dt(&encode_dt(late)).unwrap(), late);
  }
}
