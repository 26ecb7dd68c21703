//! Venues: locations that host shows.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub type VenueId = i64;

/// A persisted venue row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Venue {
  pub id:                  VenueId,
  pub name:                String,
  /// Never null; an empty list when no genre was picked.
  pub genres:              Vec<String>,
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

/// Input to [`crate::store::BookingStore::add_venue`]. The id is assigned by
/// the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewVenue {
  pub name:                String,
  pub genres:              Vec<String>,
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

impl Venue {
  /// Attach a store-assigned id to a [`NewVenue`].
  pub fn from_new(id: VenueId, input: NewVenue) -> Self {
    Self {
      id,
      name: input.name,
      genres: input.genres,
      address: input.address,
      city: input.city,
      state: input.state,
      phone: input.phone,
      website: input.website,
      facebook_link: input.facebook_link,
      seeking_talent: input.seeking_talent,
      seeking_description: input.seeking_description,
      image_link: input.image_link,
    }
  }

  /// Flat view model consumed by the venue pages.
  ///
  /// The image key is `image-link` (hyphen) to stay wire-compatible with the
  /// existing page templates.
  pub fn format(&self) -> Value {
    json!({
      "id":                  self.id,
      "name":                self.name,
      "genres":              self.genres,
      "address":             self.address,
      "city":                self.city,
      "state":               self.state,
      "phone":               self.phone,
      "website":             self.website,
      "facebook_link":       self.facebook_link,
      "seeking_talent":      self.seeking_talent,
      "seeking_description": self.seeking_description,
      "image-link":          self.image_link,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fillmore() -> Venue {
    Venue::from_new(7, NewVenue {
      name: "The Fillmore".into(),
      genres: vec!["Rock".into(), "Jazz".into()],
      address: "1805 Geary".into(),
      city: "SF".into(),
      state: "CA".into(),
      phone: "415-555-0100".into(),
      facebook_link: "http://fb.com/fillmore".into(),
      ..NewVenue::default()
    })
  }

  #[test]
  fn format_uses_hyphenated_image_key() {
    let v = fillmore().format();
    assert!(v.get("image-link").is_some());
    assert!(v.get("image_link").is_none());
  }

  #[test]
  fn format_echoes_fields_and_defaults() {
    let v = fillmore().format();
    assert_eq!(v["id"], 7);
    assert_eq!(v["name"], "The Fillmore");
    assert_eq!(v["genres"], json!(["Rock", "Jazz"]));
    assert_eq!(v["seeking_talent"], false);
    assert_eq!(v["seeking_description"], "");
    assert!(v["website"].is_null());
  }
}
