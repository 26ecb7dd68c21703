//! Artists: performers that can be booked for shows.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub type ArtistId = i64;

/// A persisted artist row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
  pub id:                  ArtistId,
  pub name:                String,
  pub genres:              Vec<String>,
  pub city:                String,
  pub state:               String,
  pub phone:               String,
  pub website:             Option<String>,
  pub facebook_link:       String,
  pub image_link:          Option<String>,
  pub seeking_venue:       bool,
  pub seeking_description: String,
}

/// Input to [`crate::store::BookingStore::add_artist`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewArtist {
  pub name:                String,
  pub genres:              Vec<String>,
  pub city:                String,
  pub state:               String,
  pub phone:               String,
  pub website:             Option<String>,
  pub facebook_link:       String,
  pub image_link:          Option<String>,
  pub seeking_venue:       bool,
  pub seeking_description: String,
}

impl Artist {
  pub fn from_new(id: ArtistId, input: NewArtist) -> Self {
    Self {
      id,
      name: input.name,
      genres: input.genres,
      city: input.city,
      state: input.state,
      phone: input.phone,
      website: input.website,
      facebook_link: input.facebook_link,
      image_link: input.image_link,
      seeking_venue: input.seeking_venue,
      seeking_description: input.seeking_description,
    }
  }

  /// Flat view model consumed by the artist pages. Same `image-link` key as
  /// [`crate::venue::Venue::format`]; `website` is kept for the edit form
  /// only.
  pub fn format(&self) -> Value {
    json!({
      "id":                  self.id,
      "name":                self.name,
      "genres":              self.genres,
      "city":                self.city,
      "state":               self.state,
      "phone":               self.phone,
      "facebook_link":       self.facebook_link,
      "seeking_venue":       self.seeking_venue,
      "seeking_description": self.seeking_description,
      "image-link":          self.image_link,
    })
  }
}
