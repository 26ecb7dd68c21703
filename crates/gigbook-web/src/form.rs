//! Form-encoded input and the typed forms built from it.
//!
//! Bodies are decoded into ordered key/value pairs first so that multi-valued
//! fields (`genres`, or `genres[]` as some clients send it) survive.

use chrono::{DateTime, NaiveDateTime, Utc};
use gigbook_core::{
  artist::{Artist, ArtistId, NewArtist},
  show::NewShow,
  venue::{NewVenue, Venue, VenueId},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
  #[error("missing field: {0}")]
  Missing(&'static str),

  #[error("invalid {field}: {reason}")]
  Invalid { field: &'static str, reason: String },
}

// ─── Raw fields ──────────────────────────────────────────────────────────────

/// A decoded `application/x-www-form-urlencoded` body, in submission order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
  /// First value submitted for `name`.
  pub fn get(&self, name: &str) -> Option<&str> {
    self.0.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
  }

  pub fn required(&self, name: &'static str) -> Result<String, FormError> {
    self
      .get(name)
      .map(str::to_owned)
      .ok_or(FormError::Missing(name))
  }

  /// A value that must be present and not blank.
  pub fn non_blank(&self, name: &'static str) -> Result<String, FormError> {
    let value = self.required(name)?;
    if value.trim().is_empty() {
      return Err(FormError::Invalid { field: name, reason: "must not be blank".into() });
    }
    Ok(value)
  }

  /// Absent and empty values both read as `None`.
  pub fn optional(&self, name: &str) -> Option<String> {
    self
      .get(name)
      .filter(|v| !v.trim().is_empty())
      .map(str::to_owned)
  }

  /// Every non-empty value submitted as `name` or `name[]`.
  pub fn all(&self, name: &str) -> Vec<String> {
    let bracketed = format!("{name}[]");
    self
      .0
      .iter()
      .filter(|(k, _)| k == name || *k == bracketed)
      .filter(|(_, v)| !v.is_empty())
      .map(|(_, v)| v.clone())
      .collect()
  }

  /// Checkbox semantics: unchecked boxes are not submitted at all.
  pub fn flag(&self, name: &str) -> bool {
    self.get(name).is_some_and(|v| {
      !matches!(v.trim().to_ascii_lowercase().as_str(), "" | "false" | "off" | "0" | "n" | "no")
    })
  }

  pub fn id(&self, name: &'static str) -> Result<i64, FormError> {
    let raw = self.required(name)?;
    raw.trim().parse().map_err(|_| FormError::Invalid {
      field:  name,
      reason: format!("{raw:?} is not an id"),
    })
  }
}

impl From<Vec<(String, String)>> for FormFields {
  fn from(pairs: Vec<(String, String)>) -> Self { Self(pairs) }
}

// ─── Venue ───────────────────────────────────────────────────────────────────

/// The venue create/edit form. Serialised as-is to pre-fill the edit page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VenueForm {
  pub name:                String,
  pub city:                String,
  pub state:               String,
  pub address:             String,
  pub phone:               String,
  pub genres:              Vec<String>,
  pub facebook_link:       String,
  pub image_link:          Option<String>,
  pub website:             Option<String>,
  pub seeking_talent:      bool,
  pub seeking_description: String,
}

impl VenueForm {
  pub fn parse(fields: &FormFields) -> Result<Self, FormError> {
    Ok(Self {
      name:                fields.non_blank("name")?,
      city:                fields.required("city")?,
      state:               fields.required("state")?,
      address:             fields.required("address")?,
      phone:               fields.required("phone")?,
      genres:              fields.all("genres"),
      facebook_link:       fields.required("facebook_link")?,
      image_link:          fields.optional("image_link"),
      website:             fields.optional("website"),
      seeking_talent:      fields.flag("seeking_talent"),
      seeking_description: fields.get("seeking_description").unwrap_or_default().to_owned(),
    })
  }

  pub fn into_new_venue(self) -> NewVenue {
    NewVenue {
      name:                self.name,
      genres:              self.genres,
      address:             self.address,
      city:                self.city,
      state:               self.state,
      phone:               self.phone,
      website:             self.website,
      facebook_link:       self.facebook_link,
      seeking_talent:      self.seeking_talent,
      seeking_description: self.seeking_description,
      image_link:          self.image_link,
    }
  }

  /// Overwrite every editable field of `venue`; the id is kept.
  pub fn into_venue(self, id: VenueId) -> Venue { Venue::from_new(id, self.into_new_venue()) }
}

impl From<&Venue> for VenueForm {
  fn from(v: &Venue) -> Self {
    Self {
      name:                v.name.clone(),
      city:                v.city.clone(),
      state:               v.state.clone(),
      address:             v.address.clone(),
      phone:               v.phone.clone(),
      genres:              v.genres.clone(),
      facebook_link:       v.facebook_link.clone(),
      image_link:          v.image_link.clone(),
      website:             v.website.clone(),
      seeking_talent:      v.seeking_talent,
      seeking_description: v.seeking_description.clone(),
    }
  }
}

// ─── Artist ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArtistForm {
  pub name:                String,
  pub city:                String,
  pub state:               String,
  pub phone:               String,
  pub genres:              Vec<String>,
  pub facebook_link:       String,
  pub image_link:          Option<String>,
  pub website:             Option<String>,
  pub seeking_venue:       bool,
  pub seeking_description: String,
}

impl ArtistForm {
  pub fn parse(fields: &FormFields) -> Result<Self, FormError> {
    Ok(Self {
      name:                fields.non_blank("name")?,
      city:                fields.required("city")?,
      state:               fields.required("state")?,
      phone:               fields.required("phone")?,
      genres:              fields.all("genres"),
      facebook_link:       fields.required("facebook_link")?,
      image_link:          fields.optional("image_link"),
      website:             fields.optional("website"),
      seeking_venue:       fields.flag("seeking_venue"),
      seeking_description: fields.get("seeking_description").unwrap_or_default().to_owned(),
    })
  }

  pub fn into_new_artist(self) -> NewArtist {
    NewArtist {
      name:                self.name,
      genres:              self.genres,
      city:                self.city,
      state:               self.state,
      phone:               self.phone,
      website:             self.website,
      facebook_link:       self.facebook_link,
      image_link:          self.image_link,
      seeking_venue:       self.seeking_venue,
      seeking_description: self.seeking_description,
    }
  }

  pub fn into_artist(self, id: ArtistId) -> Artist {
    Artist::from_new(id, self.into_new_artist())
  }
}

impl From<&Artist> for ArtistForm {
  fn from(a: &Artist) -> Self {
    Self {
      name:                a.name.clone(),
      city:                a.city.clone(),
      state:               a.state.clone(),
      phone:               a.phone.clone(),
      genres:              a.genres.clone(),
      facebook_link:       a.facebook_link.clone(),
      image_link:          a.image_link.clone(),
      website:             a.website.clone(),
      seeking_venue:       a.seeking_venue,
      seeking_description: a.seeking_description.clone(),
    }
  }
}

// ─── Show ────────────────────────────────────────────────────────────────────

/// Field values of the show form as displayed; `start_time` defaults to now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowForm {
  pub venue_id:   String,
  pub artist_id:  String,
  pub start_time: String,
}

impl ShowForm {
  pub fn blank(now: DateTime<Utc>) -> Self {
    Self {
      venue_id:   String::new(),
      artist_id:  String::new(),
      start_time: now.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
  }

  pub fn parse(fields: &FormFields) -> Result<NewShow, FormError> {
    Ok(NewShow {
      venue_id:  fields.id("venue_id")?,
      artist_id: fields.id("artist_id")?,
      date:      parse_start_time(&fields.required("start_time")?)?,
    })
  }
}

/// Accept RFC 3339 and the common naive layouts sent by date pickers. Naive
/// values are taken as UTC.
pub fn parse_start_time(raw: &str) -> Result<DateTime<Utc>, FormError> {
  let raw = raw.trim();
  if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
    return Ok(dt.with_timezone(&Utc));
  }
  for layout in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, layout) {
      return Ok(naive.and_utc());
    }
  }
  Err(FormError::Invalid {
    field:  "start_time",
    reason: format!("{raw:?} is not a date and time"),
  })
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone as _;

  use super::*;

  fn fields(pairs: &[(&str, &str)]) -> FormFields {
    pairs
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect::<Vec<_>>()
      .into()
  }

  fn venue_fields() -> Vec<(&'static str, &'static str)> {
    vec![
      ("name", "The Fillmore"),
      ("city", "SF"),
      ("state", "CA"),
      ("address", "1805 Geary"),
      ("phone", "415-555-0100"),
      ("genres", "Rock"),
      ("genres", "Jazz"),
      ("facebook_link", "http://fb.com/fillmore"),
    ]
  }

  #[test]
  fn genres_collects_repeated_and_bracketed_keys() {
    let f = fields(&[("genres", "Rock"), ("genres[]", "Jazz"), ("genres", ""), ("name", "x")]);
    assert_eq!(f.all("genres"), ["Rock", "Jazz"]);
  }

  #[test]
  fn venue_form_defaults_optional_fields() {
    let form = VenueForm::parse(&fields(&venue_fields())).unwrap();
    assert_eq!(form.genres, ["Rock", "Jazz"]);
    assert!(!form.seeking_talent);
    assert_eq!(form.seeking_description, "");
    assert_eq!(form.image_link, None);
  }

  #[test]
  fn venue_form_requires_address() {
    let mut pairs = venue_fields();
    pairs.retain(|(k, _)| *k != "address");
    assert_eq!(VenueForm::parse(&fields(&pairs)), Err(FormError::Missing("address")));
  }

  #[test]
  fn blank_name_is_rejected() {
    let mut pairs = venue_fields();
    pairs[0] = ("name", "   ");
    assert!(matches!(
      VenueForm::parse(&fields(&pairs)),
      Err(FormError::Invalid { field: "name", .. })
    ));
  }

  #[test]
  fn checkbox_values() {
    assert!(fields(&[("seeking_venue", "y")]).flag("seeking_venue"));
    assert!(fields(&[("seeking_venue", "on")]).flag("seeking_venue"));
    assert!(!fields(&[("seeking_venue", "false")]).flag("seeking_venue"));
    assert!(!fields(&[]).flag("seeking_venue"));
  }

  #[test]
  fn start_time_layouts() {
    let expected = Utc.with_ymd_and_hms(2035, 4, 1, 20, 30, 0).unwrap();
    for raw in [
      "2035-04-01T20:30:00Z",
      "2035-04-01T22:30:00+02:00",
      "2035-04-01 20:30:00",
      "2035-04-01 20:30",
      "2035-04-01T20:30",
    ] {
      assert_eq!(parse_start_time(raw).unwrap(), expected, "{raw}");
    }
    assert!(parse_start_time("next tuesday").is_err());
  }

  #[test]
  fn show_form_rejects_non_numeric_ids() {
    let f = fields(&[("venue_id", "abc"), ("artist_id", "1"), ("start_time", "2035-04-01 20:30")]);
    assert!(matches!(ShowForm::parse(&f), Err(FormError::Invalid { field: "venue_id", .. })));
  }
}
