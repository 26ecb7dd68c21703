//! [`SqliteStore`], the SQLite implementation of [`BookingStore`].

use std::path::Path;

use gigbook_core::{
  artist::{Artist, ArtistId, NewArtist},
  show::{NewShow, Show, ShowId, ShowListing},
  store::BookingStore,
  venue::{NewVenue, Venue, VenueId},
};
use rusqlite::OptionalExtension as _;

use crate::{
  Result,
  encode::{
    ARTIST_COLUMNS, RawArtist, RawShow, RawShowListing, RawVenue, SHOW_COLUMNS,
    SHOW_LISTING_SELECT, VENUE_COLUMNS, contains_pattern, encode_dt, encode_genres,
  },
  schema::{FOLD_CASE, SCHEMA, register_functions},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A booking store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. Every write
/// runs inside its own transaction; a transaction dropped before `commit`
/// rolls back.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, used for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        register_functions(conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a single write statement in its own transaction and return the
  /// number of affected rows together with the last inserted rowid.
  async fn write(
    &self,
    sql: &'static str,
    params: Vec<rusqlite::types::Value>,
  ) -> Result<(usize, i64)> {
    let out = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(sql, rusqlite::params_from_iter(params))?;
        let rowid = tx.last_insert_rowid();
        tx.commit()?;
        Ok((changed, rowid))
      })
      .await?;
    Ok(out)
  }

  async fn select_venues(
    &self,
    sql: String,
    params: Vec<rusqlite::types::Value>,
  ) -> Result<Vec<Venue>> {
    let raws: Vec<RawVenue> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawVenue::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawVenue::into_venue).collect()
  }

  async fn select_artists(
    &self,
    sql: String,
    params: Vec<rusqlite::types::Value>,
  ) -> Result<Vec<Artist>> {
    let raws: Vec<RawArtist> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawArtist::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawArtist::into_artist).collect()
  }

  async fn select_listings(
    &self,
    sql: String,
    params: Vec<rusqlite::types::Value>,
  ) -> Result<Vec<ShowListing>> {
    let raws: Vec<RawShowListing> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawShowListing::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawShowListing::into_listing).collect()
  }
}

// ─── Column binding ──────────────────────────────────────────────────────────

fn venue_values(v: &NewVenue) -> Result<Vec<rusqlite::types::Value>> {
  use rusqlite::types::Value;
  Ok(vec![
    Value::Text(v.name.clone()),
    Value::Text(encode_genres(&v.genres)?),
    Value::Text(v.address.clone()),
    Value::Text(v.city.clone()),
    Value::Text(v.state.clone()),
    Value::Text(v.phone.clone()),
    v.website.clone().map_or(Value::Null, Value::Text),
    Value::Text(v.facebook_link.clone()),
    Value::Integer(v.seeking_talent.into()),
    Value::Text(v.seeking_description.clone()),
    v.image_link.clone().map_or(Value::Null, Value::Text),
  ])
}

fn artist_values(a: &NewArtist) -> Result<Vec<rusqlite::types::Value>> {
  use rusqlite::types::Value;
  Ok(vec![
    Value::Text(a.name.clone()),
    Value::Text(encode_genres(&a.genres)?),
    Value::Text(a.city.clone()),
    Value::Text(a.state.clone()),
    Value::Text(a.phone.clone()),
    a.website.clone().map_or(Value::Null, Value::Text),
    Value::Text(a.facebook_link.clone()),
    a.image_link.clone().map_or(Value::Null, Value::Text),
    Value::Integer(a.seeking_venue.into()),
    Value::Text(a.seeking_description.clone()),
  ])
}

fn venue_as_new(v: &Venue) -> NewVenue {
  NewVenue {
    name:                v.name.clone(),
    genres:              v.genres.clone(),
    address:             v.address.clone(),
    city:                v.city.clone(),
    state:               v.state.clone(),
    phone:               v.phone.clone(),
    website:             v.website.clone(),
    facebook_link:       v.facebook_link.clone(),
    seeking_talent:      v.seeking_talent,
    seeking_description: v.seeking_description.clone(),
    image_link:          v.image_link.clone(),
  }
}

fn artist_as_new(a: &Artist) -> NewArtist {
  NewArtist {
    name:                a.name.clone(),
    genres:              a.genres.clone(),
    city:                a.city.clone(),
    state:               a.state.clone(),
    phone:               a.phone.clone(),
    website:             a.website.clone(),
    facebook_link:       a.facebook_link.clone(),
    image_link:          a.image_link.clone(),
    seeking_venue:       a.seeking_venue,
    seeking_description: a.seeking_description.clone(),
  }
}

// ─── BookingStore impl ───────────────────────────────────────────────────────

impl BookingStore for SqliteStore {
  type Error = crate::Error;

  // ── Venues ────────────────────────────────────────────────────────────────

  async fn add_venue(&self, input: NewVenue) -> Result<Venue> {
    let params = venue_values(&input)?;
    let (_, id) = self
      .write(
        "INSERT INTO venue (
           name, genres, address, city, state, phone,
           website, facebook_link, seeking_talent, seeking_description, image_link
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params,
      )
      .await?;

    tracing::debug!(id, name = %input.name, "venue inserted");
    Ok(Venue::from_new(id, input))
  }

  async fn get_venue(&self, id: VenueId) -> Result<Option<Venue>> {
    let raw: Option<RawVenue> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {VENUE_COLUMNS} FROM venue WHERE id = ?1"),
            rusqlite::params![id],
            RawVenue::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawVenue::into_venue).transpose()
  }

  async fn list_venues(&self) -> Result<Vec<Venue>> {
    self
      .select_venues(
        format!("SELECT {VENUE_COLUMNS} FROM venue ORDER BY state, city, name, id"),
        Vec::new(),
      )
      .await
  }

  async fn search_venues(&self, term: &str) -> Result<Vec<Venue>> {
    self
      .select_venues(
        format!(
          "SELECT {VENUE_COLUMNS} FROM venue
           WHERE {FOLD_CASE}(name) LIKE ?1 ESCAPE '\\'
           ORDER BY name, id"
        ),
        vec![rusqlite::types::Value::Text(contains_pattern(&term.to_lowercase()))],
      )
      .await
  }

  async fn update_venue(&self, venue: Venue) -> Result<Venue> {
    let mut params = venue_values(&venue_as_new(&venue))?;
    params.push(venue.id.into());

    let (changed, _) = self
      .write(
        "UPDATE venue SET
           name = ?1, genres = ?2, address = ?3, city = ?4, state = ?5,
           phone = ?6, website = ?7, facebook_link = ?8, seeking_talent = ?9,
           seeking_description = ?10, image_link = ?11
         WHERE id = ?12",
        params,
      )
      .await?;

    if changed == 0 {
      return Err(gigbook_core::Error::VenueNotFound(venue.id).into());
    }
    Ok(venue)
  }

  async fn delete_venue(&self, id: VenueId) -> Result<()> {
    let (changed, _) = self
      .write("DELETE FROM venue WHERE id = ?1", vec![id.into()])
      .await?;

    if changed == 0 {
      return Err(gigbook_core::Error::VenueNotFound(id).into());
    }
    tracing::debug!(id, "venue deleted");
    Ok(())
  }

  // ── Artists ───────────────────────────────────────────────────────────────

  async fn add_artist(&self, input: NewArtist) -> Result<Artist> {
    let params = artist_values(&input)?;
    let (_, id) = self
      .write(
        "INSERT INTO artist (
           name, genres, city, state, phone, website,
           facebook_link, image_link, seeking_venue, seeking_description
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params,
      )
      .await?;

    tracing::debug!(id, name = %input.name, "artist inserted");
    Ok(Artist::from_new(id, input))
  }

  async fn get_artist(&self, id: ArtistId) -> Result<Option<Artist>> {
    let raw: Option<RawArtist> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {ARTIST_COLUMNS} FROM artist WHERE id = ?1"),
            rusqlite::params![id],
            RawArtist::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawArtist::into_artist).transpose()
  }

  async fn list_artists(&self) -> Result<Vec<Artist>> {
    self
      .select_artists(
        format!("SELECT {ARTIST_COLUMNS} FROM artist ORDER BY name, id"),
        Vec::new(),
      )
      .await
  }

  async fn search_artists(&self, term: &str) -> Result<Vec<Artist>> {
    self
      .select_artists(
        format!(
          "SELECT {ARTIST_COLUMNS} FROM artist
           WHERE {FOLD_CASE}(name) LIKE ?1 ESCAPE '\\'
           ORDER BY name, id"
        ),
        vec![rusqlite::types::Value::Text(contains_pattern(&term.to_lowercase()))],
      )
      .await
  }

  async fn update_artist(&self, artist: Artist) -> Result<Artist> {
    let mut params = artist_values(&artist_as_new(&artist))?;
    params.push(artist.id.into());

    let (changed, _) = self
      .write(
        "UPDATE artist SET
           name = ?1, genres = ?2, city = ?3, state = ?4, phone = ?5,
           website = ?6, facebook_link = ?7, image_link = ?8,
           seeking_venue = ?9, seeking_description = ?10
         WHERE id = ?11",
        params,
      )
      .await?;

    if changed == 0 {
      return Err(gigbook_core::Error::ArtistNotFound(artist.id).into());
    }
    Ok(artist)
  }

  async fn delete_artist(&self, id: ArtistId) -> Result<()> {
    let (changed, _) = self
      .write("DELETE FROM artist WHERE id = ?1", vec![id.into()])
      .await?;

    if changed == 0 {
      return Err(gigbook_core::Error::ArtistNotFound(id).into());
    }
    tracing::debug!(id, "artist deleted");
    Ok(())
  }

  // ── Shows ─────────────────────────────────────────────────────────────────

  async fn add_show(&self, input: NewShow) -> Result<Show> {
    let (_, id) = self
      .write(
        "INSERT INTO show (venue_id, artist_id, date) VALUES (?1, ?2, ?3)",
        vec![
          input.venue_id.into(),
          input.artist_id.into(),
          encode_dt(input.date).into(),
        ],
      )
      .await?;

    tracing::debug!(id, venue_id = input.venue_id, artist_id = input.artist_id, "show inserted");
    Ok(Show::from_new(id, input))
  }

  async fn get_show(&self, id: ShowId) -> Result<Option<Show>> {
    let raw: Option<RawShow> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {SHOW_COLUMNS} FROM show WHERE id = ?1"),
            rusqlite::params![id],
            RawShow::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawShow::into_show).transpose()
  }

  async fn update_show(&self, show: Show) -> Result<Show> {
    let (changed, _) = self
      .write(
        "UPDATE show SET venue_id = ?1, artist_id = ?2, date = ?3 WHERE id = ?4",
        vec![
          show.venue_id.into(),
          show.artist_id.into(),
          encode_dt(show.date).into(),
          show.id.into(),
        ],
      )
      .await?;

    if changed == 0 {
      return Err(gigbook_core::Error::ShowNotFound(show.id).into());
    }
    Ok(show)
  }

  async fn delete_show(&self, id: ShowId) -> Result<()> {
    let (changed, _) = self
      .write("DELETE FROM show WHERE id = ?1", vec![id.into()])
      .await?;

    if changed == 0 {
      return Err(gigbook_core::Error::ShowNotFound(id).into());
    }
    Ok(())
  }

  async fn list_shows(&self) -> Result<Vec<Show>> {
    let raws: Vec<RawShow> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {SHOW_COLUMNS} FROM show ORDER BY date, id"))?;
        let rows = stmt
          .query_map([], RawShow::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawShow::into_show).collect()
  }

  async fn list_show_listings(&self) -> Result<Vec<ShowListing>> {
    self
      .select_listings(format!("{SHOW_LISTING_SELECT} ORDER BY s.date, s.id"), Vec::new())
      .await
  }

  async fn venue_shows(&self, venue_id: VenueId) -> Result<Vec<ShowListing>> {
    self
      .select_listings(
        format!("{SHOW_LISTING_SELECT} WHERE s.venue_id = ?1 ORDER BY s.date, s.id"),
        vec![venue_id.into()],
      )
      .await
  }

  async fn artist_shows(&self, artist_id: ArtistId) -> Result<Vec<ShowListing>> {
    self
      .select_listings(
        format!("{SHOW_LISTING_SELECT} WHERE s.artist_id = ?1 ORDER BY s.date, s.id"),
        vec![artist_id.into()],
      )
      .await
  }
}
