//! Handlers for `/artists` pages. Same shape as [`super::venues`].

use axum::{
  Form,
  extract::{Path, State},
  response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use gigbook_core::{
  artist::Artist,
  show::{ShowListing, partition_shows, upcoming_counts},
  store::BookingStore,
};
use serde::Serialize;

use super::{SearchResults, Summary, parse_id, write_failed};
use crate::{
  AppState,
  error::Error,
  form::{ArtistForm, FormFields},
  page::{Flash, Page},
};

#[derive(Debug, Serialize)]
struct ArtistRow {
  id:   i64,
  name: String,
}

/// `GET /artists`, ordered by name.
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Page, Error>
where
  S: BookingStore + Clone + 'static,
{
  let artists: Vec<ArtistRow> = state
    .store
    .list_artists()
    .await
    .map_err(Error::store)?
    .into_iter()
    .map(|a| ArtistRow { id: a.id, name: a.name })
    .collect();

  Ok(Page::new("pages/artists.html").with("artists", artists)?)
}

/// `POST /artists/search`
pub async fn search<S>(
  State(state): State<AppState<S>>,
  Form(fields): Form<FormFields>,
) -> Result<Page, Error>
where
  S: BookingStore + Clone + 'static,
{
  let term = fields.get("search_term").unwrap_or_default().to_owned();

  let artists = state.store.search_artists(&term).await.map_err(Error::store)?;
  let shows = state.store.list_shows().await.map_err(Error::store)?;
  let counts = upcoming_counts(&shows, Utc::now(), |s| s.artist_id);

  let data: Vec<Summary> = artists
    .into_iter()
    .map(|a| Summary {
      id:                 a.id,
      num_upcoming_shows: counts.get(&a.id).copied().unwrap_or(0),
      name:               a.name,
    })
    .collect();

  Ok(
    Page::new("pages/search_artists.html")
      .with("results", SearchResults::from(data))?
      .with("search_term", term)?,
  )
}

/// `GET /artists/create`
pub async fn create_form() -> Result<Page, Error> {
  Ok(Page::new("forms/new_artist.html").with("form", ArtistForm::default())?)
}

/// `POST /artists/create`
pub async fn create_submit<S>(
  State(state): State<AppState<S>>,
  Form(fields): Form<FormFields>,
) -> Page
where
  S: BookingStore + Clone + 'static,
{
  let result = match ArtistForm::parse(&fields) {
    Ok(form) => state
      .store
      .add_artist(form.into_new_artist())
      .await
      .map_err(Error::store),
    Err(e) => Err(e.into()),
  };

  match result {
    Ok(artist) => {
      tracing::info!(id = artist.id, name = %artist.name, "artist listed");
      Page::home().flash(Flash::success(format!(
        "Artist {} was successfully listed!",
        artist.name
      )))
    }
    Err(e) => write_failed(
      "create artist",
      &e,
      "An error occurred. Artist could not be listed.",
    ),
  }
}

fn detail_view(artist: &Artist, shows: Vec<ShowListing>) -> serde_json::Value {
  let split = partition_shows(shows, Utc::now());
  let past: Vec<_> = split.past.iter().map(ShowListing::for_artist).collect();
  let upcoming: Vec<_> = split.upcoming.iter().map(ShowListing::for_artist).collect();

  let mut data = artist.format();
  data["past_shows_count"] = past.len().into();
  data["upcoming_shows_count"] = upcoming.len().into();
  data["past_shows"] = past.into();
  data["upcoming_shows"] = upcoming.into();
  data
}

/// `GET /artists/{id}`
pub async fn detail<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Page, Error>
where
  S: BookingStore + Clone + 'static,
{
  let id = parse_id(&id)?;
  let artist = state
    .store
    .get_artist(id)
    .await
    .map_err(Error::store)?
    .ok_or(Error::NotFound)?;
  let shows = state.store.artist_shows(id).await.map_err(Error::store)?;

  Ok(Page::new("pages/show_artist.html").with("artist", detail_view(&artist, shows))?)
}

/// `DELETE /artists/{id}`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Response
where
  S: BookingStore + Clone + 'static,
{
  let result = match parse_id(&id) {
    Ok(id) => state.store.delete_artist(id).await.map_err(Error::store),
    Err(e) => Err(e),
  };

  match result {
    Ok(()) => {
      tracing::info!(id = %id, "artist deleted");
      Redirect::to("/artists").into_response()
    }
    Err(e) => write_failed(
      "delete artist",
      &e,
      "An error occurred. Artist could not be deleted.",
    )
    .into_response(),
  }
}

/// `GET /artists/{id}/edit`
pub async fn edit_form<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Page, Error>
where
  S: BookingStore + Clone + 'static,
{
  let id = parse_id(&id)?;
  let artist = state
    .store
    .get_artist(id)
    .await
    .map_err(Error::store)?
    .ok_or(Error::NotFound)?;

  Ok(
    Page::new("forms/edit_artist.html")
      .with("form", ArtistForm::from(&artist))?
      .with("artist", artist.format())?,
  )
}

/// `POST /artists/{id}/edit`
pub async fn edit_submit<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
  Form(fields): Form<FormFields>,
) -> Result<Response, Error>
where
  S: BookingStore + Clone + 'static,
{
  let id = parse_id(&id)?;
  state
    .store
    .get_artist(id)
    .await
    .map_err(Error::store)?
    .ok_or(Error::NotFound)?;

  let result = match ArtistForm::parse(&fields) {
    Ok(form) => state
      .store
      .update_artist(form.into_artist(id))
      .await
      .map_err(Error::store),
    Err(e) => Err(e.into()),
  };

  match result {
    Ok(artist) => {
      tracing::info!(id, name = %artist.name, "artist updated");
      Ok(Redirect::to(&format!("/artists/{id}")).into_response())
    }
    Err(e) => Ok(
      write_failed(
        "edit artist",
        &e,
        "An error occurred. Artist could not be updated.",
      )
      .into_response(),
    ),
  }
}
