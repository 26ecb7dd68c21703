//! Handlers for `/venues` pages.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/venues` | Grouped by (city, state) |
//! | `POST`   | `/venues/search` | Form field `search_term` |
//! | `GET`    | `/venues/create` | Blank form |
//! | `POST`   | `/venues/create` | Flash + home page |
//! | `GET`    | `/venues/{id}` | Detail with past/upcoming shows |
//! | `DELETE` | `/venues/{id}` | Redirects to `/venues` |
//! | `GET`    | `/venues/{id}/edit` | Pre-filled form |
//! | `POST`   | `/venues/{id}/edit` | Redirects to `/venues/{id}` |

use std::collections::BTreeMap;

use axum::{
  Form,
  extract::{Path, State},
  response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use gigbook_core::{
  show::{ShowListing, partition_shows, upcoming_counts},
  store::BookingStore,
  venue::Venue,
};
use serde::Serialize;

use super::{SearchResults, Summary, parse_id, write_failed};
use crate::{
  AppState,
  error::Error,
  form::{FormFields, VenueForm},
  page::{Flash, Page},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// One (city, state) group on the venue list.
#[derive(Debug, Serialize)]
struct Area {
  city:   String,
  state:  String,
  venues: Vec<Summary>,
}

/// `GET /venues`
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Page, Error>
where
  S: BookingStore + Clone + 'static,
{
  let venues = state.store.list_venues().await.map_err(Error::store)?;
  let shows = state.store.list_shows().await.map_err(Error::store)?;
  let counts = upcoming_counts(&shows, Utc::now(), |s| s.venue_id);

  let mut areas: BTreeMap<(String, String), Vec<Summary>> = BTreeMap::new();
  for venue in venues {
    let summary = Summary {
      id:                 venue.id,
      num_upcoming_shows: counts.get(&venue.id).copied().unwrap_or(0),
      name:               venue.name,
    };
    areas.entry((venue.state, venue.city)).or_default().push(summary);
  }

  let areas: Vec<Area> = areas
    .into_iter()
    .map(|((state, city), venues)| Area { city, state, venues })
    .collect();

  Ok(Page::new("pages/venues.html").with("areas", areas)?)
}

// ─── Search ───────────────────────────────────────────────────────────────────

/// `POST /venues/search`
pub async fn search<S>(
  State(state): State<AppState<S>>,
  Form(fields): Form<FormFields>,
) -> Result<Page, Error>
where
  S: BookingStore + Clone + 'static,
{
  let term = fields.get("search_term").unwrap_or_default().to_owned();

  let venues = state.store.search_venues(&term).await.map_err(Error::store)?;
  let shows = state.store.list_shows().await.map_err(Error::store)?;
  let counts = upcoming_counts(&shows, Utc::now(), |s| s.venue_id);

  let data: Vec<Summary> = venues
    .into_iter()
    .map(|v| Summary {
      id:                 v.id,
      num_upcoming_shows: counts.get(&v.id).copied().unwrap_or(0),
      name:               v.name,
    })
    .collect();

  Ok(
    Page::new("pages/search_venues.html")
      .with("results", SearchResults::from(data))?
      .with("search_term", term)?,
  )
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `GET /venues/create`
pub async fn create_form() -> Result<Page, Error> {
  Ok(Page::new("forms/new_venue.html").with("form", VenueForm::default())?)
}

/// `POST /venues/create`
pub async fn create_submit<S>(
  State(state): State<AppState<S>>,
  Form(fields): Form<FormFields>,
) -> Page
where
  S: BookingStore + Clone + 'static,
{
  let result = match VenueForm::parse(&fields) {
    Ok(form) => state
      .store
      .add_venue(form.into_new_venue())
      .await
      .map_err(Error::store),
    Err(e) => Err(e.into()),
  };

  match result {
    Ok(venue) => {
      tracing::info!(id = venue.id, name = %venue.name, "venue listed");
      Page::home().flash(Flash::success(format!(
        "Venue {} was successfully listed!",
        venue.name
      )))
    }
    Err(e) => write_failed(
      "create venue",
      &e,
      "An error occurred. Venue could not be listed.",
    ),
  }
}

// ─── Detail ───────────────────────────────────────────────────────────────────

/// `format()` plus the venue's shows split around now.
fn detail_view(venue: &Venue, shows: Vec<ShowListing>) -> serde_json::Value {
  let split = partition_shows(shows, Utc::now());
  let past: Vec<_> = split.past.iter().map(ShowListing::for_venue).collect();
  let upcoming: Vec<_> = split.upcoming.iter().map(ShowListing::for_venue).collect();

  let mut data = venue.format();
  data["past_shows_count"] = past.len().into();
  data["upcoming_shows_count"] = upcoming.len().into();
  data["past_shows"] = past.into();
  data["upcoming_shows"] = upcoming.into();
  data
}

/// `GET /venues/{id}`
pub async fn detail<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Page, Error>
where
  S: BookingStore + Clone + 'static,
{
  let id = parse_id(&id)?;
  let venue = state
    .store
    .get_venue(id)
    .await
    .map_err(Error::store)?
    .ok_or(Error::NotFound)?;
  let shows = state.store.venue_shows(id).await.map_err(Error::store)?;

  Ok(Page::new("pages/show_venue.html").with("venue", detail_view(&venue, shows))?)
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /venues/{id}`
///
/// A venue that still hosts shows is kept; the foreign key rejects the delete.
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Response
where
  S: BookingStore + Clone + 'static,
{
  let result = match parse_id(&id) {
    Ok(id) => state.store.delete_venue(id).await.map_err(Error::store),
    Err(e) => Err(e),
  };

  match result {
    Ok(()) => {
      tracing::info!(id = %id, "venue deleted");
      Redirect::to("/venues").into_response()
    }
    Err(e) => write_failed(
      "delete venue",
      &e,
      "An error occurred. Venue could not be deleted.",
    )
    .into_response(),
  }
}

// ─── Edit ─────────────────────────────────────────────────────────────────────

/// `GET /venues/{id}/edit`
pub async fn edit_form<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Page, Error>
where
  S: BookingStore + Clone + 'static,
{
  let id = parse_id(&id)?;
  let venue = state
    .store
    .get_venue(id)
    .await
    .map_err(Error::store)?
    .ok_or(Error::NotFound)?;

  Ok(
    Page::new("forms/edit_venue.html")
      .with("form", VenueForm::from(&venue))?
      .with("venue", venue.format())?,
  )
}

/// `POST /venues/{id}/edit`. Every editable field is replaced by the
/// submitted value; fields left out fall back to their defaults.
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
    .get_venue(id)
    .await
    .map_err(Error::store)?
    .ok_or(Error::NotFound)?;

  let result = match VenueForm::parse(&fields) {
    Ok(form) => state
      .store
      .update_venue(form.into_venue(id))
      .await
      .map_err(Error::store),
    Err(e) => Err(e.into()),
  };

  match result {
    Ok(venue) => {
      tracing::info!(id, name = %venue.name, "venue updated");
      Ok(Redirect::to(&format!("/venues/{id}")).into_response())
    }
    Err(e) => Ok(
      write_failed(
        "edit venue",
        &e,
        "An error occurred. Venue could not be updated.",
      )
      .into_response(),
    ),
  }
}
