//! Handlers for `/shows` pages.

use axum::{Form, extract::State};
use chrono::Utc;
use gigbook_core::{show::ShowListing, store::BookingStore};

use super::write_failed;
use crate::{
  AppState,
  error::Error,
  form::{FormFields, ShowForm},
  page::{Flash, Page},
};

/// `GET /shows`: only shows strictly after the time of the request.
pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Page, Error>
where
  S: BookingStore + Clone + 'static,
{
  let now = Utc::now();
  let shows: Vec<_> = state
    .store
    .list_show_listings()
    .await
    .map_err(Error::store)?
    .iter()
    .filter(|l| l.is_upcoming(now))
    .map(ShowListing::for_listing)
    .collect();

  Ok(Page::new("pages/shows.html").with("shows", shows)?)
}

/// `GET /shows/create`
pub async fn create_form() -> Result<Page, Error> {
  Ok(Page::new("forms/new_show.html").with("form", ShowForm::blank(Utc::now()))?)
}

/// `POST /shows/create`. The venue and artist must already exist.
pub async fn create_submit<S>(
  State(state): State<AppState<S>>,
  Form(fields): Form<FormFields>,
) -> Page
where
  S: BookingStore + Clone + 'static,
{
  let result = match ShowForm::parse(&fields) {
    Ok(input) => state.store.add_show(input).await.map_err(Error::store),
    Err(e) => Err(e.into()),
  };

  match result {
    Ok(show) => {
      tracing::info!(
        id = show.id,
        venue_id = show.venue_id,
        artist_id = show.artist_id,
        "show listed"
      );
      Page::home().flash(Flash::success("Show was successfully listed!"))
    }
    Err(e) => write_failed(
      "create show",
      &e,
      "An error occurred. Show could not be listed.",
    ),
  }
}
