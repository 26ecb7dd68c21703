//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{Duration, Utc};
use gigbook_core::{
  ErrorKind, StoreError as _,
  artist::NewArtist,
  show::{NewShow, partition_shows, upcoming_counts},
  store::BookingStore,
  venue::NewVenue,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn fillmore() -> NewVenue {
  NewVenue {
    name: "The Fillmore".into(),
    genres: vec!["Rock".into(), "Jazz".into()],
    address: "1805 Geary".into(),
    city: "SF".into(),
    state: "CA".into(),
    phone: "415-555-0100".into(),
    facebook_link: "http://fb.com/fillmore".into(),
    ..NewVenue::default()
  }
}

fn venue_named(name: &str, city: &str, state: &str) -> NewVenue {
  NewVenue {
    name: name.into(),
    city: city.into(),
    state: state.into(),
    ..fillmore()
  }
}

fn artist_named(name: &str) -> NewArtist {
  NewArtist {
    name: name.into(),
    genres: vec!["Rock n Roll".into()],
    city: "San Francisco".into(),
    state: "CA".into(),
    phone: "326-123-5000".into(),
    facebook_link: "https://www.facebook.com/GunsNPetals".into(),
    image_link: Some("https://img.example/gnp.png".into()),
    ..NewArtist::default()
  }
}

// ─── Venues ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_venue() {
  let s = store().await;

  let venue = s.add_venue(fillmore()).await.unwrap();
  let fetched = s.get_venue(venue.id).await.unwrap().unwrap();

  assert_eq!(fetched, venue);
  assert_eq!(fetched.genres, ["Rock", "Jazz"]);
  assert!(!fetched.seeking_talent);
  assert_eq!(fetched.seeking_description, "");
  assert_eq!(fetched.website, None);
}

#[tokio::test]
async fn get_venue_missing_returns_none() {
  let s = store().await;
  assert!(s.get_venue(42).await.unwrap().is_none());
}

#[tokio::test]
async fn venue_ids_are_distinct() {
  let s = store().await;
  let a = s.add_venue(fillmore()).await.unwrap();
  let b = s.add_venue(fillmore()).await.unwrap();
  assert_ne!(a.id, b.id);
}

#[tokio::test]
async fn list_venues_orders_by_location_then_name() {
  let s = store().await;
  s.add_venue(venue_named("Park Square", "New York", "NY")).await.unwrap();
  s.add_venue(venue_named("The Dueling Pianos", "New York", "NY")).await.unwrap();
  s.add_venue(venue_named("Musical Hop", "San Francisco", "CA")).await.unwrap();

  let names: Vec<_> = s
    .list_venues()
    .await
    .unwrap()
    .into_iter()
    .map(|v| v.name)
    .collect();
  assert_eq!(names, ["Musical Hop", "Park Square", "The Dueling Pianos"]);
}

#[tokio::test]
async fn search_venues_is_case_insensitive_substring() {
  let s = store().await;
  s.add_venue(venue_named("Smart Club", "SF", "CA")).await.unwrap();
  s.add_venue(venue_named("Musical Hop", "SF", "CA")).await.unwrap();

  let hits = s.search_venues("art").await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].name, "Smart Club");

  let hits = s.search_venues("HOP").await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].name, "Musical Hop");
}

#[tokio::test]
async fn search_folds_non_ascii_case() {
  let s = store().await;
  s.add_venue(venue_named("Café Órbita", "SF", "CA")).await.unwrap();
  s.add_venue(venue_named("Orbit Room", "SF", "CA")).await.unwrap();

  for term in ["órbita", "ÓRBITA", "CAFÉ ó"] {
    let hits = s.search_venues(term).await.unwrap();
    assert_eq!(hits.len(), 1, "{term}");
    assert_eq!(hits[0].name, "Café Órbita");
  }

  s.add_artist(artist_named("Ölfusá Ensemble")).await.unwrap();
  assert_eq!(s.search_artists("ölfus").await.unwrap().len(), 1);
  assert_eq!(s.search_artists("ÖLFUSÁ").await.unwrap().len(), 1);
}

#[tokio::test]
async fn search_treats_wildcards_literally() {
  let s = store().await;
  s.add_venue(venue_named("100% Club", "SF", "CA")).await.unwrap();
  s.add_venue(venue_named("1000 Club", "SF", "CA")).await.unwrap();

  let hits = s.search_venues("0%").await.unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].name, "100% Club");
}

#[tokio::test]
async fn empty_search_matches_everything() {
  let s = store().await;
  s.add_venue(venue_named("A", "SF", "CA")).await.unwrap();
  s.add_venue(venue_named("B", "SF", "CA")).await.unwrap();
  assert_eq!(s.search_venues("").await.unwrap().len(), 2);
}

#[tokio::test]
async fn update_venue_replaces_fields() {
  let s = store().await;
  let mut venue = s.add_venue(fillmore()).await.unwrap();

  venue.name = "The New Fillmore".into();
  venue.genres = vec!["Soul".into()];
  venue.seeking_talent = true;
  venue.seeking_description = "Looking for openers".into();
  venue.website = Some("https://fillmore.example".into());
  s.update_venue(venue.clone()).await.unwrap();

  let fetched = s.get_venue(venue.id).await.unwrap().unwrap();
  assert_eq!(fetched, venue);
}

#[tokio::test]
async fn update_missing_venue_is_not_found() {
  let s = store().await;
  let mut venue = s.add_venue(fillmore()).await.unwrap();
  venue.id += 100;

  let err = s.update_venue(venue).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn delete_venue_removes_it_from_list_and_search() {
  let s = store().await;
  let venue = s.add_venue(fillmore()).await.unwrap();

  s.delete_venue(venue.id).await.unwrap();

  assert!(s.get_venue(venue.id).await.unwrap().is_none());
  assert!(s.list_venues().await.unwrap().is_empty());
  assert!(s.search_venues("Fillmore").await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_missing_venue_is_not_found() {
  let s = store().await;
  let err = s.delete_venue(9).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
}

// ─── Artists ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_get_and_list_artists_by_name() {
  let s = store().await;
  let b = s.add_artist(artist_named("The Wild Sax Band")).await.unwrap();
  s.add_artist(artist_named("Guns N Petals")).await.unwrap();
  s.add_artist(artist_named("Matt Quevedo")).await.unwrap();

  let fetched = s.get_artist(b.id).await.unwrap().unwrap();
  assert_eq!(fetched, b);

  let names: Vec<_> = s
    .list_artists()
    .await
    .unwrap()
    .into_iter()
    .map(|a| a.name)
    .collect();
  assert_eq!(names, ["Guns N Petals", "Matt Quevedo", "The Wild Sax Band"]);
}

#[tokio::test]
async fn search_and_delete_artist() {
  let s = store().await;
  let a = s.add_artist(artist_named("Guns N Petals")).await.unwrap();

  assert_eq!(s.search_artists("petal").await.unwrap().len(), 1);
  s.delete_artist(a.id).await.unwrap();
  assert!(s.search_artists("petal").await.unwrap().is_empty());
}

#[tokio::test]
async fn update_artist_round_trips() {
  let s = store().await;
  let mut a = s.add_artist(artist_named("Guns N Petals")).await.unwrap();
  a.seeking_venue = true;
  a.image_link = None;
  s.update_artist(a.clone()).await.unwrap();
  assert_eq!(s.get_artist(a.id).await.unwrap().unwrap(), a);
}

// ─── Shows ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn show_requires_existing_venue_and_artist() {
  let s = store().await;
  let venue = s.add_venue(fillmore()).await.unwrap();
  let artist = s.add_artist(artist_named("Guns N Petals")).await.unwrap();

  let bad_venue = s
    .add_show(NewShow { venue_id: venue.id + 1, artist_id: artist.id, date: Utc::now() })
    .await
    .unwrap_err();
  assert_eq!(bad_venue.kind(), ErrorKind::Constraint);

  let bad_artist = s
    .add_show(NewShow { venue_id: venue.id, artist_id: artist.id + 1, date: Utc::now() })
    .await
    .unwrap_err();
  assert_eq!(bad_artist.kind(), ErrorKind::Constraint);

  assert!(s.list_shows().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_venue_with_shows_is_rejected() {
  let s = store().await;
  let venue = s.add_venue(fillmore()).await.unwrap();
  let artist = s.add_artist(artist_named("Guns N Petals")).await.unwrap();
  s.add_show(NewShow { venue_id: venue.id, artist_id: artist.id, date: Utc::now() })
    .await
    .unwrap();

  let err = s.delete_venue(venue.id).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Constraint);
  let err = s.delete_artist(artist.id).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::Constraint);

  // Nothing was removed by the failed deletes.
  assert!(s.get_venue(venue.id).await.unwrap().is_some());
  assert_eq!(s.list_shows().await.unwrap().len(), 1);
}

#[tokio::test]
async fn show_update_get_and_delete() {
  let s = store().await;
  let venue = s.add_venue(fillmore()).await.unwrap();
  let artist = s.add_artist(artist_named("Guns N Petals")).await.unwrap();
  let mut show = s
    .add_show(NewShow { venue_id: venue.id, artist_id: artist.id, date: Utc::now() })
    .await
    .unwrap();

  show.date += Duration::days(7);
  s.update_show(show.clone()).await.unwrap();
  let fetched = s.get_show(show.id).await.unwrap().unwrap();
  assert_eq!(fetched.date.timestamp_micros(), show.date.timestamp_micros());

  s.delete_show(show.id).await.unwrap();
  assert!(s.get_show(show.id).await.unwrap().is_none());
  let err = s.delete_show(show.id).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn venue_shows_partition_past_and_upcoming() {
  let s = store().await;
  let venue = s.add_venue(fillmore()).await.unwrap();
  let other = s.add_venue(venue_named("Park Square", "NY", "NY")).await.unwrap();
  let artist = s.add_artist(artist_named("Guns N Petals")).await.unwrap();
  let now = Utc::now();

  for offset in [-30, -1, 2, 10, 40] {
    s.add_show(NewShow {
      venue_id:  venue.id,
      artist_id: artist.id,
      date:      now + Duration::days(offset),
    })
    .await
    .unwrap();
  }
  s.add_show(NewShow { venue_id: other.id, artist_id: artist.id, date: now + Duration::days(5) })
    .await
    .unwrap();

  let listings = s.venue_shows(venue.id).await.unwrap();
  assert_eq!(listings.len(), 5);
  assert!(listings.iter().all(|l| l.artist_name == "Guns N Petals"));
  assert!(listings.windows(2).all(|w| w[0].show.date <= w[1].show.date));

  let split = partition_shows(listings, now);
  assert_eq!(split.upcoming.len(), 3);
  assert_eq!(split.past.len(), 2);

  let artist_listings = s.artist_shows(artist.id).await.unwrap();
  assert_eq!(artist_listings.len(), 6);

  let all = s.list_shows().await.unwrap();
  let counts = upcoming_counts(&all, now, |sh| sh.venue_id);
  assert_eq!(counts[&venue.id], 3);
  assert_eq!(counts[&other.id], 1);
}

#[tokio::test]
async fn show_listings_join_names_and_images() {
  let s = store().await;
  let venue = s.add_venue(fillmore()).await.unwrap();
  let artist = s.add_artist(artist_named("Guns N Petals")).await.unwrap();
  s.add_show(NewShow { venue_id: venue.id, artist_id: artist.id, date: Utc::now() })
    .await
    .unwrap();

  let listings = s.list_show_listings().await.unwrap();
  assert_eq!(listings.len(), 1);
  assert_eq!(listings[0].venue_name, "The Fillmore");
  assert_eq!(listings[0].venue_image_link, None);
  assert_eq!(listings[0].artist_name, "Guns N Petals");
  assert_eq!(
    listings[0].artist_image_link.as_deref(),
    Some("https://img.example/gnp.png")
  );
}
