use anyhow::Result;
use movieverse_models::Movie;
use tracing::{debug, warn};

use crate::local::{keys, LocalStore};

/// The locally owned watchlist: a set of movies keyed by
/// (source, external_id), insertion order preserved for display.
#[derive(Debug, Clone)]
pub struct Watchlist {
    store: LocalStore,
}

impl Watchlist {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    pub fn items(&self) -> Vec<Movie> {
        self.store
            .get(keys::WATCHLIST)
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    /// Append a movie and persist. Movies without a valid identifying
    /// pair are refused silently (logged, storage untouched), as are
    /// duplicates.
    pub fn add(&self, movie: &Movie) -> Result<()> {
        if !movie.has_valid_key() {
            warn!(
                source = %movie.source,
                external_id = %movie.external_id,
                "cannot add movie to watchlist, invalid identifying data"
            );
            return Ok(());
        }
        let mut items = self.items();
        if items
            .iter()
            .any(|m| m.source == movie.source && m.external_id == movie.external_id)
        {
            debug!(key = %movie.key(), "movie already on watchlist");
            return Ok(());
        }
        items.push(movie.clone());
        self.store.set(keys::WATCHLIST, &items)
    }

    /// Remove every entry matching the compound key and persist.
    pub fn remove(&self, source: &str, external_id: &str) -> Result<()> {
        let mut items = self.items();
        items.retain(|m| !(m.source == source && m.external_id == external_id));
        self.store.set(keys::WATCHLIST, &items)
    }

    pub fn contains(&self, source: &str, external_id: &str) -> bool {
        self.items()
            .iter()
            .any(|m| m.source == source && m.external_id == external_id)
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watchlist() -> (tempfile::TempDir, Watchlist, LocalStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("store")).unwrap();
        (dir, Watchlist::new(store.clone()), store)
    }

    fn movie(source: &str, external_id: &str) -> Movie {
        let mut movie = Movie::from_key(source, external_id);
        movie.title = Some(format!("Movie {}", external_id));
        movie
    }

    #[test]
    fn test_add_invalid_movie_leaves_storage_unchanged() {
        let (_dir, watchlist, store) = watchlist();
        watchlist.add(&movie("tmdb", "603")).unwrap();
        let before = store.raw(keys::WATCHLIST).unwrap();

        watchlist.add(&Movie::from_key("", "604")).unwrap();
        watchlist.add(&Movie::from_key("tmdb", "")).unwrap();
        watchlist.add(&Movie::from_key("tmdb", "undefined")).unwrap();

        assert_eq!(store.raw(keys::WATCHLIST).unwrap(), before);
        assert_eq!(watchlist.len(), 1);
    }

    #[test]
    fn test_add_remove_round_trip_restores_prior_state() {
        let (_dir, watchlist, store) = watchlist();
        watchlist.add(&movie("tmdb", "603")).unwrap();
        let before = store.raw(keys::WATCHLIST).unwrap();

        watchlist.add(&movie("imdb", "tt0133093")).unwrap();
        assert!(watchlist.contains("imdb", "tt0133093"));

        watchlist.remove("imdb", "tt0133093").unwrap();
        assert!(!watchlist.contains("imdb", "tt0133093"));
        assert_eq!(store.raw(keys::WATCHLIST).unwrap(), before);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let (_dir, watchlist, _store) = watchlist();
        watchlist.add(&movie("tmdb", "1")).unwrap();
        watchlist.add(&movie("tmdb", "2")).unwrap();
        watchlist.add(&movie("tmdb", "3")).unwrap();
        let ids: Vec<String> = watchlist.items().into_iter().map(|m| m.external_id).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_duplicate_add_is_ignored() {
        let (_dir, watchlist, _store) = watchlist();
        watchlist.add(&movie("tmdb", "603")).unwrap();
        watchlist.add(&movie("tmdb", "603")).unwrap();
        assert_eq!(watchlist.len(), 1);
    }

    #[test]
    fn test_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store");
        {
            let watchlist = Watchlist::new(LocalStore::open(&path).unwrap());
            watchlist.add(&movie("tmdb", "603")).unwrap();
        }
        let watchlist = Watchlist::new(LocalStore::open(&path).unwrap());
        assert!(watchlist.contains("tmdb", "603"));
    }
}
