use movieverse_models::Movie;
use std::cmp::Reverse;
use std::collections::HashMap;

const MAX_RECOMMENDATIONS: usize = 5;

/// Up to five trending movies sharing the watchlist's most frequent
/// genre id. Ties break toward the genre seen first; an empty watchlist
/// (or one with no genre ids) yields no recommendations.
pub fn recommendations(watchlist: &[Movie], trending: &[Movie]) -> Vec<Movie> {
    let mut counts: HashMap<u32, usize> = HashMap::new();
    let mut first_seen: HashMap<u32, usize> = HashMap::new();
    for (index, genre) in watchlist
        .iter()
        .flat_map(|movie| movie.genre_ids.iter().copied())
        .enumerate()
    {
        *counts.entry(genre).or_insert(0) += 1;
        first_seen.entry(genre).or_insert(index);
    }

    let Some(top_genre) = counts
        .iter()
        .map(|(genre, count)| (*genre, *count))
        .max_by_key(|(genre, count)| (*count, Reverse(first_seen[genre])))
        .map(|(genre, _)| genre)
    else {
        return Vec::new();
    };

    trending
        .iter()
        .filter(|movie| movie.genre_ids.contains(&top_genre))
        .take(MAX_RECOMMENDATIONS)
        .cloned()
        .collect()
}
