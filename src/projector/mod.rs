use chrono::NaiveDate;

use crate::model::{FilterCriteria, Movie};

/// Derives the visible subsequence of `records` under `criteria`. Pure and
/// total: active constraints combine with AND, order is preserved, and
/// malformed numeric or date inputs count as "no constraint" rather than
/// erroring.
pub fn project(records: &[Movie], criteria: &FilterCriteria) -> Vec<Movie> {
    let query = criteria.query.to_lowercase();
    let min_date = parse_date(&criteria.min_release_date);
    let min_rating = parse_rating(&criteria.min_rating);

    records
        .iter()
        .filter(|movie| {
            if !query.is_empty()
                && !movie.title.to_lowercase().contains(&query)
                && !movie.genre.to_lowercase().contains(&query)
            {
                return false;
            }
            if !criteria.genre.is_empty() && movie.genre != criteria.genre {
                return false;
            }
            if let Some(min) = min_date {
                if movie.release_date < min {
                    return false;
                }
            }
            if let Some(min) = min_rating {
                if movie.rating < min {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}

/// Distinct genres of the record set in first-seen order, for populating a
/// genre selector.
pub fn genre_options(records: &[Movie]) -> Vec<String> {
    let mut genres: Vec<String> = Vec::new();
    for movie in records {
        if !genres.iter().any(|g| g == &movie.genre) {
            genres.push(movie.genre.clone());
        }
    }
    genres
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

fn parse_rating(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
