use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One movie record as returned by the backend. The id is opaque,
/// server-assigned, and immutable; the controller only ever holds copies.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Movie {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub genre: String,
    pub release_date: NaiveDate,
    pub rating: f64,
}

/// Server-side sort order for page fetches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    None,
    Title,
    Rating,
}

impl SortKey {
    /// Wire value sent to the backend; the unsorted default is the empty
    /// string, matching the service contract.
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Title => "title",
            Self::Rating => "rating",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "" | "none" => Some(Self::None),
            "title" => Some(Self::Title),
            "rating" => Some(Self::Rating),
            _ => None,
        }
    }
}

/// Pagination bookkeeping. `total_pages` is authoritative only after the
/// first successful fetch; it defaults to 1 before any response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageState {
    pub current_page: u32,
    pub total_pages: u32,
    pub sort: SortKey,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            sort: SortKey::None,
        }
    }
}

/// Local, client-only filter constraints. Every field holds the raw user
/// input; an empty string means "no constraint from this field".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub query: String,
    pub genre: String,
    pub min_release_date: String,
    pub min_rating: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterField {
    Query,
    Genre,
    MinReleaseDate,
    MinRating,
}

impl FilterCriteria {
    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FilterField::Query => self.query = value,
            FilterField::Genre => self.genre = value,
            FilterField::MinReleaseDate => self.min_release_date = value,
            FilterField::MinRating => self.min_rating = value,
        }
    }

    /// Clears all four fields back to "no constraint".
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
            && self.genre.is_empty()
            && self.min_release_date.is_empty()
            && self.min_rating.is_empty()
    }
}

/// Raw form input for a create or update, exactly as typed. Validated into
/// [`MovieFields`] before any remote call is made.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MovieDraft {
    pub title: String,
    pub genre: String,
    pub release_date: String,
    pub rating: String,
}

/// Validated mutation payload, serialized as the wire body for create and
/// update calls.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MovieFields {
    pub title: String,
    pub genre: String,
    pub release_date: NaiveDate,
    pub rating: f64,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid release date '{value}', expected YYYY-MM-DD")]
    InvalidReleaseDate { value: String },

    #[error("invalid rating '{value}', expected a finite number")]
    InvalidRating { value: String },
}

impl MovieDraft {
    /// Local validation, performed before the network is touched. All fields
    /// are required and the rating must parse as a finite number.
    pub fn validate(&self) -> Result<MovieFields, DraftError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(DraftError::MissingField { field: "title" });
        }
        let genre = self.genre.trim();
        if genre.is_empty() {
            return Err(DraftError::MissingField { field: "genre" });
        }
        let raw_date = self.release_date.trim();
        if raw_date.is_empty() {
            return Err(DraftError::MissingField {
                field: "release_date",
            });
        }
        let release_date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|_| {
            DraftError::InvalidReleaseDate {
                value: raw_date.to_string(),
            }
        })?;
        let raw_rating = self.rating.trim();
        if raw_rating.is_empty() {
            return Err(DraftError::MissingField { field: "rating" });
        }
        let rating = raw_rating
            .parse::<f64>()
            .ok()
            .filter(|r| r.is_finite())
            .ok_or_else(|| DraftError::InvalidRating {
                value: raw_rating.to_string(),
            })?;
        Ok(MovieFields {
            title: title.to_string(),
            genre: genre.to_string(),
            release_date,
            rating,
        })
    }
}
