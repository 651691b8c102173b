//! Catalog descriptors and the payloads returned by catalog handlers.
//!
//! The constructors here do no validation: duplicate entries and malformed
//! ids are passed through exactly as supplied.

use serde::{Deserialize, Serialize};

use crate::media_type::MediaType;

/// A catalog advertised in the manifest.
///
/// Identity within a manifest is the `(media_type, id)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<Extra>,
}

impl Catalog {
    pub fn new(
        media_type: MediaType,
        id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            media_type,
            id: id.into(),
            name: name.into(),
            extra: Vec::new(),
        }
    }

    pub fn with_extra(mut self, extra: impl IntoIterator<Item = Extra>) -> Self {
        self.extra.extend(extra);
        self
    }
}

/// Extra query parameter a catalog accepts (search, genre, skip, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extra {
    pub name: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub options_limit: u32,
}

impl Extra {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_required: false,
            options: Vec::new(),
            options_limit: 0,
        }
    }

    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_options_limit(mut self, limit: u32) -> Self {
        self.options_limit = limit;
        self
    }
}

/// A single item in a catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
}

impl Meta {
    pub fn new(
        media_type: MediaType,
        name: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            media_type,
            id: id.into(),
            name: name.into(),
            poster: None,
            genres: Vec::new(),
        }
    }

    pub fn movie(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self::new(MediaType::Movie, name, id)
    }

    pub fn series(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self::new(MediaType::Series, name, id)
    }

    pub fn with_poster(mut self, poster: impl Into<String>) -> Self {
        self.poster = Some(poster.into());
        self
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }
}

/// Body of a `/catalog/{type}/{id}.json` response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub metas: Vec<Meta>,
}

impl CatalogResponse {
    pub fn new(metas: impl IntoIterator<Item = Meta>) -> Self {
        Self {
            metas: metas.into_iter().collect(),
        }
    }
}

impl FromIterator<Meta> for CatalogResponse {
    fn from_iter<T: IntoIterator<Item = Meta>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// Build a catalog response from movie entries.
pub fn movie_catalog(movies: impl IntoIterator<Item = Meta>) -> CatalogResponse {
    CatalogResponse::new(movies)
}

/// Build a catalog response from series entries.
pub fn series_catalog(series: impl IntoIterator<Item = Meta>) -> CatalogResponse {
    CatalogResponse::new(series)
}

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}
