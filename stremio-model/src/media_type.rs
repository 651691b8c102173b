use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Content types understood by Stremio clients
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    /// Feature films
    Movie,
    /// Episodic shows
    Series,
    /// Video channels (e.g. YouTube-style uploads)
    Channel,
    /// Live television
    Tv,
}

impl MediaType {
    /// Wire representation, as used in manifest `types` and route paths
    pub const fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "series",
            MediaType::Channel => "channel",
            MediaType::Tv => "tv",
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "movie" => Ok(MediaType::Movie),
            "series" => Ok(MediaType::Series),
            "channel" => Ok(MediaType::Channel),
            "tv" => Ok(MediaType::Tv),
            other => Err(ModelError::UnknownMediaType(other.to_string())),
        }
    }
}
