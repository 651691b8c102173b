use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::media_type::MediaType;

/// The fixed vocabulary of resources an addon can provide
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Catalog,
    Meta,
    Stream,
    Subtitles,
    AddonCatalog,
}

impl ResourceKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Catalog => "catalog",
            ResourceKind::Meta => "meta",
            ResourceKind::Stream => "stream",
            ResourceKind::Subtitles => "subtitles",
            ResourceKind::AddonCatalog => "addon_catalog",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "catalog" => Ok(ResourceKind::Catalog),
            "meta" => Ok(ResourceKind::Meta),
            "stream" => Ok(ResourceKind::Stream),
            "subtitles" => Ok(ResourceKind::Subtitles),
            "addon_catalog" => Ok(ResourceKind::AddonCatalog),
            other => Err(ModelError::UnknownResourceKind(other.to_string())),
        }
    }
}

/// Resource entry restricted to particular types or id prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub name: ResourceKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<MediaType>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub id_prefixes: Vec<String>,
}

impl ResourceDescriptor {
    pub fn new(name: ResourceKind) -> Self {
        Self {
            name,
            types: Vec::new(),
            id_prefixes: Vec::new(),
        }
    }

    pub fn with_types(mut self, types: impl IntoIterator<Item = MediaType>) -> Self {
        self.types = types.into_iter().collect();
        self
    }

    pub fn with_id_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.id_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }
}

/// A manifest `resources` entry.
///
/// The protocol accepts either the bare resource name or a full object;
/// both shapes round-trip through serde unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resource {
    Short(ResourceKind),
    Full(ResourceDescriptor),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Short(kind) => *kind,
            Resource::Full(descriptor) => descriptor.name,
        }
    }
}

impl From<ResourceKind> for Resource {
    fn from(kind: ResourceKind) -> Self {
        Resource::Short(kind)
    }
}

impl From<ResourceDescriptor> for Resource {
    fn from(descriptor: ResourceDescriptor) -> Self {
        Resource::Full(descriptor)
    }
}
