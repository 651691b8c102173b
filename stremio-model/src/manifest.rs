//! The addon manifest and its builder.
//!
//! `types` and `resources` behave as insertion-ordered sets: use
//! [`Manifest::declare_type`] and [`Manifest::declare_resource`] to add to
//! them. `catalogs` is append-only and may hold several catalogs of the same
//! type.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::media_type::MediaType;
use crate::resource::{Resource, ResourceKind};

pub const DEFAULT_ID: &str = "org.stremio.example";
pub const DEFAULT_NAME: &str = "Example Addon";
pub const DEFAULT_DESCRIPTION: &str = "An example Stremio addon";
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Self-description served at `/manifest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: String,
    pub name: String,
    pub description: String,
    pub version: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub types: Vec<MediaType>,
    #[serde(default)]
    pub catalogs: Vec<Catalog>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub id_prefixes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addon_catalogs: Vec<Catalog>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub config: Vec<ConfigOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "BehaviorHints::is_empty")]
    pub behavior_hints: BehaviorHints,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            id: DEFAULT_ID.to_string(),
            name: DEFAULT_NAME.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            version: DEFAULT_VERSION.to_string(),
            resources: Vec::new(),
            types: Vec::new(),
            catalogs: Vec::new(),
            id_prefixes: Vec::new(),
            addon_catalogs: Vec::new(),
            config: Vec::new(),
            background: None,
            logo: None,
            contact_email: None,
            behavior_hints: BehaviorHints::default(),
        }
    }
}

impl Manifest {
    pub fn builder() -> ManifestBuilder {
        ManifestBuilder::default()
    }

    pub fn has_type(&self, media_type: MediaType) -> bool {
        self.types.contains(&media_type)
    }

    pub fn has_resource(&self, kind: ResourceKind) -> bool {
        self.resources.iter().any(|resource| resource.kind() == kind)
    }

    /// Add `media_type` to `types` unless already present.
    ///
    /// Returns `true` when the type was newly declared.
    pub fn declare_type(&mut self, media_type: MediaType) -> bool {
        if self.has_type(media_type) {
            return false;
        }
        self.types.push(media_type);
        true
    }

    /// Add a bare resource entry unless a resource of that kind exists.
    ///
    /// Returns `true` when the resource was newly declared.
    pub fn declare_resource(&mut self, kind: ResourceKind) -> bool {
        if self.has_resource(kind) {
            return false;
        }
        self.resources.push(Resource::Short(kind));
        true
    }

    pub fn push_catalog(&mut self, catalog: Catalog) {
        self.catalogs.push(catalog);
    }

    pub fn find_catalog(&self, media_type: MediaType, id: &str) -> Option<&Catalog> {
        self.catalogs
            .iter()
            .find(|catalog| catalog.media_type == media_type && catalog.id == id)
    }

    /// Catalogs of one type, in registration order.
    pub fn catalogs_of(&self, media_type: MediaType) -> Vec<Catalog> {
        self.catalogs
            .iter()
            .filter(|catalog| catalog.media_type == media_type)
            .cloned()
            .collect()
    }
}

/// Flags signalling special handling to the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorHints {
    #[serde(default, skip_serializing_if = "is_false")]
    pub adult: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub p2p: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub configurable: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub configuration_required: bool,
}

impl BehaviorHints {
    pub fn is_empty(&self) -> bool {
        !(self.adult || self.p2p || self.configurable || self.configuration_required)
    }
}

/// Input widget kinds for user configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFieldKind {
    Text,
    Number,
    Password,
    Checkbox,
    Select,
}

/// One entry of the manifest `config` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigOption {
    pub key: String,
    #[serde(rename = "type")]
    pub kind: ConfigFieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
}

impl ConfigOption {
    pub fn new(key: impl Into<String>, kind: ConfigFieldKind) -> Self {
        Self {
            key: key.into(),
            kind,
            default: None,
            title: None,
            options: Vec::new(),
            required: false,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
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

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Builder starting from [`Manifest::default`].
///
/// Each call overwrites the field it touches, so later calls win. Nothing is
/// validated; empty identity fields are accepted as given.
#[derive(Debug, Clone, Default)]
pub struct ManifestBuilder {
    manifest: Manifest,
}

impl ManifestBuilder {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.manifest.id = id.into();
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.manifest.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.manifest.description = description.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.manifest.version = version.into();
        self
    }

    pub fn with_resources<I, R>(mut self, resources: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Resource>,
    {
        self.manifest.resources = resources.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.manifest.background = Some(background.into());
        self
    }

    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.manifest.logo = Some(logo.into());
        self
    }

    pub fn with_contact_email(mut self, email: impl Into<String>) -> Self {
        self.manifest.contact_email = Some(email.into());
        self
    }

    pub fn with_behavior_hints(mut self, hints: BehaviorHints) -> Self {
        self.manifest.behavior_hints = hints;
        self
    }

    pub fn with_id_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.manifest.id_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_config(mut self, config: impl IntoIterator<Item = ConfigOption>) -> Self {
        self.manifest.config = config.into_iter().collect();
        self
    }

    pub fn with_addon_catalogs(
        mut self,
        catalogs: impl IntoIterator<Item = Catalog>,
    ) -> Self {
        self.manifest.addon_catalogs = catalogs.into_iter().collect();
        self
    }

    pub fn adult(mut self) -> Self {
        self.manifest.behavior_hints.adult = true;
        self
    }

    pub fn p2p(mut self) -> Self {
        self.manifest.behavior_hints.p2p = true;
        self
    }

    pub fn configurable(mut self) -> Self {
        self.manifest.behavior_hints.configurable = true;
        self
    }

    pub fn requires_configuration(mut self) -> Self {
        self.manifest.behavior_hints.configuration_required = true;
        self
    }

    pub fn build(self) -> Manifest {
        self.manifest
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
