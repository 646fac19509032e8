use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Maximum length for component names (security limit)
const MAX_COMPONENT_NAME_LENGTH: usize = 512;

/// Maximum length for component versions (security limit)
const MAX_VERSION_LENGTH: usize = 256;

/// Kind of software a component represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentType {
    Library,
    Application,
    OsPackage,
    ContainerImage,
}

impl ComponentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Library => "library",
            ComponentType::Application => "application",
            ComponentType::OsPackage => "os-package",
            ComponentType::ContainerImage => "container-image",
        }
    }

    /// Maps the type labels used by CycloneDX, SPDX purposes and Syft artifact types.
    ///
    /// Unrecognized labels are treated as libraries, which is what most SBOM
    /// generators emit for language packages.
    pub fn from_sbom_label(label: &str) -> Self {
        match label.to_ascii_lowercase().as_str() {
            "application" => ComponentType::Application,
            "operating-system" | "operating_system" | "os" | "deb" | "rpm" | "apk"
            | "alpm" | "portage" => ComponentType::OsPackage,
            "container" | "container-image" | "image" => ComponentType::ContainerImage,
            _ => ComponentType::Library,
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A component extracted from an SBOM.
///
/// Immutable once built: annotations produce a new value through
/// [`SoftwareComponent::with_property`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftwareComponent {
    name: String,
    #[serde(default)]
    version: String,
    component_type: ComponentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    origin_identifier: Option<String>,
    #[serde(default)]
    source_document: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    properties: BTreeMap<String, String>,
}

impl SoftwareComponent {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        component_type: ComponentType,
        source_document: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into().trim().to_string();
        let version = version.into().trim().to_string();

        if name.is_empty() {
            anyhow::bail!("Component name cannot be empty");
        }
        if name.len() > MAX_COMPONENT_NAME_LENGTH {
            anyhow::bail!(
                "Component name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_COMPONENT_NAME_LENGTH
            );
        }
        if version.len() > MAX_VERSION_LENGTH {
            anyhow::bail!(
                "Component version is too long ({} bytes). Maximum allowed: {} bytes",
                version.len(),
                MAX_VERSION_LENGTH
            );
        }

        Ok(Self {
            name,
            version,
            component_type,
            origin_identifier: None,
            source_document: source_document.into(),
            properties: BTreeMap::new(),
        })
    }

    pub fn with_origin(mut self, origin_identifier: impl Into<String>) -> Self {
        let origin = origin_identifier.into();
        self.origin_identifier = if origin.trim().is_empty() {
            None
        } else {
            Some(origin)
        };
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    pub fn origin_identifier(&self) -> Option<&str> {
        self.origin_identifier.as_deref()
    }

    pub fn source_document(&self) -> &str {
        &self.source_document
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Key used to join this component with runtime outcomes: `name@version#origin`.
    pub fn identity_key(&self) -> String {
        format!(
            "{}@{}#{}",
            self.name,
            self.version,
            self.origin_identifier.as_deref().unwrap_or("")
        )
    }

    /// Ecosystem qualifier: the package-URL type when present, otherwise the
    /// component type label.
    pub fn ecosystem(&self) -> String {
        self.origin_identifier
            .as_deref()
            .and_then(purl_type)
            .map(|t| t.to_ascii_lowercase())
            .unwrap_or_else(|| self.component_type.as_str().to_string())
    }
}

impl fmt::Display for SoftwareComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.version.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}@{}", self.name, self.version)
        }
    }
}

/// Extracts `type` from `pkg:type/namespace/name@version`.
pub(crate) fn purl_type(purl: &str) -> Option<&str> {
    let rest = purl.strip_prefix("pkg:")?;
    let end = rest.find('/')?;
    let ty = &rest[..end];
    if ty.is_empty() {
        None
    } else {
        Some(ty)
    }
}
