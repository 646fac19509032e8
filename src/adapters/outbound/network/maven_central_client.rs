use crate::compatibility::domain::SoftwareComponent;
use crate::ports::outbound::{EvidenceError, PackageLookup};
use crate::shared::security::validate_url_component;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const MAVEN_CENTRAL_SEARCH_URL: &str = "https://search.maven.org/solrsearch/select";

/// Rows requested per search; one row per published file variant
const SEARCH_ROWS: u32 = 100;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    response: SearchResult,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    /// Classifier of a single published file
    #[serde(default)]
    c: Option<String>,
    /// Published file suffixes, e.g. `-linux-aarch_64.jar`
    #[serde(default)]
    ec: Vec<String>,
}

/// Maven coordinates of a component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenCoordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl MavenCoordinates {
    /// Reads coordinates from a `pkg:maven/...` origin, a `group:artifact`
    /// name or a `group` property, in that order.
    pub fn from_component(component: &SoftwareComponent) -> Option<Self> {
        let version = component.version().to_string();
        if version.is_empty() {
            return None;
        }

        if let Some(purl) = component.origin_identifier() {
            if let Some(path) = purl.strip_prefix("pkg:maven/") {
                let path = path.split(['@', '?', '#']).next().unwrap_or(path);
                if let Some((group_id, artifact_id)) = path.split_once('/') {
                    return Some(Self {
                        group_id: group_id.to_string(),
                        artifact_id: artifact_id.to_string(),
                        version,
                    });
                }
            }
        }

        if let Some((group_id, artifact_id)) = component.name().split_once(':') {
            return Some(Self {
                group_id: group_id.to_string(),
                artifact_id: artifact_id.to_string(),
                version,
            });
        }

        component.property("group").map(|group_id| Self {
            group_id: group_id.to_string(),
            artifact_id: component.name().to_string(),
            version,
        })
    }
}

/// MavenCentralClient adapter listing the classifiers published for a release
///
/// Implements the PackageLookup port against the Maven Central search API.
/// HTTP failures are mapped onto evidence error kinds: 429 is throttled,
/// 5xx and connection problems are transient, everything else is permanent.
/// Components without Maven coordinates fail validation and are skipped.
pub struct MavenCentralClient {
    client: reqwest::Client,
    base_url: String,
}

impl MavenCentralClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(MAVEN_CENTRAL_SEARCH_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn search_url(&self, coordinates: &MavenCoordinates) -> String {
        let query = format!(
            "g:\"{}\" AND a:\"{}\" AND v:\"{}\"",
            coordinates.group_id, coordinates.artifact_id, coordinates.version
        );
        format!(
            "{}?q={}&core=gav&rows={}&wt=json",
            self.base_url,
            urlencoding::encode(&query),
            SEARCH_ROWS
        )
    }

    fn validate(coordinates: &MavenCoordinates) -> std::result::Result<(), EvidenceError> {
        for (value, what) in [
            (&coordinates.group_id, "Group id"),
            (&coordinates.artifact_id, "Artifact id"),
            (&coordinates.version, "Version"),
        ] {
            validate_url_component(value, what)
                .map_err(|e| EvidenceError::validation(e.to_string()))?;
            if value.contains('"') {
                return Err(EvidenceError::validation(format!(
                    "{} contains a quote",
                    what
                )));
            }
        }
        Ok(())
    }
}

fn classify_status(status: StatusCode) -> EvidenceError {
    let message = format!("Maven Central returned status code {}", status);
    if status == StatusCode::TOO_MANY_REQUESTS {
        EvidenceError::throttled(message)
    } else if status.is_server_error() {
        EvidenceError::transient(message)
    } else {
        EvidenceError::permanent(message)
    }
}

fn classify_request_error(error: reqwest::Error) -> EvidenceError {
    if error.is_timeout() || error.is_connect() || error.is_request() {
        EvidenceError::transient(error.to_string())
    } else {
        EvidenceError::permanent(error.to_string())
    }
}

/// Classifiers named by a search document: `c`, plus whatever sits between
/// the leading `-` and the extension in each `ec` suffix.
fn doc_classifiers(doc: SearchDoc) -> Vec<String> {
    let from_suffixes = doc.ec.into_iter().filter_map(|suffix| {
        let trimmed = suffix.strip_prefix('-')?;
        let classifier = trimmed.rsplit_once('.').map_or(trimmed, |(c, _)| c);
        (!classifier.is_empty()).then(|| classifier.to_string())
    });
    doc.c
        .filter(|c| !c.is_empty())
        .into_iter()
        .chain(from_suffixes)
        .collect()
}

#[async_trait]
impl PackageLookup for MavenCentralClient {
    async fn published_classifiers(
        &self,
        component: &SoftwareComponent,
    ) -> std::result::Result<Vec<String>, EvidenceError> {
        let coordinates = MavenCoordinates::from_component(component).ok_or_else(|| {
            EvidenceError::validation(format!("{} has no Maven coordinates", component))
        })?;
        Self::validate(&coordinates)?;

        let url = self.search_url(&coordinates);
        debug!(component = %component, "Querying Maven Central");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(classify_request_error)?;
        if !response.status().is_success() {
            return Err(classify_status(response.status()));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| EvidenceError::permanent(format!("Unexpected Maven Central response: {}", e)))?;

        let mut classifiers: Vec<String> = body
            .response
            .docs
            .into_iter()
            .flat_map(doc_classifiers)
            .collect();
        classifiers.sort();
        classifiers.dedup();
        Ok(classifiers)
    }
}
