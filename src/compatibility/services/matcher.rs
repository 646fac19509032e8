use crate::compatibility::domain::{CompatibilityRecord, SoftwareComponent};
use crate::compatibility::services::knowledge_base::{qualify, KnowledgeBaseStore};
use std::fmt;
use tracing::debug;

/// Which lookup step produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    Exact,
    Alias,
    Composite,
    Fuzzy,
}

impl fmt::Display for MatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchStrategy::Exact => "exact",
            MatchStrategy::Alias => "alias",
            MatchStrategy::Composite => "composite",
            MatchStrategy::Fuzzy => "fuzzy",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    pub record: &'a CompatibilityRecord,
    pub strategy: MatchStrategy,
}

/// Matcher - resolves a component to at most one knowledge-base record
///
/// Lookup order, first hit wins:
/// 1. canonical name, case-insensitive
/// 2. alias, case-insensitive
/// 3. composite `ecosystem:name` key (ecosystem from the package URL, then
///    the component type label)
/// 4. fuzzy: the normalized name against normalized canonical names and
///    aliases, unqualified first
#[derive(Debug, Clone)]
pub struct Matcher {
    fuzzy: bool,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Matcher {
    pub fn new(fuzzy: bool) -> Self {
        Self { fuzzy }
    }

    pub fn resolve<'a>(
        &self,
        component: &SoftwareComponent,
        store: &'a KnowledgeBaseStore,
    ) -> Option<Match<'a>> {
        let found = self.lookup(component, store);
        match &found {
            Some(m) => debug!(
                component = %component,
                record = %m.record.canonical_name,
                strategy = %m.strategy,
                "Matched knowledge base record"
            ),
            None => debug!(component = %component, "No knowledge base record"),
        }
        found
    }

    fn lookup<'a>(
        &self,
        component: &SoftwareComponent,
        store: &'a KnowledgeBaseStore,
    ) -> Option<Match<'a>> {
        let key = component.name().to_lowercase();

        if let Some(record) = store.get(&key) {
            return Some(Match {
                record,
                strategy: MatchStrategy::Exact,
            });
        }

        if let Some(record) = store.get_by_alias(&key) {
            return Some(Match {
                record,
                strategy: MatchStrategy::Alias,
            });
        }

        let qualifiers = Self::qualifiers(component);
        for qualifier in &qualifiers {
            let composite = qualify(Some(qualifier), &key);
            if let Some(record) = store
                .get(&composite)
                .or_else(|| store.get_by_alias(&composite))
            {
                return Some(Match {
                    record,
                    strategy: MatchStrategy::Composite,
                });
            }
        }

        if !self.fuzzy {
            return None;
        }

        let normalized = store.normalizer().normalize(component.name());
        std::iter::once(normalized.clone())
            .chain(
                qualifiers
                    .iter()
                    .map(|q| qualify(Some(q), &normalized)),
            )
            .find_map(|candidate| store.get_by_normalized(&candidate))
            .map(|record| Match {
                record,
                strategy: MatchStrategy::Fuzzy,
            })
    }

    fn qualifiers(component: &SoftwareComponent) -> Vec<String> {
        let ecosystem = component.ecosystem();
        let type_label = component.component_type().as_str().to_string();
        if ecosystem == type_label {
            vec![ecosystem]
        } else {
            vec![ecosystem, type_label]
        }
    }
}
