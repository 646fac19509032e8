mod classifier;
mod deny_list;
mod knowledge_base;
mod matcher;
mod name_normalizer;
mod native_code_scanner;
mod result_merger;
mod version_comparator;

pub use classifier::CompatibilityClassifier;
pub use deny_list::{DenyListDocument, DenyListOverlay};
pub use knowledge_base::{
    KnowledgeBaseDocument, KnowledgeBaseEntry, KnowledgeBaseStore, LoadReport,
    BUILTIN_KNOWLEDGE_BASE_LABEL,
};
pub use matcher::{Match, MatchStrategy, Matcher};
pub use name_normalizer::{NameNormalizer, DEFAULT_QUALIFIER_SUFFIXES};
pub use native_code_scanner::NativeCodeScanner;
pub use result_merger::{ResultMerger, RUNTIME_PASS_NOTE};
pub use version_comparator::VersionComparator;
