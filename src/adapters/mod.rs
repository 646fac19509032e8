/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the outbound ports:
/// document readers, SBOM parsers, evidence sources, formatters and
/// presenters.
pub mod outbound;
