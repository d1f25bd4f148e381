/// Adapters layer - infrastructure implementations
///
/// Concrete implementations of the outbound ports: file system access,
/// console output and report formatting.
pub mod outbound;
