/// Result with anyhow::Error, used across the adapter and application layers.
/// Domain operations return `DepsError` directly and convert through `?`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
