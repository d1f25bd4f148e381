/// Ports module defining the interfaces the application drives
///
/// Only outbound (driven) ports exist: the use cases are called directly
/// by the command-line entry point.
pub mod outbound;
