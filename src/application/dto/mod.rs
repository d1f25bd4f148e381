/// Data Transfer Objects for the application layer
///
/// DTOs carry requests from the CLI into the use cases and results back out,
/// keeping adapters away from the analysis internals.
mod analysis_request;
mod analysis_response;
mod output_format;
mod scan_request;
mod scan_response;

pub use analysis_request::{AnalysisRequest, Reachability};
pub use analysis_response::AnalysisResponse;
pub use output_format::OutputFormat;
pub use scan_request::ScanRequest;
pub use scan_response::{ScanResponse, ScanStatistics, SkippedUnit};
