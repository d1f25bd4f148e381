/// Use cases orchestrating the analysis through ports
mod analyze_project;
mod scan_project;

pub use analyze_project::AnalyzeProjectUseCase;
pub use scan_project::ScanProjectUseCase;
