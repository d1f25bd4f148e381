//! classdeps - dependency analysis for compiled Java classes
//!
//! This library reads compiled class files, arranges their units in a
//! containment tree (source, namespaces, units) and finds dependency
//! cycles and coupling hot spots on any level of that tree. It follows
//! hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`dependency_analysis`): Containment tree, graph snapshots,
//!   cycle detection, coupling metrics and view filters
//! - **Application Layer** (`application`): Scan and analysis use cases, DTOs, read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use classdeps::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! let scan_use_case =
//!     ScanProjectUseCase::new(ClassDirectorySource::new(), StderrProgressReporter::new());
//! let scan = scan_use_case.execute(ScanRequest::new(vec![PathBuf::from("build/classes")]))?;
//!
//! let analyze_use_case = AnalyzeProjectUseCase::new(StderrProgressReporter::quiet());
//! let request = AnalysisRequest::new(ListModePreset::Packages).with_cycles_only(true);
//! let response = analyze_use_case.execute(scan, request)?;
//!
//! let output = TextFormatter::new().format(&response.report)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod dependency_analysis;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        ClassDirectorySource, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
    pub use crate::application::dto::{
        AnalysisRequest, AnalysisResponse, OutputFormat, ScanRequest, ScanResponse,
    };
    pub use crate::application::read_models::AnalysisReport;
    pub use crate::application::use_cases::{AnalyzeProjectUseCase, ScanProjectUseCase};
    pub use crate::dependency_analysis::domain::{
        DependencyGraph, ListMode, NodeId, ParsedUnit, ProjectTree,
    };
    pub use crate::dependency_analysis::policies::ExcusedDependencies;
    pub use crate::dependency_analysis::services::{
        CouplingMetrics, CycleFinder, Direction, GraphOperations, UnitFilter, UnitParser,
    };
    pub use crate::dependency_analysis::views::{
        CyclesOnly, ListModePreset, ReachabilityFrom, ViewFilter, ViewStack,
    };
    pub use crate::ports::outbound::{
        LoadedSource, OutputPresenter, ProgressReporter, ReportFormatter, UnitInput, UnitSource,
    };
    pub use crate::shared::error::{DepsError, ExitCode};
    pub use crate::shared::Result;
}
