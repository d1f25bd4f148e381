use classdeps::adapters::outbound::console::StderrProgressReporter;
use classdeps::adapters::outbound::filesystem::ClassDirectorySource;
use classdeps::application::dto::{AnalysisRequest, ScanRequest};
use classdeps::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use classdeps::application::use_cases::{AnalyzeProjectUseCase, ScanProjectUseCase};
use classdeps::cli::{Args, LogLevel};
use classdeps::config::{discover_config, load_config_from_path, ResolvedOptions};
use classdeps::shared::error::ExitCode;
use classdeps::shared::Result;
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse_args();
    init_tracing(args.log_level);

    match run(args) {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn init_tracing(level: LogLevel) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn progress_reporter(quiet: bool) -> StderrProgressReporter {
    if quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let config = match &args.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(Path::new("."))?,
    };
    let options = ResolvedOptions::resolve(args, config)?;

    let mut scan_request =
        ScanRequest::new(options.paths.clone()).with_ignored_units(options.ignored_units.clone());
    if let Some(ignored_sources) = &options.ignored_sources {
        scan_request = scan_request.with_ignored_sources(ignored_sources.clone());
    }
    let scan_use_case =
        ScanProjectUseCase::new(ClassDirectorySource::new(), progress_reporter(options.quiet));
    let scan = scan_use_case.execute(scan_request)?;

    let mut analysis_request = AnalysisRequest::new(options.view)
        .with_cycles_only(options.cycles_only)
        .with_focus(options.focus.clone());
    if let Some((node_name, direction)) = &options.from {
        analysis_request = analysis_request.with_reachability(node_name.clone(), *direction);
    }
    let analyze_use_case = AnalyzeProjectUseCase::new(progress_reporter(options.quiet));
    let response = analyze_use_case.execute(scan, analysis_request)?;

    if !options.quiet {
        eprintln!("{}", FormatterFactory::progress_message(options.format));
    }
    let formatter = FormatterFactory::create(options.format);
    let formatted_output = formatter.format(&response.report)?;

    let presenter = PresenterFactory::create(PresenterType::from(options.output.clone()));
    presenter.present(&formatted_output)?;

    if options.fail_on_cycles && response.has_cycles {
        eprintln!(
            "❌ Dependency cycles found ({} in total). Failing because --fail-on-cycles is set.",
            response.report.cycles.len()
        );
        return Ok(ExitCode::CyclesDetected);
    }

    Ok(ExitCode::Success)
}
