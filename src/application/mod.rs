/// Application layer - use cases, DTOs and read models
///
/// Orchestrates the analysis core and reaches infrastructure only through
/// the outbound ports.
pub mod dto;
pub mod factories;
pub mod read_models;
pub mod use_cases;
