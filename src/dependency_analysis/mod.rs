//! Dependency analysis core: the project tree, its graph snapshots and the
//! algorithms and views built on them.

pub mod domain;
pub mod policies;
pub mod services;
pub mod views;

#[cfg(test)]
pub(crate) mod test_fixtures;
