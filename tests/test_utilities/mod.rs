//! Shared helpers for integration and end-to-end tests
#![allow(dead_code)]

pub mod class_bytes;
pub mod mocks;
