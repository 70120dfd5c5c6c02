//! Testing utilities
//!
//! Filesystem fixtures for tests that need a real project tree on disk.

pub mod filesystem;

pub use filesystem::TempDirFixture;
