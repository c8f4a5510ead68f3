// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod catalog;
pub mod celebration;
pub mod config;
pub mod runner;
pub mod runtime;
pub mod schedule;
pub mod sequence;
pub mod session;
pub mod util;
