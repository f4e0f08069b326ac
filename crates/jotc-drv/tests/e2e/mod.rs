//! End-to-end tests for the `jotc` binary.
//!
//! These run the built binary as a subprocess (`assert_cmd`) rather than
//! calling `jotc_drv::run` in-process, so they also exercise argument
//! parsing and process exit codes the way a real invocation would.

mod cli_tests;
mod compilation_tests;
mod snapshot_tests;
