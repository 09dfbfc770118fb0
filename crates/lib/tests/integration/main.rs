//! Integration tests for hostio-lib.

mod common;
mod environment_tests;
mod fs_tests;
mod path_tests;
