#![allow(clippy::unwrap_used, clippy::expect_used)]

mod arena_tests;
mod script_type_tests;
