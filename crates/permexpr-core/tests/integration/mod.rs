//! Integration tests for the permission expression pipeline

mod codec_props;
mod guard_tests;
mod pipeline_tests;
mod rewrite_tests;
