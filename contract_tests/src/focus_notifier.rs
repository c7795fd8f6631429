//! Focus notification contract tests
//!
//! These tests define what the automation peer receives on focus changes.
