//! Command dispatch contract tests
//!
//! These tests define the stable contract for inbound command broadcasts.
