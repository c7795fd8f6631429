//! Soft keyboard contract tests
//!
//! The keyboard layout refers to actions by primary code; these codes are
//! part of the layout file format.
