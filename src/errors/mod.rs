//! Error types and diagnostics for the front end.
//!
//! This module defines:
//!
//! - Error structures carrying the source position of the failure
//! - Specific error variants for scanning and parsing problems
//! - The diagnostics collector the parser reports into
//! - Helpful error names and suggestions for display

pub mod diagnostics;
pub mod errors;
