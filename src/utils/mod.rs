//! Utility modules for common functionality

pub mod validators;

pub use validators::{AnalyzeRequest, ValidatedRequest, ValidationError, validate_analyze_request};
