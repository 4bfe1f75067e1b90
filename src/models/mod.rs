//! Core data models for the LMS
//!
//! This module contains the patron record and the fine amount it carries,
//! together with the validation rules both must satisfy.

pub mod fine;
pub mod patron;

pub use fine::{parse_fine, Fine, FineAmount, FineParseError, FINE_SCALE, MAX_FINE, MIN_FINE};
pub use patron::{is_valid_id, validate, Patron, ValidationError, ID_LENGTH};
