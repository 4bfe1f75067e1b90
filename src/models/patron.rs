//! Patron model
//!
//! A library member with a fixed-width numeric ID, contact details and an
//! outstanding fine. Every constructor and mutator goes through [`validate`],
//! so a `Patron` value is never observable in an invalid state.

use serde::Serialize;
use std::fmt;

use super::fine::{Fine, FineAmount, FINE_SCALE, MAX_FINE, MIN_FINE};

/// Number of digits required for a patron ID
pub const ID_LENGTH: usize = 7;

/// A library patron
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Patron {
    id: String,
    name: String,
    address: String,
    fine: Fine,
}

impl Patron {
    /// Create a validated patron
    ///
    /// Name and address are trimmed and the fine is normalized to two
    /// fractional digits.
    pub fn new(
        id: impl AsRef<str>,
        name: impl AsRef<str>,
        address: impl AsRef<str>,
        fine: impl Into<FineAmount>,
    ) -> Result<Self, ValidationError> {
        validate(id.as_ref(), name.as_ref(), address.as_ref(), fine.into())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn fine(&self) -> Fine {
        self.fine
    }

    /// Return a copy of this patron carrying a different fine
    pub fn with_fine(&self, fine: impl Into<FineAmount>) -> Result<Self, ValidationError> {
        validate(&self.id, &self.name, &self.address, fine.into())
    }

    /// Replace the fine in place
    ///
    /// The whole record is revalidated first; on failure `self` is untouched.
    pub fn update_fine(&mut self, fine: impl Into<FineAmount>) -> Result<(), ValidationError> {
        let updated = self.with_fine(fine)?;
        self.fine = updated.fine;
        Ok(())
    }
}

impl fmt::Display for Patron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {}",
            self.id, self.name, self.address, self.fine
        )
    }
}

/// Check whether `id` is exactly [`ID_LENGTH`] ASCII digits
pub fn is_valid_id(id: &str) -> bool {
    id.len() == ID_LENGTH && id.bytes().all(|b| b.is_ascii_digit())
}

/// Validate raw patron fields and build the normalized record
///
/// Rules are checked in a fixed order and the first failure is returned:
/// ID format, name, address, fine precision, fine range.
pub fn validate(
    id: &str,
    name: &str,
    address: &str,
    fine: FineAmount,
) -> Result<Patron, ValidationError> {
    if !is_valid_id(id) {
        return Err(ValidationError::InvalidId);
    }

    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::BlankName);
    }

    let address = address.trim();
    if address.is_empty() {
        return Err(ValidationError::BlankAddress);
    }

    if fine.scale() > i64::from(FINE_SCALE) {
        return Err(ValidationError::FinePrecision);
    }

    // With at most two fractional digits, only huge magnitudes are unrepresentable
    let fine = match fine.exact() {
        Some(amount) if (MIN_FINE..=MAX_FINE).contains(&amount) => amount,
        _ => return Err(ValidationError::FineOutOfRange),
    };

    Ok(Patron {
        id: id.to_string(),
        name: name.to_string(),
        address: address.to_string(),
        fine: Fine::normalized(fine),
    })
}

/// Validation errors for patrons
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidId,
    BlankName,
    BlankAddress,
    FinePrecision,
    FineOutOfRange,
    DuplicateId(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "ID must be exactly {} digits", ID_LENGTH),
            Self::BlankName => write!(f, "Name cannot be blank"),
            Self::BlankAddress => write!(f, "Address cannot be blank"),
            Self::FinePrecision => write!(f, "Fine must have at most two decimal places"),
            Self::FineOutOfRange => {
                write!(f, "Fine must be between {} and {}", MIN_FINE, MAX_FINE)
            }
            Self::DuplicateId(id) => write!(f, "ID already exists: {}", id),
        }
    }
}

impl std::error::Error for ValidationError {}
