//! Boundary validation for insertable and patch payloads

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
  #[error("{field} must be greater than 0")]
  NotPositive { field: &'static str },

  #[error("{field} must not be negative")]
  Negative { field: &'static str },

  #[error("{field} must be between {min} and {max}, got {value}")]
  OutOfRange { field: &'static str, min: i64, max: i64, value: i64 },

  #[error("{field} must be a finite number")]
  NotFinite { field: &'static str },
}

impl ValidationError {
  pub fn not_positive(field: &'static str) -> Self {
    Self::NotPositive { field }
  }

  pub fn negative(field: &'static str) -> Self {
    Self::Negative { field }
  }

  pub fn out_of_range(field: &'static str, min: i64, max: i64, value: i64) -> Self {
    Self::OutOfRange { field, min, max, value }
  }

  pub fn not_finite(field: &'static str) -> Self {
    Self::NotFinite { field }
  }
}

/// Payloads that must be checked before they reach the store
pub trait Validate {
  fn validate(&self) -> Result<(), ValidationError>;
}

pub(crate) fn positive_int(field: &'static str, value: i64) -> Result<(), ValidationError> {
  if value <= 0 {
    return Err(ValidationError::not_positive(field));
  }
  Ok(())
}

pub(crate) fn non_negative_int(field: &'static str, value: i64) -> Result<(), ValidationError> {
  if value < 0 {
    return Err(ValidationError::negative(field));
  }
  Ok(())
}

pub(crate) fn positive_amount(field: &'static str, value: f64) -> Result<(), ValidationError> {
  finite(field, value)?;
  if value <= 0.0 {
    return Err(ValidationError::not_positive(field));
  }
  Ok(())
}

pub(crate) fn non_negative_amount(field: &'static str, value: f64) -> Result<(), ValidationError> {
  finite(field, value)?;
  if value < 0.0 {
    return Err(ValidationError::negative(field));
  }
  Ok(())
}

pub(crate) fn finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
  if !value.is_finite() {
    return Err(ValidationError::not_finite(field));
  }
  Ok(())
}

pub(crate) fn in_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), ValidationError> {
  if value < min || value > max {
    return Err(ValidationError::out_of_range(field, min, max, value));
  }
  Ok(())
}

/// Run a check only when the patch carries the field
pub(crate) fn when_present<T: Copy>(
  value: Option<T>,
  check: impl FnOnce(T) -> Result<(), ValidationError>,
) -> Result<(), ValidationError> {
  value.map_or(Ok(()), check)
}
