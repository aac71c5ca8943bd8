// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::Company;

/// Validates a student's name fields.
///
/// This function checks that required fields are not empty or
/// whitespace-only. It does NOT check for uniqueness; students are not
/// required to have unique names.
///
/// # Arguments
///
/// * `first_name` - Given name
/// * `last_name` - Family name
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if either name is empty.
pub fn validate_student_name(first_name: &str, last_name: &str) -> Result<(), DomainError> {
    if first_name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "First name cannot be empty",
        )));
    }

    if last_name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Last name cannot be empty",
        )));
    }

    Ok(())
}

/// Validates a company's display name.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is empty.
pub fn validate_company_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Company name cannot be empty",
        )));
    }

    Ok(())
}

/// Validates that a company name is not already in use.
///
/// This function is pure, deterministic, and has no side effects.
///
/// # Arguments
///
/// * `name` - The proposed company name
/// * `existing_companies` - The companies already registered
///
/// # Errors
///
/// Returns `DomainError::DuplicateCompanyName` if the name is taken.
pub fn validate_company_name_unique(
    name: &str,
    existing_companies: &[Company],
) -> Result<(), DomainError> {
    // Rule: company names are globally unique
    if existing_companies.iter().any(|company| company.name == name) {
        return Err(DomainError::DuplicateCompanyName(name.to_string()));
    }

    Ok(())
}
