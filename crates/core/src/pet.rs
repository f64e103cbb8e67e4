//! Pet profile validation rules.

use crate::validation::{limit_length, require_text, FieldErrors};

/// Oldest accepted age in years.
pub const MAX_AGE_YEARS: i32 = 100;

/// Maximum length of name, species and breed.
pub const MAX_TEXT_LEN: usize = 100;

/// Validate the fields of a pet profile.
///
/// `name` and `species` are required, `age_years` must lie in
/// `0..=MAX_AGE_YEARS`, and `weight_kg` must be positive when given.
pub fn validate_profile(
    name: &str,
    species: &str,
    breed: Option<&str>,
    age_years: i32,
    weight_kg: Option<f64>,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = require_text(&mut errors, "name", name);
    limit_length(&mut errors, "name", &name, MAX_TEXT_LEN);

    let species = require_text(&mut errors, "species", species);
    limit_length(&mut errors, "species", &species, MAX_TEXT_LEN);

    if let Some(breed) = breed {
        limit_length(&mut errors, "breed", breed.trim(), MAX_TEXT_LEN);
    }

    if !(0..=MAX_AGE_YEARS).contains(&age_years) {
        errors.push(
            "age_years",
            format!("must be between 0 and {MAX_AGE_YEARS}"),
        );
    }

    if let Some(weight) = weight_kg {
        if !weight.is_finite() || weight <= 0.0 {
            errors.push("weight_kg", "must be a positive number");
        }
    }

    errors.into_result(())
}
