//! Employee name validation mirroring backend constraints.
//!
//! The backend rejects blank employee names and caps their length; generated
//! names must also be safe to turn into an email local part.
//!
//! # Validation Rules
//!
//! - Minimum length: 3 characters
//! - Maximum length: 80 characters
//! - Allowed characters: ASCII letters, spaces, hyphens
//! - Must not be whitespace-only

/// Minimum allowed length for an employee name.
pub const EMPLOYEE_NAME_MIN: usize = 3;

/// Maximum allowed length for an employee name.
pub const EMPLOYEE_NAME_MAX: usize = 80;

/// Validates an employee name against backend constraints.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_employee_name;
///
/// assert!(is_valid_employee_name("Ada Lovelace"));
/// assert!(is_valid_employee_name("Mary-Jane Watson"));
/// assert!(!is_valid_employee_name("Al"));          // Too short
/// assert!(!is_valid_employee_name("O'Brien"));     // Invalid character
/// assert!(!is_valid_employee_name("    "));        // Whitespace-only
/// ```
#[must_use]
pub fn is_valid_employee_name(name: &str) -> bool {
    let length = name.chars().count();
    if !(EMPLOYEE_NAME_MIN..=EMPLOYEE_NAME_MAX).contains(&length) {
        return false;
    }
    if name.trim().is_empty() {
        return false;
    }
    name.chars().all(is_valid_name_char)
}

const fn is_valid_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == ' ' || c == '-'
}

/// Removes characters that are not allowed in employee names.
pub(crate) fn sanitize_employee_name(name: &str) -> String {
    name.chars().filter(|c| is_valid_name_char(*c)).collect()
}

/// Derives a work email address from a validated name.
pub(crate) fn email_for(name: &str) -> String {
    let local: Vec<String> = name
        .split_whitespace()
        .map(str::to_ascii_lowercase)
        .collect();
    format!("{}@example.com", local.join("."))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Ada Lovelace", true)]
    #[case("Bob", true)]
    #[case("Jean-Luc Picard", true)]
    #[case("ab", false)]
    #[case("Zoë Smith", false)]
    #[case("D'Angelo", false)]
    fn validates_names(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_valid_employee_name(name), expected);
    }

    #[test]
    fn sanitize_strips_punctuation() {
        assert_eq!(sanitize_employee_name("O'Brien, Jr."), "OBrien Jr");
    }

    #[test]
    fn email_joins_lowercase_parts() {
        assert_eq!(email_for("Ada  Lovelace"), "ada.lovelace@example.com");
    }
}
