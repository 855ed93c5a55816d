/// Length of a `0x`-prefixed, hex-encoded 20-byte address.
pub const ADDRESS_LEN: usize = 42;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressError {
    #[error("Address is too short")]
    TooShort,
    #[error("Address is too long")]
    TooLong,
    #[error("Address must start with 0x")]
    MissingPrefix,
    #[error("Address contains invalid characters")]
    InvalidCharacters,
}

/// `0x` followed by exactly 40 hex digits (surrounding whitespace ignored).
pub fn is_valid_address(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.len() == ADDRESS_LEN
        && trimmed.starts_with("0x")
        && trimmed[2..].chars().all(|c| c.is_ascii_hexdigit())
}

pub fn normalize_address(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Explains why `raw` is not a usable address.
///
/// An empty (or all-whitespace) input is not an error: nothing has been
/// typed yet, so there is nothing to complain about.
pub fn address_validation_error(raw: &str) -> Option<AddressError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.len() < ADDRESS_LEN {
        return Some(AddressError::TooShort);
    }
    if trimmed.len() > ADDRESS_LEN {
        return Some(AddressError::TooLong);
    }
    if !trimmed.starts_with("0x") {
        return Some(AddressError::MissingPrefix);
    }
    if !trimmed[2..].chars().all(|c| c.is_ascii_hexdigit()) {
        return Some(AddressError::InvalidCharacters);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb0";

    #[test]
    fn accepts_mixed_case_hex() {
        assert!(is_valid_address(VALID));
        assert!(is_valid_address("0x0000000000000000000000000000000000000000"));
        assert!(is_valid_address(&format!("  {}\n", VALID)));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("0x1234"));
        assert!(!is_valid_address(&format!("{}0", VALID)));
        assert!(!is_valid_address("1x742d35Cc6634C0532925a3b844Bc9e7595f0bEb0"));
        assert!(!is_valid_address("0x742d35Cc6634C0532925a3b844Bc9e7595f0bEbZ"));
        // multi-byte characters must not panic on slicing
        assert!(!is_valid_address("0xé42d35Cc6634C0532925a3b844Bc9e7595f0bEb"));
    }

    #[test]
    fn validation_error_is_none_for_valid_or_empty() {
        assert_eq!(address_validation_error(VALID), None);
        assert_eq!(address_validation_error(""), None);
        assert_eq!(address_validation_error("   "), None);
    }

    #[test]
    fn validation_error_names_each_problem() {
        assert_eq!(
            address_validation_error("0x742d"),
            Some(AddressError::TooShort)
        );
        assert_eq!(
            address_validation_error(&format!("{}ab", VALID)),
            Some(AddressError::TooLong)
        );
        assert_eq!(
            address_validation_error("00742d35Cc6634C0532925a3b844Bc9e7595f0bEb0"),
            Some(AddressError::MissingPrefix)
        );
        assert_eq!(
            address_validation_error("0x742d35Cc6634C0532925a3b844Bc9e7595f0bEbg"),
            Some(AddressError::InvalidCharacters)
        );
        assert_eq!(
            AddressError::TooShort.to_string(),
            "Address is too short"
        );
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(
            normalize_address(&format!(" {} ", VALID)),
            "0x742d35cc6634c0532925a3b844bc9e7595f0beb0"
        );
    }
}
