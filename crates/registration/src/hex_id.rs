//! Cospas-Sarsat hex id decoding
//!
//! A 15-character hex id is the 60-bit identification field of a
//! first-generation beacon message (message bits 26-85). The first bit is the
//! format flag and the following ten bits carry the Maritime Identification
//! Digits (MID) of the country the beacon is coded for.

/// Length of a first-generation hex id in characters
pub const HEX_ID_LENGTH: usize = 15;

/// MIDs allocated to the United Kingdom
pub const UK_COUNTRY_CODES: [u16; 4] = [232, 233, 234, 235];

const COUNTRY_CODE_WIDTH: u32 = 10;
const COUNTRY_CODE_SHIFT: u32 = (HEX_ID_LENGTH as u32 * 4) - 1 - COUNTRY_CODE_WIDTH;
const COUNTRY_CODE_MASK: u64 = (1 << COUNTRY_CODE_WIDTH) - 1;

/// Decode the country code embedded in a hex id.
///
/// Returns `None` unless the value is exactly 15 hexadecimal characters.
pub fn country_code(hex_id: &str) -> Option<u16> {
    if hex_id.len() != HEX_ID_LENGTH || !hex_id.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let bits = u64::from_str_radix(hex_id, 16).ok()?;
    Some(((bits >> COUNTRY_CODE_SHIFT) & COUNTRY_CODE_MASK) as u16)
}

/// Whether the hex id decodes to one of the UK country codes
pub fn is_uk_encoded(hex_id: &str) -> bool {
    country_code(hex_id).is_some_and(|code| UK_COUNTRY_CODES.contains(&code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_uk_country_code() {
        assert_eq!(country_code("1D0E9B07CEFFBFF"), Some(232));
        assert_eq!(country_code("1D0EA08C52FFBFF"), Some(232));
        assert!(is_uk_encoded("1D0E9B07CEFFBFF"));
    }

    #[test]
    fn test_decodes_non_uk_country_code() {
        assert_eq!(country_code("C00F429578002C1"), Some(512));
        assert!(!is_uk_encoded("C00F429578002C1"));
    }

    #[test]
    fn test_lowercase_is_accepted() {
        assert_eq!(country_code("1d0e9b07ceffbff"), Some(232));
    }

    #[test]
    fn test_rejects_wrong_length_or_characters() {
        assert_eq!(country_code(""), None);
        assert_eq!(country_code("1D0E9B07CEFFBF"), None);
        assert_eq!(country_code("0123456789ABCDX"), None);
        assert!(!is_uk_encoded("0123456789ABCDX"));
    }
}
