//! Byte classes used by the scanner. ASCII only, never locale-aware.

/// Tab, line feed, carriage return, space and form feed.
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | b'\r' | b' ' | 0x0C)
}

pub fn is_binary_digit(b: u8) -> bool {
    matches!(b, b'0' | b'1')
}

pub fn is_octal_digit(b: u8) -> bool {
    matches!(b, b'0'..=b'7')
}

pub fn is_decimal_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

pub fn is_hex_digit(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

pub fn is_alpha(b: u8) -> bool {
    b.is_ascii_alphabetic()
}

pub fn is_alnum(b: u8) -> bool {
    is_alpha(b) || is_decimal_digit(b)
}

pub fn is_identifier_char(b: u8) -> bool {
    is_alnum(b) || b == b'_'
}

/// Trailing byte of a multi-byte UTF-8 sequence (`0b10xx_xxxx`).
pub fn is_utf8_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_set() {
        for b in [b'\t', b'\n', b'\r', b' ', 0x0C] {
            assert!(is_whitespace(b), "{b:#04x} should be whitespace");
        }
        for b in [0x0B, b'a', b'_', 0x00, 0xA0] {
            assert!(!is_whitespace(b), "{b:#04x} should not be whitespace");
        }
    }

    #[test]
    fn digit_classes_nest() {
        for b in 0u8..=255 {
            if is_binary_digit(b) {
                assert!(is_octal_digit(b));
            }
            if is_octal_digit(b) {
                assert!(is_decimal_digit(b));
            }
            if is_decimal_digit(b) {
                assert!(is_hex_digit(b));
            }
        }
        assert!(!is_octal_digit(b'8'));
        assert!(is_hex_digit(b'F') && is_hex_digit(b'a'));
        assert!(!is_hex_digit(b'g') && !is_hex_digit(b'G'));
    }

    #[test]
    fn identifier_chars() {
        assert!(is_identifier_char(b'_'));
        assert!(is_identifier_char(b'z'));
        assert!(is_identifier_char(b'Q'));
        assert!(is_identifier_char(b'9'));
        assert!(!is_identifier_char(b'-'));
        assert!(!is_identifier_char(b'@'));
        assert!(!is_alnum(b'_'));
    }

    #[test]
    fn non_ascii_is_never_alpha() {
        for b in 0x80u8..=0xFF {
            assert!(!is_alpha(b));
            assert!(!is_identifier_char(b));
        }
        let e_acute = "é".as_bytes();
        assert!(!is_utf8_continuation(e_acute[0]));
        assert!(is_utf8_continuation(e_acute[1]));
    }
}
