//! Byte-buffer dumps
//!
//! Renders a buffer as fixed-width digits in the configured base (2, 8, 10
//! or 16) followed by a printable-ASCII gutter. Output is a single line so
//! a dumped buffer cannot fake further log records.

/// Digit width per supported base; unsupported bases fall back to hex.
fn digit_width(base: u8) -> (u32, usize) {
    match base {
        2 => (2, 8),
        8 => (8, 3),
        10 => (10, 3),
        _ => (16, 2),
    }
}

fn to_digits(byte: u8, base: u32, width: usize) -> String {
    let mut out = String::new();
    let mut value = byte as u32;
    while value > 0 {
        let digit = (value % base) as u8;
        out.insert(0, char::from_digit(digit as u32, base).unwrap_or('0'));
        value /= base;
    }
    while out.len() < width {
        out.insert(0, '0');
    }
    out
}

/// Dump `buf` in `base`, e.g. `68 69 21  |hi!|` for hex.
pub fn dump(buf: &[u8], base: u8) -> String {
    if buf.is_empty() {
        return "||".to_string();
    }
    let (base, width) = digit_width(base);
    let digits: Vec<String> = buf.iter().map(|&b| to_digits(b, base, width)).collect();
    let gutter: String = buf
        .iter()
        .map(|&b| {
            if (0x20..0x7f).contains(&b) {
                b as char
            } else {
                '\u{b7}'
            }
        })
        .collect();
    format!("{}  |{}|", digits.join(" "), gutter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_dump() {
        assert_eq!(dump(b"hi!", 16), "68 69 21  |hi!|");
    }

    #[test]
    fn test_binary_dump() {
        assert_eq!(dump(&[0b1010_0001], 2), "10100001  |\u{b7}|");
    }

    #[test]
    fn test_decimal_and_octal() {
        assert_eq!(dump(&[7, 255], 10), "007 255  |\u{b7}\u{b7}|");
        assert_eq!(dump(&[8], 8), "010  |\u{b7}|");
    }

    #[test]
    fn test_control_chars_in_gutter() {
        let line = dump(b"\x00A\x7f", 16);
        assert_eq!(line, "00 41 7f  |\u{b7}A\u{b7}|");
    }

    #[test]
    fn test_empty() {
        assert_eq!(dump(&[], 16), "||");
    }

    #[test]
    fn test_unsupported_base_falls_back_to_hex() {
        assert_eq!(dump(b"A", 7), "41  |A|");
    }
}
