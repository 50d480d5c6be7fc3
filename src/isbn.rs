//! Checksum validation for the optional strict indexing mode.

/// Whether `isbn` is a well-formed ISBN-10 or ISBN-13. Hyphens and spaces are ignored.
pub fn is_valid(isbn: &str) -> bool {
    let chars: Vec<char> = isbn
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect();

    match chars.len() {
        10 => is_valid_10(&chars),
        13 => is_valid_13(&chars),
        _ => false,
    }
}

fn is_valid_10(chars: &[char]) -> bool {
    let mut sum = 0;
    for (i, c) in chars.iter().enumerate() {
        let digit = match c {
            'X' | 'x' if i == 9 => 10,
            c => match c.to_digit(10) {
                Some(d) => d,
                None => return false,
            },
        };
        sum += digit * (10 - i as u32);
    }
    sum % 11 == 0
}

fn is_valid_13(chars: &[char]) -> bool {
    let mut sum = 0;
    for (i, c) in chars.iter().enumerate() {
        let Some(digit) = c.to_digit(10) else {
            return false;
        };
        sum += if i % 2 == 0 { digit } else { digit * 3 };
    }
    sum % 10 == 0
}
