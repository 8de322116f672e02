use crate::graph::Parameters;

/// Copies `parameters`, leaving out every entry whose key reads as a number.
///
/// Such keys are array indices left behind when a list-shaped value was
/// spread into the mapping by an older editor; they never name a real input.
pub fn strip_numeric_keys(parameters: &Parameters) -> Parameters {
    parameters
        .iter()
        .filter(|(key, _)| !is_numeric_key(key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Whether a parameter key reads as a number.
///
/// Surrounding whitespace is ignored and a blank key counts as numeric (it
/// reads as zero). Accepted forms: decimal numbers with optional sign,
/// fraction and exponent (`"12"`, `"-1.5"`, `".5"`, `"1e3"`), a signed or
/// unsigned `Infinity`, and unsigned `0x`/`0o`/`0b` integers. `NaN` is not a
/// number.
pub fn is_numeric_key(key: &str) -> bool {
    let key = key.trim_ascii();
    if key.is_empty() {
        return true;
    }
    if let Some(digits) = radix_digits(key) {
        return digits;
    }

    let unsigned = key.strip_prefix(['+', '-']).unwrap_or(key);
    if unsigned == "Infinity" {
        return true;
    }
    is_decimal(unsigned)
}

/// `Some(valid)` when `key` carries a radix prefix.
fn radix_digits(key: &str) -> Option<bool> {
    let bytes = key.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let digits = &key[2..];
    Some(!digits.is_empty() && digits.chars().all(|c| c.is_digit(radix)))
}

/// Unsigned decimal literal: `digits[.digits][e[+-]digits]`, with at least one
/// digit before or after the point.
fn is_decimal(s: &str) -> bool {
    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(at) => (&s[..at], Some(&s[at + 1..])),
        None => (s, None),
    };

    let (integral, fraction) = match mantissa.split_once('.') {
        Some((integral, fraction)) => (integral, fraction),
        None => (mantissa, ""),
    };
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if integral.is_empty() && fraction.is_empty() {
        return false;
    }
    if !all_digits(integral) || !all_digits(fraction) {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !exp.is_empty() && all_digits(exp)
        }
    }
}
