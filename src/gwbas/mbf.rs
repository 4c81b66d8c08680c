// Microsoft Binary Format (MBF) floating-point decoding.
//
// GW-BASIC stores SINGLE (4-byte) and DOUBLE (8-byte) constants in MBF,
// little-endian: the last byte is a biased exponent (bias 129), the top
// bit of the second-to-last byte is the sign, and the remaining bits are
// the fractional part of a significand with an implicit leading one.
// A zero exponent byte means the value is exactly zero, whatever the
// other bytes contain.
//
// Decoding folds the implicit one into an integer significand and scales
// by an exact power of two, so the result is the mathematically exact
// value rounded once to the nearest IEEE double.

/// Decode a 4-byte MBF SINGLE into an IEEE double.
pub fn decode_f32(bytes: [u8; 4]) -> f64 {
    if bytes[3] == 0 {
        return 0.0;
    }
    let sign = if bytes[2] & 0x80 != 0 { -1.0 } else { 1.0 };
    let frac = u32::from(bytes[0]) | (u32::from(bytes[1]) << 8) | (u32::from(bytes[2] & 0x7F) << 16);
    let exp = i32::from(bytes[3]) - 129;
    // (1 + frac/2^23) * 2^exp == (2^23 + frac) * 2^(exp-23).
    // The integer fits in 24 bits, so both steps are exact.
    sign * f64::from((1u32 << 23) + frac) * 2f64.powi(exp - 23)
}

/// Decode an 8-byte MBF DOUBLE into an IEEE double.
pub fn decode_f64(bytes: [u8; 8]) -> f64 {
    if bytes[7] == 0 {
        return 0.0;
    }
    let sign = if bytes[6] & 0x80 != 0 { -1.0 } else { 1.0 };
    let mut frac = 0u64;
    for (i, &b) in bytes[..6].iter().enumerate() {
        frac |= u64::from(b) << (8 * i);
    }
    frac |= u64::from(bytes[6] & 0x7F) << 48;
    let exp = i32::from(bytes[7]) - 129;
    // 56-bit integer significand: one rounding on the u64 -> f64 conversion,
    // then an exact power-of-two scale (the result range stays normal).
    sign * (((1u64 << 55) + frac) as f64) * 2f64.powi(exp - 55)
}

// ---------------------------------------------------------------------------
// Listing text for float constants
// ---------------------------------------------------------------------------

/// Format a float the way LIST prints it: six significant digits, fixed
/// notation for decimal exponents in -4..6, scientific otherwise.
pub fn format_float(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    // Round to six significant digits first; the notation choice uses the
    // rounded exponent, so a value that rounds up across a power of ten
    // (999999.9 -> 1E+06) picks the right form.
    let sci = format!("{value:.5E}");
    let (mantissa, exp) = split_exponent(&sci);
    if (-4..6).contains(&exp) {
        let prec = (5 - exp) as usize;
        let fixed = format!("{value:.prec$}");
        trim_zeros(&fixed).to_string()
    } else {
        format!("{}E{exp:+03}", trim_zeros(mantissa))
    }
}

fn split_exponent(sci: &str) -> (&str, i32) {
    match sci.split_once('E') {
        Some((mantissa, exp)) => (mantissa, exp.parse().unwrap_or(0)),
        None => (sci, 0),
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
