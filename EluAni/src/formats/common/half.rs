//! IEEE 754 half precision promotion used by compressed animation keys.

/// Promote a packed half float to its single precision bit pattern.
#[must_use]
pub fn half_to_f32_bits(value: u16) -> u32 {
    let value = u32::from(value);
    let sign = (value >> 15) & 0x1;
    let mut exponent = (value >> 10) & 0x1f;
    let mut mantissa = value & 0x3ff;

    if exponent == 0 {
        if mantissa == 0 {
            return sign << 31;
        }
        // Subnormal: shift until the implicit bit appears, then drop it.
        let mut shift = 0u32;
        while mantissa & 0x400 == 0 {
            mantissa <<= 1;
            shift += 1;
        }
        mantissa &= !0x400;
        return (sign << 31) | ((127 - 15 + 1 - shift) << 23) | (mantissa << 13);
    }

    if exponent == 0x1f {
        // Inf keeps a zero mantissa, NaN keeps its payload.
        return (sign << 31) | 0x7f80_0000 | (mantissa << 13);
    }

    exponent += 127 - 15;
    mantissa <<= 13;
    (sign << 31) | (exponent << 23) | mantissa
}

/// Convert a packed half float to f32.
#[must_use]
pub fn half_to_f32(value: u16) -> f32 {
    f32::from_bits(half_to_f32_bits(value))
}
