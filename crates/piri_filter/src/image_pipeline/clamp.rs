/// Clamps `value` into [0, 255] and rounds it to a channel value.
pub fn saturate(value: f64) -> u8 {
    saturate_to(value, u8::MAX)
}

/// Clamps `value` into [0, max] and rounds it. NaN maps to 0.
pub fn saturate_to(value: f64, max: u8) -> u8 {
    if value > f64::from(max) {
        max
    } else if value >= 0.0 {
        value.round() as u8
    } else {
        0
    }
}
