//! Skalierungs- und Interpolations-Helfer (zustandslos).

/// Normalisiert `value` aus `[min, max]` nach `[0, 1]`.
///
/// Ein leerer Bereich (`min == max`) liefert `0.0` statt NaN.
pub fn normalize(value: f32, min: f32, max: f32) -> f32 {
    scale(value, min, max, 0.0, 1.0)
}

/// Bildet `value` linear von `[in_min, in_max]` auf `[out_min, out_max]` ab.
pub fn scale(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_min;
    }
    (value - in_min) / span * (out_max - out_min) + out_min
}

/// Lineare Interpolation: `loc = 0` → `min`, `loc = 1` → `max`.
pub fn interp(loc: f32, min: f32, max: f32) -> f32 {
    loc * (max - min) + min
}

/// Begrenzt `value` auf `[min, max]`.
///
/// Im Gegensatz zu `f32::clamp` panikt die Funktion nicht bei `min > max`;
/// dann gewinnt die Untergrenze.
pub fn clip(value: f32, min: f32, max: f32) -> f32 {
    let mut v = value;
    if v > max {
        v = max;
    }
    if v < min {
        v = min;
    }
    v
}
