//! Numerical helpers shared by the engine and the branch-and-bound layer.

/// Scale factor for a decimal tolerance (`1e-5` -> `100000.0`).
#[inline]
fn scale(tol: f64) -> f64 {
    (1.0 / tol).round()
}

/// Round `value` up at the resolution of `tol`.
#[inline]
pub fn ceil_at(value: f64, tol: f64) -> f64 {
    let s = scale(tol);
    (value * s).ceil() / s
}

/// Round `value` toward zero at the resolution of `tol`
/// (floor when positive, ceil otherwise).
#[inline]
pub fn round_toward_zero(value: f64, tol: f64) -> f64 {
    let s = scale(tol);
    if value > 0.0 {
        (value * s).floor() / s
    } else {
        (value * s).ceil() / s
    }
}

/// Round toward zero to a whole number (floor when positive, ceil otherwise).
#[inline]
pub fn truncate_toward_zero(value: f64) -> f64 {
    if value > 0.0 {
        value.floor()
    } else {
        value.ceil()
    }
}

/// True when `value` lies within `tol` of an integer.
#[inline]
pub fn is_integral(value: f64, tol: f64) -> bool {
    value.is_finite() && (value - value.round()).abs() <= tol
}
