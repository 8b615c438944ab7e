use crate::{
    Error, Q, Word,
    cordic::{
        DEGREES_PER_RADIAN, GUARD, angle, cos_sin, guard, hypot_atan2, unguard, units, vectoring,
    },
    fixed::{import, round_shr},
    sqrt::sqrt,
};

/// Sine of an angle in degrees
pub fn sin<T: Word, const F: u32>(theta: Q<T, F>) -> Q<T, F> {
    cos_sin(theta).1
}

/// Cosine of an angle in degrees
pub fn cos<T: Word, const F: u32>(theta: Q<T, F>) -> Q<T, F> {
    cos_sin(theta).0
}

/// Tangent of an angle in degrees.
///
/// Odd multiples of 90 degrees are outside the domain. Close to them the
/// quotient may not be representable.
///
/// Error: below `1.5 (6.2e-5 + 2**-F) (1 + tan**2)` plus one LSB. The
/// component errors of [`cos_sin`] are amplified by `1/cos**2` towards
/// the poles.
pub fn tan<T: Word, const F: u32>(theta: Q<T, F>) -> Result<Q<T, F>, Error> {
    let quarter = units::<T>(90, F);
    let r = theta.widen() % (quarter + quarter);
    if r == quarter || r == -quarter {
        log::debug!("tan pole at {}", theta);
        return Err(Error::Domain);
    }
    let (c, s) = cos_sin(theta);
    s.checked_div(c).ok_or(Error::Overflow)
}

/// Angle of the ratio `y/x` in degrees within [-90, 90].
///
/// Quadrant information is discarded: `atan(1, -1) == atan(-1, 1)`.
/// See [`atan2`] for the full circle.
pub fn atan<T: Word, const F: u32>(y: Q<T, F>, x: Q<T, F>) -> Result<Q<T, F>, Error> {
    if y.inner.is_zero() {
        return Ok(Q::zero());
    }
    let (_, z) = vectoring::<T>(guard(x.inner), guard(y.inner), F + GUARD);
    Ok(Q::new(unguard::<T>(z)?))
}

/// Angle of the point `(x, y)` in degrees within (-180, 180]
///
/// ```
/// use cordic_fft::{Q32, atan2};
/// let z = atan2(Q32::<16>::from_int(1), Q32::from_int(-1));
/// assert!((z.unwrap().to_f64() - 135.0).abs() < 4e-3);
/// ```
pub fn atan2<T: Word, const F: u32>(y: Q<T, F>, x: Q<T, F>) -> Result<Q<T, F>, Error> {
    angle(y, x).inspect_err(|_| log::debug!("atan2({}, {}) overflow", y, x))
}

/// Euclidean norm `sqrt(x**2 + y**2)`
pub fn hypotenuse<T: Word, const F: u32>(y: Q<T, F>, x: Q<T, F>) -> Result<Q<T, F>, Error> {
    Ok(hypot_atan2(y, x)?.0)
}

/// `sqrt(1 - v**2)`, `|v| <= 1`
fn cofactor<T: Word, const F: u32>(v: Q<T, F>) -> Result<Q<T, F>, Error> {
    if v.abs() > Q::one() {
        log::debug!("{} outside of [-1, 1]", v);
        return Err(Error::Domain);
    }
    sqrt(Q::one() - v * v)
}

/// Arcsine in degrees within [-90, 90]
pub fn asin<T: Word, const F: u32>(v: Q<T, F>) -> Result<Q<T, F>, Error> {
    atan2(v, cofactor(v)?)
}

/// Arccosine in degrees within [0, 180]
pub fn acos<T: Word, const F: u32>(v: Q<T, F>) -> Result<Q<T, F>, Error> {
    atan2(cofactor(v)?, v)
}

/// Convert radians to degrees
///
/// Error: one LSB plus `2**-F / 114` relative from the rounded constant.
pub fn to_degrees<T: Word, const F: u32>(rad: Q<T, F>) -> Result<Q<T, F>, Error> {
    T::checked_narrow(round_shr(
        rad.widen() * import::<T>(DEGREES_PER_RADIAN, F),
        F,
    ))
    .map(Q::new)
    .ok_or(Error::Overflow)
}

/// Convert degrees to radians
///
/// Error: one LSB plus `2**-F / 114` relative from the rounded constant.
pub fn to_radians<T: Word, const F: u32>(deg: Q<T, F>) -> Q<T, F> {
    Q::new(T::narrow(
        (deg.widen() << F as usize) / import::<T>(DEGREES_PER_RADIAN, F),
    ))
}
