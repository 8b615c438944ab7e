// https://www.st.com/resource/en/design_tip/dt0085-coordinate-rotation-digital-computer-algorithm-cordic-to-compute-trigonometric-and-hyperbolic-functions-stmicroelectronics.pdf

use crate::{
    Error, Q, Word,
    fixed::{import, round_shr},
};
use num_traits::{Signed, Zero};

include!(concat!(env!("OUT_DIR"), "/cordic_tables.rs"));

/// Guard bits carried below the fractional bits inside the engine
pub(crate) const GUARD: u32 = 8;

const ROTATE: bool = false;
const DEROTATE: bool = true;
const CIRCULAR: u8 = 0;
const HYPERBOLIC: u8 = 1;

/// Generic CORDIC
///
/// `x`, `y`, `z` carry `frac` fractional bits. Circular angles are degrees,
/// hyperbolic angles are natural units.
/// Returns the final `(x, y, z)`.
#[inline]
fn cordic<T: Word, const VECTORING: bool, const COORD: u8>(
    mut x: T::Accu,
    mut y: T::Accu,
    mut z: T::Accu,
    frac: u32,
) -> (T::Accu, T::Accu, T::Accu) {
    // Microrotation table
    let a: &[i64] = match COORD {
        CIRCULAR => &CORDIC_CIRCULAR,
        _ => &CORDIC_HYPERBOLIC,
    };
    let zero = T::Accu::zero();
    // Hyperbolic repetition marker
    let mut k = 4;
    for (mut i, &a) in a.iter().enumerate() {
        let a = import::<T>(a, frac);
        // Hyperbolic starts at i = 1
        if COORD == HYPERBOLIC {
            i += 1;
        }
        // Hyperbolic repeats some rotations for convergence
        let repeat = if COORD == HYPERBOLIC && i == k {
            k = 3 * i + 1;
            2
        } else {
            1
        };
        for _ in 0..repeat {
            // "sigma"
            let lower = if VECTORING { y <= zero } else { z >= zero };
            let (dx, dy) = (y >> i, x >> i);
            if lower {
                x = if COORD == CIRCULAR { x - dx } else { x + dx };
                y = y + dy;
                z = z - a;
            } else {
                x = if COORD == CIRCULAR { x + dx } else { x - dx };
                y = y - dy;
                z = z + a;
            }
        }
    }
    (x, y, z)
}

/// Move a word into the engine precision
#[inline(always)]
pub(crate) fn guard<T: Word>(x: T) -> T::Accu {
    x.widen() << GUARD as usize
}

/// Round an engine value back to the word precision
#[inline(always)]
pub(crate) fn unguard<T: Word>(x: T::Accu) -> Result<T, Error> {
    T::checked_narrow(round_shr(x, GUARD)).ok_or(Error::Overflow)
}

/// Round an engine value back to the word precision, clamping
#[inline(always)]
fn saturate<T: Word>(x: T::Accu) -> T {
    T::saturating_narrow(round_shr(x, GUARD))
}

/// Integer `value` with `frac` fractional bits
#[inline(always)]
pub(crate) fn units<T: Word>(value: i32, frac: u32) -> T::Accu {
    T::accu((value as i128) << frac)
}

/// Circular rotation of `(x, 0)` by `z` degrees.
///
/// `z` is reduced modulo 360 and folded into [-90, 90] where the
/// microrotations converge.
pub(crate) fn rotate<T: Word>(x: T::Accu, z: T::Accu, frac: u32) -> (T::Accu, T::Accu) {
    let half = units::<T>(180, frac);
    let quarter = units::<T>(90, frac);
    let full = half + half;
    let mut z = z % full;
    if z >= half {
        z = z - full;
    } else if z < -half {
        z = z + full;
    }
    let flip = z > quarter || z < -quarter;
    if z > quarter {
        z = z - half;
    } else if z < -quarter {
        z = z + half;
    }
    let (x, y, _) = cordic::<T, ROTATE, CIRCULAR>(x, T::Accu::zero(), z, frac);
    if flip { (-x, -y) } else { (x, y) }
}

/// Rectangular components of `(r, z)`.
///
/// `z` is the angle in degrees with `F + GUARD` fractional bits.
pub(crate) fn rotate_polar<T: Word, const F: u32>(
    r: Q<T, F>,
    z: T::Accu,
) -> Result<(Q<T, F>, Q<T, F>), Error> {
    let frac = F + GUARD;
    let x = round_shr(
        r.widen() * import::<T>(CORDIC_CIRCULAR_SCALE, frac),
        F,
    );
    let (x, y) = rotate::<T>(x, z, frac);
    Ok((Q::new(unguard::<T>(x)?), Q::new(unguard::<T>(y)?)))
}

/// Circular vectoring of `(x, y)` folded into the right half plane.
///
/// Returns the unscaled magnitude and the angle of the ratio `y/x` in
/// degrees, within (-90, 90].
pub(crate) fn vectoring<T: Word>(x: T::Accu, y: T::Accu, frac: u32) -> (T::Accu, T::Accu) {
    let zero = T::Accu::zero();
    let (x, y) = if x < zero { (-x, -y) } else { (x, y) };
    let (x, _, z) = cordic::<T, DEROTATE, CIRCULAR>(x, y, zero, frac);
    (x, z)
}

/// Hyperbolic rotation of `(x, y)` by `z`, `|z| <= 1.118`
pub(crate) fn hyperbolic_rotate<T: Word>(
    x: T::Accu,
    y: T::Accu,
    z: T::Accu,
    frac: u32,
) -> (T::Accu, T::Accu) {
    let (x, y, _) = cordic::<T, ROTATE, HYPERBOLIC>(x, y, z, frac);
    (x, y)
}

/// Hyperbolic vectoring of `(x, y)`, `|y| < 0.8 |x|`
///
/// Returns the unscaled magnitude and `atanh(y/x)`.
pub(crate) fn hyperbolic_vectoring<T: Word>(
    x: T::Accu,
    y: T::Accu,
    frac: u32,
) -> (T::Accu, T::Accu) {
    let zero = T::Accu::zero();
    let (x, y) = if x < zero { (-x, -y) } else { (x, y) };
    let (x, _, z) = cordic::<T, DEROTATE, HYPERBOLIC>(x, y, zero, frac);
    (x, z)
}

/// Largest `|z|` the hyperbolic microrotations converge for
pub(crate) fn hyperbolic_range<T: Word, const F: u32>() -> Q<T, F> {
    Q::from_q32(CORDIC_HYPERBOLIC_RANGE)
}

/// Gain correct an engine magnitude into the word precision
fn descale<T: Word>(x: T::Accu, scale: i64, frac: u32) -> Result<T, Error> {
    T::checked_narrow(round_shr(
        round_shr(x, GUARD) * import::<T>(scale, frac),
        frac,
    ))
    .ok_or(Error::Overflow)
}

/// Returns `(cos(theta), sin(theta))`, `theta` in degrees.
///
/// Error: below `6.2e-5 + 2**-F` per component (15 microrotations).
/// Components clamp to the word range, which only applies if `F` leaves no
/// integer bit.
///
/// ```
/// use cordic_fft::{Q32, cos_sin};
/// let (c, s) = cos_sin(Q32::<16>::from_int(60));
/// assert!((c.to_f64() - 0.5).abs() < 1e-4);
/// assert!((s.to_f64() - 0.75f64.sqrt()).abs() < 1e-4);
/// ```
pub fn cos_sin<T: Word, const F: u32>(theta: Q<T, F>) -> (Q<T, F>, Q<T, F>) {
    let frac = F + GUARD;
    let (x, y) = rotate::<T>(
        import::<T>(CORDIC_CIRCULAR_SCALE, frac),
        guard(theta.inner),
        frac,
    );
    (Q::new(saturate::<T>(x)), Q::new(saturate::<T>(y)))
}

/// Angle of the negative or positive x axis with `frac` fractional bits
fn axis_angle<T: Word>(x: T, frac: u32) -> T::Accu {
    if x < T::zero() {
        units::<T>(180, frac)
    } else {
        T::Accu::zero()
    }
}

/// Full quadrant vectoring of `(x, y)`, `y != 0`.
///
/// Returns the unscaled magnitude and the angle in degrees within
/// (-180, 180], both with `frac` fractional bits.
fn vectoring_full<T: Word>(y: T, x: T, frac: u32) -> (T::Accu, T::Accu) {
    let (r, mut z) = vectoring::<T>(guard(x), guard(y), frac);
    if x < T::zero() {
        let half = units::<T>(180, frac);
        z = if y < T::zero() { z - half } else { z + half };
        if z > half {
            z = z - half - half;
        } else if z <= -half {
            z = z + half + half;
        }
    }
    (r, z)
}

/// Angle of `(x, y)` in degrees within (-180, 180]
pub(crate) fn angle<T: Word, const F: u32>(y: Q<T, F>, x: Q<T, F>) -> Result<Q<T, F>, Error> {
    let frac = F + GUARD;
    let z = if y.inner.is_zero() {
        axis_angle(x.inner, frac)
    } else {
        vectoring_full(y.inner, x.inner, frac).1
    };
    unguard::<T>(z).map(Q::new)
}

/// Returns `(sqrt(x**2 + y**2), atan2(y, x))` with the angle in degrees
/// within (-180, 180].
///
/// Fails with [`Error::Overflow`] if the magnitude or the angle is not
/// representable, e.g. angles beyond 128 degrees in `Q32<24>`.
///
/// Error: angle below `0.0036` degrees, magnitude within 1 LSB plus
/// `1e-6` relative.
pub fn hypot_atan2<T: Word, const F: u32>(
    y: Q<T, F>,
    x: Q<T, F>,
) -> Result<(Q<T, F>, Q<T, F>), Error> {
    let frac = F + GUARD;
    let (r, z) = if y.inner.is_zero() {
        let r = T::checked_narrow(x.widen().abs()).ok_or(Error::Overflow);
        (r, axis_angle(x.inner, frac))
    } else {
        let (r, z) = vectoring_full(y.inner, x.inner, frac);
        (descale::<T>(r, CORDIC_CIRCULAR_SCALE, frac), z)
    };
    match (r, unguard::<T>(z)) {
        (Ok(r), Ok(z)) => Ok((Q::new(r), Q::new(z))),
        _ => {
            log::debug!("hypot_atan2({}, {}) overflow", y, x);
            Err(Error::Overflow)
        }
    }
}

/// Returns `(cosh(v), sinh(v))` for `|v| <= 1.118`.
///
/// Larger arguments are outside the domain, see [`crate::cosh`] and
/// [`crate::sinh`] for the full range.
///
/// Error: below `1.1e-4` per component.
pub fn cosh_sinh<T: Word, const F: u32>(v: Q<T, F>) -> Result<(Q<T, F>, Q<T, F>), Error> {
    if v.abs() > hyperbolic_range() {
        return Err(Error::Domain);
    }
    let frac = F + GUARD;
    let (x, y) = hyperbolic_rotate::<T>(
        import::<T>(CORDIC_HYPERBOLIC_SCALE, frac),
        T::Accu::zero(),
        guard(v.inner),
        frac,
    );
    Ok((Q::new(unguard::<T>(x)?), Q::new(unguard::<T>(y)?)))
}

/// Returns `(sqrt(x**2 - y**2), atanh(y/x))` for `|y| <= 0.806 |x|`.
///
/// Larger ratios are outside the domain, see [`crate::atanh2`] for the
/// full domain.
pub fn sqrt_atanh2<T: Word, const F: u32>(
    y: Q<T, F>,
    x: Q<T, F>,
) -> Result<(Q<T, F>, Q<T, F>), Error> {
    // 25/31 < tanh(1.118)
    if y.widen().abs() * T::accu(31) > x.widen().abs() * T::accu(25) {
        return Err(Error::Domain);
    }
    let frac = F + GUARD;
    let (r, z) = hyperbolic_vectoring::<T>(guard(x.inner), guard(y.inner), frac);
    Ok((
        Q::new(descale::<T>(r, CORDIC_HYPERBOLIC_SCALE, frac)?),
        Q::new(unguard::<T>(z)?),
    ))
}
