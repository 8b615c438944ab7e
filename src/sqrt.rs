use crate::{Error, Q, Word};
use num_traits::{One, Zero};

/// Square root, rounded to nearest.
///
/// Binary search: find the power of two bracketing the root, then refine
/// one bit per step in the accumulator until the step reaches one LSB.
/// `0` and `1` are returned exactly.
///
/// ```
/// use cordic_fft::{Q32, sqrt};
/// assert_eq!(sqrt(Q32::<16>::from_int(9)), Ok(Q32::from_int(3)));
/// assert!(sqrt(Q32::<16>::from_int(-1)).is_err());
/// ```
pub fn sqrt<T: Word, const F: u32>(x: Q<T, F>) -> Result<Q<T, F>, Error> {
    if x.is_negative() {
        log::debug!("sqrt of negative {}", x);
        return Err(Error::Domain);
    }
    if x.inner.is_zero() || x == Q::one() {
        return Ok(x);
    }
    // Root of `x << F` has F fractional bits
    let target = x.widen() << F as usize;
    let mut y = T::Accu::one() << F as usize;
    if y * y <= target {
        while (y << 1) * (y << 1) <= target {
            y = y << 1;
        }
    } else {
        while y * y > target {
            y = y >> 1;
        }
    }
    let mut delta = y >> 1;
    while !delta.is_zero() {
        let t = y + delta;
        if t * t <= target {
            y = t;
        }
        delta = delta >> 1;
    }
    // (y + 1/2)**2 = y**2 + y + 1/4
    if target - y * y > y {
        y = y + T::Accu::one();
    }
    Ok(Q::new(T::narrow(y)))
}
