use crate::{
    Error, Q, Word,
    cordic::{
        CORDIC_HYPERBOLIC_SCALE, EULER, EULER_INV, GUARD, LN_2, cosh_sinh, guard,
        hyperbolic_range, hyperbolic_rotate, hyperbolic_vectoring, sqrt_atanh2, unguard, units,
    },
    fixed::{import, round_shr},
    sqrt::sqrt,
    trig::hypotenuse,
};
use num_traits::{CheckedMul, Signed, Zero};

/// Fractional bits of a constant multiplying a guarded value without
/// overflowing the accumulator
fn precision<T: Word>(frac: u32) -> u32 {
    (T::zero().count_zeros() - GUARD).min(frac)
}

/// `e**r` with `frac` fractional bits, `-1.118 < r < 1.118`
fn exp_reduced<T: Word>(r: T::Accu, frac: u32) -> T::Accu {
    if r.is_zero() {
        return units::<T>(1, frac);
    }
    let (x, y) = hyperbolic_rotate::<T>(
        import::<T>(CORDIC_HYPERBOLIC_SCALE, frac),
        T::Accu::zero(),
        r,
        frac,
    );
    x + y
}

/// `e**v` for `v <= 0` with `F + GUARD` fractional bits
fn exp_neg<T: Word, const F: u32>(v: Q<T, F>) -> T::Accu {
    let frac = F + GUARD;
    // v = n + r, r in [-1, 0)
    let n = v.floor() + T::one();
    let mut e = exp_reduced::<T>(guard((v - Q::from_int(n)).inner), frac);
    let p = precision::<T>(frac);
    let c = import::<T>(EULER_INV, p);
    let mut k = -n;
    while k > T::zero() && !e.is_zero() {
        e = round_shr(e * c, p);
        k = k - T::one();
    }
    e
}

/// Exponential
///
/// The integer part is applied by repeated multiplication with `e`.
///
/// Error: below `2e-4` relative plus one LSB.
///
/// ```
/// use cordic_fft::{Q32, exp};
/// let e = exp(Q32::<16>::one()).unwrap();
/// assert!((e.to_f64() - core::f64::consts::E).abs() < 1e-3);
/// assert!(exp(Q32::<16>::from_int(11)).is_err());
/// ```
pub fn exp<T: Word, const F: u32>(v: Q<T, F>) -> Result<Q<T, F>, Error> {
    let frac = F + GUARD;
    let overflow = || {
        log::debug!("exp({}) overflow", v);
        Error::Overflow
    };
    let e = if v.is_negative() {
        exp_neg(v)
    } else {
        // v = n + r, r in [0, 1)
        let n = v.floor();
        let mut e = exp_reduced::<T>(guard((v - Q::from_int(n)).inner), frac);
        let p = precision::<T>(frac);
        let c = import::<T>(EULER, p);
        let mut k = n;
        while k > T::zero() {
            e = round_shr(e.checked_mul(&c).ok_or_else(overflow)?, p);
            k = k - T::one();
        }
        e
    };
    T::checked_narrow(round_shr(e, GUARD))
        .map(Q::new)
        .ok_or_else(overflow)
}

/// Natural logarithm
///
/// The argument is scaled into `[1/e, e]` by powers of `e` before
/// `ln(x) = 2 atanh((x - 1)/(x + 1))`.
///
/// Error: below `2.5e-4`.
pub fn ln<T: Word, const F: u32>(v: Q<T, F>) -> Result<Q<T, F>, Error> {
    if !v.is_positive() {
        log::debug!("ln of non-positive {}", v);
        return Err(Error::Domain);
    }
    let frac = F + GUARD;
    let p = precision::<T>(frac);
    let (e, ei) = (import::<T>(EULER, frac), import::<T>(EULER_INV, frac));
    let (ep, eip) = (import::<T>(EULER, p), import::<T>(EULER_INV, p));
    let mut x = guard(v.inner);
    let mut k = 0;
    while x > e {
        x = round_shr(x * eip, p);
        k += 1;
    }
    while x < ei {
        x = round_shr(x * ep, p);
        k -= 1;
    }
    let one = units::<T>(1, frac);
    let z = if x == one {
        T::Accu::zero()
    } else {
        hyperbolic_vectoring::<T>(x + one, x - one, frac).1
    };
    Ok(Q::new(unguard::<T>(z + z + units::<T>(k, frac))?))
}

/// `ln(v)` of a positive accumulator value with `F` fractional bits.
///
/// Returned with `F + GUARD` fractional bits. A value beyond the word is
/// halved and `ln(2)` added back.
fn ln_accu<T: Word, const F: u32>(v: T::Accu) -> Result<T::Accu, Error> {
    if let Some(v) = T::checked_narrow(v) {
        return Ok(guard(ln(Q::<T, F>::new(v))?.inner));
    }
    let h = T::checked_narrow(v >> 1).ok_or(Error::Overflow)?;
    Ok(guard(ln(Q::<T, F>::new(h))?.inner) + import::<T>(LN_2, F + GUARD))
}

/// Power `b**e = exp(e ln(b))`
///
/// `0**e` is zero for positive `e`. Other non-positive bases are outside
/// the domain.
///
/// Error: that of [`exp`] with the error of [`ln`] scaled by `e`.
pub fn pow<T: Word, const F: u32>(b: Q<T, F>, e: Q<T, F>) -> Result<Q<T, F>, Error> {
    if b.inner.is_zero() && e.is_positive() {
        return Ok(b);
    }
    let l = ln(b)?;
    exp(e.checked_mul(l).ok_or(Error::Overflow)?)
}

/// Mean of two guarded values, rounded
fn mean<T: Word, const F: u32>(a: T::Accu, b: T::Accu) -> Result<Q<T, F>, Error> {
    T::checked_narrow(round_shr(a + b, GUARD + 1))
        .map(Q::new)
        .ok_or(Error::Overflow)
}

/// `(e**a / 2, e**-a / 2)` with `F + GUARD` fractional bits, `a >= 1`.
///
/// Halving before exponentiating keeps `e**a` representable wherever
/// `cosh(a)` is.
fn exp_pair<T: Word, const F: u32>(a: Q<T, F>) -> Result<(T::Accu, T::Accu), Error> {
    let h = exp(a - Q::from_q32(LN_2))?;
    Ok((guard(h.inner), round_shr(exp_neg(-a), 1)))
}

/// Hyperbolic sine
///
/// Error: below `3e-4 cosh(v)` plus two LSB.
pub fn sinh<T: Word, const F: u32>(v: Q<T, F>) -> Result<Q<T, F>, Error> {
    let a = v.abs();
    if a <= hyperbolic_range() {
        return Ok(cosh_sinh(v)?.1);
    }
    let (h, hi) = exp_pair(a)?;
    let s = Q::new(unguard::<T>(h - hi)?);
    Ok(if v.is_negative() { -s } else { s })
}

/// Hyperbolic cosine
///
/// Error: below `3e-4 cosh(v)` plus two LSB.
pub fn cosh<T: Word, const F: u32>(v: Q<T, F>) -> Result<Q<T, F>, Error> {
    let a = v.abs();
    if a <= hyperbolic_range() {
        return Ok(cosh_sinh(v)?.0);
    }
    let (h, hi) = exp_pair(a)?;
    Ok(Q::new(unguard::<T>(h + hi)?))
}

/// Hyperbolic tangent
///
/// Error: below `2e-4`.
///
/// ```
/// use cordic_fft::{Q32, tanh};
/// assert!((tanh(Q32::<16>::from_f64(0.5)).to_f64() - 0.5f64.tanh()).abs() < 2e-4);
/// assert!((tanh(Q32::<16>::from_int(-100)).to_f64() + 1.0).abs() < 2e-4);
/// ```
pub fn tanh<T: Word, const F: u32>(v: Q<T, F>) -> Q<T, F> {
    if let Ok((c, s)) = cosh_sinh(v) {
        return s / c;
    }
    let frac = F + GUARD;
    let p = precision::<T>(frac);
    // (1 - e**-2a)/(1 + e**-2a)
    let e = exp_neg(-v.abs());
    let e = round_shr(e * round_shr(e, frac - p), p);
    let one = units::<T>(1, frac);
    let t = Q::new(T::saturating_narrow(((one - e) << F as usize) / (one + e)));
    if v.is_negative() { -t } else { t }
}

/// Inverse hyperbolic tangent of the ratio `y/x`, `|y| < |x|`
///
/// Ratios beyond the microrotation range use
/// `(ln(x + y) - ln(x - y))/2`.
///
/// Error: below `3e-4`.
pub fn atanh2<T: Word, const F: u32>(y: Q<T, F>, x: Q<T, F>) -> Result<Q<T, F>, Error> {
    let (yw, xw) = (y.widen(), x.widen());
    if yw.abs() >= xw.abs() {
        log::debug!("atanh2 of {}/{}", y, x);
        return Err(Error::Domain);
    }
    if y.inner.is_zero() {
        return Ok(y);
    }
    if yw.abs() * T::accu(5) <= xw.abs() * T::accu(4) {
        let (_, z) = hyperbolic_vectoring::<T>(guard(x.inner), guard(y.inner), F + GUARD);
        return Ok(Q::new(unguard::<T>(z)?));
    }
    let (yw, xw) = if x.is_negative() { (-yw, -xw) } else { (yw, xw) };
    let a = ln_accu::<T, F>(xw + yw)?;
    let b = ln_accu::<T, F>(xw - yw)?;
    mean::<T, F>(a, -b)
}

/// Inverse hyperbolic tangent, `|v| < 1`
pub fn atanh<T: Word, const F: u32>(v: Q<T, F>) -> Result<Q<T, F>, Error> {
    atanh2(v, Q::one())
}

/// Inverse hyperbolic sine
///
/// Error: below `3e-4`.
pub fn asinh<T: Word, const F: u32>(v: Q<T, F>) -> Result<Q<T, F>, Error> {
    let a = v.abs();
    // sqrt(a**2 + 1) rounds to a where it does not fit
    let h = hypotenuse(a, Q::one()).unwrap_or(a);
    let s = Q::new(unguard::<T>(ln_accu::<T, F>(a.widen() + h.widen())?)?);
    Ok(if v.is_negative() { -s } else { s })
}

/// Inverse hyperbolic cosine, `v >= 1`
///
/// Error: below `3e-4`.
pub fn acosh<T: Word, const F: u32>(v: Q<T, F>) -> Result<Q<T, F>, Error> {
    let one = Q::one();
    if v < one {
        log::debug!("acosh of {} below 1", v);
        return Err(Error::Domain);
    }
    // sqrt(v**2 - 1), by vectoring where it converges
    let s = if v.widen() * T::accu(4) >= one.widen() * T::accu(5) {
        // Rounds to v where it does not fit
        sqrt_atanh2(one, v).map_or(v, |(r, _)| r)
    } else {
        sqrt((v - one) * (v + one))?
    };
    Ok(Q::new(unguard::<T>(ln_accu::<T, F>(
        v.widen() + s.widen(),
    )?)?))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Q32, testing::isclose};
    use quickcheck_macros::quickcheck;

    type Q16 = Q32<16>;
    const LSB: f64 = crate::testing::lsb::<16>();

    fn grid(a: f64, b: f64, n: usize) -> impl Iterator<Item = f64> {
        (0..=n).map(move |i| a + (b - a) * i as f64 / n as f64)
    }

    #[test]
    fn exponential() {
        for v in grid(-10.0, 10.0, 400) {
            let q = Q16::from_f64(v);
            let e0 = q.to_f64().exp();
            let e = exp(q).unwrap().to_f64();
            assert!(isclose(e, e0, 2e-4, LSB), "{v}: {e} {e0}");
        }
        assert_eq!(exp(Q16::zero()), Ok(Q16::one()));
        assert_eq!(exp(Q16::from_int(11)), Err(Error::Overflow));
        assert_eq!(exp(Q16::from_int(-20)), Ok(Q16::zero()));
        assert_eq!(exp(Q16::from_int(-30000)), Ok(Q16::zero()));
    }

    #[test]
    fn logarithm() {
        let mut max: f64 = 0.0;
        for v in grid(0.01, 3.0, 300).chain(grid(3.0, 30000.0, 300)) {
            let q = Q16::from_f64(v);
            let d = (ln(q).unwrap().to_f64() - q.to_f64().ln()).abs();
            max = max.max(d);
        }
        log::info!("max ln error {max:.3e}");
        assert!(max < 2.5e-4);
        assert_eq!(ln(Q16::one()), Ok(Q16::zero()));
        assert_eq!(ln(Q16::zero()), Err(Error::Domain));
        assert_eq!(ln(-Q16::one()), Err(Error::Domain));
    }

    #[test]
    fn roundtrip() {
        for v in grid(-2.0, 10.0, 120) {
            let q = Q16::from_f64(v);
            let r = ln(exp(q).unwrap()).unwrap();
            assert!((r.to_f64() - q.to_f64()).abs() < 5e-4, "{v}");
        }
        for v in grid(0.5, 1000.0, 120) {
            let q = Q16::from_f64(v);
            let r = exp(ln(q).unwrap()).unwrap();
            assert!((r.to_f64() - q.to_f64()).abs() < 5e-4 * v + 2.0 * LSB, "{v}");
        }
    }

    #[test]
    fn sinh_cosh() {
        for v in grid(-9.0, 9.0, 360) {
            let q = Q16::from_f64(v);
            let (s0, c0) = (q.to_f64().sinh(), q.to_f64().cosh());
            let s = sinh(q).unwrap().to_f64();
            let c = cosh(q).unwrap().to_f64();
            assert!((s - s0).abs() <= 3e-4 * c0 + 2.0 * LSB, "{v}: {s} {s0}");
            assert!((c - c0).abs() <= 3e-4 * c0 + 2.0 * LSB, "{v}: {c} {c0}");
        }
        // e**11 is beyond the word, cosh(11) is not
        let c = cosh(Q16::from_int(11)).unwrap().to_f64();
        assert!((c - 11f64.cosh()).abs() <= 3e-4 * c);
        let s = sinh(Q16::from_int(-11)).unwrap().to_f64();
        assert!((s - (-11f64).sinh()).abs() <= 3e-4 * c);
        assert_eq!(cosh(Q16::from_int(12)), Err(Error::Overflow));
        assert_eq!(sinh(Q16::from_int(-12)), Err(Error::Overflow));
    }

    #[test]
    fn hyperbolic_tangent() {
        for v in grid(-20.0, 20.0, 400) {
            let q = Q16::from_f64(v);
            let t = tanh(q).to_f64();
            assert!((t - q.to_f64().tanh()).abs() < 2e-4, "{v}");
        }
    }

    #[test]
    fn inverse() {
        for v in grid(-0.95, 0.95, 190) {
            let q = Q16::from_f64(v);
            let a = atanh(q).unwrap().to_f64();
            assert!((a - q.to_f64().atanh()).abs() < 3e-4, "{v}");
        }
        let q = Q16::from_f64(0.999);
        assert!((atanh(q).unwrap().to_f64() - q.to_f64().atanh()).abs() < 3e-4);
        let (y, x) = (Q16::from_int(-3), Q16::from_int(-4));
        assert!((atanh2(y, x).unwrap().to_f64() - 0.75f64.atanh()).abs() < 3e-4);
        assert_eq!(atanh(Q16::one()), Err(Error::Domain));
        assert_eq!(atanh2(Q16::one(), Q16::zero()), Err(Error::Domain));
        assert_eq!(atanh2(-Q16::one(), Q16::one()), Err(Error::Domain));

        for v in grid(-100.0, 100.0, 400) {
            let q = Q16::from_f64(v);
            let a = asinh(q).unwrap().to_f64();
            assert!((a - q.to_f64().asinh()).abs() < 3e-4, "{v}");
        }
        for v in grid(1.1, 100.0, 400) {
            let q = Q16::from_f64(v);
            let a = acosh(q).unwrap().to_f64();
            assert!((a - q.to_f64().acosh()).abs() < 3e-4, "{v}");
        }
        assert_eq!(acosh(Q16::one()), Ok(Q16::zero()));
        assert_eq!(acosh(Q16::from_f64(0.5)), Err(Error::Domain));
    }

    #[test]
    fn word_limits() {
        let (min, max) = (Q16::new(i32::MIN), Q16::new(i32::MAX));
        assert_eq!(tanh(min), -Q16::one());
        assert_eq!(tanh(max), Q16::one());
        assert_eq!(sinh(min), Err(Error::Overflow));
        assert_eq!(sinh(max), Err(Error::Overflow));
        assert_eq!(cosh(min), Err(Error::Overflow));
        assert_eq!(exp(min), Ok(Q16::zero()));
        assert_eq!(exp(max), Err(Error::Overflow));
        assert_eq!(pow(max, Q16::from_int(2)), Err(Error::Overflow));

        let l = ln(max).unwrap().to_f64();
        assert!((l - max.to_f64().ln()).abs() < 2.5e-4);
        let l = ln(Q16::new(1)).unwrap().to_f64();
        assert!((l - LSB.ln()).abs() < 2.5e-4);

        for v in [min, max] {
            let a = asinh(v).unwrap().to_f64();
            assert!((a - v.to_f64().asinh()).abs() < 3e-4, "{v}");
        }
        let a = acosh(max).unwrap().to_f64();
        assert!((a - max.to_f64().acosh()).abs() < 3e-4);

        assert_eq!(atanh(min), Err(Error::Domain));
        assert_eq!(atanh2(min, Q16::one()), Err(Error::Domain));
        assert_eq!(atanh2(min, max), Err(Error::Domain));
        // x + y does not fit the word
        let a = atanh2(Q16::new(i32::MIN + 1), min).unwrap().to_f64();
        assert!((a - 0.5 * (2f64.powi(32) - 1.0).ln()).abs() < 3e-4);
        let a = atanh2(Q16::one(), min).unwrap().to_f64();
        assert!((a + (1.0 / 32768f64).atanh()).abs() <= 3.0 * LSB);
    }

    #[test]
    fn integer_bits() {
        // Q32<24> covers [-128, 128[
        type Q24 = Q32<24>;
        let lsb = crate::testing::lsb::<24>();
        let (min, max) = (Q24::new(i32::MIN), Q24::new(i32::MAX));
        for v in [-10.0, -1.5, 0.5, 3.0, 4.8] {
            let q = Q24::from_f64(v);
            let e = exp(q).unwrap().to_f64();
            assert!(isclose(e, q.to_f64().exp(), 2e-4, lsb), "{v}");
        }
        assert_eq!(exp(Q24::from_f64(4.86)), Err(Error::Overflow));
        assert_eq!(exp(min), Ok(Q24::zero()));
        assert_eq!(exp(max), Err(Error::Overflow));

        for v in [-5.5, -2.0, 1.5, 5.0, 5.54] {
            let q = Q24::from_f64(v);
            let (s0, c0) = (q.to_f64().sinh(), q.to_f64().cosh());
            let s = sinh(q).unwrap().to_f64();
            let c = cosh(q).unwrap().to_f64();
            assert!((s - s0).abs() <= 3e-4 * c0 + 2.0 * lsb, "{v}: {s} {s0}");
            assert!((c - c0).abs() <= 3e-4 * c0 + 2.0 * lsb, "{v}: {c} {c0}");
        }
        assert_eq!(sinh(Q24::from_f64(5.55)), Err(Error::Overflow));
        assert_eq!(cosh(min), Err(Error::Overflow));

        assert_eq!(tanh(min), -Q24::one());
        assert_eq!(tanh(max), Q24::one());
        let l = ln(max).unwrap().to_f64();
        assert!((l - max.to_f64().ln()).abs() < 2.5e-4);
        let l = ln(Q24::new(1)).unwrap().to_f64();
        assert!((l - lsb.ln()).abs() < 2.5e-4);
    }

    #[test]
    fn power() {
        let p = pow(Q16::from_int(2), Q16::from_int(10)).unwrap().to_f64();
        assert!((p - 1024.0).abs() < 2e-3 * 1024.0);
        let p = pow(Q16::from_int(9), Q16::from_f64(0.5)).unwrap().to_f64();
        assert!((p - 3.0).abs() < 1e-3);
        let p = pow(Q16::from_int(4), Q16::from_f64(-1.5)).unwrap().to_f64();
        assert!((p - 0.125).abs() < 1e-3);
        assert_eq!(pow(Q16::zero(), Q16::from_int(2)), Ok(Q16::zero()));
        assert_eq!(pow(Q16::zero(), Q16::zero()), Err(Error::Domain));
        assert_eq!(pow(Q16::from_int(-2), Q16::from_int(2)), Err(Error::Domain));
        assert_eq!(pow(Q16::from_int(10), Q16::from_int(5)), Err(Error::Overflow));
    }

    #[quickcheck]
    fn check_exp_monotonic(a: i16, b: i16) -> bool {
        let (a, b) = (Q32::<8>::new(a as i32), Q32::<8>::new(b as i32));
        match (exp(a), exp(b)) {
            (Ok(ea), Ok(eb)) => (a <= b) <= (ea <= eb),
            _ => true,
        }
    }
}
