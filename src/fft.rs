use crate::{
    Complex, Error, Q, Word,
    cordic::{GUARD, rotate_polar},
    fixed::{import, round_shr},
};
use miniconf::Tree;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

include!(concat!(env!("OUT_DIR"), "/fft_tables.rs"));

/// Largest supported transform length
pub const MAX_FFT_LEN: usize = 1 << TWIDDLE_DEPTH;

/// Fractional bits of the twiddle factors in the accumulator
fn twiddle_bits<T: Word>() -> u32 {
    T::zero().count_zeros() - 8
}

/// `a * b` with `p` fractional bits in `b`
#[inline(always)]
fn cmul<A: num_traits::PrimInt>(a: [A; 2], b: [A; 2], p: u32) -> [A; 2] {
    [
        round_shr(a[0] * b[0] - a[1] * b[1], p),
        round_shr(a[0] * b[1] + a[1] * b[0], p),
    ]
}

/// In-place bit-reversal permutation.
///
/// An involution for power of two lengths.
pub fn bit_reverse<C>(x: &mut [C]) {
    let n = x.len();
    if n < 2 {
        return;
    }
    let mut j = n >> 1;
    for i in 1..n - 1 {
        if i < j {
            x.swap(i, j);
        }
        let mut k = n >> 1;
        while k > 0 && k <= j {
            j -= k;
            k >>= 1;
        }
        j += k;
    }
}

/// Radix-2 decimation in time forward FFT, in place, unscaled.
///
/// The length must be a power of two not above [`MAX_FFT_LEN`]. The output
/// grows by up to the length: leave `log2(N)` bits of headroom.
pub fn fft_unchecked<T: Word, const F: u32>(x: &mut [Complex<Q<T, F>>]) {
    let n = x.len();
    bit_reverse(x);
    let p = twiddle_bits::<T>();
    let mut half = 1;
    for l in 0..TWIDDLE_DEPTH {
        if half >= n {
            break;
        }
        // w = exp(-i pi/half)
        let w = [
            import::<T>(TWIDDLE_COS[l], p),
            -import::<T>(TWIDDLE_SIN[l], p),
        ];
        let mut u = [T::Accu::one() << p as usize, T::Accu::zero()];
        for j in 0..half {
            for i in (j..n).step_by(half << 1) {
                let ip = i + half;
                let t = cmul(x[ip].0.map(Q::widen), u, p);
                let [a, b] = x[i].0.map(Q::widen);
                x[ip] = Complex::new(
                    Q::new(T::narrow(a - t[0])),
                    Q::new(T::narrow(b - t[1])),
                );
                x[i] = Complex::new(
                    Q::new(T::narrow(a + t[0])),
                    Q::new(T::narrow(b + t[1])),
                );
            }
            u = cmul(u, w, p);
        }
        half <<= 1;
    }
}

/// Inverse FFT output rounding
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::AsRefStr,
    strum::IntoStaticStr,
)]
pub enum Rounding {
    /// Round half up
    #[default]
    Nearest,
    /// Integer division towards zero
    Truncate,
}

impl Rounding {
    /// Divide by `1 << m`
    fn scale<T: Word>(&self, v: T, m: u32) -> T {
        match self {
            Self::Nearest => round_shr(v, m),
            Self::Truncate => v / (T::one() << m as usize),
        }
    }
}

/// Inverse FFT, in place.
///
/// Conjugate, forward transform, conjugate and divide by the length.
/// Same preconditions as [`fft_unchecked`].
pub fn ifft_unchecked<T: Word, const F: u32>(x: &mut [Complex<Q<T, F>>], rounding: Rounding) {
    for v in x.iter_mut() {
        *v = v.conj();
    }
    fft_unchecked(x);
    let m = x.len().trailing_zeros();
    for v in x.iter_mut() {
        *v = Complex(v.conj().0.map(|q| Q::new(rounding.scale(q.inner, m))));
    }
}

fn validate(n: usize) -> Result<(), Error> {
    if !n.is_power_of_two() || n > MAX_FFT_LEN {
        log::debug!("invalid transform length {n}");
        return Err(Error::InvalidSize(n));
    }
    Ok(())
}

/// Forward FFT of a power of two length
///
/// ```
/// use cordic_fft::{Complex, Q32, fft};
/// let mut x = [Complex::new(Q32::<16>::one(), Q32::zero()); 8];
/// fft(&mut x).unwrap();
/// assert_eq!(x[0].re(), Q32::from_int(8));
/// assert!(x[1..].iter().all(|c| c.re().inner.abs() <= 1 && c.im().inner.abs() <= 1));
/// assert!(fft(&mut x[..6]).is_err());
/// ```
pub fn fft<T: Word, const F: u32>(x: &mut [Complex<Q<T, F>>]) -> Result<(), Error> {
    validate(x.len())?;
    fft_unchecked(x);
    Ok(())
}

/// Inverse FFT of a power of two length
pub fn ifft<T: Word, const F: u32>(
    x: &mut [Complex<Q<T, F>>],
    rounding: Rounding,
) -> Result<(), Error> {
    validate(x.len())?;
    ifft_unchecked(x, rounding);
    Ok(())
}

/// Add a sine tone of `amplitude` completing `bin` cycles over the buffer
/// to the real part.
///
/// `x[i].re += amplitude * sin(2 pi bin i / N)`
///
/// Returns [`Error::Overflow`] if a sum leaves the word. Elements before
/// the failing one have already been updated.
pub fn add_tone<T: Word, const F: u32>(
    x: &mut [Complex<Q<T, F>>],
    bin: usize,
    amplitude: Q<T, F>,
) -> Result<(), Error> {
    let n = x.len();
    let frac = F + GUARD;
    for (i, v) in x.iter_mut().enumerate() {
        let phase = tone_phase(bin, i, n);
        let z = T::accu(((360 * phase as i128) << frac) / n as i128);
        let (_, s) = rotate_polar(amplitude, z)?;
        let re = T::checked_add(&v.0[0].inner, &s.inner).ok_or_else(|| {
            log::debug!("tone sum overflow at {}", i);
            Error::Overflow
        })?;
        v.0[0] = Q::new(re);
    }
    Ok(())
}

/// `bin i mod n` without overflowing `usize`
fn tone_phase(bin: usize, i: usize, n: usize) -> u128 {
    (bin as u128 % n as u128) * i as u128 % n as u128
}

/// Transform settings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Tree)]
pub struct Fft {
    /// Inverse transform output rounding
    #[tree(with=miniconf::leaf)]
    pub rounding: Rounding,
    /// Check the transform length before transforming
    pub validate: bool,
}

impl Default for Fft {
    fn default() -> Self {
        Self {
            rounding: Rounding::default(),
            validate: true,
        }
    }
}

impl Fft {
    /// Forward transform
    pub fn forward<T: Word, const F: u32>(&self, x: &mut [Complex<Q<T, F>>]) -> Result<(), Error> {
        if self.validate {
            fft(x)
        } else {
            fft_unchecked(x);
            Ok(())
        }
    }

    /// Inverse transform
    pub fn inverse<T: Word, const F: u32>(&self, x: &mut [Complex<Q<T, F>>]) -> Result<(), Error> {
        if self.validate {
            ifft(x, self.rounding)
        } else {
            ifft_unchecked(x, self.rounding);
            Ok(())
        }
    }
}
