use core::{
    fmt::{self, Debug},
    iter,
    ops::{Add, Div, Mul, Neg, Sub},
};
use num_traits::{PrimInt, Signed, float::FloatCore};
use serde::{Deserialize, Serialize};

/// Storage word of a fixed point number
///
/// Ties a signed integer to the double width accumulator that all products
/// and quotients are formed in before they are shifted back.
pub trait Word: PrimInt + Signed + Default + Debug + Send + Sync + 'static {
    /// Double width accumulator
    type Accu: PrimInt + Signed + Debug;

    /// Lossless widening
    fn widen(self) -> Self::Accu;

    /// Truncating narrowing
    fn narrow(accu: Self::Accu) -> Self;

    /// Narrowing that fails if the value does not fit
    fn checked_narrow(accu: Self::Accu) -> Option<Self>;

    /// Narrowing that clamps to the word range
    fn saturating_narrow(accu: Self::Accu) -> Self;

    /// Truncating conversion into the accumulator
    fn accu(value: i128) -> Self::Accu;

    /// Truncating conversion from a small integer
    fn from_i32(value: i32) -> Self;

    /// Rounding conversion from a float
    fn from_f64(value: f64) -> Self;

    /// Conversion to float
    fn to_f64(self) -> f64;
}

macro_rules! impl_word {
    ($T:ty, $A:ty) => {
        impl Word for $T {
            type Accu = $A;

            #[inline(always)]
            fn widen(self) -> $A {
                self as $A
            }

            #[inline(always)]
            fn narrow(accu: $A) -> Self {
                accu as $T
            }

            #[inline(always)]
            fn checked_narrow(accu: $A) -> Option<Self> {
                <$T>::try_from(accu).ok()
            }

            #[inline(always)]
            fn saturating_narrow(accu: $A) -> Self {
                accu.clamp(<$T>::MIN as $A, <$T>::MAX as $A) as $T
            }

            #[inline(always)]
            fn accu(value: i128) -> $A {
                value as $A
            }

            #[inline(always)]
            fn from_i32(value: i32) -> Self {
                value as $T
            }

            fn from_f64(value: f64) -> Self {
                FloatCore::round(value) as $T
            }

            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    };
}
impl_word!(i32, i64);
impl_word!(i64, i128);

/// Shift right by `s` rounding half up.
#[inline(always)]
pub(crate) fn round_shr<A: PrimInt>(a: A, s: u32) -> A {
    if s == 0 {
        a
    } else {
        (a + (A::one() << (s - 1) as usize)) >> s as usize
    }
}

/// Import a Q32 table constant with `frac` fractional bits into the accumulator.
#[inline(always)]
pub(crate) fn import<T: Word>(q32: i64, frac: u32) -> T::Accu {
    let v = q32 as i128;
    T::accu(if frac >= 32 {
        v << (frac - 32)
    } else {
        (v + (1 << (31 - frac))) >> (32 - frac)
    })
}

/// Fixed point with F fractional bits.
///
/// * `Q<i32, 16>` covers `[-32768, 32768[` in steps of `2**-16`
/// * `Q<i32, 24>` covers `[-128, 128[`
/// * `Q<i64, 24>` covers `[-2**39, 2**39[`
///
/// Angles are in degrees. Products and quotients are formed in the
/// accumulator of the storage word and rounded back. The operators wrap or
/// panic like those of the storage word; the transcendental functions
/// report results outside the range as [`crate::Error::Overflow`].
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Q<T, const F: u32> {
    /// The inner value representing the fixed point number
    pub inner: T,
}

/// 32 bit fixed point with F fractional bits
pub type Q32<const F: u32> = Q<i32, F>;
/// 64 bit fixed point with F fractional bits
pub type Q64<const F: u32> = Q<i64, F>;

impl<T, const F: u32> Q<T, F> {
    /// Create a new fixed point number from its raw representation
    pub const fn new(inner: T) -> Self {
        Self { inner }
    }
}

impl<T: Word, const F: u32> Q<T, F> {
    /// Zero
    pub fn zero() -> Self {
        Self::new(T::zero())
    }

    /// One
    pub fn one() -> Self {
        Self::from_int(T::one())
    }

    /// Convert an integer
    ///
    /// ```
    /// use cordic_fft::Q32;
    /// assert_eq!(Q32::<16>::from_int(3).inner, 3 << 16);
    /// ```
    pub fn from_int(value: T) -> Self {
        Self::new(value << F as usize)
    }

    /// Import a Q32 constant (rounding, saturating)
    pub(crate) fn from_q32(value: i64) -> Self {
        Self::new(T::saturating_narrow(import::<T>(value, F)))
    }

    /// Scale and quantize a floating point value (rounding)
    pub fn from_f64(value: f64) -> Self {
        Self::new(T::from_f64(value * (1u64 << F) as f64))
    }

    /// Floating point value
    pub fn to_f64(self) -> f64 {
        self.inner.to_f64() / (1u64 << F) as f64
    }

    /// Return the integer part (rounding towards negative infinity)
    pub fn floor(self) -> T {
        self.inner >> F as usize
    }

    /// Absolute value, saturating for the most negative value
    pub fn abs(self) -> Self {
        Self::new(T::saturating_narrow(self.widen().abs()))
    }

    /// Whether the value is strictly negative
    pub fn is_negative(self) -> bool {
        self.inner < T::zero()
    }

    /// Whether the value is strictly positive
    pub fn is_positive(self) -> bool {
        self.inner > T::zero()
    }

    /// Widened raw representation
    pub fn widen(self) -> T::Accu {
        self.inner.widen()
    }

    /// Product that fails instead of wrapping
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        T::checked_narrow(round_shr(self.widen() * rhs.widen(), F)).map(Self::new)
    }

    /// Quotient that fails on division by zero or if the result does not fit
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs.inner.is_zero() {
            return None;
        }
        T::checked_narrow((self.widen() << F as usize) / rhs.widen()).map(Self::new)
    }

    /// Halve (rounding towards negative infinity)
    pub fn half(self) -> Self {
        Self::new(self.inner >> 1)
    }
}

impl<T: Word, const F: u32> Neg for Q<T, F> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.inner)
    }
}

impl<T: Word, const F: u32> Add for Q<T, F> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.inner + rhs.inner)
    }
}

impl<T: Word, const F: u32> Sub for Q<T, F> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.inner - rhs.inner)
    }
}

/// Q*Q -> Q, rounding
impl<T: Word, const F: u32> Mul for Q<T, F> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::new(T::narrow(round_shr(self.widen() * rhs.widen(), F)))
    }
}

/// Q/Q -> Q, truncating
impl<T: Word, const F: u32> Div for Q<T, F> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Self::new(T::narrow((self.widen() << F as usize) / rhs.widen()))
    }
}

impl<T: Word, const F: u32> iter::Sum for Q<T, F> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), |a, b| a + b)
    }
}

impl<T: Word, const F: u32> From<f64> for Q<T, F> {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl<T: Word, const F: u32> From<Q<T, F>> for f64 {
    fn from(value: Q<T, F>) -> Self {
        value.to_f64()
    }
}

impl<T: Word, const F: u32> fmt::Display for Q<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_f64(), f)
    }
}

impl<T: Word, const F: u32> fmt::LowerExp for Q<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerExp::fmt(&self.to_f64(), f)
    }
}
