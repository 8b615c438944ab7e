use crate::{
    Error, Q, Word,
    cordic::{angle, cos_sin},
    fixed::round_shr,
    trig::hypotenuse,
};
use core::ops::{Add, Mul};

/// A complex number in cartesian coordinates
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Complex<T>(
    /// Real and imaginary parts
    pub [T; 2],
);

impl<T: Copy> Complex<T> {
    /// Create a new `Complex<T>`
    pub const fn new(re: T, im: T) -> Self {
        Self([re, im])
    }

    /// The real part
    pub fn re(&self) -> T {
        self.0[0]
    }

    /// The imaginary part
    pub fn im(&self) -> T {
        self.0[1]
    }
}

impl<T: Copy + core::ops::Neg<Output = T>> Complex<T> {
    /// Conjugate
    pub fn conj(self) -> Self {
        Self([self.0[0], -self.0[1]])
    }
}

macro_rules! fwd_binop {
    ($tr:ident::$meth:ident) => {
        impl<T: Copy + core::ops::$tr<Output = T>> core::ops::$tr for Complex<T> {
            type Output = Self;
            fn $meth(self, rhs: Self) -> Self {
                Self([self.0[0].$meth(rhs.0[0]), self.0[1].$meth(rhs.0[1])])
            }
        }
    };
}
fwd_binop!(Add::add);
fwd_binop!(Sub::sub);

macro_rules! fwd_binop_inner {
    ($tr:ident::$meth:ident) => {
        impl<T: Copy + core::ops::$tr<Output = T>> core::ops::$tr<T> for Complex<T> {
            type Output = Self;
            fn $meth(self, rhs: T) -> Self {
                Self([self.0[0].$meth(rhs), self.0[1].$meth(rhs)])
            }
        }
    };
}
fwd_binop_inner!(Mul::mul);
fwd_binop_inner!(Div::div);

macro_rules! fwd_unop {
    ($tr:ident::$meth:ident) => {
        impl<T: Copy + core::ops::$tr<Output = T>> core::ops::$tr for Complex<T> {
            type Output = Self;
            fn $meth(self) -> Self {
                Self([self.0[0].$meth(), self.0[1].$meth()])
            }
        }
    };
}
fwd_unop!(Neg::neg);

/// Both cross sums are formed in the accumulator and rounded once. The
/// result wraps like the storage word.
impl<T: Word, const F: u32> Mul for Complex<Q<T, F>> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        let [a, b] = self.0.map(Q::widen);
        let [c, d] = rhs.0.map(Q::widen);
        Self([
            Q::new(T::narrow(round_shr(a * c - b * d, F))),
            Q::new(T::narrow(round_shr(a * d + b * c, F))),
        ])
    }
}

impl<T> core::iter::Sum for Complex<T>
where
    Self: Default + Add<Output = Self>,
{
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Default::default(), |c, i| c + i)
    }
}

impl<T: Word, const F: u32> Complex<Q<T, F>> {
    /// Return a Complex on the unit circle given an angle in degrees.
    ///
    /// Example:
    ///
    /// ```
    /// use cordic_fft::{Complex, Q32};
    /// let c = Complex::from_angle(Q32::<16>::from_int(90));
    /// assert!(c.re().inner.abs() < 8);
    /// assert!((c.im().to_f64() - 1.0).abs() < 1e-4);
    /// ```
    pub fn from_angle(angle: Q<T, F>) -> Self {
        let (c, s) = cos_sin(angle);
        Self::new(c, s)
    }

    /// Return the absolute square (the squared magnitude).
    ///
    /// ```
    /// use cordic_fft::{Complex, Q32};
    /// let c = Complex::new(Q32::<16>::from_int(3), Q32::from_int(-4));
    /// assert_eq!(c.norm_sqr(), Ok(Q32::from_int(25)));
    /// ```
    pub fn norm_sqr(&self) -> Result<Q<T, F>, Error> {
        let [x, y] = self.0.map(Q::widen);
        T::checked_narrow(round_shr(x * x + y * y, F))
            .map(Q::new)
            .ok_or(Error::Overflow)
    }

    /// Return the magnitude.
    pub fn abs(&self) -> Result<Q<T, F>, Error> {
        hypotenuse(self.im(), self.re())
    }

    /// Return the angle in degrees within (-180, 180].
    ///
    /// ```
    /// use cordic_fft::{Complex, Q32};
    /// assert_eq!(Complex::new(Q32::<16>::zero(), Q32::zero()).arg(), Ok(Q32::zero()));
    /// let z = Complex::new(Q32::<16>::zero(), Q32::one()).arg().unwrap();
    /// assert!((z.to_f64() - 90.0).abs() < 4e-3);
    /// ```
    pub fn arg(&self) -> Result<Q<T, F>, Error> {
        angle(self.im(), self.re())
    }
}

impl<T: Word, const F: u32> From<num_complex::Complex<f64>> for Complex<Q<T, F>> {
    fn from(value: num_complex::Complex<f64>) -> Self {
        Self::new(Q::from_f64(value.re), Q::from_f64(value.im))
    }
}

impl<T: Word, const F: u32> From<Complex<Q<T, F>>> for num_complex::Complex<f64> {
    fn from(value: Complex<Q<T, F>>) -> Self {
        Self::new(value.re().to_f64(), value.im().to_f64())
    }
}
