#![cfg_attr(not(any(test, doctest, feature = "std")), no_std)]
#![doc = include_str!("../README.md")]

mod fixed;
pub use fixed::*;
mod error;
pub use error::*;
mod complex;
pub use complex::*;
mod cordic;
pub use cordic::{
    CORDIC_CIRCULAR_GAIN, CORDIC_HYPERBOLIC_GAIN, cos_sin, cosh_sinh, hypot_atan2, sqrt_atanh2,
};
mod trig;
pub use trig::*;
mod hyperbolic;
pub use hyperbolic::*;
mod sqrt;
pub use sqrt::*;
mod polar;
pub use polar::*;
mod fft;
pub use fft::{
    Fft, MAX_FFT_LEN, Rounding, add_tone, bit_reverse, fft, fft_unchecked, ifft, ifft_unchecked,
};

#[cfg(test)]
pub mod testing;
