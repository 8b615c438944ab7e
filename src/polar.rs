use crate::{
    Error, Q, Word,
    cordic::{guard, hypot_atan2, rotate_polar},
};
use serde::{Deserialize, Serialize};

/// A point in both rectangular and polar form
///
/// The conversions update one pair from the other in place. If the result
/// is not representable they fail and leave the point unchanged.
///
/// ```
/// use cordic_fft::{Coordinates, Q32};
/// let mut c = Coordinates::<i32, 16>::default();
/// c.x = Q32::from_int(3);
/// c.y = Q32::from_int(4);
/// c.rectangular_to_polar().unwrap();
/// assert!((c.r.to_f64() - 5.0).abs() < 1e-4);
/// assert!((c.theta.to_f64() - 53.1301).abs() < 4e-3);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates<T, const F: u32> {
    /// Abscissa
    pub x: Q<T, F>,
    /// Ordinate
    pub y: Q<T, F>,
    /// Angle in degrees within (-180, 180]
    pub theta: Q<T, F>,
    /// Magnitude
    pub r: Q<T, F>,
}

impl<T: Word, const F: u32> Coordinates<T, F> {
    /// From rectangular components
    pub fn from_rectangular(x: Q<T, F>, y: Q<T, F>) -> Result<Self, Error> {
        let mut c = Self {
            x,
            y,
            theta: Q::zero(),
            r: Q::zero(),
        };
        c.rectangular_to_polar()?;
        Ok(c)
    }

    /// From magnitude and angle in degrees
    pub fn from_polar(r: Q<T, F>, theta: Q<T, F>) -> Result<Self, Error> {
        let mut c = Self {
            x: Q::zero(),
            y: Q::zero(),
            theta,
            r,
        };
        c.polar_to_rectangular()?;
        Ok(c)
    }

    /// Update `r` and `theta` from `x` and `y`
    pub fn rectangular_to_polar(&mut self) -> Result<(), Error> {
        (self.r, self.theta) = hypot_atan2(self.y, self.x)?;
        Ok(())
    }

    /// Update `x` and `y` from `r` and `theta`
    pub fn polar_to_rectangular(&mut self) -> Result<(), Error> {
        (self.x, self.y) = rotate_polar(self.r, guard(self.theta.inner))?;
        Ok(())
    }
}
