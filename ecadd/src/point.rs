//! Points on P-256 in affine coordinates.

use ecadd_fields::{p256::P256, Field, FieldError};

use crate::Share;

/// The coefficient `b` of the curve equation `y^2 = x^3 - 3x + b`, big-endian.
const CURVE_B: [u8; 32] = [
    0x5a, 0xc6, 0x35, 0xd8, 0xaa, 0x3a, 0x93, 0xe7, 0xb3, 0xeb, 0xbd, 0x55, 0x76, 0x98, 0x86, 0xbc,
    0x65, 0x1d, 0x06, 0xb0, 0xcc, 0x53, 0xb0, 0xf6, 0x3b, 0xce, 0x3c, 0x3e, 0x27, 0xd2, 0x60, 0x4b,
];

/// A cleartext point in affine coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    /// The x-coordinate.
    pub x: P256,
    /// The y-coordinate.
    pub y: P256,
}

impl Point {
    /// Creates a new point from its coordinates.
    pub fn new(x: P256, y: P256) -> Self {
        Self { x, y }
    }

    /// Creates a point from canonical big-endian coordinates.
    pub fn from_be_bytes(x: [u8; 32], y: [u8; 32]) -> Result<Self, FieldError> {
        Ok(Self {
            x: P256::try_from(x)?,
            y: P256::try_from(y)?,
        })
    }

    /// Returns `true` if the point satisfies the curve equation.
    pub fn is_on_curve(&self) -> bool {
        let b = P256::from_be_bytes_mod_order(&CURVE_B);
        let three = P256::from(3u64);

        self.y * self.y == self.x * self.x * self.x - three * self.x + b
    }
}

/// A point with secret-shared coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SharedPoint<F> {
    /// Share of the x-coordinate.
    pub x: Share<F>,
    /// Share of the y-coordinate.
    pub y: Share<F>,
}
