//! Just the `XY` type.

use core::{
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
};

/// A position or size on the character grid, with an X and a Y component.
///
/// Addition and subtraction work elementwise with other `XY`s (`XY(2, 3) + XY(4, 5) == XY(6, 8)`) and with
/// scalars (`XY(2, 3) + 1 == XY(3, 4)`).
///
/// As a position, `XY(0, 0)` is the top left of the screen and `XY(0, 1)` is just below it.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct XY(pub usize, pub usize);

impl XY {
    /// The X component
    pub const fn x(&self) -> usize {
        self.0
    }

    /// The Y component
    pub const fn y(&self) -> usize {
        self.1
    }
}

macro_rules! xy_op {
    ( $(
        $trait:ident($fn:ident) => $op:tt $assn_op:tt
    );* $(;)? ) => {
        $(
            impl $trait for XY {
                type Output = XY;
                fn $fn(self, rhs: XY) -> XY {
                    XY(self.0 $op rhs.0, self.1 $op rhs.1)
                }
            }

            impl $trait<usize> for XY {
                type Output = XY;
                fn $fn(self, rhs: usize) -> XY {
                    XY(self.0 $op rhs, self.1 $op rhs)
                }
            }

            paste::paste! {
                impl [< $trait Assign >] for XY {
                    fn [< $fn _assign >] (&mut self, rhs: XY) {
                        self.0 $assn_op rhs.0;
                        self.1 $assn_op rhs.1;
                    }
                }
            }
        )*
    };
}

xy_op! {
    Add(add) => + +=;
    Sub(sub) => - -=;
}

impl fmt::Debug for XY {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "XY({}, {})", self.0, self.1)
    }
}

impl From<(u16, u16)> for XY {
    fn from(f: (u16, u16)) -> XY {
        XY(f.0 as usize, f.1 as usize)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ops_are_elementwise() {
        assert_eq!(XY(2, 3) + XY(4, 5), XY(6, 8));
        assert_eq!(XY(8, 6) - 2, XY(6, 4));
        let mut pos = XY(1, 1);
        pos += XY(2, 0);
        assert_eq!(pos, XY(3, 1));
    }

    #[test]
    fn debug_names_the_type() {
        assert_eq!(format!("{:?}", XY(3, 4)), "XY(3, 4)");
    }
}
