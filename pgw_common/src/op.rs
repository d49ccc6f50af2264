//! Small helper macro for implementing the standard arithmetic traits on newtype wrappers over a single numeric
//! field. Keeps the operator boilerplate in the money module down to one line per trait.

#[macro_export]
macro_rules! op {
    (binary $t:ty, $trait:ident, $fn:ident) => {
        impl std::ops::$trait for $t {
            type Output = Self;

            fn $fn(self, rhs: Self) -> Self::Output {
                Self(std::ops::$trait::$fn(self.0, rhs.0))
            }
        }
    };
    (inplace $t:ty, $trait:ident, $fn:ident) => {
        impl std::ops::$trait for $t {
            fn $fn(&mut self, rhs: Self) {
                std::ops::$trait::$fn(&mut self.0, rhs.0)
            }
        }
    };
    (unary $t:ty, $trait:ident, $fn:ident) => {
        impl std::ops::$trait for $t {
            type Output = Self;

            fn $fn(self) -> Self::Output {
                Self(std::ops::$trait::$fn(self.0))
            }
        }
    };
}
