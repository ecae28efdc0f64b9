/// Selects one of two items depending on the limb width.
///
/// The first item is compiled for 32-bit limbs, the second for 64-bit limbs
/// (`u64_digit` feature).
macro_rules! cfg_digit {
    ($item32:item $item64:item) => {
        #[cfg(not(feature = "u64_digit"))]
        $item32

        #[cfg(feature = "u64_digit")]
        $item64
    };
}

macro_rules! forward_val_val_binop {
    (impl $imp:ident for $res:ty, $method:ident) => {
        impl $imp<$res> for $res {
            type Output = $res;

            #[inline]
            fn $method(self, other: $res) -> $res {
                // forward to ref-ref
                $imp::$method(&self, &other)
            }
        }
    };
}

macro_rules! forward_val_ref_binop {
    (impl $imp:ident for $res:ty, $method:ident) => {
        impl<'a> $imp<&'a $res> for $res {
            type Output = $res;

            #[inline]
            fn $method(self, other: &$res) -> $res {
                // forward to ref-ref
                $imp::$method(&self, other)
            }
        }
    };
}

macro_rules! forward_ref_val_binop {
    (impl $imp:ident for $res:ty, $method:ident) => {
        impl<'a> $imp<$res> for &'a $res {
            type Output = $res;

            #[inline]
            fn $method(self, other: $res) -> $res {
                // forward to ref-ref
                $imp::$method(self, &other)
            }
        }
    };
}

macro_rules! forward_all_binop_to_ref_ref {
    (impl $imp:ident for $res:ty, $method:ident) => {
        forward_val_val_binop!(impl $imp for $res, $method);
        forward_val_ref_binop!(impl $imp for $res, $method);
        forward_ref_val_binop!(impl $imp for $res, $method);
    };
}

macro_rules! forward_val_assign {
    (impl $imp:ident for $res:ty, $method:ident) => {
        impl $imp<$res> for $res {
            #[inline]
            fn $method(&mut self, other: $res) {
                self.$method(&other);
            }
        }
    };
}

/// Implements a binary operator and its assigning form for a primitive
/// right-hand side by converting it to `Mpz` first.
macro_rules! forward_scalar_binop {
    (impl $imp:ident<$scalar:ty> for $res:ty, $method:ident, $assign_imp:ident, $assign:ident) => {
        impl $imp<$scalar> for $res {
            type Output = $res;

            #[inline]
            fn $method(self, other: $scalar) -> $res {
                $imp::$method(&self, &<$res>::from(other))
            }
        }

        impl<'a> $imp<$scalar> for &'a $res {
            type Output = $res;

            #[inline]
            fn $method(self, other: $scalar) -> $res {
                $imp::$method(self, &<$res>::from(other))
            }
        }

        impl $assign_imp<$scalar> for $res {
            #[inline]
            fn $assign(&mut self, other: $scalar) {
                self.$assign(&<$res>::from(other));
            }
        }
    };
}
