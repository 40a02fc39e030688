//! Arithmetic operator sugar for terms
//!
//! `Term ⊕ Term` builds a binary node. Mixing a term with a raw constant
//! builds a unary node whose closure captures the constant, so no constant
//! leaf is allocated. Compound assignment rebinds the left-hand binding to a
//! new node wrapping its previous value.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::term::Term;

macro_rules! impl_term_ops {
    ($($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt;)*) => {$(
        impl<T> $trait for Term<T>
        where
            T: $trait<Output = T> + 'static,
        {
            type Output = Term<T>;

            fn $method(self, rhs: Term<T>) -> Term<T> {
                Term::binary(self, rhs, |a, b| a $op b)
            }
        }

        impl<T> $trait<&Term<T>> for Term<T>
        where
            T: $trait<Output = T> + 'static,
        {
            type Output = Term<T>;

            fn $method(self, rhs: &Term<T>) -> Term<T> {
                self $op rhs.clone()
            }
        }

        impl<T> $trait<Term<T>> for &Term<T>
        where
            T: $trait<Output = T> + 'static,
        {
            type Output = Term<T>;

            fn $method(self, rhs: Term<T>) -> Term<T> {
                self.clone() $op rhs
            }
        }

        impl<T> $trait<&Term<T>> for &Term<T>
        where
            T: $trait<Output = T> + 'static,
        {
            type Output = Term<T>;

            fn $method(self, rhs: &Term<T>) -> Term<T> {
                self.clone() $op rhs.clone()
            }
        }

        impl<T> $assign_trait for Term<T>
        where
            T: $trait<Output = T> + 'static,
        {
            fn $assign_method(&mut self, rhs: Term<T>) {
                *self = self.clone() $op rhs;
            }
        }

        impl<T> $assign_trait<&Term<T>> for Term<T>
        where
            T: $trait<Output = T> + 'static,
        {
            fn $assign_method(&mut self, rhs: &Term<T>) {
                *self = self.clone() $op rhs.clone();
            }
        }
    )*};
}

impl_term_ops! {
    Add, add, AddAssign, add_assign, +;
    Sub, sub, SubAssign, sub_assign, -;
    Mul, mul, MulAssign, mul_assign, *;
    Div, div, DivAssign, div_assign, /;
}

// The orphan rule rules out `impl<T> Add<Term<T>> for T`, so the scalar forms
// are generated per primitive.
macro_rules! impl_scalar_op {
    ($scalar:ty; $($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt;)*) => {$(
        impl $trait<$scalar> for Term<$scalar> {
            type Output = Term<$scalar>;

            fn $method(self, rhs: $scalar) -> Term<$scalar> {
                Term::unary(self, move |a| a $op rhs)
            }
        }

        impl $trait<$scalar> for &Term<$scalar> {
            type Output = Term<$scalar>;

            fn $method(self, rhs: $scalar) -> Term<$scalar> {
                self.clone() $op rhs
            }
        }

        impl $trait<Term<$scalar>> for $scalar {
            type Output = Term<$scalar>;

            fn $method(self, rhs: Term<$scalar>) -> Term<$scalar> {
                Term::unary(rhs, move |b| self $op b)
            }
        }

        impl $trait<&Term<$scalar>> for $scalar {
            type Output = Term<$scalar>;

            fn $method(self, rhs: &Term<$scalar>) -> Term<$scalar> {
                self $op rhs.clone()
            }
        }

        impl $assign_trait<$scalar> for Term<$scalar> {
            fn $assign_method(&mut self, rhs: $scalar) {
                *self = self.clone() $op rhs;
            }
        }
    )*};
}

macro_rules! impl_scalar_ops {
    ($($scalar:ty),* $(,)?) => {$(
        impl_scalar_op! {
            $scalar;
            Add, add, AddAssign, add_assign, +;
            Sub, sub, SubAssign, sub_assign, -;
            Mul, mul, MulAssign, mul_assign, *;
            Div, div, DivAssign, div_assign, /;
        }
    )*};
}

impl_scalar_ops!(f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl<T> Neg for Term<T>
where
    T: Neg<Output = T> + 'static,
{
    type Output = Term<T>;

    fn neg(self) -> Term<T> {
        Term::unary(self, |a| -a)
    }
}

impl<T> Neg for &Term<T>
where
    T: Neg<Output = T> + 'static,
{
    type Output = Term<T>;

    fn neg(self) -> Term<T> {
        -self.clone()
    }
}
