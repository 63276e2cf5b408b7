//! Semigroup, Monoid and Order dictionaries.
//!
//! These are values, not traits on the element type: the same `String`
//! can be combined by [`StringConcat`], [`First`] or [`Last`], and the
//! caller picks which one to hand to [`crate::task::get_semigroup`] or
//! [`crate::array::sort`].
//!
//! # Laws
//!
//! - `concat` is associative: `concat(concat(x, y), z) == concat(x, concat(y, z))`
//! - `empty` is an identity: `concat(empty(), x) == x == concat(x, empty())`
//! - `compare` is a total order

use std::cmp::Ordering;
use std::marker::PhantomData;

/// An associative combining operation over `A`.
pub trait Semigroup<A> {
    fn concat(&self, x: A, y: A) -> A;
}

/// A [`Semigroup`] with an identity element.
pub trait Monoid<A>: Semigroup<A> {
    fn empty(&self) -> A;
}

/// A total order over `A`.
pub trait Order<A> {
    fn compare(&self, x: &A, y: &A) -> Ordering;
}

impl<A, S: Semigroup<A> + ?Sized> Semigroup<A> for &S {
    fn concat(&self, x: A, y: A) -> A {
        (**self).concat(x, y)
    }
}

impl<A, M: Monoid<A> + ?Sized> Monoid<A> for &M {
    fn empty(&self) -> A {
        (**self).empty()
    }
}

impl<A, O: Order<A> + ?Sized> Order<A> for &O {
    fn compare(&self, x: &A, y: &A) -> Ordering {
        (**self).compare(x, y)
    }
}

/// Concatenate every item, starting from the monoid's identity.
pub fn concat_all<A, M, I>(monoid: &M, items: I) -> A
where
    M: Monoid<A> + ?Sized,
    I: IntoIterator<Item = A>,
{
    items
        .into_iter()
        .fold(monoid.empty(), |acc, a| monoid.concat(acc, a))
}

// ========== Stock instances ==========

/// Left-to-right string concatenation.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringConcat;

impl Semigroup<String> for StringConcat {
    fn concat(&self, mut x: String, y: String) -> String {
        x.push_str(&y);
        x
    }
}

impl Monoid<String> for StringConcat {
    fn empty(&self) -> String {
        String::new()
    }
}

/// Left-to-right vector concatenation.
#[derive(Debug, Clone, Copy, Default)]
pub struct VecConcat;

impl<T> Semigroup<Vec<T>> for VecConcat {
    fn concat(&self, mut x: Vec<T>, mut y: Vec<T>) -> Vec<T> {
        x.append(&mut y);
        x
    }
}

impl<T> Monoid<Vec<T>> for VecConcat {
    fn empty(&self) -> Vec<T> {
        Vec::new()
    }
}

/// Numeric addition.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sum;

/// Numeric multiplication.
#[derive(Debug, Clone, Copy, Default)]
pub struct Product;

macro_rules! numeric_monoids {
    ($($t:ty),*) => {
        $(
            impl Semigroup<$t> for Sum {
                fn concat(&self, x: $t, y: $t) -> $t {
                    x + y
                }
            }

            impl Monoid<$t> for Sum {
                fn empty(&self) -> $t {
                    0 as $t
                }
            }

            impl Semigroup<$t> for Product {
                fn concat(&self, x: $t, y: $t) -> $t {
                    x * y
                }
            }

            impl Monoid<$t> for Product {
                fn empty(&self) -> $t {
                    1 as $t
                }
            }
        )*
    };
}

numeric_monoids!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Keeps the first value.
#[derive(Debug, Clone, Copy, Default)]
pub struct First;

impl<A> Semigroup<A> for First {
    fn concat(&self, x: A, _y: A) -> A {
        x
    }
}

/// Keeps the last value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Last;

impl<A> Semigroup<A> for Last {
    fn concat(&self, _x: A, y: A) -> A {
        y
    }
}

/// Keeps the greater value (the first one on ties).
#[derive(Debug, Clone, Copy, Default)]
pub struct Max;

impl<A: Ord> Semigroup<A> for Max {
    fn concat(&self, x: A, y: A) -> A {
        if y > x {
            y
        } else {
            x
        }
    }
}

/// Keeps the lesser value (the first one on ties).
#[derive(Debug, Clone, Copy, Default)]
pub struct Min;

impl<A: Ord> Semigroup<A> for Min {
    fn concat(&self, x: A, y: A) -> A {
        if y < x {
            y
        } else {
            x
        }
    }
}

/// The element type's own [`Ord`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Natural;

impl<A: Ord> Order<A> for Natural {
    fn compare(&self, x: &A, y: &A) -> Ordering {
        x.cmp(y)
    }
}

/// Flips an order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reversed<O>(pub O);

impl<A, O: Order<A>> Order<A> for Reversed<O> {
    fn compare(&self, x: &A, y: &A) -> Ordering {
        self.0.compare(y, x)
    }
}

// ========== Closure adapters ==========

/// A semigroup or order backed by a closure.
#[derive(Clone, Copy)]
pub struct FromFn<F>(F);

impl<A, F: Fn(A, A) -> A> Semigroup<A> for FromFn<F> {
    fn concat(&self, x: A, y: A) -> A {
        (self.0)(x, y)
    }
}

impl<A, F: Fn(&A, &A) -> Ordering> Order<A> for FromFn<F> {
    fn compare(&self, x: &A, y: &A) -> Ordering {
        (self.0)(x, y)
    }
}

pub fn semigroup_from_fn<A, F: Fn(A, A) -> A>(f: F) -> FromFn<F> {
    FromFn(f)
}

pub fn ord_from_fn<A, F: Fn(&A, &A) -> Ordering>(f: F) -> FromFn<F> {
    FromFn(f)
}

/// A monoid from a closure and an identity value.
pub struct FnMonoid<A, F> {
    empty: A,
    concat: F,
    _marker: PhantomData<fn(A) -> A>,
}

impl<A: Clone, F: Fn(A, A) -> A> Semigroup<A> for FnMonoid<A, F> {
    fn concat(&self, x: A, y: A) -> A {
        (self.concat)(x, y)
    }
}

impl<A: Clone, F: Fn(A, A) -> A> Monoid<A> for FnMonoid<A, F> {
    fn empty(&self) -> A {
        self.empty.clone()
    }
}

pub fn monoid_from_fn<A: Clone, F: Fn(A, A) -> A>(empty: A, concat: F) -> FnMonoid<A, F> {
    FnMonoid {
        empty,
        concat,
        _marker: PhantomData,
    }
}
