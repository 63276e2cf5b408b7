//! Disjoint union of a failure (`Left`) and a success (`Right`).
//!
//! `Either` is what [`crate::task::try_catch`] resolves to, and what
//! [`crate::array::partition_map`], [`crate::array::lefts`] and
//! [`crate::array::rights`] split on.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Either<L, R> {
    Left(L),
    Right(R),
}

pub use Either::{Left, Right};

pub fn left<L, R>(l: L) -> Either<L, R> {
    Left(l)
}

pub fn right<L, R>(r: R) -> Either<L, R> {
    Right(r)
}

impl<L, R> Either<L, R> {
    /// Dispatch on whichever branch is populated.
    pub fn fold<B>(self, on_left: impl FnOnce(L) -> B, on_right: impl FnOnce(R) -> B) -> B {
        match self {
            Left(l) => on_left(l),
            Right(r) => on_right(r),
        }
    }

    pub fn is_left(&self) -> bool {
        matches!(self, Left(_))
    }

    pub fn is_right(&self) -> bool {
        matches!(self, Right(_))
    }

    pub fn left(self) -> Option<L> {
        match self {
            Left(l) => Some(l),
            Right(_) => None,
        }
    }

    pub fn right(self) -> Option<R> {
        match self {
            Left(_) => None,
            Right(r) => Some(r),
        }
    }

    pub fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Left(l) => Left(l),
            Right(r) => Right(r),
        }
    }

    pub fn map<B>(self, f: impl FnOnce(R) -> B) -> Either<L, B> {
        match self {
            Left(l) => Left(l),
            Right(r) => Right(f(r)),
        }
    }

    pub fn map_left<B>(self, f: impl FnOnce(L) -> B) -> Either<B, R> {
        match self {
            Left(l) => Left(f(l)),
            Right(r) => Right(r),
        }
    }

    pub fn chain<B>(self, f: impl FnOnce(R) -> Either<L, B>) -> Either<L, B> {
        match self {
            Left(l) => Left(l),
            Right(r) => f(r),
        }
    }

    pub fn swap(self) -> Either<R, L> {
        match self {
            Left(l) => Right(l),
            Right(r) => Left(r),
        }
    }

    pub fn into_result(self) -> Result<R, L> {
        match self {
            Left(l) => Err(l),
            Right(r) => Ok(r),
        }
    }
}

impl<L, R> From<Result<R, L>> for Either<L, R> {
    fn from(result: Result<R, L>) -> Self {
        match result {
            Ok(r) => Right(r),
            Err(l) => Left(l),
        }
    }
}
