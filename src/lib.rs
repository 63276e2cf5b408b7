//! Functional-programming building blocks: a lazily started, re-runnable
//! asynchronous [`Task`] with its Functor/Applicative/Monad combinators and
//! Semigroup/Monoid lifts, plus pure sequence helpers in [`array`].

pub mod algebra;
pub mod array;
pub mod config;
pub mod either;
pub mod error;
pub mod io;
pub mod log;
pub mod task;
pub mod util;

pub use either::{Either, Left, Right};
pub use error::{Error, Result};
pub use io::Io;
pub use task::Task;
