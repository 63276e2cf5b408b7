//! Synchronous effects that declare no failure mode.
//!
//! An [`Io`] is a recipe for a side effect: nothing happens until
//! [`Io::run`] is called, and every call runs the effect again.

use std::fmt;
use std::sync::Arc;

pub struct Io<A> {
    effect: Arc<dyn Fn() -> A + Send + Sync>,
}

impl<A> Clone for Io<A> {
    fn clone(&self) -> Self {
        Self {
            effect: Arc::clone(&self.effect),
        }
    }
}

impl<A> fmt::Debug for Io<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Io(<effect>)")
    }
}

impl<A: 'static> Io<A> {
    pub fn new<F>(effect: F) -> Self
    where
        F: Fn() -> A + Send + Sync + 'static,
    {
        Self {
            effect: Arc::new(effect),
        }
    }

    /// Execute the effect.
    pub fn run(&self) -> A {
        (self.effect)()
    }

    pub fn map<B: 'static>(&self, f: impl Fn(A) -> B + Send + Sync + 'static) -> Io<B> {
        let io = self.clone();
        Io::new(move || f(io.run()))
    }

    pub fn chain<B: 'static>(&self, f: impl Fn(A) -> Io<B> + Send + Sync + 'static) -> Io<B> {
        let io = self.clone();
        Io::new(move || f(io.run()).run())
    }
}

impl<A: Clone + Send + Sync + 'static> Io<A> {
    pub fn of(value: A) -> Self {
        Io::new(move || value.clone())
    }
}
