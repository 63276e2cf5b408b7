//! Deferred asynchronous computations.
//!
//! A [`Task`] is a recipe, not a running computation: it wraps a producer
//! that, each time it is invoked through [`Task::run`], starts a fresh
//! execution and returns its future. Nothing is cached between runs.
//!
//! The future's `Err` arm is the rejection channel. [`Task::map`],
//! [`Task::chain`] and [`ap`] pass rejections through untouched; only
//! [`try_catch`] (and its method form [`Task::attempt`]) turns one into a
//! value.
//!
//! # Sequencing
//!
//! | combinator              | operands start            | settles with              |
//! |-------------------------|---------------------------|---------------------------|
//! | [`Task::chain`]         | second after first        | second's outcome          |
//! | [`ap`] / [`traverse`]   | together                  | both, or first rejection  |
//! | [`get_semigroup`]       | second after first        | `S.concat` of both        |
//! | [`get_race_monoid`]     | together                  | first to settle           |
//!
//! Operands whose outcome is discarded (the losing side of a race, the
//! sibling of a rejected `ap` operand) are not cancelled: they are handed
//! to [`crate::util::detach`] and keep running on the ambient runtime.
//! Tasks built by [`never`] (and `map`/`chain` over one) are known never to
//! settle, so they are dropped instead of detached.
//!
//! # Example
//!
//! ```ignore
//! use fpkit::task::{self, Task};
//!
//! let sum = task::ap(&Task::of(1).map(|a| move |b: i32| a + b), &Task::of(2));
//! assert_eq!(sum.run().await.unwrap(), 3);
//! ```

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};

use crate::algebra::{Monoid, Semigroup};
use crate::either::{Either, Left, Right};
use crate::io::Io;
use crate::util::detach;
use crate::{fplog_debug, fplog_trace, Error, Result};

/// The future a [`Task`] produces when run.
pub type TaskFuture<A> = BoxFuture<'static, Result<A>>;

/// A lazily started, re-runnable asynchronous computation.
pub struct Task<A> {
    producer: Arc<dyn Fn() -> TaskFuture<A> + Send + Sync>,
    /// Set only for Tasks whose future can never settle.
    never: bool,
}

impl<A> Clone for Task<A> {
    fn clone(&self) -> Self {
        Self {
            producer: Arc::clone(&self.producer),
            never: self.never,
        }
    }
}

impl<A> fmt::Debug for Task<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.never {
            f.write_str("Task(<never>)")
        } else {
            f.write_str("Task(<producer>)")
        }
    }
}

impl<A: Send + 'static> Task<A> {
    /// Wrap a producer. It is invoked once per [`Task::run`].
    pub fn new<F, Fut>(producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<A>> + Send + 'static,
    {
        Self {
            producer: Arc::new(move || producer().boxed()),
            never: false,
        }
    }

    /// Whether this Task is known never to settle (built from [`never`]).
    pub fn is_never(&self) -> bool {
        self.never
    }

    /// Invoke the producer, starting a fresh execution.
    pub fn run(&self) -> TaskFuture<A> {
        (self.producer)()
    }

    /// A Task that rejects with `reason` on every run.
    pub fn rejected(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Task::new(move || future::ready(Err(Error::Rejected(reason.clone()))))
    }

    /// Lift a synchronous effect. The effect runs when the producer is
    /// invoked, not when the future is polled.
    pub fn from_io(io: Io<A>) -> Self {
        Task::new(move || future::ready(Ok(io.run())))
    }

    pub fn map<B, F>(&self, f: F) -> Task<B>
    where
        B: Send + 'static,
        F: Fn(A) -> B + Send + Sync + 'static,
    {
        if self.never {
            return never();
        }
        let task = self.clone();
        let f = Arc::new(f);
        Task::new(move || {
            let fut = task.run();
            let f = Arc::clone(&f);
            async move { fut.await.map(|a| f(a)) }
        })
    }

    /// Run `self`, feed its value to `f`, then run the Task `f` returns.
    ///
    /// The second producer is not invoked until `self` resolves.
    pub fn chain<B, F>(&self, f: F) -> Task<B>
    where
        B: Send + 'static,
        F: Fn(A) -> Task<B> + Send + Sync + 'static,
    {
        if self.never {
            return never();
        }
        let task = self.clone();
        let f = Arc::new(f);
        Task::new(move || {
            let fut = task.run();
            let f = Arc::clone(&f);
            async move {
                let a = fut.await?;
                f(a).run().await
            }
        })
    }

    /// Method form of [`ap`]: apply the function `fab` resolves to.
    pub fn ap<B, F>(&self, fab: &Task<F>) -> Task<B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> B + Send + 'static,
    {
        ap(fab, self)
    }

    /// Run both in parallel, keep this Task's value.
    pub fn ap_first<B: Send + 'static>(&self, other: &Task<B>) -> Task<A> {
        both(self, other).map(|(a, _)| a)
    }

    /// Run both in parallel, keep `other`'s value.
    pub fn ap_second<B: Send + 'static>(&self, other: &Task<B>) -> Task<B> {
        both(self, other).map(|(_, b)| b)
    }

    /// Convert a rejection into `Left(on_rejected(reason))`.
    pub fn attempt<L, R>(&self, on_rejected: R) -> Task<Either<L, A>>
    where
        L: Send + 'static,
        R: Fn(Error) -> L + Send + Sync + 'static,
    {
        let task = self.clone();
        try_catch(move || task.run(), on_rejected)
    }
}

impl<A: Clone + Send + Sync + 'static> Task<A> {
    /// A Task that resolves immediately to a clone of `value`.
    pub fn of(value: A) -> Self {
        Task::new(move || future::ready(Ok(value.clone())))
    }
}

/// Shorthand for [`Task::of`].
pub fn of<A: Clone + Send + Sync + 'static>(value: A) -> Task<A> {
    Task::of(value)
}

/// Shorthand for [`Task::from_io`].
pub fn from_io<A: Send + 'static>(io: Io<A>) -> Task<A> {
    Task::from_io(io)
}

/// A Task whose future never settles.
///
/// Stateless: every call yields an equivalent Task. It is the identity of
/// [`get_race_monoid`].
pub fn never<A: Send + 'static>() -> Task<A> {
    Task {
        never: true,
        ..Task::new(future::pending::<Result<A>>)
    }
}

/// Flatten a Task that resolves to a Task.
pub fn flatten<A: Send + 'static>(tt: &Task<Task<A>>) -> Task<A> {
    tt.chain(|t| t)
}

/// Parallel application.
///
/// Both producers are invoked before either future is awaited. The result
/// settles once both resolve, or with the first rejection observed; the
/// other operand's outcome is then discarded.
pub fn ap<A, B, F>(fab: &Task<F>, fa: &Task<A>) -> Task<B>
where
    A: Send + 'static,
    B: Send + 'static,
    F: FnOnce(A) -> B + Send + 'static,
{
    both(fab, fa).map(|(f, a)| f(a))
}

fn both<A, B>(x: &Task<A>, y: &Task<B>) -> Task<(A, B)>
where
    A: Send + 'static,
    B: Send + 'static,
{
    let (x, y) = (x.clone(), y.clone());
    Task::new(move || settle_both(x.run(), x.never, y.run(), y.never))
}

async fn settle_both<A, B>(
    fx: TaskFuture<A>,
    x_never: bool,
    fy: TaskFuture<B>,
    y_never: bool,
) -> Result<(A, B)>
where
    A: Send + 'static,
    B: Send + 'static,
{
    match future::select(fx, fy).await {
        future::Either::Left((Ok(a), fy)) => Ok((a, fy.await?)),
        future::Either::Right((Ok(b), fx)) => Ok((fx.await?, b)),
        future::Either::Left((Err(e), fy)) => {
            fplog_trace!("ap: left operand rejected first: {}", e);
            if !y_never {
                detach(fy, "ap");
            }
            Err(e)
        }
        future::Either::Right((Err(e), fx)) => {
            fplog_trace!("ap: right operand rejected first: {}", e);
            if !x_never {
                detach(fx, "ap");
            }
            Err(e)
        }
    }
}

/// Run `producer`, resolving to `Right(value)` on success and to
/// `Left(on_rejected(reason))` when its future rejects or it panics.
///
/// The producer's error type is the caller's; it only has to convert into
/// [`Error`] so `on_rejected` sees one reason type. The resulting Task
/// never rejects.
pub fn try_catch<A, E, L, F, Fut, R>(producer: F, on_rejected: R) -> Task<Either<L, A>>
where
    A: Send + 'static,
    E: Into<Error>,
    L: Send + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = std::result::Result<A, E>> + Send + 'static,
    R: Fn(Error) -> L + Send + Sync + 'static,
{
    let on_rejected = Arc::new(on_rejected);
    Task::new(move || {
        let started = std::panic::catch_unwind(AssertUnwindSafe(|| producer()));
        let on_rejected = Arc::clone(&on_rejected);
        async move {
            let outcome: Result<A> = match started {
                Ok(fut) => match AssertUnwindSafe(fut).catch_unwind().await {
                    Ok(Ok(a)) => Ok(a),
                    Ok(Err(e)) => Err(e.into()),
                    Err(payload) => Err(Error::from_panic(payload)),
                },
                Err(payload) => Err(Error::from_panic(payload)),
            };
            Ok(match outcome {
                Ok(a) => Right(a),
                Err(reason) => {
                    fplog_debug!("try_catch: caught {}", reason);
                    Left(on_rejected(reason))
                }
            })
        }
    })
}

/// Map each item to a Task and collect the results in input order.
///
/// Behaves like folding [`ap`] over the items: every element Task starts
/// together and the first rejection settles the whole traversal. The
/// element futures are polled side by side rather than nested, so the
/// stack depth does not grow with the input.
pub fn traverse<A, B, F>(items: &[A], f: F) -> Task<Vec<B>>
where
    B: Send + 'static,
    F: Fn(&A) -> Task<B>,
{
    let tasks: Arc<[Task<B>]> = items.iter().map(f).collect();
    Task::new(move || {
        let never_pending = tasks.iter().any(Task::is_never);
        let pending: FuturesUnordered<_> = tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.never)
            .map(|(i, t)| t.run().map(move |r| (i, r)))
            .collect();
        collect_in_order(pending, tasks.len(), never_pending)
    })
}

async fn collect_in_order<B, Fut>(
    mut pending: FuturesUnordered<Fut>,
    len: usize,
    never_pending: bool,
) -> Result<Vec<B>>
where
    B: Send + 'static,
    Fut: Future<Output = (usize, Result<B>)> + Send + 'static,
{
    let mut slots: Vec<Option<B>> = std::iter::repeat_with(|| None).take(len).collect();
    while let Some((i, settled)) = pending.next().await {
        match settled {
            Ok(b) => slots[i] = Some(b),
            Err(e) => {
                fplog_trace!("traverse: element {} rejected first: {}", i, e);
                if !pending.is_empty() {
                    detach(pending.for_each(|_| future::ready(())), "traverse");
                }
                return Err(e);
            }
        }
    }
    if never_pending {
        return future::pending().await;
    }
    Ok(slots.into_iter().flatten().collect())
}

/// Run every Task in parallel and collect the results in input order.
pub fn sequence<A: Send + 'static>(tasks: &[Task<A>]) -> Task<Vec<A>> {
    traverse(tasks, Task::clone)
}

// ========== Semigroup / Monoid lifting ==========

/// Sequential lift of a [`Semigroup`] over values to one over Tasks.
#[derive(Debug)]
pub struct TaskSemigroup<S> {
    inner: Arc<S>,
}

impl<S> Clone for TaskSemigroup<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, S> Semigroup<Task<A>> for TaskSemigroup<S>
where
    A: Send + 'static,
    S: Semigroup<A> + Send + Sync + 'static,
{
    fn concat(&self, x: Task<A>, y: Task<A>) -> Task<A> {
        let s = Arc::clone(&self.inner);
        Task::new(move || {
            let fx = x.run();
            let y = y.clone();
            let s = Arc::clone(&s);
            async move {
                let rx = fx.await?;
                let ry = y.run().await?;
                Ok(s.concat(rx, ry))
            }
        })
    }
}

/// Combine Tasks by running the first to completion, then the second,
/// then applying `s` to both values.
pub fn get_semigroup<S>(s: S) -> TaskSemigroup<S> {
    TaskSemigroup { inner: Arc::new(s) }
}

/// [`TaskSemigroup`] plus the identity `of(M::empty())`.
#[derive(Debug)]
pub struct TaskMonoid<M> {
    semigroup: TaskSemigroup<M>,
}

impl<M> Clone for TaskMonoid<M> {
    fn clone(&self) -> Self {
        Self {
            semigroup: self.semigroup.clone(),
        }
    }
}

impl<A, M> Semigroup<Task<A>> for TaskMonoid<M>
where
    A: Send + 'static,
    M: Monoid<A> + Send + Sync + 'static,
{
    fn concat(&self, x: Task<A>, y: Task<A>) -> Task<A> {
        self.semigroup.concat(x, y)
    }
}

impl<A, M> Monoid<Task<A>> for TaskMonoid<M>
where
    A: Send + 'static,
    M: Monoid<A> + Send + Sync + 'static,
{
    fn empty(&self) -> Task<A> {
        let m = Arc::clone(&self.semigroup.inner);
        Task::from_io(Io::new(move || m.empty()))
    }
}

pub fn get_monoid<M>(m: M) -> TaskMonoid<M> {
    TaskMonoid {
        semigroup: get_semigroup(m),
    }
}

/// Non-deterministic choice: `concat` settles with whichever operand
/// settles first, `empty` is [`never`].
///
/// A rejection that settles first wins the race just like a value does.
pub struct RaceMonoid<A> {
    _marker: PhantomData<fn() -> A>,
}

impl<A> Clone for RaceMonoid<A> {
    fn clone(&self) -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<A> fmt::Debug for RaceMonoid<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RaceMonoid")
    }
}

impl<A: Send + 'static> Semigroup<Task<A>> for RaceMonoid<A> {
    fn concat(&self, x: Task<A>, y: Task<A>) -> Task<A> {
        race(&x, &y)
    }
}

impl<A: Send + 'static> Monoid<Task<A>> for RaceMonoid<A> {
    fn empty(&self) -> Task<A> {
        never()
    }
}

pub fn get_race_monoid<A: Send + 'static>() -> RaceMonoid<A> {
    RaceMonoid {
        _marker: PhantomData,
    }
}

/// Start both Tasks and settle with the first outcome. When both are
/// ready on the same poll, `x` wins.
///
/// A [`never`] operand cannot win, so the other operand is returned as is.
pub fn race<A: Send + 'static>(x: &Task<A>, y: &Task<A>) -> Task<A> {
    if x.never {
        return y.clone();
    }
    if y.never {
        return x.clone();
    }
    let (x, y) = (x.clone(), y.clone());
    Task::new(move || {
        let fx = x.run();
        let fy = y.run();
        async move {
            match future::select(fx, fy).await {
                future::Either::Left((settled, loser)) => {
                    fplog_trace!("race: left operand settled first (ok={})", settled.is_ok());
                    detach(loser, "race");
                    settled
                }
                future::Either::Right((settled, loser)) => {
                    fplog_trace!("race: right operand settled first (ok={})", settled.is_ok());
                    detach(loser, "race");
                    settled
                }
            }
        }
    })
}
