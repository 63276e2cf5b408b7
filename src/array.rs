//! Pure helpers over ordered sequences.
//!
//! Every function takes its input by slice and returns a fresh `Vec`;
//! nothing mutates the input. Partial operations return `Option` and are
//! `None` when an index is out of bounds or the input is empty.

use std::cmp::Ordering;

use crate::algebra::{Order, VecConcat};
use crate::either::Either;

// ========== Instances ==========

/// Concatenation monoid over vectors.
pub fn get_monoid() -> VecConcat {
    VecConcat
}

pub fn of<A>(a: A) -> Vec<A> {
    vec![a]
}

pub fn zero<A>() -> Vec<A> {
    Vec::new()
}

pub fn map<A, B>(xs: &[A], f: impl FnMut(&A) -> B) -> Vec<B> {
    xs.iter().map(f).collect()
}

/// Apply every function to every value, functions in the outer loop.
pub fn ap<A, B, F>(fs: &[F], xs: &[A]) -> Vec<B>
where
    F: Fn(&A) -> B,
{
    let mut out = Vec::with_capacity(fs.len() * xs.len());
    for f in fs {
        out.extend(xs.iter().map(f));
    }
    out
}

pub fn chain<A, B>(xs: &[A], mut f: impl FnMut(&A) -> Vec<B>) -> Vec<B> {
    let mut out = Vec::new();
    for x in xs {
        out.extend(f(x));
    }
    out
}

/// Fold from the left.
pub fn reduce<A, B>(xs: &[A], b: B, mut f: impl FnMut(B, &A) -> B) -> B {
    let mut acc = b;
    for x in xs {
        acc = f(acc, x);
    }
    acc
}

/// Fold from the right.
pub fn reduce_right<A, B>(xs: &[A], b: B, mut f: impl FnMut(&A, B) -> B) -> B {
    let mut acc = b;
    for x in xs.iter().rev() {
        acc = f(x, acc);
    }
    acc
}

/// Build a sequence from a seed, one step at a time, until `f` returns
/// `None`.
///
/// ```ignore
/// unfoldr(5, |n| if n == 0 { None } else { Some((n, n - 1)) }) // [5, 4, 3, 2, 1]
/// ```
pub fn unfoldr<A, B>(seed: B, mut f: impl FnMut(B) -> Option<(A, B)>) -> Vec<A> {
    let mut out = Vec::new();
    let mut next = seed;
    while let Some((a, b)) = f(next) {
        out.push(a);
        next = b;
    }
    out
}

/// Concatenation; the `Alt` instance.
pub fn alt<A: Clone>(xs: &[A], ys: &[A]) -> Vec<A> {
    let mut out = Vec::with_capacity(xs.len() + ys.len());
    out.extend_from_slice(xs);
    out.extend_from_slice(ys);
    out
}

/// Apply `f` to every suffix.
pub fn extend<A, B>(xs: &[A], mut f: impl FnMut(&[A]) -> B) -> Vec<B> {
    (0..xs.len()).map(|i| f(&xs[i..])).collect()
}

/// ```ignore
/// flatten(&[vec![1], vec![2], vec![3]]) // [1, 2, 3]
/// ```
pub fn flatten<A: Clone>(xss: &[Vec<A>]) -> Vec<A> {
    let len = xss.iter().map(Vec::len).sum();
    let mut out = Vec::with_capacity(len);
    for xs in xss {
        out.extend_from_slice(xs);
    }
    out
}

// ========== Destructuring ==========

/// Break a sequence into its first element and the rest, or return `b`
/// when it is empty.
pub fn fold<A, B>(xs: &[A], b: B, cons: impl FnOnce(&A, &[A]) -> B) -> B {
    match xs.split_first() {
        Some((head, tail)) => cons(head, tail),
        None => b,
    }
}

/// Lazy version of [`fold`].
pub fn fold_l<A, B>(xs: &[A], nil: impl FnOnce() -> B, cons: impl FnOnce(&A, &[A]) -> B) -> B {
    match xs.split_first() {
        Some((head, tail)) => cons(head, tail),
        None => nil(),
    }
}

/// Same as [`reduce`] but keeps every intermediate accumulator.
///
/// ```ignore
/// scan_left(&[1, 2, 3], 10, |b, a| b - a) // [10, 9, 7, 4]
/// ```
pub fn scan_left<A, B: Clone>(xs: &[A], b: B, mut f: impl FnMut(&B, &A) -> B) -> Vec<B> {
    let mut out = Vec::with_capacity(xs.len() + 1);
    out.push(b);
    for x in xs {
        let next = f(&out[out.len() - 1], x);
        out.push(next);
    }
    out
}

/// Fold from the right keeping every intermediate accumulator.
///
/// ```ignore
/// scan_right(&[1, 2, 3], 10, |a, b| b - a) // [4, 5, 7, 10]
/// ```
pub fn scan_right<A, B: Clone>(xs: &[A], b: B, mut f: impl FnMut(&A, &B) -> B) -> Vec<B> {
    let mut out = Vec::with_capacity(xs.len() + 1);
    out.push(b);
    for x in xs.iter().rev() {
        let next = f(x, &out[out.len() - 1]);
        out.push(next);
    }
    out.reverse();
    out
}

// ========== Indexing ==========

pub fn is_empty<A>(xs: &[A]) -> bool {
    xs.is_empty()
}

/// Whether `i` is not a valid index of `xs`.
pub fn is_out_of_bound<A>(i: usize, xs: &[A]) -> bool {
    i >= xs.len()
}

/// Safe indexed read.
pub fn index<A: Clone>(i: usize, xs: &[A]) -> Option<A> {
    xs.get(i).cloned()
}

pub fn head<A: Clone>(xs: &[A]) -> Option<A> {
    xs.first().cloned()
}

pub fn last<A: Clone>(xs: &[A]) -> Option<A> {
    xs.last().cloned()
}

/// All but the first element.
pub fn tail<A: Clone>(xs: &[A]) -> Option<Vec<A>> {
    xs.split_first().map(|(_, rest)| rest.to_vec())
}

/// All but the last element.
pub fn init<A: Clone>(xs: &[A]) -> Option<Vec<A>> {
    xs.split_last().map(|(_, rest)| rest.to_vec())
}

// ========== Building ==========

/// Attach an element to the front.
pub fn cons<A: Clone>(a: A, xs: &[A]) -> Vec<A> {
    let mut out = Vec::with_capacity(xs.len() + 1);
    out.push(a);
    out.extend_from_slice(xs);
    out
}

/// Append an element to the end.
pub fn snoc<A: Clone>(xs: &[A], a: A) -> Vec<A> {
    let mut out = Vec::with_capacity(xs.len() + 1);
    out.extend_from_slice(xs);
    out.push(a);
    out
}

pub fn copy<A: Clone>(xs: &[A]) -> Vec<A> {
    xs.to_vec()
}

pub fn reverse<A: Clone>(xs: &[A]) -> Vec<A> {
    xs.iter().rev().cloned().collect()
}

// ========== Slicing ==========

/// Keep at most `n` elements from the start.
pub fn take<A: Clone>(n: usize, xs: &[A]) -> Vec<A> {
    xs[..n.min(xs.len())].to_vec()
}

/// Drop at most `n` elements from the start.
pub fn drop<A: Clone>(n: usize, xs: &[A]) -> Vec<A> {
    xs[n.min(xs.len())..].to_vec()
}

fn span_index<A>(xs: &[A], mut predicate: impl FnMut(&A) -> bool) -> usize {
    xs.iter().position(|x| !predicate(x)).unwrap_or(xs.len())
}

/// Result of [`span`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<A> {
    /// Longest prefix whose elements all satisfy the predicate.
    pub init: Vec<A>,
    /// Everything after it.
    pub rest: Vec<A>,
}

/// Split into the longest prefix satisfying `predicate` and the rest.
pub fn span<A: Clone>(xs: &[A], predicate: impl FnMut(&A) -> bool) -> Span<A> {
    let (init, rest) = xs.split_at(span_index(xs, predicate));
    Span {
        init: init.to_vec(),
        rest: rest.to_vec(),
    }
}

pub fn take_while<A: Clone>(xs: &[A], predicate: impl FnMut(&A) -> bool) -> Vec<A> {
    xs[..span_index(xs, predicate)].to_vec()
}

pub fn drop_while<A: Clone>(xs: &[A], predicate: impl FnMut(&A) -> bool) -> Vec<A> {
    xs[span_index(xs, predicate)..].to_vec()
}

// ========== Searching ==========

pub fn find_index<A>(xs: &[A], predicate: impl FnMut(&A) -> bool) -> Option<usize> {
    xs.iter().position(predicate)
}

pub fn find_first<A: Clone>(xs: &[A], mut predicate: impl FnMut(&A) -> bool) -> Option<A> {
    xs.iter().find(|x| predicate(x)).cloned()
}

pub fn find_last<A: Clone>(xs: &[A], mut predicate: impl FnMut(&A) -> bool) -> Option<A> {
    xs.iter().rev().find(|x| predicate(x)).cloned()
}

pub fn filter<A: Clone>(xs: &[A], mut predicate: impl FnMut(&A) -> bool) -> Vec<A> {
    xs.iter().filter(|x| predicate(x)).cloned().collect()
}

// ========== Index updates ==========

/// Insert without a bounds check.
///
/// # Panics
///
/// If `i > xs.len()`.
pub fn unsafe_insert_at<A: Clone>(i: usize, a: A, xs: &[A]) -> Vec<A> {
    let mut out = xs.to_vec();
    out.insert(i, a);
    out
}

/// Insert `a` at `i`; `None` unless `i <= xs.len()`.
pub fn insert_at<A: Clone>(i: usize, a: A, xs: &[A]) -> Option<Vec<A>> {
    if i > xs.len() {
        None
    } else {
        Some(unsafe_insert_at(i, a, xs))
    }
}

/// Replace without a bounds check.
///
/// # Panics
///
/// If `i >= xs.len()`.
pub fn unsafe_update_at<A: Clone>(i: usize, a: A, xs: &[A]) -> Vec<A> {
    let mut out = xs.to_vec();
    out[i] = a;
    out
}

/// Replace the element at `i`; `None` unless `i < xs.len()`.
pub fn update_at<A: Clone>(i: usize, a: A, xs: &[A]) -> Option<Vec<A>> {
    if is_out_of_bound(i, xs) {
        None
    } else {
        Some(unsafe_update_at(i, a, xs))
    }
}

/// Remove without a bounds check.
///
/// # Panics
///
/// If `i >= xs.len()`.
pub fn unsafe_delete_at<A: Clone>(i: usize, xs: &[A]) -> Vec<A> {
    let mut out = xs.to_vec();
    out.remove(i);
    out
}

/// Remove the element at `i`; `None` unless `i < xs.len()`.
pub fn delete_at<A: Clone>(i: usize, xs: &[A]) -> Option<Vec<A>> {
    if is_out_of_bound(i, xs) {
        None
    } else {
        Some(unsafe_delete_at(i, xs))
    }
}

/// Apply `f` to the element at `i`; `None` unless `i < xs.len()`.
pub fn modify_at<A: Clone>(xs: &[A], i: usize, f: impl FnOnce(&A) -> A) -> Option<Vec<A>> {
    let a = f(xs.get(i)?);
    update_at(i, a, xs)
}

// ========== Options and Eithers ==========

/// Keep the `Some` results of `f`.
pub fn map_option<A, B>(xs: &[A], f: impl FnMut(&A) -> Option<B>) -> Vec<B> {
    xs.iter().filter_map(f).collect()
}

pub fn cat_options<A: Clone>(xs: &[Option<A>]) -> Vec<A> {
    xs.iter().flatten().cloned().collect()
}

/// Every `Right` value, in order.
pub fn rights<L, R: Clone>(xs: &[Either<L, R>]) -> Vec<R> {
    map_option(xs, |e| e.as_ref().right().cloned())
}

/// Every `Left` value, in order.
pub fn lefts<L: Clone, R>(xs: &[Either<L, R>]) -> Vec<L> {
    map_option(xs, |e| e.as_ref().left().cloned())
}

/// Result of [`partition_map`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separated<L, R> {
    pub left: Vec<L>,
    pub right: Vec<R>,
}

/// Split by an `Either`-valued function, keeping relative order on both
/// sides.
pub fn partition_map<A, L, R>(xs: &[A], mut f: impl FnMut(&A) -> Either<L, R>) -> Separated<L, R> {
    let mut left = Vec::new();
    let mut right = Vec::new();
    for x in xs {
        match f(x) {
            Either::Left(l) => left.push(l),
            Either::Right(r) => right.push(r),
        }
    }
    Separated { left, right }
}

// ========== Ordering and zipping ==========

/// Stable sort by a supplied total order.
pub fn sort<A: Clone, O: Order<A> + ?Sized>(ord: &O, xs: &[A]) -> Vec<A> {
    sort_by(xs, |a, b| ord.compare(a, b))
}

/// Stable sort by a comparison closure.
pub fn sort_by<A: Clone>(xs: &[A], compare: impl FnMut(&A, &A) -> Ordering) -> Vec<A> {
    let mut out = xs.to_vec();
    out.sort_by(compare);
    out
}

/// Pairwise combination, truncated to the shorter input.
pub fn zip_with<A, B, C>(xs: &[A], ys: &[B], mut f: impl FnMut(&A, &B) -> C) -> Vec<C> {
    xs.iter().zip(ys).map(|(a, b)| f(a, b)).collect()
}

pub fn zip<A: Clone, B: Clone>(xs: &[A], ys: &[B]) -> Vec<(A, B)> {
    zip_with(xs, ys, |a, b| (a.clone(), b.clone()))
}

/// Rotate right by `n` steps; negative `n` rotates left. `n` is taken
/// modulo the length.
pub fn rotate<A: Clone>(n: isize, xs: &[A]) -> Vec<A> {
    let len = xs.len();
    if len <= 1 {
        return xs.to_vec();
    }
    let k = n.rem_euclid(len as isize) as usize;
    let mut out = Vec::with_capacity(len);
    out.extend_from_slice(&xs[len - k..]);
    out.extend_from_slice(&xs[..len - k]);
    out
}
