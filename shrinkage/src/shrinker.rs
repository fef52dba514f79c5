//! Candidate sources: the `Shrinker` capability and the built-in shrinkers.
//!
//! A shrinker maps a value to a finite, ordered list of smaller or simpler
//! candidates. Order matters: the search accepts the first candidate that
//! still fails, so earlier candidates win ties.

use std::marker::PhantomData;

use num_traits::PrimInt;

use crate::step::Step;
use crate::tree::ShrinkTree;

/// Produces shrink candidates for values of type `A`
///
/// Implementations must be pure and total:
/// - the returned list never contains `value` itself,
/// - the list is empty exactly when `value` is minimal for its type,
/// - the same input always yields the same list, in the same order.
pub trait Shrinker<A> {
    /// Returns the next level of shrinks for `value`, or an empty list for a base case
    fn shrink(&self, value: &A) -> Vec<A>;

    /// First batch of a shrink search rooted at `value`
    fn step(&self, value: &A) -> Step<'_, A, Self>
    where
        Self: Sized,
    {
        Step::new(self, value)
    }

    /// Lazily expanded tree of every shrink reachable from `value`
    fn tree(&self, value: A) -> ShrinkTree<'_, A, Self>
    where
        Self: Sized,
    {
        ShrinkTree::new(self, value)
    }

    /// Shrink values of type `B` by converting them to and from `A`
    fn bimap<B, F, G>(self, to_inner: F, from_inner: G) -> Bimap<Self, F, G, A>
    where
        Self: Sized,
        F: Fn(&B) -> A,
        G: Fn(A) -> B,
    {
        Bimap {
            inner: self,
            to_inner,
            from_inner,
            _marker: PhantomData,
        }
    }
}

impl<A, F> Shrinker<A> for F
where
    F: Fn(&A) -> Vec<A>,
{
    fn shrink(&self, value: &A) -> Vec<A> {
        self(value)
    }
}

/// Shrinker adapter created by [`Shrinker::bimap`]
pub struct Bimap<S, F, G, A> {
    inner: S,
    to_inner: F,
    from_inner: G,
    _marker: PhantomData<fn() -> A>,
}

impl<A, B, S, F, G> Shrinker<B> for Bimap<S, F, G, A>
where
    S: Shrinker<A>,
    F: Fn(&B) -> A,
    G: Fn(A) -> B,
{
    fn shrink(&self, value: &B) -> Vec<B> {
        self.inner
            .shrink(&(self.to_inner)(value))
            .into_iter()
            .map(&self.from_inner)
            .collect()
    }
}

/// Halving shrinker for sequences, parameterized by a canonical filler element
///
/// For a sequence of length `L`, with `h = ceil(L/2)` and `f = floor(L/2)`,
/// candidates are produced in this order:
/// 1. the empty sequence
/// 2. the first `h` elements
/// 3. the first `h` elements followed by `f` fillers
/// 4. the last `f` elements
/// 5. `h` fillers followed by the last `f` elements
///
/// Candidates equal to the input, and repeats of an earlier candidate, are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceShrinker<T> {
    filler: T,
}

impl<T> SequenceShrinker<T> {
    /// Create a sequence shrinker that simplifies elements towards `filler`
    pub fn new(filler: T) -> Self {
        Self { filler }
    }

    /// The canonical simplification element
    pub fn filler(&self) -> &T {
        &self.filler
    }
}

impl<T: Clone + PartialEq> SequenceShrinker<T> {
    fn candidates(&self, items: &[T]) -> Vec<Vec<T>> {
        if items.is_empty() {
            return Vec::new();
        }

        let len = items.len();
        let tail = len / 2;
        let head = len - tail;

        let first = items[..head].to_vec();
        let last = items[len - tail..].to_vec();

        let mut first_padded = first.clone();
        first_padded.extend(std::iter::repeat_n(self.filler.clone(), tail));

        let mut last_padded = vec![self.filler.clone(); head];
        last_padded.extend_from_slice(&last);

        let mut candidates: Vec<Vec<T>> = Vec::with_capacity(5);
        for candidate in [Vec::new(), first, first_padded, last, last_padded] {
            if candidate.as_slice() != items && !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
        candidates
    }
}

impl<T: Clone + PartialEq> Shrinker<Vec<T>> for SequenceShrinker<T> {
    fn shrink(&self, value: &Vec<T>) -> Vec<Vec<T>> {
        self.candidates(value)
    }
}

/// Halving shrinker for strings, simplifying characters towards a filler (`'a'` by default)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringShrinker {
    chars: SequenceShrinker<char>,
}

impl StringShrinker {
    /// Create a string shrinker with a custom filler character
    pub fn new(filler: char) -> Self {
        Self {
            chars: SequenceShrinker::new(filler),
        }
    }

    /// The canonical simplification character
    pub fn filler(&self) -> char {
        *self.chars.filler()
    }
}

impl Default for StringShrinker {
    fn default() -> Self {
        Self::new('a')
    }
}

impl Shrinker<String> for StringShrinker {
    fn shrink(&self, value: &String) -> Vec<String> {
        let chars: Vec<char> = value.chars().collect();
        self.chars
            .candidates(&chars)
            .into_iter()
            .map(|candidate| candidate.into_iter().collect())
            .collect()
    }
}

/// Shrinks primitive integers towards zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntShrinker;

impl<T: PrimInt> Shrinker<T> for IntShrinker {
    fn shrink(&self, value: &T) -> Vec<T> {
        let value = *value;
        let zero = T::zero();
        if value == zero {
            return Vec::new();
        }

        let mut raw = vec![zero];
        if value < zero
            && let Some(positive) = zero.checked_sub(&value)
        {
            raw.push(positive);
        }
        raw.push(value / (T::one() + T::one()));
        raw.push(if value > zero {
            value - T::one()
        } else {
            value + T::one()
        });

        let mut candidates = Vec::with_capacity(raw.len());
        for candidate in raw {
            if candidate != value && !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
        candidates
    }
}

/// Shrinks `true` to `false`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolShrinker;

impl Shrinker<bool> for BoolShrinker {
    fn shrink(&self, value: &bool) -> Vec<bool> {
        if *value { vec![false] } else { Vec::new() }
    }
}
