//! One round of shrink candidates plus the way to build the next round.

use std::fmt;

use crate::shrinker::Shrinker;

/// A batch of shrink candidates
///
/// `next` re-derives candidates from whichever value regressed, so every
/// accepted regression becomes the basis of the following round. The empty
/// step has no candidates and its `next` is empty again.
pub struct Step<'s, A, S: ?Sized> {
    candidates: Vec<A>,
    source: Option<&'s S>,
}

impl<'s, A, S> Step<'s, A, S>
where
    S: Shrinker<A> + ?Sized,
{
    /// Build the step for `value` from `source`
    pub fn new(source: &'s S, value: &A) -> Self {
        Self {
            candidates: source.shrink(value),
            source: Some(source),
        }
    }

    /// The absorbing terminal step
    pub fn empty() -> Self {
        Self {
            candidates: Vec::new(),
            source: None,
        }
    }

    /// Candidates to try in this round, in order
    pub fn candidates(&self) -> &[A] {
        &self.candidates
    }

    /// Number of candidates in this round
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether this round has nothing to try
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// The step for the round after `accepted` regressed
    pub fn next(&self, accepted: &A) -> Self {
        match self.source {
            Some(source) => Step::new(source, accepted),
            None => Step::empty(),
        }
    }

    /// Take ownership of the candidates
    pub fn into_candidates(self) -> Vec<A> {
        self.candidates
    }
}

impl<A: fmt::Debug, S: ?Sized> fmt::Debug for Step<'_, A, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("candidates", &self.candidates)
            .field("terminal", &self.source.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shrinker::{IntShrinker, StringShrinker};

    #[test]
    fn test_step_candidates_come_from_source() {
        let shrinker = StringShrinker::default();
        let step = Step::new(&shrinker, &"xyz".to_string());
        assert_eq!(step.candidates(), shrinker.shrink(&"xyz".to_string()).as_slice());
        assert_eq!(step.len(), 5);
        assert!(!step.is_empty());
    }

    #[test]
    fn test_step_next_rederives_from_accepted() {
        let step = IntShrinker.step(&100u32);
        assert_eq!(step.candidates(), &[0, 50, 99]);

        let next = step.next(&50);
        assert_eq!(next.candidates(), &[0, 25, 49]);

        let last = next.next(&0);
        assert!(last.is_empty());
    }

    #[test]
    fn test_empty_step_is_absorbing() {
        let step: Step<'_, u32, IntShrinker> = Step::empty();
        assert!(step.is_empty());
        assert!(step.next(&7).is_empty());
        assert!(step.next(&7).next(&3).is_empty());
    }

    #[test]
    fn test_step_from_trait_object() {
        let shrinker: &dyn Shrinker<bool> = &crate::shrinker::BoolShrinker;
        let step = Step::new(shrinker, &true);
        assert_eq!(step.into_candidates(), vec![false]);
    }

    #[test]
    fn test_step_debug() {
        let step = IntShrinker.step(&2i32);
        assert_eq!(
            format!("{:?}", step),
            "Step { candidates: [0, 1], terminal: false }"
        );
    }
}
