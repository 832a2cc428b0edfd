use arbor_protocol::{Constituent, LabeledBracket};
use arbor_tree::Span;

/// Labeled-bracket counts of a derivation measured against the gold tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LossCounts {
    pub correct: u32,
    pub precision_lost: u32,
    pub recall_lost: u32,
}

impl LossCounts {
    /// `1 - F1`; zero when nothing has been produced or lost yet.
    pub fn f_loss(&self) -> f64 {
        if self.correct == 0 {
            return if self.precision_lost == 0 && self.recall_lost == 0 { 0.0 } else { 1.0 };
        }
        let correct = f64::from(self.correct);
        let p = correct / (correct + f64::from(self.precision_lost));
        let r = correct / (correct + f64::from(self.recall_lost));
        1.0 - 2.0 * p * r / (p + r)
    }

    pub fn hamming(&self) -> f64 {
        f64::from(self.precision_lost + self.recall_lost)
    }
}

/// Gold brackets still reachable from a state, plus the running counts.
///
/// Each transition produces a new value; states never share or mutate one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LossState {
    gold: Vec<LabeledBracket>,
    counts: LossCounts,
}

impl LossState {
    pub fn new(gold: Vec<LabeledBracket>) -> Self {
        Self {
            gold,
            counts: LossCounts::default(),
        }
    }

    pub fn counts(&self) -> LossCounts {
        self.counts
    }

    pub fn remaining(&self) -> &[LabeledBracket] {
        &self.gold
    }

    /// Brackets ending where the current top ends can no longer be closed once a token is pushed.
    pub fn after_shift(&self, top: Option<Span>) -> Self {
        let mut next = Self::new(Vec::with_capacity(self.gold.len()));
        next.counts = self.counts;
        for bracket in &self.gold {
            match top {
                Some(span) if bracket.end == span.end => next.counts.recall_lost += 1,
                _ => next.gold.push(*bracket),
            }
        }
        next
    }

    pub fn after_unary(&self, span: Span, constituent: Constituent) -> Self {
        self.after_reduce(span, constituent, None)
    }

    /// Brackets starting at the right child can no longer be produced once it is absorbed.
    pub fn after_binary(&self, left: Span, right: Span, constituent: Constituent) -> Self {
        self.after_reduce(Span::new(left.start, right.end), constituent, Some(right.start))
    }

    fn after_reduce(&self, span: Span, constituent: Constituent, absorbed: Option<usize>) -> Self {
        let mut next = Self::new(Vec::with_capacity(self.gold.len()));
        next.counts = self.counts;
        let mut matched = false;

        for bracket in &self.gold {
            if bracket.begin == span.start && bracket.end == span.end && bracket.constituent == constituent {
                matched = true;
                next.counts.correct += 1;
            } else if absorbed == Some(bracket.begin) {
                next.counts.recall_lost += 1;
            } else {
                next.gold.push(*bracket);
            }
        }

        if !matched {
            next.counts.precision_lost += 1;
        }
        next
    }

    /// Every bracket still open is lost for good.
    pub fn after_terminate(&self) -> Self {
        let mut counts = self.counts;
        counts.recall_lost += self.gold.len() as u32;
        Self { gold: Vec::new(), counts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_protocol::Phrase;

    fn bracket(begin: usize, end: usize, phrase: Phrase) -> LabeledBracket {
        LabeledBracket {
            begin,
            end,
            constituent: phrase.into(),
        }
    }

    #[test]
    fn test_f_loss_degenerate() {
        assert_eq!(LossCounts::default().f_loss(), 0.0);
        let lost = LossCounts { correct: 0, precision_lost: 1, recall_lost: 0 };
        assert_eq!(lost.f_loss(), 1.0);
    }

    #[test]
    fn test_f_loss_value() {
        let counts = LossCounts { correct: 1, precision_lost: 1, recall_lost: 1 };
        assert!((counts.f_loss() - 0.5).abs() < 1e-12);
        assert_eq!(counts.hamming(), 2.0);

        let perfect = LossCounts { correct: 3, precision_lost: 0, recall_lost: 0 };
        assert_eq!(perfect.f_loss(), 0.0);
    }

    #[test]
    fn test_shift_drops_closed_brackets() {
        let state = LossState::new(vec![bracket(0, 1, Phrase::NP), bracket(0, 2, Phrase::S)]);

        let first = state.after_shift(None);
        assert_eq!(first, state);

        let closed = state.after_shift(Some(Span::new(1, 1)));
        assert_eq!(closed.counts().recall_lost, 1);
        assert_eq!(closed.remaining(), &[bracket(0, 2, Phrase::S)]);
    }

    #[test]
    fn test_reduce_matching() {
        let state = LossState::new(vec![bracket(0, 1, Phrase::NP), bracket(1, 2, Phrase::VP)]);

        let unary = state.after_unary(Span::new(0, 1), Phrase::NP.into());
        assert_eq!(unary.counts(), LossCounts { correct: 1, precision_lost: 0, recall_lost: 0 });

        // Combining [0,0] with [1,1] absorbs the VP start.
        let binary = state.after_binary(Span::new(0, 0), Span::new(1, 1), Phrase::NP.into());
        assert_eq!(binary.counts(), LossCounts { correct: 1, precision_lost: 0, recall_lost: 1 });
        assert!(binary.remaining().is_empty());

        let wrong = state.after_binary(Span::new(0, 0), Span::new(1, 1), Phrase::ADJP.into());
        assert_eq!(wrong.counts(), LossCounts { correct: 0, precision_lost: 1, recall_lost: 1 });
        assert_eq!(wrong.remaining(), &[bracket(0, 1, Phrase::NP)]);
    }

    #[test]
    fn test_temporary_bit_is_part_of_the_label() {
        let state = LossState::new(vec![LabeledBracket {
            begin: 0,
            end: 1,
            constituent: Constituent::temporary(Phrase::VP),
        }]);
        let plain = state.after_binary(Span::new(0, 0), Span::new(1, 1), Phrase::VP.into());
        assert_eq!(plain.counts().precision_lost, 1);
        let temporary = state.after_binary(Span::new(0, 0), Span::new(1, 1), Constituent::temporary(Phrase::VP));
        assert_eq!(temporary.counts().correct, 1);
    }

    #[test]
    fn test_terminate_loses_remaining() {
        let state = LossState::new(vec![bracket(0, 2, Phrase::S)]).after_terminate();
        assert_eq!(state.counts().recall_lost, 1);
        assert!(state.remaining().is_empty());
    }
}
