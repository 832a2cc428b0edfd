use std::cmp::Ordering;
use std::sync::Arc;

use arbor_protocol::Action;

use crate::error::StateError;
use crate::state::StateItem;

/// A candidate expansion ranked by the beam: the action, the state it applies to
/// and the score the resulting state would carry.
#[derive(Debug, Clone)]
pub struct ScoredStateAction {
    pub action: Action,
    pub item: Arc<StateItem>,
    pub score: f64,
}

impl ScoredStateAction {
    /// Scores `action` on `item` given the model's `increment`.
    ///
    /// Training states add the step Hamming loss of the action; with
    /// `scale_scores` the result is the mean over the derivation length.
    pub fn load(action: Action, item: &Arc<StateItem>, increment: f64) -> Result<Self, StateError> {
        let scale = item.session().config().scale_scores;
        let size = item.size() as f64;

        let mut score = item.score();
        if scale {
            score *= size;
        }
        score += increment;
        if item.is_training() {
            score += item.action_step_hamming_loss(action)?;
        }
        if scale {
            score /= size + 1.0;
        }

        Ok(Self {
            action,
            item: Arc::clone(item),
            score,
        })
    }

    /// Builds the state this candidate describes.
    pub fn apply(&self) -> Result<Arc<StateItem>, StateError> {
        self.item.apply_scored(self.action, self.score)
    }
}

impl PartialEq for ScoredStateAction {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ScoredStateAction {}

impl PartialOrd for ScoredStateAction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredStateAction {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score.total_cmp(&other.score)
    }
}
