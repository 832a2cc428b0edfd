use std::sync::Arc;

use arbor_protocol::{Action, CfgTree, Constituent, NodeId};

use crate::error::OracleError;
use crate::state::StateItem;

impl StateItem {
    /// The single correct action towards `gold` from this state.
    pub fn standard_move(&self, gold: &CfgTree) -> Result<Action, OracleError> {
        if self.is_terminated() {
            return Ok(Action::Idle);
        }
        let Some(top) = self.node() else {
            return Ok(Action::Shift(shift_hint(gold, self.new_node_index())?));
        };
        if gold.parent(top.id()).is_none() {
            if !self.is_complete() {
                return Err(OracleError::PrematureRoot {
                    words: self.current_word(),
                    len: self.session().words().len(),
                    stack: self.stack_size(),
                });
            }
            return Ok(Action::ReduceRoot);
        }
        self.next_move(gold)
    }

    /// Oracle step for a non-root stack top: reduce towards its gold parent, or shift
    /// to build the parent's right child first.
    pub fn next_move(&self, gold: &CfgTree) -> Result<Action, OracleError> {
        let top = self.node().ok_or(OracleError::EmptyStack)?.id();
        gold.node(top).ok_or(OracleError::MissingNode(top))?;
        let parent_id = gold.parent(top).ok_or(OracleError::NoParent(top))?;
        let parent = gold.node(parent_id).ok_or(OracleError::MissingNode(parent_id))?;

        if parent.constituent.is_none() {
            return Err(OracleError::EmptyParent(parent_id));
        }

        let action = if parent.single_child() {
            if parent.head_left() || parent.is_temporary() {
                return Err(OracleError::ContradictoryFlags(parent_id));
            }
            Action::ReduceUnary(parent.constituent)
        } else if parent.left_child == Some(top) {
            Action::Shift(shift_hint(gold, self.new_node_index())?)
        } else if parent.right_child == Some(top) {
            Action::ReduceBinary {
                constituent: parent.constituent,
                head_left: parent.head_left(),
                temporary: parent.is_temporary(),
            }
        } else {
            return Err(OracleError::NotAChild {
                node: top,
                parent: parent_id,
            });
        };

        log::debug!("oracle: node {} under {} -> {}", top, parent_id, action);
        Ok(action)
    }
}

fn shift_hint(gold: &CfgTree, id: NodeId) -> Result<Constituent, OracleError> {
    gold.node(id)
        .map(|node| node.constituent)
        .ok_or(OracleError::MissingNode(id))
}

/// Applies oracle moves from `start` until the derivation terminates.
pub fn follow_oracle(start: &Arc<StateItem>, gold: &CfgTree) -> Result<Arc<StateItem>, OracleError> {
    let mut state = Arc::clone(start);
    while !state.is_terminated() {
        let action = state.standard_move(gold)?;
        state = state.apply(action)?;
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bracket::parse_tree;
    use crate::config::ParserConfig;
    use crate::testing::{gold_tree, init, session_for};
    use arbor_protocol::Phrase;
    use proptest::prelude::*;

    fn derive(gold: &CfgTree) -> Arc<StateItem> {
        let start = StateItem::initial_for_training(session_for(gold, ParserConfig::default()), gold);
        follow_oracle(&start, gold).unwrap()
    }

    #[test]
    fn test_oracle_moves() {
        init();
        let gold = parse_tree("(S r (NP r (DT The) (NN cat)) (VBD sat))").unwrap();
        let done = derive(&gold);

        let np = Constituent::new(Phrase::NP);
        let s = Constituent::new(Phrase::S);
        assert_eq!(
            done.history(),
            vec![
                Action::Shift(Constituent::NONE),
                Action::Shift(Constituent::NONE),
                Action::ReduceBinary {
                    constituent: np,
                    head_left: false,
                    temporary: false
                },
                Action::Shift(Constituent::NONE),
                Action::ReduceBinary {
                    constituent: s,
                    head_left: false,
                    temporary: false
                },
                Action::ReduceRoot,
            ]
        );
        assert_eq!(done.standard_move(&gold), Ok(Action::Idle));
    }

    #[test]
    fn test_oracle_unary_and_temporary() {
        let gold = parse_tree("(VP l (VP* l (VBD put) (NP s (PRP it))) (ADVP s (RB there)))").unwrap();
        let done = derive(&gold);

        let history = done.history();
        assert_eq!(history[2], Action::ReduceUnary(Constituent::new(Phrase::NP)));
        assert_eq!(
            history[3],
            Action::ReduceBinary {
                constituent: Constituent::new(Phrase::VP),
                head_left: true,
                temporary: true
            }
        );
        assert_eq!(done.hamming_loss(), 0.0);
        assert_eq!(done.loss_counts().correct as usize, gold.labeled_brackets().len());
    }

    #[test]
    fn test_shift_builds_right_child_first() {
        let gold = parse_tree("(S r (NP r (DT The) (NN cat)) (VBD sat))").unwrap();
        let start = StateItem::initial(session_for(&gold, ParserConfig::default()));
        let state = start.shift(Constituent::NONE).unwrap();
        assert_eq!(state.next_move(&gold), Ok(Action::Shift(Constituent::NONE)));
    }

    #[test]
    fn test_next_move_needs_a_stack_node() {
        let gold = parse_tree("(NP r (DT the) (NN cat))").unwrap();
        let start = StateItem::initial(session_for(&gold, ParserConfig::default()));

        assert_eq!(start.next_move(&gold), Err(OracleError::EmptyStack));
        assert_eq!(start.standard_move(&gold), Ok(Action::Shift(Constituent::NONE)));
    }

    #[test]
    fn test_premature_root() {
        let gold = parse_tree("(NP r (DT the) (NN cat))").unwrap();
        let session = session_for(&gold, ParserConfig::default());
        // A one-word reference against the two-word sentence.
        let short = parse_tree("(NN cat)").unwrap();
        let state = StateItem::initial(session).shift(Constituent::NONE).unwrap();
        assert!(matches!(
            state.standard_move(&short),
            Err(OracleError::PrematureRoot { words: 1, len: 2, stack: 1 })
        ));
        assert!(matches!(state.next_move(&short), Err(OracleError::NoParent(_))));
    }

    proptest! {
        #[test]
        fn prop_oracle_reproduces_gold(gold in gold_tree()) {
            let done = derive(&gold);
            let counts = done.loss_counts();

            prop_assert_eq!(done.hamming_loss(), 0.0);
            prop_assert_eq!(counts.correct as usize, gold.labeled_brackets().len());
            prop_assert_eq!(done.generate_tree().unwrap().to_cfg_tree().unwrap(), gold);
        }
    }
}
