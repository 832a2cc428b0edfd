use std::fmt;
use std::sync::Arc;

use arbor_protocol::{Action, CfgTree, Constituent, NodeId};
use arbor_tree::{NodeRef, SyntaxNode};

use crate::error::StateError;
use crate::loss::{LossCounts, LossState};
use crate::session::ParseSession;

/// One node of the persistent search graph.
///
/// A state records the action that produced it, the state it was produced from
/// (`previous_action`) and the state holding the stack element below its top
/// (`previous_stack`). States are immutable and shared between beam candidates.
pub struct StateItem {
    session: Arc<ParseSession>,
    score: f64,
    node: Option<NodeRef>,
    previous_action: Option<Arc<StateItem>>,
    previous_stack: Option<Arc<StateItem>>,
    current_word: usize,
    action: Option<Action>,
    loss: Option<LossState>,
    size: usize,
}

impl StateItem {
    pub fn initial(session: Arc<ParseSession>) -> Arc<Self> {
        Arc::new(Self::start(session, None))
    }

    /// An initial state that tracks labeled-bracket loss against `gold`.
    pub fn initial_for_training(session: Arc<ParseSession>, gold: &CfgTree) -> Arc<Self> {
        Arc::new(Self::start(session, Some(LossState::new(gold.labeled_brackets()))))
    }

    fn start(session: Arc<ParseSession>, loss: Option<LossState>) -> Self {
        Self {
            session,
            score: 0.0,
            node: None,
            previous_action: None,
            previous_stack: None,
            current_word: 0,
            action: None,
            loss,
            size: 0,
        }
    }

    pub fn session(&self) -> &Arc<ParseSession> {
        &self.session
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Top of the stack.
    pub fn node(&self) -> Option<&NodeRef> {
        self.node.as_ref()
    }

    pub fn previous_action(&self) -> Option<&Arc<StateItem>> {
        self.previous_action.as_ref()
    }

    pub fn previous_stack(&self) -> Option<&Arc<StateItem>> {
        self.previous_stack.as_ref()
    }

    pub fn current_word(&self) -> usize {
        self.current_word
    }

    /// The action that produced this state; `None` for an initial state.
    pub fn action(&self) -> Option<Action> {
        self.action
    }

    /// Number of non-idle actions applied since the initial state.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_training(&self) -> bool {
        self.loss.is_some()
    }

    pub fn stack_size(&self) -> usize {
        let mut count = 0;
        let mut current = Some(self);
        while let Some(state) = current {
            if state.node.is_some() {
                count += 1;
            }
            current = state.previous_stack.as_deref();
        }
        count
    }

    /// Length of the run of unary reductions that ends at this state.
    pub fn unary_reduces(&self) -> usize {
        let mut count = 0;
        let mut current = Some(self);
        while let Some(state) = current {
            match state.action {
                Some(Action::ReduceUnary(_)) => count += 1,
                _ => break,
            }
            current = state.previous_action.as_deref();
        }
        count
    }

    pub fn new_node_index(&self) -> NodeId {
        self.node
            .as_ref()
            .map_or(NodeId::new(0), |node| node.id().next())
    }

    pub fn is_empty(&self) -> bool {
        if self.current_word == 0 {
            debug_assert!(
                self.previous_action.is_none() && self.previous_stack.is_none() && self.score == 0.0
            );
            return true;
        }
        false
    }

    /// All words consumed and, unless fragments are allowed, a single tree on the stack.
    pub fn is_complete(&self) -> bool {
        self.current_word == self.session.words().len()
            && (self.session.config().allow_fragments || self.stack_size() == 1)
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.action, Some(Action::ReduceRoot | Action::Idle))
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.action, Some(Action::Idle))
    }

    /// Whether a search driver should consider `action` here.
    ///
    /// Stricter than `apply`: it also enforces the unary chain limit and only
    /// offers `ReduceRoot` on complete derivations.
    pub fn is_legal(&self, action: Action) -> bool {
        if self.is_terminated() {
            return action.is_idle();
        }
        match action {
            Action::Idle => false,
            Action::Shift(_) => self.current_word < self.session.words().len(),
            Action::ReduceUnary(constituent) => {
                !constituent.is_temporary()
                    && self.node.is_some()
                    && self.unary_reduces() < self.session.config().max_unary_reduces
            }
            Action::ReduceBinary { .. } => self.stack_size() >= 2,
            Action::ReduceRoot => self.node.is_some() && self.is_complete(),
        }
    }

    /// Applies `action`, carrying the score forward unchanged.
    pub fn apply(self: &Arc<Self>, action: Action) -> Result<Arc<StateItem>, StateError> {
        self.apply_scored(action, self.score)
    }

    pub fn shift(self: &Arc<Self>, hint: Constituent) -> Result<Arc<StateItem>, StateError> {
        self.apply(Action::Shift(hint))
    }

    pub fn reduce_unary(
        self: &Arc<Self>,
        constituent: Constituent,
    ) -> Result<Arc<StateItem>, StateError> {
        self.apply(Action::ReduceUnary(constituent))
    }

    pub fn reduce_binary(
        self: &Arc<Self>,
        constituent: Constituent,
        head_left: bool,
        temporary: bool,
    ) -> Result<Arc<StateItem>, StateError> {
        self.apply(Action::ReduceBinary {
            constituent,
            head_left,
            temporary,
        })
    }

    pub fn terminate(self: &Arc<Self>) -> Result<Arc<StateItem>, StateError> {
        self.apply(Action::ReduceRoot)
    }

    pub fn idle(self: &Arc<Self>) -> Result<Arc<StateItem>, StateError> {
        self.apply(Action::Idle)
    }

    pub(crate) fn apply_scored(
        self: &Arc<Self>,
        action: Action,
        score: f64,
    ) -> Result<Arc<StateItem>, StateError> {
        self.check(action)?;
        let loss = self.loss_after(action)?;
        let id = self.new_node_index();

        // 1. Build the new top and find the rest of the stack below it
        let (node, previous_stack, current_word) = match action {
            Action::Shift(hint) => {
                let leaf = SyntaxNode::leaf(id, hint, self.current_word);
                (Some(Arc::new(leaf)), Some(Arc::clone(self)), self.current_word + 1)
            }
            Action::ReduceUnary(constituent) => {
                let child = self.top(action)?;
                let node = SyntaxNode::unary(id, constituent, Arc::clone(child));
                (Some(Arc::new(node)), self.previous_stack.clone(), self.current_word)
            }
            Action::ReduceBinary {
                constituent,
                head_left,
                temporary,
            } => {
                let (below, left, right) = self.top_two(action)?;
                let node = SyntaxNode::binary(
                    id,
                    constituent,
                    Arc::clone(left),
                    Arc::clone(right),
                    head_left,
                    temporary,
                    self.session.catalogue(),
                    self.session.words(),
                );
                (Some(Arc::new(node)), below.previous_stack.clone(), self.current_word)
            }
            Action::ReduceRoot => {
                self.top(action)?;
                (self.node.clone(), self.previous_stack.clone(), self.current_word)
            }
            Action::Idle => (self.node.clone(), self.previous_stack.clone(), self.current_word),
        };

        // 2. Chain the new state onto this one
        let state = StateItem {
            session: Arc::clone(&self.session),
            score,
            node,
            previous_action: Some(Arc::clone(self)),
            previous_stack,
            current_word,
            action: Some(action),
            loss,
            size: if action.is_idle() { self.size } else { self.size + 1 },
        };
        if let Some(node) = state.node.as_ref().filter(|_| !action.is_idle()) {
            log::trace!("{} -> {} ({} link(s))", action, node, node.links().len());
        }
        Ok(Arc::new(state))
    }

    /// Status and input preconditions. Stack depth is checked where the nodes are taken.
    fn check(&self, action: Action) -> Result<(), StateError> {
        if self.is_terminated() {
            return if action.is_idle() {
                Ok(())
            } else {
                Err(StateError::Terminated(action))
            };
        }
        match action {
            Action::Idle => Err(StateError::NotTerminated),
            Action::Shift(_) if self.current_word >= self.session.words().len() => {
                Err(StateError::ShiftPastEnd {
                    len: self.session.words().len(),
                })
            }
            Action::ReduceUnary(constituent) if constituent.is_temporary() => {
                Err(StateError::TemporaryUnary(constituent))
            }
            _ => Ok(()),
        }
    }

    fn underflow(&self, action: Action, required: usize) -> StateError {
        StateError::StackUnderflow {
            action,
            required,
            found: self.stack_size(),
        }
    }

    fn top(&self, action: Action) -> Result<&NodeRef, StateError> {
        self.node.as_ref().ok_or_else(|| self.underflow(action, 1))
    }

    /// The state below the top together with the left and right operands of a binary reduction.
    fn top_two(&self, action: Action) -> Result<(&Arc<StateItem>, &NodeRef, &NodeRef), StateError> {
        if let (Some(right), Some(below)) = (&self.node, &self.previous_stack) {
            if let Some(left) = &below.node {
                return Ok((below, left, right));
            }
        }
        Err(self.underflow(action, 2))
    }

    fn loss_after(&self, action: Action) -> Result<Option<LossState>, StateError> {
        let Some(loss) = &self.loss else {
            return Ok(None);
        };
        let next = match action {
            Action::Shift(_) => loss.after_shift(self.node.as_ref().map(|node| node.span())),
            Action::ReduceUnary(constituent) => loss.after_unary(self.top(action)?.span(), constituent),
            Action::ReduceBinary {
                constituent,
                temporary,
                ..
            } => {
                let (_, left, right) = self.top_two(action)?;
                loss.after_binary(left.span(), right.span(), constituent.with_temporary(temporary))
            }
            Action::ReduceRoot => {
                self.top(action)?;
                loss.after_terminate()
            }
            Action::Idle => loss.clone(),
        };
        Ok(Some(next))
    }

    /// Bracket counts so far; zero for states that do not track loss.
    pub fn loss_counts(&self) -> LossCounts {
        self.loss.as_ref().map_or_else(LossCounts::default, LossState::counts)
    }

    pub fn f_loss(&self) -> f64 {
        self.loss_counts().f_loss()
    }

    pub fn hamming_loss(&self) -> f64 {
        self.loss_counts().hamming()
    }

    /// Hamming loss added by the action that produced this state.
    pub fn step_hamming_loss(&self) -> f64 {
        match &self.previous_action {
            Some(previous) => self.hamming_loss() - previous.hamming_loss(),
            None => 0.0,
        }
    }

    /// Counts the state would have after `action`, without building it.
    pub fn action_loss(&self, action: Action) -> Result<LossCounts, StateError> {
        self.check(action)?;
        Ok(self
            .loss_after(action)?
            .map_or_else(LossCounts::default, |loss| loss.counts()))
    }

    pub fn action_f_loss(&self, action: Action) -> Result<f64, StateError> {
        Ok(self.action_loss(action)?.f_loss())
    }

    pub fn action_hamming_loss(&self, action: Action) -> Result<f64, StateError> {
        Ok(self.action_loss(action)?.hamming())
    }

    pub fn action_step_hamming_loss(&self, action: Action) -> Result<f64, StateError> {
        Ok(self.action_hamming_loss(action)? - self.hamming_loss())
    }

    /// Actions from the initial state up to this one.
    pub fn history(&self) -> Vec<Action> {
        let mut actions: Vec<Action> = self.chain().filter_map(|state| state.action).collect();
        actions.reverse();
        actions
    }

    /// Logs the derivation at trace level, one action per line with the head word of its top node.
    pub fn trace(&self) {
        if !log::log_enabled!(log::Level::Trace) {
            return;
        }
        log::trace!("state item score == {}, size == {}", self.score, self.size);
        if let Some(loss) = &self.loss {
            let counts = loss.counts();
            log::trace!(
                "cor = {}, plo = {}, rlo = {}, loss = {}",
                counts.correct,
                counts.precision_lost,
                counts.recall_lost,
                counts.f_loss()
            );
        }

        let mut states: Vec<&StateItem> = self.chain().filter(|state| state.action.is_some()).collect();
        states.reverse();
        for state in states {
            let head = state
                .node
                .as_ref()
                .and_then(|node| self.session.words().word(node.head()))
                .unwrap_or("");
            if let Some(action) = state.action {
                log::trace!("{} [{}]", action, head);
            }
        }
    }

    /// This state followed by its `previous_action` ancestors.
    pub(crate) fn chain(&self) -> impl Iterator<Item = &StateItem> + '_ {
        std::iter::successors(Some(self), |state| state.previous_action.as_deref())
    }
}

impl fmt::Debug for StateItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateItem")
            .field("action", &self.action)
            .field("score", &self.score)
            .field("current_word", &self.current_word)
            .field("stack_size", &self.stack_size())
            .field("node", &self.node.as_ref().map(|node| node.to_string()))
            .field("loss", &self.loss.as_ref().map(LossState::counts))
            .finish()
    }
}
