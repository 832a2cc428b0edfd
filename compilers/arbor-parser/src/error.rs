use thiserror::Error;

use arbor_protocol::{Action, Constituent, NodeId, TreeError, UnknownSymbol};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StateError {
    #[error("cannot shift: all {len} words have been consumed")]
    ShiftPastEnd { len: usize },

    #[error("{action} needs {required} stack node(s), found {found}")]
    StackUnderflow { action: Action, required: usize, found: usize },

    #[error("{0} is not allowed after termination")]
    Terminated(Action),

    #[error("IDLE is only allowed after termination")]
    NotTerminated,

    #[error("unary reduction to temporary constituent {0}")]
    TemporaryUnary(Constituent),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OracleError {
    #[error("reference tree has no node {0}")]
    MissingNode(NodeId),

    #[error("no stack node to attach to the reference tree")]
    EmptyStack,

    #[error("node {0} is the root and has no parent")]
    NoParent(NodeId),

    #[error("parent {0} has an empty constituent")]
    EmptyParent(NodeId),

    #[error("single-child node {0} carries binary flags")]
    ContradictoryFlags(NodeId),

    #[error("node {node} is not a child of its parent {parent}")]
    NotAChild { node: NodeId, parent: NodeId },

    #[error("reference root reached with {words} of {len} words consumed and {stack} stack node(s)")]
    PrematureRoot { words: usize, len: usize, stack: usize },

    #[error(transparent)]
    State(#[from] StateError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OutputError {
    #[error("state has not terminated")]
    NotTerminated,

    #[error("derivation left {stack} stack node(s)")]
    Incomplete { stack: usize },

    #[error("node ids are not contiguous: expected {expected}, found {found}")]
    NonContiguous { expected: NodeId, found: NodeId },

    #[error(transparent)]
    State(#[from] StateError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BracketError {
    #[error("syntax error at byte {offset}")]
    Syntax { offset: usize },

    #[error(transparent)]
    Symbol(#[from] UnknownSymbol),

    #[error("({label} {flag} ...) takes {expected} child(ren), found {found}")]
    Arity { label: String, flag: char, expected: usize, found: usize },

    #[error("unary constituent {0} cannot be temporary")]
    TemporaryUnary(String),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<BracketError>,
    },
}
