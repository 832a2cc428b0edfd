use arbor_protocol::{DependencyLabel, Phrase, Tag};
use arbor_tree::SyntaxNode;

use super::{NP, S, VP};
use crate::catalogue::{Match, RelationFamily, Rule};
use crate::matcher::Matcher;
use crate::nav::Navigator;

const EX: Matcher = Matcher::Tag(Tag::EX);
const NP_OR_ADJP: Matcher = Matcher::AnyOf(&[NP, Matcher::Phrase(Phrase::ADJP)]);
const SQ_OR_PRN: Matcher = Matcher::AnyOf(&[Matcher::Phrase(Phrase::SQ), Matcher::Phrase(Phrase::PRN)]);
const WHNP: Matcher = Matcher::Phrase(Phrase::WHNP);

pub fn family() -> RelationFamily {
    RelationFamily::new(
        DependencyLabel::Nsubj,
        [
            Rule::new("nsubj1", nsubj1),
            Rule::new("nsubj2", nsubj2),
            Rule::new("nsubj8", nsubj8),
            Rule::new("nsubj11", nsubj11),
            Rule::new("nsubj13", nsubj13),
        ],
    )
}

/// `S < (NP=target $+ NP|ADJP) > VP`, checked when the VP is built.
fn nsubj1<'n>(nav: &Navigator<'_>, node: &'n SyntaxNode) -> Option<Match<'n>> {
    if !nav.is(node, VP) {
        return None;
    }
    let s = nav.immediate_child(node, S)?;
    let np = nav.immediate_child(s, NP)?;
    nav.immediate_left_sister_of(s, np, NP_OR_ADJP)?;
    Some(Match::new(s, np))
}

/// `SQ|PRN < (NP=target !< EX $++ VP)`
fn nsubj2<'n>(nav: &Navigator<'_>, node: &'n SyntaxNode) -> Option<Match<'n>> {
    if !nav.is(node, SQ_OR_PRN) {
        return None;
    }
    let np = nav.immediate_child(node, NP)?;
    if nav.immediate_child(np, EX).is_some() {
        return None;
    }
    nav.left_sister_of(node, np, VP)?;
    Some(Match::new(node, np))
}

/// `SBARQ < WHNP=target < (SQ < (VP !$-- NP))`
fn nsubj8<'n>(nav: &Navigator<'_>, node: &'n SyntaxNode) -> Option<Match<'n>> {
    if !nav.is(node, Matcher::Phrase(Phrase::SBARQ)) {
        return None;
    }
    let whnp = nav.immediate_child(node, WHNP)?;
    let sq = nav.immediate_child(node, Matcher::Phrase(Phrase::SQ))?;
    let vp = nav.immediate_child(sq, VP)?;
    if nav.right_sister_of(sq, vp, NP).is_some() {
        return None;
    }
    Some(Match::new(node, whnp))
}

/// `SBAR < WHNP=target [ < (S < (VP !$-- NP) !< SBAR) | < (VP !$-- NP) !< S ]`
fn nsubj11<'n>(nav: &Navigator<'_>, node: &'n SyntaxNode) -> Option<Match<'n>> {
    if !nav.is(node, Matcher::Phrase(Phrase::SBAR)) {
        return None;
    }
    let whnp = nav.immediate_child(node, WHNP)?;

    let subjectless_clause = |parent: &SyntaxNode| {
        nav.immediate_child(parent, VP)
            .is_some_and(|vp| nav.right_sister_of(parent, vp, NP).is_none())
    };

    let licensed = match nav.immediate_child(node, S) {
        Some(s) => subjectless_clause(s) && nav.immediate_child(s, Matcher::Phrase(Phrase::SBAR)).is_none(),
        None => subjectless_clause(node),
    };
    licensed.then_some(Match::new(node, whnp))
}

/// `SQ < ((NP < EX) $++ NP=target)`
fn nsubj13<'n>(nav: &Navigator<'_>, node: &'n SyntaxNode) -> Option<Match<'n>> {
    if !nav.is(node, Matcher::Phrase(Phrase::SQ)) {
        return None;
    }
    let expletive = nav.immediate_child(node, NP)?;
    nav.immediate_child(expletive, EX)?;
    let target = nav.left_sister_of(node, expletive, NP)?;
    Some(Match::new(node, target))
}
