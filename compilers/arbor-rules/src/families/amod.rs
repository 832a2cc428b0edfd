use arbor_protocol::{DependencyLabel, Phrase, Tag};
use arbor_tree::SyntaxNode;

use super::{COORDINATION, NP};
use crate::catalogue::{Match, RelationFamily, Rule};
use crate::matcher::Matcher;
use crate::nav::Navigator;

const NOMINAL: Matcher = Matcher::AnyOf(&[
    NP,
    Matcher::Phrase(Phrase::NX),
    Matcher::Phrase(Phrase::NAC),
    Matcher::Phrase(Phrase::WHNP),
    Matcher::Phrase(Phrase::NML),
]);

const ADJECTIVAL: Matcher = Matcher::AnyOf(&[
    Matcher::Phrase(Phrase::ADJP),
    Matcher::Phrase(Phrase::WHADJP),
    Matcher::HeadTag(Tag::JJ),
    Matcher::HeadTag(Tag::JJR),
    Matcher::HeadTag(Tag::JJS),
    Matcher::HeadTag(Tag::VBN),
    Matcher::HeadTag(Tag::VBG),
    Matcher::HeadTag(Tag::VBD),
    Matcher::HeadTag(Tag::IN),
]);

const JJ_OR_NNP: Matcher = Matcher::AnyOf(&[Matcher::HeadTag(Tag::JJ), Matcher::HeadTag(Tag::NNP)]);
const NP_OR_WHNP: Matcher = Matcher::AnyOf(&[NP, Matcher::Phrase(Phrase::WHNP)]);

pub fn family() -> RelationFamily {
    RelationFamily::new(
        DependencyLabel::Amod,
        [
            Rule::new("amod1", amod1),
            Rule::new("amod2", amod2),
            Rule::new("amod3", amod3),
        ],
    )
}

/// `NP|NX|NML|NAC|WHNP < (ADJP|WHADJP|JJ|JJR|JJS|VBN|VBG|VBD|IN=target !< QP !$- CC)`
fn amod1<'n>(nav: &Navigator<'_>, node: &'n SyntaxNode) -> Option<Match<'n>> {
    if !nav.is(node, NOMINAL) {
        return None;
    }
    let children = nav.children(node);
    children.iter().enumerate().find_map(|(i, &target)| {
        if target.head() == node.head() || !nav.is(target, ADJECTIVAL) {
            return None;
        }
        let after_cc = i > 0 && nav.head_tag(children[i - 1]) == Some(Tag::CC);
        let has_qp = nav.immediate_child(target, Matcher::Phrase(Phrase::QP)).is_some();
        (!after_cc && !has_qp).then_some(Match::new(node, target))
    })
}

/// `ADJP !< CC|CONJP < (JJ|NNP $ JJ|NNP=target)`
///
/// Sisters to the right of an adjective are tried before those to its left.
fn amod2<'n>(nav: &Navigator<'_>, node: &'n SyntaxNode) -> Option<Match<'n>> {
    if !nav.is(node, Matcher::Phrase(Phrase::ADJP)) {
        return None;
    }
    let children = nav.children(node);
    if children.iter().any(|child| nav.is(child, COORDINATION)) {
        return None;
    }

    let candidate = |sister: &SyntaxNode| sister.head() != node.head() && nav.is(sister, JJ_OR_NNP);

    children.iter().enumerate().find_map(|(i, &anchor)| {
        if !nav.is(anchor, JJ_OR_NNP) {
            return None;
        }
        children[i + 1..]
            .iter()
            .copied()
            .find(|sister| candidate(sister))
            .or_else(|| children[..i].iter().rev().copied().find(|sister| candidate(sister)))
            .map(|target| Match::new(node, target))
    })
}

/// `NP|WHNP < (NP=target <: CD $- /^,$/ $-- NP|WHNP !$ CC|CONJP)`
fn amod3<'n>(nav: &Navigator<'_>, node: &'n SyntaxNode) -> Option<Match<'n>> {
    if !nav.is(node, NP_OR_WHNP) {
        return None;
    }
    let children = nav.children(node);
    if children.iter().any(|child| nav.is(child, COORDINATION)) {
        return None;
    }

    children.iter().enumerate().skip(1).find_map(|(i, &target)| {
        let numeric = nav.is(target, NP) && nav.only_child(target, Matcher::HeadTag(Tag::CD)).is_some();
        let after_comma = nav.head_word(children[i - 1]) == Some(",");
        let nominal_before = children[..i - 1].iter().any(|sister| nav.is(sister, NP_OR_WHNP));
        (numeric && after_comma && nominal_before && target.head() != node.head())
            .then_some(Match::new(node, target))
    })
}
