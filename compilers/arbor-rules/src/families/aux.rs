use arbor_protocol::{DependencyLabel, Phrase, Tag};
use arbor_tree::SyntaxNode;

use crate::catalogue::{Match, RelationFamily, Rule};
use crate::matcher::Matcher;
use crate::nav::Navigator;

pub fn family() -> RelationFamily {
    RelationFamily::new(DependencyLabel::Aux, [Rule::new("aux3", aux3)])
}

/// `CONJP < TO=target < VB`
fn aux3<'n>(nav: &Navigator<'_>, node: &'n SyntaxNode) -> Option<Match<'n>> {
    if !nav.is(node, Matcher::Phrase(Phrase::CONJP)) {
        return None;
    }
    let to = nav.immediate_child(node, Matcher::Tag(Tag::TO))?;
    nav.immediate_child(node, Matcher::Tag(Tag::VB))?;
    Some(Match::new(node, to))
}
