use std::fmt;

use arbor_protocol::DependencyLabel;
use arbor_tree::{LexicalContext, Link, LinkDeriver, SyntaxNode};

use crate::families;
use crate::nav::Navigator;

/// Result of a successful pattern: the edge runs from the governor's head to the target's head.
#[derive(Debug, Clone, Copy)]
pub struct Match<'n> {
    pub governor: &'n SyntaxNode,
    pub target: &'n SyntaxNode,
}

impl<'n> Match<'n> {
    pub fn new(governor: &'n SyntaxNode, target: &'n SyntaxNode) -> Self {
        Self { governor, target }
    }
}

/// A structural test against a freshly built node.
pub type Pattern = for<'n> fn(&Navigator<'_>, &'n SyntaxNode) -> Option<Match<'n>>;

#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub pattern: Pattern,
}

impl Rule {
    pub const fn new(name: &'static str, pattern: Pattern) -> Self {
        Self { name, pattern }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Ordered rules for one relation. The first rule that matches emits the family's edge.
#[derive(Debug, Clone)]
pub struct RelationFamily {
    label: DependencyLabel,
    rules: Vec<Rule>,
    enabled: bool,
}

impl RelationFamily {
    pub fn new(label: DependencyLabel, rules: impl IntoIterator<Item = Rule>) -> Self {
        Self {
            label,
            rules: rules.into_iter().collect(),
            enabled: true,
        }
    }

    pub fn label(&self) -> DependencyLabel {
        self.label
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Runs the rules in order; returns the edge of the first match.
    pub fn derive(&self, nav: &Navigator<'_>, node: &SyntaxNode) -> Option<Link> {
        self.rules.iter().find_map(|rule| {
            let found = (rule.pattern)(nav, node)?;
            log::trace!(
                "{} matched at node {} (governor {}, target {})",
                rule.name,
                node.id(),
                found.governor.id(),
                found.target.id()
            );
            Some(Link::new(self.label, found.governor.head(), found.target.head()))
        })
    }
}

/// The relation families consulted whenever a binary node is built.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    families: Vec<RelationFamily>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// `nsubj`, `aux` and `amod`.
    pub fn standard() -> Self {
        Self::new()
            .with_family(families::nsubj::family())
            .with_family(families::aux::family())
            .with_family(families::amod::family())
    }

    /// Adds a family, replacing any existing family with the same label.
    pub fn with_family(mut self, family: RelationFamily) -> Self {
        self.insert(family);
        self
    }

    pub fn insert(&mut self, family: RelationFamily) {
        match self.families.iter_mut().find(|f| f.label == family.label) {
            Some(existing) => *existing = family,
            None => self.families.push(family),
        }
    }

    pub fn families(&self) -> &[RelationFamily] {
        &self.families
    }

    pub fn family(&self, label: DependencyLabel) -> Option<&RelationFamily> {
        self.families.iter().find(|f| f.label == label)
    }

    /// Returns false if no family has this label.
    pub fn enable(&mut self, label: DependencyLabel) -> bool {
        self.set_enabled(label, true)
    }

    pub fn disable(&mut self, label: DependencyLabel) -> bool {
        self.set_enabled(label, false)
    }

    fn set_enabled(&mut self, label: DependencyLabel, enabled: bool) -> bool {
        match self.families.iter_mut().find(|f| f.label == label) {
            Some(family) => {
                family.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Runs every enabled family against the node.
    pub fn derive(&self, node: &SyntaxNode, words: &LexicalContext) -> Vec<Link> {
        let nav = Navigator::new(words);
        self.families
            .iter()
            .filter(|family| family.enabled)
            .filter_map(|family| family.derive(&nav, node))
            .collect()
    }
}

impl LinkDeriver for Catalogue {
    fn derive_links(&self, node: &SyntaxNode, words: &LexicalContext) -> Vec<Link> {
        self.derive(node, words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::Matcher;
    use crate::testing::TreeBuilder;
    use arbor_protocol::{Phrase, Tag};

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn first_leaf<'n>(nav: &Navigator<'_>, node: &'n SyntaxNode) -> Option<Match<'n>> {
        let target = nav.children(node).into_iter().next()?;
        Some(Match::new(node, target))
    }

    fn never<'n>(_nav: &Navigator<'_>, _node: &'n SyntaxNode) -> Option<Match<'n>> {
        None
    }

    fn any_jj<'n>(nav: &Navigator<'_>, node: &'n SyntaxNode) -> Option<Match<'n>> {
        let target = nav.dominates(node, Matcher::Tag(Tag::JJ))?;
        Some(Match::new(node, target))
    }

    fn two_adjectives() -> TreeBuilder {
        let mut b = TreeBuilder::new(&[("big", Tag::JJ), ("red", Tag::JJ)]);
        let big = b.leaf(0);
        let red = b.leaf(1);
        b.binary(Phrase::ADJP, big, red, false, false);
        b
    }

    #[test]
    fn test_first_match_wins() {
        init();
        let b = two_adjectives();
        let catalogue = Catalogue::new().with_family(RelationFamily::new(
            DependencyLabel::Dep,
            [Rule::new("never", never), Rule::new("first", first_leaf), Rule::new("jj", any_jj)],
        ));

        let links = catalogue.derive(b.root(), b.words());
        assert_eq!(links, vec![Link::new(DependencyLabel::Dep, 1, 0)]);
    }

    #[test]
    fn test_families_are_independent() {
        let b = two_adjectives();
        let mut catalogue = Catalogue::new()
            .with_family(RelationFamily::new(DependencyLabel::Dep, [Rule::new("first", first_leaf)]))
            .with_family(RelationFamily::new(DependencyLabel::Amod, [Rule::new("jj", any_jj)]));

        assert_eq!(catalogue.derive(b.root(), b.words()).len(), 2);

        assert!(catalogue.disable(DependencyLabel::Dep));
        assert_eq!(
            catalogue.derive(b.root(), b.words()),
            vec![Link::new(DependencyLabel::Amod, 1, 0)]
        );
        assert!(!catalogue.disable(DependencyLabel::Conj));
        assert!(catalogue.enable(DependencyLabel::Dep));
        assert!(catalogue.family(DependencyLabel::Dep).unwrap().is_enabled());
    }

    #[test]
    fn test_with_family_replaces_label() {
        let catalogue = Catalogue::standard()
            .with_family(RelationFamily::new(DependencyLabel::Amod, [Rule::new("never", never)]));

        assert_eq!(catalogue.families().len(), 3);
        assert_eq!(catalogue.family(DependencyLabel::Amod).unwrap().rules().len(), 1);
    }

    #[test]
    fn test_standard_layout() {
        let catalogue = Catalogue::standard();
        let labels: Vec<_> = catalogue.families().iter().map(RelationFamily::label).collect();
        assert_eq!(labels, vec![DependencyLabel::Nsubj, DependencyLabel::Aux, DependencyLabel::Amod]);
        assert_eq!(catalogue.family(DependencyLabel::Nsubj).unwrap().rules().len(), 5);
        assert_eq!(catalogue.family(DependencyLabel::Aux).unwrap().rules().len(), 1);
        assert_eq!(catalogue.family(DependencyLabel::Amod).unwrap().rules().len(), 3);
    }
}
