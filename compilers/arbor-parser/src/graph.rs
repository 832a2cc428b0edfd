use std::collections::HashMap;

use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction};

use arbor_protocol::DependencyLabel;
use arbor_tree::Link;

/// Token-level dependency graph: nodes are token positions, edges run head -> dependent.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    graph: Graph<usize, DependencyLabel, Directed>,
    index_map: HashMap<usize, NodeIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A graph over `tokens` positions holding every link.
    pub fn from_links<'a>(tokens: usize, links: impl IntoIterator<Item = &'a Link>) -> Self {
        let mut graph = Self::new();
        for token in 0..tokens {
            graph.add_token(token);
        }
        for link in links {
            graph.add_link(link);
        }
        graph
    }

    pub fn add_token(&mut self, token: usize) -> NodeIndex {
        *self
            .index_map
            .entry(token)
            .or_insert_with(|| self.graph.add_node(token))
    }

    pub fn add_link(&mut self, link: &Link) {
        let head = self.add_token(link.head);
        let dependent = self.add_token(link.dependent);
        self.graph.add_edge(head, dependent, link.label);
    }

    pub fn token_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Heads governing `dependent`, with the relation label.
    pub fn head_of(&self, dependent: usize) -> Vec<(usize, DependencyLabel)> {
        self.neighbours(dependent, Direction::Incoming)
    }

    pub fn dependents_of(&self, head: usize) -> Vec<(usize, DependencyLabel)> {
        self.neighbours(head, Direction::Outgoing)
    }

    /// Tokens without any incoming link.
    pub fn roots(&self) -> Vec<usize> {
        let mut roots: Vec<usize> = self
            .graph
            .node_indices()
            .filter(|&idx| self.graph.edges_directed(idx, Direction::Incoming).next().is_none())
            .map(|idx| self.graph[idx])
            .collect();
        roots.sort_unstable();
        roots
    }

    fn neighbours(&self, token: usize, direction: Direction) -> Vec<(usize, DependencyLabel)> {
        let Some(&idx) = self.index_map.get(&token) else {
            return Vec::new();
        };
        let mut found: Vec<(usize, DependencyLabel)> = self
            .graph
            .edges_directed(idx, direction)
            .map(|edge| {
                let other = match direction {
                    Direction::Incoming => edge.source(),
                    Direction::Outgoing => edge.target(),
                };
                (self.graph[other], *edge.weight())
            })
            .collect();
        found.sort_unstable();
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_queries() {
        let links = [
            Link::new(DependencyLabel::Nsubj, 2, 0),
            Link::new(DependencyLabel::Amod, 0, 1),
        ];
        let graph = DependencyGraph::from_links(3, &links);

        assert_eq!(graph.token_count(), 3);
        assert_eq!(graph.link_count(), 2);
        assert_eq!(graph.head_of(0), vec![(2, DependencyLabel::Nsubj)]);
        assert_eq!(graph.dependents_of(0), vec![(1, DependencyLabel::Amod)]);
        assert_eq!(graph.roots(), vec![2]);
        assert!(graph.head_of(7).is_empty());
    }
}
