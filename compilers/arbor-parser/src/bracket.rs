//! Reader for binarized reference trees in bracketed form.
//!
//! Constituents are written `(LABEL FLAG child child?)` where `FLAG` is `l` or `r`
//! for binary nodes (head on the left or right child) and `s` for single-child
//! nodes; a trailing `*` on the label marks a temporary node. Tokens are `(TAG word)`.
//!
//! ```text
//! (S r (NP r (DT The) (NN cat)) (VBD sat))
//! ```

use nom::{
    branch::alt,
    bytes::complete::take_till1,
    character::complete::{char, multispace0, multispace1, one_of},
    combinator::{all_consuming, map},
    multi::many1,
    sequence::{delimited, pair, preceded, separated_pair, tuple},
    IResult,
};

use arbor_protocol::{CfgTree, Constituent, NodeId, Tag, TaggedWord};

use crate::error::BracketError;

#[derive(Debug, Clone, PartialEq)]
enum RawTree<'a> {
    Token { tag: &'a str, word: &'a str },
    Phrase { label: &'a str, flag: char, children: Vec<RawTree<'a>> },
}

fn atom(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c.is_whitespace() || c == '(' || c == ')')(input)
}

fn phrase(input: &str) -> IResult<&str, RawTree<'_>> {
    map(
        tuple((atom, multispace1, one_of("lrs"), many1(preceded(multispace1, raw_tree)))),
        |(label, _, flag, children)| RawTree::Phrase { label, flag, children },
    )(input)
}

fn token(input: &str) -> IResult<&str, RawTree<'_>> {
    map(separated_pair(atom, multispace1, atom), |(tag, word)| RawTree::Token { tag, word })(input)
}

fn raw_tree(input: &str) -> IResult<&str, RawTree<'_>> {
    delimited(
        pair(char('('), multispace0),
        alt((phrase, token)),
        pair(multispace0, char(')')),
    )(input)
}

/// Parses one bracketed tree; nodes are numbered in derivation (post-) order.
pub fn parse_tree(input: &str) -> Result<CfgTree, BracketError> {
    let (_, raw) = all_consuming(delimited(multispace0, raw_tree, multispace0))(input).map_err(|err| {
        let offset = match err {
            nom::Err::Error(e) | nom::Err::Failure(e) => input.len() - e.input.len(),
            nom::Err::Incomplete(_) => input.len(),
        };
        BracketError::Syntax { offset }
    })?;

    let mut tree = CfgTree::new();
    build(&raw, &mut tree)?;
    tree.validate()?;
    Ok(tree)
}

/// One tree per non-blank line.
pub fn parse_treebank(input: &str) -> Result<Vec<CfgTree>, BracketError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            parse_tree(line).map_err(|source| BracketError::Line {
                line: index + 1,
                source: Box::new(source),
            })
        })
        .collect()
}

fn build(raw: &RawTree<'_>, tree: &mut CfgTree) -> Result<NodeId, BracketError> {
    match raw {
        RawTree::Token { tag, word } => {
            let tag: Tag = tag.parse()?;
            Ok(tree.push_leaf(TaggedWord::new(*word, tag)))
        }
        RawTree::Phrase { label, flag, children } => {
            let constituent: Constituent = label.parse()?;
            let ids = children
                .iter()
                .map(|child| build(child, tree))
                .collect::<Result<Vec<_>, _>>()?;

            match (*flag, ids.as_slice()) {
                ('s', [only]) => {
                    if constituent.is_temporary() {
                        return Err(BracketError::TemporaryUnary(label.to_string()));
                    }
                    Ok(tree.push_unary(constituent, *only)?)
                }
                ('l' | 'r', [left, right]) => Ok(tree.push_binary(
                    constituent.extract(),
                    *left,
                    *right,
                    *flag == 'l',
                    constituent.is_temporary(),
                )?),
                (flag, found) => Err(BracketError::Arity {
                    label: label.to_string(),
                    flag,
                    expected: if flag == 's' { 1 } else { 2 },
                    found: found.len(),
                }),
            }
        }
    }
}
