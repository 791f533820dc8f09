use log::trace;

use crate::errors::errors::{Error, ErrorImpl};

use super::node::{SyntaxNode, Tree};

pub fn validate(tree: &Tree) -> Result<(), Error> {
    validate_node(tree.root_node(), tree.source().as_bytes())
}

/// Walks the tree depth-first in pre-order and fails on the first node that
/// is an error or is missing. Only that first node is ever reported.
pub fn validate_node<N: SyntaxNode>(root: N, source: &[u8]) -> Result<(), Error> {
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        if node.is_missing() {
            trace!("missing {} at {}", node.kind(), node.start_point());
            return Err(Error::new(
                ErrorImpl::MissingSyntax {
                    expected: node.kind().to_string(),
                },
                node.start_point(),
            ));
        }

        if node.has_error() {
            trace!("error node at {}", node.start_point());
            return Err(Error::new(
                ErrorImpl::InvalidSyntax {
                    found: first_word(source, node.start_byte(), node.end_byte()),
                },
                node.start_point(),
            ));
        }

        stack.extend(node.children().into_iter().rev());
    }

    Ok(())
}

fn first_word(source: &[u8], start: usize, end: usize) -> String {
    let text = source.get(start..end).unwrap_or_default();

    String::from_utf8_lossy(text)
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_string()
}
