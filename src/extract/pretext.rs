//! Reading-order text reconstruction for the parenthesis test
//!
//! A link counts as parenthetical when the plain text a reader has seen
//! before reaching it contains an unclosed `(`. The text preceding a node is
//! the text preceding its parent, plus everything inside the parent that comes
//! before the node (text nodes and whole earlier sibling subtrees).

use ego_tree::{NodeId, NodeRef};
use scraper::node::Node;
use std::collections::HashMap;
use std::rc::Rc;

/// Memo of node id -> text preceding that node
///
/// Node ids are only meaningful inside the tree they came from, so a memo
/// must never outlive a single extraction over a single document. Texts are
/// shared, so a memo hit never copies the string.
#[derive(Debug, Default)]
pub struct PreTextMemo {
    texts: HashMap<NodeId, Rc<str>>,
}

impl PreTextMemo {
    /// Creates an empty memo
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all text that precedes `node` in reading order
    pub fn pre_text(&mut self, node: NodeRef<'_, Node>) -> Rc<str> {
        if let Some(text) = self.texts.get(&node.id()) {
            return Rc::clone(text);
        }

        let mut text = String::new();
        if let Some(parent) = node.parent() {
            text.push_str(&self.pre_text(parent));
            for sibling in parent.children() {
                if sibling.id() == node.id() {
                    break;
                }
                push_subtree_text(sibling, &mut text);
            }
        }

        let text: Rc<str> = Rc::from(text);
        self.texts.insert(node.id(), Rc::clone(&text));
        text
    }

    /// True if `node` sits inside an unterminated opening parenthesis
    pub fn is_inside_open_parenthesis(&mut self, node: NodeRef<'_, Node>) -> bool {
        has_unclosed_parenthesis(&self.pre_text(node))
    }
}

/// Appends the text of `node` and all of its descendants; comments are skipped
fn push_subtree_text(node: NodeRef<'_, Node>, out: &mut String) {
    for descendant in node.descendants() {
        if let Node::Text(text) = descendant.value() {
            out.push_str(text);
        }
    }
}

/// Scans backwards for a `(` not balanced by a later `)`
pub fn has_unclosed_parenthesis(text: &str) -> bool {
    let mut closed = 0usize;
    for ch in text.chars().rev() {
        match ch {
            ')' => closed += 1,
            '(' if closed > 0 => closed -= 1,
            '(' => return true,
            _ => {}
        }
    }
    false
}
