//! Depth-first traversal over a borrowed node tree.
//!
//! The walk keeps its own stack, so arbitrarily deep documents cannot
//! overflow the call stack.

use crate::node::Node;

/// Pre-order iterator: a node is yielded before its children, and siblings
/// in document order.
pub struct PreOrder<'a> {
    stack: Vec<&'a Node>,
}
impl<'a> PreOrder<'a> {
    pub fn new(root: &'a Node) -> Self {
        Self { stack: vec![root] }
    }
}
impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Collects every node under `root` (inclusive) that satisfies `predicate`,
/// in pre-order.
pub fn collect<'a, P>(root: &'a Node, mut predicate: P) -> Vec<&'a Node>
where
    P: FnMut(&Node) -> bool,
{
    root.descendants().filter(|node| predicate(node)).collect()
}
