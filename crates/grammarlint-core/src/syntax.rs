//! Arena-backed syntax tree for one grammar file.
//!
//! Nodes live in a flat `Vec` owned by [`SyntaxTree`] and refer to each other by
//! [`NodeId`]. A node's parent is a plain id (a back-reference, not ownership).
//! The tree also keeps the significant lexical tokens of the file so that checks
//! can look at the token immediately preceding a node.
//!
//! Trees are built once through [`TreeBuilder`] and are immutable afterwards.

use std::fmt;

use crate::kinds::NodeKind;

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A significant (non-whitespace, non-comment) token of the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// 1-based line.
    pub line: u32,
    /// 0-based character position within the line.
    pub column: u32,
}

#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub text: String,
    pub line: u32,
    pub column: u32,
    /// Index into [`SyntaxTree::tokens`] of the token this node was built from.
    pub token_index: Option<usize>,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    pub index_in_parent: usize,
}

#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    tokens: Vec<Token>,
    root: NodeId,
}

/// Structural invariant violation found by [`SyntaxTree::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedTree {
    pub line: u32,
    pub reason: String,
}

impl fmt::Display for MalformedTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed syntax tree at line {}: {}", self.line, self.reason)
    }
}

impl std::error::Error for MalformedTree {}

impl SyntaxTree {
    pub fn root(&self) -> Node<'_> {
        self.node(self.root)
    }

    pub fn node(&self, id: NodeId) -> Node<'_> {
        Node { tree: self, id }
    }

    pub fn get(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Check the parent/child invariants every traversal relies on:
    /// the root has no parent, and `parent.children[index_in_parent] == self`
    /// for every child reachable from the root.
    pub fn validate(&self) -> Result<(), MalformedTree> {
        let root = self.get(self.root);
        if root.parent.is_some() {
            return Err(MalformedTree {
                line: root.line,
                reason: "root node has a parent".to_string(),
            });
        }
        let mut stack = vec![self.root];
        let mut visited = 0usize;
        while let Some(id) = stack.pop() {
            visited += 1;
            if visited > self.nodes.len() {
                return Err(MalformedTree {
                    line: root.line,
                    reason: "node reachable more than once".to_string(),
                });
            }
            let node = self.get(id);
            for (index, child_id) in node.children.iter().enumerate() {
                let child = self
                    .nodes
                    .get(child_id.index())
                    .ok_or_else(|| MalformedTree {
                        line: node.line,
                        reason: format!("{} references a missing child", node.kind),
                    })?;
                if child.parent != Some(id) || child.index_in_parent != index {
                    return Err(MalformedTree {
                        line: child.line,
                        reason: format!(
                            "{} is not child #{} of its parent {}",
                            child.kind, index, node.kind
                        ),
                    });
                }
                stack.push(*child_id);
            }
        }
        Ok(())
    }
}

/// Copyable cursor over one node of a [`SyntaxTree`].
#[derive(Clone, Copy)]
pub struct Node<'a> {
    tree: &'a SyntaxTree,
    id: NodeId,
}

impl<'a> Node<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'a SyntaxTree {
        self.tree
    }

    fn data(&self) -> &'a SyntaxNode {
        self.tree.get(self.id)
    }

    pub fn kind(&self) -> NodeKind {
        self.data().kind
    }

    pub fn text(&self) -> &'a str {
        &self.data().text
    }

    pub fn line(&self) -> u32 {
        self.data().line
    }

    pub fn column(&self) -> u32 {
        self.data().column
    }

    pub fn token_index(&self) -> Option<usize> {
        self.data().token_index
    }

    pub fn child_count(&self) -> usize {
        self.data().children.len()
    }

    pub fn child(&self, index: usize) -> Option<Node<'a>> {
        let tree = self.tree;
        self.data().children.get(index).map(|id| tree.node(*id))
    }

    pub fn first_child(&self) -> Option<Node<'a>> {
        self.child(0)
    }

    pub fn last_child(&self) -> Option<Node<'a>> {
        self.child_count().checked_sub(1).and_then(|i| self.child(i))
    }

    pub fn children(&self) -> impl DoubleEndedIterator<Item = Node<'a>> + ExactSizeIterator + 'a {
        let tree = self.tree;
        self.data().children.iter().map(move |id| tree.node(*id))
    }

    pub fn parent(&self) -> Option<Node<'a>> {
        self.data().parent.map(|id| self.tree.node(id))
    }

    pub fn index_in_parent(&self) -> usize {
        self.data().index_in_parent
    }

    pub fn next_sibling(&self) -> Option<Node<'a>> {
        self.parent()
            .and_then(|p| p.child(self.index_in_parent() + 1))
    }

    /// The significant token right before the token this node was built from.
    pub fn token_before(&self) -> Option<&'a Token> {
        let index = self.token_index()?;
        index
            .checked_sub(1)
            .and_then(|i| self.tree.tokens.get(i))
    }

    pub fn is_on_same_line(&self, other: &Node<'_>) -> bool {
        self.line() == other.line()
    }

    /// Column of the first character after this node's text, assuming the text
    /// does not span lines.
    pub fn end_column(&self) -> u32 {
        self.column() + self.text().chars().count() as u32
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({:?})@{}:{}",
            self.kind(),
            self.text(),
            self.line(),
            self.column()
        )
    }
}

/// Incremental constructor for a [`SyntaxTree`].
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<SyntaxNode>,
    tokens: Vec<Token>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a significant token; returns its index in the token stream.
    pub fn push_token(&mut self, token: Token) -> usize {
        self.tokens.push(token);
        self.tokens.len() - 1
    }

    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Create a detached node.
    pub fn node(
        &mut self,
        kind: NodeKind,
        text: impl Into<String>,
        line: u32,
        column: u32,
        token_index: Option<usize>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SyntaxNode {
            kind,
            text: text.into(),
            line,
            column,
            token_index,
            children: Vec::new(),
            parent: None,
            index_in_parent: 0,
        });
        id
    }

    /// Create a node positioned at the recorded token `token_index`.
    pub fn node_at_token(
        &mut self,
        kind: NodeKind,
        text: impl Into<String>,
        token_index: usize,
    ) -> NodeId {
        let (line, column) = self
            .tokens
            .get(token_index)
            .map(|t| (t.line, t.column))
            .unwrap_or((0, 0));
        self.node(kind, text, line, column, Some(token_index))
    }

    /// Append `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let index = self.nodes[parent.index()].children.len();
        self.nodes[parent.index()].children.push(child);
        let node = &mut self.nodes[child.index()];
        node.parent = Some(parent);
        node.index_in_parent = index;
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.index()].kind
    }

    pub fn finish(self, root: NodeId) -> SyntaxTree {
        SyntaxTree {
            nodes: self.nodes,
            tokens: self.tokens,
            root,
        }
    }
}
