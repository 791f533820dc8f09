use crate::{lexer::tokens::Token, Position};

/// The node contract the semantic core reads concrete trees through.
///
/// Any parsing engine that can answer these questions can feed the
/// transformer; this crate's own engine implements it for `&CstNode`.
pub trait SyntaxNode: Copy {
    /// Type tag of the node (`"declare"`, `"binary_expr"`, `"("` ...).
    fn kind(&self) -> &str;
    fn start_point(&self) -> Position;
    fn end_point(&self) -> Position;
    fn start_byte(&self) -> usize;
    fn end_byte(&self) -> usize;
    fn children(&self) -> Vec<Self>;
    /// False for punctuation and keywords.
    fn is_named(&self) -> bool;
    fn child_by_field_name(&self, field: &str) -> Option<Self>;
    fn has_error(&self) -> bool;
    fn is_missing(&self) -> bool;

    fn named_children(&self) -> Vec<Self> {
        self.children()
            .into_iter()
            .filter(|child| child.is_named())
            .collect()
    }

    fn first_named_child(&self) -> Option<Self> {
        self.children().into_iter().find(|child| child.is_named())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CstNode {
    kind: &'static str,
    named: bool,
    missing: bool,
    start: Position,
    end: Position,
    children: Vec<CstNode>,
    fields: Vec<(&'static str, usize)>,
}

impl CstNode {
    pub fn leaf(token: &Token) -> CstNode {
        CstNode {
            kind: token.kind.tag(),
            named: token.kind.is_named(),
            missing: false,
            start: token.span.start,
            end: token.span.end,
            children: vec![],
            fields: vec![],
        }
    }

    /// A zero-width placeholder for a required node that never appeared.
    pub fn missing(kind: &'static str, named: bool, at: Position) -> CstNode {
        CstNode {
            kind,
            named,
            missing: true,
            start: at,
            end: at,
            children: vec![],
            fields: vec![],
        }
    }

    pub fn error(children: Vec<CstNode>, at: Position) -> CstNode {
        let mut builder = NodeBuilder::new("ERROR", at);
        for child in children {
            builder = builder.child(child);
        }
        builder.build()
    }

    pub fn get_kind(&self) -> &'static str {
        self.kind
    }

    pub fn get_children(&self) -> &[CstNode] {
        &self.children
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Takes the node apart, yielding its only named child when it has exactly one.
    pub fn into_only_named_child(self) -> Result<CstNode, CstNode> {
        if self.children.iter().filter(|child| child.named).count() != 1 {
            return Err(self);
        }

        let mut children = self.children;
        let index = children.iter().position(|child| child.named).unwrap_or(0);
        Ok(children.swap_remove(index))
    }

    /// Tree-sitter style s-expression of the named structure of the tree.
    pub fn to_sexp(&self) -> String {
        let mut out = String::new();
        self.write_sexp(&mut out, None);
        out
    }

    fn write_sexp(&self, out: &mut String, field: Option<&str>) {
        if let Some(field) = field {
            out.push_str(&format!("{}: ", field));
        }

        if self.missing {
            out.push_str(&format!("(MISSING {})", self.kind));
            return;
        }

        out.push_str(&format!("({}", self.kind));
        for (index, child) in self.children.iter().enumerate() {
            if !child.named {
                continue;
            }

            out.push(' ');
            child.write_sexp(out, self.field_of(index));
        }
        out.push(')');
    }

    fn field_of(&self, index: usize) -> Option<&'static str> {
        self.fields
            .iter()
            .find(|(_, child)| *child == index)
            .map(|(name, _)| *name)
    }
}

/// Accumulates children in source order, recording field names on the way.
pub struct NodeBuilder {
    kind: &'static str,
    at: Position,
    children: Vec<CstNode>,
    fields: Vec<(&'static str, usize)>,
}

impl NodeBuilder {
    /// `at` is used as both ends of the node when it ends up childless.
    pub fn new(kind: &'static str, at: Position) -> NodeBuilder {
        NodeBuilder {
            kind,
            at,
            children: vec![],
            fields: vec![],
        }
    }

    pub fn child(mut self, node: CstNode) -> NodeBuilder {
        self.children.push(node);
        self
    }

    pub fn field(mut self, name: &'static str, node: CstNode) -> NodeBuilder {
        self.fields.push((name, self.children.len()));
        self.children.push(node);
        self
    }

    pub fn build(self) -> CstNode {
        let start = self.children.first().map_or(self.at, |child| child.start);
        let end = self.children.last().map_or(self.at, |child| child.end);

        CstNode {
            kind: self.kind,
            named: true,
            missing: false,
            start,
            end,
            children: self.children,
            fields: self.fields,
        }
    }
}

impl<'a> SyntaxNode for &'a CstNode {
    fn kind(&self) -> &str {
        self.kind
    }

    fn start_point(&self) -> Position {
        self.start
    }

    fn end_point(&self) -> Position {
        self.end
    }

    fn start_byte(&self) -> usize {
        self.start.offset
    }

    fn end_byte(&self) -> usize {
        self.end.offset
    }

    fn children(&self) -> Vec<Self> {
        self.children.iter().collect()
    }

    fn is_named(&self) -> bool {
        self.named
    }

    fn child_by_field_name(&self, field: &str) -> Option<Self> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .and_then(|(_, index)| self.children.get(*index))
    }

    fn has_error(&self) -> bool {
        self.kind == "ERROR"
    }

    fn is_missing(&self) -> bool {
        self.missing
    }
}

/// A parsed source buffer together with its root node.
#[derive(Debug, Clone)]
pub struct Tree {
    root: CstNode,
    source: String,
}

impl Tree {
    pub fn new(root: CstNode, source: String) -> Tree {
        Tree { root, source }
    }

    pub fn root_node(&self) -> &CstNode {
        &self.root
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}
