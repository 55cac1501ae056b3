//! AST node definitions and the node arena.
//!
//! The tree is a single append-only arena: nodes are addressed by [`NodeId`]
//! and reference their parent and children by index, never by pointer. Index
//! 0 always holds the [`Module`](NodeKind::Module) root, and indices are
//! stable once assigned. Because the parent/child web is made of indices,
//! the parser's re-rooting step ([`Ast::splice_above`]) is a couple of field
//! updates instead of a pointer rewrite, and the structural invariants stay
//! cheap to check ([`Ast::validate`]).

use std::fmt;

use lunec_util::{Idx, IndexVec, Span};

/// Typed index of a node in the AST arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl Idx for NodeId {
    #[inline]
    fn from_usize(idx: usize) -> Self {
        debug_assert!(idx <= u32::MAX as usize);
        NodeId(idx as u32)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Operator precedence levels, ascending
///
/// Higher numbers bind tighter. [`VALUE`](prec::VALUE) is the synthetic
/// level of leaves and parenthesised groups; it outranks every real
/// operator, so nothing re-roots above such a node's contents.
pub mod prec {
    /// Assignment: `=`
    pub const ASSIGN: u8 = 1;

    /// Additive: `+`, `-`
    pub const TERM: u8 = 2;

    /// Multiplicative: `*`, `/`
    pub const FACTOR: u8 = 3;

    /// Exponentiation: `^` (right-associative)
    pub const POWER: u8 = 4;

    /// Leaves and parenthesised groups
    pub const VALUE: u8 = 5;
}

/// Binary operator kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    /// `=`
    Assign,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^`
    Pow,
}

impl BinOp {
    /// The operator's natural precedence level.
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Assign => prec::ASSIGN,
            BinOp::Add | BinOp::Sub => prec::TERM,
            BinOp::Mul | BinOp::Div => prec::FACTOR,
            BinOp::Pow => prec::POWER,
        }
    }

    /// Only `^` groups to the right: `2 ^ 3 ^ 2` is `2 ^ (3 ^ 2)`.
    pub fn is_right_associative(self) -> bool {
        matches!(self, BinOp::Pow)
    }

    /// Surface syntax of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Assign => "=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Pow => "^",
        }
    }
}

/// Node kind with its kind-specific payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Root of the tree; children are the top-level definitions
    Module {
        /// Name from the `module <name>;` declaration, if present
        name: Option<String>,
    },

    /// `def <name> : <expr>;` - one child, the RHS expression
    DefConstant { name: String },

    /// `def <name> = <expr>;` - one child, the RHS expression
    ///
    /// Also used for function parameters, whose "expression" is the type
    /// identifier.
    DefVariable { name: String },

    /// `fn (<params>) <ret?> => <body>` - parameter list then body
    Function {
        /// Optional return type identifier between `)` and `=>`
        return_type: Option<String>,
    },

    /// `{ ... }` - zero or more statements in source order
    Block,

    /// Wrapper holding exactly one child: a leaf or an operator tree root
    Expression,

    /// Infix operation - exactly two children, left then right
    Operation {
        op: BinOp,
        /// Stored precedence: the operator's natural level, overwritten
        /// with [`prec::VALUE`] when the operation is the root of a
        /// parenthesised group so later re-rooting treats it as a leaf.
        precedence: u8,
    },

    /// Integer literal - no children
    IntegerLiteral { value: i64 },

    /// Identifier - no children
    Identifier { name: String },
}

/// A node in the arena
#[derive(Clone, Debug)]
pub struct Node {
    /// What this node is
    pub kind: NodeKind,
    /// Owning node, `None` only for the root
    pub parent: Option<NodeId>,
    /// Ordered child indices
    pub children: Vec<NodeId>,
    /// Originating source range
    pub span: Span,
}

/// The node arena holding one parsed source file
///
/// # Examples
///
/// ```
/// use lunec_par::{Ast, NodeKind};
/// use lunec_util::Span;
///
/// let mut ast = Ast::new(Span::new(0, 10));
/// let def = ast.alloc(
///     NodeKind::DefVariable { name: "x".into() },
///     Ast::ROOT,
///     Span::new(0, 5),
/// );
/// assert_eq!(ast.node(def).parent, Some(Ast::ROOT));
/// assert!(ast.validate().is_err()); // the definition has no expression yet
/// ```
#[derive(Debug)]
pub struct Ast {
    nodes: IndexVec<NodeId, Node>,
}

impl Ast {
    /// Index of the `Module` root, fixed at creation.
    pub const ROOT: NodeId = NodeId(0);

    /// Create an arena holding an unnamed `Module` root covering `span`.
    pub fn new(span: Span) -> Self {
        let mut nodes = IndexVec::new();
        nodes.push(Node {
            kind: NodeKind::Module { name: None },
            parent: None,
            children: Vec::new(),
            span,
        });
        Self { nodes }
    }

    /// Number of nodes in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// The arena always holds at least the root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Borrow a node.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Mutably borrow a node.
    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    /// Append a new node as the last child of `parent`.
    pub fn alloc(&mut self, kind: NodeKind, parent: NodeId, span: Span) -> NodeId {
        let id = self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: Vec::new(),
            span,
        });
        self.nodes[parent].children.push(id);
        id
    }

    /// Splice a new node between `pivot` and its parent.
    ///
    /// This is the re-parenting primitive of expression parsing. In one
    /// operation it (i) replaces `pivot` with the new node in the former
    /// parent's child list, (ii) adopts `pivot` as the new node's first
    /// child, and (iii) repoints `pivot`'s parent index - so the
    /// parent/child invariants hold before and after, never in between.
    ///
    /// # Panics
    ///
    /// Panics if `pivot` is the root; the parser only splices inside an
    /// expression, whose wrapper node is always above the pivot.
    pub fn splice_above(&mut self, pivot: NodeId, kind: NodeKind, span: Span) -> NodeId {
        let parent = self.nodes[pivot]
            .parent
            .expect("splice pivot is never the root");
        let slot = self.nodes[parent]
            .children
            .iter()
            .position(|&c| c == pivot)
            .expect("pivot is linked into its parent's child list");

        let id = self.nodes.push(Node {
            kind,
            parent: Some(parent),
            children: vec![pivot],
            span,
        });
        self.nodes[parent].children[slot] = id;
        self.nodes[pivot].parent = Some(id);
        id
    }

    /// Effective precedence of a node during re-rooting.
    ///
    /// Operations carry their stored level; everything else is a value
    /// ([`prec::VALUE`]).
    pub fn precedence(&self, id: NodeId) -> u8 {
        match self.nodes[id].kind {
            NodeKind::Operation { precedence, .. } => precedence,
            _ => prec::VALUE,
        }
    }

    /// Mark `id` as the root of a parenthesised group.
    ///
    /// Raises a group-root operation to [`prec::VALUE`] so the parentheses
    /// act as a barrier; a no-op for leaves, which are already values.
    pub fn mark_group(&mut self, id: NodeId) {
        if let NodeKind::Operation { precedence, .. } = &mut self.nodes[id].kind {
            *precedence = prec::VALUE;
        }
    }

    /// The declared module name, if a `module` declaration was parsed.
    pub fn module_name(&self) -> Option<&str> {
        match &self.nodes[Self::ROOT].kind {
            NodeKind::Module { name } => name.as_deref(),
            _ => None,
        }
    }

    /// Record the module name from a `module <name>;` declaration.
    pub fn set_module_name(&mut self, new_name: String) {
        if let NodeKind::Module { name } = &mut self.nodes[Self::ROOT].kind {
            *name = Some(new_name);
        }
    }

    /// Check every structural invariant of the tree.
    ///
    /// Verifies acyclicity, parent/child consistency, the per-kind child
    /// arities, and the right-spine precedence ordering of operator trees.
    /// Returns a description of the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        match &self.nodes[Self::ROOT].kind {
            NodeKind::Module { .. } => {}
            kind => return Err(format!("root node is {kind:?}, not a module")),
        }
        if self.nodes[Self::ROOT].parent.is_some() {
            return Err("root node has a parent".into());
        }

        for id in self.nodes.indices() {
            let node = &self.nodes[id];

            // Acyclicity: following parents reaches the root within len steps.
            if id != Self::ROOT {
                let mut current = id;
                let mut steps = 0;
                loop {
                    match self.nodes[current].parent {
                        Some(parent) => current = parent,
                        None => break,
                    }
                    steps += 1;
                    if steps > self.len() {
                        return Err(format!("node {id:?} is on a parent cycle"));
                    }
                }
                if current != Self::ROOT {
                    return Err(format!("node {id:?} does not reach the root"));
                }
            }

            // Parent/child consistency, both directions.
            if let Some(parent) = node.parent {
                let occurrences = self.nodes[parent]
                    .children
                    .iter()
                    .filter(|&&c| c == id)
                    .count();
                if occurrences != 1 {
                    return Err(format!(
                        "node {id:?} appears {occurrences} times in its parent's children"
                    ));
                }
            }
            for &child in &node.children {
                if self.nodes[child].parent != Some(id) {
                    return Err(format!(
                        "child {child:?} of {id:?} points to parent {:?}",
                        self.nodes[child].parent
                    ));
                }
            }

            // Per-kind arities.
            let arity_violation = match node.kind {
                NodeKind::Expression => node.children.len() != 1,
                NodeKind::Operation { .. } => node.children.len() != 2,
                NodeKind::DefConstant { .. } | NodeKind::DefVariable { .. } => {
                    node.children.len() != 1
                }
                NodeKind::IntegerLiteral { .. } | NodeKind::Identifier { .. } => {
                    !node.children.is_empty()
                }
                NodeKind::Module { .. } | NodeKind::Function { .. } | NodeKind::Block => false,
            };
            if arity_violation {
                return Err(format!(
                    "node {id:?} ({:?}) has {} children",
                    node.kind,
                    node.children.len()
                ));
            }

            // Right-spine precedence ordering.
            if let NodeKind::Operation { op, precedence } = node.kind {
                let right = node.children[1];
                if let NodeKind::Operation {
                    precedence: right_precedence,
                    ..
                } = self.nodes[right].kind
                {
                    let ordered = precedence < right_precedence
                        || (precedence == right_precedence && op.is_right_associative());
                    if !ordered {
                        return Err(format!(
                            "operation {id:?} (level {precedence}) holds right child \
                             {right:?} (level {right_precedence})"
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId) -> fmt::Result {
        let node = &self.nodes[id];
        match &node.kind {
            NodeKind::Module { .. } => {
                // The root is handled by Display; a nested module never exists.
                Ok(())
            }
            NodeKind::DefConstant { name } => {
                write!(f, "Const {name} = ")?;
                self.fmt_node(f, node.children[0])
            }
            NodeKind::DefVariable { name } => {
                write!(f, "Var {name} = ")?;
                self.fmt_node(f, node.children[0])
            }
            NodeKind::Expression => self.fmt_node(f, node.children[0]),
            NodeKind::Operation { op, .. } => {
                write!(f, "({} ", op.symbol())?;
                self.fmt_node(f, node.children[0])?;
                write!(f, " ")?;
                self.fmt_node(f, node.children[1])?;
                write!(f, ")")
            }
            NodeKind::IntegerLiteral { value } => write!(f, "{value}"),
            NodeKind::Identifier { name } => write!(f, "{name}"),
            NodeKind::Function { return_type } => {
                let (params, body) = node
                    .children
                    .split_at(node.children.len().saturating_sub(1));
                write!(f, "Fn(")?;
                for (i, &param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    if let NodeKind::DefVariable { name } = &self.nodes[param].kind {
                        write!(f, "{name} = ")?;
                        self.fmt_node(f, self.nodes[param].children[0])?;
                    }
                }
                write!(f, ")")?;
                if let Some(ret) = return_type {
                    write!(f, " {ret}")?;
                }
                write!(f, " => ")?;
                if let [body] = body {
                    self.fmt_node(f, *body)?;
                }
                Ok(())
            }
            NodeKind::Block => {
                if node.children.is_empty() {
                    return write!(f, "{{ }}");
                }
                write!(f, "{{ ")?;
                for (i, &stmt) in node.children.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    self.fmt_node(f, stmt)?;
                }
                write!(f, " }}")
            }
        }
    }
}

/// Textual dump of the tree, one line per top-level definition
///
/// A named module contributes a leading `Module <name>` line. Expressions
/// render in S-expression style, e.g. `Var x = (+ 1 (* 2 3))`.
impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = &self.nodes[Self::ROOT];
        let mut first = true;
        if let NodeKind::Module { name: Some(name) } = &root.kind {
            write!(f, "Module {name}")?;
            first = false;
        }
        for &child in &root.children {
            if !first {
                writeln!(f)?;
            }
            first = false;
            self.fmt_node(f, child)?;
        }
        Ok(())
    }
}
