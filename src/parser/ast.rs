// AST (Abstract Syntax Tree) definitions for the Clita front end

use std::fmt;

/// Line/column position, 1-based, derived from a byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Resolve a byte offset into `source` to a line and column.
    ///
    /// Offsets past the end clamp to the end of the source.
    pub fn locate(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let mut line = 1;
        let mut column = 1;
        for (i, ch) in source.char_indices() {
            if i >= offset {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Self { line, column }
    }
}

/// Node kind discriminant shared by every AST node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    SymbolDeclaration,
    SymbolAssignment,
    Block,
    SymbolLiteral,
    NumericLiteral,
    BooleanLiteral,
    BinaryExpr,
    ComparisonExpr,
    UnaryExpr,
    Pragma,
}

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
}

impl BinOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Lt, // <
    Le, // <=
    Gt, // >
    Ge, // >=
    Eq, // =
}

impl CmpOp {
    pub fn as_str(self) -> &'static str {
        match self {
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
            CmpOp::Eq => "=",
        }
    }
}

/// Prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,    // -x
    PreDec, // --x
    PreInc, // ++x
}

impl UnOp {
    pub fn as_str(self) -> &'static str {
        match self {
            UnOp::Neg => "-",
            UnOp::PreDec => "--",
            UnOp::PreInc => "++",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolLiteral {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericLiteral {
    pub value: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BooleanLiteral {
    pub value: bool,
}

/// Leaf expressions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralExpr {
    Numeric(NumericLiteral),
    Symbol(SymbolLiteral),
    Boolean(BooleanLiteral),
}

impl LiteralExpr {
    pub fn kind(&self) -> NodeKind {
        match self {
            LiteralExpr::Numeric(_) => NodeKind::NumericLiteral,
            LiteralExpr::Symbol(_) => NodeKind::SymbolLiteral,
            LiteralExpr::Boolean(_) => NodeKind::BooleanLiteral,
        }
    }
}

/// `left op right`, right-recursive with no operator precedence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryExpr {
    pub left: Box<Expression>,
    pub op: BinOp,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComparisonExpr {
    pub left: NumericLiteral,
    pub op: CmpOp,
    pub right: NumericLiteral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryExpr {
    pub op: UnOp,
    pub operand: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Literal(LiteralExpr),
    Binary(BinaryExpr),
    Comparison(ComparisonExpr),
    Unary(UnaryExpr),
}

impl Expression {
    pub fn kind(&self) -> NodeKind {
        match self {
            Expression::Literal(lit) => lit.kind(),
            Expression::Binary(_) => NodeKind::BinaryExpr,
            Expression::Comparison(_) => NodeKind::ComparisonExpr,
            Expression::Unary(_) => NodeKind::UnaryExpr,
        }
    }
}

/// `name := init.`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolDeclaration {
    pub identifier: SymbolLiteral,
    pub init: Expression,
}

/// `name = value.`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolAssignment {
    pub identifier: SymbolLiteral,
    pub value: Expression,
}

/// Compiler directive: `` `name[argument]` ``
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pragma {
    pub name: String,
    pub argument: NumericLiteral,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Declaration(SymbolDeclaration),
    Assignment(SymbolAssignment),
    Pragma(Pragma),
}

impl Statement {
    pub fn kind(&self) -> NodeKind {
        match self {
            Statement::Declaration(_) => NodeKind::SymbolDeclaration,
            Statement::Assignment(_) => NodeKind::SymbolAssignment,
            Statement::Pragma(_) => NodeKind::Pragma,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    pub statements: Vec<Statement>,
}

/// Root of a parsed source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub body: Block,
}

impl Program {
    pub fn new() -> Self {
        Program {
            body: Block::default(),
        }
    }
}

/// Any AST node, as returned by a [`Production`](super::parse::Production) entry point
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Program(Program),
    SymbolDeclaration(SymbolDeclaration),
    SymbolAssignment(SymbolAssignment),
    Block(Block),
    SymbolLiteral(SymbolLiteral),
    NumericLiteral(NumericLiteral),
    BooleanLiteral(BooleanLiteral),
    BinaryExpr(BinaryExpr),
    ComparisonExpr(ComparisonExpr),
    UnaryExpr(UnaryExpr),
    Pragma(Pragma),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Program(_) => NodeKind::Program,
            Node::SymbolDeclaration(_) => NodeKind::SymbolDeclaration,
            Node::SymbolAssignment(_) => NodeKind::SymbolAssignment,
            Node::Block(_) => NodeKind::Block,
            Node::SymbolLiteral(_) => NodeKind::SymbolLiteral,
            Node::NumericLiteral(_) => NodeKind::NumericLiteral,
            Node::BooleanLiteral(_) => NodeKind::BooleanLiteral,
            Node::BinaryExpr(_) => NodeKind::BinaryExpr,
            Node::ComparisonExpr(_) => NodeKind::ComparisonExpr,
            Node::UnaryExpr(_) => NodeKind::UnaryExpr,
            Node::Pragma(_) => NodeKind::Pragma,
        }
    }
}

impl From<LiteralExpr> for Node {
    fn from(lit: LiteralExpr) -> Self {
        match lit {
            LiteralExpr::Numeric(n) => Node::NumericLiteral(n),
            LiteralExpr::Symbol(s) => Node::SymbolLiteral(s),
            LiteralExpr::Boolean(b) => Node::BooleanLiteral(b),
        }
    }
}

impl From<Expression> for Node {
    fn from(expr: Expression) -> Self {
        match expr {
            Expression::Literal(lit) => lit.into(),
            Expression::Binary(b) => Node::BinaryExpr(b),
            Expression::Comparison(c) => Node::ComparisonExpr(c),
            Expression::Unary(u) => Node::UnaryExpr(u),
        }
    }
}

impl From<Statement> for Node {
    fn from(stmt: Statement) -> Self {
        match stmt {
            Statement::Declaration(d) => Node::SymbolDeclaration(d),
            Statement::Assignment(a) => Node::SymbolAssignment(a),
            Statement::Pragma(p) => Node::Pragma(p),
        }
    }
}

// ===== Printing =====

impl fmt::Display for SymbolLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for NumericLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Display for BooleanLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl fmt::Display for LiteralExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralExpr::Numeric(n) => fmt::Display::fmt(n, f),
            LiteralExpr::Symbol(s) => fmt::Display::fmt(s, f),
            LiteralExpr::Boolean(b) => fmt::Display::fmt(b, f),
        }
    }
}

impl fmt::Display for BinaryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.op.as_str(), self.right)
    }
}

impl fmt::Display for ComparisonExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.op.as_str(), self.right)
    }
}

impl fmt::Display for UnaryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{})", self.op.as_str(), self.operand)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Literal(lit) => fmt::Display::fmt(lit, f),
            Expression::Binary(b) => fmt::Display::fmt(b, f),
            Expression::Comparison(c) => fmt::Display::fmt(c, f),
            Expression::Unary(u) => fmt::Display::fmt(u, f),
        }
    }
}

impl fmt::Display for SymbolDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} := {}.", self.identifier, self.init)
    }
}

impl fmt::Display for SymbolAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}.", self.identifier, self.value)
    }
}

impl fmt::Display for Pragma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}[{}]`", self.name, self.argument)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Declaration(d) => fmt::Display::fmt(d, f),
            Statement::Assignment(a) => fmt::Display::fmt(a, f),
            Statement::Pragma(p) => fmt::Display::fmt(p, f),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stmt) in self.statements.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.body, f)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Program(n) => fmt::Display::fmt(n, f),
            Node::SymbolDeclaration(n) => fmt::Display::fmt(n, f),
            Node::SymbolAssignment(n) => fmt::Display::fmt(n, f),
            Node::Block(n) => fmt::Display::fmt(n, f),
            Node::SymbolLiteral(n) => fmt::Display::fmt(n, f),
            Node::NumericLiteral(n) => fmt::Display::fmt(n, f),
            Node::BooleanLiteral(n) => fmt::Display::fmt(n, f),
            Node::BinaryExpr(n) => fmt::Display::fmt(n, f),
            Node::ComparisonExpr(n) => fmt::Display::fmt(n, f),
            Node::UnaryExpr(n) => fmt::Display::fmt(n, f),
            Node::Pragma(n) => fmt::Display::fmt(n, f),
        }
    }
}
