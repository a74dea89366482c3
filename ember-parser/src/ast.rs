/// The root of a parsed source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A function declaration (e.g. `fn add(a, b) do return a + b end`).
    FnDeclaration {
        ident: String,
        params: Vec<String>,
        body: Vec<Stmt>,
    },
    /// A binding introduced in the initializer slot of a `for` loop.
    VarBinding {
        ident: String,
        initializer: Option<Expr>,
    },
    Block(Vec<Stmt>),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    /// A `while` loop. `for` loops are desugared into this.
    While { condition: Expr, body: Box<Stmt> },
    Print(Expr),
    ReturnStmt(Expr),
    ExprStmt(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// An assignment to a name (e.g. `a = 1`).
    Assign { ident: String, value: Box<Expr> },
    /// A short-circuiting expression (e.g. `a and b`).
    Logical {
        lhs: Box<Expr>,
        op: LogicalOp,
        rhs: Box<Expr>,
    },
    /// A binary expression (e.g. `1+1`).
    Binary {
        lhs: Box<Expr>,
        op: BinaryOp,
        rhs: Box<Expr>,
    },
    Unary { op: UnaryOp, arg: Box<Expr> },
    /// A call expression (e.g. `foo(1)` or `make()(2)`).
    Call { callee: Box<Expr>, args: Vec<Expr> },
    Literal(LiteralValue),
    /// An identifier (e.g. `foo`).
    Identifier(String),
    /// A parenthesized expression.
    Grouping(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Number(f64),
    String(String),
    Bool(bool),
    Nil,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Equal,
    NotEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Coalesce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Negate,
}
