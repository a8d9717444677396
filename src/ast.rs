use std::rc::Rc;

/// A parsed C## program.
///
/// `Program` holds the top-level items in source order: `using` directives,
/// namespaces, function declarations and global statements. The parser
/// produces exactly one `Program` per source unit and the evaluator only reads
/// it.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Top-level items in the order they appear in the source.
    pub items:    Vec<Statement>,
    /// The line of the end-of-input token, used when reporting errors that
    /// concern the program as a whole (such as a missing `Main`).
    pub end_line: usize,
}

/// A type annotation as written in the source.
///
/// Types are syntax only: they are parsed and kept in the tree for tooling,
/// but never enforced. The only semantic use is choosing the default value of
/// a declaration without an initializer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeName {
    /// `var`
    Var,
    /// `int`
    Int,
    /// `bool`
    Bool,
    /// `string`
    String,
    /// `void`
    Void,
    /// `List` with its (discarded) generic arguments, e.g. `List<int>`.
    List(Vec<Self>),
    /// Any other identifier used in type position.
    Named(String),
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Var => write!(f, "var"),
            Self::Int => write!(f, "int"),
            Self::Bool => write!(f, "bool"),
            Self::String => write!(f, "string"),
            Self::Void => write!(f, "void"),
            Self::List(args) if args.is_empty() => write!(f, "List"),
            Self::List(args) => {
                write!(f, "List<")?;
                for (index, arg) in args.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ">")
            },
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

/// A function parameter, `<type> <name>` or a bare `<name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub ty:   TypeName,
    pub name: String,
}

/// A function declaration: `<type> <name>(<params>) { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub return_type: TypeName,
    pub name:        String,
    pub params:      Vec<Param>,
    /// Statements of the body block.
    pub body:        Vec<Statement>,
    pub line:        usize,
}

impl FunctionDef {
    /// Returns the parameter names in declaration order.
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }
}

/// A statement node.
///
/// Statements are executed for their effect. Each variant records the line of
/// its first token.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `var x = e;`, `int x = e;` or `int x;`.
    VarDecl {
        ty:          TypeName,
        name:        String,
        /// `None` when a typed declaration omits its initializer; the
        /// evaluator then binds the type's default value.
        initializer: Option<Expr>,
        line:        usize,
    },
    /// An expression followed by `;`.
    Expression {
        expr: Expr,
        line: usize,
    },
    If {
        condition:   Expr,
        then_branch: Box<Self>,
        else_branch: Option<Box<Self>>,
        line:        usize,
    },
    While {
        condition: Expr,
        body:      Box<Self>,
        line:      usize,
    },
    /// C-style `for (init; condition; step) body`, every clause optional.
    For {
        init:      Option<Box<Self>>,
        condition: Option<Expr>,
        step:      Option<Expr>,
        body:      Box<Self>,
        line:      usize,
    },
    /// `foreach (var name in iterable) body`.
    Foreach {
        var:      String,
        iterable: Expr,
        body:     Box<Self>,
        line:     usize,
    },
    Return {
        value: Option<Expr>,
        line:  usize,
    },
    Block {
        statements: Vec<Self>,
        line:       usize,
    },
    FunctionDecl(Rc<FunctionDef>),
    /// `using A.B;`, accepted and ignored.
    Using {
        path: String,
        line: usize,
    },
    /// `namespace Name { ... }`; its items behave as top-level items.
    Namespace {
        name:  String,
        items: Vec<Self>,
        line:  usize,
    },
}

impl Statement {
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::VarDecl { line, .. }
            | Self::Expression { line, .. }
            | Self::If { line, .. }
            | Self::While { line, .. }
            | Self::For { line, .. }
            | Self::Foreach { line, .. }
            | Self::Return { line, .. }
            | Self::Block { line, .. }
            | Self::Using { line, .. }
            | Self::Namespace { line, .. } => *line,
            Self::FunctionDecl(def) => def.line,
        }
    }
}

/// An expression node.
///
/// Expressions reduce to values. Only calls, method calls and assignments have
/// side effects.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IntLiteral {
        value: i64,
        line:  usize,
    },
    StringLiteral {
        value: String,
        line:  usize,
    },
    BoolLiteral {
        value: bool,
        line:  usize,
    },
    Identifier {
        name: String,
        line: usize,
    },
    Binary {
        op:    BinaryOperator,
        left:  Box<Self>,
        right: Box<Self>,
        line:  usize,
    },
    Unary {
        op:      UnaryOperator,
        operand: Box<Self>,
        line:    usize,
    },
    /// A call by name. Qualified built-ins keep their dotted name, e.g.
    /// `Console.WriteLine`.
    Call {
        callee:    String,
        arguments: Vec<Self>,
        line:      usize,
    },
    Index {
        target: Box<Self>,
        index:  Box<Self>,
        line:   usize,
    },
    MethodCall {
        target:    Box<Self>,
        method:    String,
        arguments: Vec<Self>,
        line:      usize,
    },
    /// `[a, b, c]`, `new List<int>()` or `new List<int> { a, b }`.
    ListLiteral {
        elements: Vec<Self>,
        line:     usize,
    },
    /// `target = value`, where the target is an identifier or an index
    /// expression.
    Assign {
        target: Box<Self>,
        value:  Box<Self>,
        line:   usize,
    },
}

impl Expr {
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::IntLiteral { line, .. }
            | Self::StringLiteral { line, .. }
            | Self::BoolLiteral { line, .. }
            | Self::Identifier { line, .. }
            | Self::Binary { line, .. }
            | Self::Unary { line, .. }
            | Self::Call { line, .. }
            | Self::Index { line, .. }
            | Self::MethodCall { line, .. }
            | Self::ListLiteral { line, .. }
            | Self::Assign { line, .. } => *line,
        }
    }

    /// Returns `true` if the expression may appear on the left of `=`.
    #[must_use]
    pub const fn is_assignable(&self) -> bool {
        matches!(self, Self::Identifier { .. } | Self::Index { .. })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Equal,
    NotEqual,
    And,
    Or,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
    Plus,
    Not,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, NotEqual, Or,
            Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            And => "&&",
            Or => "||",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Negate => "-",
            Self::Plus => "+",
            Self::Not => "!",
        };
        write!(f, "{operator}")
    }
}
