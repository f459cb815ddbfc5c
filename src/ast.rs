/// An operator recognized by the expression evaluator.
///
/// Every operator except [`Operator::Not`] is binary. The precedence table is
/// fixed; higher binds tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `||`
    Or,
    /// `&&`
    And,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// Unary `!`
    Not,
}

impl Operator {
    /// Returns the binding strength of the operator.
    ///
    /// # Example
    /// ```
    /// use snx::ast::Operator;
    ///
    /// assert!(Operator::Mul.precedence() > Operator::Add.precedence());
    /// assert!(Operator::And.precedence() > Operator::Or.precedence());
    /// ```
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Equal | Self::NotEqual => 3,
            Self::Less | Self::Greater | Self::LessEqual | Self::GreaterEqual => 4,
            Self::Add | Self::Sub => 5,
            Self::Mul | Self::Div | Self::Mod => 6,
            Self::Not => 7,
        }
    }

    /// Returns how many operands the operator consumes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Not => 1,
            _ => 2,
        }
    }

    /// Returns the source text of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Or => "||",
            Self::And => "&&",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Not => "!",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The active block-delimiter grammar.
///
/// Selected with a `STYLE = end|brackets` directive and switchable at any
/// point of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockStyle {
    /// `if cond` ... `end`
    #[default]
    Terminated,
    /// `if cond {` ... `}`
    Bracketed,
}

impl BlockStyle {
    /// Looks up a style by the name used in the `STYLE` directive.
    ///
    /// # Example
    /// ```
    /// use snx::ast::BlockStyle;
    ///
    /// assert_eq!(BlockStyle::from_name("brackets"), Some(BlockStyle::Bracketed));
    /// assert_eq!(BlockStyle::from_name("end"), Some(BlockStyle::Terminated));
    /// assert_eq!(BlockStyle::from_name("braces"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "end" => Some(Self::Terminated),
            "brackets" => Some(Self::Bracketed),
            _ => None,
        }
    }

    /// Returns the name used in the `STYLE` directive.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Terminated => "end",
            Self::Bracketed => "brackets",
        }
    }

    /// Returns the text of the line that closes a block.
    #[must_use]
    pub const fn closer(self) -> &'static str {
        match self {
            Self::Terminated => "end",
            Self::Bracketed => "}",
        }
    }
}

/// One classified line of a listing.
///
/// The engine classifies the line at the program counter into exactly one of
/// these forms; expression text is kept verbatim and only evaluated when the
/// statement executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `STYLE = name`. `None` when the name is not a known style.
    Style(Option<BlockStyle>),
    /// `# ...`
    Comment,
    /// `END`
    Terminate,
    /// Whitespace only.
    Blank,
    /// `end` or `}` depending on the active style.
    BlockClose,
    /// A bare `return`.
    Return,
    /// `return EXPR`. Accepted but not executed.
    ReturnValue {
        /// The returned expression text.
        expr: String,
    },
    /// `func name(a, b)` with an optional trailing `{` in bracketed style.
    FunctionDeclaration {
        /// The function name.
        name:       String,
        /// Parameter names in declaration order.
        parameters: Vec<String>,
    },
    /// `name(a1, a2)`
    Call {
        /// The function name.
        name:      String,
        /// Argument expression texts; empty slots are kept as empty strings.
        arguments: Vec<String>,
    },
    /// `GOTO n`
    Goto {
        /// The target line as written.
        target: String,
    },
    /// `if COND` or `if COND {`
    If {
        /// The condition expression text.
        condition: String,
    },
    /// `var name = EXPR`
    Declaration {
        /// The variable name.
        name: String,
        /// The initializer expression text.
        expr: String,
    },
    /// `name = EXPR`
    Assignment {
        /// The variable name.
        name: String,
        /// The assigned expression text.
        expr: String,
    },
    /// `print EXPR` or `println EXPR`
    Print {
        /// The printed expression text.
        expr:    String,
        /// `true` for `println`.
        newline: bool,
    },
    /// `exec EXPR`
    Exec {
        /// The expression producing the command text.
        expr: String,
    },
    /// Anything else; executing it just advances the program counter.
    Unrecognized,
}
