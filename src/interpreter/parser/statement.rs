use crate::ast::{BlockStyle, Statement};

/// Words that cannot name a variable or a called function.
pub const RESERVED: &[&str] = &["true", "false", "var", "print", "println", "input", "func",
                                "return", "if", "else", "while", "import", "END", "GOTO", "end",
                                "STYLE", "exec"];

/// Returns `true` if `name` is a reserved word.
///
/// # Example
/// ```
/// use snx::interpreter::parser::statement::is_reserved;
///
/// assert!(is_reserved("input"));
/// assert!(!is_reserved("total"));
/// ```
#[must_use]
pub fn is_reserved(name: &str) -> bool {
    RESERVED.contains(&name)
}

/// Returns `true` if `name` is a valid identifier (`[a-zA-Z_][a-zA-Z0-9_]*`).
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next()
         .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Splits a leading identifier off `text`.
///
/// Returns the identifier and the rest of the text, or `None` if `text` does
/// not start with one.
fn split_identifier(text: &str) -> Option<(&str, &str)> {
    let end = text.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                  .unwrap_or(text.len());
    let (name, rest) = text.split_at(end);
    is_identifier(name).then_some((name, rest))
}

/// Strips a keyword that must be followed by at least one whitespace
/// character, returning the remaining text with leading whitespace removed.
fn keyword_rest<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.trim_start().strip_prefix(keyword)?;
    rest.starts_with(char::is_whitespace).then(|| rest.trim_start())
}

/// Splits a comma-separated list at the commas that are outside string
/// literals and parentheses. Every slot is trimmed; an empty list yields no
/// slots.
///
/// # Example
/// ```
/// use snx::interpreter::parser::statement::split_arguments;
///
/// assert_eq!(split_arguments(r#"1, "a,b", max(2, 3)"#),
///            vec!["1", r#""a,b""#, "max(2, 3)"]);
/// assert_eq!(split_arguments("x, "), vec!["x", ""]);
/// assert!(split_arguments("  ").is_empty());
/// ```
#[must_use]
pub fn split_arguments(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut slots = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for c in text.chars() {
        if in_string {
            in_string = escaped || c != '"';
            escaped = !escaped && c == '\\';
            current.push(c);
            continue;
        }
        match c {
            '"' => in_string = true,
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                slots.push(current.trim().to_string());
                current.clear();
                continue;
            },
            _ => {},
        }
        current.push(c);
    }
    slots.push(current.trim().to_string());

    slots
}

/// Parses `name(args)` with optional whitespace before `(` and after `)`.
///
/// Returns the name and the text between the first `(` and the last `)`.
fn parse_call_shape(text: &str) -> Option<(&str, &str)> {
    let (name, rest) = split_identifier(text.trim_start())?;
    let inner = rest.trim_start().strip_prefix('(')?.trim_end().strip_suffix(')')?;
    Some((name, inner))
}

/// Parses `NAME = EXPR`, rejecting `==`.
fn parse_binding(text: &str) -> Option<(String, String)> {
    let (name, rest) = split_identifier(text.trim_start())?;
    let expr = rest.trim_start().strip_prefix('=')?;
    if expr.starts_with('=') {
        return None;
    }
    Some((name.to_string(), expr.trim().to_string()))
}

/// Parses the `STYLE = name` directive. Quotes around the name are allowed.
fn parse_style(line: &str) -> Option<Statement> {
    let rest = line.trim_start().strip_prefix("STYLE")?;
    let value = rest.trim_start().strip_prefix('=')?.trim();
    let value = value.trim_matches(|c| c == '"' || c == '\'');
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_lowercase()) {
        return None;
    }
    Some(Statement::Style(BlockStyle::from_name(value)))
}

/// Parses a bare `return` (an optional `;` is allowed) or `return EXPR`.
fn parse_return(line: &str) -> Option<Statement> {
    let rest = line.trim().strip_prefix("return")?;
    if rest.is_empty() || rest.trim_start() == ";" {
        return Some(Statement::Return);
    }
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let expr = rest.trim();
    let expr = expr.strip_suffix(';').unwrap_or(expr).trim_end();
    Some(Statement::ReturnValue { expr: expr.to_string() })
}

/// Strips the `{` that ends a header line in bracketed style.
fn strip_opening_brace(text: &str, style: BlockStyle) -> Option<&str> {
    match style {
        BlockStyle::Terminated => Some(text),
        BlockStyle::Bracketed => text.trim_end().strip_suffix('{'),
    }
}

/// Parses `func NAME(params)`, followed by `{` in bracketed style.
fn parse_function_declaration(line: &str, style: BlockStyle) -> Option<Statement> {
    let rest = keyword_rest(line, "func")?;
    let (name, params) = parse_call_shape(strip_opening_brace(rest, style)?)?;

    let parameters = split_arguments(params).into_iter()
                                            .filter(|p| !p.is_empty())
                                            .collect();

    Some(Statement::FunctionDeclaration { name: name.to_string(),
                                          parameters })
}

/// Parses `NAME(args)` where `NAME` is not a reserved word.
fn parse_call(line: &str) -> Option<Statement> {
    let (name, args) = parse_call_shape(line)?;
    if is_reserved(name) {
        return None;
    }
    Some(Statement::Call { name:      name.to_string(),
                           arguments: split_arguments(args), })
}

/// Parses `GOTO n` where `n` is a run of digits.
fn parse_goto(line: &str) -> Option<Statement> {
    let target = keyword_rest(line, "GOTO")?.trim_end();
    (!target.is_empty() && target.chars().all(|c| c.is_ascii_digit()))
        .then(|| Statement::Goto { target: target.to_string() })
}

/// Parses `if COND`, or `if COND {` in bracketed style.
fn parse_if(line: &str, style: BlockStyle) -> Option<Statement> {
    let rest = keyword_rest(line, "if")?;
    let condition = strip_opening_brace(rest, style)?.trim();
    if condition.is_empty() {
        return None;
    }
    Some(Statement::If { condition: condition.to_string() })
}

/// Returns `true` if the line opens a block under `style`.
///
/// Both conditional headers and function headers open blocks.
#[must_use]
pub fn is_block_header(line: &str, style: BlockStyle) -> bool {
    parse_if(line, style).is_some() || parse_function_declaration(line, style).is_some()
}

/// Returns `true` if the line closes a block under `style`.
#[must_use]
pub fn is_block_closer(line: &str, style: BlockStyle) -> bool {
    line.trim() == style.closer()
}

/// Classifies one line of a listing.
///
/// The forms are mutually exclusive and are tried in a fixed order: style
/// directive, comment, program terminator, blank line, block closer, return,
/// function declaration, function call, jump, conditional, declaration,
/// assignment, print, shell exec. A line matching none of them is
/// [`Statement::Unrecognized`].
///
/// # Example
/// ```
/// use snx::{
///     ast::{BlockStyle, Statement},
///     interpreter::parser::statement::parse_statement,
/// };
///
/// assert_eq!(parse_statement("var x = 1 + 2", BlockStyle::Terminated),
///            Statement::Declaration { name: "x".to_string(),
///                                     expr: "1 + 2".to_string(), });
/// assert_eq!(parse_statement("}", BlockStyle::Bracketed), Statement::BlockClose);
/// assert_eq!(parse_statement("}", BlockStyle::Terminated), Statement::Unrecognized);
/// ```
#[must_use]
pub fn parse_statement(line: &str, style: BlockStyle) -> Statement {
    if let Some(statement) = parse_style(line) {
        return statement;
    }

    let trimmed = line.trim();

    if trimmed.starts_with('#') {
        return Statement::Comment;
    }
    if trimmed == "END" {
        return Statement::Terminate;
    }
    if trimmed.is_empty() {
        return Statement::Blank;
    }
    if is_block_closer(line, style) {
        return Statement::BlockClose;
    }

    if let Some(statement) = parse_return(line)
                             .or_else(|| parse_function_declaration(line, style))
                             .or_else(|| parse_call(line))
                             .or_else(|| parse_goto(line))
                             .or_else(|| parse_if(line, style))
    {
        return statement;
    }

    if let Some(rest) = keyword_rest(line, "var")
       && let Some((name, expr)) = parse_binding(rest)
    {
        return Statement::Declaration { name, expr };
    }

    if let Some((name, expr)) = parse_binding(line) {
        return Statement::Assignment { name, expr };
    }

    if let Some(expr) = keyword_rest(line, "println") {
        return Statement::Print { expr:    expr.trim_end().to_string(),
                                  newline: true, };
    }
    if let Some(expr) = keyword_rest(line, "print") {
        return Statement::Print { expr:    expr.trim_end().to_string(),
                                  newline: false, };
    }
    if let Some(expr) = keyword_rest(line, "exec") {
        return Statement::Exec { expr: expr.trim_end().to_string() };
    }

    Statement::Unrecognized
}
