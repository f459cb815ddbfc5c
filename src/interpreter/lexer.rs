use logos::Logos;

use crate::{ast::Operator, error::EvalError, interpreter::value::core::Value};

/// Represents a lexical token of an expression.
///
/// Tokens are produced from one line of expression text and live for a single
/// evaluation. A sign written directly in front of a number is folded into the
/// literal when it cannot be a binary operator.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Integer literal tokens, such as `42` or `-7`.
    Int(i64),
    /// Float literal tokens, such as `2.5`, `.5` or `-3.`.
    Float(f64),
    /// Boolean literal tokens: `true` or `false`.
    Bool(bool),
    /// String literal tokens, with quotes stripped and escapes applied.
    Str(String),
    /// A name to be resolved when the expression is evaluated.
    Identifier {
        /// The name as written.
        name:    String,
        /// `true` when written as `-name` in operand position.
        negated: bool,
    },
    /// An operator symbol.
    Operator(Operator),
    /// `(`
    LParen,
    /// `)`
    RParen,
}

impl Token {
    /// Returns `true` if the token produces a value on its own.
    #[must_use]
    pub const fn is_operand(&self) -> bool {
        matches!(self,
                 Self::Int(_)
                 | Self::Float(_)
                 | Self::Bool(_)
                 | Self::Str(_)
                 | Self::Identifier { .. })
    }
}

/// Errors raised by the raw scanner.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LexError {
    /// No token starts at this character.
    #[default]
    InvalidCharacter,
    /// A `"` was never closed.
    UnterminatedString,
}

/// The raw scanner. Signs are always scanned as operators here and folded
/// into literals by [`tokenize`].
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexError)]
enum RawToken {
    /// `42`
    #[regex(r"[0-9]+")]
    Integer,
    /// `2.5`, `.5`, `3.` and malformed runs such as `1.2.3`.
    #[regex(r"[0-9]*\.[0-9.]*")]
    Decimal,
    /// `"text"`
    #[token("\"", lex_string)]
    Str(String),
    /// `true` or `false`
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    /// Variable names such as `x` or `total_2`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `!`
    #[token("!")]
    Bang,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `&&`
    #[token("&&")]
    AndAnd,
    /// `||`
    #[token("||")]
    OrOr,
    /// Whitespace.
    #[regex(r"[ \t\r\n\f]+", logos::skip)]
    Ignored,
}

/// Scans the body of a string literal after its opening quote.
///
/// A backslash makes the following character literal. The closing quote is
/// consumed but not included.
fn lex_string(lex: &mut logos::Lexer<RawToken>) -> Result<String, LexError> {
    let remainder = lex.remainder();
    let mut content = String::new();
    let mut chars = remainder.char_indices();

    while let Some((index, c)) = chars.next() {
        match c {
            '"' => {
                lex.bump(index + 1);
                return Ok(content);
            },
            '\\' => match chars.next() {
                Some((_, escaped)) => content.push(escaped),
                None => break,
            },
            _ => content.push(c),
        }
    }

    lex.bump(remainder.len());
    Err(LexError::UnterminatedString)
}

/// Returns `true` if a `+` or `-` at this point must be a sign.
///
/// That is the case at the start of the expression and right after `(` or
/// any operator.
fn in_operand_position(tokens: &[Token]) -> bool {
    matches!(tokens.last(), None | Some(Token::LParen | Token::Operator(_)))
}

/// Converts the text of a numeric literal into a token.
///
/// A literal without a decimal point is always an integer; one that does not
/// fit in 64 bits is an overflow rather than a malformed literal.
fn number_token(literal: &str) -> Result<Token, EvalError> {
    match Value::from_numeric_literal(literal) {
        Some(Value::Int(n)) => Ok(Token::Int(n)),
        Some(Value::Float(r)) => Ok(Token::Float(r)),
        _ if is_integer_literal(literal) => Err(EvalError::Overflow),
        _ => Err(EvalError::InvalidNumber { literal: literal.to_string() }),
    }
}

fn is_integer_literal(literal: &str) -> bool {
    let digits = literal.strip_prefix(['+', '-']).unwrap_or(literal);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Splits one expression into tokens.
///
/// Whitespace is insignificant. Two-character operators are matched before
/// their one-character prefixes. A `+` or `-` in operand position that is
/// immediately followed by a number is folded into that literal; when it is
/// immediately followed by a name, the name is marked as negated instead.
///
/// # Errors
/// - `UnterminatedString` for a `"` without its closing quote.
/// - `InvalidCharacter` for a character that starts no token.
/// - `InvalidNumber` for malformed or out-of-range numeric literals.
///
/// # Example
/// ```
/// use snx::{
///     ast::Operator,
///     interpreter::lexer::{Token, tokenize},
/// };
///
/// let tokens = tokenize("-2 * (x - 1)").unwrap();
/// assert_eq!(tokens[0], Token::Int(-2));
/// assert_eq!(tokens[1], Token::Operator(Operator::Mul));
/// assert_eq!(tokens.len(), 7);
/// ```
pub fn tokenize(text: &str) -> Result<Vec<Token>, EvalError> {
    let mut lexer = RawToken::lexer(text);
    let mut tokens = Vec::new();

    while let Some(raw) = lexer.next() {
        let raw = match raw {
            Ok(raw) => raw,
            Err(LexError::UnterminatedString) => return Err(EvalError::UnterminatedString),
            Err(LexError::InvalidCharacter) => {
                let ch = lexer.slice().chars().next().unwrap_or_default();
                return Err(EvalError::InvalidCharacter { ch });
            },
        };

        let token = match raw {
            RawToken::Integer | RawToken::Decimal => number_token(lexer.slice())?,
            RawToken::Str(s) => Token::Str(s),
            RawToken::Bool(b) => Token::Bool(b),
            RawToken::Identifier(name) => Token::Identifier { name,
                                                              negated: false },
            RawToken::Plus | RawToken::Minus if in_operand_position(&tokens) => {
                let sign = lexer.slice();
                let sign_end = lexer.span().end;

                let mut ahead = lexer.clone();
                match ahead.next() {
                    Some(Ok(RawToken::Integer | RawToken::Decimal))
                        if ahead.span().start == sign_end =>
                    {
                        let literal = format!("{sign}{}", ahead.slice());
                        lexer = ahead;
                        number_token(&literal)?
                    },
                    Some(Ok(RawToken::Identifier(name))) if ahead.span().start == sign_end => {
                        lexer = ahead;
                        Token::Identifier { negated: sign == "-",
                                            name }
                    },
                    _ => Token::Operator(if sign == "-" { Operator::Sub } else { Operator::Add }),
                }
            },
            RawToken::Plus => Token::Operator(Operator::Add),
            RawToken::Minus => Token::Operator(Operator::Sub),
            RawToken::Star => Token::Operator(Operator::Mul),
            RawToken::Slash => Token::Operator(Operator::Div),
            RawToken::Percent => Token::Operator(Operator::Mod),
            RawToken::Bang => Token::Operator(Operator::Not),
            RawToken::EqualEqual => Token::Operator(Operator::Equal),
            RawToken::BangEqual => Token::Operator(Operator::NotEqual),
            RawToken::Less => Token::Operator(Operator::Less),
            RawToken::Greater => Token::Operator(Operator::Greater),
            RawToken::LessEqual => Token::Operator(Operator::LessEqual),
            RawToken::GreaterEqual => Token::Operator(Operator::GreaterEqual),
            RawToken::AndAnd => Token::Operator(Operator::And),
            RawToken::OrOr => Token::Operator(Operator::Or),
            RawToken::LParen => Token::LParen,
            RawToken::RParen => Token::RParen,
            RawToken::Ignored => continue,
        };

        tokens.push(token);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(op: Operator) -> Token {
        Token::Operator(op)
    }

    #[test]
    fn oversized_integer_literal_overflows() {
        assert_eq!(tokenize("99999999999999999999 + 1"), Err(EvalError::Overflow));
        assert_eq!(tokenize("-99999999999999999999"), Err(EvalError::Overflow));
        assert_eq!(tokenize("99999999999999999999.0").unwrap(), vec![Token::Float(1e20)]);
        assert_eq!(tokenize("1.2.3"),
                   Err(EvalError::InvalidNumber { literal: "1.2.3".to_string() }));
    }

    #[test]
    fn decimal_point_decides_kind() {
        assert_eq!(tokenize("10").unwrap(), vec![Token::Int(10)]);
        assert_eq!(tokenize("10.").unwrap(), vec![Token::Float(10.0)]);
        assert_eq!(tokenize(".25").unwrap(), vec![Token::Float(0.25)]);
    }

    #[test]
    fn sign_folds_only_in_operand_position() {
        assert_eq!(tokenize("-3").unwrap(), vec![Token::Int(-3)]);
        assert_eq!(tokenize("4 -3").unwrap(),
                   vec![Token::Int(4), op(Operator::Sub), Token::Int(3)]);
        assert_eq!(tokenize("2*-3").unwrap(),
                   vec![Token::Int(2), op(Operator::Mul), Token::Int(-3)]);
        assert_eq!(tokenize("(+.5)").unwrap(),
                   vec![Token::LParen, Token::Float(0.5), Token::RParen]);
    }

    #[test]
    fn detached_sign_stays_an_operator() {
        assert_eq!(tokenize("- 3").unwrap(), vec![op(Operator::Sub), Token::Int(3)]);
    }

    #[test]
    fn sign_before_name_marks_negation() {
        assert_eq!(tokenize("1 * -x").unwrap(),
                   vec![Token::Int(1),
                        op(Operator::Mul),
                        Token::Identifier { name:    "x".to_string(),
                                            negated: true, }]);
    }

    #[test]
    fn two_character_operators_are_greedy() {
        assert_eq!(tokenize("1<=2").unwrap(),
                   vec![Token::Int(1), op(Operator::LessEqual), Token::Int(2)]);
        assert_eq!(tokenize("!true != false").unwrap(),
                   vec![op(Operator::Not),
                        Token::Bool(true),
                        op(Operator::NotEqual),
                        Token::Bool(false)]);
        assert_eq!(tokenize("true&&false||true").unwrap(),
                   vec![Token::Bool(true),
                        op(Operator::And),
                        Token::Bool(false),
                        op(Operator::Or),
                        Token::Bool(true)]);
    }

    #[test]
    fn strings_strip_quotes_and_unescape() {
        assert_eq!(tokenize(r#""say \"hi\"""#).unwrap(),
                   vec![Token::Str("say \"hi\"".to_string())]);
        assert_eq!(tokenize(r#""a\\b""#).unwrap(), vec![Token::Str("a\\b".to_string())]);
        assert_eq!(tokenize(r#""""#).unwrap(), vec![Token::Str(String::new())]);
    }

    #[test]
    fn lexical_errors() {
        assert_eq!(tokenize("\"open").unwrap_err(), EvalError::UnterminatedString);
        assert_eq!(tokenize("\"ends in \\").unwrap_err(), EvalError::UnterminatedString);
        assert_eq!(tokenize("1 = 2").unwrap_err(), EvalError::InvalidCharacter { ch: '=' });
        assert_eq!(tokenize("a & b").unwrap_err(), EvalError::InvalidCharacter { ch: '&' });
        assert_eq!(tokenize("1.2.3").unwrap_err(),
                   EvalError::InvalidNumber { literal: "1.2.3".to_string() });
    }

    #[test]
    fn names_are_kept_for_resolution() {
        assert_eq!(tokenize("trueish").unwrap(),
                   vec![Token::Identifier { name:    "trueish".to_string(),
                                            negated: false, }]);
    }
}
