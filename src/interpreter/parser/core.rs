use crate::{error::EvalError, interpreter::lexer::Token};

pub type ParseResult<T> = Result<T, EvalError>;

/// Reorders an infix token stream into postfix order.
///
/// Operands go straight to the output. An incoming operator first pops every
/// operator on the stack whose precedence is greater than or equal to its own,
/// so operators of equal precedence associate left to right. Parentheses are
/// tracked on the operator stack and never reach the output.
///
/// # Errors
/// `MismatchedParentheses` if a `)` has no matching `(` or a `(` is never
/// closed.
///
/// # Example
/// ```
/// use snx::{
///     ast::Operator,
///     interpreter::{
///         lexer::{Token, tokenize},
///         parser::core::to_postfix,
///     },
/// };
///
/// let postfix = to_postfix(tokenize("(2 + 3) * 4").unwrap()).unwrap();
/// assert_eq!(postfix,
///            vec![Token::Int(2),
///                 Token::Int(3),
///                 Token::Operator(Operator::Add),
///                 Token::Int(4),
///                 Token::Operator(Operator::Mul)]);
/// ```
pub fn to_postfix(tokens: Vec<Token>) -> ParseResult<Vec<Token>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut operators: Vec<Token> = Vec::new();

    for token in tokens {
        match token {
            Token::LParen => operators.push(token),
            Token::RParen => loop {
                match operators.pop() {
                    Some(Token::LParen) => break,
                    Some(operator) => output.push(operator),
                    None => return Err(EvalError::MismatchedParentheses),
                }
            },
            Token::Operator(incoming) => {
                while let Some(&Token::Operator(top)) = operators.last()
                      && top.precedence() >= incoming.precedence()
                {
                    output.push(Token::Operator(top));
                    operators.pop();
                }
                operators.push(token);
            },
            operand => output.push(operand),
        }
    }

    while let Some(top) = operators.pop() {
        if top == Token::LParen {
            return Err(EvalError::MismatchedParentheses);
        }
        output.push(top);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::Operator, interpreter::lexer::tokenize};

    fn postfix(text: &str) -> ParseResult<Vec<Token>> {
        to_postfix(tokenize(text)?)
    }

    fn op(op: Operator) -> Token {
        Token::Operator(op)
    }

    #[test]
    fn higher_precedence_binds_first() {
        assert_eq!(postfix("2 + 3 * 4").unwrap(),
                   vec![Token::Int(2),
                        Token::Int(3),
                        Token::Int(4),
                        op(Operator::Mul),
                        op(Operator::Add)]);
    }

    #[test]
    fn equal_precedence_is_left_associative() {
        assert_eq!(postfix("8 - 3 - 2").unwrap(),
                   vec![Token::Int(8),
                        Token::Int(3),
                        op(Operator::Sub),
                        Token::Int(2),
                        op(Operator::Sub)]);
    }

    #[test]
    fn logical_operators_sit_below_comparisons() {
        assert_eq!(postfix("1 < 2 && 2 < 3").unwrap(),
                   vec![Token::Int(1),
                        Token::Int(2),
                        op(Operator::Less),
                        Token::Int(2),
                        Token::Int(3),
                        op(Operator::Less),
                        op(Operator::And)]);
    }

    #[test]
    fn not_applies_to_the_following_operand() {
        assert_eq!(postfix("!a || b").unwrap(),
                   vec![Token::Identifier { name:    "a".to_string(),
                                            negated: false, },
                        op(Operator::Not),
                        Token::Identifier { name:    "b".to_string(),
                                            negated: false, },
                        op(Operator::Or)]);
    }

    #[test]
    fn parentheses_must_balance() {
        assert_eq!(postfix("(1 + 2").unwrap_err(), EvalError::MismatchedParentheses);
        assert_eq!(postfix("1 + 2)").unwrap_err(), EvalError::MismatchedParentheses);
        assert_eq!(postfix(")(").unwrap_err(), EvalError::MismatchedParentheses);
    }
}
