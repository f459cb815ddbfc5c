use crate::{
    error::EvalError,
    interpreter::evaluator::core::{EvalResult, Resolve},
};

/// Expands `${name}` sequences inside the string literals of an expression.
///
/// The textual form of each named value is spliced into the literal with `"`
/// and `\` escaped, so the result still lexes as the same literal. Text
/// outside string literals is copied unchanged. Names are resolved in order of
/// appearance.
///
/// # Errors
/// - `UnterminatedInterpolation` if a `${` has no closing `}`.
/// - Whatever the resolver returns for an unknown name.
///
/// # Example
/// ```
/// use std::collections::HashMap;
///
/// use snx::interpreter::{engine::interpolate::interpolate, value::core::Value};
///
/// let mut bindings = HashMap::from([("who".to_string(), Value::from("world"))]);
///
/// let text = interpolate(r#""hello ${who}" + who"#, &mut bindings).unwrap();
/// assert_eq!(text, r#""hello world" + who"#);
/// ```
pub fn interpolate(text: &str, resolver: &mut dyn Resolve) -> EvalResult<String> {
    if !text.contains("${") {
        return Ok(text.to_string());
    }

    let mut output = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                in_string = !in_string;
                output.push(c);
            },
            '\\' if in_string => {
                output.push(c);
                if let Some(escaped) = chars.next() {
                    output.push(escaped);
                }
            },
            '$' if in_string && chars.peek() == Some(&'{') => {
                chars.next();

                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => name.push(ch),
                        None => return Err(EvalError::UnterminatedInterpolation),
                    }
                }

                let value = resolver.resolve(name.trim())?;
                for ch in value.to_string().chars() {
                    if matches!(ch, '"' | '\\') {
                        output.push('\\');
                    }
                    output.push(ch);
                }
            },
            _ => output.push(c),
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::interpreter::value::core::Value;

    fn bindings() -> HashMap<String, Value> {
        HashMap::from([("n".to_string(), Value::Int(3)),
                       ("r".to_string(), Value::Float(2.0)),
                       ("quote".to_string(), Value::from(r#"say "hi" \o/"#))])
    }

    #[test]
    fn values_are_spliced_as_text() {
        let mut vars = bindings();
        assert_eq!(interpolate(r#""n=${n}, r=${ r }""#, &mut vars).unwrap(),
                   r#""n=3, r=2.0""#);
    }

    #[test]
    fn quotes_and_backslashes_are_escaped() {
        let mut vars = bindings();
        assert_eq!(interpolate(r#""${quote}""#, &mut vars).unwrap(),
                   r#""say \"hi\" \\o/""#);
    }

    #[test]
    fn only_string_literals_are_touched() {
        let mut vars = bindings();
        assert_eq!(interpolate(r#"n + "\"${n}""#, &mut vars).unwrap(), r#"n + "\"3""#);
        assert_eq!(interpolate("1 + 2", &mut vars).unwrap(), "1 + 2");
    }

    #[test]
    fn failures() {
        let mut vars = bindings();
        assert_eq!(interpolate(r#""${n""#, &mut vars),
                   Err(EvalError::UnterminatedInterpolation));
        assert_eq!(interpolate(r#""${missing}""#, &mut vars),
                   Err(EvalError::UnknownVariable { name: "missing".to_string() }));
    }
}
