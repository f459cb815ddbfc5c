use std::collections::HashMap;

use crate::interpreter::value::core::Value;

/// A live variable binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// The current value.
    pub value:       Value,
    /// The scope depth the variable was declared at.
    pub scope_depth: usize,
}

/// Variables keyed by name.
///
/// Names are unique among live bindings. There is no shadowing: a name can be
/// declared again only after the scope that declared it has been torn down.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    variables: HashMap<String, Variable>,
}

impl SymbolTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` at `scope_depth`.
    ///
    /// # Returns
    /// `false`, leaving the table untouched, if `name` is already live.
    ///
    /// # Example
    /// ```
    /// use snx::interpreter::{engine::symbols::SymbolTable, value::core::Value};
    ///
    /// let mut symbols = SymbolTable::new();
    /// assert!(symbols.declare("x", Value::Int(1), 0));
    /// assert!(!symbols.declare("x", Value::Int(2), 1));
    /// assert_eq!(symbols.get("x"), Some(&Value::Int(1)));
    /// ```
    pub fn declare(&mut self, name: &str, value: Value, scope_depth: usize) -> bool {
        if self.variables.contains_key(name) {
            return false;
        }
        self.variables
            .insert(name.to_string(), Variable { value, scope_depth });
        true
    }

    /// Replaces the value of a live variable. Its scope depth is kept.
    ///
    /// # Returns
    /// `false` if `name` is not live.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        match self.variables.get_mut(name) {
            Some(variable) => {
                variable.value = value;
                true
            },
            None => false,
        }
    }

    /// Returns the value of a live variable.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name).map(|variable| &variable.value)
    }

    /// Returns the full binding of a live variable.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Returns `true` if `name` is live.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Erases every binding declared at `scope_depth` or deeper.
    ///
    /// # Returns
    /// The number of bindings erased.
    pub fn remove_scope(&mut self, scope_depth: usize) -> usize {
        let before = self.variables.len();
        self.variables
            .retain(|_, variable| variable.scope_depth < scope_depth);
        before - self.variables.len()
    }

    /// Returns the number of live bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_keeps_the_declaring_depth() {
        let mut symbols = SymbolTable::new();
        assert!(symbols.declare("n", Value::Int(1), 2));
        assert!(symbols.assign("n", Value::from("one")));

        let variable = symbols.variable("n").unwrap();
        assert_eq!(variable.value, Value::from("one"));
        assert_eq!(variable.scope_depth, 2);
    }

    #[test]
    fn assigning_an_unknown_name_fails() {
        let mut symbols = SymbolTable::new();
        assert!(!symbols.assign("ghost", Value::Int(0)));
        assert!(symbols.is_empty());
    }

    #[test]
    fn teardown_erases_the_scope_and_deeper() {
        let mut symbols = SymbolTable::new();
        symbols.declare("global", Value::Int(0), 0);
        symbols.declare("outer", Value::Int(1), 1);
        symbols.declare("inner", Value::Int(2), 2);

        assert_eq!(symbols.remove_scope(1), 2);
        assert!(symbols.contains("global"));
        assert!(!symbols.contains("outer"));
        assert!(!symbols.contains("inner"));

        assert!(symbols.declare("outer", Value::Bool(true), 0));
        assert_eq!(symbols.len(), 2);
    }
}
