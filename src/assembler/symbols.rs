//! The symbol table maps label and constant names to their values.
//!
//! Symbols are bound in source order as the assembler walks the file, so a
//! name can only be resolved once the line defining it has been seen.
use std::collections::BTreeMap;
use std::fmt;
use super::lexer::parse_literal;

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct SymbolTable {
    symbols: BTreeMap<String, i64>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable { symbols: BTreeMap::new() }
    }

    /// Binds `name` to `value`. A later binding silently replaces an earlier one.
    pub fn define(&mut self, name: &str, value: i64) {
        if let Some(old) = self.symbols.insert(name.to_owned(), value) {
            debug!("symbol `{}` rebound from {} to {}", name, old, value);
        } else {
            debug!("symbol `{}` bound to {}", name, value);
        }
    }

    /// Resolves a decimal literal or a previously defined symbol.
    pub fn resolve(&self, token: &str) -> Option<i64> {
        parse_literal(token).or_else(|| self.get(token))
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.symbols.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterates over all symbols, ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.symbols.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (name, value) in self.iter() {
            writeln!(f, "{} = {}", name, value)?;
        }
        Ok(())
    }
}
