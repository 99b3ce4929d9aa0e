//! This lexer splits MIMA source lines into their parts.
//!
//! Each line holds at most one statement, optionally prefixed by a
//! `label:`. Lines are only classified here; nothing is resolved.
use std::io::{BufRead, BufReader, Read};
use super::error::AsmError;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Line<'a> {
    /// Starts with `;`.
    Comment,
    /// At most one character once trimmed.
    Blank,
    Statement { label: Option<&'a str>, statement: Statement<'a> },
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Statement<'a> {
    /// `DS [value]`
    Reserve(Option<&'a str>),
    /// `NAME = value`
    Constant { name: &'a str, value: &'a str },
    /// `MNEMONIC [operand]`
    Operation { mnemonic: &'a str, operand: Option<&'a str> },
    /// Nothing left after the label.
    Empty,
}

/// Reads every line from `reader`, stripping the line terminators.
pub fn read_source<R: Read>(reader: R, path: &str) -> Result<Vec<String>, AsmError> {
    BufReader::new(reader)
        .lines()
        .collect::<Result<Vec<String>, _>>()
        .map_err(|e| AsmError::Source { path: path.to_owned(), message: e.to_string() })
}

/// Parses a signed decimal literal.
pub fn parse_literal(token: &str) -> Option<i64> {
    token.parse::<i64>().ok()
}

fn is_horizontal_space(c: char) -> bool {
    c == ' ' || c == '\t'
}

pub fn tokenize_line(line: &str) -> Line<'_> {
    let line = line.trim_matches(|c: char| is_horizontal_space(c) || c == '\n' || c == '\r');

    if line.starts_with(';') {
        return Line::Comment;
    }
    if line.chars().count() <= 1 {
        return Line::Blank;
    }

    let mut parts = line.splitn(2, ':');
    let head = parts.next().unwrap_or("");
    let (label, body) = match parts.next() {
        Some(rest) => (Some(head.trim_matches(is_horizontal_space)), rest),
        None => (None, head),
    };

    Line::Statement { label, statement: tokenize_statement(body) }
}

fn tokenize_statement(body: &str) -> Statement<'_> {
    let fields: Vec<&str> = body
        .split(is_horizontal_space)
        .filter(|f| !f.is_empty())
        .collect();

    match fields.as_slice() {
        [] => Statement::Empty,
        ["DS", rest @ ..] => Statement::Reserve(rest.first().copied()),
        [name, "=", value, ..] => Statement::Constant { name: *name, value: *value },
        [mnemonic, rest @ ..] => Statement::Operation { mnemonic: *mnemonic, operand: rest.first().copied() },
    }
}
