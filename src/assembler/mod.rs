//! The Assembler module takes MIMA source lines and produces
//! the assembled program from the submodules below.
//!
//! It does this in a single pass: each line is split by the lexer,
//! interpreted by the parser at the current address, and encoded into a
//! 24-bit word. Labels (`name:`) and constants (`NAME = value`) are bound
//! as they are seen; `;` starts a comment line.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod symbols;
