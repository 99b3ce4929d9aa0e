//! Errors and warnings produced while assembling.
//!
//! Anything in [`AsmError`] stops assembly on the line it was found.
//! A [`Warning`] is recorded, logged, and assembly carries on with a
//! zero in place of the value that could not be read.
use thiserror::Error;

#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum AsmError {
    #[error("unable to read source `{path}`: {message}")]
    Source { path: String, message: String },

    #[error("line {line}: constant `{name}` has non-numeric value `{token}`")]
    InvalidConstant { name: String, token: String, line: usize },

    #[error("line {line} (address 0x{address:06X}): invalid opcode `{token}`")]
    InvalidOpcode { token: String, line: usize, address: u32 },

    #[error("line {line} (address 0x{address:06X}): expected a mnemonic")]
    MissingMnemonic { line: usize, address: u32 },

    #[error("line {line} (address 0x{address:06X}): `{mnemonic}` requires an operand")]
    MissingOperand { mnemonic: String, line: usize, address: u32 },

    #[error("unable to write output `{path}`: {message}")]
    Output { path: String, message: String },
}

#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum Warning {
    /// Operand was neither a decimal literal nor a known symbol.
    #[error("line {line} (address 0x{address:06X}): unresolved operand `{token}`, using 0")]
    UnresolvedOperand { token: String, line: usize, address: u32 },

    #[error("line {line} (address 0x{address:06X}): DS without a value, using 0")]
    MissingReserve { line: usize, address: u32 },

    /// `DS` value is not a decimal literal.
    #[error("line {line} (address 0x{address:06X}): invalid DS value `{token}`, using 0")]
    InvalidReserve { token: String, line: usize, address: u32 },
}
