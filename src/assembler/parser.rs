//! The Parser walks the source once, top to bottom, and produces the
//! assembled program.
//!
//! Symbols are bound the moment their line is reached. A reference to a
//! label further down the file is not known yet and assembles as 0.
use std::convert::TryFrom;
use super::ast::{Instruction, Opcode, Word};
use super::error::{AsmError, Warning};
use super::lexer::{parse_literal, tokenize_line, Line, Statement};
use super::symbols::SymbolTable;

/// What a single source line contributes to the program.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum LineOutcome {
    Emit(Instruction),
    Skip,
}

/// One assembled word and where it came from.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Emitted {
    pub address: u32,
    pub word: Word,
    pub instruction: Instruction,
    pub line: usize,
    pub source: String,
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Program {
    pub words: Vec<Emitted>,
    pub symbols: SymbolTable,
    pub warnings: Vec<Warning>,
}

pub struct Parser {
    address: u32,
    symbols: SymbolTable,
    words: Vec<Emitted>,
    warnings: Vec<Warning>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Parser { address: 0, symbols: SymbolTable::new(), words: Vec::new(), warnings: Vec::new() }
    }

    /// Run the parser over every line, consuming itself and returning the
    /// program. Stops at the first fatal error.
    pub fn run<I, S>(mut self, lines: I) -> Result<Program, AsmError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (index, source) in lines.into_iter().enumerate() {
            let source = source.as_ref();
            let line = index + 1;

            match self.line(source, line)? {
                LineOutcome::Emit(instruction) => {
                    let word = instruction.assemble();
                    debug!("0x{:06X}: {} => 0x{:06X}", self.address, instruction, word);
                    self.words.push(Emitted {
                        address: self.address,
                        word,
                        instruction,
                        line,
                        source: source.to_owned(),
                    });
                    self.address += 1;
                },
                LineOutcome::Skip => {},
            }
        }

        info!("assembled {} word(s), {} symbol(s), {} warning(s)",
            self.words.len(), self.symbols.len(), self.warnings.len());

        Ok(Program { words: self.words, symbols: self.symbols, warnings: self.warnings })
    }

    /// Interprets one source line at the current address.
    fn line(&mut self, source: &str, line: usize) -> Result<LineOutcome, AsmError> {
        match tokenize_line(source) {
            Line::Comment | Line::Blank => Ok(LineOutcome::Skip),
            Line::Statement { label, statement } => {
                if let Some(label) = label {
                    self.symbols.define(label, i64::from(self.address));
                }
                self.statement(statement, line)
            },
        }
    }

    fn statement(&mut self, statement: Statement, line: usize) -> Result<LineOutcome, AsmError> {
        match statement {
            Statement::Reserve(value) => Ok(LineOutcome::Emit(self.reserve(value, line))),
            Statement::Constant { name, value } => {
                let value = parse_literal(value).ok_or_else(|| AsmError::InvalidConstant {
                    name: name.to_owned(),
                    token: value.to_owned(),
                    line,
                })?;
                self.symbols.define(name, value);
                Ok(LineOutcome::Skip)
            },
            Statement::Operation { mnemonic, operand } =>
                self.operation(mnemonic, operand, line).map(LineOutcome::Emit),
            Statement::Empty => Err(AsmError::MissingMnemonic { line, address: self.address }),
        }
    }

    fn reserve(&mut self, value: Option<&str>, line: usize) -> Instruction {
        let token = match value {
            Some(token) => token,
            None => {
                self.warn(Warning::MissingReserve { line, address: self.address });
                return Instruction::Reserve(0);
            },
        };

        match parse_literal(token) {
            Some(v) => Instruction::Reserve(v),
            None => {
                self.warn(Warning::InvalidReserve {
                    token: token.to_owned(),
                    line,
                    address: self.address,
                });
                Instruction::Reserve(0)
            },
        }
    }

    fn operation(&mut self, mnemonic: &str, operand: Option<&str>, line: usize) -> Result<Instruction, AsmError> {
        let op = Opcode::try_from(mnemonic).map_err(|()| AsmError::InvalidOpcode {
            token: mnemonic.to_owned(),
            line,
            address: self.address,
        })?;

        if !op.has_operand() {
            return Ok(Instruction::Extended(op));
        }

        let operand = operand.ok_or_else(|| AsmError::MissingOperand {
            mnemonic: mnemonic.to_owned(),
            line,
            address: self.address,
        })?;

        let value = match self.symbols.resolve(operand) {
            Some(v) => v,
            None => {
                self.warn(Warning::UnresolvedOperand {
                    token: operand.to_owned(),
                    line,
                    address: self.address,
                });
                0
            },
        };
        Ok(Instruction::Basic(op, value))
    }

    fn warn(&mut self, warning: Warning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }
}
