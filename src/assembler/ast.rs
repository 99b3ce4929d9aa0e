//! Opcodes and instruction words for the MIMA machine.
//!
//! Every instruction assembles to a single 24-bit word.
//!
//! ```nasm
//! LDC c    ; ACC <= c                       0x0
//! LDV a    ; ACC <= mem[a]                  0x1
//! STV a    ; mem[a] <= ACC                  0x2
//! ADD a    ; ACC <= ACC + mem[a]            0x3
//! AND a    ; ACC <= ACC & mem[a]            0x4
//! OR  a    ; ACC <= ACC | mem[a]            0x5
//! XOR a    ; ACC <= ACC ^ mem[a]            0x6
//! EQL a    ; ACC <= -1 if ACC == mem[a]     0x7
//! JMP a    ; jump to a                      0x8
//! JMN a    ; jump to a if ACC < 0           0x9
//! LDIV a   ; ACC <= mem[mem[a]]             0xA
//! STIV a   ; mem[mem[a]] <= ACC             0xB
//! JMS a    ; jump to subroutine at a        0xC
//! JI  a    ; jump to mem[a]                 0xD
//! HALT     ; stop                           0xF0
//! NOT      ; ACC <= !ACC                    0xF1
//! RAR      ; rotate ACC right               0xF2
//! ```
//!
//! Basic opcodes sit in bits 20-23 with a 20-bit operand below them.
//! Extended opcodes sit in bits 16-23 and take no operand.

use std::fmt;

/// A single assembled machine word. Only the low 24 bits are ever set.
pub type Word = u32;

pub const WORD_BITS: u32 = 24;
pub const WORD_MASK: Word = 0xFF_FFFF;
pub const OPERAND_MASK: Word = 0x0F_FFFF;

const BASIC_SHIFT: Word = 0x10_0000;
const EXTENDED_SHIFT: Word = 0x1_0000;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Opcode {
    LDC,
    LDV,
    STV,
    ADD,
    AND,
    OR,
    XOR,
    EQL,
    JMP,
    JMN,
    LDIV,
    STIV,
    JMS,
    JI,
    HALT,
    NOT,
    RAR,
}

impl Opcode {
    pub const ALL: [Opcode; 17] = {
        use Opcode::*;
        [LDC, LDV, STV, ADD, AND, OR, XOR, EQL, JMP, JMN, LDIV, STIV, JMS, JI, HALT, NOT, RAR]
    };

    /// Numeric encoding of the opcode.
    pub fn value(&self) -> Word {
        use Opcode::*;
        match self {
            LDC  => 0x0,
            LDV  => 0x1,
            STV  => 0x2,
            ADD  => 0x3,
            AND  => 0x4,
            OR   => 0x5,
            XOR  => 0x6,
            EQL  => 0x7,
            JMP  => 0x8,
            JMN  => 0x9,
            LDIV => 0xA,
            STIV => 0xB,
            JMS  => 0xC,
            JI   => 0xD,
            HALT => 0xF0,
            NOT  => 0xF1,
            RAR  => 0xF2,
        }
    }

    /// Basic opcodes (below 16) take exactly one operand, extended ones none.
    pub fn has_operand(&self) -> bool {
        self.value() < 16
    }

    pub fn mnemonic(&self) -> &'static str {
        use Opcode::*;
        match self {
            LDC  => "LDC",
            LDV  => "LDV",
            STV  => "STV",
            ADD  => "ADD",
            AND  => "AND",
            OR   => "OR",
            XOR  => "XOR",
            EQL  => "EQL",
            JMP  => "JMP",
            JMN  => "JMN",
            LDIV => "LDIV",
            STIV => "STIV",
            JMS  => "JMS",
            JI   => "JI",
            HALT => "HALT",
            NOT  => "NOT",
            RAR  => "RAR",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

impl std::convert::TryFrom<&str> for Opcode {
    type Error = ();

    fn try_from(mnemonic: &str) -> Result<Self, Self::Error> {
        use Opcode::*;
        // Mnemonics are case-sensitive.
        match mnemonic {
            "LDC"  => Ok(LDC),
            "LDV"  => Ok(LDV),
            "STV"  => Ok(STV),
            "ADD"  => Ok(ADD),
            "AND"  => Ok(AND),
            "OR"   => Ok(OR),
            "XOR"  => Ok(XOR),
            "EQL"  => Ok(EQL),
            "JMP"  => Ok(JMP),
            "JMN"  => Ok(JMN),
            "LDIV" => Ok(LDIV),
            "STIV" => Ok(STIV),
            "JMS"  => Ok(JMS),
            "JI"   => Ok(JI),
            "HALT" => Ok(HALT),
            "NOT"  => Ok(NOT),
            "RAR"  => Ok(RAR),
            _ => Err(()),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Instruction {
    /// A basic operation with its resolved operand.
    Basic(Opcode, i64),
    /// An extended operation. Carries no operand.
    Extended(Opcode),
    /// A `DS` reserve directive: the literal is emitted as-is.
    Reserve(i64),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Instruction::Basic(op, operand) => write!(f, "{} {}", op, operand),
            Instruction::Extended(op)       => write!(f, "{}", op),
            Instruction::Reserve(value)     => write!(f, "DS {}", value),
        }
    }
}

impl Instruction {
    /// Assembles the instruction into its 24-bit machine word.
    pub fn assemble(&self) -> Word {
        let word = match self {
            Instruction::Basic(op, operand) =>
                op.value() * BASIC_SHIFT + (encode_signed(*operand) & OPERAND_MASK),
            Instruction::Extended(op)       => op.value() * EXTENDED_SHIFT,
            Instruction::Reserve(value)     => encode_signed(*value),
        };
        word & WORD_MASK
    }
}

/// Encodes `value` as a 24-bit two's complement word.
///
/// Equivalent to `(2^24 + value) mod 2^24` for every value in
/// `[-2^23, 2^24)`; anything wider is truncated to its low 24 bits.
pub fn encode_signed(value: i64) -> Word {
    (value.rem_euclid(1 << WORD_BITS) as Word) & WORD_MASK
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_opcode_table() {
        let expected: [(&str, Word, bool); 17] = [
            ("LDC", 0x0, true),
            ("LDV", 0x1, true),
            ("STV", 0x2, true),
            ("ADD", 0x3, true),
            ("AND", 0x4, true),
            ("OR", 0x5, true),
            ("XOR", 0x6, true),
            ("EQL", 0x7, true),
            ("JMP", 0x8, true),
            ("JMN", 0x9, true),
            ("LDIV", 0xA, true),
            ("STIV", 0xB, true),
            ("JMS", 0xC, true),
            ("JI", 0xD, true),
            ("HALT", 0xF0, false),
            ("NOT", 0xF1, false),
            ("RAR", 0xF2, false),
        ];

        for (mnemonic, value, has_operand) in expected.iter() {
            let op = Opcode::try_from(*mnemonic);
            assert!(op.is_ok(), "{} should resolve", mnemonic);
            let op = op.ok().unwrap();
            assert_eq!(op.value(), *value);
            assert_eq!(op.has_operand(), *has_operand);
            assert_eq!(op.mnemonic(), *mnemonic);
        }

        for op in Opcode::ALL.iter() {
            assert_eq!(Opcode::try_from(op.mnemonic()), Ok(*op));
        }
    }

    #[test]
    fn test_invalid_opcode() {
        for bad in ["", "ldc", "Ldc", "LD", "LDI", "STI", "JM", "ADDX", "HAL", "NOP", " LDC", "DS"].iter() {
            assert_eq!(Opcode::try_from(*bad), Err(()), "{:?} should not resolve", bad);
        }
    }

    #[test]
    fn test_encode_signed() {
        assert_eq!(encode_signed(0), 0);
        assert_eq!(encode_signed(-1), 0xFF_FFFF);
        assert_eq!(encode_signed(-(1 << 23)), 0x80_0000);
        assert_eq!(encode_signed((1 << 23) - 1), 0x7F_FFFF);
        assert_eq!(encode_signed(5), 5);

        // Matches the complement-of-(magnitude - 1) construction.
        for v in (-(1i64 << 23)..0).step_by(997) {
            let magnitude = ((-v) - 1) as Word;
            assert_eq!(encode_signed(v), !magnitude & WORD_MASK);
            assert_eq!(encode_signed(v), ((1i64 << 24) + v) as Word % (1 << 24));
        }
        for v in (0..(1i64 << 23)).step_by(997) {
            assert_eq!(encode_signed(v), v as Word);
        }
    }

    #[test]
    fn test_assemble() {
        assert_eq!(Instruction::Basic(Opcode::LDC, 5).assemble(), 0x00_0005);
        assert_eq!(Instruction::Basic(Opcode::ADD, 3).assemble(), 0x30_0003);
        assert_eq!(Instruction::Basic(Opcode::JI, 0xF_FFFF).assemble(), 0xDF_FFFF);
        // Operands are truncated to their low 20 bits.
        assert_eq!(Instruction::Basic(Opcode::LDC, -1).assemble(), 0x0F_FFFF);
        assert_eq!(Instruction::Basic(Opcode::JMP, 0x10_0001).assemble(), 0x80_0001);

        assert_eq!(Instruction::Extended(Opcode::HALT).assemble(), 0xF0_0000);
        assert_eq!(Instruction::Extended(Opcode::NOT).assemble(), 0xF1_0000);
        assert_eq!(Instruction::Extended(Opcode::RAR).assemble(), 0xF2_0000);

        assert_eq!(Instruction::Reserve(7).assemble(), 7);
        assert_eq!(Instruction::Reserve(-1).assemble(), 0xFF_FFFF);
        assert_eq!(Instruction::Reserve(0x1FF_FFFF).assemble(), 0xFF_FFFF);

        for op in Opcode::ALL.iter() {
            let word = if op.has_operand() {
                Instruction::Basic(*op, -1).assemble()
            } else {
                Instruction::Extended(*op).assemble()
            };
            assert!(word <= WORD_MASK);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Instruction::Basic(Opcode::LDV, 12).to_string(), "LDV 12");
        assert_eq!(Instruction::Extended(Opcode::HALT).to_string(), "HALT");
        assert_eq!(Instruction::Reserve(-3).to_string(), "DS -3");
    }
}
