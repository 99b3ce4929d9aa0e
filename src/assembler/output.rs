//! Writers for the assembled program: the binary image and the listing.
use std::io::{self, Write};
use super::ast::WORD_BITS;
use super::parser::Program;

/// Every image starts with these two bytes.
pub const IMAGE_MAGIC: [u8; 2] = [0x4A, 0x42];

/// Writes the image: the magic header followed by each word as 24 ASCII
/// `0`/`1` digits, most significant bit first.
pub fn write_image<W: Write>(program: &Program, out: &mut W) -> io::Result<()> {
    out.write_all(&IMAGE_MAGIC)?;
    for emitted in program.words.iter() {
        write!(out, "{:0width$b}", emitted.word, width = WORD_BITS as usize)?;
    }
    out.flush()
}

/// Writes one `address word` line per emitted word, in hex or in binary,
/// followed by the symbol table.
pub fn write_listing<W: Write>(program: &Program, binary: bool, out: &mut W) -> io::Result<()> {
    for emitted in program.words.iter() {
        if binary {
            writeln!(out, "{:024b} {:024b}", emitted.address, emitted.word)?;
        } else {
            writeln!(out, "0x{:06X} 0x{:06X}", emitted.address, emitted.word)?;
        }
    }
    write!(out, "{}", program.symbols)?;
    out.flush()
}
