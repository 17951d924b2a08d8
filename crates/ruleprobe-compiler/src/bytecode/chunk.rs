//! Bytecode chunk for one compiled expression.

use super::OpCode;

/// Emitted instructions plus the source line of every byte.
///
/// Constants live in a shared [`super::ConstantPool`], not in the chunk.
#[derive(Debug, Clone, Default)]
pub struct BytecodeChunk {
    code: Vec<u8>,
    /// Parallel to `code`.
    lines: Vec<u32>,
}

impl BytecodeChunk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_op(&mut self, op: OpCode, line: u32) {
        self.code.push(op.into());
        self.lines.push(line);
    }

    pub fn write_byte(&mut self, byte: u8, line: u32) {
        self.code.push(byte);
        self.lines.push(line);
    }

    /// Write a 16-bit operand (big-endian).
    pub fn write_u16(&mut self, value: u16, line: u32) {
        for byte in value.to_be_bytes() {
            self.write_byte(byte, line);
        }
    }

    pub fn code(&self) -> &[u8] {
        &self.code
    }

    pub fn line_at(&self, offset: usize) -> Option<u32> {
        self.lines.get(offset).copied()
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    pub fn read_byte(&self, offset: usize) -> Option<u8> {
        self.code.get(offset).copied()
    }

    /// Read a u16 at the given offset (big-endian).
    pub fn read_u16(&self, offset: usize) -> Option<u16> {
        let high = *self.code.get(offset)?;
        let low = *self.code.get(offset + 1)?;
        Some(u16::from_be_bytes([high, low]))
    }

    pub fn read_op(&self, offset: usize) -> Option<OpCode> {
        self.code.get(offset).and_then(|&b| OpCode::from_u8(b))
    }

    /// Decode the instruction stream as `(offset, opcode)` pairs.
    ///
    /// Stops at the first byte that is not a valid opcode.
    pub fn instructions(&self) -> Vec<(usize, OpCode)> {
        let mut instructions = Vec::new();
        let mut offset = 0;
        while let Some(op) = self.read_op(offset) {
            instructions.push((offset, op));
            offset += 1 + op.operand_size();
        }
        instructions
    }

    /// The opcode sequence, ignoring operands.
    pub fn ops(&self) -> Vec<OpCode> {
        self.instructions().into_iter().map(|(_, op)| op).collect()
    }

    /// Human-readable listing, one instruction per line.
    pub fn disassemble(&self) -> String {
        let mut out = String::new();
        for (offset, op) in self.instructions() {
            let operand = match op.operand_size() {
                1 => self.read_byte(offset + 1).map(u16::from),
                2 => self.read_u16(offset + 1),
                _ => None,
            };
            match operand {
                Some(operand) => out.push_str(&format!("{offset:04} {} {operand}\n", op.name())),
                None => out.push_str(&format!("{offset:04} {}\n", op.name())),
            }
        }
        out
    }

    /// Assert the chunk holds exactly this opcode sequence.
    #[track_caller]
    pub fn assert_ops(&self, expected: &[OpCode]) {
        let actual = self.ops();
        assert_eq!(
            actual,
            expected,
            "Bytecode mismatch.\nExpected: {:?}\nActual:   {:?}",
            expected.iter().map(|op| op.name()).collect::<Vec<_>>(),
            actual.iter().map(|op| op.name()).collect::<Vec<_>>(),
        );
    }
}
