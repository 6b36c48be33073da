//! Script module for the Neo Virtual Machine.
//!
//! A `Script` is an immutable, validated view over a byte buffer of opcodes.
//! It owns the buffer and hands out parsed `Instruction`s on demand rather
//! than pre-decoding the whole thing, matching how the execution engine
//! only ever touches the instructions it actually steps through.

use crate::error::{VmError, VmResult};
use crate::instruction::Instruction;
use crate::op_code::OpCode;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// Maximum script size in bytes.
const MAX_SCRIPT_SIZE: usize = 65536;

/// An executable script: raw bytecode plus (optionally validated) opcodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    value: Vec<u8>,
}

impl Script {
    /// Creates a new script, validating that every byte sequence decodes to
    /// a well-formed instruction and that the script does not exceed the
    /// maximum script size.
    pub fn new(value: Vec<u8>, check_opcodes: bool) -> VmResult<Self> {
        if value.len() > MAX_SCRIPT_SIZE {
            return Err(VmError::invalid_script(format!(
                "Script length {} exceeds maximum of {}",
                value.len(),
                MAX_SCRIPT_SIZE
            )));
        }

        let script = Self { value };

        if check_opcodes {
            let mut position = 0usize;
            while position < script.value.len() {
                let instruction = Instruction::parse(&script.value, position)?;
                position += instruction.size();
            }
        }

        Ok(script)
    }

    /// Creates a new script without validating opcodes. Used by callers
    /// (tests, and contexts seeded from already-trusted bytecode) that
    /// don't need the up-front scan.
    pub fn new_relaxed(value: Vec<u8>) -> Self {
        Self { value }
    }

    /// Returns the raw script bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.value
    }

    /// Returns the length of the script in bytes.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Returns true if the script is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Parses and returns the instruction at the given position.
    pub fn get_instruction(&self, position: usize) -> VmResult<Instruction> {
        Instruction::parse(&self.value, position)
    }

    /// Returns the opcode at the given position without parsing its operand.
    pub fn get_opcode(&self, position: usize) -> VmResult<OpCode> {
        if position >= self.value.len() {
            return Err(VmError::parse("Position out of bounds"));
        }

        OpCode::try_from(self.value[position])
            .map_err(|_| VmError::parse(format!("Invalid opcode: {}", self.value[position])))
    }

    /// Returns a copy of the script bytes.
    pub fn to_array(&self) -> Vec<u8> {
        self.value.clone()
    }

    /// Returns the script hash (HASH160: RIPEMD160 of SHA256 of the script).
    pub fn script_hash(&self) -> [u8; 20] {
        let sha = Sha256::digest(&self.value);
        let ripemd = Ripemd160::digest(sha);
        let mut result = [0u8; 20];
        result.copy_from_slice(&ripemd);
        result
    }
}

impl From<Vec<u8>> for Script {
    fn from(value: Vec<u8>) -> Self {
        Self::new_relaxed(value)
    }
}

impl AsRef<[u8]> for Script {
    fn as_ref(&self) -> &[u8] {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_relaxed_accepts_any_bytes() {
        let script = Script::new_relaxed(vec![OpCode::PUSH1 as u8, OpCode::RET as u8]);
        assert_eq!(script.len(), 2);
        assert_eq!(script.as_bytes(), &[OpCode::PUSH1 as u8, OpCode::RET as u8]);
    }

    #[test]
    fn new_validates_opcodes() {
        let bytes = vec![OpCode::PUSH1 as u8, OpCode::RET as u8];
        let script = Script::new(bytes.clone(), true).expect("valid script");
        assert_eq!(script.to_array(), bytes);
    }

    #[test]
    fn new_rejects_invalid_opcode() {
        let bytes = vec![0xFF];
        assert!(Script::new(bytes, true).is_err());
    }

    #[test]
    fn get_instruction_parses_in_place() {
        let script = Script::new_relaxed(vec![OpCode::PUSH1 as u8, OpCode::RET as u8]);
        let instruction = script.get_instruction(0).expect("instruction");
        assert_eq!(instruction.opcode(), OpCode::PUSH1);
    }

    #[test]
    fn script_hash_is_hash160() {
        let script = Script::new_relaxed(vec![OpCode::RET as u8]);
        let hash = script.script_hash();
        assert_eq!(hash.len(), 20);
    }
}
