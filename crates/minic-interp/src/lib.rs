//! minic-interp - Stepwise interpreter for the three-address IR.
//!
//! Execution walks the instruction list with a program counter, reading
//! and writing a variable store that is populated lazily on first write.
//! Every executed instruction produces a trace line, and each `PRINT`
//! adds a `PRINT OUTPUT: N` line; both go to an output handle the caller
//! passes in, so nothing touches the process-wide standard streams.
//!
//! A runtime fault (read before assignment, division by zero, jump to an
//! undefined label) is recorded in the diagnostics sink with the faulting
//! instruction's index and stops execution.

use std::io::{self, Write};

use indexmap::IndexMap;
use minic_ir::{Instruction, Opcode, Operand};
use minic_util::{Diagnostic, Handler};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Faults that abort execution.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("Variable '{0}' used before assignment")]
    UndefinedVariable(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Jump to undefined label '{0}'")]
    UndefinedLabel(String),

    #[error("Attempt to read a value from operand type {0}")]
    UnreadableOperand(&'static str),

    #[error("Attempt to write to operand type {0}")]
    UnwritableOperand(&'static str),
}

/// Either a guest fault or a host I/O failure while writing output.
#[derive(Debug, Error)]
enum StepError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Fault(#[from] RuntimeError),
}

/// Executes IR against a variable store.
pub struct Interpreter<'a> {
    handler: &'a Handler,

    /// Variable and temporary values, keyed by name. Insertion order is
    /// preserved, which keeps test assertions on the store deterministic.
    store: IndexMap<String, i32>,

    /// Label name -> index of the instruction following the `LABEL`.
    labels: FxHashMap<String, usize>,
}

impl<'a> Interpreter<'a> {
    pub fn new(handler: &'a Handler) -> Self {
        Self {
            handler,
            store: IndexMap::new(),
            labels: FxHashMap::default(),
        }
    }

    /// Runs `code` from index 0, writing the execution trace and PRINT
    /// output to `out`.
    ///
    /// Runtime faults are recorded as diagnostics (carrying the
    /// instruction index in place of a source line) and end the run; only
    /// host I/O failures surface as `Err`.
    pub fn run(&mut self, code: &[Instruction], out: &mut dyn Write) -> io::Result<()> {
        self.store.clear();
        if code.is_empty() {
            return Ok(());
        }
        self.build_label_table(code);

        let mut pc = 0usize;
        while pc < code.len() {
            let instruction = &code[pc];
            writeln!(out, "PC {}: Executing {}", pc, instruction)?;

            match self.execute(instruction, pc, out) {
                Ok(next_pc) => pc = next_pc,
                Err(StepError::Io(err)) => return Err(err),
                Err(StepError::Fault(fault)) => {
                    self.handler
                        .emit(Diagnostic::runtime(fault.to_string(), instruction.index));
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    /// The variable store as it stands after execution.
    pub fn store(&self) -> &IndexMap<String, i32> {
        &self.store
    }

    /// Binds every label name to the index of the following instruction.
    fn build_label_table(&mut self, code: &[Instruction]) {
        self.labels.clear();
        for (i, instruction) in code.iter().enumerate() {
            if instruction.op != Opcode::Label {
                continue;
            }
            if let Operand::Label(name) = &instruction.arg1 {
                let previous = self.labels.insert(name.clone(), i + 1);
                // Duplicate labels are a generator bug, not a user error.
                debug_assert!(previous.is_none(), "duplicate label {}", name);
            }
        }
    }

    /// Executes one instruction and returns the next program counter.
    fn execute(
        &mut self,
        instruction: &Instruction,
        pc: usize,
        out: &mut dyn Write,
    ) -> Result<usize, StepError> {
        let mut next_pc = pc + 1;

        match instruction.op {
            Opcode::Add => self.arithmetic(instruction, i32::wrapping_add)?,
            Opcode::Sub => self.arithmetic(instruction, i32::wrapping_sub)?,
            Opcode::Mul => self.arithmetic(instruction, i32::wrapping_mul)?,
            Opcode::Div => {
                let lhs = self.read(&instruction.arg1)?;
                let rhs = self.read(&instruction.arg2)?;
                if rhs == 0 {
                    return Err(RuntimeError::DivisionByZero.into());
                }
                self.write_value(&instruction.result, lhs.wrapping_div(rhs))?;
            }
            Opcode::CmpEq => self.compare(instruction, |a, b| a == b)?,
            Opcode::CmpNe => self.compare(instruction, |a, b| a != b)?,
            Opcode::CmpLt => self.compare(instruction, |a, b| a < b)?,
            Opcode::CmpGt => self.compare(instruction, |a, b| a > b)?,
            Opcode::Assign | Opcode::LoadImm => {
                let value = self.read(&instruction.arg1)?;
                self.write_value(&instruction.result, value)?;
            }
            Opcode::Label => {}
            Opcode::Jmp => next_pc = self.jump_target(&instruction.arg1)?,
            Opcode::JmpIfZero => {
                if self.read(&instruction.arg1)? == 0 {
                    next_pc = self.jump_target(&instruction.arg2)?;
                }
            }
            Opcode::Print => {
                let value = self.read(&instruction.arg1)?;
                writeln!(out, "PRINT OUTPUT: {}", value)?;
            }
        }

        Ok(next_pc)
    }

    fn arithmetic(
        &mut self,
        instruction: &Instruction,
        op: fn(i32, i32) -> i32,
    ) -> Result<(), RuntimeError> {
        let lhs = self.read(&instruction.arg1)?;
        let rhs = self.read(&instruction.arg2)?;
        self.write_value(&instruction.result, op(lhs, rhs))
    }

    /// Comparisons yield 1 for true, 0 for false.
    fn compare(
        &mut self,
        instruction: &Instruction,
        predicate: fn(i32, i32) -> bool,
    ) -> Result<(), RuntimeError> {
        let lhs = self.read(&instruction.arg1)?;
        let rhs = self.read(&instruction.arg2)?;
        self.write_value(&instruction.result, predicate(lhs, rhs) as i32)
    }

    /// The operand read rule: literals yield their value, variables and
    /// temporaries their store entry.
    fn read(&self, operand: &Operand) -> Result<i32, RuntimeError> {
        match operand {
            Operand::Literal(value) => Ok(*value),
            Operand::Variable(name) | Operand::Temporary(name) => self
                .store
                .get(name)
                .copied()
                .ok_or_else(|| RuntimeError::UndefinedVariable(name.clone())),
            other => Err(RuntimeError::UnreadableOperand(other.kind_name())),
        }
    }

    fn write_value(&mut self, target: &Operand, value: i32) -> Result<(), RuntimeError> {
        match target {
            Operand::Variable(name) | Operand::Temporary(name) => {
                self.store.insert(name.clone(), value);
                Ok(())
            }
            other => Err(RuntimeError::UnwritableOperand(other.kind_name())),
        }
    }

    fn jump_target(&self, target: &Operand) -> Result<usize, RuntimeError> {
        let name = match target {
            Operand::Label(name) => name,
            other => return Err(RuntimeError::UnreadableOperand(other.kind_name())),
        };
        self.labels
            .get(name)
            .copied()
            .ok_or_else(|| RuntimeError::UndefinedLabel(name.clone()))
    }
}
