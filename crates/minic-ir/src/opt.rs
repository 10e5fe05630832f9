//! IR optimization passes: constant folding and dead-label removal.
//!
//! Both passes are idempotent and preserve the order of surviving
//! instructions. Jumps resolve labels by name, so dropping an
//! unreferenced `LABEL` cannot break control flow.

use rustc_hash::FxHashSet;

use crate::ir::{reindex, Instruction, IrCode, Opcode, Operand};

/// Runs constant folding, then dead-label removal, then re-indexes the
/// surviving instructions 0..M-1.
pub fn optimize(code: IrCode) -> IrCode {
    let mut code = code;
    fold_constants(&mut code);

    let mut code = strip_dead_labels(code);
    reindex(&mut code);
    code
}

/// Rewrites binary instructions whose operands are both literals into
/// `LOAD_IMM result, literal`.
///
/// Folding is local and single-pass: a folded temporary does not replace
/// its uses in later instructions. Integer arithmetic wraps (two's
/// complement). Division by zero is not performed here; the instruction
/// is left for the runtime to report.
pub fn fold_constants(code: &mut [Instruction]) {
    for instruction in code.iter_mut() {
        if !instruction.op.is_binary() {
            continue;
        }
        let (Operand::Literal(lhs), Operand::Literal(rhs)) =
            (&instruction.arg1, &instruction.arg2)
        else {
            continue;
        };
        let (lhs, rhs) = (*lhs, *rhs);

        let value = match instruction.op {
            Opcode::Add => lhs.wrapping_add(rhs),
            Opcode::Sub => lhs.wrapping_sub(rhs),
            Opcode::Mul => lhs.wrapping_mul(rhs),
            Opcode::Div if rhs != 0 => lhs.wrapping_div(rhs),
            Opcode::Div => continue,
            Opcode::CmpEq => (lhs == rhs) as i32,
            Opcode::CmpNe => (lhs != rhs) as i32,
            Opcode::CmpLt => (lhs < rhs) as i32,
            Opcode::CmpGt => (lhs > rhs) as i32,
            _ => continue,
        };

        instruction.op = Opcode::LoadImm;
        instruction.arg1 = Operand::Literal(value);
        instruction.arg2 = Operand::None;
    }
}

/// Drops every `LABEL` whose name no `JMP` or `JMP_IF_ZERO` references.
/// All other instructions are copied through in order.
pub fn strip_dead_labels(code: IrCode) -> IrCode {
    let mut used: FxHashSet<String> = FxHashSet::default();
    for instruction in &code {
        let target = match instruction.op {
            Opcode::Jmp => &instruction.arg1,
            Opcode::JmpIfZero => &instruction.arg2,
            _ => continue,
        };
        if let Operand::Label(name) = target {
            used.insert(name.clone());
        }
    }

    code.into_iter()
        .filter(|instruction| {
            if instruction.op != Opcode::Label {
                return true;
            }
            match &instruction.arg1 {
                Operand::Label(name) => used.contains(name.as_str()),
                _ => true,
            }
        })
        .collect()
}
