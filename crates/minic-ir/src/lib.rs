//! minic-ir - Three-address intermediate representation for Mini.
//!
//! The IR is a flat, ordered instruction list: no basic blocks, no
//! references between instructions. Control flow is expressed with named
//! labels that jumps resolve by name at interpretation time, which is what
//! lets the optimizer drop unreferenced `LABEL`s without touching any
//! jump.

pub mod ir;
pub mod lower;
pub mod opt;

pub use ir::{render_listing, reindex, Instruction, IrCode, Opcode, Operand};
pub use lower::generate;
pub use opt::optimize;
