//! EU machine-code generation.
//!
//! [`encode`] packs single instructions into the 128-bit wire format and
//! [`emitter`] strings them into arena-backed programs. Everything above this
//! layer works with [`crate::core::regs::Reg`] operands and never touches
//! instruction words directly.

pub mod emitter;
pub mod encode;

pub use emitter::{EuEmitter, Inst, Mnemonic, RENDER_TARGET_SURFACE, TEXTURE_SURFACE};
pub use encode::MRF_GRF_WINDOW;
