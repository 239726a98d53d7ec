//! Shared infrastructure for meta-shader compilation.
//!
//! This module provides the building blocks the operation catalog, layout
//! planner and emission sequencer are written against:
//!
//! - [`regs`]: the register slot model (files, rows, sub-offsets, regions)
//! - [`profile`]: per-compilation hardware context profile
//! - [`session`]: arena-backed session owning transient state and statistics
//! - [`error`]: the two-class failure model and `MetaResult`

pub mod error;
pub mod profile;
pub mod regs;
pub mod session;

// Re-export core components
pub use error::{MetaError, MetaResult};
pub use profile::{GpuDescriptor, HwFeatures, HwProfile, GEN6, GEN7, GEN75};
pub use regs::{Reg, RegFile, RegType, GRF_ROWS, MRF_ROWS, REG_ROW_BYTES};
pub use session::{CompileSession, EmissionStats};
