//! genmeta - Meta-shader machine-code generation for Gen GPUs.
//!
//! Driver-internal operations (clears, copies, resolves) run as fragment
//! programs the driver generates itself. This crate produces those programs:
//! it holds a fixed catalog of operations and compiles each one straight to
//! EU machine code, with no source language, parser or optimizer in between.
//!
//! # Primary Usage
//!
//! ```
//! use genmeta::{compile_meta_shader, GpuDescriptor, MetaOp, GEN75};
//!
//! let gpu = GpuDescriptor::new(GEN75, 2);
//! let shader = compile_meta_shader(&gpu, MetaOp::ClearColor).unwrap();
//!
//! // 128-bit instructions, ending in a render-target write
//! assert_eq!(shader.code.len() % 16, 0);
//! assert_eq!(shader.metadata.first_push_constant_grf, 2);
//! ```
//!
//! # Architecture
//!
//! - [`meta`] - The operation catalog, register layout planning and the
//!   compiler that sequences each operation
//! - [`eu`] - EU instruction encoding and stream emission
//! - [`core`] - Shared infrastructure (errors, hardware profiles, register
//!   descriptions, compile sessions)

pub mod core;
pub mod eu;
pub mod meta;

pub use crate::core::{
    // Error handling
    MetaError, MetaResult,
    // Hardware identification
    GpuDescriptor, HwFeatures, HwProfile, GEN6, GEN7, GEN75,
    // Register descriptions
    Reg, RegFile, RegType,
    // Session management
    CompileSession, EmissionStats,
};
pub use eu::{EuEmitter, Mnemonic, RENDER_TARGET_SURFACE, TEXTURE_SURFACE};
pub use meta::{
    compile_meta_shader, MetaCompiler, MetaOp, MetaShader, ProgramMetadata, RegisterLayout,
    META_SHADER_OUT_COUNT, META_SHADER_SURFACE_COUNT,
};
