//! The meta-shader repertoire and its compiler.
//!
//! [`op`] is the closed catalog of operations, [`layout`] fixes where each
//! operation's values live in the register file, and [`compiler`] emits and
//! extracts the finished programs. [`objfile`] packages compiled programs
//! for offline inspection.

pub mod compiler;
pub mod layout;
pub mod objfile;
pub mod op;

pub use compiler::{
    compile_meta_shader, MetaCompiler, MetaShader, ProgramMetadata, META_SHADER_OUT_COUNT,
    META_SHADER_SURFACE_COUNT, PLACEHOLDER_FILL,
};
pub use layout::{OperandMap, RegisterLayout};
pub use objfile::build_object;
pub use op::{MetaOp, UnknownOpError};
