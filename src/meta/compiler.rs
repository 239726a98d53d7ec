// This module turns a meta operation into a finished fragment program. It
// plans the register layout, dispatches to the emission sequence for the
// requested operation, and extracts the packed instruction stream into an
// owned buffer together with the metadata the pipeline needs to bind it
// (push-constant start row, depth-write flag, output and surface counts).

//! Meta-shader compilation.

use bumpalo::Bump;
use log::{debug, warn};

use crate::core::error::{MetaError, MetaResult};
use crate::core::profile::{GpuDescriptor, HwProfile};
use crate::core::regs::{Reg, RegType};
use crate::core::session::CompileSession;
use crate::eu::emitter::EuEmitter;
use crate::meta::layout::RegisterLayout;
use crate::meta::op::MetaOp;

/// Every meta program writes one color output.
pub const META_SHADER_OUT_COUNT: u32 = 1;
/// Binding table size: the source texture plus the render target.
pub const META_SHADER_SURFACE_COUNT: u32 = 2;

/// Fill dword written by operations without a dedicated sequence yet. The
/// value is easy to spot in dumps and framebuffer captures.
pub const PLACEHOLDER_FILL: u32 = 0x1234_5678;

/// First GRF row past the dispatched thread payload (r0 and r1).
const BASE_GRF: u8 = 2;

/// Rows of texel data a SIMD16 four-channel sampler fetch returns.
const SAMPLER_RESPONSE_ROWS: u8 = 8;

/// Pipeline-facing description of a compiled program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgramMetadata {
    /// GRF row where the push-constant buffer must be loaded.
    pub first_push_constant_grf: u32,
    /// Whether the program computes its own depth output.
    pub writes_depth: bool,
    pub out_count: u32,
    pub surface_count: u32,
}

/// A compiled meta shader: the machine code plus its binding metadata.
#[derive(Debug, Clone)]
pub struct MetaShader {
    pub op: MetaOp,
    pub code: Box<[u8]>,
    pub metadata: ProgramMetadata,
}

impl MetaShader {
    /// Number of 128-bit instructions in the program.
    pub fn instruction_count(&self) -> usize {
        self.code.len() / 16
    }
}

/// Compile the program for one meta operation.
///
/// This is the whole pipeline in one call: profile the GPU, plan registers,
/// emit the sequence, extract the code.
///
/// ```
/// use genmeta::{compile_meta_shader, GpuDescriptor, MetaOp, GEN75};
///
/// let gpu = GpuDescriptor::new(GEN75, 2);
/// let shader = compile_meta_shader(&gpu, MetaOp::ClearColor).unwrap();
/// assert!(shader.instruction_count() > 0);
/// ```
pub fn compile_meta_shader(gpu: &GpuDescriptor, op: MetaOp) -> MetaResult<MetaShader> {
    let profile = HwProfile::for_gpu(gpu)?;
    let arena = Bump::new();
    let session = CompileSession::new(&arena);
    let compiler = MetaCompiler::new(&session, profile, op);
    let shader = compiler.compile()?;
    debug!("{}: {}", op, session.stats());
    Ok(shader)
}

/// Emits the instruction sequence for one operation.
pub struct MetaCompiler<'arena> {
    session: &'arena CompileSession<'arena>,
    layout: RegisterLayout,
    eu: EuEmitter<'arena>,
}

impl<'arena> MetaCompiler<'arena> {
    pub fn new(session: &'arena CompileSession<'arena>, profile: HwProfile, op: MetaOp) -> Self {
        Self {
            session,
            layout: RegisterLayout::plan(op, BASE_GRF),
            eu: EuEmitter::new(session, profile),
        }
    }

    pub fn layout(&self) -> &RegisterLayout {
        &self.layout
    }

    /// Run the sequence for the planned operation and extract the program.
    pub fn compile(mut self) -> MetaResult<MetaShader> {
        let op = self.layout.op;
        debug!("compiling {} for gen{}", op, self.eu.profile().gen);

        match op {
            MetaOp::ClearColor => {
                let channels = [
                    self.layout.clear_val(0)?,
                    self.layout.clear_val(1)?,
                    self.layout.clear_val(2)?,
                    self.layout.clear_val(3)?,
                ];
                self.emit_constant_color(channels);
            }
            MetaOp::ClearDepth => self.emit_clear_depth()?,
            MetaOp::CopyMem => self.emit_copy_mem()?,
            // the remaining kinds compile to a recognizable constant fill
            // until their dedicated sequences exist
            MetaOp::Copy1d
            | MetaOp::Copy1dArray
            | MetaOp::Copy2d
            | MetaOp::Copy2dArray
            | MetaOp::Copy2dMs
            | MetaOp::Copy1dToMem
            | MetaOp::Copy1dArrayToMem
            | MetaOp::Copy2dToMem
            | MetaOp::Copy2dArrayToMem
            | MetaOp::Copy2dMsToMem
            | MetaOp::CopyMemToImg
            | MetaOp::Resolve2x
            | MetaOp::Resolve4x
            | MetaOp::Resolve8x
            | MetaOp::Resolve16x => {
                warn!("{op} has no dedicated sequence, compiling a constant fill");
                self.emit_constant_color([Reg::imm_ud(PLACEHOLDER_FILL); 4]);
            }
        }

        self.extract()
    }

    /// Derive the per-fragment pixel coordinates from the thread payload.
    ///
    /// Row 1 of the payload carries the screen-space origins of the pixel
    /// quads; the packed-nibble immediates add the intra-quad offsets.
    fn emit_compute_frag_coord(&mut self) {
        let r1 = Reg::grf_vec8(1).retype(RegType::Uw);
        self.eu.add(
            self.layout.frag_x.vec16().retype(RegType::Uw),
            r1.suboffset(4).stride(2, 4, 0),
            Reg::imm_v(0x1010_1010),
        );
        self.eu.add(
            self.layout.frag_y.vec16().retype(RegType::Uw),
            r1.suboffset(5).stride(2, 4, 0),
            Reg::imm_v(0x1100_1100),
        );
    }

    /// Write one constant value per color channel to the render target.
    fn emit_constant_color(&mut self, channels: [Reg; 4]) {
        let mrf = Reg::mrf_vec8(self.layout.base_mrf).vec16();
        let mut mrf_offset = 0;
        for channel in channels {
            self.eu.mov(mrf.offset(mrf_offset), channel);
            mrf_offset += 2;
        }
        self.eu.render_target_write(self.layout.base_mrf, mrf_offset, false);
    }

    /// Write the depth clear value through the source-depth payload slot.
    fn emit_clear_depth(&mut self) -> MetaResult<()> {
        let mrf = Reg::mrf_vec8(self.layout.base_mrf).vec16();
        // skip the four color rows; the depth value rides behind them
        let mut mrf_offset = 4 * 2;

        self.eu.mov(mrf.offset(mrf_offset), self.layout.clear_val(0)?);
        mrf_offset += 2;

        self.eu.render_target_write(self.layout.base_mrf, mrf_offset, false);
        Ok(())
    }

    /// Copy between memory buffers: fetch the texel at the fragment's linear
    /// offset and write it back out.
    fn emit_copy_mem(&mut self) -> MetaResult<()> {
        let mrf = Reg::mrf_vec8(self.layout.base_mrf).vec16();

        self.emit_compute_frag_coord();

        let mut mrf_offset = 0;
        self.eu.add(
            mrf.offset(mrf_offset),
            self.layout.frag_x.retype(RegType::Uw),
            self.layout.src_offset_x()?.retype(RegType::Uw),
        );
        mrf_offset += 2;

        self.eu
            .sample_ld(self.layout.texels[0], self.layout.base_mrf, mrf_offset, SAMPLER_RESPONSE_ROWS);

        let mut mrf_offset = 0;
        for channel in 0..4u8 {
            self.eu
                .mov(mrf.offset(mrf_offset), self.layout.texels[0].offset(channel * 2));
            mrf_offset += 2;
        }
        self.eu.render_target_write(self.layout.base_mrf, mrf_offset, false);
        Ok(())
    }

    /// Copy the finished stream into an owned buffer and attach metadata.
    fn extract(self) -> MetaResult<MetaShader> {
        let op = self.layout.op;
        let metadata = ProgramMetadata {
            first_push_constant_grf: self.layout.first_push_constant_grf as u32,
            writes_depth: op == MetaOp::ClearDepth,
            out_count: META_SHADER_OUT_COUNT,
            surface_count: META_SHADER_SURFACE_COUNT,
        };

        let session = self.session;
        let program = self.eu.program();
        let mut code = Vec::new();
        code.try_reserve_exact(program.len())
            .map_err(|_| MetaError::OutOfMemory {
                bytes: program.len(),
            })?;
        code.extend_from_slice(&program);
        session.record_program_extracted(code.len());

        Ok(MetaShader {
            op,
            code: code.into_boxed_slice(),
            metadata,
        })
    }
}
