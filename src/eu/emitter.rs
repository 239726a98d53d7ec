// This module builds EU instruction streams. It offers one method per
// instruction the meta programs use (MOV, ADD, sampler fetch, render-target
// write), packs each call into its 128-bit word through eu::encode, and keeps
// the finished stream in the session arena until the program bytes are
// extracted. Hardware-generation differences (MRF retargeting, compressed
// SIMD16) are resolved here via the profile so callers never branch on gen.

//! Instruction stream emitter.

use bumpalo::collections::Vec as BumpVec;
use log::trace;

use crate::core::profile::HwProfile;
use crate::core::regs::{Reg, RegType};
use crate::core::session::CompileSession;
use crate::eu::encode::{
    encode_alu, encode_send, rt_write_desc, sampler_ld_desc, OP_ADD, OP_MOV, SFID_RENDER_CACHE,
    SFID_SAMPLER,
};

/// Surface index the sampler fetches from.
pub const TEXTURE_SURFACE: u8 = 0;
/// Surface index the data port writes to.
pub const RENDER_TARGET_SURFACE: u8 = 1;

/// Instruction selector, used for stats and stream inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Mov,
    Add,
    SampleLd,
    RenderTargetWrite,
}

impl Mnemonic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mnemonic::Mov => "mov",
            Mnemonic::Add => "add",
            Mnemonic::SampleLd => "sample_ld",
            Mnemonic::RenderTargetWrite => "rt_write",
        }
    }
}

/// One emitted instruction: its selector plus the four packed dwords.
#[derive(Debug, Clone, Copy)]
pub struct Inst {
    pub mnemonic: Mnemonic,
    pub words: [u32; 4],
}

/// Emits EU instructions into an arena-backed stream.
pub struct EuEmitter<'arena> {
    session: &'arena CompileSession<'arena>,
    profile: HwProfile,
    insts: BumpVec<'arena, Inst>,
}

impl<'arena> EuEmitter<'arena> {
    pub fn new(session: &'arena CompileSession<'arena>, profile: HwProfile) -> Self {
        Self {
            session,
            profile,
            insts: BumpVec::new_in(session.arena()),
        }
    }

    pub fn profile(&self) -> &HwProfile {
        &self.profile
    }

    fn push(&mut self, mnemonic: Mnemonic, words: [u32; 4]) {
        trace!(
            "emit {:<9} {:08x} {:08x} {:08x} {:08x}",
            mnemonic.as_str(),
            words[0],
            words[1],
            words[2],
            words[3]
        );
        self.session.record_instruction(mnemonic.as_str());
        self.insts.push(Inst { mnemonic, words });
    }

    /// MOV `dst, src`. The destination region sets the execution size.
    pub fn mov(&mut self, dst: Reg, src: Reg) {
        let words = encode_alu(&self.profile, OP_MOV, dst, src, None);
        self.push(Mnemonic::Mov, words);
    }

    /// ADD `dst, src0, src1`. An immediate operand goes in `src1`.
    pub fn add(&mut self, dst: Reg, src0: Reg, src1: Reg) {
        let words = encode_alu(&self.profile, OP_ADD, dst, src0, Some(src1));
        self.push(Mnemonic::Add, words);
    }

    /// SIMD16 unfiltered sampler fetch from [`TEXTURE_SURFACE`].
    ///
    /// Reads `msg_len` message rows starting at `base_mrf` and lands
    /// `response_len` rows of texel data at `dst`.
    pub fn sample_ld(&mut self, dst: Reg, base_mrf: u8, msg_len: u8, response_len: u8) {
        let payload = Reg::mrf_vec8(base_mrf).vec16();
        let desc = sampler_ld_desc(msg_len, response_len, TEXTURE_SURFACE);
        let words = encode_send(&self.profile, SFID_SAMPLER, dst, payload, desc, false);
        self.push(Mnemonic::SampleLd, words);
    }

    /// SIMD16 render-target write to [`RENDER_TARGET_SURFACE`].
    ///
    /// Sends `msg_len` payload rows starting at `base_mrf`. This is always
    /// the final instruction of a meta program, so it carries end-of-thread.
    pub fn render_target_write(&mut self, base_mrf: u8, msg_len: u8, use_header: bool) {
        let payload = Reg::mrf_vec8(base_mrf).vec16();
        let dst = Reg::null().vec16().retype(RegType::Uw);
        let desc = rt_write_desc(msg_len, use_header, RENDER_TARGET_SURFACE);
        let words = encode_send(&self.profile, SFID_RENDER_CACHE, dst, payload, desc, true);
        self.push(Mnemonic::RenderTargetWrite, words);
    }

    /// The instructions emitted so far, in program order.
    pub fn instructions(&self) -> &[Inst] {
        &self.insts
    }

    /// Render the stream to machine-code bytes, little-endian dword by dword.
    pub fn program(self) -> BumpVec<'arena, u8> {
        let mut bytes = BumpVec::with_capacity_in(self.insts.len() * 16, self.session.arena());
        for inst in &self.insts {
            for word in inst.words {
                bytes.extend_from_slice(&word.to_le_bytes());
            }
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::{GpuDescriptor, GEN75};
    use bumpalo::Bump;

    fn emitter<'a>(session: &'a CompileSession<'a>) -> EuEmitter<'a> {
        let profile = HwProfile::for_gpu(&GpuDescriptor::new(GEN75, 1)).unwrap();
        EuEmitter::new(session, profile)
    }

    #[test]
    fn stream_renders_sixteen_bytes_per_instruction() {
        let bump = Bump::new();
        let session = CompileSession::new(&bump);
        let mut eu = emitter(&session);

        eu.mov(Reg::mrf_vec8(2).vec16(), Reg::imm_ud(0));
        eu.render_target_write(2, 8, false);

        assert_eq!(eu.instructions().len(), 2);
        let bytes = eu.program();
        assert_eq!(bytes.len(), 32);
    }

    #[test]
    fn emission_is_recorded_in_session_stats() {
        let bump = Bump::new();
        let session = CompileSession::new(&bump);
        let mut eu = emitter(&session);

        eu.add(
            Reg::grf_vec8(3).vec16().retype(RegType::Uw),
            Reg::grf_vec8(1).retype(RegType::Uw).suboffset(4).stride(2, 4, 0),
            Reg::imm_v(0x1010_1010),
        );
        eu.add(
            Reg::grf_vec8(5).vec16().retype(RegType::Uw),
            Reg::grf_vec8(1).retype(RegType::Uw).suboffset(5).stride(2, 4, 0),
            Reg::imm_v(0x1100_1100),
        );

        let stats = session.stats();
        assert_eq!(stats.instructions_emitted, 2);
        assert_eq!(stats.instruction_counts.get("add"), Some(&2));
    }

    #[test]
    fn render_target_write_terminates_the_thread() {
        let bump = Bump::new();
        let session = CompileSession::new(&bump);
        let mut eu = emitter(&session);

        eu.render_target_write(2, 8, false);

        let inst = eu.instructions()[0];
        assert_eq!(inst.mnemonic, Mnemonic::RenderTargetWrite);
        assert_ne!(inst.words[3] & (1 << 31), 0);
    }

    #[test]
    fn sampler_fetch_reads_the_texture_surface() {
        let bump = Bump::new();
        let session = CompileSession::new(&bump);
        let mut eu = emitter(&session);

        let texels = Reg::grf_vec8(7).vec16().retype(RegType::Uw);
        eu.sample_ld(texels, 2, 2, 8);

        let inst = eu.instructions()[0];
        assert_eq!(inst.words[3] & 0xff, TEXTURE_SURFACE as u32);
        assert_eq!(inst.words[3] & (1 << 31), 0);
    }
}
