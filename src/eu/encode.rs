//! Gen EU instruction word packing.
//!
//! Every EU instruction is one 128-bit word, stored as four little-endian
//! dwords. This module packs [`Reg`] operands into that wire format; it knows
//! nothing about operation catalogs or register layouts.
//!
//! Field layout (align1 mode, direct addressing, which is all the emitter
//! ever produces):
//!
//! ```text
//! dw0: opcode[6:0]  access[8]  mask[9]  dep[11:10]  qtr[13:12]
//!      thread[15:14]  pred[19:16]  predinv[20]  execsize[23:21]
//!      condmod/sfid[27:24]  accwr[28]  cmpt[29]  debug[30]  sat[31]
//! dw1: dstfile[1:0]  dsttype[4:2]  src0file[6:5]  src0type[9:7]
//!      src1file[11:10]  src1type[14:12]  dstaddr[15]  dstsub[20:16]
//!      dstnr[28:21]  dsthstride[30:29]
//! dw2: src0: sub[4:0]  nr[12:5]  abs[13]  neg[14]  addr[15]
//!      hstride[17:16]  width[20:18]  vstride[24:21]
//! dw3: src1 in the same shape as dw2, or the 32-bit immediate payload,
//!      or the send message descriptor
//! ```
//!
//! Immediate payloads always occupy dw3, so an immediate must be the last
//! source of an instruction. Send descriptors carry the function control in
//! bits [18:0], header presence in [19], response length in [24:20], message
//! length in [28:25]; end-of-thread is bit [31].
//!
//! Generations that dropped the architectural MRF file address message
//! payloads through the top of the GRF instead; [`resolve_reg`] performs that
//! retargeting so emission code can keep speaking in message rows.

use crate::core::profile::HwProfile;
use crate::core::regs::{Reg, RegFile, RegType};

/// MOV instruction opcode.
pub const OP_MOV: u8 = 0x01;
/// ADD instruction opcode.
pub const OP_ADD: u8 = 0x40;
/// SEND instruction opcode.
pub const OP_SEND: u8 = 0x31;

/// Shared-function ID of the sampler.
pub const SFID_SAMPLER: u8 = 2;
/// Shared-function ID of the render-cache data port.
pub const SFID_RENDER_CACHE: u8 = 5;

/// Sampler message type: unfiltered fetch (`ld`).
const SAMPLER_MSG_LD: u32 = 7;
/// Sampler SIMD16 execution mode.
const SAMPLER_SIMD16: u32 = 2;
/// Render-cache message type: render-target write.
const RC_MSG_RT_WRITE: u32 = 0xc;
/// Render-target write control: SIMD16, single source payload.
const RC_CTRL_SIMD16_SINGLE_SOURCE: u32 = 0;

/// First GRF row of the message window on parts without an MRF file.
pub const MRF_GRF_WINDOW: u8 = 112;

/// Quarter-control value forcing compressed execution.
const QTR_COMPRESSED: u32 = 2;

/// Hardware encoding of a register file, with the message-window retarget.
///
/// Returns the (file, row) pair to encode. MRF rows encode as the MRF file
/// where one exists and move to the GRF window at [`MRF_GRF_WINDOW`]
/// otherwise.
pub fn resolve_reg(profile: &HwProfile, reg: Reg) -> (u32, u32) {
    match reg.file {
        RegFile::Arf => (0, reg.nr as u32),
        RegFile::Grf => (1, reg.nr as u32),
        RegFile::Mrf if profile.has_mrf_file() => (2, reg.nr as u32),
        RegFile::Mrf => (1, (MRF_GRF_WINDOW + reg.nr) as u32),
        RegFile::Imm => (3, 0),
    }
}

fn hstride_encoding(elems: u8) -> u32 {
    match elems {
        0 => 0,
        1 => 1,
        2 => 2,
        4 => 3,
        _ => unreachable!("invalid horizontal stride"),
    }
}

fn vstride_encoding(elems: u8) -> u32 {
    match elems {
        0 => 0,
        1 => 1,
        2 => 2,
        4 => 3,
        8 => 4,
        16 => 5,
        _ => unreachable!("invalid vertical stride"),
    }
}

fn width_encoding(elems: u8) -> u32 {
    match elems {
        1 => 0,
        2 => 1,
        4 => 2,
        8 => 3,
        16 => 4,
        _ => unreachable!("invalid region width"),
    }
}

/// Execution size shares the width encoding (log2 of the channel count).
fn exec_size_encoding(width: u8) -> u32 {
    width_encoding(width)
}

/// SIMD16 must run compressed on gen 6; gen 7 executes it natively.
fn quarter_control(profile: &HwProfile, exec_width: u8) -> u32 {
    if profile.gen < 7 && exec_width == 16 {
        QTR_COMPRESSED
    } else {
        0
    }
}

/// Pack the location and region of a direct register source.
fn pack_src_region(profile: &HwProfile, src: Reg) -> u32 {
    let (_, nr) = resolve_reg(profile, src);
    (src.subnr as u32)
        | (nr << 5)
        | (hstride_encoding(src.hstride) << 16)
        | (width_encoding(src.width) << 18)
        | (vstride_encoding(src.vstride) << 21)
}

/// Encode a one- or two-source ALU instruction.
///
/// The destination region's width sets the execution size. An immediate
/// operand, when present, must be the last source; its payload fills dw3.
pub fn encode_alu(
    profile: &HwProfile,
    opcode: u8,
    dst: Reg,
    src0: Reg,
    src1: Option<Reg>,
) -> [u32; 4] {
    assert!(dst.file != RegFile::Imm, "immediate destination");
    assert!(dst.hstride >= 1, "destination regions need a horizontal stride");
    assert!(
        src0.file != RegFile::Imm || src1.is_none(),
        "an immediate must be the last source"
    );

    let dw0 = (opcode as u32)
        | (quarter_control(profile, dst.exec_width()) << 12)
        | (exec_size_encoding(dst.exec_width()) << 21);

    let (dst_file, dst_nr) = resolve_reg(profile, dst);
    let (src0_file, _) = resolve_reg(profile, src0);
    let mut dw1 = dst_file
        | (dst.ty.hw_encoding() << 2)
        | (src0_file << 5)
        | (src0.ty.hw_encoding() << 7)
        | ((dst.subnr as u32) << 16)
        | (dst_nr << 21)
        | (hstride_encoding(dst.hstride) << 29);

    let dw2 = if src0.file == RegFile::Imm {
        0
    } else {
        pack_src_region(profile, src0)
    };

    let dw3 = match src1 {
        Some(src1) => {
            let (src1_file, _) = resolve_reg(profile, src1);
            dw1 |= (src1_file << 10) | (src1.ty.hw_encoding() << 12);
            if src1.file == RegFile::Imm {
                src1.imm
            } else {
                pack_src_region(profile, src1)
            }
        }
        None if src0.file == RegFile::Imm => src0.imm,
        None => 0,
    };

    [dw0, dw1, dw2, dw3]
}

/// Encode a SEND to a shared function.
///
/// `payload` names the first message row; the descriptor goes in dw3 with
/// the end-of-thread bit on top when `eot` is set.
pub fn encode_send(
    profile: &HwProfile,
    sfid: u8,
    dst: Reg,
    payload: Reg,
    desc: u32,
    eot: bool,
) -> [u32; 4] {
    assert!(
        payload.file == RegFile::Mrf,
        "send payloads start at a message row"
    );

    let dw0 = (OP_SEND as u32)
        | (quarter_control(profile, dst.exec_width()) << 12)
        | (exec_size_encoding(dst.exec_width()) << 21)
        | ((sfid as u32) << 24);

    let (dst_file, dst_nr) = resolve_reg(profile, dst);
    let (payload_file, _) = resolve_reg(profile, payload);
    // Descriptor rides in the src1 slot as an unsigned-dword immediate.
    let imm_src1 = (3 << 10) | (RegType::Ud.hw_encoding() << 12);
    let dw1 = dst_file
        | (dst.ty.hw_encoding() << 2)
        | (payload_file << 5)
        | (payload.ty.hw_encoding() << 7)
        | imm_src1
        | ((dst.subnr as u32) << 16)
        | (dst_nr << 21)
        | (hstride_encoding(dst.hstride.max(1)) << 29);

    let dw2 = pack_src_region(profile, payload);
    let dw3 = desc | ((eot as u32) << 31);

    [dw0, dw1, dw2, dw3]
}

/// Message descriptor for a SIMD16 unfiltered sampler fetch.
pub fn sampler_ld_desc(msg_len: u8, response_len: u8, surface: u8) -> u32 {
    (surface as u32)
        | (SAMPLER_MSG_LD << 12)
        | (SAMPLER_SIMD16 << 17)
        | ((response_len as u32) << 20)
        | ((msg_len as u32) << 25)
}

/// Message descriptor for a SIMD16 single-source render-target write.
///
/// Every meta program writes exactly one render target, so the last-RT
/// select is always on.
pub fn rt_write_desc(msg_len: u8, use_header: bool, surface: u8) -> u32 {
    (surface as u32)
        | (RC_CTRL_SIMD16_SINGLE_SOURCE << 8)
        | (1 << 12)
        | (RC_MSG_RT_WRITE << 14)
        | ((use_header as u32) << 19)
        | ((msg_len as u32) << 25)
}
