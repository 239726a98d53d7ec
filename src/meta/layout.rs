//! Register layout planning.
//!
//! Before any instruction is emitted the compiler fixes where every input
//! and working value of an operation lives in the register file. The plan is
//! a pure function of the operation kind and the base row: push-constant
//! operands land in the base row itself, followed by the fragment coordinate
//! vectors, the texel staging area and two scratch rows. Operands an
//! operation does not use are left unbound, and reading one reports
//! [`MetaError::UnboundOperand`] instead of handing out a stale register.

use std::ops::Range;

use crate::core::error::{MetaError, MetaResult};
use crate::core::regs::{Reg, REG_ROW_BYTES};
use crate::meta::op::MetaOp;

/// First message row used for payloads; m0 and m1 stay free for headers.
const BASE_MRF: u8 = 2;

const CLEAR_VAL_NAMES: [&str; 4] = ["clear_val0", "clear_val1", "clear_val2", "clear_val3"];

/// Push-constant operand bindings for one operation.
///
/// Each slot is a scalar dword in the push-constant row; `None` means the
/// operation does not take that operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OperandMap {
    pub clear_vals: [Option<Reg>; 4],
    pub src_offset_x: Option<Reg>,
    pub src_offset_y: Option<Reg>,
    pub src_layer: Option<Reg>,
    pub src_lod: Option<Reg>,
    pub dst_mem_offset: Option<Reg>,
    pub dst_extent_width: Option<Reg>,
}

impl OperandMap {
    /// All bound operands with their names, in push-constant order.
    pub fn bound(&self) -> Vec<(&'static str, Reg)> {
        let mut out = Vec::new();
        for (name, slot) in CLEAR_VAL_NAMES.iter().zip(self.clear_vals) {
            if let Some(reg) = slot {
                out.push((*name, reg));
            }
        }
        let scalars = [
            ("src_offset_x", self.src_offset_x),
            ("src_offset_y", self.src_offset_y),
            ("src_layer", self.src_layer),
            ("src_lod", self.src_lod),
            ("dst_mem_offset", self.dst_mem_offset),
            ("dst_extent_width", self.dst_extent_width),
        ];
        for (name, slot) in scalars {
            if let Some(reg) = slot {
                out.push((name, reg));
            }
        }
        out
    }

    pub fn bound_count(&self) -> usize {
        self.bound().len()
    }
}

/// The complete register plan for one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterLayout {
    pub op: MetaOp,
    pub operands: OperandMap,
    /// Computed pixel X coordinates, one word per fragment.
    pub frag_x: Reg,
    /// Computed pixel Y coordinates, one word per fragment.
    pub frag_y: Reg,
    /// SIMD16 staging slots for sampler responses.
    pub texels: [Reg; 4],
    pub tmp1: Reg,
    pub tmp2: Reg,
    /// First message row available for send payloads.
    pub base_mrf: u8,
    /// GRF row the push-constant buffer is loaded into.
    pub first_push_constant_grf: u8,
    /// One past the last GRF row the plan claims.
    pub next_free_grf: u8,
}

impl RegisterLayout {
    /// Plan the register file for `op`, claiming rows upward from `base_grf`.
    ///
    /// `base_grf` is the first row past the dispatched thread payload and
    /// comes back out as [`first_push_constant_grf`]. The same operation and
    /// base always yield the same plan; nothing here depends on the hardware
    /// generation or any runtime state.
    ///
    /// [`first_push_constant_grf`]: RegisterLayout::first_push_constant_grf
    pub fn plan(op: MetaOp, base_grf: u8) -> Self {
        let mut next = base_grf;

        let pcb_row = next;
        next += 1;
        let scalar = |elem: u8| Reg::grf_ud(pcb_row, elem);

        let mut operands = OperandMap::default();
        if op.is_clear() {
            for (channel, slot) in operands.clear_vals.iter_mut().enumerate() {
                *slot = Some(scalar(channel as u8));
            }
        } else {
            operands.src_offset_x = Some(scalar(0));
            operands.src_offset_y = Some(scalar(1));
            if op.is_sampling_copy() {
                operands.src_layer = Some(scalar(2));
                operands.src_lod = Some(scalar(3));
            } else if op.is_copy_to_mem() {
                operands.src_layer = Some(scalar(2));
                operands.src_lod = Some(scalar(3));
                operands.dst_mem_offset = Some(scalar(4));
                operands.dst_extent_width = Some(scalar(5));
            } else if op == MetaOp::CopyMemToImg {
                operands.dst_extent_width = Some(scalar(2));
            }
            // resolves take only the source offsets
        }

        let mut claim_rows = |rows: u8| {
            let row = next;
            next += rows;
            row
        };

        let frag_x = Reg::grf_vec8(claim_rows(2));
        let frag_y = Reg::grf_vec8(claim_rows(2));
        // a SIMD16 four-channel sampler response fills eight rows per slot
        let texels = [
            Reg::grf_vec8(claim_rows(8)).vec16(),
            Reg::grf_vec8(claim_rows(8)).vec16(),
            Reg::grf_vec8(claim_rows(8)).vec16(),
            Reg::grf_vec8(claim_rows(8)).vec16(),
        ];
        let tmp1 = Reg::grf_vec8(claim_rows(2));
        let tmp2 = Reg::grf_vec8(claim_rows(2));

        RegisterLayout {
            op,
            operands,
            frag_x,
            frag_y,
            texels,
            tmp1,
            tmp2,
            base_mrf: BASE_MRF,
            first_push_constant_grf: pcb_row,
            next_free_grf: next,
        }
    }

    fn require(&self, slot: Option<Reg>, operand: &'static str) -> MetaResult<Reg> {
        slot.ok_or(MetaError::UnboundOperand {
            operand,
            op: self.op,
        })
    }

    /// Clear value for one color channel.
    pub fn clear_val(&self, channel: usize) -> MetaResult<Reg> {
        self.require(self.operands.clear_vals[channel], CLEAR_VAL_NAMES[channel])
    }

    pub fn src_offset_x(&self) -> MetaResult<Reg> {
        self.require(self.operands.src_offset_x, "src_offset_x")
    }

    pub fn src_offset_y(&self) -> MetaResult<Reg> {
        self.require(self.operands.src_offset_y, "src_offset_y")
    }

    pub fn src_layer(&self) -> MetaResult<Reg> {
        self.require(self.operands.src_layer, "src_layer")
    }

    pub fn src_lod(&self) -> MetaResult<Reg> {
        self.require(self.operands.src_lod, "src_lod")
    }

    pub fn dst_mem_offset(&self) -> MetaResult<Reg> {
        self.require(self.operands.dst_mem_offset, "dst_mem_offset")
    }

    pub fn dst_extent_width(&self) -> MetaResult<Reg> {
        self.require(self.operands.dst_extent_width, "dst_extent_width")
    }

    /// Byte footprint of every value the plan places, as GRF byte ranges.
    ///
    /// Covers the bound operands and the working registers. Useful for
    /// checking that no two values alias.
    pub fn footprints(&self) -> Vec<(&'static str, Range<usize>)> {
        fn span(reg: Reg, bytes: usize) -> Range<usize> {
            let start = (reg.nr as usize) * (REG_ROW_BYTES as usize) + reg.subnr as usize;
            start..start + bytes
        }

        let row = REG_ROW_BYTES as usize;
        let mut out: Vec<(&'static str, Range<usize>)> = self
            .operands
            .bound()
            .into_iter()
            .map(|(name, reg)| (name, span(reg, 4)))
            .collect();

        out.push(("frag_x", span(self.frag_x, 2 * row)));
        out.push(("frag_y", span(self.frag_y, 2 * row)));
        let texel_names = ["texel0", "texel1", "texel2", "texel3"];
        for (name, reg) in texel_names.iter().zip(self.texels) {
            out.push((name, span(reg, 8 * row)));
        }
        out.push(("tmp1", span(self.tmp1, 2 * row)));
        out.push(("tmp2", span(self.tmp2, 2 * row)));
        out
    }
}
