//! Register slot model for the Gen EU register files.
//!
//! A [`Reg`] names a location an instruction operand lives in: a register
//! file, a register row, a sub-register byte offset, an element type and a
//! region (vertical stride / width / horizontal stride, all in elements).
//! Slots are plain `Copy` values produced by the layout planner and threaded
//! through emission unchanged; the combinators below build derived views
//! (retyped, row-offset, strided) without mutating the original.
//!
//! The GRF is the per-thread general register file, allocated in 32-byte
//! rows. MRF rows name the outgoing message payload window; on hardware
//! without an architectural MRF file the encoder retargets them to the high
//! GRF window. Immediates carry their payload inline.

/// Width of one register row in bytes.
pub const REG_ROW_BYTES: u32 = 32;

/// Number of addressable GRF rows per thread.
pub const GRF_ROWS: u8 = 128;

/// Number of addressable MRF rows.
pub const MRF_ROWS: u8 = 16;

/// Register files addressable by EU instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegFile {
    /// Architecture registers (null, accumulator, flags).
    Arf,
    /// General register file.
    Grf,
    /// Message register file (outgoing payload window).
    Mrf,
    /// Inline immediate.
    Imm,
}

/// Element types, with their hardware encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegType {
    /// Unsigned dword.
    Ud,
    /// Signed dword.
    D,
    /// Unsigned word.
    Uw,
    /// Signed word.
    W,
    /// Float.
    F,
    /// Packed vector of eight signed 4-bit values (immediate only).
    V,
}

impl RegType {
    /// Size of one element in bytes.
    pub const fn size(self) -> u32 {
        match self {
            RegType::Ud | RegType::D | RegType::F | RegType::V => 4,
            RegType::Uw | RegType::W => 2,
        }
    }

    /// Hardware encoding of the type field.
    pub const fn hw_encoding(self) -> u32 {
        match self {
            RegType::Ud => 0,
            RegType::D => 1,
            RegType::Uw => 2,
            RegType::W => 3,
            RegType::V => 6,
            RegType::F => 7,
        }
    }
}

/// One operand location: file, row, sub-offset, type and region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reg {
    pub file: RegFile,
    /// Register row number within the file.
    pub nr: u8,
    /// Sub-register offset within the row, in bytes.
    pub subnr: u8,
    pub ty: RegType,
    /// Vertical stride in elements (0, 1, 2, 4, 8 or 16).
    pub vstride: u8,
    /// Region width in elements (1, 2, 4, 8 or 16).
    pub width: u8,
    /// Horizontal stride in elements (0, 1, 2 or 4).
    pub hstride: u8,
    /// Payload when `file` is [`RegFile::Imm`].
    pub imm: u32,
}

impl Reg {
    /// Scalar view of one dword element of a GRF row (region ⟨0;1,0⟩).
    pub fn grf_ud(nr: u8, elem: u8) -> Self {
        assert!(nr < GRF_ROWS, "GRF row out of range");
        assert!(elem < 8, "dword element out of range");
        Self {
            file: RegFile::Grf,
            nr,
            subnr: elem * 4,
            ty: RegType::Ud,
            vstride: 0,
            width: 1,
            hstride: 0,
            imm: 0,
        }
    }

    /// SIMD8 view of a full GRF row of dwords (region ⟨8;8,1⟩).
    pub fn grf_vec8(nr: u8) -> Self {
        assert!(nr < GRF_ROWS, "GRF row out of range");
        Self {
            file: RegFile::Grf,
            nr,
            subnr: 0,
            ty: RegType::Ud,
            vstride: 8,
            width: 8,
            hstride: 1,
            imm: 0,
        }
    }

    /// SIMD8 view of an outgoing message row.
    pub fn mrf_vec8(nr: u8) -> Self {
        assert!(nr < MRF_ROWS, "MRF row out of range");
        Self {
            file: RegFile::Mrf,
            nr,
            subnr: 0,
            ty: RegType::Ud,
            vstride: 8,
            width: 8,
            hstride: 1,
            imm: 0,
        }
    }

    /// The null architecture register (discarded writes).
    pub fn null() -> Self {
        Self {
            file: RegFile::Arf,
            nr: 0,
            subnr: 0,
            ty: RegType::Ud,
            vstride: 8,
            width: 8,
            hstride: 1,
            imm: 0,
        }
    }

    /// 32-bit unsigned immediate.
    pub fn imm_ud(v: u32) -> Self {
        Self {
            file: RegFile::Imm,
            nr: 0,
            subnr: 0,
            ty: RegType::Ud,
            vstride: 0,
            width: 1,
            hstride: 0,
            imm: v,
        }
    }

    /// Packed-nibble vector immediate: eight signed 4-bit values, lowest
    /// nibble first. Replicated across the execution width by the hardware.
    pub fn imm_v(bits: u32) -> Self {
        Self {
            ty: RegType::V,
            ..Self::imm_ud(bits)
        }
    }

    /// Same location viewed with a different element type. The byte offset
    /// is preserved, not rescaled.
    pub fn retype(self, ty: RegType) -> Self {
        Self { ty, ..self }
    }

    /// Widen the region to SIMD16 (⟨16;16,1⟩).
    pub fn vec16(self) -> Self {
        self.stride(16, 16, 1)
    }

    /// Advance by whole register rows.
    pub fn offset(self, rows: u8) -> Self {
        assert!(
            self.file != RegFile::Imm,
            "immediates have no register offset"
        );
        self.with_nr(self.nr + rows)
    }

    /// Advance the sub-register offset by `elems` elements of the current type.
    pub fn suboffset(self, elems: u8) -> Self {
        let subnr = self.subnr as u32 + elems as u32 * self.ty.size();
        assert!(subnr < REG_ROW_BYTES, "sub-offset leaves the register row");
        Self {
            subnr: subnr as u8,
            ..self
        }
    }

    /// Replace the region description.
    pub fn stride(self, vstride: u8, width: u8, hstride: u8) -> Self {
        assert!(
            matches!(vstride, 0 | 1 | 2 | 4 | 8 | 16),
            "invalid vertical stride"
        );
        assert!(matches!(width, 1 | 2 | 4 | 8 | 16), "invalid region width");
        assert!(matches!(hstride, 0 | 1 | 2 | 4), "invalid horizontal stride");
        Self {
            vstride,
            width,
            hstride,
            ..self
        }
    }

    /// Execution width implied when this slot is an instruction destination.
    pub fn exec_width(self) -> u8 {
        self.width
    }

    fn with_nr(self, nr: u8) -> Self {
        Self { nr, ..self }
    }
}
