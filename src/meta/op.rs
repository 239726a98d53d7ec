//! The fixed catalog of meta operations.
//!
//! Every program this crate can generate serves exactly one of these
//! operations. The catalog is closed: callers pick a variant, so there is no
//! such thing as an unrecognized operation at compile time.

use std::fmt;
use std::str::FromStr;

/// One meta operation, i.e. one generatable fragment program.
///
/// The copies split by source dimensionality and direction: the plain copies
/// sample an image and write it to a render target, the `*ToMem` variants
/// land the result in a memory buffer, and [`MetaOp::CopyMemToImg`] goes the
/// other way. Resolves fold the named number of samples per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaOp {
    ClearColor,
    ClearDepth,
    CopyMem,
    Copy1d,
    Copy1dArray,
    Copy2d,
    Copy2dArray,
    Copy2dMs,
    Copy1dToMem,
    Copy1dArrayToMem,
    Copy2dToMem,
    Copy2dArrayToMem,
    Copy2dMsToMem,
    CopyMemToImg,
    Resolve2x,
    Resolve4x,
    Resolve8x,
    Resolve16x,
}

impl MetaOp {
    /// Every operation in the catalog, in declaration order.
    pub const ALL: [MetaOp; 18] = [
        MetaOp::ClearColor,
        MetaOp::ClearDepth,
        MetaOp::CopyMem,
        MetaOp::Copy1d,
        MetaOp::Copy1dArray,
        MetaOp::Copy2d,
        MetaOp::Copy2dArray,
        MetaOp::Copy2dMs,
        MetaOp::Copy1dToMem,
        MetaOp::Copy1dArrayToMem,
        MetaOp::Copy2dToMem,
        MetaOp::Copy2dArrayToMem,
        MetaOp::Copy2dMsToMem,
        MetaOp::CopyMemToImg,
        MetaOp::Resolve2x,
        MetaOp::Resolve4x,
        MetaOp::Resolve8x,
        MetaOp::Resolve16x,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MetaOp::ClearColor => "clear-color",
            MetaOp::ClearDepth => "clear-depth",
            MetaOp::CopyMem => "copy-mem",
            MetaOp::Copy1d => "copy-1d",
            MetaOp::Copy1dArray => "copy-1d-array",
            MetaOp::Copy2d => "copy-2d",
            MetaOp::Copy2dArray => "copy-2d-array",
            MetaOp::Copy2dMs => "copy-2d-ms",
            MetaOp::Copy1dToMem => "copy-1d-to-mem",
            MetaOp::Copy1dArrayToMem => "copy-1d-array-to-mem",
            MetaOp::Copy2dToMem => "copy-2d-to-mem",
            MetaOp::Copy2dArrayToMem => "copy-2d-array-to-mem",
            MetaOp::Copy2dMsToMem => "copy-2d-ms-to-mem",
            MetaOp::CopyMemToImg => "copy-mem-to-img",
            MetaOp::Resolve2x => "resolve-2x",
            MetaOp::Resolve4x => "resolve-4x",
            MetaOp::Resolve8x => "resolve-8x",
            MetaOp::Resolve16x => "resolve-16x",
        }
    }

    /// Clears write constant data and fetch nothing.
    pub fn is_clear(&self) -> bool {
        matches!(self, MetaOp::ClearColor | MetaOp::ClearDepth)
    }

    /// Copies that sample their source through the texture unit.
    pub fn is_sampling_copy(&self) -> bool {
        matches!(
            self,
            MetaOp::CopyMem
                | MetaOp::Copy1d
                | MetaOp::Copy1dArray
                | MetaOp::Copy2d
                | MetaOp::Copy2dArray
                | MetaOp::Copy2dMs
        )
    }

    /// Copies whose destination is a memory buffer rather than an image.
    pub fn is_copy_to_mem(&self) -> bool {
        matches!(
            self,
            MetaOp::Copy1dToMem
                | MetaOp::Copy1dArrayToMem
                | MetaOp::Copy2dToMem
                | MetaOp::Copy2dArrayToMem
                | MetaOp::Copy2dMsToMem
        )
    }

    pub fn is_resolve(&self) -> bool {
        matches!(
            self,
            MetaOp::Resolve2x | MetaOp::Resolve4x | MetaOp::Resolve8x | MetaOp::Resolve16x
        )
    }

    /// Whether this operation has its own emission sequence. The remaining
    /// kinds currently compile to the constant-color fill sequence.
    pub fn has_dedicated_sequence(&self) -> bool {
        matches!(
            self,
            MetaOp::ClearColor | MetaOp::ClearDepth | MetaOp::CopyMem
        )
    }
}

impl fmt::Display for MetaOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for parsing an operation name that is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOpError {
    name: String,
}

impl fmt::Display for UnknownOpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown meta operation `{}`", self.name)
    }
}

impl std::error::Error for UnknownOpError {}

impl FromStr for MetaOp {
    type Err = UnknownOpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.name() == s)
            .ok_or_else(|| UnknownOpError { name: s.to_string() })
    }
}
