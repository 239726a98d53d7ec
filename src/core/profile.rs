//! Throwaway hardware profile built once per compilation.
//!
//! The caller identifies the device with a raw [`GpuDescriptor`]; profile
//! construction turns that into the generation number, Haswell flag, GT
//! slice level and fixed feature set the emission pipeline reads. An
//! unrecognized generation is a defect in the caller's device detection and
//! fails construction outright, so nothing downstream ever sees a profile
//! for hardware the catalog was not written for.

use crate::core::error::{MetaError, MetaResult};

/// Sandy Bridge generation code (hundredths).
pub const GEN6: u32 = 600;
/// Ivy Bridge generation code.
pub const GEN7: u32 = 700;
/// Haswell generation code.
pub const GEN75: u32 = 750;

/// Raw device identification handed in by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpuDescriptor {
    /// Device generation in hundredths: [`GEN6`], [`GEN7`] or [`GEN75`].
    pub gen: u32,
    /// GT slice configuration level.
    pub gt: u8,
}

impl GpuDescriptor {
    pub const fn new(gen: u32, gt: u8) -> Self {
        Self { gen, gt }
    }
}

/// Fixed feature flags the profile hands down to code generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HwFeatures {
    /// Last-level cache shared between CPU and GPU.
    pub has_llc: bool,
    /// PLN plane-evaluation instruction available.
    pub has_pln: bool,
    /// COMPR4 compressed four-register message writes available.
    pub has_compr4: bool,
    /// Negative RHW values misbehave on this part.
    pub has_negative_rhw_bug: bool,
    /// Centroid interpolation needs the unlit-pixel workaround.
    pub needs_unlit_centroid_workaround: bool,
}

/// Hardware context profile for one compilation.
///
/// Constructed from scratch for every compile call and dropped on return;
/// nothing in the pipeline caches a profile across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HwProfile {
    /// Major hardware generation (6 or 7).
    pub gen: u8,
    /// Generation 7.5 parts report gen 7 with this flag set.
    pub is_haswell: bool,
    /// GT slice configuration level.
    pub gt: u8,
    pub features: HwFeatures,
}

impl HwProfile {
    /// Build the profile for a device, validating its generation.
    pub fn for_gpu(gpu: &GpuDescriptor) -> MetaResult<Self> {
        let (gen, is_haswell) = match gpu.gen {
            GEN75 => (7, true),
            GEN7 => (7, false),
            GEN6 => (6, false),
            other => {
                log::error!("device generation {other} is not supported");
                return Err(MetaError::UnsupportedGeneration { gen: other });
            }
        };

        Ok(Self {
            gen,
            is_haswell,
            gt: gpu.gt,
            features: HwFeatures {
                has_llc: true,
                has_pln: true,
                has_compr4: true,
                has_negative_rhw_bug: false,
                needs_unlit_centroid_workaround: true,
            },
        })
    }

    /// Whether this generation still has an architectural MRF file.
    /// Later parts address message payloads through the high GRF window.
    pub fn has_mrf_file(&self) -> bool {
        self.gen < 7
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haswell_reports_gen7_with_flag() {
        let p = HwProfile::for_gpu(&GpuDescriptor::new(GEN75, 3)).unwrap();
        assert_eq!(p.gen, 7);
        assert!(p.is_haswell);
        assert_eq!(p.gt, 3);
        assert!(!p.has_mrf_file());
    }

    #[test]
    fn gen6_keeps_mrf_file() {
        let p = HwProfile::for_gpu(&GpuDescriptor::new(GEN6, 1)).unwrap();
        assert_eq!(p.gen, 6);
        assert!(!p.is_haswell);
        assert!(p.has_mrf_file());
    }

    #[test]
    fn unrecognized_generation_is_fatal() {
        let err = HwProfile::for_gpu(&GpuDescriptor::new(800, 2)).unwrap_err();
        assert_eq!(err, MetaError::UnsupportedGeneration { gen: 800 });
    }

    #[test]
    fn feature_block_is_fixed() {
        let p = HwProfile::for_gpu(&GpuDescriptor::new(GEN7, 2)).unwrap();
        assert!(p.features.has_llc);
        assert!(p.features.has_pln);
        assert!(p.features.has_compr4);
        assert!(!p.features.has_negative_rhw_bug);
        assert!(p.features.needs_unlit_centroid_workaround);
    }
}
