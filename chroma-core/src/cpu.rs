//! Runtime CPU capability probing.
//!
//! The probe produces a [`CpuFeatures`] record describing the host
//! architecture and its best available vector extension. The record is
//! consumed only by NTT backend selection; backend semantics are identical
//! regardless of what the probe reports.

/// Supported CPU architectures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CpuArchitecture {
    /// Unknown or unsupported architecture.
    #[default]
    Unknown,
    /// x86-64 (Intel/AMD).
    X86_64,
    /// ARM64 (AArch64).
    Arm64,
    /// RISC-V 64-bit.
    Riscv64,
    /// PowerPC 64-bit.
    Ppc64,
}

/// Maximum SIMD capability level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum SimdLevel {
    /// No vector extension available; scalar only.
    #[default]
    None,
    /// 128-bit SIMD (SSE-class).
    Simd128,
    /// 256-bit SIMD (AVX2-class).
    Simd256,
    /// 512-bit SIMD (AVX-512-class).
    Simd512,
    /// ARM NEON.
    Neon,
    /// RISC-V vector extension.
    Rvv,
    /// PowerPC VSX.
    Vsx,
}

/// Detected CPU capability record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuFeatures {
    /// Detected architecture.
    pub architecture: CpuArchitecture,
    /// Best available SIMD level.
    pub max_simd: SimdLevel,
    /// AVX2 available (x86-64 only).
    pub has_avx2: bool,
    /// AVX-512 foundation instructions available (x86-64 only).
    pub has_avx512f: bool,
    /// NEON available (always true on AArch64).
    pub has_neon: bool,
    /// RISC-V vector extension available.
    pub has_rvv: bool,
    /// PowerPC VSX available.
    pub has_vsx: bool,
}

impl CpuFeatures {
    /// Probe the current host.
    ///
    /// Thread-safe and cheap enough to call repeatedly; callers normally
    /// probe once at engine construction.
    pub fn detect() -> Self {
        #[cfg(target_arch = "x86_64")]
        {
            Self::detect_x86()
        }
        #[cfg(target_arch = "aarch64")]
        {
            Self::detect_arm()
        }
        #[cfg(target_arch = "riscv64")]
        {
            Self {
                architecture: CpuArchitecture::Riscv64,
                ..Self::default()
            }
        }
        #[cfg(target_arch = "powerpc64")]
        {
            Self {
                architecture: CpuArchitecture::Ppc64,
                ..Self::default()
            }
        }
        #[cfg(not(any(
            target_arch = "x86_64",
            target_arch = "aarch64",
            target_arch = "riscv64",
            target_arch = "powerpc64"
        )))]
        {
            Self::default()
        }
    }

    /// A record reporting no capabilities; forces the scalar backend.
    ///
    /// Intended for tests and differential comparison of backends.
    pub const fn scalar_only() -> Self {
        Self {
            architecture: CpuArchitecture::Unknown,
            max_simd: SimdLevel::None,
            has_avx2: false,
            has_avx512f: false,
            has_neon: false,
            has_rvv: false,
            has_vsx: false,
        }
    }

    #[cfg(target_arch = "x86_64")]
    fn detect_x86() -> Self {
        let mut features = Self {
            architecture: CpuArchitecture::X86_64,
            max_simd: SimdLevel::Simd128,
            ..Self::default()
        };

        #[cfg(feature = "std")]
        {
            features.has_avx2 = std::arch::is_x86_feature_detected!("avx2");
            features.has_avx512f = std::arch::is_x86_feature_detected!("avx512f");
        }
        #[cfg(not(feature = "std"))]
        {
            features.has_avx2 = cfg!(target_feature = "avx2");
            features.has_avx512f = cfg!(target_feature = "avx512f");
        }

        if features.has_avx512f {
            features.max_simd = SimdLevel::Simd512;
        } else if features.has_avx2 {
            features.max_simd = SimdLevel::Simd256;
        }
        features
    }

    #[cfg(target_arch = "aarch64")]
    fn detect_arm() -> Self {
        // NEON is architecturally guaranteed on AArch64.
        Self {
            architecture: CpuArchitecture::Arm64,
            max_simd: SimdLevel::Neon,
            has_neon: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_is_consistent() {
        let a = CpuFeatures::detect();
        let b = CpuFeatures::detect();
        assert_eq!(a, b, "probe should be stable across calls");
    }

    #[test]
    fn test_scalar_only_reports_nothing() {
        let f = CpuFeatures::scalar_only();
        assert_eq!(f.max_simd, SimdLevel::None);
        assert!(!f.has_avx2 && !f.has_neon && !f.has_rvv && !f.has_vsx);
    }

    #[cfg(target_arch = "x86_64")]
    #[test]
    fn test_x86_architecture_tag() {
        assert_eq!(CpuFeatures::detect().architecture, CpuArchitecture::X86_64);
    }

    #[cfg(target_arch = "aarch64")]
    #[test]
    fn test_arm_has_neon() {
        let f = CpuFeatures::detect();
        assert_eq!(f.architecture, CpuArchitecture::Arm64);
        assert!(f.has_neon);
    }
}
