//! Target platform detection
//!
//! Helm publishes Linux builds per architecture; only the two common
//! runner architectures are supported.

use std::fmt;

use crate::error::{InstallError, Result};

/// CPU architecture as named in Helm release archives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arch {
    Amd64,
    Arm64,
}

impl Arch {
    /// Map a machine name (`uname -m` style) to a Helm architecture
    pub fn from_machine(machine: &str) -> Result<Self> {
        match machine.to_ascii_lowercase().as_str() {
            "x86_64" | "amd64" => Ok(Self::Amd64),
            "aarch64" | "arm64" => Ok(Self::Arm64),
            other => Err(InstallError::UnsupportedArch {
                arch: other.to_string(),
            }),
        }
    }

    /// Architecture of the running host
    pub fn detect() -> Result<Self> {
        Self::from_machine(std::env::consts::ARCH)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64 => "arm64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operating system and architecture pair (`linux-amd64`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    pub arch: Arch,
}

impl Platform {
    /// Only Linux builds are installed
    pub const OS: &'static str = "linux";

    pub fn linux(arch: Arch) -> Self {
        Self { arch }
    }

    /// Platform of the running host
    pub fn detect() -> Result<Self> {
        Ok(Self::linux(Arch::detect()?))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", Self::OS, self.arch)
    }
}
