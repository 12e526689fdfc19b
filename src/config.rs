// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::str::FromStr;

use crate::util::check_identifier;
use crate::{FabricError, Result};

/// Byte ordering handed to every resizer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Endian {
    #[default]
    Big,
    Little,
}

impl Endian {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endian::Big => "big",
            Endian::Little => "little",
        }
    }
}

impl FromStr for Endian {
    type Err = FabricError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "big" => Ok(Endian::Big),
            "little" => Ok(Endian::Little),
            other => Err(FabricError::UnknownEndian(other.to_string())),
        }
    }
}

impl fmt::Display for Endian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Global settings of one synthesis run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FabricConfig {
    /// Name of the generated fabric module; also the root of the wrapper
    /// instance name.
    pub module_name: String,
    pub endian: Endian,
}

impl Default for FabricConfig {
    fn default() -> Self {
        FabricConfig {
            module_name: "wb_intercon".to_string(),
            endian: Endian::default(),
        }
    }
}

impl FabricConfig {
    /// Creates a configuration from the raw strings of a configuration file.
    pub fn new(module_name: impl AsRef<str>, endian: impl AsRef<str>) -> Result<Self> {
        let module_name = module_name.as_ref();
        check_identifier("module", module_name)?;
        Ok(FabricConfig {
            module_name: module_name.to_string(),
            endian: endian.as_ref().parse()?,
        })
    }

    /// Same as [`FabricConfig::new`] with the default module name.
    pub fn with_endian(endian: impl AsRef<str>) -> Result<Self> {
        FabricConfig::new(FabricConfig::default().module_name, endian)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        check_identifier("module", &self.module_name)
    }
}
