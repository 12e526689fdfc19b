// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use itertools::Itertools;

use crate::{Decode, Result, Topology};

/// A configuration that synthesizes fine but probably isn't what was meant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    /// A host with no devices.
    DeadHost { host: String },
    /// A device no host can reach.
    UnreachableDevice { device: String },
    /// Two devices of one host whose regions share addresses; the first in the
    /// host's list wins.
    OverlappingRegions {
        host: String,
        first: String,
        second: String,
    },
    /// An offset with bits set below the region size.
    UnalignedOffset {
        device: String,
        offset: u32,
        size: u64,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DeadHost { host } => {
                write!(f, "unreachable host `{host}`: no devices connected")
            }
            Warning::UnreachableDevice { device } => {
                write!(f, "unreachable device `{device}`: no hosts connected")
            }
            Warning::OverlappingRegions {
                host,
                first,
                second,
            } => write!(
                f,
                "devices `{first}` and `{second}` overlap in the address map of host `{host}`"
            ),
            Warning::UnalignedOffset {
                device,
                offset,
                size,
            } => write!(
                f,
                "offset {offset:#010x} of device `{device}` is not aligned to its size {size:#x}"
            ),
        }
    }
}

/// Inspects a resolved topology and returns every warning, in topology order:
/// hosts first, then devices.
pub(crate) fn collect_warnings(topology: &Topology) -> Result<Vec<Warning>> {
    let mut warnings = Vec::new();

    for host in topology.hosts() {
        if host.devices().is_empty() {
            warnings.push(Warning::DeadHost {
                host: host.name().to_string(),
            });
            continue;
        }
        let decodes = topology
            .devices_of(host)
            .map(|d| d.map(|d| (d.name(), Decode::of(d))))
            .collect::<Result<Vec<_>>>()?;
        for ((first, a), (second, b)) in decodes.iter().tuple_combinations() {
            if a.overlaps(b) {
                warnings.push(Warning::OverlappingRegions {
                    host: host.name().to_string(),
                    first: first.to_string(),
                    second: second.to_string(),
                });
            }
        }
    }

    for device in topology.devices() {
        if device.hosts().is_empty() {
            warnings.push(Warning::UnreachableDevice {
                device: device.name().to_string(),
            });
        }
        if !Decode::of(device).is_aligned() {
            warnings.push(Warning::UnalignedOffset {
                device: device.name().to_string(),
                offset: device.offset(),
                size: device.size(),
            });
        }
    }

    for warning in &warnings {
        log::warn!("{warning}");
    }

    Ok(warnings)
}
