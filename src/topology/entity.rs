// SPDX-License-Identifier: Apache-2.0

use crate::decode::mask_for_size;
use crate::signal::BUS_WIDTH;
use crate::{AttrValue, Attrs, EntityKind, FabricError, Result};

/// Largest region a device may occupy: the whole address space.
const MAX_SIZE: u64 = 1 << 32;

/// A bus initiator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Host {
    pub(crate) name: String,
    pub(crate) devices: Vec<String>,
}

impl Host {
    pub(crate) fn new(name: &str, attrs: &Attrs) -> Result<Host> {
        // Hosts carry no data attributes; their device lists are connected
        // separately.
        if let Some(key) = attrs.keys().next() {
            return Err(FabricError::UnknownProperty {
                kind: EntityKind::Host,
                entity: name.to_string(),
                key: key.clone(),
            });
        }
        Ok(Host {
            name: name.to_string(),
            devices: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn datawidth(&self) -> usize {
        BUS_WIDTH
    }

    /// Names of the devices this host may address, in declaration order.
    pub fn devices(&self) -> &[String] {
        &self.devices
    }
}

/// A bus target occupying `size` bytes at `offset`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Device {
    pub(crate) name: String,
    pub(crate) datawidth: usize,
    pub(crate) offset: u32,
    pub(crate) size: u64,
    pub(crate) hosts: Vec<String>,
}

impl Device {
    pub(crate) fn new(name: &str, attrs: &Attrs) -> Result<Device> {
        let mut device = Device {
            name: name.to_string(),
            datawidth: BUS_WIDTH,
            offset: 0,
            size: MAX_SIZE,
            hosts: Vec::new(),
        };

        for (key, value) in attrs {
            match key.as_str() {
                "datawidth" => {
                    let datawidth = device.number(key, value)?;
                    if !matches!(datawidth, 8 | 16 | 32) {
                        return Err(device.invalid(key, value, "data width must be 8, 16 or 32"));
                    }
                    device.datawidth = datawidth as usize;
                }
                "offset" => {
                    device.offset = u32::try_from(device.number(key, value)?)
                        .map_err(|_| device.invalid(key, value, "offset must fit in 32 bits"))?;
                }
                "size" => {
                    let size = device.number(key, value)?;
                    if !size.is_power_of_two() || size > MAX_SIZE {
                        return Err(device.invalid(
                            key,
                            value,
                            "size must be a power of two no larger than 0x100000000",
                        ));
                    }
                    device.size = size;
                }
                _ => {
                    return Err(FabricError::UnknownProperty {
                        kind: EntityKind::Device,
                        entity: device.name.clone(),
                        key: key.clone(),
                    });
                }
            }
        }

        Ok(device)
    }

    fn number(&self, key: &str, value: &AttrValue) -> Result<u64> {
        value
            .as_number()
            .ok_or_else(|| self.invalid(key, value, "not a non-negative number"))
    }

    fn invalid(&self, key: &str, value: &AttrValue, reason: &'static str) -> FabricError {
        FabricError::InvalidValue {
            kind: EntityKind::Device,
            entity: self.name.clone(),
            key: key.to_string(),
            value: value.to_string(),
            reason,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn datawidth(&self) -> usize {
        self.datawidth
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn mask(&self) -> u32 {
        mask_for_size(self.size)
    }

    /// Names of the hosts that may address this device, in host declaration
    /// order.
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn fan_in(&self) -> usize {
        self.hosts.len()
    }

    pub fn needs_arbiter(&self) -> bool {
        self.fan_in() > 1
    }

    pub fn needs_resize(&self) -> bool {
        self.datawidth < BUS_WIDTH
    }
}
