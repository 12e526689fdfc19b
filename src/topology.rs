// SPDX-License-Identifier: Apache-2.0

use std::fmt::Write;

use indexmap::IndexMap;
use itertools::Itertools;

use crate::util::check_identifier;
use crate::{Attrs, EntityKind, FabricError, Result};

mod entity;
pub use entity::{Device, Host};

mod load;
pub use load::{Declarations, DeviceDecl, HostDecl};

/// The bipartite connectivity graph between hosts and devices. Hosts and
/// devices iterate in declaration order, which fixes the order of everything
/// synthesized from the topology.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Topology {
    hosts: IndexMap<String, Host>,
    devices: IndexMap<String, Device>,
}

impl Topology {
    pub fn new() -> Topology {
        Topology::default()
    }

    /// Registers a host. Hosts recognize no attributes, so any key in `attrs`
    /// is an error.
    pub fn add_host(&mut self, name: impl AsRef<str>, attrs: &Attrs) -> Result<&Host> {
        let name = name.as_ref();
        self.check_new_name(EntityKind::Host, name)?;
        let host = Host::new(name, attrs)?;
        Ok(&*self.hosts.entry(name.to_string()).or_insert(host))
    }

    /// Registers a device. Recognized attributes are `datawidth`, `offset`
    /// and `size`.
    pub fn add_device(&mut self, name: impl AsRef<str>, attrs: &Attrs) -> Result<&Device> {
        let name = name.as_ref();
        self.check_new_name(EntityKind::Device, name)?;
        let device = Device::new(name, attrs)?;
        Ok(&*self.devices.entry(name.to_string()).or_insert(device))
    }

    /// Names are unique within hosts and within devices, and a host and a
    /// device may not share one: their ports would share identifiers.
    fn check_new_name(&self, kind: EntityKind, name: &str) -> Result<()> {
        check_identifier(kind.as_str(), name)?;
        let (same, other) = match kind {
            EntityKind::Host => (self.hosts.contains_key(name), self.devices.contains_key(name)),
            EntityKind::Device => (self.devices.contains_key(name), self.hosts.contains_key(name)),
        };
        if same {
            return Err(FabricError::DuplicateEntity {
                kind,
                name: name.to_string(),
            });
        }
        if other {
            return Err(FabricError::SharedName(name.to_string()));
        }
        Ok(())
    }

    /// Lets `host` address `device`. The edge is recorded on both sides.
    pub fn connect(&mut self, host: impl AsRef<str>, device: impl AsRef<str>) -> Result<()> {
        let (host, device) = (host.as_ref(), device.as_ref());

        let Some(h) = self.hosts.get_mut(host) else {
            return Err(FabricError::UnknownEntity {
                kind: EntityKind::Host,
                name: host.to_string(),
            });
        };
        let Some(d) = self.devices.get_mut(device) else {
            return Err(FabricError::UnknownEntity {
                kind: EntityKind::Device,
                name: device.to_string(),
            });
        };

        if h.devices.iter().any(|name| name == device) {
            return Err(FabricError::DuplicateConnection {
                host: host.to_string(),
                device: device.to_string(),
            });
        }

        h.devices.push(device.to_string());
        d.hosts.push(host.to_string());
        Ok(())
    }

    /// Fails if no hosts or no devices have been declared.
    pub fn validate(&self) -> Result<()> {
        if self.hosts.is_empty() {
            return Err(FabricError::EmptyTopology(EntityKind::Host));
        }
        if self.devices.is_empty() {
            return Err(FabricError::EmptyTopology(EntityKind::Device));
        }
        Ok(())
    }

    pub fn hosts(&self) -> impl Iterator<Item = &Host> {
        self.hosts.values()
    }

    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    pub fn get_host(&self, name: impl AsRef<str>) -> Option<&Host> {
        self.hosts.get(name.as_ref())
    }

    pub fn get_device(&self, name: impl AsRef<str>) -> Option<&Device> {
        self.devices.get(name.as_ref())
    }

    /// Looks up a device that is known to exist because it was reached through
    /// a connection.
    pub(crate) fn device(&self, name: &str) -> Result<&Device> {
        self.devices
            .get(name)
            .ok_or_else(|| FabricError::UnknownEntity {
                kind: EntityKind::Device,
                name: name.to_string(),
            })
    }

    /// Devices addressed by `host`, in the host's order.
    pub fn devices_of<'a>(&'a self, host: &'a Host) -> impl Iterator<Item = Result<&'a Device>> {
        host.devices.iter().map(|name| self.device(name))
    }

    /// Renders the resolved graph: every host with the devices it reaches, then
    /// every device with the hosts that reach it.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "hosts:");
        for host in self.hosts.values() {
            let _ = writeln!(out, "  {}: [{}]", host.name, host.devices.iter().join(", "));
        }
        let _ = writeln!(out, "devices:");
        for device in self.devices.values() {
            let _ = writeln!(
                out,
                "  {} @ {:#010x}/{:#x} ({}-bit): [{}]",
                device.name,
                device.offset,
                device.size,
                device.datawidth,
                device.hosts.iter().join(", ")
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs;

    #[test]
    fn test_dump() {
        let mut t = Topology::new();
        t.add_host("cpu", &Attrs::new()).unwrap();
        t.add_host("dma", &Attrs::new()).unwrap();
        t.add_device("ram", &attrs([("size", "0x10000")])).unwrap();
        t.add_device("uart", &attrs([("datawidth", 8), ("offset", 0x2000_0000), ("size", 0x100)]))
            .unwrap();
        t.connect("cpu", "ram").unwrap();
        t.connect("cpu", "uart").unwrap();
        t.connect("dma", "ram").unwrap();

        assert_eq!(
            t.dump(),
            "\
hosts:
  cpu: [ram, uart]
  dma: [ram]
devices:
  ram @ 0x00000000/0x10000 (32-bit): [cpu, dma]
  uart @ 0x20000000/0x100 (8-bit): [cpu]
"
        );
    }
}
