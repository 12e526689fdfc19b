// SPDX-License-Identifier: Apache-2.0

use crate::{Attrs, Result, Topology};

/// One host section of a configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HostDecl {
    pub name: String,
    pub attrs: Attrs,
    /// Devices the host may address, in the order they were listed.
    pub devices: Vec<String>,
}

/// One device section of a configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceDecl {
    pub name: String,
    pub attrs: Attrs,
}

/// Everything a configuration loader hands over, still unresolved. Entries
/// are kept as lists so that duplicate names reach [`Topology::load`] and are
/// reported there.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Declarations {
    pub hosts: Vec<HostDecl>,
    pub devices: Vec<DeviceDecl>,
}

impl Declarations {
    pub fn new() -> Declarations {
        Declarations::default()
    }

    /// Adds a host that may address `devices`.
    pub fn host<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        devices: impl IntoIterator<Item = S>,
    ) -> Declarations {
        self.hosts.push(HostDecl {
            name: name.into(),
            attrs: Attrs::new(),
            devices: devices.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn device(mut self, name: impl Into<String>, attrs: Attrs) -> Declarations {
        self.devices.push(DeviceDecl {
            name: name.into(),
            attrs,
        });
        self
    }
}

impl Topology {
    /// Builds a topology in one resolution pass: all hosts are registered,
    /// then all devices, then each host's device list is connected in order.
    /// The result has been validated.
    pub fn load(decls: &Declarations) -> Result<Topology> {
        let mut topology = Topology::new();

        for decl in &decls.hosts {
            log::info!("Found host {}", decl.name);
            topology.add_host(&decl.name, &decl.attrs)?;
        }
        for decl in &decls.devices {
            log::info!("Found device {}", decl.name);
            topology.add_device(&decl.name, &decl.attrs)?;
        }
        for decl in &decls.hosts {
            for device in &decl.devices {
                topology.connect(&decl.name, device)?;
            }
        }

        topology.validate()?;
        log::debug!("Resolved topology:\n{}", topology.dump());
        Ok(topology)
    }
}
