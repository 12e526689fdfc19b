// SPDX-License-Identifier: Apache-2.0

use crate::io::IO;
use crate::signal::{Flow, Signal, bus_signals, full_width_signals};
use crate::{LogicalWire, ModulePort, Topology};

/// Role of the fabric on a bus interface. The fabric is a slave to each host
/// and a master to each device.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterfaceMode {
    Master,
    Slave,
}

/// A vendor:library:name:version identifier of a bus definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BusType {
    pub vendor: String,
    pub library: String,
    pub name: String,
    pub version: String,
}

impl BusType {
    /// The Wishbone bus definition for an interface of the given data width.
    pub fn wishbone(datawidth: usize) -> BusType {
        let name = if datawidth == 8 { "wishbone8" } else { "wishbone" };
        BusType {
            vendor: "librecores.org".to_string(),
            library: "wishbone".to_string(),
            name: name.to_string(),
            version: "b3".to_string(),
        }
    }

    /// The abstraction definition belonging to this bus definition.
    pub fn abstraction(&self) -> BusType {
        BusType {
            name: format!("{}.absDef", self.name),
            ..self.clone()
        }
    }

    pub fn vlnv(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.vendor, self.library, self.name, self.version
        )
    }
}

/// Maps a logical port of the bus definition to a physical fabric port.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortMap {
    pub logical: String,
    pub physical: String,
    pub io: IO,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BusInterface {
    pub name: String,
    pub mode: InterfaceMode,
    pub datawidth: usize,
    pub bus_type: BusType,
    pub abstraction_type: BusType,
    pub port_maps: Vec<PortMap>,
}

impl BusInterface {
    fn new(
        endpoint: &str,
        mode: InterfaceMode,
        datawidth: usize,
        port_maps: Vec<PortMap>,
    ) -> BusInterface {
        let bus_type = BusType::wishbone(datawidth);
        BusInterface {
            name: format!("wb_{endpoint}"),
            mode,
            datawidth,
            abstraction_type: bus_type.abstraction(),
            bus_type,
            port_maps,
        }
    }

    pub fn get_port_map(&self, logical: impl AsRef<str>) -> Option<&PortMap> {
        self.port_maps.iter().find(|m| m.logical == logical.as_ref())
    }
}

/// Input of an IP-reuse metadata exporter: the global ports and one bus
/// interface per host and device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceDescriptor {
    pub clock: ModulePort,
    pub reset: ModulePort,
    pub interfaces: Vec<BusInterface>,
}

impl InterfaceDescriptor {
    pub fn get_interface(&self, name: impl AsRef<str>) -> Option<&BusInterface> {
        self.interfaces.iter().find(|i| i.name == name.as_ref())
    }
}

fn logical_name(signal: &Signal) -> String {
    match signal.flow {
        Flow::HostToDevice => format!("{}_o", signal.name),
        Flow::DeviceToHost => format!("{}_i", signal.name),
    }
}

fn port_map(physical: LogicalWire, signal: &Signal, io: IO) -> PortMap {
    PortMap {
        logical: logical_name(signal),
        physical: physical.identifier(),
        io,
    }
}

/// Describes the bus interfaces of the fabric synthesized from `topology`.
/// Physical names are those of the module port list.
pub(crate) fn describe(topology: &Topology) -> InterfaceDescriptor {
    let mut interfaces = Vec::new();

    for host in topology.hosts() {
        let port_maps = full_width_signals()
            .map(|s| {
                port_map(
                    LogicalWire::host_port(host.name(), s),
                    &s,
                    IO::facing_host(s.flow, s.width),
                )
            })
            .collect();
        interfaces.push(BusInterface::new(
            host.name(),
            InterfaceMode::Slave,
            host.datawidth(),
            port_maps,
        ));
    }

    for device in topology.devices() {
        let port_maps = bus_signals(device.datawidth())
            .map(|s| {
                port_map(
                    LogicalWire::device_port(device.name(), s),
                    &s,
                    IO::facing_device(s.flow, s.width),
                )
            })
            .collect();
        interfaces.push(BusInterface::new(
            device.name(),
            InterfaceMode::Master,
            device.datawidth(),
            port_maps,
        ));
    }

    InterfaceDescriptor {
        clock: ModulePort {
            name: LogicalWire::Clock.identifier(),
            io: IO::Input(1),
        },
        reset: ModulePort {
            name: LogicalWire::Reset.identifier(),
            io: IO::Input(1),
        },
        interfaces,
    }
}
