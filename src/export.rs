// SPDX-License-Identifier: Apache-2.0

use crate::io::IO;
use crate::signal::{Signal, bus_signals, full_width_signals};
use crate::{FabricConfig, LogicalWire, Result, Topology, WireAllocator, WireTable};

/// A port of the generated fabric module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModulePort {
    pub name: String,
    pub io: IO,
}

/// One connection of the fabric instance inside the parent wrapper.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrapperPort {
    pub port: String,
    pub wire: String,
}

/// What a parent integration template needs to instantiate the fabric: the
/// wires to declare and the port connections of the instance. The clock and
/// reset wires come from the parent and are not declared here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Wrapper {
    pub module_name: String,
    pub instance_name: String,
    pub wires: WireTable,
    pub ports: Vec<WrapperPort>,
}

/// A fabric port together with the wrapper wire it is paired with.
struct Exported {
    port: LogicalWire,
    io: IO,
    wire: LogicalWire,
}

impl Exported {
    fn global(port: LogicalWire, wire: LogicalWire) -> Exported {
        Exported {
            port,
            io: IO::Input(1),
            wire,
        }
    }

    fn host(host: &str, signal: Signal) -> Exported {
        Exported {
            port: LogicalWire::host_port(host, signal),
            io: IO::facing_host(signal.flow, signal.width),
            wire: LogicalWire::wrapper(host, signal),
        }
    }

    fn device(device: &str, signal: Signal) -> Exported {
        Exported {
            port: LogicalWire::device_port(device, signal),
            io: IO::facing_device(signal.flow, signal.width),
            wire: LogicalWire::wrapper(device, signal),
        }
    }
}

/// Every port of the fabric module in order: clock, reset, each host's full
/// signal set, then each device's signal set at the device's data width.
fn exported(topology: &Topology) -> Vec<Exported> {
    let mut exported = vec![
        Exported::global(LogicalWire::Clock, LogicalWire::WrapperClock),
        Exported::global(LogicalWire::Reset, LogicalWire::WrapperReset),
    ];
    for host in topology.hosts() {
        exported.extend(full_width_signals().map(|s| Exported::host(host.name(), s)));
    }
    for device in topology.devices() {
        exported.extend(bus_signals(device.datawidth()).map(|s| Exported::device(device.name(), s)));
    }
    exported
}

/// Builds the module port list, claiming every port name in `alloc`, and the
/// matching wrapper.
pub(crate) fn export(
    topology: &Topology,
    config: &FabricConfig,
    alloc: &mut WireAllocator,
) -> Result<(Vec<ModulePort>, Wrapper)> {
    let mut wrapper_alloc = WireAllocator::new();
    let mut ports = Vec::new();
    let mut wrapper_ports = Vec::new();

    for exported in exported(topology) {
        let name = alloc.claim(&exported.port)?;
        let wire = match exported.wire {
            LogicalWire::WrapperClock | LogicalWire::WrapperReset => {
                wrapper_alloc.claim(&exported.wire)?
            }
            _ => wrapper_alloc.declare(&exported.wire, exported.io.width())?,
        };
        wrapper_ports.push(WrapperPort {
            port: name.clone(),
            wire,
        });
        ports.push(ModulePort {
            name,
            io: exported.io,
        });
    }

    let wrapper = Wrapper {
        module_name: config.module_name.clone(),
        instance_name: format!("{}0", config.module_name),
        wires: wrapper_alloc.into_wire_table(),
        ports: wrapper_ports,
    };

    Ok((ports, wrapper))
}
