// SPDX-License-Identifier: Apache-2.0

use indexmap::IndexMap;

use crate::io::IO;
use crate::netlist::{Side, param};
use crate::signal::{BUS_WIDTH, bus_signals, full_width_signals};
use crate::{
    ComponentKind, Connection, FabricError, Instance, ModulePort, Netlist, Result, WireTable,
};

impl Instance {
    /// The ports this instance's component has, given its parameters.
    pub fn expected_ports(&self) -> IndexMap<String, IO> {
        let int = |name: &str| {
            self.get_parameter(name)
                .and_then(|v| v.as_int())
                .unwrap_or(0) as usize
        };

        let mut ports = IndexMap::new();
        if self.kind != ComponentKind::Resizer {
            ports.insert("wb_clk_i".to_string(), IO::Input(1));
            ports.insert("wb_rst_i".to_string(), IO::Input(1));
        }

        let (host_groups, device_groups, device_width) = match self.kind {
            ComponentKind::Multiplexer => (1, int(param::NUM_SLAVES), BUS_WIDTH),
            ComponentKind::Arbiter => (int(param::NUM_MASTERS), 1, BUS_WIDTH),
            ComponentKind::Resizer => (1, 1, int(param::DEVICE_DATA_WIDTH)),
        };

        for signal in full_width_signals() {
            let (name, io) = Side::Host.port(&signal, host_groups * signal.width);
            ports.insert(name, io);
        }
        for signal in bus_signals(device_width) {
            let (name, io) = Side::Device.port(&signal, device_groups * signal.width);
            ports.insert(name, io);
        }
        ports
    }
}

impl Netlist {
    /// Checks port arity and widths of every instance against the fabric's
    /// ports and declared wires, and that every fabric output and declared
    /// wire has exactly one driver.
    pub fn check(&self, module_ports: &[ModulePort], wires: &WireTable) -> Result<()> {
        let mut widths: IndexMap<&str, usize> = IndexMap::new();
        // Each net with the number of things driving it.
        let mut drivers: IndexMap<&str, usize> = IndexMap::new();

        for port in module_ports {
            widths.insert(&port.name, port.io.width());
            drivers.insert(&port.name, usize::from(port.io.is_input()));
        }
        for (name, width) in wires {
            widths.insert(name, *width);
            drivers.insert(name, 0);
        }

        for inst in self.instances.values() {
            let expected = inst.expected_ports();

            if let Some(port) = inst.ports.keys().find(|p| !expected.contains_key(*p)) {
                return Err(FabricError::UnknownPort {
                    instance: inst.name.clone(),
                    port: port.clone(),
                });
            }

            for (port, io) in &expected {
                let connection = inst.ports.get(port).ok_or_else(|| FabricError::Unconnected {
                    instance: inst.name.clone(),
                    port: port.clone(),
                })?;

                let actual = match connection {
                    Connection::Literal(literal) => literal.width,
                    _ => connection
                        .names()
                        .iter()
                        .map(|name| {
                            widths
                                .get(name.as_str())
                                .copied()
                                .ok_or_else(|| FabricError::UndeclaredNet(name.clone()))
                        })
                        .sum::<Result<usize>>()?,
                };
                if actual != io.width() {
                    return Err(FabricError::WidthMismatch {
                        instance: inst.name.clone(),
                        port: port.clone(),
                        expected: io.width(),
                        actual,
                    });
                }

                if io.is_output() {
                    for name in connection.names() {
                        *drivers.entry(name.as_str()).or_default() += 1;
                    }
                }
            }
        }

        for (port, literal) in &self.tieoffs {
            match widths.get(port.as_str()) {
                Some(width) if *width == literal.width => {}
                Some(width) => {
                    return Err(FabricError::WidthMismatch {
                        instance: "tieoff".to_string(),
                        port: port.clone(),
                        expected: *width,
                        actual: literal.width,
                    });
                }
                None => return Err(FabricError::UndeclaredNet(port.clone())),
            }
            *drivers.entry(port.as_str()).or_default() += 1;
        }

        for (name, count) in drivers {
            match count {
                1 => {}
                0 => return Err(FabricError::Undriven(name.to_string())),
                n => return Err(FabricError::MultipleDrivers(name.to_string(), n)),
            }
        }

        Ok(())
    }
}
