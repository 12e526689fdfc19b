// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::io::IO;
use crate::signal::{Flow, Signal};
use crate::{FabricError, Result, WireTable};

/// A named signal in the generated fabric (or in its wrapper), identified by
/// what it connects rather than by its name. [`LogicalWire::identifier`] is the
/// only place identifiers are formatted.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LogicalWire {
    /// Fabric clock input.
    Clock,
    /// Fabric reset input.
    Reset,
    /// A fabric port facing a host.
    HostPort { host: String, signal: Signal },
    /// A fabric port facing a device.
    DevicePort { device: String, signal: Signal },
    /// Segment from a host's multiplexer to a device's arbiter.
    Arbitrated {
        host: String,
        device: String,
        signal: Signal,
    },
    /// Segment into a device's resizer, on its full-width side.
    Resized { device: String, signal: Signal },
    /// Wire in the parent wrapper attached to an endpoint port.
    Wrapper { endpoint: String, signal: Signal },
    /// Clock in the parent wrapper.
    WrapperClock,
    /// Reset in the parent wrapper.
    WrapperReset,
}

impl LogicalWire {
    pub fn host_port(host: &str, signal: Signal) -> LogicalWire {
        LogicalWire::HostPort {
            host: host.to_string(),
            signal,
        }
    }

    pub fn device_port(device: &str, signal: Signal) -> LogicalWire {
        LogicalWire::DevicePort {
            device: device.to_string(),
            signal,
        }
    }

    pub fn arbitrated(host: &str, device: &str, signal: Signal) -> LogicalWire {
        LogicalWire::Arbitrated {
            host: host.to_string(),
            device: device.to_string(),
            signal,
        }
    }

    pub fn resized(device: &str, signal: Signal) -> LogicalWire {
        LogicalWire::Resized {
            device: device.to_string(),
            signal,
        }
    }

    pub fn wrapper(endpoint: &str, signal: Signal) -> LogicalWire {
        LogicalWire::Wrapper {
            endpoint: endpoint.to_string(),
            signal,
        }
    }

    /// The identifier of this wire. Deterministic: the same logical wire always
    /// yields the same identifier.
    pub fn identifier(&self) -> String {
        match self {
            LogicalWire::Clock => "wb_clk_i".to_string(),
            LogicalWire::Reset => "wb_rst_i".to_string(),
            LogicalWire::HostPort { host, signal } => format!(
                "wb_{host}_{}_{}",
                signal.name,
                IO::facing_host(signal.flow, 0).suffix()
            ),
            LogicalWire::DevicePort { device, signal } => format!(
                "wb_{device}_{}_{}",
                signal.name,
                IO::facing_device(signal.flow, 0).suffix()
            ),
            LogicalWire::Arbitrated {
                host,
                device,
                signal,
            } => format!("wb_{}_{host}_{device}_{}", signal.flow, signal.name),
            LogicalWire::Resized { device, signal } => {
                format!("wb_{}_resize_{device}_{}", signal.flow, signal.name)
            }
            LogicalWire::Wrapper { endpoint, signal } => {
                format!("wb_{}_{endpoint}_{}", signal.flow, signal.name)
            }
            LogicalWire::WrapperClock => "wb_clk".to_string(),
            LogicalWire::WrapperReset => "wb_rst".to_string(),
        }
    }

    /// Two logical wires are the same if they connect the same things; the
    /// width a signal happens to have on a given segment does not matter.
    fn key(&self) -> LogicalWire {
        let normalize = |signal: &Signal| Signal {
            width: 0,
            ..*signal
        };
        match self {
            LogicalWire::HostPort { host, signal } => LogicalWire::HostPort {
                host: host.clone(),
                signal: normalize(signal),
            },
            LogicalWire::DevicePort { device, signal } => LogicalWire::DevicePort {
                device: device.clone(),
                signal: normalize(signal),
            },
            LogicalWire::Arbitrated {
                host,
                device,
                signal,
            } => LogicalWire::Arbitrated {
                host: host.clone(),
                device: device.clone(),
                signal: normalize(signal),
            },
            LogicalWire::Resized { device, signal } => LogicalWire::Resized {
                device: device.clone(),
                signal: normalize(signal),
            },
            LogicalWire::Wrapper { endpoint, signal } => LogicalWire::Wrapper {
                endpoint: endpoint.clone(),
                signal: normalize(signal),
            },
            other => other.clone(),
        }
    }
}

impl fmt::Display for LogicalWire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalWire::Clock => write!(f, "the fabric clock"),
            LogicalWire::Reset => write!(f, "the fabric reset"),
            LogicalWire::HostPort { host, signal } => {
                write!(f, "port {} of host `{host}`", signal.name)
            }
            LogicalWire::DevicePort { device, signal } => {
                write!(f, "port {} of device `{device}`", signal.name)
            }
            LogicalWire::Arbitrated {
                host,
                device,
                signal,
            } => write!(
                f,
                "{} segment {} from host `{host}` to device `{device}`",
                signal.flow, signal.name
            ),
            LogicalWire::Resized { device, signal } => write!(
                f,
                "{} segment {} into the resizer of device `{device}`",
                signal.flow, signal.name
            ),
            LogicalWire::Wrapper { endpoint, signal } => write!(
                f,
                "wrapper wire {} {} of `{endpoint}`",
                signal.flow, signal.name
            ),
            LogicalWire::WrapperClock => write!(f, "the wrapper clock"),
            LogicalWire::WrapperReset => write!(f, "the wrapper reset"),
        }
    }
}

/// Hands out identifiers for logical wires within one namespace (the fabric
/// module, or its wrapper) and remembers which of them must be declared as
/// wires, as opposed to being module ports.
#[derive(Clone, Debug, Default)]
pub struct WireAllocator {
    claimed: IndexMap<String, LogicalWire>,
    declared: WireTable,
}

impl WireAllocator {
    pub fn new() -> WireAllocator {
        WireAllocator::default()
    }

    /// Returns the identifier of `wire`, failing if a different logical wire
    /// already owns it.
    pub fn claim(&mut self, wire: &LogicalWire) -> Result<String> {
        let name = wire.identifier();
        let key = wire.key();
        match self.claimed.entry(name.clone()) {
            Entry::Occupied(entry) => {
                if *entry.get() != key {
                    return Err(FabricError::NameCollision {
                        name,
                        first: entry.get().to_string(),
                        second: wire.to_string(),
                    });
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(key);
            }
        }
        Ok(name)
    }

    /// Claims `wire` and records it as a wire of the given width that must be
    /// declared. Declaring the same wire again keeps the first width.
    pub fn declare(&mut self, wire: &LogicalWire, width: usize) -> Result<String> {
        let name = self.claim(wire)?;
        self.declared.entry(name.clone()).or_insert(width);
        Ok(name)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.declared.contains_key(name)
    }

    /// All wires that need a declaration, in the order they were first
    /// declared.
    pub fn into_wire_table(self) -> WireTable {
        self.declared
    }
}
