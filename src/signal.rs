// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Width of the shared bus, in bits. Hosts always use it.
pub const BUS_WIDTH: usize = 32;

/// Width of every address.
pub const ADDRESS_WIDTH: usize = 32;

/// Which side of the bus drives a signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Flow {
    /// Driven by a host (master-to-slave).
    HostToDevice,
    /// Driven by a device (slave-to-master).
    DeviceToHost,
}

impl Flow {
    /// The tag used in intermediate wire names.
    pub fn tag(&self) -> &'static str {
        match self {
            Flow::HostToDevice => "m2s",
            Flow::DeviceToHost => "s2m",
        }
    }
}

impl fmt::Display for Flow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A bus line of the Wishbone protocol, at its full (32-bit bus) width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Signal {
    pub name: &'static str,
    pub width: usize,
    pub flow: Flow,
}

const fn host_driven(name: &'static str, width: usize) -> Signal {
    Signal {
        name,
        width,
        flow: Flow::HostToDevice,
    }
}

const fn device_driven(name: &'static str, width: usize) -> Signal {
    Signal {
        name,
        width,
        flow: Flow::DeviceToHost,
    }
}

/// Signals driven by a host.
pub const HOST_SIGNALS: [Signal; 8] = [
    host_driven("adr", ADDRESS_WIDTH),
    host_driven("dat", BUS_WIDTH),
    host_driven("sel", BUS_WIDTH / 8),
    host_driven("we", 1),
    host_driven("cyc", 1),
    host_driven("stb", 1),
    host_driven("cti", 3),
    host_driven("bte", 2),
];

/// Signals driven by a device.
pub const DEVICE_SIGNALS: [Signal; 4] = [
    device_driven("dat", BUS_WIDTH),
    device_driven("ack", 1),
    device_driven("err", 1),
    device_driven("rty", 1),
];

impl Signal {
    /// Data-bearing signals follow the native data width of the endpoint.
    pub fn is_data(&self) -> bool {
        self.name == "dat"
    }

    /// Byte select only exists on full-width buses.
    pub fn is_select(&self) -> bool {
        self.name == "sel"
    }

    /// Width of this signal on a segment whose data width is `datawidth`.
    pub fn width_at(&self, datawidth: usize) -> usize {
        if self.is_data() { datawidth } else { self.width }
    }

    /// Returns this signal rescaled to `datawidth`.
    pub fn scaled(&self, datawidth: usize) -> Signal {
        Signal {
            width: self.width_at(datawidth),
            ..*self
        }
    }
}

/// Every signal in protocol order (host-driven first), scaled to `datawidth`.
/// `sel` is left out unless the segment is full width.
pub fn bus_signals(datawidth: usize) -> impl Iterator<Item = Signal> {
    HOST_SIGNALS
        .iter()
        .chain(DEVICE_SIGNALS.iter())
        .filter(move |s| datawidth == BUS_WIDTH || !s.is_select())
        .map(move |s| s.scaled(datawidth))
}

/// Every signal at full bus width, including `sel`.
pub fn full_width_signals() -> impl Iterator<Item = Signal> {
    bus_signals(BUS_WIDTH)
}
