// SPDX-License-Identifier: Apache-2.0

use crate::diagnostics::collect_warnings;
use crate::netlist::Side;
use crate::signal::Signal;
use crate::{
    Connection, Device, Fabric, FabricConfig, Host, Instance, LogicalWire, Netlist, Result,
    Topology, WireAllocator, export, intf,
};

mod arbiter;
mod mux;
mod resize;
mod tieoff;

/// Synthesizes the fabric for `topology`.
///
/// Every host with at least one device gets a multiplexer `mux_<host>`. Every
/// device reached by more than one host gets an arbiter `arbiter_<device>`,
/// and every device narrower than the bus gets a resizer `resize_<device>`
/// between the arbiter (or multiplexer) and the device. Hosts without devices
/// and devices without hosts get their outputs tied to zero; for a narrow
/// device without hosts that is the host side of its resizer.
///
/// Synthesis is a pure function of its inputs; the first error aborts it.
pub fn synthesize(topology: &Topology, config: &FabricConfig) -> Result<Fabric> {
    config.validate()?;
    topology.validate()?;

    let warnings = collect_warnings(topology)?;

    let mut alloc = WireAllocator::new();
    let (ports, wrapper) = export::export(topology, config, &mut alloc)?;

    let mut synth = Synthesizer {
        topology,
        config,
        alloc,
        netlist: Netlist::default(),
    };
    for host in topology.hosts() {
        synth.host(host)?;
    }
    for device in topology.devices() {
        synth.device(device)?;
    }

    let Synthesizer { alloc, netlist, .. } = synth;
    let fabric = Fabric {
        name: config.module_name.clone(),
        netlist,
        wires: alloc.into_wire_table(),
        ports,
        wrapper,
        interfaces: intf::describe(topology),
        warnings,
    };
    fabric.check()?;
    Ok(fabric)
}

struct Synthesizer<'a> {
    topology: &'a Topology,
    config: &'a FabricConfig,
    alloc: WireAllocator,
    netlist: Netlist,
}

impl Synthesizer<'_> {
    fn host(&mut self, host: &Host) -> Result<()> {
        if host.devices().is_empty() {
            self.tieoff_host(host)
        } else {
            self.add_mux(host)
        }
    }

    fn device(&mut self, device: &Device) -> Result<()> {
        match device.fan_in() {
            0 if device.needs_resize() => self.tieoff_resizer(device)?,
            0 => return self.tieoff_device(device),
            1 => {}
            _ => self.add_arbiter(device)?,
        }
        if device.needs_resize() {
            self.add_resizer(device)?;
        }
        Ok(())
    }

    /// The wire carrying `signal` between `host`'s multiplexer and `device`:
    /// into the arbiter if the device is shared, else into the resizer if it is
    /// narrow, else the device port itself.
    fn mux_target(&mut self, host: &Host, device: &Device, signal: Signal) -> Result<String> {
        if device.needs_arbiter() {
            self.alloc.declare(
                &LogicalWire::arbitrated(host.name(), device.name(), signal),
                signal.width,
            )
        } else {
            self.device_target(device, signal)
        }
    }

    /// The wire carrying `signal` into `device` past any arbitration.
    fn device_target(&mut self, device: &Device, signal: Signal) -> Result<String> {
        if device.needs_resize() {
            self.alloc
                .declare(&LogicalWire::resized(device.name(), signal), signal.width)
        } else {
            self.alloc
                .claim(&LogicalWire::device_port(device.name(), signal))
        }
    }

    fn connect_clock_and_reset(&mut self, inst: &mut Instance) -> Result<()> {
        inst.connect(
            "wb_clk_i".to_string(),
            Connection::Wire(self.alloc.claim(&LogicalWire::Clock)?),
        );
        inst.connect(
            "wb_rst_i".to_string(),
            Connection::Wire(self.alloc.claim(&LogicalWire::Reset)?),
        );
        Ok(())
    }
}

/// Connects the `side` port of `inst` carrying `signal` to one wire per group.
fn connect_groups(inst: &mut Instance, side: Side, signal: &Signal, names: Vec<String>) {
    inst.connect(side.port_name(signal), Connection::from_names(names));
}
