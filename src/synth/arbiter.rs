// SPDX-License-Identifier: Apache-2.0

use crate::netlist::{Side, param};
use crate::signal::full_width_signals;
use crate::synth::{Synthesizer, connect_groups};
use crate::{ComponentKind, Device, Instance, LogicalWire, Result};

impl Synthesizer<'_> {
    /// Instantiates `arbiter_<device>`, with one host-side group per host in
    /// the device's host order. Each group is the segment the host's
    /// multiplexer drives for this device.
    pub(super) fn add_arbiter(&mut self, device: &Device) -> Result<()> {
        let mut inst = Instance::new(ComponentKind::Arbiter, format!("arbiter_{}", device.name()));
        inst.set_parameter(param::NUM_MASTERS, device.fan_in());

        self.connect_clock_and_reset(&mut inst)?;

        for signal in full_width_signals() {
            let sources = device
                .hosts()
                .iter()
                .map(|host| {
                    self.alloc.declare(
                        &LogicalWire::arbitrated(host, device.name(), signal),
                        signal.width,
                    )
                })
                .collect::<Result<Vec<_>>>()?;
            connect_groups(&mut inst, Side::Host, &signal, sources);
        }

        for signal in full_width_signals() {
            let target = self.device_target(device, signal)?;
            connect_groups(&mut inst, Side::Device, &signal, vec![target]);
        }

        self.netlist.add(inst);
        Ok(())
    }
}
