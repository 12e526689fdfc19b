// SPDX-License-Identifier: Apache-2.0

use crate::signal::{DEVICE_SIGNALS, Flow, bus_signals, full_width_signals};
use crate::synth::Synthesizer;
use crate::{Device, Host, Literal, LogicalWire, Result};

impl Synthesizer<'_> {
    /// A host with no devices never gets a response: its outputs idle at zero.
    pub(super) fn tieoff_host(&mut self, host: &Host) -> Result<()> {
        for signal in DEVICE_SIGNALS {
            let port = self
                .alloc
                .claim(&LogicalWire::host_port(host.name(), signal))?;
            self.netlist.tieoff(port, Literal::zero(signal.width));
        }
        Ok(())
    }

    /// A device no host reaches never sees a cycle: its outputs idle at zero.
    pub(super) fn tieoff_device(&mut self, device: &Device) -> Result<()> {
        for signal in bus_signals(device.datawidth()).filter(|s| s.flow == Flow::HostToDevice) {
            let port = self
                .alloc
                .claim(&LogicalWire::device_port(device.name(), signal))?;
            self.netlist.tieoff(port, Literal::zero(signal.width));
        }
        Ok(())
    }

    /// Idles the full-width side of the resizer of a narrow device no host
    /// reaches. The resizer itself still drives the device.
    pub(super) fn tieoff_resizer(&mut self, device: &Device) -> Result<()> {
        for signal in full_width_signals().filter(|s| s.flow == Flow::HostToDevice) {
            let wire = self
                .alloc
                .declare(&LogicalWire::resized(device.name(), signal), signal.width)?;
            self.netlist.tieoff(wire, Literal::zero(signal.width));
        }
        Ok(())
    }
}
