// SPDX-License-Identifier: Apache-2.0

use crate::netlist::{Side, param};
use crate::signal::{ADDRESS_WIDTH, BUS_WIDTH, bus_signals, full_width_signals};
use crate::synth::{Synthesizer, connect_groups};
use crate::{ComponentKind, Device, Instance, LogicalWire, Result};

impl Synthesizer<'_> {
    /// Instantiates `resize_<device>` between the full-width segment and the
    /// device port. The narrow side has no byte select.
    pub(super) fn add_resizer(&mut self, device: &Device) -> Result<()> {
        let mut inst = Instance::new(ComponentKind::Resizer, format!("resize_{}", device.name()));
        inst.set_parameter(param::ADDRESS_WIDTH, ADDRESS_WIDTH);
        inst.set_parameter(param::HOST_DATA_WIDTH, BUS_WIDTH);
        inst.set_parameter(param::DEVICE_DATA_WIDTH, device.datawidth());
        inst.set_parameter(param::ENDIAN, self.config.endian.as_str());

        for signal in full_width_signals() {
            let wire = self
                .alloc
                .declare(&LogicalWire::resized(device.name(), signal), signal.width)?;
            connect_groups(&mut inst, Side::Host, &signal, vec![wire]);
        }

        for signal in bus_signals(device.datawidth()) {
            let port = self
                .alloc
                .claim(&LogicalWire::device_port(device.name(), signal))?;
            connect_groups(&mut inst, Side::Device, &signal, vec![port]);
        }

        self.netlist.add(inst);
        Ok(())
    }
}
