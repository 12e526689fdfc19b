// SPDX-License-Identifier: Apache-2.0

use crate::netlist::{Side, param};
use crate::signal::{ADDRESS_WIDTH, full_width_signals};
use crate::synth::{Synthesizer, connect_groups};
use crate::{ComponentKind, Decode, Device, Host, Instance, LogicalWire, ParameterValue, Result};

impl Synthesizer<'_> {
    /// Instantiates `mux_<host>`, decoding the host's address space onto its
    /// devices in the host's device order.
    pub(super) fn add_mux(&mut self, host: &Host) -> Result<()> {
        let topology = self.topology;
        let devices = topology
            .devices_of(host)
            .collect::<Result<Vec<&Device>>>()?;
        let decodes: Vec<Decode> = devices.iter().map(|d| Decode::of(d)).collect();

        let mut inst = Instance::new(ComponentKind::Multiplexer, format!("mux_{}", host.name()));
        inst.set_parameter(param::NUM_SLAVES, devices.len());
        inst.set_parameter(
            param::MATCH_ADDR,
            ParameterValue::Words {
                width: ADDRESS_WIDTH,
                values: decodes.iter().map(|d| d.match_address.into()).collect(),
            },
        );
        inst.set_parameter(
            param::MATCH_MASK,
            ParameterValue::Words {
                width: ADDRESS_WIDTH,
                values: decodes.iter().map(|d| d.match_mask.into()).collect(),
            },
        );

        self.connect_clock_and_reset(&mut inst)?;

        for signal in full_width_signals() {
            let port = self
                .alloc
                .claim(&LogicalWire::host_port(host.name(), signal))?;
            connect_groups(&mut inst, Side::Host, &signal, vec![port]);
        }

        for signal in full_width_signals() {
            let targets = devices
                .iter()
                .map(|device| self.mux_target(host, device, signal))
                .collect::<Result<Vec<_>>>()?;
            connect_groups(&mut inst, Side::Device, &signal, targets);
        }

        self.netlist.add(inst);
        Ok(())
    }
}
