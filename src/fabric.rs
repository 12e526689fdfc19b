// SPDX-License-Identifier: Apache-2.0

use crate::{
    ComponentKind, InterfaceDescriptor, ModulePort, Netlist, Result, Warning, WireTable, Wrapper,
};

/// The result of synthesis. Everything an emitter needs, with no references
/// back into the synthesizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fabric {
    /// Name of the generated module.
    pub name: String,
    pub netlist: Netlist,
    /// Wires joining two synthesized components.
    pub wires: WireTable,
    pub ports: Vec<ModulePort>,
    pub wrapper: Wrapper,
    pub interfaces: InterfaceDescriptor,
    pub warnings: Vec<Warning>,
}

impl Fabric {
    pub fn get_port(&self, name: impl AsRef<str>) -> Option<&ModulePort> {
        self.ports.iter().find(|p| p.name == name.as_ref())
    }

    pub fn has_port(&self, name: impl AsRef<str>) -> bool {
        self.get_port(name).is_some()
    }

    pub fn count(&self, kind: ComponentKind) -> usize {
        self.netlist.instances_of(kind).count()
    }

    /// Re-runs the width and driver check that synthesis ends with.
    pub fn check(&self) -> Result<()> {
        self.netlist.check(&self.ports, &self.wires)
    }
}
