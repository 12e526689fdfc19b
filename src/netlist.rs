// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use indexmap::IndexMap;
use num_bigint::BigUint;

use crate::io::IO;
use crate::signal::Signal;

mod check;

/// Parameter names of the HDL components.
pub(crate) mod param {
    pub const NUM_SLAVES: &str = "num_slaves";
    pub const MATCH_ADDR: &str = "MATCH_ADDR";
    pub const MATCH_MASK: &str = "MATCH_MASK";
    pub const NUM_MASTERS: &str = "num_masters";
    pub const ADDRESS_WIDTH: &str = "aw";
    pub const HOST_DATA_WIDTH: &str = "mdw";
    pub const DEVICE_DATA_WIDTH: &str = "sdw";
    pub const ENDIAN: &str = "endian";
}

/// Wire identifier to width, for every wire that needs a declaration.
pub type WireTable = IndexMap<String, usize>;

/// The structural components a fabric is assembled from. Their behavior is
/// implemented by external HDL modules; only their instantiation is decided
/// here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// Routes one host to one of its devices by address decode.
    Multiplexer,
    /// Serializes several hosts onto one device.
    Arbiter,
    /// Adapts the 32-bit bus to a narrower device.
    Resizer,
}

impl ComponentKind {
    /// Name of the HDL module implementing this component.
    pub fn module_name(&self) -> &'static str {
        match self {
            ComponentKind::Multiplexer => "wb_mux",
            ComponentKind::Arbiter => "wb_arbiter",
            ComponentKind::Resizer => "wb_data_resize",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.module_name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParameterValue {
    Int(u64),
    Str(String),
    /// An array of `width`-bit words, element 0 first.
    Words { width: usize, values: Vec<u64> },
}

impl ParameterValue {
    pub fn as_int(&self) -> Option<u64> {
        match self {
            ParameterValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParameterValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_words(&self) -> Option<&[u64]> {
        match self {
            ParameterValue::Words { values, .. } => Some(values),
            _ => None,
        }
    }

    /// Packs a word array into a single vector the way an HDL concatenation
    /// `{w0, w1, ...}` does: element 0 ends up most significant.
    pub fn packed(&self) -> Option<BigUint> {
        match self {
            ParameterValue::Words { width, values } => {
                Some(values.iter().fold(BigUint::from(0u32), |acc, v| {
                    (acc << *width) | BigUint::from(*v)
                }))
            }
            _ => None,
        }
    }
}

impl From<u64> for ParameterValue {
    fn from(v: u64) -> Self {
        ParameterValue::Int(v)
    }
}

impl From<usize> for ParameterValue {
    fn from(v: usize) -> Self {
        ParameterValue::Int(v as u64)
    }
}

impl From<&str> for ParameterValue {
    fn from(v: &str) -> Self {
        ParameterValue::Str(v.to_string())
    }
}

/// A constant of a given width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Literal {
    pub width: usize,
    pub value: BigUint,
}

impl Literal {
    pub fn zero(width: usize) -> Literal {
        Literal {
            width,
            value: BigUint::from(0u32),
        }
    }
}

/// What an instance port is connected to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Connection {
    /// A module port or declared wire.
    Wire(String),
    /// Several wires side by side; the first is most significant.
    Concat(Vec<String>),
    Literal(Literal),
}

impl Connection {
    /// A single name connects directly; several are concatenated.
    pub(crate) fn from_names(mut names: Vec<String>) -> Connection {
        if names.len() == 1 {
            Connection::Wire(names.remove(0))
        } else {
            Connection::Concat(names)
        }
    }

    /// Names of every wire or port this connection touches.
    pub fn names(&self) -> &[String] {
        match self {
            Connection::Wire(name) => std::slice::from_ref(name),
            Connection::Concat(names) => names,
            Connection::Literal(_) => &[],
        }
    }
}

/// Which side of a component a port sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    /// Faces the hosts: `wbm_*` ports.
    Host,
    /// Faces the devices: `wbs_*` ports.
    Device,
}

impl Side {
    /// Name and direction of the port carrying `signal` on this side of a
    /// component, `width` bits wide.
    pub(crate) fn port(&self, signal: &Signal, width: usize) -> (String, IO) {
        let (prefix, io) = match self {
            Side::Host => ("wbm", IO::facing_host(signal.flow, width)),
            Side::Device => ("wbs", IO::facing_device(signal.flow, width)),
        };
        (format!("{prefix}_{}_{}", signal.name, io.suffix()), io)
    }

    pub(crate) fn port_name(&self, signal: &Signal) -> String {
        self.port(signal, signal.width).0
    }
}

/// One instantiated component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instance {
    pub kind: ComponentKind,
    pub name: String,
    pub parameters: IndexMap<String, ParameterValue>,
    pub ports: IndexMap<String, Connection>,
}

impl Instance {
    pub(crate) fn new(kind: ComponentKind, name: String) -> Instance {
        Instance {
            kind,
            name,
            parameters: IndexMap::new(),
            ports: IndexMap::new(),
        }
    }

    pub(crate) fn set_parameter(&mut self, name: &str, value: impl Into<ParameterValue>) {
        self.parameters.insert(name.to_string(), value.into());
    }

    pub(crate) fn connect(&mut self, port: String, connection: Connection) {
        self.ports.insert(port, connection);
    }

    pub fn get_parameter(&self, name: impl AsRef<str>) -> Option<&ParameterValue> {
        self.parameters.get(name.as_ref())
    }

    pub fn get_port(&self, name: impl AsRef<str>) -> Option<&Connection> {
        self.ports.get(name.as_ref())
    }
}

/// Every instance of a fabric, in creation order, plus the constants driven
/// onto fabric outputs nothing else drives.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Netlist {
    pub instances: IndexMap<String, Instance>,
    pub tieoffs: IndexMap<String, Literal>,
}

impl Netlist {
    pub fn get_instance(&self, name: impl AsRef<str>) -> Option<&Instance> {
        self.instances.get(name.as_ref())
    }

    pub fn instances_of(&self, kind: ComponentKind) -> impl Iterator<Item = &Instance> {
        self.instances.values().filter(move |inst| inst.kind == kind)
    }

    pub(crate) fn add(&mut self, instance: Instance) {
        log::debug!("Instantiating {} {}", instance.kind, instance.name);
        self.instances.insert(instance.name.clone(), instance);
    }

    pub(crate) fn tieoff(&mut self, port: String, literal: Literal) {
        self.tieoffs.insert(port, literal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_words() {
        let words = ParameterValue::Words {
            width: 32,
            values: vec![0x1000_0000, 0x0000_0002],
        };
        assert_eq!(
            words.packed().unwrap(),
            BigUint::from(0x1000_0000_0000_0002u64)
        );
        assert_eq!(ParameterValue::Int(3).packed(), None);
    }
}
