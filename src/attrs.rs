// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use indexmap::IndexMap;

/// A raw attribute value as handed over by a configuration loader. Numbers
/// may arrive either as integers or as strings (`"0x1000"`, `"4096"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Int(i64),
    String(String),
}

/// Attributes of one entity, in declaration order.
pub type Attrs = IndexMap<String, AttrValue>;

/// Builds an [`Attrs`] map from `(key, value)` pairs.
pub fn attrs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Attrs
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

impl AttrValue {
    /// Interprets this value as a non-negative number. Strings starting with
    /// `0x` are hexadecimal, anything else is decimal.
    pub fn as_number(&self) -> Option<u64> {
        match self {
            AttrValue::Int(v) => u64::try_from(*v).ok(),
            AttrValue::String(s) => {
                let s = s.trim();
                match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
                    Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16).ok(),
                    None => s.replace('_', "").parse().ok(),
                }
            }
        }
    }
}

// Display

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Int(v) => write!(f, "{v}"),
            AttrValue::String(s) => write!(f, "{s}"),
        }
    }
}

// T -> AttrValue

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        AttrValue::Int(v.into())
    }
}

impl From<u32> for AttrValue {
    fn from(v: u32) -> Self {
        AttrValue::Int(v.into())
    }
}

impl From<usize> for AttrValue {
    fn from(v: usize) -> Self {
        match i64::try_from(v) {
            Ok(v) => AttrValue::Int(v),
            Err(_) => AttrValue::String(v.to_string()),
        }
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::String(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::String(v.to_owned())
    }
}
