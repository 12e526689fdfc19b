// SPDX-License-Identifier: Apache-2.0

use std::sync::LazyLock;

use regex::Regex;

use crate::{FabricError, Result};

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Checks that `name` can be embedded in an HDL identifier.
pub(crate) fn check_identifier(what: &'static str, name: &str) -> Result<()> {
    if is_identifier(name) {
        Ok(())
    } else {
        Err(FabricError::InvalidName {
            what,
            name: name.to_string(),
        })
    }
}

pub(crate) fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers() {
        assert!(is_identifier("wb_cpu_adr_i"));
        assert!(is_identifier("_x0"));
        assert!(!is_identifier("0cpu"));
        assert!(!is_identifier("cpu-0"));
        assert!(!is_identifier(""));
        assert!(check_identifier("host", "a b").is_err());
    }
}
