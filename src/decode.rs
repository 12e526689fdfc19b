// SPDX-License-Identifier: Apache-2.0

use crate::Device;

/// Address-decode parameters of one device region: an address selects the
/// region when `addr & match_mask == match_address & match_mask`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Decode {
    pub match_address: u32,
    pub match_mask: u32,
}

impl Decode {
    pub fn new(offset: u32, size: u64) -> Decode {
        Decode {
            match_address: offset,
            match_mask: mask_for_size(size),
        }
    }

    pub fn of(device: &Device) -> Decode {
        Decode::new(device.offset(), device.size())
    }

    pub fn matches(&self, addr: u32) -> bool {
        addr & self.match_mask == self.match_address & self.match_mask
    }

    /// Lowest address of the region.
    pub fn base(&self) -> u32 {
        self.match_address & self.match_mask
    }

    /// Highest address of the region.
    pub fn last(&self) -> u32 {
        self.base() | !self.match_mask
    }

    pub fn overlaps(&self, other: &Decode) -> bool {
        self.base() <= other.last() && other.base() <= self.last()
    }

    /// `true` if the offset has bits set below the region size, which the
    /// multiplexer silently ignores.
    pub fn is_aligned(&self) -> bool {
        self.match_address & !self.match_mask == 0
    }
}

/// `!(size - 1)` truncated to 32 bits. A size of zero wraps to the empty
/// mask, like a 4 GiB region.
pub(crate) fn mask_for_size(size: u64) -> u32 {
    !(size.wrapping_sub(1) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask() {
        assert_eq!(mask_for_size(0x10000), 0xffff_0000);
        assert_eq!(mask_for_size(0x100), 0xffff_ff00);
        assert_eq!(mask_for_size(1), 0xffff_ffff);
        assert_eq!(mask_for_size(1 << 32), 0);
    }

    #[test]
    fn test_matches() {
        let d = Decode::new(0x2000_0000, 0x100);
        assert!(d.matches(0x2000_0000));
        assert!(d.matches(0x2000_00ff));
        assert!(!d.matches(0x2000_0100));
        assert!(!d.matches(0x1fff_ffff));
    }

    #[test]
    fn test_overlaps() {
        let a = Decode::new(0x0000_0000, 0x1_0000);
        let b = Decode::new(0x0000_8000, 0x1000);
        let c = Decode::new(0x0001_0000, 0x1_0000);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert_eq!(a.last(), 0x0000_ffff);
    }

    #[test]
    fn test_alignment() {
        assert!(Decode::new(0x1000, 0x1000).is_aligned());
        assert!(!Decode::new(0x1080, 0x1000).is_aligned());
    }
}
