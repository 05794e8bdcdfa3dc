//! 48-bit hardware address scalar.

use core::fmt;
use core::str::FromStr;

/// A 48-bit hardware (MAC) address.
///
/// Ordered and compared octet by octet, so maps keyed by `MacAddr` iterate in
/// the order the addresses would sort as text.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MacAddr([u8; 6]);

impl MacAddr {
    /// The all-zero address.
    pub const ZERO: MacAddr = MacAddr([0; 6]);

    /// The broadcast address `FF:FF:FF:FF:FF:FF`.
    pub const BROADCAST: MacAddr = MacAddr([0xff; 6]);

    /// Build an address from its six octets.
    #[must_use]
    pub const fn from_bytes(octets: [u8; 6]) -> Self {
        MacAddr(octets)
    }

    /// Build an address from the low 48 bits of `raw`.
    #[must_use]
    pub const fn from_u64(raw: u64) -> Self {
        let b = raw.to_be_bytes();
        MacAddr([b[2], b[3], b[4], b[5], b[6], b[7]])
    }

    /// The six octets, most significant first.
    #[must_use]
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// The address packed into the low 48 bits of a `u64`.
    #[must_use]
    pub const fn to_u64(&self) -> u64 {
        let o = self.0;
        u64::from_be_bytes([0, 0, o[0], o[1], o[2], o[3], o[4], o[5]])
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = self.0;
        write!(
            f,
            "{:02X}:{:02X}:{:02X}:{:02X}:{:02X}:{:02X}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

impl fmt::Debug for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MacAddr({self})")
    }
}

/// Error returned when text is not a `xx:xx:xx:xx:xx:xx` address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacParseError {
    input: String,
}

impl fmt::Display for MacParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid MAC address {:?}", self.input)
    }
}

impl core::error::Error for MacParseError {}

impl FromStr for MacAddr {
    type Err = MacParseError;

    /// Parses six hex octets separated by `:` or `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || MacParseError {
            input: s.to_owned(),
        };
        let mut octets = [0u8; 6];
        let mut parts = s.split([':', '-']);
        for slot in octets.iter_mut() {
            let part = parts.next().ok_or_else(err)?;
            if part.is_empty() || part.len() > 2 {
                return Err(err());
            }
            *slot = u8::from_str_radix(part, 16).map_err(|_| err())?;
        }
        if parts.next().is_some() {
            return Err(err());
        }
        Ok(MacAddr(octets))
    }
}

impl From<[u8; 6]> for MacAddr {
    fn from(octets: [u8; 6]) -> Self {
        MacAddr(octets)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MacAddr {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let mac: MacAddr = "00:1a:2B:3c:4d:5e".parse().unwrap();
        assert_eq!(mac.octets(), [0x00, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e]);
        assert_eq!(mac.to_string(), "00:1A:2B:3C:4D:5E");

        let dashed: MacAddr = "00-1A-2B-3C-4D-5E".parse().unwrap();
        assert_eq!(mac, dashed);
    }

    #[test]
    fn rejects_malformed() {
        for bad in ["", "00:11:22:33:44", "00:11:22:33:44:55:66", "0g:11:22:33:44:55", "001:1:22:33:44:55"] {
            assert!(bad.parse::<MacAddr>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn u64_roundtrip_and_order() {
        let a = MacAddr::from_u64(0x0000_0011_2233_4455);
        assert_eq!(a.to_string(), "00:11:22:33:44:55");
        assert_eq!(a.to_u64(), 0x0011_2233_4455);
        assert!(a < MacAddr::BROADCAST);
        assert!(MacAddr::ZERO < a);
    }
}
