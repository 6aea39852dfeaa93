use std::fmt::{Display, Formatter};
use std::net::Ipv4Addr;
use std::ops::BitAnd;
use std::str::FromStr;

use crate::defines::err::{AddressError, AddressResult};
use crate::defines::V4_BYTES_SIZE;

/// IPv4 address held as 4 bytes in network order.
///
/// The integer view returned by [`V4Address::to_bits`] is derived from the
/// bytes on every call, so the two can never disagree. Ordering compares that
/// integer, which is the same as comparing the octets left to right.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct V4Address {
    bytes: [u8; V4_BYTES_SIZE],
}

impl V4Address {
    pub const BYTES_SIZE: usize = V4_BYTES_SIZE;

    pub const UNSPECIFIED: V4Address = V4Address::new(0, 0, 0, 0);
    pub const LOCALHOST: V4Address = V4Address::new(127, 0, 0, 1);
    pub const BROADCAST: V4Address = V4Address::new(255, 255, 255, 255);

    /// Build from octets, e.g. `V4Address::new(192, 168, 0, 1)`.
    pub const fn new(byte1: u8, byte2: u8, byte3: u8, byte4: u8) -> Self {
        Self {
            bytes: [byte1, byte2, byte3, byte4],
        }
    }

    pub const fn from_bytes(bytes: [u8; V4_BYTES_SIZE]) -> Self {
        Self { bytes }
    }

    /// Build from the numeric value of the address: `0xc0a80001` is `192.168.0.1`.
    pub const fn from_bits(bits: u32) -> Self {
        Self {
            bytes: bits.to_be_bytes(),
        }
    }

    /// Build from the 4 bytes as they sit in a host-order `u32`, the way an
    /// `in_addr.s_addr` holds them. On a little-endian host
    /// `192 | 168 << 8 | 1 << 24` is `192.168.0.1`.
    pub const fn from_native_bits(bits: u32) -> Self {
        Self {
            bytes: bits.to_ne_bytes(),
        }
    }

    /// Parse dotted-decimal text (`"a.b.c.d"`).
    pub fn parse(text: &str) -> AddressResult<Self> {
        Ipv4Addr::from_str(text)
            .map(Self::from)
            .map_err(|_| AddressError::InvalidFormat(text.to_string()))
    }

    pub const fn octets(&self) -> [u8; V4_BYTES_SIZE] {
        self.bytes
    }

    pub const fn to_bits(&self) -> u32 {
        u32::from_be_bytes(self.bytes)
    }

    /// Inverse of [`V4Address::from_native_bits`].
    pub const fn to_native_bits(&self) -> u32 {
        u32::from_ne_bytes(self.bytes)
    }

    /// Same address with its 4 bytes swapped end for end.
    pub const fn reverse_order(&self) -> Self {
        Self::from_bits(self.to_bits().swap_bytes())
    }

    pub fn to_std(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.bytes)
    }
}

impl BitAnd for V4Address {
    type Output = V4Address;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::from_bits(self.to_bits() & rhs.to_bits())
    }
}

impl Display for V4Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let [a, b, c, d] = self.bytes;
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

impl FromStr for V4Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for V4Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<V4Address> for String {
    fn from(value: V4Address) -> Self {
        value.to_string()
    }
}

impl From<[u8; V4_BYTES_SIZE]> for V4Address {
    fn from(value: [u8; V4_BYTES_SIZE]) -> Self {
        Self::from_bytes(value)
    }
}

impl From<u32> for V4Address {
    fn from(value: u32) -> Self {
        Self::from_bits(value)
    }
}

impl From<Ipv4Addr> for V4Address {
    fn from(value: Ipv4Addr) -> Self {
        Self::from_bytes(value.octets())
    }
}

impl From<V4Address> for Ipv4Addr {
    fn from(value: V4Address) -> Self {
        value.to_std()
    }
}
