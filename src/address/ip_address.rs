use std::fmt::{Display, Formatter};
use std::net::IpAddr;
use std::ops::BitAnd;
use std::str::FromStr;

use crate::address::v4::V4Address;
use crate::address::v6::V6Address;
use crate::defines::err::{AddressError, AddressResult};
use crate::defines::{V4_BYTES_SIZE, V6_BYTES_SIZE};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Version {
    V4,
    V6,
    #[default]
    None,
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Version::V4 => f.write_str("v4"),
            Version::V6 => f.write_str("v6"),
            Version::None => f.write_str("none"),
        }
    }
}

/// An IPv4 or IPv6 address, or nothing.
///
/// Equality and ordering both look at the version first: every `V4` sorts
/// before every `V6`, and `Unset` sorts last. Two addresses of different
/// versions are never equal, even when their storage bytes coincide.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub enum Address {
    V4(V4Address),
    V6(V6Address),
    #[default]
    Unset,
}

impl Address {
    /// Parse `"127.0.0.1"` or `"fe80::23a1:b152"`.
    ///
    /// Text containing a `':'` goes to the IPv6 parser, anything else to the
    /// IPv4 parser. There is no fallback from one to the other. Text that
    /// fails to parse gives [`Address::Unset`]; use [`Address::try_parse`] to
    /// get the error instead.
    pub fn parse(text: &str) -> Self {
        Self::try_parse(text).unwrap_or_else(|err| {
            tracing::trace!(%err, "address text rejected");
            Address::Unset
        })
    }

    pub fn try_parse(text: &str) -> AddressResult<Self> {
        if text.contains(':') {
            V6Address::parse(text).map(Address::V6)
        } else {
            V4Address::parse(text).map(Address::V4)
        }
    }

    pub fn version(&self) -> Version {
        match self {
            Address::V4(_) => Version::V4,
            Address::V6(_) => Version::V6,
            Address::Unset => Version::None,
        }
    }

    pub fn is_v4(&self) -> bool {
        matches!(self, Address::V4(_))
    }

    pub fn is_v6(&self) -> bool {
        matches!(self, Address::V6(_))
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Address::Unset)
    }

    pub fn as_v4(&self) -> Option<V4Address> {
        match self {
            Address::V4(addr) => Some(*addr),
            _ => None,
        }
    }

    pub fn as_v6(&self) -> Option<V6Address> {
        match self {
            Address::V6(addr) => Some(*addr),
            _ => None,
        }
    }

    /// 16 byte storage view. An IPv4 address fills the first 4 bytes and
    /// leaves the rest zero; `Unset` is all zero.
    pub fn octets(&self) -> [u8; V6_BYTES_SIZE] {
        match self {
            Address::V4(addr) => {
                let mut bytes = [0u8; V6_BYTES_SIZE];
                bytes[..V4_BYTES_SIZE].copy_from_slice(&addr.octets());
                bytes
            }
            Address::V6(addr) => addr.octets(),
            Address::Unset => [0u8; V6_BYTES_SIZE],
        }
    }

    /// Read the first 4 storage bytes as an IPv4 address, whatever the
    /// version. This is a raw reinterpretation: an IPv6 address yields its
    /// leading bytes, not an IPv4-mapped translation. Check
    /// [`Address::version`] or use [`Address::as_v4`] instead when the
    /// version matters.
    pub fn reinterpret_v4(&self) -> V4Address {
        let bytes = self.octets();
        V4Address::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Read all 16 storage bytes as an IPv6 address, whatever the version.
    pub fn reinterpret_v6(&self) -> V6Address {
        V6Address::from_bytes(self.octets())
    }

    /// Bitwise AND of two addresses of the same version.
    pub fn try_bitand(&self, other: &Address) -> AddressResult<Address> {
        match (self, other) {
            (Address::V4(lhs), Address::V4(rhs)) => Ok(Address::V4(*lhs & *rhs)),
            (Address::V6(lhs), Address::V6(rhs)) => Ok(Address::V6(*lhs & *rhs)),
            (Address::Unset, Address::Unset) => Ok(Address::Unset),
            _ => Err(AddressError::VersionMismatch {
                left: self.version(),
                right: other.version(),
            }),
        }
    }

    pub fn reverse_order(&self) -> Address {
        match self {
            Address::V4(addr) => Address::V4(addr.reverse_order()),
            Address::V6(addr) => Address::V6(addr.reverse_order()),
            Address::Unset => Address::Unset,
        }
    }

    pub fn to_std(&self) -> Option<IpAddr> {
        match self {
            Address::V4(addr) => Some(IpAddr::V4(addr.to_std())),
            Address::V6(addr) => Some(IpAddr::V6(addr.to_std())),
            Address::Unset => None,
        }
    }
}

/// Fill `address` from `text` and report whether it came out set.
pub fn string_to_address(text: &str, address: &mut Address) -> bool {
    *address = Address::parse(text);
    !address.is_unset()
}

/// Mismatched versions give [`Address::Unset`]; see [`Address::try_bitand`].
impl BitAnd for Address {
    type Output = Address;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.try_bitand(&rhs).unwrap_or_else(|err| {
            tracing::trace!(%err, "address mask dropped");
            Address::Unset
        })
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Address::V4(addr) => Display::fmt(addr, f),
            Address::V6(addr) => Display::fmt(addr, f),
            Address::Unset => Ok(()),
        }
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Ok(Address::Unset);
        }
        Self::try_parse(&value)
    }
}

impl From<Address> for String {
    fn from(value: Address) -> Self {
        value.to_string()
    }
}

impl From<V4Address> for Address {
    fn from(value: V4Address) -> Self {
        Address::V4(value)
    }
}

impl From<V6Address> for Address {
    fn from(value: V6Address) -> Self {
        Address::V6(value)
    }
}

impl From<IpAddr> for Address {
    fn from(value: IpAddr) -> Self {
        match value {
            IpAddr::V4(addr) => Address::V4(addr.into()),
            IpAddr::V6(addr) => Address::V6(addr.into()),
        }
    }
}
