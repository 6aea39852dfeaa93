use std::fmt::{Display, Formatter};
use std::net::Ipv6Addr;
use std::ops::BitAnd;
use std::str::FromStr;

use crate::defines::err::{AddressError, AddressResult};
use crate::defines::{V6_BYTES_SIZE, V6_DWORD_SIZE, V6_QWORD_SIZE};

/// IPv6 address held as 16 bytes in network order.
///
/// The dword and qword views are conversions over the byte buffer. Every
/// word is read and written big-endian, so the first qword always covers
/// bytes `0..8` and ordering by qwords matches ordering by bytes.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct V6Address {
    bytes: [u8; V6_BYTES_SIZE],
}

impl V6Address {
    pub const BYTES_SIZE: usize = V6_BYTES_SIZE;
    pub const DWORD_SIZE: usize = V6_DWORD_SIZE;
    pub const QWORD_SIZE: usize = V6_QWORD_SIZE;

    pub const UNSPECIFIED: V6Address = V6Address::from_bytes([0; V6_BYTES_SIZE]);
    pub const LOCALHOST: V6Address = V6Address::from_qwords([0, 1]);

    pub const fn from_bytes(bytes: [u8; V6_BYTES_SIZE]) -> Self {
        Self { bytes }
    }

    pub const fn from_qwords(qwords: [u64; V6_QWORD_SIZE]) -> Self {
        let high = qwords[0].to_be_bytes();
        let low = qwords[1].to_be_bytes();
        let mut bytes = [0u8; V6_BYTES_SIZE];
        let mut i = 0;
        while i < 8 {
            bytes[i] = high[i];
            bytes[i + 8] = low[i];
            i += 1;
        }
        Self { bytes }
    }

    pub fn from_dwords(dwords: [u32; V6_DWORD_SIZE]) -> Self {
        let mut bytes = [0u8; V6_BYTES_SIZE];
        for (chunk, dword) in bytes.chunks_exact_mut(4).zip(dwords) {
            chunk.copy_from_slice(&dword.to_be_bytes());
        }
        Self { bytes }
    }

    /// Parse RFC 4291 text, including `::` runs and dotted IPv4 tails.
    pub fn parse(text: &str) -> AddressResult<Self> {
        Ipv6Addr::from_str(text)
            .map(Self::from)
            .map_err(|_| AddressError::InvalidFormat(text.to_string()))
    }

    pub const fn octets(&self) -> [u8; V6_BYTES_SIZE] {
        self.bytes
    }

    pub fn to_dwords(&self) -> [u32; V6_DWORD_SIZE] {
        let mut dwords = [0u32; V6_DWORD_SIZE];
        for (dword, chunk) in dwords.iter_mut().zip(self.bytes.chunks_exact(4)) {
            *dword = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        dwords
    }

    pub fn to_qwords(&self) -> [u64; V6_QWORD_SIZE] {
        let (high, low) = self.bytes.split_at(8);
        let mut high_bytes = [0u8; 8];
        let mut low_bytes = [0u8; 8];
        high_bytes.copy_from_slice(high);
        low_bytes.copy_from_slice(low);
        [u64::from_be_bytes(high_bytes), u64::from_be_bytes(low_bytes)]
    }

    pub fn segments(&self) -> [u16; 8] {
        self.to_std().segments()
    }

    /// Same address with its 16 bytes in reverse sequence.
    pub fn reverse_order(&self) -> Self {
        let [high, low] = self.to_qwords();
        Self::from_qwords([low.swap_bytes(), high.swap_bytes()])
    }

    /// `fe80::/10`
    pub fn is_unicast_link_local(&self) -> bool {
        self.bytes[0] == 0xfe && (self.bytes[1] & 0xc0) == 0x80
    }

    pub fn to_std(&self) -> Ipv6Addr {
        Ipv6Addr::from(self.bytes)
    }
}

impl PartialOrd for V6Address {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for V6Address {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.to_qwords().cmp(&other.to_qwords())
    }
}

impl BitAnd for V6Address {
    type Output = V6Address;

    fn bitand(self, rhs: Self) -> Self::Output {
        let [lhs_high, lhs_low] = self.to_qwords();
        let [rhs_high, rhs_low] = rhs.to_qwords();
        Self::from_qwords([lhs_high & rhs_high, lhs_low & rhs_low])
    }
}

/// RFC 5952 text, e.g. `2607:f2c0:f00f:b001::face:b00c`.
impl Display for V6Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.to_std(), f)
    }
}

impl FromStr for V6Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for V6Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<V6Address> for String {
    fn from(value: V6Address) -> Self {
        value.to_string()
    }
}

impl From<[u8; V6_BYTES_SIZE]> for V6Address {
    fn from(value: [u8; V6_BYTES_SIZE]) -> Self {
        Self::from_bytes(value)
    }
}

impl From<[u32; V6_DWORD_SIZE]> for V6Address {
    fn from(value: [u32; V6_DWORD_SIZE]) -> Self {
        Self::from_dwords(value)
    }
}

impl From<[u64; V6_QWORD_SIZE]> for V6Address {
    fn from(value: [u64; V6_QWORD_SIZE]) -> Self {
        Self::from_qwords(value)
    }
}

impl From<Ipv6Addr> for V6Address {
    fn from(value: Ipv6Addr) -> Self {
        Self::from_bytes(value.octets())
    }
}

impl From<V6Address> for Ipv6Addr {
    fn from(value: V6Address) -> Self {
        value.to_std()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACEBOOC: [u8; 16] = [
        0x26, 0x07, 0xf2, 0xc0, 0xf0, 0x0f, 0xb0, 0x01, 0x00, 0x00, 0x00, 0x00, 0xfa, 0xce, 0xb0,
        0x0c,
    ];

    #[test]
    fn views_share_storage() {
        let addr = V6Address::from_bytes(FACEBOOC);
        assert_eq!(addr.to_qwords(), [0x2607_f2c0_f00f_b001, 0x0000_0000_face_b00c]);
        assert_eq!(addr.to_dwords(), [0x2607_f2c0, 0xf00f_b001, 0, 0xface_b00c]);
        assert_eq!(V6Address::from_qwords(addr.to_qwords()), addr);
        assert_eq!(V6Address::from_dwords(addr.to_dwords()), addr);
        assert_eq!(addr.segments()[7], 0xb00c);
    }

    #[test]
    fn format_from_bytes() {
        let addr = V6Address::from_bytes(FACEBOOC);
        assert_eq!(addr.to_string(), "2607:f2c0:f00f:b001::face:b00c");
    }

    #[test]
    fn reverse_order() {
        let addr = V6Address::parse("fe80::23a1:b152").unwrap();
        assert_eq!(addr.to_string(), "fe80::23a1:b152");
        assert_eq!(addr.reverse_order().to_string(), "52b1:a123::80fe");

        let mut reversed = addr.octets();
        reversed.reverse();
        assert_eq!(addr.reverse_order().octets(), reversed);
    }

    #[test]
    fn ordering() {
        let low = V6Address::parse("fe80::23a1:b152").unwrap();
        let high = V6Address::parse("fe80::23a1:b153").unwrap();
        assert!(low < high);
        assert_ne!(low, high);
        // high qword decides before low qword
        assert!(V6Address::parse("::ffff:ffff:ffff:ffff").unwrap() < V6Address::parse("0:0:0:1::").unwrap());
    }

    #[test]
    fn link_local() {
        assert!(V6Address::parse("fe80::1").unwrap().is_unicast_link_local());
        assert!(V6Address::parse("febf::1").unwrap().is_unicast_link_local());
        assert!(!V6Address::parse("fec0::1").unwrap().is_unicast_link_local());
        assert!(!V6Address::LOCALHOST.is_unicast_link_local());
    }

    #[test]
    fn rejects_malformed_text() {
        for text in ["", ":", "1:2:3:4:5:6:7:8:9", "fe80:::1", "1::2::3", "g::1", "192.168.0.1", "fe80::1%eth0"] {
            assert!(V6Address::parse(text).is_err(), "{text:?} should not parse");
        }
    }
}
