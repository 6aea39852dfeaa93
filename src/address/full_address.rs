use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::net::{SocketAddr, SocketAddrV4, SocketAddrV6};
use std::str::FromStr;

use crate::address::ip_address::Address;
use crate::defines::err::{AddressError, AddressResult};
#[cfg(unix)]
use crate::ip::ip_resolver::InterfaceScopeResolver;
use crate::ip::ip_resolver::ScopeResolver;
#[cfg(unix)]
use crate::utils::sock_utils::{make_sockaddr_in, make_sockaddr_in6};

/// IP address plus port.
///
/// The port is kept in host order; conversion to network order happens only
/// when building native socket structures. The IPv6 scope id is looked up at
/// most once per value and cached here. The cache takes no part in equality,
/// ordering or hashing, and is dropped whenever the address or port changes.
#[derive(Default, Debug, Clone, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", try_from = "String")
)]
pub struct FullAddress {
    address: Address,
    port: u16,
    scope_id: Option<u32>,
}

impl FullAddress {
    pub fn new(address: Address, port: u16) -> Self {
        Self {
            address,
            port,
            scope_id: None,
        }
    }

    /// Parse the `Display` form back. The port follows the last `':'`, so
    /// unbracketed IPv6 text such as `fe80::1:8080` splits as `fe80::1`
    /// and `8080`.
    pub fn try_parse(text: &str) -> AddressResult<Self> {
        let invalid = || AddressError::InvalidFormat(text.to_string());
        let (addr_text, port_text) = text.rsplit_once(':').ok_or_else(invalid)?;
        if port_text.is_empty() || !port_text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let port = port_text.parse::<u16>().map_err(|_| invalid())?;
        let address = if addr_text.is_empty() {
            Address::Unset
        } else {
            Address::try_parse(addr_text).map_err(|_| invalid())?
        };
        Ok(Self::new(address, port))
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn set_address(&mut self, address: Address) {
        self.address = address;
        self.scope_id = None;
    }

    pub fn set_port(&mut self, port: u16) {
        self.port = port;
        self.scope_id = None;
    }

    pub fn cached_scope_id(&self) -> Option<u32> {
        self.scope_id
    }

    /// Scope id of the address, asking `resolver` on first use only.
    /// Anything but an IPv6 address has scope 0.
    pub fn scope_id(&mut self, resolver: &impl ScopeResolver) -> u32 {
        if let Some(scope_id) = self.scope_id {
            return scope_id;
        }
        let scope_id = match self.address.as_v6() {
            Some(addr) => resolver.scope_id(&addr),
            None => 0,
        };
        self.scope_id = Some(scope_id);
        scope_id
    }

    pub(crate) fn with_scope_id(mut self, scope_id: u32) -> Self {
        self.scope_id = Some(scope_id);
        self
    }

    /// `None` for an unset address. IPv6 carries the cached scope id, or 0.
    pub fn to_socket_addr(&self) -> Option<SocketAddr> {
        match self.address {
            Address::V4(addr) => Some(SocketAddr::V4(SocketAddrV4::new(addr.to_std(), self.port))),
            Address::V6(addr) => Some(SocketAddr::V6(SocketAddrV6::new(
                addr.to_std(),
                self.port,
                0,
                self.scope_id.unwrap_or(0),
            ))),
            Address::Unset => None,
        }
    }

    /// `sockaddr_in` built from the first 4 storage bytes of the address,
    /// whatever its version.
    #[cfg(unix)]
    pub fn to_native_v4(&self) -> libc::sockaddr_in {
        make_sockaddr_in(&self.address.reinterpret_v4(), self.port)
    }

    /// `sockaddr_in6` with the scope id found on the local interfaces.
    #[cfg(unix)]
    pub fn to_native_v6(&mut self) -> libc::sockaddr_in6 {
        self.to_native_v6_with(&InterfaceScopeResolver::default())
    }

    #[cfg(unix)]
    pub fn to_native_v6_with(&mut self, resolver: &impl ScopeResolver) -> libc::sockaddr_in6 {
        let scope_id = self.scope_id(resolver);
        make_sockaddr_in6(&self.address.reinterpret_v6(), self.port, scope_id)
    }
}

impl PartialEq for FullAddress {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address && self.port == other.port
    }
}

impl Eq for FullAddress {}

impl PartialOrd for FullAddress {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FullAddress {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.address, self.port).cmp(&(&other.address, other.port))
    }
}

impl Hash for FullAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
        self.port.hash(state);
    }
}

/// `192.168.0.1:80`, `fe80::1:80`. IPv6 is not bracketed.
impl Display for FullAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.address, self.port)
    }
}

impl FromStr for FullAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s)
    }
}

impl TryFrom<String> for FullAddress {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_parse(&value)
    }
}

impl From<FullAddress> for String {
    fn from(value: FullAddress) -> Self {
        value.to_string()
    }
}

impl From<(Address, u16)> for FullAddress {
    fn from((address, port): (Address, u16)) -> Self {
        Self::new(address, port)
    }
}

impl From<SocketAddr> for FullAddress {
    fn from(value: SocketAddr) -> Self {
        match value {
            SocketAddr::V4(addr) => Self::new(Address::V4((*addr.ip()).into()), addr.port()),
            SocketAddr::V6(addr) => Self::new(Address::V6((*addr.ip()).into()), addr.port())
                .with_scope_id(addr.scope_id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn display() {
        let v4 = FullAddress::new(Address::parse("192.168.0.1"), 8080);
        assert_eq!(v4.to_string(), "192.168.0.1:8080");
        let v6 = FullAddress::new(Address::parse("fe80::23a1:b152"), 443);
        assert_eq!(v6.to_string(), "fe80::23a1:b152:443");
        assert_eq!(FullAddress::default().to_string(), ":0");
    }

    #[test]
    fn parse_splits_on_last_colon() {
        let full = FullAddress::try_parse("fe80::23a1:b152:443").unwrap();
        assert_eq!(full.address(), &Address::parse("fe80::23a1:b152"));
        assert_eq!(full.port(), 443);
        assert_eq!(FullAddress::try_parse(":0").unwrap(), FullAddress::default());
        assert!(FullAddress::try_parse("192.168.0.1").is_err());
        assert!(FullAddress::try_parse("192.168.0.1:65536").is_err());
        assert!(FullAddress::try_parse("192.168.0:80").is_err());
    }

    #[test]
    fn port_must_be_plain_digits() {
        for text in ["1.2.3.4:+80", "1.2.3.4:-80", "1.2.3.4: 80", "1.2.3.4:", "1.2.3.4:0x50"] {
            assert!(FullAddress::try_parse(text).is_err(), "{text:?} should not parse");
        }
        assert_eq!(FullAddress::try_parse("1.2.3.4:080").unwrap().port(), 80);
    }

    #[test]
    fn ordering_is_address_then_port() {
        let a = FullAddress::new(Address::parse("10.0.0.1"), 9000);
        let b = FullAddress::new(Address::parse("10.0.0.2"), 80);
        let c = FullAddress::new(Address::parse("10.0.0.2"), 81);
        assert!(a < b);
        assert!(b < c);
        assert_eq!(b, FullAddress::new(Address::parse("10.0.0.2"), 80));
    }

    #[test]
    fn scope_id_is_computed_once() {
        let calls = Cell::new(0);
        let resolver = |_: &crate::V6Address| -> u32 {
            calls.set(calls.get() + 1);
            7
        };
        let mut full = FullAddress::new(Address::parse("fe80::1"), 80);
        assert_eq!(full.cached_scope_id(), None);
        assert_eq!(full.scope_id(&resolver), 7);
        assert_eq!(full.scope_id(&resolver), 7);
        assert_eq!(calls.get(), 1);
        assert_eq!(full.cached_scope_id(), Some(7));

        full.set_port(81);
        assert_eq!(full.cached_scope_id(), None);
        assert_eq!(full.scope_id(&resolver), 7);
        assert_eq!(calls.get(), 2);

        full.set_address(Address::parse("fe80::2"));
        assert_eq!(full.cached_scope_id(), None);
    }

    #[test]
    fn v4_has_no_scope() {
        let resolver = |_: &crate::V6Address| -> u32 { panic!("v4 must not be resolved") };
        let mut full = FullAddress::new(Address::parse("127.0.0.1"), 80);
        assert_eq!(full.scope_id(&resolver), 0);
    }

    #[test]
    fn cache_does_not_affect_equality() {
        let plain = FullAddress::new(Address::parse("fe80::1"), 80);
        let cached = plain.with_scope_id(3);
        assert_eq!(plain, cached);
        assert_eq!(plain.cmp(&cached), Ordering::Equal);
    }

    #[test]
    fn socket_addr_conversions() {
        let sock = SocketAddr::V6(SocketAddrV6::new("fe80::1".parse().unwrap(), 5353, 0, 4));
        let full = FullAddress::from(sock);
        assert_eq!(full.to_string(), "fe80::1:5353");
        assert_eq!(full.cached_scope_id(), Some(4));
        assert_eq!(full.to_socket_addr(), Some(sock));

        let sock: SocketAddr = "192.168.0.1:80".parse().unwrap();
        assert_eq!(FullAddress::from(sock).to_socket_addr(), Some(sock));
        assert_eq!(FullAddress::default().to_socket_addr(), None);
    }
}
