use std::mem;

use libc::{in6_addr, in_addr, sa_family_t, sockaddr_in, sockaddr_in6, AF_INET, AF_INET6};

use crate::address::full_address::FullAddress;
use crate::address::ip_address::Address;
use crate::address::v4::V4Address;
use crate::address::v6::V6Address;

// `s_addr` holds the address bytes in network order, so its host-order
// integer value is the bytes read in native endianness.
pub fn v4_to_in_addr(addr: &V4Address) -> in_addr {
    in_addr {
        s_addr: addr.to_native_bits(),
    }
}

pub fn v4_from_in_addr(addr: &in_addr) -> V4Address {
    V4Address::from_native_bits(addr.s_addr)
}

pub fn v6_to_in6_addr(addr: &V6Address) -> in6_addr {
    // SAFETY: in6_addr is plain old data, all-zero is a valid value.
    let mut out: in6_addr = unsafe { mem::zeroed() };
    out.s6_addr = addr.octets();
    out
}

pub fn v6_from_in6_addr(addr: &in6_addr) -> V6Address {
    V6Address::from_bytes(addr.s6_addr)
}

pub fn make_sockaddr_in(addr: &V4Address, port: u16) -> sockaddr_in {
    // SAFETY: sockaddr_in is plain old data; zeroing also clears sin_zero
    // and, where present, sin_len.
    let mut out: sockaddr_in = unsafe { mem::zeroed() };
    out.sin_family = AF_INET as sa_family_t;
    out.sin_port = port.to_be();
    out.sin_addr = v4_to_in_addr(addr);
    out
}

pub fn make_sockaddr_in6(addr: &V6Address, port: u16, scope_id: u32) -> sockaddr_in6 {
    // SAFETY: as above; flowinfo stays 0.
    let mut out: sockaddr_in6 = unsafe { mem::zeroed() };
    out.sin6_family = AF_INET6 as sa_family_t;
    out.sin6_port = port.to_be();
    out.sin6_addr = v6_to_in6_addr(addr);
    out.sin6_scope_id = scope_id;
    out
}

pub fn full_address_from_sockaddr_in(addr: &sockaddr_in) -> FullAddress {
    FullAddress::new(
        Address::V4(v4_from_in_addr(&addr.sin_addr)),
        u16::from_be(addr.sin_port),
    )
}

pub fn full_address_from_sockaddr_in6(addr: &sockaddr_in6) -> FullAddress {
    FullAddress::new(
        Address::V6(v6_from_in6_addr(&addr.sin6_addr)),
        u16::from_be(addr.sin6_port),
    )
    .with_scope_id(addr.sin6_scope_id)
}

impl From<in_addr> for V4Address {
    fn from(value: in_addr) -> Self {
        v4_from_in_addr(&value)
    }
}

impl From<V4Address> for in_addr {
    fn from(value: V4Address) -> Self {
        v4_to_in_addr(&value)
    }
}

impl From<in6_addr> for V6Address {
    fn from(value: in6_addr) -> Self {
        v6_from_in6_addr(&value)
    }
}

impl From<V6Address> for in6_addr {
    fn from(value: V6Address) -> Self {
        v6_to_in6_addr(&value)
    }
}

impl From<in_addr> for Address {
    fn from(value: in_addr) -> Self {
        Address::V4(v4_from_in_addr(&value))
    }
}

impl From<in6_addr> for Address {
    fn from(value: in6_addr) -> Self {
        Address::V6(v6_from_in6_addr(&value))
    }
}

impl From<sockaddr_in> for FullAddress {
    fn from(value: sockaddr_in) -> Self {
        full_address_from_sockaddr_in(&value)
    }
}

impl From<sockaddr_in6> for FullAddress {
    fn from(value: sockaddr_in6) -> Self {
        full_address_from_sockaddr_in6(&value)
    }
}

impl Address {
    /// `in_addr` of the first 4 storage bytes, whatever the version.
    pub fn to_native_v4(&self) -> in_addr {
        v4_to_in_addr(&self.reinterpret_v4())
    }

    /// `in6_addr` of all 16 storage bytes, whatever the version.
    pub fn to_native_v6(&self) -> in6_addr {
        v6_to_in6_addr(&self.reinterpret_v6())
    }
}
