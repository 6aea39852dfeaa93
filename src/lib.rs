//! IPv4 and IPv6 address value types.
//!
//! [`V4Address`] and [`V6Address`] hold fixed-width addresses in network
//! byte order and convert to and from canonical text (dotted decimal and
//! RFC 5952). [`Address`] tags one of them, or nothing, and dispatches to the
//! active version. [`FullAddress`] adds a port. On unix the types convert to
//! and from the `libc` socket structures, see [`utils::sock_utils`].

pub mod address;
pub mod defines;
pub mod ip;
pub mod utils;

pub use address::{string_to_address, Address, FullAddress, V4Address, V6Address, Version};
pub use defines::err::{AddressError, AddressResult};
pub use ip::{ScopeResolver, ScopeResolverOptions};
#[cfg(unix)]
pub use ip::InterfaceScopeResolver;
