#[cfg(unix)]
use std::ptr::null_mut;

#[cfg(unix)]
use anyhow::bail;

use crate::address::v6::V6Address;
#[cfg(unix)]
use crate::ip::ip_resolver_options::ScopeResolverOptions;

/// Maps an IPv6 address to the scope id (interface index) it lives on.
///
/// Zero means "no scope", which is also the answer when nothing matches.
pub trait ScopeResolver {
    fn scope_id(&self, addr: &V6Address) -> u32;
}

impl<F> ScopeResolver for F
where
    F: Fn(&V6Address) -> u32,
{
    fn scope_id(&self, addr: &V6Address) -> u32 {
        self(addr)
    }
}

/// Resolves scope ids from the local interface list.
///
/// Every call walks the whole `getifaddrs` list, so callers should cache the
/// result; `FullAddress` does.
#[cfg(unix)]
#[derive(Default, Debug, Clone)]
pub struct InterfaceScopeResolver {
    options: ScopeResolverOptions,
}

#[cfg(unix)]
impl InterfaceScopeResolver {
    pub fn new(options: ScopeResolverOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ScopeResolverOptions {
        &self.options
    }
}

#[cfg(unix)]
impl ScopeResolver for InterfaceScopeResolver {
    fn scope_id(&self, addr: &V6Address) -> u32 {
        if self.options.get_link_local_only() && !addr.is_unicast_link_local() {
            tracing::debug!(%addr, "not link local, skipping interface scan");
            return 0;
        }

        match find_interface_scope_id(addr) {
            Ok(Some(scope_id)) => {
                tracing::debug!(%addr, scope_id, "scope id resolved");
                scope_id
            }
            Ok(None) => {
                tracing::debug!(%addr, "no interface carries address");
                0
            }
            Err(err) => {
                tracing::warn!(%addr, error = %err, "interface scan failed");
                0
            }
        }
    }
}

/// Linear scan of the `AF_INET6` interface addresses; the first interface
/// holding `addr` wins.
#[cfg(unix)]
pub fn find_interface_scope_id(addr: &V6Address) -> anyhow::Result<Option<u32>> {
    let mut ifap: *mut libc::ifaddrs = null_mut();
    // SAFETY: ifap is a valid out pointer; on success the list is released
    // by freeifaddrs before returning.
    let rc = unsafe { libc::getifaddrs(&mut ifap) };
    if rc != 0 {
        bail!("getifaddrs: {}", std::io::Error::last_os_error());
    }

    let mut found = None;
    let mut ifa = ifap;
    while !ifa.is_null() {
        // SAFETY: ifa is a non-null node of the list getifaddrs handed us,
        // which stays alive until freeifaddrs below.
        let entry = unsafe { &*ifa };
        if !entry.ifa_addr.is_null() {
            // SAFETY: ifa_addr is non-null and points at a sockaddr owned by
            // the list.
            let family = i32::from(unsafe { (*entry.ifa_addr).sa_family });
            if family == libc::AF_INET6 {
                // SAFETY: AF_INET6 entries point at a sockaddr_in6.
                let in6 = unsafe { &*(entry.ifa_addr as *const libc::sockaddr_in6) };
                if V6Address::from_bytes(in6.sin6_addr.s6_addr) == *addr {
                    found = Some(in6.sin6_scope_id);
                    break;
                }
            }
        }
        ifa = entry.ifa_next;
    }

    // SAFETY: ifap came from a successful getifaddrs and no reference into
    // the list outlives this call.
    unsafe { libc::freeifaddrs(ifap) };
    Ok(found)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn closures_resolve() {
        let resolver = |addr: &V6Address| u32::from(addr.octets()[15]);
        assert_eq!(resolver.scope_id(&V6Address::LOCALHOST), 1);
    }

    #[test]
    fn link_local_only_skips_global_addresses() {
        let resolver =
            InterfaceScopeResolver::new(ScopeResolverOptions::new().link_local_only(true));
        let global = V6Address::parse("2001:db8::1").unwrap();
        assert_eq!(resolver.scope_id(&global), 0);
    }

    fn first_interface_v6_address() -> Option<(V6Address, u32)> {
        let mut ifap: *mut libc::ifaddrs = null_mut();
        if unsafe { libc::getifaddrs(&mut ifap) } != 0 {
            return None;
        }
        let mut first = None;
        let mut ifa = ifap;
        while !ifa.is_null() {
            let entry = unsafe { &*ifa };
            if !entry.ifa_addr.is_null()
                && i32::from(unsafe { (*entry.ifa_addr).sa_family }) == libc::AF_INET6
            {
                let in6 = unsafe { &*(entry.ifa_addr as *const libc::sockaddr_in6) };
                first = Some((V6Address::from_bytes(in6.sin6_addr.s6_addr), in6.sin6_scope_id));
                break;
            }
            ifa = entry.ifa_next;
        }
        unsafe { libc::freeifaddrs(ifap) };
        first
    }

    #[test]
    fn local_address_resolves_to_its_interface() {
        let Some((addr, scope_id)) = first_interface_v6_address() else {
            // host has no IPv6 interface
            return;
        };
        assert_eq!(find_interface_scope_id(&addr).unwrap(), Some(scope_id));
        assert_eq!(InterfaceScopeResolver::default().scope_id(&addr), scope_id);
    }

    #[test]
    fn unknown_address_has_no_scope() {
        // documentation prefix, never assigned to a local interface
        let addr = V6Address::parse("2001:db8:dead:beef::1").unwrap();
        assert_eq!(find_interface_scope_id(&addr).unwrap_or(None), None);
        assert_eq!(InterfaceScopeResolver::default().scope_id(&addr), 0);
    }
}
