pub mod ip_resolver;
pub mod ip_resolver_options;

pub use ip_resolver::ScopeResolver;
#[cfg(unix)]
pub use ip_resolver::InterfaceScopeResolver;
pub use ip_resolver_options::ScopeResolverOptions;
