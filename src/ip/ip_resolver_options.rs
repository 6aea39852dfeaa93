#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeResolverOptions {
    link_local_only: bool,
}

impl ScopeResolverOptions {
    pub fn new() -> Self {
        Self {
            link_local_only: false,
        }
    }

    /// Only scan interfaces for `fe80::/10` addresses; every other address
    /// resolves to scope id 0 without touching the interface list.
    pub fn link_local_only(mut self, link_local_only: bool) -> Self {
        self.link_local_only = link_local_only;
        self
    }

    pub fn get_link_local_only(&self) -> bool {
        self.link_local_only
    }
}
