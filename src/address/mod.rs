pub mod full_address;
pub mod ip_address;
pub mod v4;
pub mod v6;

pub use full_address::FullAddress;
pub use ip_address::{string_to_address, Address, Version};
pub use v4::V4Address;
pub use v6::V6Address;
