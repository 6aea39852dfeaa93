use crate::address::Version;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid address format: {0:?}")]
    InvalidFormat(String),
    #[error("address version mismatch: {left} & {right}")]
    VersionMismatch { left: Version, right: Version },
}

pub type AddressResult<T> = Result<T, AddressError>;
