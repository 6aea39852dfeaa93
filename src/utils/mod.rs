#[cfg(unix)]
pub mod sock_utils;
