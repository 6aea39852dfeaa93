pub mod err;

pub const V4_BYTES_SIZE: usize = 4;
pub const V6_BYTES_SIZE: usize = 16;
pub const V6_DWORD_SIZE: usize = 4;
pub const V6_QWORD_SIZE: usize = 2;

