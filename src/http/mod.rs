// HTTP module - Log file endpoint over HTTP

mod range;
mod server;

pub use range::{parse_range, ByteRange};
pub use server::{router, LogFileServer};
