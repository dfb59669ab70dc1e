pub mod http;
pub mod notion;
