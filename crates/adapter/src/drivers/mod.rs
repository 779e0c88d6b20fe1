pub mod frame_host;
pub mod http;
