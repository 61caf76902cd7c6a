pub mod docbin;

pub use docbin::{DocBin, FORMAT_VERSION, MAGIC, write_bytes};
