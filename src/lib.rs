pub mod config;
pub mod games;
pub mod global;
pub mod http;
pub mod lookup;
pub mod trn;
