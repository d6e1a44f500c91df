//! Renderings of the Tony CST into data formats other tools understand.

pub mod cbor;
pub mod toml;
pub mod yaml;
