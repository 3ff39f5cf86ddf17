// Domain layer: value types, wire payloads and ports. No I/O here.

pub mod model;
pub mod ports;
