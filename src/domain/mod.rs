// Domain layer: records and ports. Concrete I/O lives in adapters.

pub mod model;
pub mod ports;
