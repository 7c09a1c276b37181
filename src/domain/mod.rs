// Domain layer: request/result models and the engine port. No HTTP types here.

pub mod model;
pub mod ports;
