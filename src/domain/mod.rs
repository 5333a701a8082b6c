// Domain layer: request/response models and the remote converter port.

pub mod model;
pub mod ports;
