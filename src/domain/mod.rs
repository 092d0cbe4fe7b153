// Domain layer: cart models and the ports the manager talks through.

pub mod model;
pub mod ports;
