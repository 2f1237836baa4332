// Domain layer: models and ports shared by the tools.

pub mod model;
pub mod ports;
