// Domain layer: models and the filesystem port. No knowledge of concrete stores.

pub mod model;
pub mod ports;
