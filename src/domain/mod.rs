// Domain layer: lead records and the ports the pipelines drive.

pub mod model;
pub mod ports;
