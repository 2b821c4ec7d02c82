// Domain layer: core models and ports (interfaces) shared by readers, adapters and the CLI.

pub mod model;
pub mod ports;
