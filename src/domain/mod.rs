// Domain layer: calendar value types and the ports used to fetch them.

pub mod model;
pub mod ports;
