// Domain layer: records and ports. Concrete page, store and source
// implementations live under adapters.

pub mod model;
pub mod ports;
