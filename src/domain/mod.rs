// Domain layer: values and ports. Concrete HTTP and file access live in core/ and config/.

pub mod model;
pub mod ports;
