// Domain layer: catalog entries, the cart aggregate, and the ports it talks through.

pub mod cart;
pub mod model;
pub mod ports;
