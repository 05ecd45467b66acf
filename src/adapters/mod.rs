// Adapters layer: concrete renderers that listen to the cart.

pub mod display;
