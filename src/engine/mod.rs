// Engine modules: frame clock, assets, input, renderer

pub mod assets;
pub mod clock;
pub mod input;
pub mod renderer;
