//! examples of usage of RustedLorenz
/// Lorenz attractor examples: plain, multicolor, task driven, non-canonical
/// parameters
pub mod lorenz_examples;
