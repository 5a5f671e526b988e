/// the Lorenz system right-hand side and its parameters
pub mod lorenz_system;
/// fixed-step explicit Euler IVP solver with plotting, logging and run
/// statistics on board
pub mod Euler_api;
/// parse task documents into Euler solver settings and postprocessing actions
pub mod task_parser_euler;
