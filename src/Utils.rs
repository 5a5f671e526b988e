//! different utility modules used throughout the project
/// tiny module to map normalized time progression into colors
pub mod colormaps;
/// tiny module to plot the trajectory of the computation in 3d
pub mod plots;
/// parse document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" into HashMap
pub mod task_parser;
