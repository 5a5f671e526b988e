#![allow(non_snake_case)]
use RustedLorenz::Examples::lorenz_examples::lorenz_examples;

fn main() {
    // 0 - classical attractor, single color
    // 1 - multicolor attractor with a time progression color bar
    // 2 - run configured from a task document
    // 3 - non-canonical parameters (rho below the chaotic regime)
    let example = 1;
    lorenz_examples(example);
}
