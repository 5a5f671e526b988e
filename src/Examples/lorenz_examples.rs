// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use crate::Utils::colormaps::TimeColorMap;
use crate::numerical::Euler_api::EulerODE;
use crate::numerical::lorenz_system::{LorenzParameters, canonical_initial_state, lorenz_values};

pub fn lorenz_examples(example: usize) {
    match example {
        0 => {
            // the textbook attractor: classical parameters, 10000 Euler steps
            // of 0.01, one royal blue curve
            let params = LorenzParameters::default();
            let mut solver = EulerODE::new(
                params.rhs(),
                lorenz_values(),
                "t".to_string(),
                0.0,
                canonical_initial_state(),
                0.01,
                10000,
            );
            solver.solve().unwrap();
            let (t_result, y_result) = solver.get_result();
            println!("{} points computed", t_result.len());
            println!("final state: {:?}", y_result.row(y_result.nrows() - 1));
            solver.plot_result(None);
        }

        1 => {
            // same trajectory, but each segment colored by normalized time
            // progression with a color bar on the right
            let params = LorenzParameters::default();
            let mut solver = EulerODE::new(
                params.rhs(),
                lorenz_values(),
                "t".to_string(),
                0.0,
                canonical_initial_state(),
                0.01,
                10000,
            );
            solver.solve().unwrap();
            solver.plot_result_multicolor(TimeColorMap::Plasma, None);
        }

        2 => {
            // the whole run driven by a task document: parameters, solver
            // settings and postprocessing all come from the parsed text
            let task = "lorenz_params sigma: 10.0 rho: 28.0 beta: 2.6666666666666665\n\
                        initial_state x0: 0.0 y0: 1.0 z0: 1.05\n\
                        solver_settings dt: 0.01 num_steps: 10000 loglevel: info\n\
                        postprocessing plot: true multicolor: true colormap: viridis filename: lorenz_from_task";
            let mut solver = EulerODE::default_lorenz();
            let parser = solver.parse_settings_from_str(task).unwrap();
            solver.solve().unwrap();
            solver.set_postprocessing_from_hashmap(&parser).unwrap();
        }

        3 => {
            // below the first Hopf bifurcation the attractor collapses onto a
            // fixed point; rho = 14 gives a spiral instead of the butterfly
            let params = LorenzParameters::new(10.0, 14.0, 8.0 / 3.0);
            let mut solver = EulerODE::new(
                params.rhs(),
                lorenz_values(),
                "t".to_string(),
                0.0,
                canonical_initial_state(),
                0.01,
                10000,
            );
            solver.solve().unwrap();
            solver.plot_result(Some("lorenz_spiral_rho14.png".to_string()));
        }

        _ => {
            println!("example {} not implemented", example);
        }
    }
}
