//! Task parser binding for the Euler solver.
//!
//! Lets the solver be configured from a structured task document (string or
//! file) instead of code. Supported sections and keys:
//!
//! - `lorenz_params`: `sigma`, `rho`, `beta` (floats; defaults are the
//!   classical 10, 28, 8/3)
//! - `initial_state`: `x0`, `y0`, `z0` (floats; defaults 0.0, 1.0, 1.05)
//! - `solver_settings`: `dt` (float, default 0.01), `num_steps` (integer,
//!   default 10000, must be non-negative), `loglevel` (optional string)
//! - `postprocessing`: `plot`, `multicolor`, `gnuplot` (booleans),
//!   `colormap` ("viridis" or "plasma"), `filename` (optional stem for the
//!   png files)
//!
//! Missing sections and keys fall back to the defaults through the template
//! mechanism, so a minimal task like "solver_settings num_steps: 500" is a
//! valid document.
use crate::Utils::colormaps::TimeColorMap;
use crate::Utils::task_parser::{DocumentMap, DocumentParser, SectionMap};
use crate::numerical::Euler_api::{EulerODE, SolverError};
use crate::numerical::lorenz_system::{LorenzParameters, canonical_initial_state, lorenz_values};
use nalgebra::DVector;
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

/// template of all supported sections and keys; parsing with it guarantees
/// every key exists in the result, missing ones as None, so defaults apply
pub fn task_template() -> DocumentMap {
    let mut template: DocumentMap = HashMap::new();

    let mut lorenz: SectionMap = HashMap::new();
    for key in ["sigma", "rho", "beta"] {
        lorenz.insert(key.to_string(), None);
    }
    template.insert("lorenz_params".to_string(), lorenz);

    let mut initial: SectionMap = HashMap::new();
    for key in ["x0", "y0", "z0"] {
        initial.insert(key.to_string(), None);
    }
    template.insert("initial_state".to_string(), initial);

    let mut settings: SectionMap = HashMap::new();
    for key in ["dt", "num_steps", "loglevel"] {
        settings.insert(key.to_string(), None);
    }
    template.insert("solver_settings".to_string(), settings);

    let mut postprocessing: SectionMap = HashMap::new();
    for key in ["plot", "multicolor", "gnuplot", "colormap", "filename"] {
        postprocessing.insert(key.to_string(), None);
    }
    template.insert("postprocessing".to_string(), postprocessing);

    template
}

impl EulerODE {
    /// canonical Lorenz setup: classical parameters, textbook initial state,
    /// dt = 0.01 and 10000 steps
    pub fn default_lorenz() -> EulerODE {
        let params = LorenzParameters::default();
        EulerODE::new(
            params.rhs(),
            lorenz_values(),
            "t".to_string(),
            0.0,
            canonical_initial_state(),
            0.01,
            10000,
        )
    }

    /// map a parsed task document onto the solver fields; keys absent from
    /// the document keep the canonical defaults
    pub fn set_params_from_hashmap(&mut self, parser: &DocumentParser) -> Result<(), SolverError> {
        let sigma = parser.get_float("lorenz_params", "sigma").unwrap_or(10.0);
        let rho = parser.get_float("lorenz_params", "rho").unwrap_or(28.0);
        let beta = parser
            .get_float("lorenz_params", "beta")
            .unwrap_or(8.0 / 3.0);
        let params = LorenzParameters::new(sigma, rho, beta);
        self.rhs = params.rhs();
        self.values = lorenz_values();

        self.y0 = DVector::from_vec(vec![
            parser.get_float("initial_state", "x0").unwrap_or(0.0),
            parser.get_float("initial_state", "y0").unwrap_or(1.0),
            parser.get_float("initial_state", "z0").unwrap_or(1.05),
        ]);

        self.dt = parser.get_float("solver_settings", "dt").unwrap_or(0.01);
        let num_steps = parser
            .get_integer("solver_settings", "num_steps")
            .unwrap_or(10000);
        if num_steps < 0 {
            return Err(SolverError::InvalidConfiguration(format!(
                "num_steps must be non-negative, got {}",
                num_steps
            )));
        }
        self.num_steps = num_steps as usize;

        if let Some(level) = parser.get_string("solver_settings", "loglevel") {
            self.loglevel = Some(level);
        }
        Ok(())
    }

    /// parse settings from a task string; the parser is returned so the
    /// postprocessing section can be applied after solving
    pub fn parse_settings_from_str(&mut self, input: &str) -> Result<DocumentParser, SolverError> {
        let mut parser = DocumentParser::new(input.to_string()).with_template(task_template());
        parser
            .parse_document()
            .map_err(SolverError::InvalidConfiguration)?;
        self.set_params_from_hashmap(&parser)?;
        Ok(parser)
    }

    /// load the task from a file; None falls back to ./lorenz_task.txt
    pub fn parse_file(&mut self, path: Option<PathBuf>) -> Result<DocumentParser, SolverError> {
        let mut parser = DocumentParser::new(String::new()).with_template(task_template());
        parser
            .setting_from_file(path)
            .map_err(SolverError::InvalidConfiguration)?;
        parser
            .parse_document()
            .map_err(SolverError::InvalidConfiguration)?;
        self.set_params_from_hashmap(&parser)?;
        Ok(parser)
    }

    /// execute the postprocessing options of an already solved task:
    /// plain plot, multicolor plot, gnuplot plot
    pub fn set_postprocessing_from_hashmap(
        &self,
        parser: &DocumentParser,
    ) -> Result<(), SolverError> {
        let plot_flag = parser.get_boolean("postprocessing", "plot").unwrap_or(false);
        let multicolor_flag = parser
            .get_boolean("postprocessing", "multicolor")
            .unwrap_or(false);
        let gnuplot_flag = parser
            .get_boolean("postprocessing", "gnuplot")
            .unwrap_or(false);
        let colormap = match parser.get_string("postprocessing", "colormap") {
            Some(name) => TimeColorMap::from_str(&name).map_err(|_| {
                SolverError::InvalidConfiguration(format!(
                    "unknown colormap '{}', expected viridis or plasma",
                    name
                ))
            })?,
            None => TimeColorMap::default(),
        };
        let filename = parser.get_string("postprocessing", "filename");

        if plot_flag {
            self.plot_result(filename.clone().map(|name| format!("{}.png", name)));
        }
        if multicolor_flag {
            self.plot_result_multicolor(
                colormap,
                filename.clone().map(|name| format!("{}_multicolor.png", name)),
            );
        }
        if gnuplot_flag {
            self.plot_result_gnuplot(filename.map(|name| format!("{}_gnuplot.png", name)));
        }
        Ok(())
    }
}

/// write a commented task file template the user can start from
pub fn create_template_file(path: Option<PathBuf>) {
    let path = path.unwrap_or_else(|| PathBuf::from("lorenz_task.txt"));
    let template = "\
# task file for the Lorenz attractor solver
# lines starting with //, #, % or ; are comments
lorenz_params
sigma: 10.0
rho: 28.0
beta: 2.6666666666666665
initial_state
x0: 0.0
y0: 1.0
z0: 1.05
solver_settings
dt: 0.01
num_steps: 10000
loglevel: info
postprocessing
plot: true
multicolor: false
gnuplot: false
colormap: viridis
";
    std::fs::write(&path, template).unwrap();
    println!("template task written to {:?}", path);
}

////////////////////////////////////////////////////////////////////////////////////////
//          TESTS
///////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests_task_parser_euler {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_minimal_task_keeps_canonical_defaults() {
        let mut solver = EulerODE::default_lorenz();
        let _parser = solver
            .parse_settings_from_str("lorenz_params sigma: 10.0")
            .unwrap();
        assert_relative_eq!(solver.dt, 0.01);
        assert_eq!(solver.num_steps, 10000);
        assert_eq!(solver.y0[0], 0.0);
        assert_eq!(solver.y0[1], 1.0);
        assert_eq!(solver.y0[2], 1.05);
    }

    #[test]
    fn test_full_task_overrides_every_setting() {
        let task = "lorenz_params sigma: 16.0 rho: 45.92 beta: 4.0\n\
                    initial_state x0: 1.0 y0: 1.0 z0: 1.0\n\
                    solver_settings dt: 0.005 num_steps: 2000 loglevel: warn\n\
                    postprocessing plot: false";
        let mut solver = EulerODE::default_lorenz();
        solver.parse_settings_from_str(task).unwrap();
        assert_relative_eq!(solver.dt, 0.005);
        assert_eq!(solver.num_steps, 2000);
        assert_eq!(solver.y0[0], 1.0);
        assert_eq!(solver.loglevel, Some("warn".to_string()));
        // the rhs closure must reflect the parsed parameters:
        // at (1, 1, 1) dx = 16*(1-1) = 0, dy = 1*(45.92-1)-1, dz = 1*1-4*1
        let dydt = (solver.rhs)(0.0, &solver.y0);
        assert_relative_eq!(dydt[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(dydt[1], 43.92, epsilon = 1e-12);
        assert_relative_eq!(dydt[2], -3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_negative_num_steps_is_rejected() {
        let mut solver = EulerODE::default_lorenz();
        let res = solver.parse_settings_from_str("solver_settings num_steps: -1");
        assert!(matches!(res, Err(SolverError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_malformed_task_is_rejected() {
        let mut solver = EulerODE::default_lorenz();
        assert!(solver.parse_settings_from_str("").is_err());
        assert!(solver.parse_settings_from_str("solver_settings dt 0.01").is_err());
    }

    #[test]
    fn test_unknown_colormap_is_rejected() {
        let mut solver = EulerODE::default_lorenz();
        let parser = solver
            .parse_settings_from_str(
                "solver_settings num_steps: 1\npostprocessing plot: false colormap: jet",
            )
            .unwrap();
        // nothing gets plotted, the colormap name alone is the offender
        let res = solver.set_postprocessing_from_hashmap(&parser);
        assert!(matches!(res, Err(SolverError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_postprocessing_with_all_flags_off_is_a_no_op() {
        let mut solver = EulerODE::default_lorenz();
        let parser = solver
            .parse_settings_from_str(
                "solver_settings num_steps: 1\npostprocessing plot: false multicolor: false gnuplot: false colormap: plasma",
            )
            .unwrap();
        solver.set_postprocessing_from_hashmap(&parser).unwrap();
    }

    #[test]
    fn test_template_file_round_trip() {
        use tempfile::tempdir;
        let dir = tempdir().unwrap();
        let path = dir.path().join("lorenz_task.txt");
        create_template_file(Some(path.clone()));

        let mut solver = EulerODE::default_lorenz();
        let parser = solver.parse_file(Some(path)).unwrap();
        assert_relative_eq!(solver.dt, 0.01);
        assert_eq!(solver.num_steps, 10000);
        assert_eq!(solver.loglevel, Some("info".to_string()));
        assert_eq!(parser.get_boolean("postprocessing", "plot"), Some(true));
        assert_eq!(
            parser.get_string("postprocessing", "colormap"),
            Some("viridis".to_string())
        );
    }

    #[test]
    fn test_missing_task_file_is_rejected() {
        use tempfile::tempdir;
        let dir = tempdir().unwrap();
        let mut solver = EulerODE::default_lorenz();
        let res = solver.parse_file(Some(dir.path().join("no_such_task.txt")));
        assert!(matches!(res, Err(SolverError::InvalidConfiguration(_))));
    }
}
