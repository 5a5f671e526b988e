/// Fixed-step explicit (forward) Euler IVP solver.
///
///  Example#1
/// ```
/// use RustedLorenz::numerical::Euler_api::EulerODE;
/// use RustedLorenz::numerical::lorenz_system::{LorenzParameters, canonical_initial_state, lorenz_values};
/// // define the Lorenz system with the classical parameters
/// let params = LorenzParameters::default();
/// // 10 steps of length 0.01 starting from the textbook initial condition
/// let mut solver = EulerODE::new(
///     params.rhs(),
///     lorenz_values(),
///     "t".to_string(),
///     0.0,
///     canonical_initial_state(),
///     0.01,
///     10,
/// );
/// solver.loglevel = Some("off".to_string());
/// solver.solve().unwrap();
/// let (t_result, y_result) = solver.get_result();
/// assert_eq!(y_result.nrows(), 11);
/// println!("t = {:?}", t_result);
/// ```
use crate::Utils::colormaps::TimeColorMap;
use crate::Utils::plots::{plots3d, plots3d_gnuplot, plots3d_multicolor};
use chrono::Local;
use log::{error, info};
use nalgebra::{DMatrix, DVector};
use simplelog::LevelFilter;
use simplelog::*;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::time::Instant;
use tabled::{builder::Builder, settings::Style};

/// the only failure class of the solver: the task was malformed before any
/// computation started (non-positive or non-finite step, dimension mismatch,
/// bad task document). The integration loop itself cannot fail for finite
/// real input.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    InvalidConfiguration(String),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::InvalidConfiguration(msg) => {
                write!(f, "invalid configuration: {}", msg)
            }
        }
    }
}

impl std::error::Error for SolverError {}

/// Fixed-step explicit Euler solver for IVPs y' = f(t, y), y(t0) = y0.
/// The whole trajectory buffer is allocated up front, filled in strictly
/// increasing step order and never touched again once written.
pub struct EulerODE {
    pub rhs: Box<dyn Fn(f64, &DVector<f64>) -> DVector<f64>>,
    pub values: Vec<String>,
    pub arg: String,
    pub t0: f64,
    pub y0: DVector<f64>,
    pub dt: f64,
    pub num_steps: usize,
    pub status: String,
    pub message: Option<String>,
    pub loglevel: Option<String>,
    t_result: DVector<f64>,
    y_result: DMatrix<f64>,
    calc_statistics: HashMap<String, String>,
}

impl EulerODE {
    pub fn new(
        rhs: Box<dyn Fn(f64, &DVector<f64>) -> DVector<f64>>,
        values: Vec<String>,
        arg: String,
        // start point
        t0: f64,
        // initial condition
        y0: DVector<f64>,
        dt: f64,
        num_steps: usize,
    ) -> Self {
        EulerODE {
            rhs,
            values,
            arg,
            t0,
            y0,
            dt,
            num_steps,
            status: "created".to_string(),
            message: None,
            loglevel: Some("info".to_string()),
            t_result: DVector::zeros(1),
            y_result: DMatrix::zeros(1, 1),
            calc_statistics: HashMap::new(),
        }
    }

    /// validate the task before any allocation happens: fail fast, produce
    /// no partial trajectory
    pub fn check_task(&self) -> Result<(), SolverError> {
        if !self.dt.is_finite() || !(self.dt > 0.0) {
            return Err(SolverError::InvalidConfiguration(format!(
                "time step dt must be positive and finite, got {}",
                self.dt
            )));
        }
        if self.y0.len() == 0 {
            return Err(SolverError::InvalidConfiguration(
                "initial state must not be empty".to_string(),
            ));
        }
        if self.y0.len() != self.values.len() {
            return Err(SolverError::InvalidConfiguration(format!(
                "initial state has {} components but {} unknowns are declared: {:?}",
                self.y0.len(),
                self.values.len(),
                self.values
            )));
        }
        Ok(())
    }

    // one explicit Euler step: y_next = y + f(t, y)*dt, evaluated exactly in
    // this order so reruns are bit-identical
    fn _step_impl(&self, t: f64, y: &DVector<f64>) -> DVector<f64> {
        let dydt = (self.rhs)(t, y);
        y + dydt * self.dt
    }

    pub fn main_loop(&mut self) {
        let start = Instant::now();
        let n = self.y0.len();
        let nrows = self.num_steps + 1;

        let mut y_result: DMatrix<f64> = DMatrix::zeros(nrows, n);
        let mut t: Vec<f64> = Vec::with_capacity(nrows);
        for j in 0..n {
            y_result[(0, j)] = self.y0[j];
        }
        t.push(self.t0);

        let mut y_i = self.y0.clone();
        let mut t_i = self.t0;
        for i in 0..self.num_steps {
            let y_next = self._step_impl(t_i, &y_i);
            t_i = self.t0 + ((i + 1) as f64) * self.dt;
            for j in 0..n {
                y_result[(i + 1, j)] = y_next[j];
            }
            t.push(t_i);
            y_i = y_next;
        }

        self.t_result = DVector::from_vec(t);
        self.y_result = y_result;
        self.status = "finished".to_string();

        let duration = start.elapsed();
        println!("Program took {} milliseconds to run", duration.as_millis());
        self.calc_statistics.insert(
            "time elapsed, ms".to_string(),
            duration.as_millis().to_string(),
        );
    }

    pub fn solver(&mut self) -> Result<(), SolverError> {
        if let Err(e) = self.check_task() {
            self.status = "failed".to_string();
            self.message = Some(e.to_string());
            error!("{}", e);
            return Err(e);
        }
        self.status = "running".to_string();
        self.main_loop();
        self.calc_statistics();
        Ok(())
    }

    // wrapper around solver function to implement logging
    pub fn solve(&mut self) -> Result<(), SolverError> {
        let is_logging_disabled = self
            .loglevel
            .as_ref()
            .map(|level| level == "off" || level == "none")
            .unwrap_or(false);

        if is_logging_disabled {
            return self.solver();
        }

        let loglevel = self.loglevel.clone();
        let log_option = if let Some(level) = loglevel {
            match level.as_str() {
                "debug" => LevelFilter::Info,
                "info" => LevelFilter::Info,
                "warn" => LevelFilter::Warn,
                "error" => LevelFilter::Error,
                _ => panic!("loglevel must be debug, info, warn or error"),
            }
        } else {
            LevelFilter::Info
        };
        let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let name = format!("log_{}.txt", date_and_time);
        let logger_instance = CombinedLogger::init(vec![
            TermLogger::new(
                log_option,
                Config::default(),
                TerminalMode::Mixed,
                ColorChoice::Auto,
            ),
            WriteLogger::new(log_option, Config::default(), File::create(name).unwrap()),
        ]);

        match logger_instance {
            Ok(()) => {
                let res = self.solver();
                info!(" \n \n Program ended");
                res
            }
            Err(_) => self.solver(),
        }
    }

    pub fn get_result(&self) -> (DVector<f64>, DMatrix<f64>) {
        (self.t_result.clone(), self.y_result.clone())
    }

    pub fn get_status(&self) -> &str {
        &self.status
    }

    pub fn plot_result(&self, filename: Option<String>) {
        assert_eq!(
            self.get_status(),
            "finished",
            "solve the task before plotting"
        );
        let name = filename.unwrap_or_else(|| "lorenz_attractor.png".to_string());
        plots3d(
            "Lorenz Attractor".to_string(),
            self.values.clone(),
            self.y_result.clone(),
            name,
        );
        println!("result plotted");
    }

    pub fn plot_result_multicolor(&self, colormap: TimeColorMap, filename: Option<String>) {
        assert_eq!(
            self.get_status(),
            "finished",
            "solve the task before plotting"
        );
        let name = filename.unwrap_or_else(|| "lorenz_attractor_multicolor.png".to_string());
        plots3d_multicolor(
            "Lorenz Attractor (Multicolor)".to_string(),
            self.values.clone(),
            self.y_result.clone(),
            colormap,
            name,
        );
        println!("result plotted");
    }

    pub fn plot_result_gnuplot(&self, filename: Option<String>) {
        assert_eq!(
            self.get_status(),
            "finished",
            "solve the task before plotting"
        );
        let name = filename.unwrap_or_else(|| "lorenz_attractor_gnuplot.png".to_string());
        plots3d_gnuplot(
            "Lorenz Attractor".to_string(),
            self.values.clone(),
            self.y_result.clone(),
            name,
        );
        println!("result plotted");
    }

    fn calc_statistics(&mut self) {
        let stats = &mut self.calc_statistics;
        stats.insert("number of steps".to_string(), format!("{}", self.num_steps));
        stats.insert("step size".to_string(), format!("{}", self.dt));
        stats.insert(
            "t span".to_string(),
            format!(
                "{} .. {}",
                self.t0,
                self.t0 + self.num_steps as f64 * self.dt
            ),
        );
        stats.insert(
            "trajectory buffer rows".to_string(),
            format!("{}", self.y_result.nrows()),
        );
        stats.insert(
            "length of y vector".to_string(),
            format!("{}", self.values.len()),
        );

        let mut builder = Builder::default();
        for (key, value) in stats.iter() {
            builder.push_record([key.as_str(), value.as_str()]);
        }
        let mut table = builder.build();
        table.with(Style::modern_rounded());
        info!("\n \n CALC STATISTICS \n \n {}", table.to_string());
    }
}
