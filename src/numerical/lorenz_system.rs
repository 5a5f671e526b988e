use nalgebra::DVector;

/// Parameters of the Lorenz system
///
/// dx/dt = sigma*(y - x)
/// dy/dt = x*(rho - z) - y
/// dz/dt = x*y - beta*z
///
/// The classical chaotic regime is sigma = 10, rho = 28, beta = 8/3,
/// which is what Default returns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LorenzParameters {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
}

impl Default for LorenzParameters {
    fn default() -> Self {
        LorenzParameters {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
        }
    }
}

impl LorenzParameters {
    pub fn new(sigma: f64, rho: f64, beta: f64) -> Self {
        LorenzParameters { sigma, rho, beta }
    }

    /// right-hand side of the Lorenz system packed into the closure type
    /// consumed by the IVP solver: f(t, y) -> dy/dt. The system is autonomous
    /// so t is ignored.
    pub fn rhs(&self) -> Box<dyn Fn(f64, &DVector<f64>) -> DVector<f64>> {
        let LorenzParameters { sigma, rho, beta } = *self;
        Box::new(move |_t: f64, y: &DVector<f64>| {
            DVector::from_vec(vec![
                sigma * (y[1] - y[0]),
                y[0] * (rho - y[2]) - y[1],
                y[0] * y[1] - beta * y[2],
            ])
        })
    }
}

/// evaluate the Lorenz derivatives at a given state directly, without going
/// through the boxed closure
pub fn lorenz_derivatives(y: &DVector<f64>, params: &LorenzParameters) -> DVector<f64> {
    DVector::from_vec(vec![
        params.sigma * (y[1] - y[0]),
        y[0] * (params.rho - y[2]) - y[1],
        y[0] * y[1] - params.beta * y[2],
    ])
}

/// names of the unknowns in the order used throughout the crate
pub fn lorenz_values() -> Vec<String> {
    vec!["x".to_string(), "y".to_string(), "z".to_string()]
}

/// the initial condition used for the textbook attractor picture
pub fn canonical_initial_state() -> DVector<f64> {
    DVector::from_vec(vec![0.0, 1.0, 1.05])
}

////////////////////////////////////////////////////////////////////////////////////////
//          TESTS
///////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests_lorenz_system {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_origin_is_fixed_point() {
        let params = LorenzParameters::default();
        let origin = DVector::from_vec(vec![0.0, 0.0, 0.0]);
        let dydt = lorenz_derivatives(&origin, &params);
        assert_eq!(dydt[0], 0.0);
        assert_eq!(dydt[1], 0.0);
        assert_eq!(dydt[2], 0.0);
    }

    #[test]
    fn test_derivatives_at_canonical_initial_state() {
        // at (0, 1, 1.05) with the classical parameters:
        // dx = 10*(1-0) = 10, dy = 0*(28-1.05)-1 = -1, dz = 0*1 - 8/3*1.05 = -2.8
        let params = LorenzParameters::default();
        let y0 = canonical_initial_state();
        let dydt = lorenz_derivatives(&y0, &params);
        assert_relative_eq!(dydt[0], 10.0, epsilon = 1e-12);
        assert_relative_eq!(dydt[1], -1.0, epsilon = 1e-12);
        assert_relative_eq!(dydt[2], -2.8, epsilon = 1e-12);
    }

    #[test]
    fn test_rhs_closure_matches_direct_evaluation() {
        let params = LorenzParameters::new(10.0, 14.0, 8.0 / 3.0);
        let f = params.rhs();
        let y = DVector::from_vec(vec![-3.5, 2.0, 17.0]);
        let direct = lorenz_derivatives(&y, &params);
        let boxed = f(0.0, &y);
        assert_eq!(direct, boxed);
    }

    #[test]
    fn test_default_parameters_are_classical() {
        let params = LorenzParameters::default();
        assert_eq!(params.sigma, 10.0);
        assert_eq!(params.rho, 28.0);
        assert_relative_eq!(params.beta, 2.6666666666666665, epsilon = 1e-15);
    }
}
