//! # Equilibrium Root Search
//!
//! Finds the neutral-axis depth at which a residual (net section force,
//! or net force minus an applied axial load) vanishes.
//!
//! 1. **Bracket**: evaluate the residual on an even grid over
//!    `[lower, upper]`, starting at `scan_intervals` points and doubling up to
//!    `max_scan_intervals`, until two neighbours change sign.
//! 2. **Bisect**: halve the bracket until the residual is within
//!    `force_tolerance`, the bracket collapses below `xu_tolerance`, or the
//!    iteration cap is reached.
//!
//! Failing to bracket is an error; the other outcomes are not. Only a
//! residual within `force_tolerance` counts as [`SolveStatus::Converged`]. A
//! collapsed bracket that still carries a residual is a jump in the residual
//! function and comes back as [`SolveStatus::Discontinuity`]; the cap comes
//! back as [`SolveStatus::IterationLimit`].

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Tunable solver parameters, stored with the project settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Scan starts at this fraction of the overall depth
    pub scan_start_fraction: f64,
    /// Columns scan up to this multiple of the overall depth
    pub column_upper_factor: f64,
    pub scan_intervals: usize,
    pub max_scan_intervals: usize,
    /// Convergence on |residual| (N)
    pub force_tolerance: f64,
    /// Bracket width (mm) below which bisection stops. A residual still
    /// above `force_tolerance` at that width is reported as a discontinuity.
    pub xu_tolerance: f64,
    pub max_iterations: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            scan_start_fraction: 0.001,
            column_upper_factor: 100.0,
            scan_intervals: 10,
            max_scan_intervals: 160,
            force_tolerance: 1e-6,
            xu_tolerance: 1e-12,
            max_iterations: 200,
        }
    }
}

impl SolverSettings {
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.scan_start_fraction > 0.0 && self.scan_start_fraction < 1.0) {
            return Err(CalcError::invalid_input(
                "scan_start_fraction",
                self.scan_start_fraction.to_string(),
                "Must lie between 0 and 1",
            ));
        }
        if !(self.column_upper_factor >= 1.0 && self.column_upper_factor.is_finite()) {
            return Err(CalcError::invalid_input(
                "column_upper_factor",
                self.column_upper_factor.to_string(),
                "Must be at least 1",
            ));
        }
        if self.scan_intervals == 0 || self.max_scan_intervals < self.scan_intervals {
            return Err(CalcError::invalid_input(
                "scan_intervals",
                format!("{}..{}", self.scan_intervals, self.max_scan_intervals),
                "Need at least one interval and max_scan_intervals >= scan_intervals",
            ));
        }
        if !(self.force_tolerance > 0.0 && self.xu_tolerance > 0.0) {
            return Err(CalcError::invalid_input(
                "tolerance",
                format!("{} N, {} mm", self.force_tolerance, self.xu_tolerance),
                "Tolerances must be positive",
            ));
        }
        if self.max_iterations == 0 {
            return Err(CalcError::invalid_input("max_iterations", "0", "Must be at least 1"));
        }
        Ok(())
    }
}

/// How the bisection ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveStatus {
    /// |residual| <= force_tolerance
    Converged,
    /// Bracket collapsed onto a sign change the residual jumps across
    Discontinuity,
    IterationLimit,
}

/// Neutral-axis depth at equilibrium
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumSolution {
    /// Neutral-axis depth (mm)
    pub xu: f64,
    /// Residual at `xu` (N)
    pub residual: f64,
    pub iterations: usize,
    pub status: SolveStatus,
    /// Final bracket (mm)
    pub lower: f64,
    pub upper: f64,
}

impl EquilibriumSolution {
    pub fn converged(&self) -> bool {
        self.status == SolveStatus::Converged
    }
}

/// Interval on which the residual changes sign
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub lower: f64,
    pub upper: f64,
    pub f_lower: f64,
    pub f_upper: f64,
}

impl Bracket {
    /// Degenerate bracket on an exact root
    fn at(x: f64, fx: f64) -> Self {
        Bracket {
            lower: x,
            upper: x,
            f_lower: fx,
            f_upper: fx,
        }
    }
}

/// Outcome of a scan that found no sign change
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoBracket {
    pub f_lower: f64,
    pub f_upper: f64,
}

/// Scan `[lower, upper]` for the first sign change of `f`.
///
/// An exact zero on the grid yields a degenerate bracket at that point.
pub fn scan_bracket<F>(
    f: &mut F,
    lower: f64,
    upper: f64,
    settings: &SolverSettings,
) -> CalcResult<Result<Bracket, NoBracket>>
where
    F: FnMut(f64) -> CalcResult<f64>,
{
    let f_start = f(lower)?;
    let f_end = f(upper)?;
    if f_start == 0.0 {
        return Ok(Ok(Bracket::at(lower, f_start)));
    }

    let mut intervals = settings.scan_intervals;
    while intervals <= settings.max_scan_intervals {
        let step = (upper - lower) / intervals as f64;
        let mut x0 = lower;
        let mut f0 = f_start;

        for i in 1..=intervals {
            let (x1, f1) = if i == intervals {
                (upper, f_end)
            } else {
                let x = lower + i as f64 * step;
                (x, f(x)?)
            };
            if f1 == 0.0 {
                return Ok(Ok(Bracket::at(x1, f1)));
            }
            if f0.signum() != f1.signum() {
                debug!("bracket [{:.6}, {:.6}] found with {} intervals", x0, x1, intervals);
                return Ok(Ok(Bracket {
                    lower: x0,
                    upper: x1,
                    f_lower: f0,
                    f_upper: f1,
                }));
            }
            x0 = x1;
            f0 = f1;
        }

        trace!("no sign change with {} intervals", intervals);
        intervals *= 2;
    }

    Ok(Err(NoBracket {
        f_lower: f_start,
        f_upper: f_end,
    }))
}

/// Bisect a bracket down to tolerance.
pub fn bisect<F>(
    f: &mut F,
    bracket: Bracket,
    settings: &SolverSettings,
) -> CalcResult<EquilibriumSolution>
where
    F: FnMut(f64) -> CalcResult<f64>,
{
    let Bracket {
        mut lower,
        mut upper,
        mut f_lower,
        f_upper,
    } = bracket;

    for (x, fx) in [(lower, f_lower), (upper, f_upper)] {
        if fx.abs() <= settings.force_tolerance {
            return Ok(EquilibriumSolution {
                xu: x,
                residual: fx,
                iterations: 0,
                status: SolveStatus::Converged,
                lower,
                upper,
            });
        }
    }

    let mut mid = 0.5 * (lower + upper);
    let mut f_mid = f(mid)?;
    for iteration in 1..=settings.max_iterations {
        trace!("bisection {}: xu = {:.9}, residual = {:.6e}", iteration, mid, f_mid);
        if f_mid.abs() <= settings.force_tolerance {
            debug!("converged at xu = {:.6} after {} iterations", mid, iteration);
            return Ok(EquilibriumSolution {
                xu: mid,
                residual: f_mid,
                iterations: iteration,
                status: SolveStatus::Converged,
                lower,
                upper,
            });
        }

        let collapsed = 0.5 * (upper - lower) <= settings.xu_tolerance;
        if collapsed || mid <= lower || mid >= upper {
            warn!(
                "residual jumps across xu = {:.9}: bracket [{:.9}, {:.9}] still carries {:.6e} N",
                mid, lower, upper, f_mid
            );
            return Ok(EquilibriumSolution {
                xu: mid,
                residual: f_mid,
                iterations: iteration,
                status: SolveStatus::Discontinuity,
                lower,
                upper,
            });
        }

        if f_mid.signum() == f_lower.signum() {
            lower = mid;
            f_lower = f_mid;
        } else {
            upper = mid;
        }
        mid = 0.5 * (lower + upper);
        f_mid = f(mid)?;
    }

    warn!(
        "bisection stopped at the iteration limit ({}): xu = {:.6}, residual = {:.6e}",
        settings.max_iterations, mid, f_mid
    );
    Ok(EquilibriumSolution {
        xu: mid,
        residual: f_mid,
        iterations: settings.max_iterations,
        status: SolveStatus::IterationLimit,
        lower,
        upper,
    })
}

/// Bracket then bisect. `label` names the section in the error.
pub fn find_root<F>(
    label: &str,
    mut f: F,
    lower: f64,
    upper: f64,
    settings: &SolverSettings,
) -> CalcResult<EquilibriumSolution>
where
    F: FnMut(f64) -> CalcResult<f64>,
{
    settings.validate()?;
    match scan_bracket(&mut f, lower, upper, settings)? {
        Ok(bracket) => bisect(&mut f, bracket, settings),
        Err(NoBracket { f_lower, f_upper }) => Err(CalcError::EquilibriumNotFound {
            section: label.to_string(),
            lower_mm: lower,
            upper_mm: upper,
            net_lower_n: f_lower,
            net_upper_n: f_upper,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_root() {
        let settings = SolverSettings::default();
        let solution = find_root("line", |x| Ok(2.0 * x - 3.0), 0.0, 10.0, &settings).unwrap();
        assert!(solution.converged());
        assert!((solution.xu - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_root_in_narrow_window_needs_refinement() {
        // Negative only inside (0.41, 0.44); the coarse grids miss it
        let settings = SolverSettings::default();
        let mut f = |x: f64| -> CalcResult<f64> { Ok((x - 0.41) * (x - 0.44)) };
        let result = scan_bracket(&mut f, 0.0, 10.0, &settings).unwrap();
        let bracket = result.unwrap();
        assert!(bracket.lower <= 0.41 && bracket.upper >= 0.41);
    }

    #[test]
    fn test_no_sign_change() {
        let settings = SolverSettings::default();
        let result = find_root("always positive", |x| Ok(x * x + 1.0), 0.0, 10.0, &settings);
        match result {
            Err(CalcError::EquilibriumNotFound { section, net_lower_n, net_upper_n, .. }) => {
                assert_eq!(section, "always positive");
                assert_eq!(net_lower_n, 1.0);
                assert_eq!(net_upper_n, 101.0);
            }
            other => panic!("expected EquilibriumNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_iteration_limit_is_not_an_error() {
        let settings = SolverSettings {
            max_iterations: 3,
            force_tolerance: 1e-15,
            xu_tolerance: 1e-15,
            ..SolverSettings::default()
        };
        let pi = std::f64::consts::PI;
        let solution = find_root("tight", |x| Ok(x - pi), 0.0, 10.0, &settings).unwrap();
        assert_eq!(solution.status, SolveStatus::IterationLimit);
        assert_eq!(solution.iterations, 3);
        assert!((solution.xu - std::f64::consts::PI).abs() < 1.0);
    }

    #[test]
    fn test_step_is_reported_as_discontinuity() {
        // Sign change with a 50 kN jump and no root
        let settings = SolverSettings::default();
        let step = |x: f64| -> CalcResult<f64> { Ok(if x < 3.3 { -25_000.0 } else { 25_000.0 }) };
        let solution = find_root("step", step, 0.0, 10.0, &settings).unwrap();
        assert_eq!(solution.status, SolveStatus::Discontinuity);
        assert!(!solution.converged());
        assert!((solution.xu - 3.3).abs() < 1e-9);
        assert!(solution.residual.abs() > settings.force_tolerance);
    }

    #[test]
    fn test_steep_continuous_residual_converges_on_force() {
        // 1e5 N/mm, steeper than any section stiffness
        let settings = SolverSettings::default();
        let steep = |x: f64| -> CalcResult<f64> { Ok(1e5 * (x - 612.345)) };
        let solution = find_root("steep", steep, 1.0, 4000.0, &settings).unwrap();
        assert_eq!(solution.status, SolveStatus::Converged);
        assert!(solution.residual.abs() <= settings.force_tolerance);
    }

    #[test]
    fn test_exact_zero_on_grid() {
        let settings = SolverSettings::default();
        let solution = find_root("grid", |x| Ok(x - 2.0), 0.0, 10.0, &settings).unwrap();
        assert_eq!(solution.xu, 2.0);
        assert_eq!(solution.iterations, 0);
    }

    #[test]
    fn test_errors_propagate() {
        let settings = SolverSettings::default();
        let result = find_root(
            "failing",
            |x| if x > 5.0 { Err(CalcError::strain_out_of_range(x, 0.0, 1.0)) } else { Ok(-1.0) },
            0.0,
            10.0,
            &settings,
        );
        assert!(matches!(result, Err(CalcError::StrainOutOfRange { .. })));
    }

    #[test]
    fn test_invalid_settings() {
        let settings = SolverSettings { scan_intervals: 0, ..SolverSettings::default() };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_settings_defaults_from_partial_json() {
        let settings: SolverSettings = serde_json::from_str(r#"{"max_iterations": 50}"#).unwrap();
        assert_eq!(settings.max_iterations, 50);
        assert_eq!(settings.scan_intervals, 10);
    }
}
