//! # Limit-State Stress-Strain Formulas
//!
//! Closed-form material relations of IS 456:2000 cl. 38.1 and Fig. 23.
//!
//! ## Concrete
//!
//! ```text
//!  σ/fd
//!  1.0 ┤        ┌───────────────┐
//!      │     .-'                 │
//!      │   .'                    │
//!      │  /   2η − η²            │
//!      │ /                       │
//!    0 ┼──────┬──────────────────┬──── ε
//!      0     εcy = 0.002      εcu = 0.0035
//! ```
//!
//! Strains are measured along a linear profile `ε(x) = slope · x`, with `x`
//! the distance from the neutral axis toward the compressed edge. The
//! integrals below are therefore exact polynomials in `x`, not quadrature.
//!
//! ## Reinforcement
//!
//! - Mild steel: bilinear, elastic to `fd / Es`.
//! - HYSD (cold worked): elastic to `0.8 fd`, then linear between the
//!   tabulated points of Fig. 23A, saturating at `fd`.

/// Strain at which the concrete parabola reaches its plateau
pub const EC_YIELD: f64 = 0.002;

/// Ultimate compressive strain of concrete in flexure
pub const EC_ULTIMATE: f64 = 0.0035;

/// Elastic modulus of reinforcing steel (N/mm²)
pub const STEEL_ELASTIC_MODULUS: f64 = 2.0e5;

/// Partial safety factor for concrete
pub const GAMMA_CONCRETE: f64 = 1.5;

/// Partial safety factor for reinforcing steel
pub const GAMMA_STEEL: f64 = 1.15;

/// Plastic strain added to the yield strain when deriving xu,max
pub const STEEL_PLASTIC_STRAIN: f64 = 0.002;

/// Stress fractions of `fd` at the HYSD breakpoints
pub const HYSD_STRESS_FRACTIONS: [f64; 6] = [0.80, 0.85, 0.90, 0.95, 0.975, 1.0];

/// Inelastic strain offsets at the HYSD breakpoints
pub const HYSD_INELASTIC_STRAINS: [f64; 6] = [0.0, 0.0001, 0.0003, 0.0007, 0.001, 0.002];

/// Design compressive strength of concrete in the stress block
///
/// # Formula
/// fd = 0.67 · fck / γc = 0.447 fck for γc = 1.5
#[inline]
pub fn concrete_design_strength(fck: f64, gamma: f64) -> f64 {
    0.67 * fck / gamma
}

/// Short-term elastic modulus of concrete (IS 456 cl. 6.2.3.1)
///
/// # Formula
/// Ec = 5000 √fck
#[inline]
pub fn concrete_elastic_modulus(fck: f64) -> f64 {
    5000.0 * fck.sqrt()
}

/// Ratio σ/fd of the concrete stress block for a compressive strain.
///
/// Callers validate the strain range; values past εcu return the plateau.
#[inline]
pub fn concrete_stress_ratio(strain: f64) -> f64 {
    if strain <= 0.0 {
        0.0
    } else if strain < EC_YIELD {
        let eta = strain / EC_YIELD;
        2.0 * eta - eta * eta
    } else {
        1.0
    }
}

/// Split `[x1, x2]` into its parabolic and constant parts for a profile slope.
///
/// Returns `(parabola, plateau)` where each part is `Some((a, b))` if non-empty.
fn split_at_yield(slope: f64, x1: f64, x2: f64) -> (Option<(f64, f64)>, Option<(f64, f64)>) {
    let x_y = EC_YIELD / slope;
    let parabola = if x1 < x_y { Some((x1, x2.min(x_y))) } else { None };
    let plateau = if x2 > x_y { Some((x1.max(x_y), x2)) } else { None };
    (parabola, plateau)
}

/// Integral of the stress ratio over `[x1, x2]`.
///
/// # Formula
/// With `xy = εcy / slope` and `u = x / xy`:
/// - parabola: xy·[(u2² − u1²) − (u2³ − u1³)/3]
/// - plateau: x2 − x1
///
/// The result times `fd · b` is the force of a block of breadth `b`.
pub fn block_area(slope: f64, x1: f64, x2: f64) -> f64 {
    if x2 <= x1 || slope <= 0.0 {
        return 0.0;
    }
    let x_y = EC_YIELD / slope;
    let (parabola, plateau) = split_at_yield(slope, x1, x2);
    let mut area = 0.0;
    if let Some((a, b)) = parabola {
        let (u1, u2) = (a / x_y, b / x_y);
        area += x_y * ((u2 * u2 - u1 * u1) - (u2.powi(3) - u1.powi(3)) / 3.0);
    }
    if let Some((a, b)) = plateau {
        area += b - a;
    }
    area
}

/// First moment of the stress ratio about the neutral axis over `[x1, x2]`.
///
/// # Formula
/// - parabola: xy²·[2/3 (u2³ − u1³) − (u2⁴ − u1⁴)/4]
/// - plateau: (x2² − x1²)/2
pub fn block_moment(slope: f64, x1: f64, x2: f64) -> f64 {
    if x2 <= x1 || slope <= 0.0 {
        return 0.0;
    }
    let x_y = EC_YIELD / slope;
    let (parabola, plateau) = split_at_yield(slope, x1, x2);
    let mut moment = 0.0;
    if let Some((a, b)) = parabola {
        let (u1, u2) = (a / x_y, b / x_y);
        moment += x_y * x_y * (2.0 / 3.0 * (u2.powi(3) - u1.powi(3)) - (u2.powi(4) - u1.powi(4)) / 4.0);
    }
    if let Some((a, b)) = plateau {
        moment += (b * b - a * a) / 2.0;
    }
    moment
}

/// Design stress of mild steel: elastic-perfectly plastic, odd in strain.
#[inline]
pub fn mild_steel_stress(fd: f64, es: f64, strain: f64) -> f64 {
    (strain * es).clamp(-fd, fd)
}

/// HYSD breakpoints as `(stress, strain)` pairs in increasing order.
pub fn hysd_points(fd: f64, es: f64) -> [(f64, f64); 6] {
    let mut points = [(0.0, 0.0); 6];
    for (i, point) in points.iter_mut().enumerate() {
        let stress = HYSD_STRESS_FRACTIONS[i] * fd;
        *point = (stress, stress / es + HYSD_INELASTIC_STRAINS[i]);
    }
    points
}

/// Design stress of cold-worked HYSD steel, odd in strain.
///
/// ```text
///   σ
///  fd ┤                 ____________
///     │          __.---'
///0.8fd┤       .-'
///     │     /
///     │   /  elastic
///     │ /
///   0 ┼─────┬──────────────────────── ε
///      0.8fd/Es
/// ```
pub fn hysd_stress(fd: f64, es: f64, strain: f64) -> f64 {
    let magnitude = strain.abs();
    let points = hysd_points(fd, es);
    let (first_stress, first_strain) = points[0];

    let stress = if magnitude <= first_strain {
        magnitude * es
    } else if magnitude >= points[5].1 {
        fd
    } else {
        let mut stress = first_stress;
        for pair in points.windows(2) {
            let (s1, e1) = pair[0];
            let (s2, e2) = pair[1];
            if magnitude <= e2 {
                stress = s1 + (s2 - s1) * (magnitude - e1) / (e2 - e1);
                break;
            }
        }
        stress
    };

    stress.copysign(strain)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FD_415: f64 = 415.0 / GAMMA_STEEL;

    fn quadrature(slope: f64, x1: f64, x2: f64, weight: impl Fn(f64) -> f64) -> f64 {
        // Composite Simpson over a fine grid
        let n = 20_000;
        let h = (x2 - x1) / n as f64;
        let f = |x: f64| concrete_stress_ratio(slope * x) * weight(x);
        let mut sum = f(x1) + f(x2);
        for i in 1..n {
            let x = x1 + i as f64 * h;
            sum += if i % 2 == 0 { 2.0 * f(x) } else { 4.0 * f(x) };
        }
        sum * h / 3.0
    }

    #[test]
    fn test_concrete_ratio_shape() {
        assert_eq!(concrete_stress_ratio(0.0), 0.0);
        assert!((concrete_stress_ratio(0.001) - 0.75).abs() < 1e-12);
        assert!((concrete_stress_ratio(EC_YIELD) - 1.0).abs() < 1e-12);
        assert_eq!(concrete_stress_ratio(0.003), 1.0);

        // Non-decreasing up to the plateau
        let mut previous = 0.0;
        for i in 0..=350 {
            let ratio = concrete_stress_ratio(i as f64 * 1e-5);
            assert!(ratio >= previous - 1e-15);
            previous = ratio;
        }
    }

    #[test]
    fn test_closed_form_matches_quadrature() {
        let slope = EC_ULTIMATE / 130.867;
        for &(x1, x2) in &[(0.0, 130.867), (20.0, 60.0), (80.0, 130.0), (0.0, 40.0)] {
            let area = block_area(slope, x1, x2);
            let numeric = quadrature(slope, x1, x2, |_| 1.0);
            assert!((area - numeric).abs() / numeric < 1e-6);

            let moment = block_moment(slope, x1, x2);
            let numeric = quadrature(slope, x1, x2, |x| x);
            assert!((moment - numeric).abs() / numeric < 1e-6);
        }
    }

    #[test]
    fn test_full_block_coefficients() {
        // Whole block at εcu: area = 0.8095 xu (0.362 fck / 0.447 fck)
        let xu = 100.0;
        let area = block_area(EC_ULTIMATE / xu, 0.0, xu);
        assert!((area / xu - 17.0 / 21.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_interval() {
        assert_eq!(block_area(1e-5, 50.0, 50.0), 0.0);
        assert_eq!(block_moment(1e-5, 60.0, 50.0), 0.0);
    }

    #[test]
    fn test_mild_steel_bilinear() {
        let fd = 250.0 / GAMMA_STEEL;
        assert!((mild_steel_stress(fd, STEEL_ELASTIC_MODULUS, 0.0005) - 100.0).abs() < 1e-9);
        assert!((mild_steel_stress(fd, STEEL_ELASTIC_MODULUS, 0.01) - fd).abs() < 1e-9);
        assert!((mild_steel_stress(fd, STEEL_ELASTIC_MODULUS, -0.01) + fd).abs() < 1e-9);
    }

    #[test]
    fn test_hysd_breakpoints() {
        let points = hysd_points(FD_415, STEEL_ELASTIC_MODULUS);
        assert!((points[0].0 - 288.6957).abs() < 1e-3);
        assert!((points[0].1 - 0.00144348).abs() < 1e-8);
        assert!((points[4].0 - 351.8478).abs() < 1e-3);
        assert!((points[4].1 - 0.00275924).abs() < 1e-8);
        assert!((points[5].1 - 0.00380435).abs() < 1e-8);
    }

    #[test]
    fn test_hysd_stress_values() {
        let cases = [
            (0.001, 200.0),
            (0.0015, 294.0571),
            (0.002, 327.5831),
            (0.003, 353.9262),
            (0.005, 360.8696),
            (-0.0015, -294.0571),
        ];
        for (strain, expected) in cases {
            let stress = hysd_stress(FD_415, STEEL_ELASTIC_MODULUS, strain);
            assert!((stress - expected).abs() < 1e-3, "strain {strain}: {stress}");
        }
        assert_eq!(hysd_stress(FD_415, STEEL_ELASTIC_MODULUS, 0.0), 0.0);
    }

    #[test]
    fn test_hysd_continuous_at_breakpoints() {
        for (stress, strain) in hysd_points(FD_415, STEEL_ELASTIC_MODULUS) {
            let below = hysd_stress(FD_415, STEEL_ELASTIC_MODULUS, strain - 1e-10);
            let above = hysd_stress(FD_415, STEEL_ELASTIC_MODULUS, strain + 1e-10);
            assert!((below - stress).abs() < 1e-3);
            assert!((above - stress).abs() < 1e-3);
        }
    }
}
