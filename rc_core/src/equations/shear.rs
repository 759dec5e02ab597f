//! # Shear Formulas (IS 456:2000 cl. 40)
//!
//! ## Notation
//!
//! - `pt` = tension steel percentage, 100·Ast/(bw·d)
//! - `τc` = design shear strength of concrete (Table 19)
//! - `τc,max` = maximum shear stress with shear reinforcement (Table 20)
//! - `fd` = design strength of the shear reinforcement
//! - `Asv` = area of one set of shear bars
//! - `sv` = spacing of shear bars along the member
//! - `α` = inclination of the shear bars to the member axis
//!
//! All forces in newtons, lengths in millimetres, stresses in N/mm².

/// Lower and upper clamp on `pt` used with Table 19
pub const PT_MIN: f64 = 0.15;
pub const PT_MAX: f64 = 3.0;

/// Table 20 of IS 456: (fck, τc,max)
pub const TAU_C_MAX_TABLE: [(f64, f64); 6] = [
    (15.0, 2.5),
    (20.0, 2.8),
    (25.0, 3.1),
    (30.0, 3.5),
    (35.0, 3.7),
    (40.0, 4.0),
];

/// Tension steel percentage clamped to the range of Table 19
#[inline]
pub fn steel_percentage(ast: f64, bw: f64, d: f64) -> f64 {
    (100.0 * ast / (bw * d)).clamp(PT_MIN, PT_MAX)
}

/// Design shear strength of concrete τc (Table 19, SP 16 closed form)
///
/// # Formula
/// ```text
/// β  = max(1, 0.8 fck / (6.89 pt))
/// τc = 0.85 √(0.8 fck) (√(1 + 5β) − 1) / (6β)
/// ```
#[inline]
pub fn tau_c(fck: f64, pt: f64) -> f64 {
    let beta = (0.8 * fck / (6.89 * pt)).max(1.0);
    0.85 * (0.8 * fck).sqrt() * ((1.0 + 5.0 * beta).sqrt() - 1.0) / (6.0 * beta)
}

/// Maximum shear stress τc,max from Table 20.
///
/// Linear between tabulated grades, constant above M40. Grades below M15
/// are not covered by the table and return `None`.
pub fn tau_c_max(fck: f64) -> Option<f64> {
    let (first_fck, _) = TAU_C_MAX_TABLE[0];
    if fck < first_fck {
        return None;
    }
    for pair in TAU_C_MAX_TABLE.windows(2) {
        let (f1, t1) = pair[0];
        let (f2, t2) = pair[1];
        if fck <= f2 {
            return Some(t1 + (t2 - t1) * (fck - f1) / (f2 - f1));
        }
    }
    Some(TAU_C_MAX_TABLE[TAU_C_MAX_TABLE.len() - 1].1)
}

/// Shear carried by a series of inclined or vertical bars
///
/// # Formula (cl. 40.4 a, b)
/// Vus = fd · Asv · d · (sin α + cos α) / sv
#[inline]
pub fn series_capacity(fd: f64, asv: f64, d: f64, sv: f64, angle_deg: f64) -> f64 {
    let alpha = angle_deg.to_radians();
    fd * asv * d * (alpha.sin() + alpha.cos()) / sv
}

/// Shear carried by a single group of bent-up bars
///
/// # Formula (cl. 40.4 c)
/// Vus = fd · Asv · sin α
#[inline]
pub fn single_group_capacity(fd: f64, asv: f64, angle_deg: f64) -> f64 {
    fd * asv * angle_deg.to_radians().sin()
}

/// Spacing of a series of bars that delivers `vus` (inverse of [`series_capacity`])
#[inline]
pub fn series_spacing(fd: f64, asv: f64, d: f64, vus: f64, angle_deg: f64) -> f64 {
    let alpha = angle_deg.to_radians();
    fd * asv * d * (alpha.sin() + alpha.cos()) / vus
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tau_c_reference_beam() {
        // 3-16 in 230 x 415 effective, M20
        let ast = 3.0 * std::f64::consts::PI / 4.0 * 16.0 * 16.0;
        let pt = steel_percentage(ast, 230.0, 415.0);
        assert!((pt - 0.632).abs() < 1e-3);
        assert!((tau_c(20.0, pt) - 0.5245).abs() < 1e-3);
    }

    #[test]
    fn test_tau_c_increases_with_steel() {
        let low = tau_c(25.0, 0.25);
        let high = tau_c(25.0, 2.0);
        assert!(high > low);
    }

    #[test]
    fn test_steel_percentage_clamped() {
        assert_eq!(steel_percentage(10.0, 230.0, 415.0), PT_MIN);
        assert_eq!(steel_percentage(1.0e5, 230.0, 415.0), PT_MAX);
    }

    #[test]
    fn test_tau_c_max_table() {
        assert_eq!(tau_c_max(10.0), None);
        assert!((tau_c_max(20.0).unwrap() - 2.8).abs() < 1e-12);
        assert!((tau_c_max(22.5).unwrap() - 2.95).abs() < 1e-12);
        assert!((tau_c_max(40.0).unwrap() - 4.0).abs() < 1e-12);
        assert!((tau_c_max(60.0).unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_vertical_stirrups() {
        let fd = 415.0 / 1.15;
        let asv = 2.0 * std::f64::consts::PI / 4.0 * 64.0;
        let vus = series_capacity(fd, asv, 415.0, 150.0, 90.0);
        assert!((vus / 1000.0 - 100.37).abs() < 0.01);

        let sv = series_spacing(fd, asv, 415.0, vus, 90.0);
        assert!((sv - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_group() {
        let vus = single_group_capacity(360.0, 100.0, 90.0);
        assert!((vus - 36_000.0).abs() < 1e-6);
    }
}
