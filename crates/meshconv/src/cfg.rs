//! Conversion configuration and numeric tolerances.
//!
//! Policy
//! - Geometric tolerances are fixed constants; the few knobs that change
//!   conversion results live in `ConvertCfg` so tests can pin them explicitly.

use std::f64::consts::FRAC_2_PI;

use crate::geom::Periodicity;

/// Determinant threshold below which two planar lines are treated as parallel.
pub(crate) const PARALLEL_EPS: f64 = 1e-14;
/// Squared-magnitude threshold for a degenerate great-circle normal.
pub(crate) const GC_DEGENERATE_EPS: f64 = 1e-24;

/// Knobs of the conversion pipeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConvertCfg {
    /// A cell whose vertex angle sum falls short of this value (radians) is
    /// flagged incomplete and gets the sentinel area `-1`.
    pub completeness_threshold: f64,
    /// `dcEdge = boundary_dc_factor * dvEdge` on boundary edges.
    pub boundary_dc_factor: f64,
    /// Latitude offset (radians) of the poleward reference point in the
    /// spherical edge-angle computation.
    pub pole_offset: f64,
    /// Periodic offsets of a planar mesh. Ignored on the sphere.
    pub periodicity: PeriodicityPolicy,
}

/// Where a planar mesh's periodic x/y offsets come from.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PeriodicityPolicy {
    /// Derived from the cell-center extent, see [`Periodicity::from_cell_extent`].
    #[default]
    FromExtent,
    /// The plane is not periodic in either axis.
    Disabled,
    /// Explicit offsets; an offset `<= 0` disables that axis.
    Fixed(Periodicity),
}

impl PeriodicityPolicy {
    /// Resolve the policy against the cell-center x/y ranges.
    pub fn resolve(self, x_range: [f64; 2], y_range: [f64; 2], vertex_degree: usize) -> Periodicity {
        match self {
            Self::FromExtent => Periodicity::from_cell_extent(x_range, y_range, vertex_degree),
            Self::Disabled => Periodicity::default(),
            Self::Fixed(p) => p,
        }
    }
}

impl Default for ConvertCfg {
    fn default() -> Self {
        Self {
            completeness_threshold: 0.8 * FRAC_2_PI,
            boundary_dc_factor: 3f64.sqrt(),
            pole_offset: 0.05,
            periodicity: PeriodicityPolicy::FromExtent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_stable() {
        let cfg = ConvertCfg::default();
        assert!((cfg.completeness_threshold - 0.8 * 2.0 / std::f64::consts::PI).abs() < 1e-15);
        assert!((cfg.boundary_dc_factor * cfg.boundary_dc_factor - 3.0).abs() < 1e-12);
        assert_eq!(cfg.pole_offset, 0.05);
        assert_eq!(cfg.periodicity, PeriodicityPolicy::FromExtent);
    }

    #[test]
    fn periodicity_policy_resolves() {
        let (x, y) = ([0.0, 4.0], [1.0, 3.0]);
        assert_eq!(
            PeriodicityPolicy::FromExtent.resolve(x, y, 3),
            Periodicity::from_cell_extent(x, y, 3)
        );
        assert_eq!(PeriodicityPolicy::Disabled.resolve(x, y, 3), Periodicity::default());
        let fixed = Periodicity { x: 8.0, y: 0.0 };
        assert_eq!(PeriodicityPolicy::Fixed(fixed).resolve(x, y, 4), fixed);
    }
}
