use crate::{Condition, Trial};

/// Drop treadmill trials whose grade is within `tol_pct` of zero.
///
/// Flat walking does no vertical work, so those rows only add zeros to an
/// efficiency average. Stair trials are always kept and order is preserved.
pub fn remove_flat_treadmill(
    trials: impl IntoIterator<Item = Trial>,
    tol_pct: f64,
) -> Vec<Trial> {
    let tol_pct = tol_pct.abs();

    trials
        .into_iter()
        .filter(|trial| match trial.condition {
            Condition::Treadmill { grade_pct, .. } => grade_pct.abs() > tol_pct,
            Condition::Stair { .. } => true,
        })
        .collect()
}
