//! Numeric tolerance policy.
//!
//! The oracle does not return exact 0/1 values for binary decisions. The same
//! tolerance is used when interpreting oracle results and when the subtour
//! detector decides whether an arc is selected, so the two never disagree
//! about which arcs are in the solution.

/// Maximum distance from an integer at which a binary value still counts as
/// integral.
pub const INTEGRALITY_TOLERANCE: f64 = 1e-4;

/// Minimum value an arc variable needs to count as selected.
pub const ARC_SELECTION_THRESHOLD: f64 = 1.0 - INTEGRALITY_TOLERANCE;

/// Returns the arc selection threshold for a given tolerance.
///
/// # Examples
///
/// ```
/// use tourforge_core::tolerance::{arc_selection_threshold, ARC_SELECTION_THRESHOLD, INTEGRALITY_TOLERANCE};
///
/// assert_eq!(arc_selection_threshold(INTEGRALITY_TOLERANCE), ARC_SELECTION_THRESHOLD);
/// ```
pub fn arc_selection_threshold(tolerance: f64) -> f64 {
    1.0 - tolerance
}

/// Returns `true` if `value` lies within `tolerance` of an integer.
pub fn is_integral(value: f64, tolerance: f64) -> bool {
    (value - value.round()).abs() <= tolerance
}
