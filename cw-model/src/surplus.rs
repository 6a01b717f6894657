use cw_core::models::{LinearDemand, Scenario, Slope, SurplusResult};
use tracing::{Level, event};

/// Compute the demand curve and every surplus quantity for one slope.
///
/// The demand curve pivots through the scenario's original bundle, so only
/// its intercept and the quantity demanded at the new price depend on the
/// slope. The typed [`Slope`] guarantees the computation is well defined.
pub fn compute(scenario: &Scenario, slope: Slope) -> SurplusResult {
    let result = compute_raw(
        slope.value(),
        scenario.original_quantity(),
        scenario.original_price(),
        scenario.new_price(),
    );
    event!(
        Level::DEBUG,
        slope = slope.value(),
        intercept = result.intercept,
        new_quantity = result.new_quantity,
        total_surplus = result.total_surplus,
        "recomputed surplus"
    );
    result
}

/// Compute the surplus quantities from raw numbers.
///
/// With `b = original_price + slope · original_quantity`:
/// - the original surplus is the triangle `½·s·Q_eq²`,
/// - the new quantity solves `b - s·Q = new_price`,
/// - the rectangle is the price change applied to the units already purchased,
/// - the triangle is `∫ (P(Q) - new_price) dQ` from `Q_eq` to `Q_new`.
///
/// No case is special-cased by sign: a price rise yields a negative
/// rectangle and hence a negative additional surplus.
///
/// # Preconditions
///
/// `slope > 0`, `original_quantity > 0` and `original_price > 0`. Only the
/// slope is asserted, and only in debug builds; in release builds a zero slope
/// produces non-finite values rather than an error. Use [`compute`] with a
/// validated [`Slope`] and [`Scenario`] instead.
pub fn compute_raw(
    slope: f64,
    original_quantity: f64,
    original_price: f64,
    new_price: f64,
) -> SurplusResult {
    debug_assert!(slope > 0.0, "slope must be positive, got {slope}");
    let (s, q_eq, p_eq, p_new) = (slope, original_quantity, original_price, new_price);

    let b = p_eq + s * q_eq;
    let original_surplus = 0.5 * s * q_eq * q_eq;
    let q_new = (b - p_new) / s;

    let rectangle_surplus = (p_eq - p_new) * q_eq;
    let triangle_surplus =
        b * (q_new - q_eq) - 0.5 * s * (q_new * q_new - q_eq * q_eq) - p_new * (q_new - q_eq);

    let additional_surplus = rectangle_surplus + triangle_surplus;

    SurplusResult {
        intercept: b,
        new_quantity: q_new,
        original_surplus,
        rectangle_surplus,
        triangle_surplus,
        additional_surplus,
        total_surplus: original_surplus + additional_surplus,
    }
}

/// The demand curve a result was computed for
pub fn demand_curve(scenario: &Scenario, slope: Slope) -> LinearDemand {
    LinearDemand::through(scenario, slope)
}
