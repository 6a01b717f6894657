/// Every quantity derived from one slope of the demand curve.
///
/// A result is an immutable snapshot: it is recomputed from scratch whenever
/// the slope changes and nothing of it survives the next recomputation.
/// Surpluses may be negative when the new price exceeds the original price.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurplusResult {
    /// The price-axis intercept `b` of the demand curve
    pub intercept: f64,
    /// The quantity demanded at the new price
    pub new_quantity: f64,
    /// The surplus at the original price, from zero to the original quantity
    pub original_surplus: f64,
    /// The surplus gained on the units already purchased
    pub rectangle_surplus: f64,
    /// The surplus gained (or lost) on the units between the original and new quantities
    pub triangle_surplus: f64,
    /// The change in surplus caused by the price change
    pub additional_surplus: f64,
    /// The surplus at the new price
    pub total_surplus: f64,
}
