/// A vertex of a polyline or polygon in (quantity, price) space
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema), schemars(inline))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// The quantity (horizontal) coordinate
    pub quantity: f64,
    /// The price (vertical) coordinate
    pub price: f64,
}

impl From<(f64, f64)> for Point {
    fn from((quantity, price): (f64, f64)) -> Self {
        Self { quantity, price }
    }
}
