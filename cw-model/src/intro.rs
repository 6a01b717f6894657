use cw_core::models::Scenario;
use std::fmt;

/// The explanatory text shown above the chart, worded for a given scenario
#[derive(Clone, Debug, PartialEq)]
pub struct Introduction {
    /// The page heading
    pub title: String,
    /// The opening paragraph
    pub body: String,
    /// What the reader should look for while moving the slider
    pub points: Vec<String>,
}

impl Introduction {
    /// Describe the scenario's pivot and price change
    pub fn for_scenario(scenario: &Scenario) -> Self {
        let q = scenario.original_quantity();
        let p = scenario.original_price();
        let p_new = scenario.new_price();
        let change = if p_new < p {
            "drop"
        } else if p_new > p {
            "rise"
        } else {
            "change"
        };

        Self {
            title: "Consumer Welfare and Demand".to_owned(),
            body: format!(
                "This app visualizes consumer surplus under a linear demand curve \
                 that always pivots through the same initial consumption bundle \
                 (Q = {q}, P = {p}). Use the slider to change the slope of the \
                 demand curve (i.e., elasticity) and see how:"
            ),
            points: vec![
                format!(
                    "The original CS and the additional CS from a price {change} \
                     (from {p} to {p_new}) change"
                ),
                format!(
                    "The shape of the demand curve affects total consumer welfare, \
                     even with the same price {change}"
                ),
            ],
        }
    }
}

impl fmt::Display for Introduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f)?;
        writeln!(f, "{}", self.body)?;
        for point in &self.points {
            writeln!(f, "  - {point}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_wording() {
        let intro = Introduction::for_scenario(&Scenario::default());
        assert!(intro.body.contains("(Q = 10, P = 50)"));
        assert!(intro.points[0].contains("price drop (from 50 to 40)"));
    }

    #[test]
    fn price_rise_wording() {
        let scenario = Scenario::default().with_new_price(55.0).unwrap();
        let intro = Introduction::for_scenario(&scenario);
        assert!(intro.points[0].contains("price rise (from 50 to 55)"));
    }
}
