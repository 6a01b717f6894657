use approx::assert_abs_diff_eq;
use cw_core::models::{
    Dash, LinearDemand, PlotSeries, Point, Scenario, SeriesId, SeriesKind, Slope, SlopeRange,
};
use cw_model::{SeriesBuilder, compute};
use rstest::*;

fn pt(quantity: f64, price: f64) -> Point {
    Point { quantity, price }
}

fn build(scenario: &Scenario, s: f64) -> PlotSeries {
    let slope = Slope::new(s).unwrap();
    let demand = LinearDemand::through(scenario, slope);
    let result = compute(scenario, slope);
    SeriesBuilder::default().build(scenario, &demand, &result)
}

#[test]
fn emits_every_series_for_a_price_drop() {
    let series = build(&Scenario::default(), 1.0);
    assert_eq!(
        series.keys().copied().collect::<Vec<_>>(),
        vec![
            SeriesId::Demand,
            SeriesId::OriginalPrice,
            SeriesId::NewPrice,
            SeriesId::OriginalSurplus,
            SeriesId::AdditionalSurplusRectangle,
            SeriesId::AdditionalSurplusTriangle,
        ]
    );
}

#[rstest]
#[case(0.5)]
#[case(1.0)]
#[case(5.0)]
fn demand_samples_span_the_axis(#[case] s: f64) {
    let scenario = Scenario::default();
    let series = build(&scenario, s);
    let points = &series[&SeriesId::Demand].points;

    assert_eq!(points.len(), 400);
    assert_eq!(points.first().unwrap().quantity, 0.0);
    assert_eq!(points.last().unwrap().quantity, scenario.max_quantity());
    assert!(points.windows(2).all(|w| w[0].quantity < w[1].quantity));
    for pt in points {
        assert_abs_diff_eq!(pt.price, 50.0 + s * (10.0 - pt.quantity), epsilon = 1e-9);
    }
}

#[test]
fn price_lines_are_horizontal() {
    let series = build(&Scenario::default(), 1.0);

    let original = &series[&SeriesId::OriginalPrice];
    assert_eq!(original.kind, SeriesKind::Line);
    assert_eq!(original.stroke.dash, Dash::Dash);
    assert_eq!(
        original.points,
        vec![pt(0.0, 50.0), pt(40.0, 50.0)]
    );

    let new = &series[&SeriesId::NewPrice];
    assert_eq!(new.stroke.dash, Dash::Dot);
    assert_eq!(new.stroke.color.as_deref(), Some("purple"));
    assert_eq!(new.points, vec![pt(0.0, 40.0), pt(40.0, 40.0)]);
}

#[test]
fn original_region_traces_curve_then_price() {
    let series = build(&Scenario::default(), 2.0);
    let region = &series[&SeriesId::OriginalSurplus];
    assert_eq!(region.kind, SeriesKind::Region);
    assert_eq!(region.opacity, 0.4);

    let (curve, line) = region.points.split_at(region.points.len() / 2);
    assert_eq!(curve.len(), 200);
    assert_eq!(curve.first().unwrap().quantity, 0.0);
    assert_eq!(curve.first().unwrap().price, 70.0);
    assert_eq!(curve.last().unwrap().quantity, 10.0);
    assert_abs_diff_eq!(curve.last().unwrap().price, 50.0, epsilon = 1e-12);

    assert!(line.iter().all(|pt| pt.price == 50.0));
    assert_eq!(line.first().unwrap().quantity, 10.0);
    assert_eq!(line.last().unwrap().quantity, 0.0);
}

#[test]
fn rectangle_corners() {
    let series = build(&Scenario::default(), 1.0);
    let rectangle = &series[&SeriesId::AdditionalSurplusRectangle];
    assert_eq!(
        rectangle.points,
        vec![
            pt(0.0, 50.0),
            pt(10.0, 50.0),
            pt(10.0, 40.0),
            pt(0.0, 40.0),
        ]
    );
    assert!(rectangle.show_legend);
}

#[test]
fn triangle_spans_new_quantity() {
    let series = build(&Scenario::default(), 2.0);
    let triangle = &series[&SeriesId::AdditionalSurplusTriangle];

    // shares the rectangle's legend entry
    assert!(!triangle.show_legend);
    assert_eq!(
        triangle.legend_group,
        series[&SeriesId::AdditionalSurplusRectangle].legend_group
    );

    let (curve, line) = triangle.points.split_at(triangle.points.len() / 2);
    assert_eq!(curve.first().unwrap().quantity, 10.0);
    assert_eq!(curve.last().unwrap().quantity, 15.0);
    assert_abs_diff_eq!(curve.last().unwrap().price, 40.0, epsilon = 1e-12);
    assert!(line.iter().all(|pt| pt.price == 40.0));
}

#[rstest]
#[case::no_change(50.0)]
#[case::price_rise(55.0)]
fn triangle_omitted_without_extra_units(#[case] new_price: f64) {
    let scenario = Scenario::default().with_new_price(new_price).unwrap();
    for s in SlopeRange::default().stops() {
        let series = build(&scenario, s.value());
        assert!(!series.contains_key(&SeriesId::AdditionalSurplusTriangle));
        assert!(series.contains_key(&SeriesId::AdditionalSurplusRectangle));
    }

    if new_price > 50.0 {
        // the numbers still report the loss
        let result = compute(&scenario, Slope::new(1.0).unwrap());
        assert!(result.additional_surplus < 0.0);
    }
}

#[test]
fn custom_sampling() {
    let scenario = Scenario::default();
    let slope = Slope::new(1.0).unwrap();
    let demand = LinearDemand::through(&scenario, slope);
    let result = compute(&scenario, slope);
    let series = SeriesBuilder::new(11, 3)
        .unwrap()
        .build(&scenario, &demand, &result);

    let quantities = series[&SeriesId::Demand]
        .points
        .iter()
        .map(|pt| pt.quantity)
        .collect::<Vec<_>>();
    assert_eq!(
        quantities,
        vec![0.0, 4.0, 8.0, 12.0, 16.0, 20.0, 24.0, 28.0, 32.0, 36.0, 40.0]
    );
    assert_eq!(series[&SeriesId::OriginalSurplus].points.len(), 6);
}
