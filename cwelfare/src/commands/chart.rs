use clap::ValueEnum;
use cw_core::{models::Summary, ports::SummaryHost};
use cw_model::{
    Frame, Introduction, Presenter,
    export::{HtmlPage, JsonWriter, SvgWriter},
};
use std::{convert::Infallible, io::Write, str::FromStr};
use tracing::{Level, event};

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
pub enum ChartFormat {
    Json,
    Svg,
    Html,
}

impl ChartFormat {
    /// Present one frame into `buffer`, returning the frame and the buffer
    pub fn render<W: Write>(
        &self,
        presenter: &Presenter,
        raw_slope: f64,
        buffer: W,
    ) -> anyhow::Result<(Frame, W)> {
        let result = match self {
            Self::Json => {
                let mut host = JsonWriter(buffer);
                let frame = presenter.present(raw_slope, &mut host, &mut LogSummary)?;
                (frame, host.0)
            }
            Self::Svg => {
                let mut host = SvgWriter(buffer);
                let frame = presenter.present(raw_slope, &mut host, &mut LogSummary)?;
                (frame, host.0)
            }
            Self::Html => {
                let intro = Introduction::for_scenario(presenter.scenario());
                let mut page = HtmlPage::new(buffer, intro);
                let frame = presenter.present_to(raw_slope, &mut page)?;
                (frame, page.into_inner())
            }
        };
        Ok(result)
    }
}

impl FromStr for ChartFormat {
    type Err = ChartFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" | "JSON" => Ok(Self::Json),
            "svg" | "SVG" => Ok(Self::Svg),
            "html" | "HTML" | "htm" | "HTM" => Ok(Self::Html),
            _ => Err(Self::Err::Unknown(s.to_owned())),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ChartFormatError {
    #[error("Unknown chart format: {0}")]
    Unknown(String),
}

// Charts that are not pages carry no numbers, so the figures go to the log instead
struct LogSummary;

impl SummaryHost for LogSummary {
    type Error = Infallible;

    fn show(&mut self, summary: &Summary) -> Result<(), Self::Error> {
        for (label, value) in summary.lines() {
            event!(Level::INFO, "{label}: {value}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_from_extensions() {
        assert_eq!("json".parse::<ChartFormat>().unwrap(), ChartFormat::Json);
        assert_eq!("SVG".parse::<ChartFormat>().unwrap(), ChartFormat::Svg);
        assert_eq!("htm".parse::<ChartFormat>().unwrap(), ChartFormat::Html);
        assert_eq!("html".parse::<ChartFormat>().unwrap(), ChartFormat::Html);
        assert!(matches!(
            "png".parse::<ChartFormat>(),
            Err(ChartFormatError::Unknown(ext)) if ext == "png"
        ));
    }

    #[test]
    fn render_each_format() {
        let presenter = Presenter::default();

        let (frame, json) = ChartFormat::Json.render(&presenter, 2.0, Vec::new()).unwrap();
        assert_eq!(frame.result.total_surplus, 225.0);
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert!(value["series"]["demand"].is_object());

        let (_, svg) = ChartFormat::Svg.render(&presenter, 2.0, Vec::new()).unwrap();
        let svg = String::from_utf8(svg).unwrap();
        assert!(svg.starts_with("<svg"));

        let (_, html) = ChartFormat::Html.render(&presenter, 2.0, Vec::new()).unwrap();
        let html = String::from_utf8(html).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Consumer Welfare and Demand"));
        assert!(html.contains("<svg"));
    }
}
