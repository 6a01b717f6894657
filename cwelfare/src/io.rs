use crate::{ChartFormat, CliError};
use clap::Args;
use std::{
    fs::File,
    io::{BufWriter, Write, stdout},
    path::PathBuf,
    str::FromStr,
};

// Every subcommand writes somewhere: a file, or stdout when none is named.
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// The output file ("-" implies stdout)
    #[arg(short, long, default_value = "-", value_parser = clap::value_parser!(Destination))]
    output: Destination,
}

impl OutputArgs {
    pub fn write(&self) -> anyhow::Result<Box<dyn Write>> {
        match &self.output {
            Destination::File(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
            Destination::Stdout => Ok(Box::new(stdout().lock())),
        }
    }

    /// The chart format: the requested one, else the one named by the file extension
    pub fn chart_format(&self, requested: Option<ChartFormat>) -> anyhow::Result<ChartFormat> {
        if let Some(format) = requested {
            return Ok(format);
        }
        let Destination::File(path) = &self.output else {
            return Err(CliError::FormatInference.into());
        };
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) => Ok(ext.parse()?),
            None => Err(CliError::FormatInference.into()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Destination {
    File(PathBuf),
    Stdout,
}

impl FromStr for Destination {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "-" => Self::Stdout,
            path => Self::File(PathBuf::from(path)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChartFormatError;

    fn to(output: &str) -> OutputArgs {
        OutputArgs {
            output: output.parse().unwrap(),
        }
    }

    #[test]
    fn dash_is_stdout() {
        assert_eq!(to("-").output, Destination::Stdout);
        assert_eq!(
            to("out/chart.svg").output,
            Destination::File(PathBuf::from("out/chart.svg"))
        );
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(to("chart.svg").chart_format(None).unwrap(), ChartFormat::Svg);
        assert_eq!(to("chart.HTM").chart_format(None).unwrap(), ChartFormat::Html);
        assert_eq!(to("chart.json").chart_format(None).unwrap(), ChartFormat::Json);
    }

    #[test]
    fn requested_format_wins() {
        assert_eq!(
            to("chart.svg").chart_format(Some(ChartFormat::Json)).unwrap(),
            ChartFormat::Json
        );
        assert_eq!(
            to("-").chart_format(Some(ChartFormat::Html)).unwrap(),
            ChartFormat::Html
        );
    }

    #[test]
    fn format_must_be_inferable() {
        for output in ["-", "chart"] {
            let err = to(output).chart_format(None).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<CliError>(),
                Some(CliError::FormatInference)
            ));
        }

        let err = to("chart.png").chart_format(None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ChartFormatError>(),
            Some(ChartFormatError::Unknown(ext)) if ext == "png"
        ));
    }
}
