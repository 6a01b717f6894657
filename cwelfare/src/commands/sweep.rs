use cw_core::models::{Slope, SurplusResult};
use cw_model::Presenter;
use serde::Serialize;
use std::io::Write;

/// One stop of the slope control and the surpluses computed for it
#[derive(Debug, Serialize)]
pub struct SweepRecord {
    pub slope: Slope,
    pub result: SurplusResult,
}

/// Evaluate the slope control end to end and write the records as a JSON array
pub fn sweep<W: Write>(presenter: &Presenter, buffer: &mut W) -> anyhow::Result<usize> {
    let records = presenter
        .sweep()
        .map(|(slope, result)| SweepRecord { slope, result })
        .collect::<Vec<_>>();
    serde_json::to_writer_pretty(&mut *buffer, &records)?;
    writeln!(buffer)?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_covers_every_stop() {
        let presenter = Presenter::default();
        let mut buffer = Vec::new();
        let count = sweep(&presenter, &mut buffer).unwrap();
        assert_eq!(count, 46);

        let records: Vec<serde_json::Value> = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(records.len(), 46);
        assert_eq!(records[0]["slope"], 0.5);
        assert_eq!(records[5]["slope"], 1.0);
        assert_eq!(records[5]["result"]["total_surplus"], 200.0);
        assert_eq!(records[45]["slope"], 5.0);
    }
}
