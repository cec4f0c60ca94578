//! Reshapes timing records from runs at several dataset sizes into one
//! table per stage: a row per backend, a column per size.

use serde::Serialize;

use crate::error::{BenchError, BenchResult};
use crate::timing::{Stage, TimingRecord};

/// Collects timing records across dataset sizes.
#[derive(Debug, Clone, Default)]
pub struct ResultAggregator {
    runs: Vec<(usize, Vec<TimingRecord>)>,
}

/// One backend's cells for a stage, aligned with `ResultTable::sizes`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageRow {
    pub backend: String,
    pub cells: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageTable {
    pub stage: Stage,
    pub rows: Vec<StageRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTable {
    pub sizes: Vec<usize>,
    pub stages: Vec<StageTable>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of the records produced at one dataset size.
    /// Recording the same size twice replaces the earlier run.
    pub fn record(&mut self, size: usize, records: Vec<TimingRecord>) {
        match self.runs.iter_mut().find(|(existing, _)| *existing == size) {
            Some(run) => run.1 = records,
            None => self.runs.push((size, records)),
        }
    }

    /// Backend names in first-seen order.
    fn backends(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for (_, records) in &self.runs {
            for record in records {
                if !names.contains(&record.name) {
                    names.push(record.name.clone());
                }
            }
        }
        names
    }

    /// Builds the per-stage table. Degraded passes leave empty cells.
    pub fn table(&self) -> ResultTable {
        let sizes: Vec<usize> = self.runs.iter().map(|(size, _)| *size).collect();
        let backends = self.backends();

        let stages = Stage::ALL
            .iter()
            .map(|stage| StageTable {
                stage: *stage,
                rows: backends
                    .iter()
                    .map(|backend| StageRow {
                        backend: backend.clone(),
                        cells: self
                            .runs
                            .iter()
                            .map(|(_, records)| {
                                records
                                    .iter()
                                    .find(|record| &record.name == backend)
                                    .and_then(|record| record.elapsed_ms(*stage))
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        ResultTable { sizes, stages }
    }
}

impl ResultTable {
    pub fn stage(&self, stage: Stage) -> Option<&StageTable> {
        self.stages.iter().find(|table| table.stage == stage)
    }

    /// Renders one stage as CSV: header `backend,<size>,..`, then one line
    /// per backend. Missing cells are empty.
    pub fn to_csv(&self, stage: Stage) -> BenchResult<String> {
        let mut wtr = csv::Writer::from_writer(Vec::new());

        let mut header = vec!["backend".to_string()];
        header.extend(self.sizes.iter().map(|size| size.to_string()));
        wtr.write_record(&header)?;

        if let Some(table) = self.stage(stage) {
            for row in &table.rows {
                let mut fields = vec![row.backend.clone()];
                fields.extend(row.cells.iter().map(|cell| match cell {
                    Some(ms) => format!("{:.3}", ms),
                    None => String::new(),
                }));
                wtr.write_record(&fields)?;
            }
        }

        let bytes = wtr
            .into_inner()
            .map_err(|e| BenchError::Serialization(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| BenchError::Serialization(e.to_string()))
    }
}
