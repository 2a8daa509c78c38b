// Per-Round JSONL Time Series Recorder
// Outputs one JSON line per round for independent analysis

use serde::Serialize;
use explore_engine::RoundSnapshot;
use std::io::Write;

#[derive(Debug, Serialize)]
pub struct RoundRecord {
    pub round: u64,
    pub occupied: usize,
    pub largest_group: u32,
    pub robots_at_root: u32,
    pub explored: usize,
    pub finished: usize,
    pub inhabited: usize,
    pub traversed_edges: usize,
    pub finished_fraction: f64,
}

impl RoundRecord {
    pub fn from_snapshot(snapshot: &RoundSnapshot) -> Self {
        let n = snapshot.finished.len();
        let finished = snapshot.finished_count();
        // The root is marked traversed without an edge above it.
        let traversed_edges = snapshot.traversed.iter().filter(|&&t| t).count().saturating_sub(1);

        Self {
            round: snapshot.round,
            occupied: snapshot.occupied_count(),
            largest_group: snapshot.robot_count.iter().copied().max().unwrap_or(0),
            robots_at_root: snapshot.robot_count.first().copied().unwrap_or(0),
            explored: snapshot.explored_count(),
            finished,
            inhabited: snapshot.inhabited.iter().filter(|&&h| h).count(),
            traversed_edges,
            finished_fraction: if n > 0 { finished as f64 / n as f64 } else { 0.0 },
        }
    }
}

/// Time series recorder that accumulates round records and writes JSONL
pub struct TimeSeriesRecorder {
    records: Vec<RoundRecord>,
}

impl TimeSeriesRecorder {
    pub fn new() -> Self {
        Self { records: Vec::new() }
    }

    pub fn record(&mut self, snapshot: &RoundSnapshot) {
        self.records.push(RoundRecord::from_snapshot(snapshot));
    }

    /// Write all records to a JSONL file
    pub fn write_jsonl(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = std::fs::File::create(path)?;
        for record in &self.records {
            let line = serde_json::to_string(record)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }
}
