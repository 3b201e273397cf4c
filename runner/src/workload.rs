use std::error::Error;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use scheduler::{PolicyKind, SchedulerConfig};

/// One process of a workload
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// When the process becomes ready, in milliseconds
    #[serde(default)]
    pub arrival_ms: u32,
    /// CPU time it needs, in milliseconds
    pub burst_ms: u32,
}

/// A scheduler configuration and the processes to feed it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workload {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    pub processes: Vec<ProcessSpec>,
}

impl Workload {
    /// Reads a workload from a JSON file
    pub fn load(path: &Path) -> Result<Workload, Box<dyn Error>> {
        let text = fs::read_to_string(path)?;
        let workload = serde_json::from_str(&text)?;

        Ok(workload)
    }

    /// Two long jobs, two short ones and a late arrival, under MLFQ
    pub fn demo() -> Workload {
        let processes = [(0, 1200), (0, 300), (200, 1600), (400, 100), (1500, 700)]
            .iter()
            .map(|&(arrival_ms, burst_ms)| ProcessSpec { arrival_ms, burst_ms })
            .collect();

        Workload {
            scheduler: SchedulerConfig::with_policy(PolicyKind::Mlfq),
            processes,
        }
    }
}
