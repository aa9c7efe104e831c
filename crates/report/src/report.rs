use crate::ReportError;
use bingo_core::{Analysis, Heatmap, ItemStats};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Machine-readable analysis of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub seed: u64,
    pub num_cards: usize,
    pub pool_size: usize,
    pub dup_free: bool,
    pub total_repeats: u32,
    pub heatmap: Heatmap,
    pub stats: BTreeMap<String, ItemStats>,
}

impl AnalysisReport {
    pub fn new(seed: u64, pool_size: usize, analysis: &Analysis) -> Self {
        Self {
            seed,
            num_cards: analysis.num_cards,
            pool_size,
            dup_free: analysis.dup_free(),
            total_repeats: analysis.total_repeats,
            heatmap: analysis.heatmap,
            stats: analysis.stats.clone(),
        }
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub fn write_json(path: &Path, report: &AnalysisReport) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, report.to_json()?)?;
    Ok(())
}
