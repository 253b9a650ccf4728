use cobertura_index::{BuildReport, DatasetOutcome, LoadStatus, OptimizeReport};
use serde::Serialize;
use std::path::PathBuf;
use tabled::Tabled;

/// Output for index command
#[derive(Debug, Serialize)]
pub struct IndexOutput {
    pub reports: Vec<BuildReport>,
}

/// Output for optimize command
#[derive(Debug, Serialize)]
pub struct OptimizeOutput {
    pub outcomes: Vec<DatasetOutcome>,
}

/// One trimmed file, as a table row
#[derive(Debug, Serialize, Tabled)]
pub struct OptimizeRow {
    #[tabled(rename = "Dataset")]
    pub dataset: String,
    #[tabled(rename = "Features")]
    pub features: usize,
    #[tabled(rename = "Kept")]
    pub kept: usize,
    #[tabled(rename = "Non-point")]
    pub skipped: usize,
    #[tabled(rename = "Input KB")]
    pub input_kb: String,
    #[tabled(rename = "Output KB")]
    pub output_kb: String,
    #[tabled(rename = "Reduction")]
    pub reduction: String,
}

impl From<&OptimizeReport> for OptimizeRow {
    fn from(report: &OptimizeReport) -> Self {
        Self {
            dataset: report.dataset.clone(),
            features: report.stats.features_in,
            kept: report.stats.features_kept,
            skipped: report.stats.skipped_not_point,
            input_kb: format!("{:.1}", report.input_kib()),
            output_kb: format!("{:.1}", report.output_kib()),
            reduction: format!("{:.1}%", report.reduction_percent()),
        }
    }
}

/// Output for inspect command
#[derive(Debug, Serialize)]
pub struct InspectOutput {
    pub index_path: PathBuf,
    pub load: LoadStatus,
    pub records: usize,
    pub sorted: bool,
    pub categories: Vec<CategoryRow>,
    pub institutions: Vec<InstitutionRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Vec<ConfigRow>>,
}

#[derive(Debug, Serialize, Tabled)]
pub struct CategoryRow {
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Records")]
    pub records: usize,
}

#[derive(Debug, Serialize, Tabled)]
pub struct InstitutionRow {
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Institution")]
    pub institution: String,
    #[tabled(rename = "Records")]
    pub records: usize,
}

#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}
