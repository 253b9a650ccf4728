use crate::cli::OptimizeArgs;
use crate::dry_run::{display_planned_actions, ActionType, PlannedAction};
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::{OptimizeOutput, OptimizeRow};
use anyhow::Result;
use cobertura_core::config::{DatasetConfig, LayeredConfig};
use cobertura_index::{DatasetOutcome, FeatureReducer, GeoJsonOptimizer, GeometryFilter};

pub fn execute(
    args: OptimizeArgs,
    config: &LayeredConfig,
    output: &OutputWriter,
    dry_run: bool,
) -> Result<()> {
    let datasets = select_datasets(config, &args.datasets)?;

    let reducer =
        FeatureReducer::new(config.needed_fields.value.clone(), config.aliases.value.clone())
            .with_filter(GeometryFilter::PointsOnly);
    let optimizer =
        GeoJsonOptimizer::new(reducer, &config.source_dir.value, &config.output_dir.value);

    if dry_run {
        return display_planned_actions(output, &plan(&optimizer, &datasets));
    }

    let outcomes = optimizer
        .optimize_all(&datasets)
        .map_err(|e| errors::write_failed(&config.output_dir.value, &e.to_string()))?;

    if output.is_json() {
        output.result(OptimizeOutput { outcomes })?;
        return Ok(());
    }

    output.section("Trimmed GeoJSON");
    let mut rows = Vec::new();
    for outcome in &outcomes {
        match outcome {
            DatasetOutcome::Written(report) => rows.push(OptimizeRow::from(report)),
            DatasetOutcome::Missing { source, .. } => {
                output.warning(format!("Skipping {}: not found", source.display()));
            }
            DatasetOutcome::Failed { source, error, .. } => {
                output.error(format!("Error processing {}: {}", source.display(), error));
            }
        }
    }
    let written = rows.len();
    output.table(rows)?;
    output.success(format!(
        "Wrote {} of {} datasets to {}",
        written,
        outcomes.len(),
        config.output_dir.value.display()
    ));

    Ok(())
}

/// The named datasets in the order given, or all configured ones
fn select_datasets(config: &LayeredConfig, names: &[String]) -> Result<Vec<DatasetConfig>> {
    if names.is_empty() {
        return Ok(config.datasets.value.clone());
    }

    names
        .iter()
        .map(|name| {
            config.dataset(name).cloned().ok_or_else(|| {
                let known: Vec<&str> =
                    config.datasets.value.iter().map(|d| d.name.as_str()).collect();
                anyhow::Error::from(errors::unknown_dataset(name, &known))
            })
        })
        .collect()
}

fn plan(optimizer: &GeoJsonOptimizer, datasets: &[DatasetConfig]) -> Vec<PlannedAction> {
    datasets
        .iter()
        .map(|dataset| {
            let source = optimizer.source_path(dataset);
            let output = optimizer.output_path(dataset);
            if source.is_file() {
                PlannedAction::new(ActionType::WriteFile, format!("Write {}", output.display()))
                    .with_detail(format!("From: {}", source.display()))
                    .with_detail(format!("Default institution: {}", dataset.institution))
            } else {
                PlannedAction::new(ActionType::SkipFile, format!("Skip {}", dataset.name))
                    .with_detail(format!("Not found: {}", source.display()))
            }
        })
        .collect()
}
