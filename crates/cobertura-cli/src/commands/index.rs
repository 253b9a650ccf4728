use crate::cli::IndexArgs;
use crate::dry_run::{display_planned_actions, ActionType, PlannedAction};
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::IndexOutput;
use anyhow::{Context, Result};
use cobertura_core::config::LayeredConfig;
use cobertura_core::normalize::classify_institution;
use cobertura_index::{
    discover, BuildReport, IndexBuilder, IndexStore, LoadStatus, RecordExtractor, RuralExtractor,
    SourceFile, UrbanExtractor,
};

pub fn execute(
    args: IndexArgs,
    config: &LayeredConfig,
    output: &OutputWriter,
    dry_run: bool,
) -> Result<()> {
    let source_dir = &config.source_dir.value;
    if !source_dir.is_dir() {
        return Err(errors::source_dir_not_found(source_dir).into());
    }

    let urban = UrbanExtractor;
    let rural = RuralExtractor::new(config.aliases.value.clone());

    let mut batches: Vec<(&dyn Batch, Vec<SourceFile>)> = Vec::new();
    if args.category.includes_urban() {
        batches.push((&urban as &dyn Batch, urban_sources(config)?));
    }
    if args.category.includes_rural() {
        batches.push((&rural as &dyn Batch, rural_sources(config, output)));
    }

    let store = IndexStore::new(&config.index_path.value);

    if dry_run {
        return display_planned_actions(output, &plan(&store, &batches));
    }

    let builder = IndexBuilder::new(store);
    let mut reports = Vec::new();
    for (extractor, files) in &batches {
        let report = extractor
            .run(&builder, files)
            .map_err(|e| errors::write_failed(builder.store().path(), &e.to_string()))?;
        reports.push(report);
    }

    if output.is_json() {
        output.result(IndexOutput { reports })?;
    } else {
        for report in &reports {
            display_report(output, report);
        }
    }

    Ok(())
}

/// Object-safe wrapper so urban and rural batches share one list
trait Batch {
    fn label(&self) -> String;
    fn run(&self, builder: &IndexBuilder, files: &[SourceFile])
        -> cobertura_core::Result<BuildReport>;
}

impl<E: RecordExtractor> Batch for E {
    fn label(&self) -> String {
        self.category().to_string()
    }

    fn run(
        &self,
        builder: &IndexBuilder,
        files: &[SourceFile],
    ) -> cobertura_core::Result<BuildReport> {
        builder.build(self, files)
    }
}

fn urban_sources(config: &LayeredConfig) -> Result<Vec<SourceFile>> {
    let paths = discover(&config.source_dir.value, &config.urban_pattern.value)
        .context("Failed to list urban source files")?;
    Ok(paths.into_iter().map(SourceFile::new).collect())
}

/// Configured rural datasets whose source file is present
fn rural_sources(config: &LayeredConfig, output: &OutputWriter) -> Vec<SourceFile> {
    config
        .datasets
        .value
        .iter()
        .filter_map(|dataset| {
            let path = config.source_dir.value.join(&dataset.source);
            if !path.is_file() {
                output.warning(format!("Skipping {}: not found", path.display()));
                return None;
            }
            Some(SourceFile::new(path).with_institution(classify_institution(&dataset.institution)))
        })
        .collect()
}

fn plan(store: &IndexStore, batches: &[(&dyn Batch, Vec<SourceFile>)]) -> Vec<PlannedAction> {
    let (prior, status) = store.load();
    let mut actions = Vec::new();

    for (batch, files) in batches {
        let category = batch.label();
        for file in files {
            actions.push(PlannedAction::new(
                ActionType::ReadFile,
                format!("Read {}", file.path.display()),
            ));
        }

        let existing = prior
            .records()
            .iter()
            .filter(|r| r.category.as_ref().map(|c| c.as_str()) == Some(category.as_str()))
            .count();
        actions.push(
            PlannedAction::new(ActionType::ReplaceRecords, format!("Replace {} records", category))
                .with_detail(format!("Source files: {}", files.len()))
                .with_detail(format!("Existing {} records: {}", category, existing))
                .with_detail(format!("Other records kept: {}", prior.len() - existing)),
        );
    }

    let mut write =
        PlannedAction::new(ActionType::WriteFile, format!("Rewrite {}", store.path().display()));
    if let LoadStatus::Corrupt { reason } = status {
        write = write
            .with_detail(format!("Existing file is unreadable and will be replaced: {}", reason));
    }
    actions.push(write);

    actions
}

fn display_report(output: &OutputWriter, report: &BuildReport) {
    output.section(format!("Index Build: {}", report.category));

    match &report.prior {
        LoadStatus::Missing => output.kv("Prior index", "none"),
        LoadStatus::Loaded { records, dropped } => {
            output.kv("Prior index", format!("{} records", records));
            if *dropped > 0 {
                output.warning(format!(
                    "Dropped {} prior entries without a name or coordinate",
                    dropped
                ));
            }
        }
        LoadStatus::Corrupt { reason } => {
            output.warning(format!("Prior index unreadable, started empty: {}", reason));
        }
    }

    output.kv("Files found", report.files_found);
    output.kv("Files processed", report.files_processed());
    output.kv("Files failed", report.files_failed.len());
    output.kv("Retained from other categories", report.counts.retained);
    output.kv("Replaced", report.counts.replaced);
    output.kv("Produced", report.counts.added);
    if report.skipped_missing_identity > 0 {
        output.kv("Skipped (no identity)", report.skipped_missing_identity);
    }
    if report.skipped_no_coordinate > 0 {
        output.kv("Skipped (no coordinate)", report.skipped_no_coordinate);
    }
    output.kv("Total records", report.counts.total);

    for failure in &report.files_failed {
        output.error(format!("{}: {}", failure.path.display(), failure.error));
    }

    output.success(format!(
        "Saved {} records to {}",
        report.counts.total,
        report.index_path.display()
    ));
}
