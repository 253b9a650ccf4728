use crate::cli::InspectArgs;
use crate::output::OutputWriter;
use crate::output_types::{CategoryRow, ConfigRow, InspectOutput, InstitutionRow};
use anyhow::Result;
use cobertura_core::config::LayeredConfig;
use cobertura_index::{IndexStore, LoadStatus};

pub fn execute(args: InspectArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let store = IndexStore::new(&config.index_path.value);
    let (index, load) = store.load();

    let categories: Vec<CategoryRow> = index
        .count_by_category()
        .into_iter()
        .map(|(category, records)| CategoryRow { category: label(category), records })
        .collect();

    let institutions: Vec<InstitutionRow> = index
        .count_by_institution()
        .into_iter()
        .map(|((category, institution), records)| InstitutionRow {
            category: label(category),
            institution: label(institution),
            records,
        })
        .collect();

    let config_rows = args.show_config.then(|| config_rows(config));

    let inspection = InspectOutput {
        index_path: store.path().to_path_buf(),
        load,
        records: index.len(),
        sorted: index.is_sorted(),
        categories,
        institutions,
        config: config_rows,
    };

    if output.is_json() {
        return output.result(inspection);
    }

    output.section("Search Index");
    output.kv("Path", inspection.index_path.display());
    match &inspection.load {
        LoadStatus::Missing => output.warning("No index file yet. Run: cobertura index"),
        LoadStatus::Loaded { dropped, .. } if *dropped > 0 => {
            output.warning(format!("{} entries lack a name or coordinate", dropped));
        }
        LoadStatus::Loaded { .. } => {}
        LoadStatus::Corrupt { reason } => output.error(format!("Index unreadable: {}", reason)),
    }
    output.kv("Records", inspection.records);
    output.kv("Sorted by name", if inspection.sorted { "yes" } else { "no" });

    output.section("By Category");
    output.table(inspection.categories)?;

    output.section("By Institution");
    output.table(inspection.institutions)?;

    if let Some(rows) = inspection.config {
        output.section("Configuration");
        output.table(rows)?;
    }

    Ok(())
}

fn label(tag: String) -> String {
    if tag.is_empty() {
        "(none)".to_string()
    } else {
        tag
    }
}

fn config_rows(config: &LayeredConfig) -> Vec<ConfigRow> {
    let mut rows: Vec<ConfigRow> = config
        .to_inspection_map()
        .into_iter()
        .map(|(key, (value, source))| ConfigRow { key, value, source: format!("{:?}", source) })
        .collect();
    rows.sort_by(|a, b| a.key.cmp(&b.key));
    rows
}
