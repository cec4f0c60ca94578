//! Renders the aggregated result table.

use sample_store_core::aggregate::ResultTable;

use crate::cli::OutputFormat;

pub fn render(table: &ResultTable, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Table => render_table(table),
        OutputFormat::Csv => render_csv(table)?,
        OutputFormat::Json => serde_json::to_string_pretty(table)?,
    })
}

fn render_table(table: &ResultTable) -> String {
    let name_width = table
        .stages
        .iter()
        .flat_map(|stage| stage.rows.iter().map(|row| row.backend.len()))
        .max()
        .unwrap_or(0)
        .max("backend".len());

    let mut out = String::new();
    for stage in &table.stages {
        out.push_str(&format!("\n{}\n", stage.stage));
        out.push_str(&format!("{:<name_width$}", "backend"));
        for size in &table.sizes {
            out.push_str(&format!(" {:>12}", format!("x{}", size)));
        }
        out.push('\n');
        out.push_str(&"-".repeat(name_width + 13 * table.sizes.len()));
        out.push('\n');

        for row in &stage.rows {
            out.push_str(&format!("{:<name_width$}", row.backend));
            for cell in &row.cells {
                match cell {
                    Some(ms) => out.push_str(&format!(" {:>10.3}ms", ms)),
                    None => out.push_str(&format!(" {:>12}", "-")),
                }
            }
            out.push('\n');
        }
    }
    out
}

fn render_csv(table: &ResultTable) -> anyhow::Result<String> {
    let blocks = table
        .stages
        .iter()
        .map(|stage| Ok(format!("# {}\n{}", stage.stage, table.to_csv(stage.stage)?)))
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(blocks.join("\n"))
}
