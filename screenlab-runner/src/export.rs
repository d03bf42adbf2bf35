//! Rendering and export: turns a finished content model into one artifact.
//!
//! Renderers implement [`ReportRenderer`]. Two ship in-tree:
//! - **JSON**: the full content model, round-trippable with schema versioning
//! - **Markdown**: human-readable report, one section per descriptor
//!
//! Unknown (newer) schema versions are rejected on import.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::config::OutputFormat;
use crate::content::{
    BreakdownSection, ReportContentModel, ReportSection, SummarySection, TableSection,
    TitleSection, SCHEMA_VERSION,
};

/// Consumes a finished content model and produces the artifact bytes.
pub trait ReportRenderer {
    fn render(&self, model: &ReportContentModel) -> Result<Vec<u8>>;

    /// File extension without the dot.
    fn extension(&self) -> &'static str;
}

/// Renderer for a configured output format.
pub fn renderer_for(format: OutputFormat) -> Box<dyn ReportRenderer> {
    match format {
        OutputFormat::Json => Box::new(JsonRenderer),
        OutputFormat::Markdown => Box::new(MarkdownRenderer),
    }
}

// ─── JSON ───────────────────────────────────────────────────────────

pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, model: &ReportContentModel) -> Result<Vec<u8>> {
        Ok(export_json(model)?.into_bytes())
    }

    fn extension(&self) -> &'static str {
        OutputFormat::Json.extension()
    }
}

/// Serialize a content model to pretty JSON.
pub fn export_json(model: &ReportContentModel) -> Result<String> {
    serde_json::to_string_pretty(model).context("failed to serialize content model to JSON")
}

/// Deserialize a content model, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<ReportContentModel> {
    let model: ReportContentModel =
        serde_json::from_str(json).context("failed to deserialize content model from JSON")?;
    if model.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            model.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(model)
}

// ─── Markdown ───────────────────────────────────────────────────────

pub struct MarkdownRenderer;

impl ReportRenderer for MarkdownRenderer {
    fn render(&self, model: &ReportContentModel) -> Result<Vec<u8>> {
        Ok(generate_markdown(model).into_bytes())
    }

    fn extension(&self) -> &'static str {
        OutputFormat::Markdown.extension()
    }
}

/// Generate a Markdown document with one block per section.
pub fn generate_markdown(model: &ReportContentModel) -> String {
    let mut md = String::with_capacity(2048);
    for section in &model.sections {
        match section {
            ReportSection::Title(t) => push_title(&mut md, t),
            ReportSection::Summary(s) => push_summary(&mut md, s),
            ReportSection::Breakdown(b) => push_breakdown(&mut md, b),
            ReportSection::Table(t) => push_table(&mut md, t),
        }
        md.push('\n');
    }

    let p = &model.provenance;
    md.push_str("---\n\n");
    if let Some(ref source) = p.source {
        md.push_str(&format!("Source: {}  \n", escape_text(source)));
    }
    // Generation time lives only in the JSON provenance so reruns over the
    // same source render identical Markdown.
    md.push_str(&format!("Source hash: {}\n", p.source_hash));
    md
}

fn push_title(md: &mut String, t: &TitleSection) {
    md.push_str(&format!("# {}\n\n", escape_text(&t.title)));
    md.push_str(&format!("{}\n\n", escape_text(&t.subtitle)));
    md.push_str(&format!("_{}_\n", escape_text(&t.notes)));
}

fn push_summary(md: &mut String, s: &SummarySection) {
    md.push_str(&format!("## {}\n\n", escape_text(&s.heading)));
    md.push_str("| Metric | Value |\n");
    md.push_str("| --- | ---: |\n");
    for line in &s.lines {
        md.push_str(&format!(
            "| {} | {} |\n",
            escape_text(&line.label),
            escape_text(&line.value)
        ));
    }
}

fn push_breakdown(md: &mut String, b: &BreakdownSection) {
    md.push_str(&format!("## {}\n\n", escape_text(&b.heading)));
    md.push_str(&format!("{}\n\n", escape_text(&b.caption)));
    for row in &b.rows {
        md.push_str(&format!("- {}\n", escape_text(&row.display())));
    }
}

fn push_table(md: &mut String, t: &TableSection) {
    md.push_str(&format!("## {}\n\n", escape_text(&t.heading)));
    let headers: Vec<String> = t.headers.iter().map(|h| escape_text(h)).collect();
    md.push_str(&format!("| {} |\n", headers.join(" | ")));
    md.push_str("| --- | --- | ---: | --- |\n");
    for row in &t.rows {
        let cells: Vec<String> = row.cells().iter().map(|c| escape_text(c)).collect();
        md.push_str(&format!("| {} |\n", cells.join(" | ")));
    }
}

/// Backslash-escape characters Markdown would read as markup.
fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '#' | '|' | '~'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// ─── Artifact ───────────────────────────────────────────────────────

/// Write the single report artifact `{stem}.{ext}` into `output_dir`.
///
/// Creates the directory if needed. Returns the written path.
pub fn save_report(
    model: &ReportContentModel,
    renderer: &dyn ReportRenderer,
    output_dir: &Path,
    stem: &str,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir: {}", output_dir.display()))?;
    let path = output_dir.join(format!("{stem}.{}", renderer.extension()));
    let bytes = renderer.render(model)?;
    std::fs::write(&path, bytes)
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "report written");
    Ok(path)
}

/// Load a content model previously saved as JSON.
pub fn load_report(path: &Path) -> Result<ReportContentModel> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    import_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{BreakdownRow, Provenance, SummaryLine, TableRow};
    use chrono::{TimeZone, Utc};

    fn model() -> ReportContentModel {
        ReportContentModel {
            schema_version: SCHEMA_VERSION,
            provenance: Provenance {
                source: Some("Universe Data/P123_Screen_x.csv".into()),
                source_hash: "deadbeef".into(),
                generated_at: Utc.with_ymd_and_hms(2024, 10, 4, 12, 0, 0).unwrap(),
            },
            sections: vec![
                ReportSection::Title(TitleSection {
                    title: "Large Caps".into(),
                    date: "10/04/2024".into(),
                    subtitle: "Analysis Date: 10/04/2024".into(),
                    notes: "Unknown".into(),
                }),
                ReportSection::Summary(SummarySection {
                    heading: "Universe Summary Statistics".into(),
                    lines: vec![SummaryLine {
                        label: "Total Number of Stocks".into(),
                        value: "2".into(),
                    }],
                }),
                ReportSection::Breakdown(BreakdownSection {
                    heading: "Sector Breakdown".into(),
                    caption: "Stock Count by Sector:".into(),
                    rows: vec![BreakdownRow {
                        sector: "TECH".into(),
                        count: "2".into(),
                        percentage: "100.0%".into(),
                    }],
                }),
                ReportSection::Table(TableSection {
                    heading: "Top 15 Stocks by Market Cap".into(),
                    headers: vec![
                        "Ticker".into(),
                        "Name".into(),
                        "Market Cap ($M)".into(),
                        "Sector".into(),
                    ],
                    rows: vec![TableRow {
                        ticker: "AAPL".into(),
                        name: "Apple | Inc".into(),
                        market_cap: "$3,443,204.12".into(),
                        sector: "TECH".into(),
                    }],
                }),
            ],
        }
    }

    #[test]
    fn json_roundtrip() {
        let m = model();
        let json = export_json(&m).unwrap();
        assert_eq!(import_json(&json).unwrap(), m);
    }

    #[test]
    fn newer_schema_rejected() {
        let mut m = model();
        m.schema_version = SCHEMA_VERSION + 1;
        let json = export_json(&m).unwrap();
        let err = import_json(&json).unwrap_err();
        assert!(err.to_string().contains("unsupported schema version"));
    }

    #[test]
    fn markdown_has_every_section() {
        let md = generate_markdown(&model());
        assert!(md.starts_with("# Large Caps\n"));
        assert!(md.contains("Analysis Date: 10/04/2024"));
        assert!(md.contains("## Universe Summary Statistics"));
        assert!(md.contains("| Total Number of Stocks | 2 |"));
        assert!(md.contains("- TECH: 2 (100.0%)"));
        assert!(md.contains("| Ticker | Name | Market Cap ($M) | Sector |"));
        assert!(md.contains("| AAPL | Apple \\| Inc | $3,443,204.12 | TECH |"));
        assert!(md.contains("Source hash: deadbeef\n"));
        assert!(!md.contains("Generated"));
    }

    #[test]
    fn markdown_ignores_generation_time() {
        let first = model();
        let mut second = model();
        second.provenance.generated_at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(generate_markdown(&first), generate_markdown(&second));
    }

    #[test]
    fn markdown_escapes_free_text() {
        let mut m = model();
        if let ReportSection::Title(t) = &mut m.sections[0] {
            t.title = "Top *Caps* #1".into();
            t.notes = "weekly_rebalance".into();
        }
        if let ReportSection::Table(t) = &mut m.sections[3] {
            t.rows[0].name = "A_B <Holdings>".into();
        }
        let md = generate_markdown(&m);
        assert!(md.starts_with("# Top \\*Caps\\* \\#1\n"));
        assert!(md.contains("_weekly\\_rebalance_\n"));
        assert!(md.contains("| AAPL | A\\_B \\<Holdings\\> | $3,443,204.12 | TECH |"));
        assert!(md.contains("Analysis Date: 10/04/2024"));
    }

    #[test]
    fn save_writes_one_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("reports");
        let path = save_report(&model(), &JsonRenderer, &out, "results").unwrap();
        assert_eq!(path, out.join("results.json"));
        assert_eq!(std::fs::read_dir(&out).unwrap().count(), 1);
        assert_eq!(load_report(&path).unwrap(), model());
    }

    #[test]
    fn renderer_for_format() {
        assert_eq!(renderer_for(OutputFormat::Markdown).extension(), "md");
        assert_eq!(renderer_for(OutputFormat::Json).extension(), "json");
    }
}
