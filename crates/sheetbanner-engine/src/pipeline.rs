use crate::classifier::{classify_columns, header_paths};
use crate::detector::detect_tables;
use crate::extractor::extract_raw;
use crate::merge_resolver::MergeResolver;
use crate::splitter::find_split;
use crate::{assembler::assemble_records, extractor::RawTable};
use sheetbanner_model::{Diagnostic, PipelineConfig, Record, SheetAdapter, TableBox};

/// One successfully processed table: the final, immutable output of
/// the pipeline for one detected box.
#[derive(Debug, Clone)]
pub struct TableResult {
    pub table_box: TableBox,
    pub records: Vec<Record>,
}

/// Everything the pipeline produced for one sheet: the surviving
/// tables (in discovery order) plus every diagnostic recorded along
/// the way.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    pub tables: Vec<TableResult>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run all five stages against one sheet. A table box that
/// hits a fatal per-table condition (`HeaderSplitNotFound`) is dropped
/// from `tables` but still recorded in `diagnostics`; the pipeline
/// never aborts because one table failed.
#[must_use]
pub fn run(sheet: &dyn SheetAdapter, config: PipelineConfig) -> PipelineOutput {
    let mut diagnostics = Vec::new();

    let (config, threshold_diag) = config.normalize();
    diagnostics.extend(threshold_diag);

    let (resolver, merge_diags) = MergeResolver::build(sheet.merged_ranges());
    diagnostics.extend(merge_diags);

    let boxes = detect_tables(sheet, &resolver, config.min_width, config.min_height);
    log::debug!("detected {} candidate table(s)", boxes.len());

    let per_table = process_boxes(sheet, &resolver, &boxes, config.border_threshold);

    let mut tables = Vec::with_capacity(per_table.len());
    for (result, table_diags) in per_table {
        diagnostics.extend(table_diags);
        if let Some(result) = result {
            tables.push(result);
        }
    }

    PipelineOutput { tables, diagnostics }
}

fn process_one(
    sheet: &dyn SheetAdapter,
    resolver: &MergeResolver,
    table_box: TableBox,
    threshold: f64,
) -> (Option<TableResult>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();
    let raw: RawTable = extract_raw(sheet, table_box);

    let split = match find_split(&raw, sheet, resolver, threshold) {
        Some(split) => split,
        None => {
            log::warn!(
                "no header/body boundary found for table rows {}..={}",
                table_box.min_row,
                table_box.max_row
            );
            diagnostics.push(Diagnostic::HeaderSplitNotFound {
                min_row: table_box.min_row,
                max_row: table_box.max_row,
            });
            return (None, diagnostics);
        }
    };

    let header = raw.header_rows(split);
    let body = raw.body_rows(split);
    let roles = classify_columns(header, body);

    let (paths, path_diags) = header_paths(header, roles.data_columns(raw.width()));
    diagnostics.extend(path_diags);

    let (records, assemble_diags) =
        assemble_records(header, body, roles.attribute_count, &paths);
    diagnostics.extend(assemble_diags);

    (Some(TableResult { table_box, records }), diagnostics)
}

#[cfg(all(feature = "parallel", not(target_arch = "wasm32")))]
fn process_boxes(
    sheet: &dyn SheetAdapter,
    resolver: &MergeResolver,
    boxes: &[TableBox],
    threshold: f64,
) -> Vec<(Option<TableResult>, Vec<Diagnostic>)> {
    // `SheetAdapter`/`MergeResolver` are read-only for the whole run;
    // `rayon`'s indexed `par_iter` restores the original ordering on
    // collect, so output order matches discovery order whether or not
    // tables actually ran concurrently.
    use rayon::prelude::*;
    boxes
        .par_iter()
        .map(|&table_box| process_one(sheet, resolver, table_box, threshold))
        .collect()
}

#[cfg(any(not(feature = "parallel"), target_arch = "wasm32"))]
fn process_boxes(
    sheet: &dyn SheetAdapter,
    resolver: &MergeResolver,
    boxes: &[TableBox],
    threshold: f64,
) -> Vec<(Option<TableResult>, Vec<Diagnostic>)> {
    boxes
        .iter()
        .map(|&table_box| process_one(sheet, resolver, table_box, threshold))
        .collect()
}
