//! Edge list ingestion and pathway export.

use log::debug;
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::graph::{EdgeRow, ReactionGraph, ReactionIndexRange};
use crate::pathways::PathResultSet;
use crate::{Error, Result};

/// Reads a CSV edge list with a header naming `from` and `to` columns.
///
/// Extra columns are ignored. Empty cells and short rows come back as missing
/// endpoints so the graph builder can reject them with their row number.
pub fn read_edge_list<R: Read>(reader: R) -> Result<Vec<EdgeRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| Error::MalformedInput {
                row: 0,
                reason: format!("no '{}' column in header", name),
            })
    };
    let from_col = column("from")?;
    let to_col = column("to")?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cell = |col: usize| {
            record
                .get(col)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        rows.push(EdgeRow {
            from: cell(from_col),
            to: cell(to_col),
        });
    }

    Ok(rows)
}

/// Reads an edge list file and builds the reaction graph from it
pub fn load_reaction_graph(path: impl AsRef<Path>, range: ReactionIndexRange) -> Result<ReactionGraph> {
    let path = path.as_ref();
    let rows = read_edge_list(File::open(path)?)?;
    debug!("Read {} edge rows from {}", rows.len(), path.display());
    ReactionGraph::from_rows(rows, range)
}

#[derive(Serialize)]
struct CsvPathRow<'a> {
    source: String,
    target: String,
    timescale: f64,
    hops: usize,
    path: &'a str,
}

/// Writes one CSV row per pathway: `source,target,timescale,hops,path`, with
/// the path rendered as space separated node identifiers
pub fn write_results_csv<W: Write>(results: &PathResultSet, writer: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    for record in results {
        let path = record
            .path
            .iter()
            .map(|node| node.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writer.serialize(CsvPathRow {
            source: record.source.to_string(),
            target: record.target.to_string(),
            timescale: record.timescale,
            hops: record.path.len().saturating_sub(1),
            path: &path,
        })?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the full result set as a JSON array of records
pub fn write_results_json<W: Write>(results: &PathResultSet, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, results.records())?;
    Ok(())
}
