use crate::domain::model::{MunicipalityRecord, OutputFormat};
use crate::utils::error::{Result, ScrapeError};
use csv::{Terminator, WriterBuilder};
use std::collections::BTreeSet;

pub const FIXED_COLUMNS: [&str; 5] = ["code", "name", "voters", "ballot_envelopes", "valid_votes"];

/// Sorted union of every party name seen across `records`.
pub fn party_columns(records: &[MunicipalityRecord]) -> Vec<String> {
    records
        .iter()
        .flat_map(|record| record.parties.keys())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn render_table(
    records: &[MunicipalityRecord],
    parties: &[String],
    format: OutputFormat,
) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .delimiter(format.delimiter())
        .terminator(Terminator::CRLF)
        .from_writer(Vec::new());

    let header = FIXED_COLUMNS
        .iter()
        .copied()
        .chain(parties.iter().map(String::as_str));
    writer.write_record(header)?;

    for record in records {
        let mut row = vec![
            record.code.clone(),
            record.name.clone(),
            record.voters.to_string(),
            record.ballot_envelopes.to_string(),
            record.valid_votes.to_string(),
        ];
        row.extend(
            parties
                .iter()
                .map(|party| record.parties.get(party).copied().unwrap_or(0).to_string()),
        );
        writer.write_record(&row)?;
    }

    writer.into_inner().map_err(|e| ScrapeError::Io(e.into_error()))
}
