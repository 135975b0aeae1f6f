use serde::Deserialize;
use std::collections::BTreeMap;

/// One municipality of a region: identity from the index page, results from
/// its detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MunicipalityRecord {
    pub code: String,
    pub name: String,
    pub detail_url: String,
    pub voters: u64,
    pub ballot_envelopes: u64,
    pub valid_votes: u64,
    pub parties: BTreeMap<String, u64>,
}

impl MunicipalityRecord {
    pub fn new(code: impl Into<String>, name: impl Into<String>, detail_url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            detail_url: detail_url.into(),
            voters: 0,
            ballot_envelopes: 0,
            valid_votes: 0,
            parties: BTreeMap::new(),
        }
    }

    pub fn apply_results(&mut self, counts: TurnoutCounts, parties: BTreeMap<String, u64>) {
        self.voters = counts.voters;
        self.ballot_envelopes = counts.ballot_envelopes;
        self.valid_votes = counts.valid_votes;
        self.parties = parties;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnoutCounts {
    pub voters: u64,
    pub ballot_envelopes: u64,
    pub valid_votes: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
}

impl OutputFormat {
    pub fn delimiter(self) -> u8 {
        match self {
            OutputFormat::Csv => b',',
            OutputFormat::Tsv => b'\t',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Written {
        path: String,
        rows: usize,
        party_columns: usize,
    },
    NoData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub discovered: usize,
    pub processed: usize,
    pub export: ExportOutcome,
}

impl RunSummary {
    pub fn skipped(&self) -> usize {
        self.discovered - self.processed
    }
}
