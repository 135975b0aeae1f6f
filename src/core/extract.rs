//! Pattern extraction against the volby.cz result pages.
//!
//! The matched markup (`class="overflow_name"`, `xobec=` links and the
//! `headers` attribute values) is the whole contract with the site.

use crate::domain::model::{MunicipalityRecord, TurnoutCounts};
use crate::utils::error::{Result, ScrapeError};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

pub const DEFAULT_DETAIL_URL_TEMPLATE: &str =
    "https://www.volby.cz/pls/ps2017nss/ps311?xjazyk=CZ&xkraj={kraj}&xobec={code}&xvyber={nuts}";

static MUNICIPALITY_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<td class="overflow_name".*?>(.*?)</td>"#).unwrap());
static MUNICIPALITY_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a href="ps311\?.*?xobec=(\d+?)&amp;.*?">\d+?</a>"#).unwrap()
});
static VOTERS: LazyLock<Regex> = LazyLock::new(|| field_pattern("sa2"));
static BALLOT_ENVELOPES: LazyLock<Regex> = LazyLock::new(|| field_pattern("sa3"));
static VALID_VOTES: LazyLock<Regex> = LazyLock::new(|| field_pattern("sa6"));
static PARTY_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"<td class="cislo" headers="t1sa1 t1sb1">\s*(\d+)\s*</td>\s*"#,
        r#"<td class="overflow_name" headers="t1sa1 t1sb2">([^<]*)</td>\s*"#,
        r#"<td class="cislo" headers="t1sa2 t1sb3">([^<]*)</td>"#,
    ))
    .unwrap()
});
static REGION_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"xkraj=(\d+)").unwrap());
static NUTS_SELECTOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"xnumnuts=(\d+)").unwrap());

fn field_pattern(header: &str) -> Regex {
    Regex::new(&format!(
        r#"<td class="cislo" headers="{}"[^>]*>([^<]+)</td>"#,
        header
    ))
    .unwrap()
}

/// Parse a vote count as printed by the site ("10&nbsp;000", "1 234").
/// Whitespace around the number is ignored. Anything that is not a plain
/// unsigned number after stripping the separators counts as 0.
pub fn parse_count(raw: &str) -> u64 {
    let digits: String = raw
        .replace("&nbsp;", "")
        .chars()
        .filter(|c| *c != ' ' && *c != '\u{a0}')
        .collect();
    digits.trim().parse().unwrap_or(0)
}

fn capture_count(pattern: &Regex, html: &str) -> u64 {
    pattern
        .captures(html)
        .map(|caps| parse_count(&caps[1]))
        .unwrap_or(0)
}

pub fn extract_numbers(html: &str) -> TurnoutCounts {
    TurnoutCounts {
        voters: capture_count(&VOTERS, html),
        ballot_envelopes: capture_count(&BALLOT_ENVELOPES, html),
        valid_votes: capture_count(&VALID_VOTES, html),
    }
}

pub fn extract_parties(html: &str) -> BTreeMap<String, u64> {
    let mut parties = BTreeMap::new();
    for caps in PARTY_ROW.captures_iter(html) {
        parties.insert(caps[2].trim().to_string(), parse_count(&caps[3]));
    }
    parties
}

/// Build the municipality list of a regional index page.
///
/// Names and codes are paired by position in the document; the page offers
/// no shared key between the two lists.
pub fn parse_municipalities(
    html: &str,
    index_url: &str,
    detail_url_template: &str,
) -> Result<Vec<MunicipalityRecord>> {
    let names: Vec<&str> = MUNICIPALITY_NAME
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();
    let codes: Vec<&str> = MUNICIPALITY_CODE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect();

    if names.len() != codes.len() {
        return Err(ScrapeError::StructureMismatch {
            names: names.len(),
            codes: codes.len(),
        });
    }

    let region_id = url_parameter(&REGION_ID, index_url, "xkraj")?;
    let nuts = url_parameter(&NUTS_SELECTOR, index_url, "xnumnuts")?;

    Ok(names
        .into_iter()
        .zip(codes)
        .map(|(name, code)| {
            let detail_url = detail_url_template
                .replace("{kraj}", region_id)
                .replace("{code}", code)
                .replace("{nuts}", nuts);
            MunicipalityRecord::new(code, name, detail_url)
        })
        .collect())
}

fn url_parameter<'a>(pattern: &Regex, url: &'a str, parameter: &str) -> Result<&'a str> {
    pattern
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| ScrapeError::MissingUrlParameter {
            parameter: parameter.to_string(),
        })
}
