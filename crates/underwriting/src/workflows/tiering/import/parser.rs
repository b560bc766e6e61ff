use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug, Deserialize)]
pub(crate) struct BorrowerRow {
    #[serde(rename = "Loan ID")]
    pub(crate) loan_id: String,
    #[serde(rename = "Loan Type")]
    pub(crate) loan_type: String,
    #[serde(rename = "Borrower Experience Score")]
    pub(crate) borrower_experience_score: f64,
    #[serde(rename = "Guarantor Record Score")]
    pub(crate) guarantor_record_score: f64,
    #[serde(rename = "Liquidity Ratio")]
    pub(crate) liquidity_ratio: f64,
    #[serde(rename = "Performance Record Score")]
    pub(crate) performance_record_score: f64,
    #[serde(rename = "Verified Exits")]
    pub(crate) verified_exits: u32,
    #[serde(rename = "Verified Volume")]
    pub(crate) verified_volume: f64,
    #[serde(
        rename = "Rehab Cost",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) rehab_cost: Option<f64>,
    #[serde(
        rename = "Total Project Cost",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) total_project_cost: Option<f64>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<BorrowerRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();

    for record in csv_reader.deserialize::<BorrowerRow>() {
        rows.push(record?);
    }

    Ok(rows)
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .replace(['$', ','], "")
            .parse::<f64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
