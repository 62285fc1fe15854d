// The results dictionary: the descriptive content of every type.

use std::collections::BTreeMap;

use log::info;
use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use crate::peit::*;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PoliticalRecord {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub political_spectrum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_partner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worst_partner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_content: Option<String>,
    #[serde(default)]
    pub scores: BTreeMap<String, u32>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct EconomicRecord {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coaching: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synergy_partner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_partner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_content: Option<String>,
    #[serde(default)]
    pub scores: BTreeMap<String, u32>,
}

/// The description of one type. The `category` field selects the kind.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum ResultRecord {
    Political(PoliticalRecord),
    Economic(EconomicRecord),
}

impl ResultRecord {
    pub fn category(&self) -> Category {
        match self {
            ResultRecord::Political(_) => Category::Political,
            ResultRecord::Economic(_) => Category::Economic,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ResultRecord::Political(r) => r.name.as_str(),
            ResultRecord::Economic(r) => r.name.as_str(),
        }
    }

    pub fn recommended_content(&self) -> Option<&str> {
        match self {
            ResultRecord::Political(r) => r.recommended_content.as_deref(),
            ResultRecord::Economic(r) => r.recommended_content.as_deref(),
        }
    }

    /// A copy of the record with its scores slot filled in. Nothing else is
    /// touched.
    pub fn with_scores(&self, scores: &[AxisScore]) -> ResultRecord {
        let filled: BTreeMap<String, u32> = scores
            .iter()
            .map(|s| (s.label().to_string(), s.left_percent))
            .collect();
        let mut res = self.clone();
        match &mut res {
            ResultRecord::Political(r) => r.scores = filled,
            ResultRecord::Economic(r) => r.scores = filled,
        }
        res
    }
}

pub type ResultsDictionary = BTreeMap<TypeCode, ResultRecord>;

pub fn read_results(path: &str) -> PeitResult<ResultsDictionary> {
    let raw: BTreeMap<String, ResultRecord> = read_json_file(path)?;
    let res = validate_results(raw, path)?;
    info!("Read {} result records from {:?}", res.len(), path);
    Ok(res)
}

fn validate_results(
    raw: BTreeMap<String, ResultRecord>,
    path: &str,
) -> PeitResult<ResultsDictionary> {
    let mut res = ResultsDictionary::new();
    for (key, record) in raw.into_iter() {
        let code = TypeCode::parse(&key).context(InvalidResultCodeSnafu {
            code: key.clone(),
            path,
        })?;
        ensure!(
            record.category() == code.category(),
            MismatchedResultRecordSnafu {
                code: key,
                expected: code.category().as_str(),
                path,
            }
        );
        res.insert(code, record);
    }
    Ok(res)
}

pub fn lookup<'a>(results: &'a ResultsDictionary, code: &TypeCode) -> PeitResult<&'a ResultRecord> {
    results
        .get(code)
        .context(MissingResultRecordSnafu { code: code.as_str() })
}
