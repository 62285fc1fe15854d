// Readers for the configuration file and the static quiz data.

use std::collections::{BTreeMap, HashSet};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use snafu::prelude::*;

use crate::peit::*;

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizConfig {
    #[serde(rename = "questionsPath")]
    pub questions_path: Option<String>,
    #[serde(rename = "mappingPath")]
    pub mapping_path: Option<String>,
    #[serde(rename = "answersPath")]
    pub answers_path: Option<String>,
    #[serde(rename = "resultsPath")]
    pub results_path: Option<String>,
    #[serde(rename = "testType")]
    pub test_type: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: u32,
    pub category: String,
    pub axis: String,
    pub text: String,
    #[serde(rename = "optionA")]
    pub option_a: String,
    #[serde(rename = "optionB")]
    pub option_b: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct MappingRecord {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
}

pub fn read_config(path: &str) -> PeitResult<QuizConfig> {
    read_json_file(path)
}

pub fn read_summary(path: &str) -> PeitResult<JSValue> {
    read_json_file(path)
}

pub fn read_questions(path: &str) -> PeitResult<Vec<Question>> {
    let records: Vec<QuestionRecord> = read_json_file(path)?;
    let questions = validate_questions(&records, path)?;
    info!("Read {} questions from {:?}", questions.len(), path);
    Ok(questions)
}

fn validate_questions(records: &[QuestionRecord], path: &str) -> PeitResult<Vec<Question>> {
    let mut seen: HashSet<u32> = HashSet::new();
    let mut res: Vec<Question> = Vec::new();
    for r in records.iter() {
        ensure!(seen.insert(r.id), DuplicateQuestionSnafu { id: r.id, path });
        let category = r
            .category
            .parse::<Category>()
            .context(InvalidQuestionSnafu { id: r.id, path })?;
        let axis = r
            .axis
            .parse::<Axis>()
            .context(InvalidQuestionSnafu { id: r.id, path })?;
        ensure!(
            axis.category() == category,
            MisfiledQuestionSnafu {
                id: r.id,
                axis: r.axis.clone(),
                category: r.category.clone(),
                path,
            }
        );
        res.push(Question {
            id: QuestionId(r.id),
            category,
            axis,
            text: r.text.clone(),
            option_a: r.option_a.clone(),
            option_b: r.option_b.clone(),
        });
    }
    Ok(res)
}

pub fn read_mapping(path: &str) -> PeitResult<MappingTable> {
    let records: BTreeMap<String, MappingRecord> = read_json_file(path)?;
    let mapping = validate_mapping(&records, path)?;
    info!("Read {} mapping entries from {:?}", mapping.len(), path);
    Ok(mapping)
}

fn validate_mapping(
    records: &BTreeMap<String, MappingRecord>,
    path: &str,
) -> PeitResult<MappingTable> {
    let mut res = MappingTable::new();
    for (key, r) in records.iter() {
        let id = key
            .parse::<u32>()
            .ok()
            .context(InvalidMappingKeySnafu { key, path })?;
        let a = r
            .a
            .parse::<Pole>()
            .context(InvalidMappingSnafu { key, path })?;
        let b = r
            .b
            .parse::<Pole>()
            .context(InvalidMappingSnafu { key, path })?;
        let pm = PoleMapping::new(a, b).context(InvalidMappingSnafu { key, path })?;
        debug!("mapping: q{} -> {} / {}", id, a.code(), b.code());
        res.insert(QuestionId(id), pm);
    }
    Ok(res)
}
