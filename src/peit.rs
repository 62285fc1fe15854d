use log::{debug, info, warn};

use peit_scoring::*;
use snafu::prelude::*;

use std::fs;
use std::path::Path;

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::peit::books::*;
use crate::peit::config_reader::*;
use crate::peit::io_common::*;
use crate::peit::io_results::*;
use crate::peit::io_storage::*;

mod books;
mod config_reader;
mod io_common;
mod io_results;
mod io_storage;

#[derive(Debug, Snafu)]
pub enum PeitError {
    #[snafu(display("Error opening file {path}: {source}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing the JSON content of {path}: {source}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Storage key {key} does not hold a valid answer set: {source}"))]
    ParsingStorage {
        source: serde_json::Error,
        key: String,
    },
    #[snafu(display("Storage key {key} does not hold a JSON object"))]
    InvalidStorageValue { key: String },
    #[snafu(display("Error serializing the report: {source}"))]
    WritingJson { source: serde_json::Error },
    #[snafu(display("Error writing {path}: {source}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Invalid question {id} in {path}: {source}"))]
    InvalidQuestion {
        source: ScoringError,
        id: u32,
        path: String,
    },
    #[snafu(display("Question {id} in {path}: axis {axis} is not a {category} axis"))]
    MisfiledQuestion {
        id: u32,
        axis: String,
        category: String,
        path: String,
    },
    #[snafu(display("Question {id} is defined twice in {path}"))]
    DuplicateQuestion { id: u32, path: String },
    #[snafu(display("Key {key:?} in {path} is not a question id"))]
    InvalidMappingKey { key: String, path: String },
    #[snafu(display("Invalid mapping for question {key} in {path}: {source}"))]
    InvalidMapping {
        source: ScoringError,
        key: String,
        path: String,
    },
    #[snafu(display("Key {code:?} in {path} is not a type code: {source}"))]
    InvalidResultCode {
        source: ScoringError,
        code: String,
        path: String,
    },
    #[snafu(display("Result record {code} in {path} is not a {expected} record"))]
    MismatchedResultRecord {
        code: String,
        expected: String,
        path: String,
    },
    #[snafu(display("No result record for type {code}"))]
    MissingResultRecord { code: String },
    #[snafu(display("Invalid value {value:?}: {source}"))]
    InvalidArgument { source: ScoringError, value: String },
    #[snafu(display("Missing {what}: pass it on the command line or in the configuration file"))]
    MissingInput { what: String },
    #[snafu(display("No stored answers found, the test needs to be taken again"))]
    NoStoredAnswers {},
    #[snafu(display("Configuration file {path} has no parent directory"))]
    MissingParentDir { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type PeitResult<T> = Result<T, PeitError>;

/// The settings of one run, after merging the configuration file and the
/// command line.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct RunSettings {
    pub questions_path: Option<String>,
    pub mapping_path: Option<String>,
    pub answers_path: Option<String>,
    pub results_path: Option<String>,
    pub test_type: Option<TestType>,
    pub out: Option<String>,
    pub reference: Option<String>,
    pub display_order: bool,
}

fn parse_test_type(value: Option<String>) -> PeitResult<Option<TestType>> {
    match value {
        Some(s) => {
            let tt = s
                .parse::<TestType>()
                .context(InvalidArgumentSnafu { value: s.clone() })?;
            Ok(Some(tt))
        }
        None => Ok(None),
    }
}

pub fn resolve_settings(args: &Args) -> PeitResult<RunSettings> {
    let (config, root) = match args.config.clone() {
        Some(config_path) => {
            let config = read_config(&config_path)?;
            info!("config: {:?}", config);
            let root = Path::new(config_path.as_str())
                .parent()
                .context(MissingParentDirSnafu {
                    path: config_path.clone(),
                })?
                .to_path_buf();
            (config, Some(root))
        }
        None => (QuizConfig::default(), None),
    };
    let in_root = |p: Option<String>| p.map(|x| resolve_path(root.as_deref(), &x));

    Ok(RunSettings {
        questions_path: args.questions.clone().or(in_root(config.questions_path)),
        mapping_path: args.mapping.clone().or(in_root(config.mapping_path)),
        answers_path: args.answers.clone().or(in_root(config.answers_path)),
        results_path: args.results.clone().or(in_root(config.results_path)),
        test_type: parse_test_type(args.test_type.clone().or(config.test_type))?,
        out: args.out.clone(),
        reference: args.reference.clone(),
        display_order: args.display_order,
    })
}

fn tally_to_json(tally: &Tally, category: Category) -> JSValue {
    let mut res: JSMap<String, JSValue> = JSMap::new();
    for axis in category.axes() {
        for pole in [axis.left(), axis.right()] {
            res.insert(pole.letter().to_string(), json!(tally.get(pole)));
        }
    }
    JSValue::Object(res)
}

fn scores_to_json(scores: &[AxisScore]) -> JSValue {
    let mut res: JSMap<String, JSValue> = JSMap::new();
    for s in scores {
        res.insert(s.label().to_string(), json!(s.left_percent));
    }
    JSValue::Object(res)
}

/// The static content attached to the report, when a results dictionary is
/// available.
pub struct ResultContent {
    pub results: ResultsDictionary,
    pub catalog: Vec<Book>,
}

impl ResultContent {
    pub fn new(results: ResultsDictionary) -> ResultContent {
        let catalog = build_catalog(&results);
        info!(
            "Loaded {} result records and {} books",
            results.len(),
            catalog.len()
        );
        ResultContent { results, catalog }
    }
}

pub fn build_report_js(
    test_type: TestType,
    answers: &AnswerSet,
    mapping: &MappingTable,
    content: Option<&ResultContent>,
) -> PeitResult<JSValue> {
    let res = calculate_result(answers, mapping);

    let mut root: JSMap<String, JSValue> = JSMap::new();
    root.insert("testType".to_string(), json!(test_type.as_str()));
    root.insert("answered".to_string(), json!(answers.len()));

    for category in test_type.categories() {
        let code = res.code(*category);
        let scores = res.scores(*category);
        info!("{}: {} {:?}", category, code, scores);

        let mut section: JSMap<String, JSValue> = JSMap::new();
        section.insert("code".to_string(), json!(code.as_str()));
        section.insert("tally".to_string(), tally_to_json(&res.tally, *category));
        section.insert("scores".to_string(), scores_to_json(&scores));

        if let Some(c) = content {
            let record = lookup(&c.results, code)?.with_scores(&scores);
            info!("{}: {}", code, record.name());
            section.insert(
                "result".to_string(),
                serde_json::to_value(&record).context(WritingJsonSnafu {})?,
            );
            let books = books_for_type(&c.catalog, code);
            debug!("{} books for {}", books.len(), code);
            section.insert(
                "books".to_string(),
                serde_json::to_value(&books).context(WritingJsonSnafu {})?,
            );
        }
        root.insert(category.as_str().to_string(), JSValue::Object(section));
    }
    Ok(JSValue::Object(root))
}

pub fn build_display_order_js(test_type: TestType, questions: &[Question]) -> JSValue {
    let mut root: JSMap<String, JSValue> = JSMap::new();
    for category in test_type.categories() {
        let ids: Vec<u32> = build_display_order(questions, *category)
            .iter()
            .map(|q| q.id.0)
            .collect();
        root.insert(category.as_str().to_string(), json!(ids));
    }
    JSValue::Object(root)
}

fn required(path: &Option<String>, what: &str) -> PeitResult<String> {
    path.clone().context(MissingInputSnafu { what })
}

fn write_output(pretty: &str, out: &Option<String>) -> PeitResult<()> {
    match out.as_deref() {
        None | Some("stdout") => {
            println!("{}", pretty);
            Ok(())
        }
        Some(path) => {
            info!("Writing report to {:?}", path);
            fs::write(path, pretty).context(WritingOutputSnafu { path })
        }
    }
}

fn check_reference(pretty: &str, reference: &Option<String>) -> PeitResult<()> {
    if let Some(reference_p) = reference {
        let summary_ref = read_summary(reference_p)?;
        debug!("reference: {:?}", summary_ref);
        let pretty_ref = serde_json::to_string_pretty(&summary_ref).context(WritingJsonSnafu {})?;
        if pretty_ref != pretty {
            warn!("Found differences with the reference report");
            print_diff(pretty_ref.as_str(), pretty, "\n");
            whatever!("Difference detected between computed report and reference report")
        }
    }
    Ok(())
}

pub fn run_quiz(settings: &RunSettings) -> PeitResult<JSValue> {
    if settings.display_order {
        let questions = read_questions(&required(&settings.questions_path, "question bank")?)?;
        let test_type = settings.test_type.unwrap_or(TestType::Both);
        return Ok(build_display_order_js(test_type, &questions));
    }

    let mapping = read_mapping(&required(&settings.mapping_path, "mapping table")?)?;
    if let Some(questions_p) = &settings.questions_path {
        let questions = read_questions(questions_p)?;
        for q in questions.iter().filter(|q| !mapping.contains_key(&q.id)) {
            warn!("Question {} has no mapping and will never be counted", q.id);
        }
    }

    let sessions = read_storage(&required(&settings.answers_path, "stored answers")?)?;
    let (test_type, answers) =
        select_session(&sessions, settings.test_type).context(NoStoredAnswersSnafu {})?;
    info!(
        "Selected {} session with {} answers",
        test_type.as_str(),
        answers.len()
    );

    let content = match &settings.results_path {
        Some(results_p) => Some(ResultContent::new(read_results(results_p)?)),
        None => None,
    };
    build_report_js(test_type, answers, &mapping, content.as_ref())
}

pub fn run(args: &Args) -> PeitResult<()> {
    let settings = resolve_settings(args)?;
    debug!("settings: {:?}", settings);
    let report = run_quiz(&settings)?;
    let pretty = serde_json::to_string_pretty(&report).context(WritingJsonSnafu {})?;
    write_output(&pretty, &settings.out)?;
    check_reference(&pretty, &settings.reference)
}
