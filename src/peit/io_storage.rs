// Reading the answers kept in the browser storage.

use std::collections::BTreeMap;

use log::{debug, info, warn};
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use snafu::prelude::*;

use crate::peit::*;

pub const POLITICAL_ANSWERS_KEY: &str = "political_answers";
pub const ECONOMIC_ANSWERS_KEY: &str = "economic_answers";
pub const FULL_ANSWERS_KEY: &str = "answers";

/// The storage key under which a session keeps its answers.
pub fn storage_key(test_type: TestType) -> &'static str {
    match test_type {
        TestType::Political => POLITICAL_ANSWERS_KEY,
        TestType::Economic => ECONOMIC_ANSWERS_KEY,
        TestType::Both => FULL_ANSWERS_KEY,
    }
}

/// The sessions found in the storage. A session that is present but empty
/// is still a session.
pub type StoredSessions = BTreeMap<TestType, AnswerSet>;

pub fn read_storage(path: &str) -> PeitResult<StoredSessions> {
    let dump: JSMap<String, JSValue> = read_json_file(path)?;
    decode_storage(&dump)
}

pub fn decode_storage(dump: &JSMap<String, JSValue>) -> PeitResult<StoredSessions> {
    let mut res = StoredSessions::new();
    for test_type in [TestType::Political, TestType::Economic, TestType::Both] {
        let key = storage_key(test_type);
        let entries: JSMap<String, JSValue> = match dump.get(key) {
            None | Some(JSValue::Null) => continue,
            // The browser storage only holds strings.
            Some(JSValue::String(s)) => {
                match serde_json::from_str::<JSValue>(s).context(ParsingStorageSnafu { key })? {
                    JSValue::Object(m) => m,
                    _ => return InvalidStorageValueSnafu { key }.fail(),
                }
            }
            Some(JSValue::Object(m)) => m.clone(),
            Some(_) => return InvalidStorageValueSnafu { key }.fail(),
        };
        let answers = decode_answers(key, &entries);
        info!("Storage key {}: {} answers", key, answers.len());
        res.insert(test_type, answers);
    }
    Ok(res)
}

/// Parses a storage entry name of the form `q<id>`.
pub fn parse_question_key(key: &str) -> Option<QuestionId> {
    key.strip_prefix('q')
        .and_then(|n| n.parse::<u32>().ok())
        .map(QuestionId)
}

/// Decodes one serialized answer set. Malformed entries are skipped.
pub fn decode_answers(key: &str, entries: &JSMap<String, JSValue>) -> AnswerSet {
    let mut res = AnswerSet::new();
    for (name, value) in entries.iter() {
        let qid = match parse_question_key(name) {
            Some(qid) => qid,
            None => {
                warn!("{}: skipping entry {:?}: not a question", key, name);
                continue;
            }
        };
        let choice = match value.as_str().map(|s| s.parse::<Choice>()) {
            Some(Ok(c)) => c,
            _ => {
                warn!("{}: skipping {}: invalid answer {}", key, qid, value);
                continue;
            }
        };
        debug!("{}: {} -> {:?}", key, qid, choice);
        res.insert(qid, choice);
    }
    res
}

/// Picks the session to score.
///
/// A requested test type selects its own session only. Otherwise a political
/// or economic run stored alone comes first, then the full test, then
/// whichever single run exists, political first.
pub fn select_session(
    sessions: &StoredSessions,
    requested: Option<TestType>,
) -> Option<(TestType, &AnswerSet)> {
    let pick = |tt: TestType| sessions.get(&tt).map(|a| (tt, a));
    if let Some(tt) = requested {
        return pick(tt);
    }
    let political = sessions.contains_key(&TestType::Political);
    let economic = sessions.contains_key(&TestType::Economic);
    let full = sessions.contains_key(&TestType::Both);
    let tt = match (political, economic, full) {
        (true, false, false) => TestType::Political,
        (false, true, false) => TestType::Economic,
        (_, _, true) => TestType::Both,
        (true, true, false) => TestType::Political,
        (false, false, false) => return None,
    };
    pick(tt)
}
