// Primitives shared by the readers.

use std::fs;
use std::path::Path;

use log::info;
use serde::de::DeserializeOwned;
use snafu::prelude::*;

use crate::peit::*;

pub fn read_json_file<T: DeserializeOwned>(path: &str) -> PeitResult<T> {
    info!("Attempting to read {:?}", path);
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })
}

/// Resolves a path found in a configuration file. Relative paths are taken
/// from the directory of that file.
pub fn resolve_path(root: Option<&Path>, path: &str) -> String {
    match root {
        Some(r) if Path::new(path).is_relative() => r.join(path).display().to_string(),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_follow_config() {
        let root = Path::new("/data/quiz");
        assert_eq!(
            resolve_path(Some(root), "questions.json"),
            "/data/quiz/questions.json"
        );
        assert_eq!(resolve_path(Some(root), "/abs/q.json"), "/abs/q.json");
        assert_eq!(resolve_path(None, "questions.json"), "questions.json");
    }

    #[test]
    fn missing_file() {
        let res: PeitResult<JSValue> = read_json_file("/nonexistent/peit/file.json");
        assert!(matches!(res, Err(PeitError::OpeningJson { .. })));
    }
}
