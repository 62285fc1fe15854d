pub use crate::config::*;

use log::debug;

/// A builder that collects the answers of one test session.
///
/// The questions are presented in display order. Answers can be given in
/// any order and overwritten.
///
/// ```
/// use peit_scoring::builder::Builder;
/// use peit_scoring::*;
///
/// let questions = vec![Question {
///     id: QuestionId(1),
///     category: Category::Political,
///     axis: Axis::Society,
///     text: "Who should decide?".to_string(),
///     option_a: "Each person".to_string(),
///     option_b: "The community".to_string(),
/// }];
/// let mut mapping = MappingTable::new();
/// mapping.insert(
///     QuestionId(1),
///     PoleMapping::new(Pole::Individualism, Pole::Collectivism)?,
/// );
///
/// let mut builder = Builder::new(&questions, TestType::Political);
/// builder.answer(QuestionId(1), Choice::B)?;
/// assert!(builder.is_complete());
/// assert_eq!(builder.finish(&mapping).political.as_str(), "CPAE");
///
/// # Ok::<(), ScoringError>(())
/// ```
pub struct Builder<'a> {
    pub(crate) _test_type: TestType,
    pub(crate) _questions: Vec<&'a Question>,
    pub(crate) _answers: AnswerSet,
}

impl<'a> Builder<'a> {
    pub fn new(questions: &'a [Question], test_type: TestType) -> Builder<'a> {
        let ordered = match test_type {
            TestType::Political => crate::build_display_order(questions, Category::Political),
            TestType::Economic => crate::build_display_order(questions, Category::Economic),
            TestType::Both => crate::build_full_display_order(questions),
        };
        Builder {
            _test_type: test_type,
            _questions: ordered,
            _answers: AnswerSet::new(),
        }
    }

    /// Restores the answers of a previous session of the same test.
    ///
    /// The answers replace the current ones. Answers to questions that are
    /// not part of this test are dropped.
    pub fn resume(self, answers: &AnswerSet) -> Builder<'a> {
        let mut kept = answers.clone();
        kept.retain(|id| self.contains(id));
        debug!(
            "resume: kept {} of {} stored answers",
            kept.len(),
            answers.len()
        );
        Builder {
            _test_type: self._test_type,
            _questions: self._questions,
            _answers: kept,
        }
    }

    fn contains(&self, id: QuestionId) -> bool {
        self._questions.iter().any(|q| q.id == id)
    }

    /// Records the answer to a question of this test.
    pub fn answer(&mut self, id: QuestionId, choice: Choice) -> Result<(), ScoringError> {
        if !self.contains(id) {
            return Err(ScoringError::QuestionNotInTest(id));
        }
        if let Some(previous) = self._answers.insert(id, choice) {
            debug!("answer: {} changed from {:?} to {:?}", id, previous, choice);
        }
        Ok(())
    }

    /// The first question in display order that has no answer yet.
    pub fn current(&self) -> Option<&'a Question> {
        self._questions
            .iter()
            .find(|q| !self._answers.contains(q.id))
            .copied()
    }

    /// (answered, total)
    pub fn progress(&self) -> (usize, usize) {
        (self._answers.len(), self._questions.len())
    }

    pub fn is_complete(&self) -> bool {
        self.current().is_none()
    }

    pub fn test_type(&self) -> TestType {
        self._test_type
    }

    pub fn questions(&self) -> &[&'a Question] {
        &self._questions
    }

    pub fn answers(&self) -> &AnswerSet {
        &self._answers
    }

    pub fn finish(&self, mapping: &MappingTable) -> CalculationResult {
        crate::calculate_result(&self._answers, mapping)
    }
}
