// ********* Input data structures ***********

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

/// The two groups of axes. Each test session covers one of them, or both.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Category {
    Political,
    Economic,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Political, Category::Economic];

    /// The axes of this category, in canonical order.
    pub fn axes(self) -> &'static [Axis] {
        match self {
            Category::Political => &POLITICAL_AXES,
            Category::Economic => &ECONOMIC_AXES,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Political => "political",
            Category::Economic => "economic",
        }
    }
}

impl FromStr for Category {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "political" => Ok(Category::Political),
            "economic" => Ok(Category::Economic),
            x => Err(ScoringError::UnknownCategory(x.to_string())),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a single test session covers.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum TestType {
    Political,
    Economic,
    /// The full test: political questions first, then economic ones.
    Both,
}

impl TestType {
    pub fn categories(self) -> &'static [Category] {
        match self {
            TestType::Political => &[Category::Political],
            TestType::Economic => &[Category::Economic],
            TestType::Both => &Category::ALL,
        }
    }

    pub fn includes(self, category: Category) -> bool {
        self.categories().contains(&category)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TestType::Political => "political",
            TestType::Economic => "economic",
            TestType::Both => "both",
        }
    }
}

impl FromStr for TestType {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "political" => Ok(TestType::Political),
            "economic" => Ok(TestType::Economic),
            "both" => Ok(TestType::Both),
            x => Err(ScoringError::UnknownTestType(x.to_string())),
        }
    }
}

/// A bipolar dimension. The left pole is listed first in every table and
/// wins ties.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Axis {
    /// Individualism vs Collectivism
    Society,
    /// Progressivism vs Traditionalism
    Change,
    /// Active equality vs Universal equality
    Equality,
    /// Cooperation first vs Security first
    Diplomacy,
    /// Growth vs Stability
    Economy,
    /// Vision investing vs Data investing
    Investment,
    /// Entrepreneurial vs Steady worker
    Career,
}

pub const POLITICAL_AXES: [Axis; 4] = [Axis::Society, Axis::Change, Axis::Equality, Axis::Diplomacy];

pub const ECONOMIC_AXES: [Axis; 3] = [Axis::Economy, Axis::Investment, Axis::Career];

impl Axis {
    pub fn category(self) -> Category {
        match self {
            Axis::Society | Axis::Change | Axis::Equality | Axis::Diplomacy => Category::Political,
            Axis::Economy | Axis::Investment | Axis::Career => Category::Economic,
        }
    }

    pub fn left(self) -> Pole {
        match self {
            Axis::Society => Pole::Individualism,
            Axis::Change => Pole::Progressivism,
            Axis::Equality => Pole::ActiveEquality,
            Axis::Diplomacy => Pole::Cooperation,
            Axis::Economy => Pole::Growth,
            Axis::Investment => Pole::Vision,
            Axis::Career => Pole::Entrepreneur,
        }
    }

    pub fn right(self) -> Pole {
        match self {
            Axis::Society => Pole::Collectivism,
            Axis::Change => Pole::Traditionalism,
            Axis::Equality => Pole::UniversalEquality,
            Axis::Diplomacy => Pole::Security,
            Axis::Economy => Pole::Stability,
            Axis::Investment => Pole::Data,
            Axis::Career => Pole::Steady,
        }
    }

    /// The label shown next to the charts.
    pub fn label(self) -> &'static str {
        match self {
            Axis::Society => "Individualism vs Collectivism",
            Axis::Change => "Progressivism vs Traditionalism",
            Axis::Equality => "Active Equality vs Universal Equality",
            Axis::Diplomacy => "Cooperation First vs Security First",
            Axis::Economy => "Growth vs Stability",
            Axis::Investment => "Vision Investing vs Data Investing",
            Axis::Career => "Entrepreneurial vs Steady Worker",
        }
    }

    /// The key used by the question bank, e.g. `I/C`.
    pub fn key(self) -> &'static str {
        match self {
            Axis::Society => "I/C",
            Axis::Change => "P/T",
            Axis::Equality => "A/U",
            Axis::Diplomacy => "E/S",
            Axis::Economy => "G/S",
            Axis::Investment => "V/A",
            Axis::Career => "E/W",
        }
    }
}

impl FromStr for Axis {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        POLITICAL_AXES
            .iter()
            .chain(ECONOMIC_AXES.iter())
            .find(|axis| axis.key() == s)
            .copied()
            .ok_or_else(|| ScoringError::UnknownAxis(s.to_string()))
    }
}

/// One end of an axis.
///
/// The economic poles reuse some of the political letters (`S`, `A`, `E`),
/// so the mapping table identifies them as `S2`, `A2` and `E2`.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Pole {
    Individualism,
    Collectivism,
    Progressivism,
    Traditionalism,
    ActiveEquality,
    UniversalEquality,
    Cooperation,
    Security,
    Growth,
    Stability,
    Vision,
    Data,
    Entrepreneur,
    Steady,
}

impl Pole {
    pub const COUNT: usize = 14;

    pub const ALL: [Pole; Pole::COUNT] = [
        Pole::Individualism,
        Pole::Collectivism,
        Pole::Progressivism,
        Pole::Traditionalism,
        Pole::ActiveEquality,
        Pole::UniversalEquality,
        Pole::Cooperation,
        Pole::Security,
        Pole::Growth,
        Pole::Stability,
        Pole::Vision,
        Pole::Data,
        Pole::Entrepreneur,
        Pole::Steady,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// The letter contributed to a type code.
    pub fn letter(self) -> char {
        match self {
            Pole::Individualism => 'I',
            Pole::Collectivism => 'C',
            Pole::Progressivism => 'P',
            Pole::Traditionalism => 'T',
            Pole::ActiveEquality => 'A',
            Pole::UniversalEquality => 'U',
            Pole::Cooperation => 'E',
            Pole::Security => 'S',
            Pole::Growth => 'G',
            Pole::Stability => 'S',
            Pole::Vision => 'V',
            Pole::Data => 'A',
            Pole::Entrepreneur => 'E',
            Pole::Steady => 'W',
        }
    }

    /// The identifier used in the mapping table. Unique across categories.
    pub fn code(self) -> &'static str {
        match self {
            Pole::Individualism => "I",
            Pole::Collectivism => "C",
            Pole::Progressivism => "P",
            Pole::Traditionalism => "T",
            Pole::ActiveEquality => "A",
            Pole::UniversalEquality => "U",
            Pole::Cooperation => "E",
            Pole::Security => "S",
            Pole::Growth => "G",
            Pole::Stability => "S2",
            Pole::Vision => "V",
            Pole::Data => "A2",
            Pole::Entrepreneur => "E2",
            Pole::Steady => "W",
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Pole::Individualism | Pole::Collectivism => Axis::Society,
            Pole::Progressivism | Pole::Traditionalism => Axis::Change,
            Pole::ActiveEquality | Pole::UniversalEquality => Axis::Equality,
            Pole::Cooperation | Pole::Security => Axis::Diplomacy,
            Pole::Growth | Pole::Stability => Axis::Economy,
            Pole::Vision | Pole::Data => Axis::Investment,
            Pole::Entrepreneur | Pole::Steady => Axis::Career,
        }
    }
}

impl FromStr for Pole {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pole::ALL
            .iter()
            .find(|p| p.code() == s)
            .copied()
            .ok_or_else(|| ScoringError::UnknownPole(s.to_string()))
    }
}

/// The answer to a forced-choice question.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Choice {
    A,
    B,
}

impl Choice {
    pub fn as_str(self) -> &'static str {
        match self {
            Choice::A => "A",
            Choice::B => "B",
        }
    }
}

impl FromStr for Choice {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Choice::A),
            "B" => Ok(Choice::B),
            x => Err(ScoringError::UnknownChoice(x.to_string())),
        }
    }
}

/// Stable identifier of a question. It is the storage key, not a position.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct QuestionId(pub u32);

impl Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Question {
    pub id: QuestionId,
    pub category: Category,
    pub axis: Axis,
    pub text: String,
    pub option_a: String,
    pub option_b: String,
}

/// Which pole each option of a question votes for.
///
/// Invariant: both poles belong to the same axis and differ.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct PoleMapping {
    a: Pole,
    b: Pole,
}

impl PoleMapping {
    pub fn new(a: Pole, b: Pole) -> Result<PoleMapping, ScoringError> {
        if a == b || a.axis() != b.axis() {
            return Err(ScoringError::MismatchedPoles(a, b));
        }
        Ok(PoleMapping { a, b })
    }

    pub fn pole(&self, choice: Choice) -> Pole {
        match choice {
            Choice::A => self.a,
            Choice::B => self.b,
        }
    }

    pub fn axis(&self) -> Axis {
        self.a.axis()
    }
}

pub type MappingTable = BTreeMap<QuestionId, PoleMapping>;

/// The answers of one session, keyed by question id.
///
/// Ordered by id, so that iterating over it never depends on insertion
/// order.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct AnswerSet {
    answers: BTreeMap<QuestionId, Choice>,
}

impl AnswerSet {
    pub fn new() -> AnswerSet {
        AnswerSet::default()
    }

    /// Records an answer, replacing any previous answer to the same question.
    pub fn insert(&mut self, id: QuestionId, choice: Choice) -> Option<Choice> {
        self.answers.insert(id, choice)
    }

    pub fn get(&self, id: QuestionId) -> Option<Choice> {
        self.answers.get(&id).copied()
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.answers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn clear(&mut self) {
        self.answers.clear()
    }

    pub fn retain<F: FnMut(QuestionId) -> bool>(&mut self, mut keep: F) {
        self.answers.retain(|id, _| keep(*id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionId, Choice)> + '_ {
        self.answers.iter().map(|(id, c)| (*id, *c))
    }
}

impl FromIterator<(QuestionId, Choice)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (QuestionId, Choice)>>(iter: I) -> Self {
        AnswerSet {
            answers: iter.into_iter().collect(),
        }
    }
}

// ******** Output data structures *********

/// Vote counts for all 14 poles.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct Tally {
    counts: [u32; Pole::COUNT],
}

impl Tally {
    pub fn get(&self, pole: Pole) -> u32 {
        self.counts[pole.index()]
    }

    pub(crate) fn increment(&mut self, pole: Pole) {
        self.counts[pole.index()] += 1;
    }

    /// The (left, right) counts of an axis.
    pub fn axis_counts(&self, axis: Axis) -> (u32, u32) {
        (self.get(axis.left()), self.get(axis.right()))
    }

    /// Number of answered questions that voted on this axis.
    pub fn answered(&self, axis: Axis) -> u32 {
        let (l, r) = self.axis_counts(axis);
        l + r
    }

    /// All the counters, in the order of `Pole::ALL`.
    pub fn iter(&self) -> impl Iterator<Item = (Pole, u32)> + '_ {
        Pole::ALL.iter().map(|p| (*p, self.get(*p)))
    }
}

/// One of the 16 political or 8 economic type codes.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub struct TypeCode {
    category: Category,
    code: String,
}

impl TypeCode {
    pub(crate) fn from_poles(category: Category, poles: &[Pole]) -> TypeCode {
        TypeCode {
            category,
            code: poles.iter().map(|p| p.letter()).collect(),
        }
    }

    /// Recognizes a code such as `IPAE` or `GVW`.
    ///
    /// The category follows from the length: four letters are political,
    /// three are economic.
    pub fn parse(s: &str) -> Result<TypeCode, ScoringError> {
        let letters: Vec<char> = s.chars().collect();
        let category = match letters.len() {
            4 => Category::Political,
            3 => Category::Economic,
            _ => return Err(ScoringError::UnknownTypeCode(s.to_string())),
        };
        let valid = category
            .axes()
            .iter()
            .zip(letters.iter())
            .all(|(axis, c)| axis.left().letter() == *c || axis.right().letter() == *c);
        if !valid {
            return Err(ScoringError::UnknownTypeCode(s.to_string()));
        }
        Ok(TypeCode {
            category,
            code: s.to_string(),
        })
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn as_str(&self) -> &str {
        self.code.as_str()
    }
}

impl Display for TypeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code)
    }
}

/// The chart value of one axis.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct AxisScore {
    pub axis: Axis,
    /// Percentage of the votes on this axis that went to the left pole.
    pub left_percent: u32,
}

impl AxisScore {
    pub fn label(&self) -> &'static str {
        self.axis.label()
    }

    pub fn right_percent(&self) -> u32 {
        100 - self.left_percent
    }
}

/// Both classifications, computed from a single tally.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CalculationResult {
    pub political: TypeCode,
    pub economic: TypeCode,
    pub tally: Tally,
}

impl CalculationResult {
    pub fn code(&self, category: Category) -> &TypeCode {
        match category {
            Category::Political => &self.political,
            Category::Economic => &self.economic,
        }
    }

    pub fn scores(&self, category: Category) -> Vec<AxisScore> {
        crate::normalize(&self.tally, category)
    }
}

/// Errors raised when reading values from outside the library, or when
/// a session is fed a question it does not contain.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ScoringError {
    UnknownCategory(String),
    UnknownTestType(String),
    UnknownAxis(String),
    UnknownPole(String),
    UnknownChoice(String),
    UnknownTypeCode(String),
    MismatchedPoles(Pole, Pole),
    QuestionNotInTest(QuestionId),
}

impl Error for ScoringError {}

impl Display for ScoringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringError::UnknownCategory(x) => {
                write!(f, "unknown category {:?}, expected political or economic", x)
            }
            ScoringError::UnknownTestType(x) => write!(
                f,
                "unknown test type {:?}, expected political, economic or both",
                x
            ),
            ScoringError::UnknownAxis(x) => write!(f, "unknown axis {:?}", x),
            ScoringError::UnknownPole(x) => write!(f, "unknown pole {:?}", x),
            ScoringError::UnknownChoice(x) => write!(f, "unknown choice {:?}, expected A or B", x),
            ScoringError::UnknownTypeCode(x) => write!(f, "unknown type code {:?}", x),
            ScoringError::MismatchedPoles(a, b) => write!(
                f,
                "poles {} and {} are not the two ends of one axis",
                a.code(),
                b.code()
            ),
            ScoringError::QuestionNotInTest(id) => {
                write!(f, "question {} is not part of this test", id)
            }
        }
    }
}
