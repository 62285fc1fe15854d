mod config;
use log::{debug, info};

use std::collections::HashMap;

pub mod builder;
pub mod manual;

pub use crate::config::*;

/// Counts the votes of each pole.
///
/// Answers to questions that have no entry in the mapping table do not
/// count towards anything.
pub fn tally(answers: &AnswerSet, mapping: &MappingTable) -> Tally {
    let mut res = Tally::default();
    for (qid, choice) in answers.iter() {
        match mapping.get(&qid) {
            Some(pm) => {
                let pole = pm.pole(choice);
                debug!("tally: {} {:?} -> {}", qid, choice, pole.code());
                res.increment(pole);
            }
            None => {
                debug!("tally: {} has no mapping, skipping", qid);
            }
        }
    }
    res
}

/// The pole with strictly more votes. Ties go to the left pole.
fn winning_pole(tally: &Tally, axis: Axis) -> Pole {
    let (l, r) = tally.axis_counts(axis);
    if r > l {
        axis.right()
    } else {
        axis.left()
    }
}

/// Derives the type code of a category from the tally.
///
/// Every axis contributes one of its two letters, in canonical axis order,
/// so the result is always one of the codes of `all_type_codes`.
pub fn classify(tally: &Tally, category: Category) -> TypeCode {
    let poles: Vec<Pole> = category
        .axes()
        .iter()
        .map(|axis| winning_pole(tally, *axis))
        .collect();
    TypeCode::from_poles(category, &poles)
}

// round(100 * part / total), with halves rounded up.
fn percent(part: u32, total: u32) -> u32 {
    if total == 0 {
        return 50;
    }
    let (p, t) = (part as u64, total as u64);
    ((200 * p + t) / (2 * t)) as u32
}

/// Converts the raw tally of a category into percentages of the left pole.
///
/// An axis without any answer sits at 50.
pub fn normalize(tally: &Tally, category: Category) -> Vec<AxisScore> {
    category
        .axes()
        .iter()
        .map(|axis| {
            let (l, r) = tally.axis_counts(*axis);
            AxisScore {
                axis: *axis,
                left_percent: percent(l, l + r),
            }
        })
        .collect()
}

/// Runs the tally once and classifies both categories.
pub fn calculate_result(answers: &AnswerSet, mapping: &MappingTable) -> CalculationResult {
    info!(
        "Processing {:?} answers against {:?} mapped questions",
        answers.len(),
        mapping.len()
    );
    let t = tally(answers, mapping);
    let political = classify(&t, Category::Political);
    let economic = classify(&t, Category::Economic);
    info!("Types: political: {} economic: {}", political, economic);
    CalculationResult {
        political,
        economic,
        tally: t,
    }
}

/// The fixed presentation order of the questions of a category.
///
/// Questions are queued per axis in definition order, then the queues are
/// drained one question at a time, in canonical axis order, so that the axes
/// alternate instead of coming in blocks.
pub fn build_display_order(questions: &[Question], category: Category) -> Vec<&Question> {
    let mut by_axis: HashMap<Axis, Vec<&Question>> = HashMap::new();
    for q in questions.iter().filter(|q| q.category == category) {
        by_axis.entry(q.axis).or_insert_with(Vec::new).push(q);
    }
    let mut queues: Vec<std::vec::IntoIter<&Question>> = category
        .axes()
        .iter()
        .map(|axis| by_axis.remove(axis).unwrap_or_default().into_iter())
        .collect();
    // Questions filed under an axis of the other category.
    for (axis, qs) in by_axis.iter() {
        for q in qs {
            debug!(
                "build_display_order: dropping {}: axis {} is not {}",
                q.id,
                axis.key(),
                category
            );
        }
    }

    let mut res: Vec<&Question> = Vec::new();
    let mut remaining: usize = queues.iter().map(|q| q.len()).sum();
    while remaining > 0 {
        for queue in queues.iter_mut() {
            if let Some(q) = queue.next() {
                res.push(q);
                remaining -= 1;
            }
        }
    }
    res
}

/// The order of the full test: all the political questions, then all the
/// economic ones.
pub fn build_full_display_order(questions: &[Question]) -> Vec<&Question> {
    let mut res = build_display_order(questions, Category::Political);
    res.extend(build_display_order(questions, Category::Economic));
    res
}

/// All the codes of a category, left letters first, the last axis varying
/// fastest.
pub fn all_type_codes(category: Category) -> Vec<TypeCode> {
    let axes = category.axes();
    let mut res: Vec<TypeCode> = Vec::with_capacity(1 << axes.len());
    for bits in 0..(1u32 << axes.len()) {
        let poles: Vec<Pole> = axes
            .iter()
            .enumerate()
            .map(|(idx, axis)| {
                let shift = axes.len() - 1 - idx;
                if (bits >> shift) & 1 == 0 {
                    axis.left()
                } else {
                    axis.right()
                }
            })
            .collect();
        res.push(TypeCode::from_poles(category, &poles));
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// 69 questions: 24 + 10 + 10 + 10 political, 5 + 5 + 5 economic.
    /// Option A always votes for the left pole.
    fn question_bank() -> (Vec<Question>, MappingTable) {
        let sizes: [(Axis, u32); 7] = [
            (Axis::Society, 24),
            (Axis::Change, 10),
            (Axis::Equality, 10),
            (Axis::Diplomacy, 10),
            (Axis::Economy, 5),
            (Axis::Investment, 5),
            (Axis::Career, 5),
        ];
        let mut questions = Vec::new();
        let mut mapping = MappingTable::new();
        let mut next_id = 1;
        for (axis, n) in sizes.iter() {
            for _ in 0..*n {
                let id = QuestionId(next_id);
                next_id += 1;
                questions.push(Question {
                    id,
                    category: axis.category(),
                    axis: *axis,
                    text: format!("question {}", id),
                    option_a: axis.left().code().to_string(),
                    option_b: axis.right().code().to_string(),
                });
                mapping.insert(id, PoleMapping::new(axis.left(), axis.right()).unwrap());
            }
        }
        (questions, mapping)
    }

    fn ids_of(questions: &[Question], axis: Axis) -> Vec<QuestionId> {
        questions
            .iter()
            .filter(|q| q.axis == axis)
            .map(|q| q.id)
            .collect()
    }

    fn score_of(scores: &[AxisScore], axis: Axis) -> u32 {
        scores.iter().find(|s| s.axis == axis).unwrap().left_percent
    }

    #[test]
    fn empty_answers() {
        init();
        let (_, mapping) = question_bank();
        let res = calculate_result(&AnswerSet::new(), &mapping);
        assert!(res.tally.iter().all(|(_, c)| c == 0));
        // Ties on every axis fall to the left pole.
        assert_eq!(res.political.as_str(), "IPAE");
        assert_eq!(res.economic.as_str(), "GVE");
        for category in Category::ALL {
            assert!(res.scores(category).iter().all(|s| s.left_percent == 50));
        }
    }

    #[test]
    fn all_left_answers() {
        init();
        let (questions, mapping) = question_bank();
        let answers: AnswerSet = questions.iter().map(|q| (q.id, Choice::A)).collect();
        assert_eq!(answers.len(), 69);
        let res = calculate_result(&answers, &mapping);
        assert_eq!(res.political.as_str(), "IPAE");
        assert_eq!(res.economic.as_str(), "GVE");
        let scores = normalize(&res.tally, Category::Political);
        assert_eq!(scores.len(), 4);
        assert!(scores.iter().all(|s| s.left_percent == 100));
        assert!(scores.iter().all(|s| s.right_percent() == 0));
    }

    #[test]
    fn all_right_answers() {
        let (questions, mapping) = question_bank();
        let answers: AnswerSet = questions.iter().map(|q| (q.id, Choice::B)).collect();
        let res = calculate_result(&answers, &mapping);
        assert_eq!(res.political.as_str(), "CTUS");
        assert_eq!(res.economic.as_str(), "SAW");
        assert!(res
            .scores(Category::Economic)
            .iter()
            .all(|s| s.left_percent == 0));
    }

    #[test]
    fn partial_session() {
        let (questions, mapping) = question_bank();
        let society = ids_of(&questions, Axis::Society);
        let mut answers = AnswerSet::new();
        for (idx, id) in society.iter().take(10).enumerate() {
            answers.insert(*id, if idx < 6 { Choice::A } else { Choice::B });
        }
        let t = tally(&answers, &mapping);
        assert_eq!(t.axis_counts(Axis::Society), (6, 4));
        let scores = normalize(&t, Category::Political);
        assert_eq!(score_of(&scores, Axis::Society), 60);
        assert_eq!(score_of(&scores, Axis::Change), 50);
        assert_eq!(score_of(&scores, Axis::Equality), 50);
        assert_eq!(score_of(&scores, Axis::Diplomacy), 50);
        assert_eq!(scores[0].label(), "Individualism vs Collectivism");
        // Economic counters are untouched.
        assert!(ECONOMIC_AXES.iter().all(|a| t.answered(*a) == 0));
    }

    #[test]
    fn tally_conservation() {
        let (questions, mapping) = question_bank();
        let mut answers = AnswerSet::new();
        for (idx, q) in questions.iter().enumerate() {
            if idx % 3 != 0 {
                answers.insert(q.id, if idx % 2 == 0 { Choice::A } else { Choice::B });
            }
        }
        let t = tally(&answers, &mapping);
        for axis in POLITICAL_AXES.iter().chain(ECONOMIC_AXES.iter()) {
            let expected = questions
                .iter()
                .filter(|q| q.axis == *axis && answers.contains(q.id))
                .count() as u32;
            assert_eq!(t.answered(*axis), expected, "axis {}", axis.key());
        }
    }

    #[test]
    fn unknown_question_is_ignored() {
        let (questions, mapping) = question_bank();
        let mut answers = AnswerSet::new();
        answers.insert(questions[0].id, Choice::B);
        let before = tally(&answers, &mapping);
        answers.insert(QuestionId(9999), Choice::A);
        let after = tally(&answers, &mapping);
        assert_eq!(before, after);
        assert_eq!(after.get(Pole::Collectivism), 1);
    }

    #[test]
    fn tie_goes_to_left_pole() {
        let (questions, mapping) = question_bank();
        let mut answers = AnswerSet::new();
        for axis in POLITICAL_AXES.iter().chain(ECONOMIC_AXES.iter()) {
            let ids = ids_of(&questions, *axis);
            answers.insert(ids[0], Choice::A);
            answers.insert(ids[1], Choice::B);
        }
        for _ in 0..3 {
            let res = calculate_result(&answers, &mapping);
            assert_eq!(res.political.as_str(), "IPAE");
            assert_eq!(res.economic.as_str(), "GVE");
        }
    }

    #[test]
    fn mixed_code() {
        let (questions, mapping) = question_bank();
        let mut answers = AnswerSet::new();
        // Collectivism, Progressivism, Universal equality, Security.
        for (axis, choice) in [
            (Axis::Society, Choice::B),
            (Axis::Change, Choice::A),
            (Axis::Equality, Choice::B),
            (Axis::Diplomacy, Choice::B),
            (Axis::Economy, Choice::A),
            (Axis::Investment, Choice::B),
            (Axis::Career, Choice::A),
        ] {
            for id in ids_of(&questions, axis).iter().take(3) {
                answers.insert(*id, choice);
            }
        }
        let res = calculate_result(&answers, &mapping);
        assert_eq!(res.political.as_str(), "CPUS");
        assert_eq!(res.economic.as_str(), "GAE");
        assert_eq!(res.political.category(), Category::Political);
    }

    #[test]
    fn rounding_half_up() {
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 2), 50);
        assert_eq!(percent(7, 8), 88);
        assert_eq!(percent(0, 0), 50);
        assert_eq!(percent(5, 5), 100);
    }

    #[test]
    fn normalized_bounds() {
        let (questions, mapping) = question_bank();
        let mut answers = AnswerSet::new();
        for (idx, q) in questions.iter().enumerate() {
            answers.insert(q.id, if idx % 5 < 2 { Choice::A } else { Choice::B });
            let t = tally(&answers, &mapping);
            for category in Category::ALL {
                for s in normalize(&t, category) {
                    assert!(s.left_percent <= 100);
                    assert_eq!(s.left_percent + s.right_percent(), 100);
                }
            }
        }
    }

    #[test]
    fn type_code_sets() {
        let political = all_type_codes(Category::Political);
        let economic = all_type_codes(Category::Economic);
        assert_eq!(political.len(), 16);
        assert_eq!(economic.len(), 8);
        assert_eq!(political[0].as_str(), "IPAE");
        assert_eq!(political[1].as_str(), "IPAS");
        assert_eq!(political[15].as_str(), "CTUS");
        assert_eq!(economic[0].as_str(), "GVE");
        assert_eq!(economic[7].as_str(), "SAW");
        let unique: HashSet<&str> = political.iter().map(|c| c.as_str()).collect();
        assert_eq!(unique.len(), 16);
    }

    #[test]
    fn classify_is_total() {
        // Every combination of winners and ties lands in the closed set.
        let (questions, mapping) = question_bank();
        let political: HashSet<TypeCode> = all_type_codes(Category::Political).into_iter().collect();
        let economic: HashSet<TypeCode> = all_type_codes(Category::Economic).into_iter().collect();
        for pattern in 0..128u32 {
            let mut answers = AnswerSet::new();
            for (idx, q) in questions.iter().enumerate() {
                if (pattern >> (idx % 7)) & 1 == 1 {
                    answers.insert(q.id, if idx % 2 == 0 { Choice::A } else { Choice::B });
                }
            }
            let res = calculate_result(&answers, &mapping);
            assert!(political.contains(&res.political));
            assert!(economic.contains(&res.economic));
        }
    }

    #[test]
    fn parse_type_codes() {
        assert_eq!(
            TypeCode::parse("CTAE").unwrap().category(),
            Category::Political
        );
        assert_eq!(TypeCode::parse("SVW").unwrap().category(), Category::Economic);
        assert!(TypeCode::parse("XPAE").is_err());
        assert!(TypeCode::parse("GVEW").is_err());
        assert!(TypeCode::parse("").is_err());
    }

    #[test]
    fn interleave_equal_axes() {
        let mut questions = Vec::new();
        let mut id = 1;
        for axis in POLITICAL_AXES {
            for _ in 0..5 {
                questions.push(Question {
                    id: QuestionId(id),
                    category: Category::Political,
                    axis,
                    text: String::new(),
                    option_a: String::new(),
                    option_b: String::new(),
                });
                id += 1;
            }
        }
        let order = build_display_order(&questions, Category::Political);
        assert_eq!(order.len(), 20);
        for block in order.chunks(4) {
            let axes: Vec<Axis> = block.iter().map(|q| q.axis).collect();
            assert_eq!(axes, POLITICAL_AXES.to_vec());
        }
        // Each axis keeps its definition order.
        let society: Vec<u32> = order
            .iter()
            .filter(|q| q.axis == Axis::Society)
            .map(|q| q.id.0)
            .collect();
        assert_eq!(society, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn interleave_uneven_axes() {
        let (questions, _) = question_bank();
        let order = build_display_order(&questions, Category::Political);
        assert_eq!(order.len(), 54);
        let first: Vec<Axis> = order.iter().take(8).map(|q| q.axis).collect();
        assert_eq!(first[..4], POLITICAL_AXES);
        assert_eq!(first[4..], POLITICAL_AXES);
        // Once the short queues are drained, only Society is left.
        assert!(order[40..].iter().all(|q| q.axis == Axis::Society));
        assert_eq!(
            build_display_order(&questions, Category::Political),
            order,
            "display order must be deterministic"
        );
    }

    #[test]
    fn full_display_order() {
        let (questions, _) = question_bank();
        let order = build_full_display_order(&questions);
        assert_eq!(order.len(), 69);
        assert!(order[..54]
            .iter()
            .all(|q| q.category == Category::Political));
        assert!(order[54..].iter().all(|q| q.category == Category::Economic));
        let economic: Vec<Axis> = order[54..57].iter().map(|q| q.axis).collect();
        assert_eq!(economic, ECONOMIC_AXES.to_vec());
    }

    #[test]
    fn display_order_skips_misfiled_questions() {
        let questions = vec![Question {
            id: QuestionId(1),
            category: Category::Political,
            axis: Axis::Economy,
            text: String::new(),
            option_a: String::new(),
            option_b: String::new(),
        }];
        assert!(build_display_order(&questions, Category::Political).is_empty());
    }

    #[test]
    fn parsing_closed_sets() {
        assert_eq!("political".parse::<Category>(), Ok(Category::Political));
        assert_eq!(
            "social".parse::<Category>(),
            Err(ScoringError::UnknownCategory("social".to_string()))
        );
        assert_eq!("both".parse::<TestType>(), Ok(TestType::Both));
        assert_eq!("E/W".parse::<Axis>(), Ok(Axis::Career));
        assert_eq!("S2".parse::<Pole>(), Ok(Pole::Stability));
        assert_eq!("S".parse::<Pole>(), Ok(Pole::Security));
        assert!("C".parse::<Choice>().is_err());
        assert!(PoleMapping::new(Pole::Individualism, Pole::Growth).is_err());
        assert!(PoleMapping::new(Pole::Growth, Pole::Growth).is_err());
    }
}
