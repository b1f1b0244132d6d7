//! Aggregate scoring for a finished interview.

use serde::Serialize;

use crate::models::interview::InterviewQuestion;

const EXCELLENT_FEEDBACK: &str = "Excellent performance! You demonstrated strong knowledge and \
    communication skills. Keep it up!";
const GOOD_FEEDBACK: &str = "Good effort! You have a solid foundation. Focus on the improvement \
    areas to reach the next level.";
const DECENT_FEEDBACK: &str = "Decent attempt. Review the ideal answers and practice more. You \
    are on the right track!";
const PRACTICE_FEEDBACK: &str = "Keep practicing! Review the concepts and try again. Every \
    practice session makes you better.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewOutcome {
    pub overall_score: i32,
    pub feedback: &'static str,
    pub total_answered: usize,
    pub total_questions: usize,
}

/// Rounded arithmetic mean, `None` for an empty input.
pub fn rounded_mean<I: IntoIterator<Item = i32>>(scores: I) -> Option<i32> {
    let (sum, count) = scores
        .into_iter()
        .fold((0i64, 0i64), |(sum, count), s| (sum + s as i64, count + 1));
    (count > 0).then(|| (sum as f64 / count as f64).round() as i32)
}

/// Fixed feedback band for an overall score.
pub fn overall_feedback(score: i32) -> &'static str {
    match score {
        s if s >= 80 => EXCELLENT_FEEDBACK,
        s if s >= 60 => GOOD_FEEDBACK,
        s if s >= 40 => DECENT_FEEDBACK,
        _ => PRACTICE_FEEDBACK,
    }
}

/// Averages the answered questions only; unanswered or zero-scored ones are skipped.
pub fn score_interview(questions: &[InterviewQuestion]) -> InterviewOutcome {
    let answered: Vec<i32> = questions
        .iter()
        .filter(|q| q.is_answered())
        .map(|q| q.score)
        .collect();
    let overall_score = rounded_mean(answered.iter().copied()).unwrap_or(0);

    InterviewOutcome {
        overall_score,
        feedback: overall_feedback(overall_score),
        total_answered: answered.len(),
        total_questions: questions.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answered(score: i32) -> InterviewQuestion {
        InterviewQuestion {
            question: "q".into(),
            user_answer: "an answer".into(),
            score,
            ..Default::default()
        }
    }

    fn unanswered() -> InterviewQuestion {
        InterviewQuestion::new("q".into(), "ideal".into())
    }

    #[test]
    fn test_rounded_mean() {
        assert_eq!(rounded_mean(Vec::<i32>::new()), None);
        assert_eq!(rounded_mean([70, 85]), Some(78)); // 77.5 rounds up
        assert_eq!(rounded_mean([33, 33, 34]), Some(33));
    }

    #[test]
    fn test_feedback_thresholds() {
        assert_eq!(overall_feedback(100), EXCELLENT_FEEDBACK);
        assert_eq!(overall_feedback(80), EXCELLENT_FEEDBACK);
        assert_eq!(overall_feedback(79), GOOD_FEEDBACK);
        assert_eq!(overall_feedback(60), GOOD_FEEDBACK);
        assert_eq!(overall_feedback(59), DECENT_FEEDBACK);
        assert_eq!(overall_feedback(40), DECENT_FEEDBACK);
        assert_eq!(overall_feedback(39), PRACTICE_FEEDBACK);
        assert_eq!(overall_feedback(0), PRACTICE_FEEDBACK);
    }

    #[test]
    fn test_only_answered_questions_count() {
        let questions = vec![answered(90), unanswered(), answered(70), answered(0)];
        let outcome = score_interview(&questions);
        assert_eq!(outcome.overall_score, 80);
        assert_eq!(outcome.feedback, EXCELLENT_FEEDBACK);
        assert_eq!(outcome.total_answered, 2);
        assert_eq!(outcome.total_questions, 4);
    }

    #[test]
    fn test_nothing_answered_scores_zero() {
        let outcome = score_interview(&[unanswered(), unanswered()]);
        assert_eq!(outcome.overall_score, 0);
        assert_eq!(outcome.total_answered, 0);
        assert_eq!(outcome.feedback, PRACTICE_FEEDBACK);
    }
}
