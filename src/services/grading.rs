use std::collections::HashSet;

use crate::models::domain::{Question, Quiz};
use crate::models::dto::response::{QuestionResult, QuizResult};

/// Grades a flat selection of option ids against every question of `quiz`.
///
/// A question scores its point value only when the selected options that
/// belong to it are exactly its correct options. Selections are compared as
/// sets, and ids that belong to no question are ignored.
pub fn grade_submission(quiz: &Quiz, selected_option_ids: &[String]) -> QuizResult {
    let selected: HashSet<&str> = selected_option_ids.iter().map(String::as_str).collect();

    let results: Vec<QuestionResult> = quiz
        .questions
        .iter()
        .map(|question| {
            let correct = is_answered_correctly(question, &selected);
            QuestionResult {
                question_id: question.id.clone(),
                correct,
                points_awarded: if correct { question.points } else { 0 },
            }
        })
        .collect();

    QuizResult {
        quiz_id: quiz.id.clone(),
        score: results.iter().map(|r| r.points_awarded).sum(),
        total: quiz.total_points(),
        correct_count: results.iter().filter(|r| r.correct).count() as i32,
        question_count: results.len() as i32,
        results,
    }
}

fn is_answered_correctly(question: &Question, selected: &HashSet<&str>) -> bool {
    let correct: HashSet<&str> = question.correct_option_ids().collect();
    let chosen: HashSet<&str> = selected
        .iter()
        .copied()
        .filter(|id| question.has_option(id))
        .collect();

    chosen == correct
}
