use std::io::{self, Write};

use quiz_core::model::{Question, ResultSummary};
use services::{SessionAnswerResult, SessionProgress};

const BAR_WIDTH: usize = 20;

/// Text progress bar, e.g. `[#########-----------]  45%`.
#[must_use]
pub fn progress_bar(percent: u8) -> String {
    let percent = usize::from(percent.min(100));
    let filled = percent * BAR_WIDTH / 100;
    format!(
        "[{}{}] {percent:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}

/// Prints the question prompt with numbered options.
///
/// # Errors
///
/// Returns any I/O error from `out`.
pub fn write_question(
    out: &mut impl Write,
    progress: &SessionProgress,
    question: &Question,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "{} question {}/{}",
        progress_bar(progress.percent_complete()),
        progress.answered + 1,
        progress.total
    )?;
    writeln!(out, "{}", question.prompt())?;
    for (i, option) in question.options().iter().enumerate() {
        writeln!(out, "  {}) {option}", i + 1)?;
    }
    Ok(())
}

/// Prints immediate feedback after an answer.
///
/// # Errors
///
/// Returns any I/O error from `out`.
pub fn write_feedback(out: &mut impl Write, result: &SessionAnswerResult) -> io::Result<()> {
    if result.answer.is_correct() {
        writeln!(out, "Correct!")
    } else {
        writeln!(
            out,
            "Wrong. The answer was: {}",
            result.answer.question().correct_option()
        )
    }
}

/// Prints the final report: header, score bar, then one block per question.
///
/// # Errors
///
/// Returns any I/O error from `out`.
pub fn write_summary(out: &mut impl Write, summary: &ResultSummary) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Quiz results")?;
    writeln!(out, "Category: {}", summary.category)?;
    writeln!(out, "{}", progress_bar(summary.percentage))?;
    writeln!(out, "Correct: {} / {}", summary.score, summary.total)?;

    for (i, item) in summary.breakdown.iter().enumerate() {
        writeln!(out)?;
        writeln!(out, "Q {}", i + 1)?;
        writeln!(out, "  Question: {}", item.prompt)?;
        writeln!(out, "  Answer:   {}", item.correct_answer)?;
        writeln!(out, "  Chosen:   {}", item.chosen_answer)?;
        writeln!(
            out,
            "  {}",
            if item.is_correct { "Correct" } else { "Wrong" }
        )?;
    }

    let wrong = summary.wrong_answers();
    if !wrong.is_empty() {
        writeln!(out)?;
        writeln!(out, "Review notes")?;
        for note in wrong {
            writeln!(out, "  - {} => {}", note.prompt, note.correct_answer)?;
        }
    }
    Ok(())
}
