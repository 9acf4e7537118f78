//! End-of-session report
//!
//! Answer and input columns are aligned by reading the text as integers.
//! The answer column takes the digit count of the widest answer, the input
//! column the digit count of the largest input. Anything that doesn't parse
//! counts as zero, i.e. width 1, so non-numeric answers are not aligned.

use std::io::{self, Write};
use std::num::IntErrorKind;

use super::problem::{answers_match, Problem};
use super::session::TerminalState;
use super::term;

/// Number of decimal digits in `x`, at least 1
pub fn digit_width(x: i64) -> usize {
    let mut x = x.unsigned_abs();
    if x == 0 {
        return 1;
    }

    let mut count = 0;
    while x != 0 {
        x /= 10;
        count += 1;
    }
    count
}

/// Read `value` as an integer, clamping out-of-range numbers
///
/// Text that isn't a number reads as 0.
pub fn numeric_value(value: &str) -> i64 {
    match value.parse::<i64>() {
        Ok(n) => n,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => 0,
        },
    }
}

/// Digit count of the widest value
pub fn widest_width<'a>(values: impl IntoIterator<Item = &'a str>) -> usize {
    values
        .into_iter()
        .map(|v| digit_width(numeric_value(v)))
        .max()
        .unwrap_or(1)
}

/// Digit count of the numerically largest value
pub fn largest_width<'a>(values: impl IntoIterator<Item = &'a str>) -> usize {
    digit_width(values.into_iter().map(numeric_value).max().unwrap_or(0))
}

/// `Q<n>)` with `n` one-based and zero-padded to `width`
pub(crate) fn question_label(index: usize, width: usize) -> String {
    format!("Q{:0width$})", index + 1, width = width)
}

/// Everything needed to render the final report
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub problems: &'a [Problem],
    pub inputs: &'a [String],
    pub score: usize,
    pub state: TerminalState,
}

impl Report<'_> {
    /// Escape sequence that clears the in-progress prompt line
    fn reset(&self) -> &'static str {
        match self.state {
            TerminalState::Completed => term::CLEAR_PREV_LINE,
            TerminalState::TimedOut => term::CLEAR_LINE,
        }
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        write!(out, "{}", self.reset())?;

        if self.state == TerminalState::TimedOut {
            writeln!(out, "You ran out of time...")?;
            writeln!(
                out,
                "You only completed {} of {} questions, better luck next time!",
                self.inputs.len(),
                self.problems.len()
            )?;
        }

        let q_pad = digit_width(self.problems.len() as i64);
        let a_pad = widest_width(self.problems.iter().map(Problem::answer));
        let i_pad = largest_width(self.inputs.iter().map(String::as_str));

        for (index, (problem, input)) in self.problems.iter().zip(self.inputs).enumerate() {
            let marker = if answers_match(problem.answer(), input) {
                "=="
            } else {
                "!="
            };
            writeln!(
                out,
                "{} {}: {:>a_pad$} {} {:>i_pad$}",
                question_label(index, q_pad),
                problem.question(),
                problem.answer(),
                marker,
                input,
                a_pad = a_pad,
                i_pad = i_pad,
            )?;
        }

        writeln!(
            out,
            "You answered {} of {} correctly!",
            self.score,
            self.problems.len()
        )?;
        out.flush()
    }

    /// Render into a string
    pub fn render(&self) -> String {
        let mut buf = Vec::new();
        // Writing to a Vec cannot fail
        let _ = self.write_to(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capitals() -> Vec<Problem> {
        vec![
            Problem::new("2+2", "4"),
            Problem::new("capital of France", "Paris"),
        ]
    }

    #[test]
    fn test_digit_width() {
        assert_eq!(digit_width(0), 1);
        assert_eq!(digit_width(7), 1);
        assert_eq!(digit_width(10), 2);
        assert_eq!(digit_width(999), 3);
        assert_eq!(digit_width(-42), 2);
        assert_eq!(digit_width(i64::MIN), 19);
    }

    #[test]
    fn test_numeric_value_clamps_and_defaults() {
        assert_eq!(numeric_value("42"), 42);
        assert_eq!(numeric_value("+7"), 7);
        assert_eq!(numeric_value("-100"), -100);
        assert_eq!(numeric_value("Paris"), 0);
        assert_eq!(numeric_value(" 4"), 0);
        assert_eq!(numeric_value("99999999999999999999"), i64::MAX);
        assert_eq!(numeric_value("-99999999999999999999"), i64::MIN);
    }

    #[test]
    fn test_widest_width_treats_text_as_zero() {
        assert_eq!(widest_width(["Paris", "London"]), 1);
        assert_eq!(widest_width(["4", "100", "Paris"]), 3);
        assert_eq!(widest_width(["-1000", "5"]), 4);
        assert_eq!(widest_width(Vec::<&str>::new()), 1);
    }

    #[test]
    fn test_largest_width_uses_largest_value() {
        assert_eq!(largest_width(["4", "100", "Paris"]), 3);
        assert_eq!(largest_width(["-100", "5"]), 1);
        assert_eq!(largest_width(["-100"]), 3);
        assert_eq!(largest_width(Vec::<&str>::new()), 1);
    }

    #[test]
    fn test_input_column_sized_by_largest_input() {
        let problems = vec![Problem::new("a", "5"), Problem::new("b", "6")];
        let inputs = vec!["-100".to_string(), "5".to_string()];
        let report = Report {
            problems: &problems,
            inputs: &inputs,
            score: 0,
            state: TerminalState::Completed,
        };
        let rendered = report.render();

        assert!(rendered.contains("Q1) a: 5 != -100\n"));
        assert!(rendered.contains("Q2) b: 6 != 5\n"));
    }

    #[test]
    fn test_out_of_range_answer_widens_column() {
        let problems = vec![
            Problem::new("big", "99999999999999999999"),
            Problem::new("small", "1"),
        ];
        let inputs = vec!["0".to_string(), "1".to_string()];
        let report = Report {
            problems: &problems,
            inputs: &inputs,
            score: 1,
            state: TerminalState::Completed,
        };
        let rendered = report.render();

        assert!(rendered.contains(&format!("Q2) small: {:>19} == 1\n", "1")));
    }

    #[test]
    fn test_completed_report() {
        let problems = capitals();
        let inputs = vec!["4".to_string(), "paris".to_string()];
        let report = Report {
            problems: &problems,
            inputs: &inputs,
            score: 2,
            state: TerminalState::Completed,
        };

        assert_eq!(
            report.render(),
            "\x1b[1F\x1b[2K\
             Q1) 2+2: 4 == 4\n\
             Q2) capital of France: Paris == paris\n\
             You answered 2 of 2 correctly!\n"
        );
    }

    #[test]
    fn test_timed_out_report_lists_attempted_only() {
        let problems = capitals();
        let inputs = vec!["5".to_string()];
        let report = Report {
            problems: &problems,
            inputs: &inputs,
            score: 0,
            state: TerminalState::TimedOut,
        };

        assert_eq!(
            report.render(),
            "\x1b[0G\x1b[2K\
             You ran out of time...\n\
             You only completed 1 of 2 questions, better luck next time!\n\
             Q1) 2+2: 4 != 5\n\
             You answered 0 of 2 correctly!\n"
        );
    }

    #[test]
    fn test_numeric_columns_are_right_aligned() {
        let problems = vec![Problem::new("5*20", "100"), Problem::new("1+1", "2")];
        let inputs = vec!["100".to_string(), "3".to_string()];
        let report = Report {
            problems: &problems,
            inputs: &inputs,
            score: 1,
            state: TerminalState::Completed,
        };
        let rendered = report.render();

        assert!(rendered.contains("Q1) 5*20: 100 == 100\n"));
        assert!(rendered.contains("Q2) 1+1:   2 !=   3\n"));
    }

    #[test]
    fn test_timed_out_before_any_answer() {
        let problems = capitals();
        let report = Report {
            problems: &problems,
            inputs: &[],
            score: 0,
            state: TerminalState::TimedOut,
        };
        let rendered = report.render();

        assert!(rendered.contains("You only completed 0 of 2 questions"));
        assert!(!rendered.contains("Q1)"));
        assert!(rendered.ends_with("You answered 0 of 2 correctly!\n"));
    }
}
