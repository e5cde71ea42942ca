//! Character-creation questions (QUESTION.TXT).
//!
//! Each question is a description followed by three lettered choices, and
//! each choice secretly nudges the player toward one class category. The
//! category is encoded in the choice text itself: the character following
//! the `"(5"` color code is `l`, `c`, or `v`.

use crate::classes::ClassCategory;
use crate::text::lines;
use crate::{Error, Result};

/// One answer choice and the class category it counts toward.
#[derive(Debug, Clone)]
pub struct QuestionChoice {
    text: String,
    category: ClassCategory,
}

impl QuestionChoice {
    /// Get the choice text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the class category this choice counts toward.
    pub fn category(&self) -> ClassCategory {
        self.category
    }
}

/// One multi-choice question.
#[derive(Debug, Clone)]
pub struct QuestionRecord {
    description: String,
    choices: [QuestionChoice; 3],
}

impl QuestionRecord {
    /// Get the question description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Get the three answer choices in `a`, `b`, `c` order.
    pub fn choices(&self) -> &[QuestionChoice; 3] {
        &self.choices
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Description,
    A,
    B,
    C,
}

/// Parse the question file into its question records.
pub fn parse_questions(text: &str) -> Result<Vec<QuestionRecord>> {
    let mut questions = Vec::new();
    let mut mode = Mode::Description;
    let mut description = String::new();
    let mut a = String::new();
    let mut b = String::new();
    let mut c = String::new();

    for line in lines(text) {
        match line.chars().next() {
            Some(ch) if ch.is_ascii_alphabetic() => match ch {
                'a' => mode = Mode::A,
                'b' => mode = Mode::B,
                'c' => mode = Mode::C,
                _ => {}
            },
            Some(ch) if ch.is_ascii_digit() => {
                // A numbered line opens the next question; flush the one in
                // progress first.
                if mode != Mode::Description {
                    questions.push(build_question(&description, &a, &b, &c)?);
                    description.clear();
                    a.clear();
                    b.clear();
                    c.clear();
                }

                mode = Mode::Description;
            }
            _ => {}
        }

        let accumulator = match mode {
            Mode::Description => &mut description,
            Mode::A => &mut a,
            Mode::B => &mut b,
            Mode::C => &mut c,
        };
        accumulator.push_str(line);
        accumulator.push('\n');
    }

    // The file has no trailing "next question" marker, so the final record
    // is flushed here.
    questions.push(build_question(&description, &a, &b, &c)?);

    Ok(questions)
}

fn build_question(description: &str, a: &str, b: &str, c: &str) -> Result<QuestionRecord> {
    Ok(QuestionRecord {
        description: description.to_string(),
        choices: [build_choice(a)?, build_choice(b)?, build_choice(c)?],
    })
}

fn build_choice(text: &str) -> Result<QuestionChoice> {
    Ok(QuestionChoice {
        text: text.to_string(),
        category: choice_category(text)?,
    })
}

/// Derive a choice's class category from the character after its `"(5"`
/// marker. A choice without the marker is a malformed file, not a default
/// category.
fn choice_category(choice: &str) -> Result<ClassCategory> {
    let marker = choice.find("(5").ok_or_else(|| {
        Error::malformed("QUESTION.TXT", "choice is missing the \"(5\" category marker")
    })?;

    let code = choice[marker + 2..].chars().next().ok_or_else(|| {
        Error::malformed("QUESTION.TXT", "choice ends before its category code")
    })?;

    match code {
        'l' => Ok(ClassCategory::Mage),
        'c' => Ok(ClassCategory::Thief),
        'v' => Ok(ClassCategory::Warrior),
        other => Err(Error::UnrecognizedCategoryCode(other)),
    }
}
