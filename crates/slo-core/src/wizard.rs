use crate::answers::AnswerSet;
use crate::catalog::{self, Question};
use crate::error::{NavigatorError, Result};
use crate::recommend::{self, Recommendations};
use crate::types::Category;

/// Number of questionnaire steps, one per category.
pub const STEP_COUNT: usize = 5;

/// Step-by-step questionnaire state. Holds no derived data: recommendations
/// are computed from the answers whenever [`Wizard::results`] is asked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wizard {
    step: usize,
    answers: AnswerSet,
    show_results: bool,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn into_answers(self) -> AnswerSet {
        self.answers
    }

    pub fn show_results(&self) -> bool {
        self.show_results
    }

    pub fn current_category(&self) -> Category {
        Category::all()[self.step]
    }

    pub fn current_question(&self) -> &'static Question {
        catalog::question(self.current_category())
    }

    /// Toggle `id` on the current step. Returns true if it is now selected.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let category = self.current_category();
        check_option(category, id)?;
        Ok(self.answers.toggle(category, id))
    }

    pub fn set_answer<I, S>(&mut self, category: Category, ids: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        for id in &ids {
            check_option(category, id)?;
        }
        self.answers.set(category, ids);
        Ok(())
    }

    pub fn can_proceed(&self) -> bool {
        self.answers.count(self.current_category()) > 0
    }

    /// Advance one step; past the last step the results are shown.
    pub fn next(&mut self) -> Result<()> {
        if !self.can_proceed() {
            return Err(NavigatorError::StepIncomplete(
                self.current_category().to_string(),
            ));
        }
        if self.step + 1 < STEP_COUNT {
            self.step += 1;
        } else {
            self.show_results = true;
        }
        tracing::debug!(step = self.step, show_results = self.show_results, "wizard advanced");
        Ok(())
    }

    /// Leave the results view, or go back one step. Returns false at the
    /// first step.
    pub fn back(&mut self) -> bool {
        if self.show_results {
            self.show_results = false;
            true
        } else if self.step > 0 {
            self.step -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// `(current, total)`, 1-based.
    pub fn progress(&self) -> (usize, usize) {
        (self.step + 1, STEP_COUNT)
    }

    pub fn results(&self) -> Option<Recommendations> {
        self.show_results
            .then(|| recommend::derive(&self.answers))
    }
}

fn check_option(category: Category, id: &str) -> Result<()> {
    if catalog::is_known_option(category, id) {
        Ok(())
    } else {
        Err(NavigatorError::UnknownOption {
            category: category.to_string(),
            option: id.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
