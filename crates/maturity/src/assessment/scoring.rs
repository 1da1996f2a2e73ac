use super::catalog::QuestionCatalog;
use super::domain::{AnswerStore, Category};
use serde::{Deserialize, Serialize};

/// Per-category maturity scores on a 0-100 scale, derived from the answer
/// store and the catalog at submission time and never stored independently
/// of its inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub technology: u8,
    pub security: u8,
    pub analytics: u8,
}

impl ScoreRecord {
    /// Average the recorded scores per category.
    ///
    /// Category membership is resolved through the catalog, not the store, so
    /// answers carrying ids unknown to the catalog are silently dropped. A
    /// partially answered category simply averages lower; the sequencer is
    /// responsible for gating submission on completeness.
    pub fn compute(answers: &AnswerStore, catalog: &QuestionCatalog) -> Self {
        let mut record = Self::default();
        for category in Category::ordered() {
            let sum: u32 = answers
                .iter()
                .filter(|(id, _)| catalog.category_of(*id) == Some(category))
                .map(|(_, score)| u32::from(score))
                .sum();
            let count = catalog.category_question_count(category) as u32;
            *record.slot(category) = round_half_up(sum, count);
        }
        record
    }

    pub fn get(&self, category: Category) -> u8 {
        match category {
            Category::Technology => self.technology,
            Category::Security => self.security,
            Category::Analytics => self.analytics,
        }
    }

    fn slot(&mut self, category: Category) -> &mut u8 {
        match category {
            Category::Technology => &mut self.technology,
            Category::Security => &mut self.security,
            Category::Analytics => &mut self.analytics,
        }
    }
}

/// Integer round-to-nearest with ties away from zero, over a non-negative
/// domain.
fn round_half_up(sum: u32, count: u32) -> u8 {
    if count == 0 {
        return 0;
    }
    ((2 * sum + count) / (2 * count)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_half_up(250, 5), 50);
        assert_eq!(round_half_up(0, 5), 0);
        assert_eq!(round_half_up(500, 5), 100);
        // 7/2 = 3.5 rounds away from zero
        assert_eq!(round_half_up(7, 2), 4);
        assert_eq!(round_half_up(1, 2), 1);
        assert_eq!(round_half_up(0, 0), 0);
    }
}
