use super::domain::Category;
use serde::Serialize;

/// The five discrete scores an answer choice may carry, in catalog order.
pub const OPTION_SCORES: [u8; 5] = [0, 25, 50, 75, 100];

/// How many questions every category must carry.
pub const QUESTIONS_PER_CATEGORY: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct AnswerOption {
    pub text: &'static str,
    pub score: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: u32,
    pub category: Category,
    pub text: &'static str,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn accepts_score(&self, score: u8) -> bool {
        self.options.iter().any(|option| option.score == score)
    }
}

/// Immutable question bank, shape-checked once at construction rather than
/// per lookup.
#[derive(Debug)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    /// Build a catalog, rejecting any deviation from the expected shape:
    /// unique ids, five questions per category, and each question offering
    /// exactly the five standard option scores in ascending order.
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        for (index, question) in questions.iter().enumerate() {
            if questions[..index].iter().any(|prior| prior.id == question.id) {
                return Err(CatalogError::DuplicateId(question.id));
            }
            let scores: Vec<u8> = question.options.iter().map(|option| option.score).collect();
            if scores != OPTION_SCORES {
                return Err(CatalogError::MalformedOptions { question: question.id });
            }
        }

        for category in Category::ordered() {
            let found = questions
                .iter()
                .filter(|question| question.category == category)
                .count();
            if found != QUESTIONS_PER_CATEGORY {
                return Err(CatalogError::CategoryCount { category, found });
            }
        }

        Ok(Self { questions })
    }

    /// The built-in fifteen-question bank administered by the wizard.
    pub fn standard() -> Self {
        Self::new(standard_questions()).expect("built-in catalog satisfies shape invariants")
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Pure filter preserving catalog order.
    pub fn questions_for_category(&self, category: Category) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|question| question.category == category)
            .collect()
    }

    pub fn question(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn category_of(&self, id: u32) -> Option<Category> {
        self.question(id).map(|question| question.category)
    }

    pub fn category_question_count(&self, category: Category) -> usize {
        self.questions
            .iter()
            .filter(|question| question.category == category)
            .count()
    }
}

/// Shape violation detected while building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("question id {0} appears more than once")]
    DuplicateId(u32),
    #[error("category {category:?} has {found} questions, expected {QUESTIONS_PER_CATEGORY}")]
    CategoryCount { category: Category, found: usize },
    #[error("question {question} does not offer the standard option scores")]
    MalformedOptions { question: u32 },
}

fn options(texts: [&'static str; 5]) -> Vec<AnswerOption> {
    texts
        .into_iter()
        .zip(OPTION_SCORES)
        .map(|(text, score)| AnswerOption { text, score })
        .collect()
}

fn standard_questions() -> Vec<Question> {
    vec![
        Question {
            id: 1,
            category: Category::Technology,
            text: "How would you rate your organization's cloud infrastructure adoption?",
            options: options([
                "No cloud infrastructure",
                "Basic cloud storage only",
                "Partial cloud adoption",
                "Mostly cloud-based",
                "Fully cloud-native",
            ]),
        },
        Question {
            id: 2,
            category: Category::Technology,
            text: "What is the state of your application modernization efforts?",
            options: options([
                "All legacy applications",
                "Beginning to modernize",
                "Mix of legacy and modern",
                "Mostly modern applications",
                "Fully modernized architecture",
            ]),
        },
        Question {
            id: 3,
            category: Category::Technology,
            text: "How automated are your development and deployment processes?",
            options: options([
                "Manual processes",
                "Basic automation",
                "Partial CI/CD",
                "Advanced CI/CD",
                "Fully automated DevOps",
            ]),
        },
        Question {
            id: 4,
            category: Category::Technology,
            text: "How would you describe your API strategy?",
            options: options([
                "No APIs",
                "Basic internal APIs",
                "Some API integration",
                "API-first approach",
                "Full API ecosystem",
            ]),
        },
        Question {
            id: 5,
            category: Category::Technology,
            text: "What is your approach to infrastructure scalability?",
            options: options([
                "Fixed infrastructure",
                "Manual scaling",
                "Some auto-scaling",
                "Advanced auto-scaling",
                "Serverless architecture",
            ]),
        },
        Question {
            id: 6,
            category: Category::Security,
            text: "How comprehensive is your security testing program?",
            options: options([
                "No security testing",
                "Basic vulnerability scans",
                "Regular penetration testing",
                "Continuous security testing",
                "Full SecOps integration",
            ]),
        },
        Question {
            id: 7,
            category: Category::Security,
            text: "What is your approach to identity and access management?",
            options: options([
                "Basic password protection",
                "Standard authentication",
                "MFA implementation",
                "SSO integration",
                "Zero trust architecture",
            ]),
        },
        Question {
            id: 8,
            category: Category::Security,
            text: "How do you handle data encryption?",
            options: options([
                "No encryption",
                "Basic data encryption",
                "Transport layer security",
                "End-to-end encryption",
                "Full encryption lifecycle",
            ]),
        },
        Question {
            id: 9,
            category: Category::Security,
            text: "What is your incident response capability?",
            options: options([
                "No formal process",
                "Basic incident handling",
                "Documented procedures",
                "Automated detection",
                "Full SOC integration",
            ]),
        },
        Question {
            id: 10,
            category: Category::Security,
            text: "How do you manage compliance requirements?",
            options: options([
                "No compliance program",
                "Basic compliance",
                "Regular audits",
                "Continuous monitoring",
                "Automated compliance",
            ]),
        },
        Question {
            id: 11,
            category: Category::Analytics,
            text: "How would you describe your data analytics capabilities?",
            options: options([
                "No analytics",
                "Basic reporting",
                "Business intelligence",
                "Advanced analytics",
                "AI/ML integration",
            ]),
        },
        Question {
            id: 12,
            category: Category::Analytics,
            text: "What is your approach to data governance?",
            options: options([
                "No governance",
                "Basic policies",
                "Defined standards",
                "Active governance",
                "Automated governance",
            ]),
        },
        Question {
            id: 13,
            category: Category::Analytics,
            text: "How do you handle data integration?",
            options: options([
                "Manual data entry",
                "Basic integration",
                "Multiple data sources",
                "Real-time integration",
                "Full data ecosystem",
            ]),
        },
        Question {
            id: 14,
            category: Category::Analytics,
            text: "What is your data visualization capability?",
            options: options([
                "Basic spreadsheets",
                "Static reports",
                "Interactive dashboards",
                "Advanced visualizations",
                "Real-time analytics",
            ]),
        },
        Question {
            id: 15,
            category: Category::Analytics,
            text: "How do you leverage predictive analytics?",
            options: options([
                "No predictive analytics",
                "Basic forecasting",
                "Statistical modeling",
                "Machine learning",
                "Advanced AI models",
            ]),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_five_questions_per_category() {
        let catalog = QuestionCatalog::standard();
        assert_eq!(catalog.questions().len(), 15);
        for category in Category::ordered() {
            let questions = catalog.questions_for_category(category);
            assert_eq!(questions.len(), QUESTIONS_PER_CATEGORY);
            assert!(questions.iter().all(|q| q.category == category));
        }
    }

    #[test]
    fn lookups_resolve_by_id() {
        let catalog = QuestionCatalog::standard();
        assert_eq!(catalog.category_of(1), Some(Category::Technology));
        assert_eq!(catalog.category_of(10), Some(Category::Security));
        assert_eq!(catalog.category_of(15), Some(Category::Analytics));
        assert_eq!(catalog.category_of(99), None);
        assert!(catalog.question(7).expect("question 7").accepts_score(50));
        assert!(!catalog.question(7).expect("question 7").accepts_score(60));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut questions = standard_questions();
        questions[1].id = 1;
        match QuestionCatalog::new(questions) {
            Err(CatalogError::DuplicateId(1)) => {}
            other => panic!("expected duplicate id error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_short_categories() {
        let mut questions = standard_questions();
        questions.retain(|question| question.id != 15);
        match QuestionCatalog::new(questions) {
            Err(CatalogError::CategoryCount {
                category: Category::Analytics,
                found: 4,
            }) => {}
            other => panic!("expected category count error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_nonstandard_option_scores() {
        let mut questions = standard_questions();
        questions[0].options[2].score = 60;
        match QuestionCatalog::new(questions) {
            Err(CatalogError::MalformedOptions { question: 1 }) => {}
            other => panic!("expected malformed options error, got {other:?}"),
        }
    }
}
