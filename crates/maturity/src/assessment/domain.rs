use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier wrapper for the signed-in user owning a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    /// The identity collaborator is external; the core only requires a
    /// non-blank signal before allowing assessment entry.
    pub fn is_signed_in(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

/// Question grouping; each category carries five questions and one averaged sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Technology,
    Security,
    Analytics,
}

impl Category {
    pub const fn ordered() -> [Self; 3] {
        [Self::Technology, Self::Security, Self::Analytics]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Technology => "Technology",
            Self::Security => "Security",
            Self::Analytics => "Analytics",
        }
    }
}

/// One stage of the five-stage linear assessment wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    CompanyProfile,
    Technology,
    Security,
    Analytics,
    Review,
}

impl Step {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::CompanyProfile,
            Self::Technology,
            Self::Security,
            Self::Analytics,
            Self::Review,
        ]
    }

    /// 1-based position shown in the progress header.
    pub const fn number(self) -> u8 {
        match self {
            Self::CompanyProfile => 1,
            Self::Technology => 2,
            Self::Security => 3,
            Self::Analytics => 4,
            Self::Review => 5,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::CompanyProfile => "Company Information",
            Self::Technology => "Technology Infrastructure",
            Self::Security => "Security & Compliance",
            Self::Analytics => "Data & Analytics",
            Self::Review => "Review & Submit",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::CompanyProfile => "Tell us about your organization",
            Self::Technology => "Evaluate your current technology stack",
            Self::Security => "Assess your security measures",
            Self::Analytics => "Review your data capabilities",
            Self::Review => "Review your answers and submit",
        }
    }

    /// The question category answered on this step, when it has one.
    pub const fn category(self) -> Option<Category> {
        match self {
            Self::Technology => Some(Category::Technology),
            Self::Security => Some(Category::Security),
            Self::Analytics => Some(Category::Analytics),
            Self::CompanyProfile | Self::Review => None,
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::CompanyProfile => Some(Self::Technology),
            Self::Technology => Some(Self::Security),
            Self::Security => Some(Self::Analytics),
            Self::Analytics => Some(Self::Review),
            Self::Review => None,
        }
    }

    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::CompanyProfile => None,
            Self::Technology => Some(Self::CompanyProfile),
            Self::Security => Some(Self::Technology),
            Self::Analytics => Some(Self::Security),
            Self::Review => Some(Self::Analytics),
        }
    }
}

/// Fixed set of industries offered on the profile step.
pub const INDUSTRIES: [&str; 7] = [
    "Technology",
    "Healthcare",
    "Finance",
    "Manufacturing",
    "Retail",
    "Education",
    "Other",
];

/// Fixed employee-count buckets offered on the profile step.
pub const EMPLOYEE_RANGES: [&str; 6] = ["1-10", "11-50", "51-200", "201-500", "501-1000", "1000+"];

/// One of the three profile inputs mutated field-by-field on step 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    Industry,
    ReportName,
    EmployeeCount,
}

/// Organization metadata collected before the question steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub industry: Option<String>,
    pub report_name: Option<String>,
    pub employee_count: Option<String>,
}

impl CompanyProfile {
    /// Set a single field, enforcing the fixed enumerations for industry and
    /// employee count and a non-empty report name.
    pub fn set(&mut self, field: ProfileField, value: &str) -> Result<(), ProfileError> {
        let value = value.trim();
        match field {
            ProfileField::Industry => {
                if !INDUSTRIES.contains(&value) {
                    return Err(ProfileError::UnknownIndustry(value.to_string()));
                }
                self.industry = Some(value.to_string());
            }
            ProfileField::ReportName => {
                if value.is_empty() {
                    return Err(ProfileError::EmptyReportName);
                }
                self.report_name = Some(value.to_string());
            }
            ProfileField::EmployeeCount => {
                if !EMPLOYEE_RANGES.contains(&value) {
                    return Err(ProfileError::UnknownEmployeeRange(value.to_string()));
                }
                self.employee_count = Some(value.to_string());
            }
        }
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.industry.is_some() && self.report_name.is_some() && self.employee_count.is_some()
    }
}

/// Profile input rejected against the fixed enumerations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("'{0}' is not one of the offered industries")]
    UnknownIndustry(String),
    #[error("report name must not be empty")]
    EmptyReportName,
    #[error("'{0}' is not one of the offered employee ranges")]
    UnknownEmployeeRange(String),
}

/// In-memory mapping from question id to the selected option score.
///
/// Keys are upserted one at a time as the user answers and never removed
/// during a session. Construction of arbitrary contents is allowed so the
/// scoring engine can be exercised against stale or partial stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerStore {
    values: BTreeMap<u32, u8>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditional upsert; overwriting replaces the prior value.
    pub fn insert(&mut self, question_id: u32, score: u8) {
        self.values.insert(question_id, score);
    }

    pub fn get(&self, question_id: u32) -> Option<u8> {
        self.values.get(&question_id).copied()
    }

    pub fn contains(&self, question_id: u32) -> bool {
        self.values.contains_key(&question_id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u8)> + '_ {
        self.values.iter().map(|(id, score)| (*id, *score))
    }
}
