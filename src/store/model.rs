use serde::{Deserialize, Serialize};

/// One interview question, as stored in the `questions` collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Document id
    #[serde(rename = "_id")]
    pub id: String,

    /// Category this question belongs to
    #[serde(rename = "categoryId")]
    pub category_id: String,

    /// The question text shown to the candidate
    #[serde(rename = "question")]
    pub text: String,
}

/// Category reference document from `questions-categories`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionCategory {
    #[serde(rename = "_id")]
    pub id: String,

    /// Display label (e.g. "Teamwork")
    pub label: String,

    /// Machine value (e.g. "teamwork")
    pub value: String,

    #[serde(rename = "categoryId")]
    pub category_id: String,
}
