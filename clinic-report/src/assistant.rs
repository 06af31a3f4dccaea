//! Wire types for the question-answering backend.

use clinic_core::{Appointment, DateWindow, ReportConfig, ReportError, ReportPayload};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::build_ai_context;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    pub question: String,
    pub patient_id: Option<String>,
    pub context: String,
}

impl AskRequest {
    pub fn new(
        question: impl Into<String>,
        patient_id: Option<String>,
        context: String,
    ) -> Result<Self, ReportError> {
        let question = question.into().trim().to_string();
        if question.is_empty() {
            return Err(ReportError::MissingData);
        }
        Ok(Self {
            question,
            patient_id,
            context,
        })
    }

    /// Request carrying the context of `report` for the current window.
    pub fn for_report(
        question: impl Into<String>,
        report: &ReportPayload,
        appointments: &[Appointment],
        window: &DateWindow,
        config: &ReportConfig,
    ) -> Result<Self, ReportError> {
        let context = build_ai_context(report, appointments, window, config);
        Self::new(question, report.patient_id.clone(), context)
    }
}

/// Backend reply. Older deployments name the field `response` or `resposta`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AskResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    resposta: Option<String>,
}

impl AskResponse {
    pub fn into_answer(self) -> Result<String, ReportError> {
        self.answer
            .or(self.response)
            .or(self.resposta)
            .ok_or_else(|| ReportError::Assistant("reply carries no answer".to_string()))
    }
}

pub fn parse_answer_str(json: &str) -> Result<String, ReportError> {
    let value: Value =
        serde_json::from_str(json).map_err(|err| ReportError::Parse(err.to_string()))?;
    parse_answer_value(&value)
}

pub fn parse_answer_value(value: &Value) -> Result<String, ReportError> {
    if !value.is_object() {
        return Err(ReportError::Assistant(
            "expected a JSON object reply".to_string(),
        ));
    }
    AskResponse::deserialize(value)
        .map_err(|err| ReportError::Parse(err.to_string()))?
        .into_answer()
}
