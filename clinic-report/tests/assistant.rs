mod common;

use clinic_core::{ReportConfig, ReportError};
use clinic_report::{parse_answer_str, AskRequest};
use common::{appointments, february, patient_report};

#[test]
fn request_serializes_with_camel_case_fields() {
    let request = AskRequest::new("Como está a adesão?", Some("p-17".to_string()), "ctx".into())
        .expect("question is present");
    let json = serde_json::to_value(&request).unwrap();

    assert_eq!(json["question"], "Como está a adesão?");
    assert_eq!(json["patientId"], "p-17");
    assert_eq!(json["context"], "ctx");
}

#[test]
fn blank_question_is_rejected() {
    let err = AskRequest::new("   ", None, String::new()).unwrap_err();
    assert!(matches!(err, ReportError::MissingData));
}

#[test]
fn request_for_report_carries_patient_and_context() {
    let request = AskRequest::for_report(
        "Resuma o mês",
        &patient_report(),
        &appointments(),
        &february(),
        &ReportConfig::default(),
    )
    .unwrap();

    assert_eq!(request.patient_id.as_deref(), Some("p-17"));
    assert!(request.context.contains("## Indicadores globais"));
    assert!(request.context.contains("Adesao: 92.5%"));
}

#[test]
fn answer_field_and_fallbacks() {
    assert_eq!(parse_answer_str(r#"{"answer": "ok"}"#).unwrap(), "ok");
    assert_eq!(parse_answer_str(r#"{"response": "alt"}"#).unwrap(), "alt");
    assert_eq!(parse_answer_str(r#"{"resposta": "pt"}"#).unwrap(), "pt");
}

#[test]
fn reply_without_answer_is_an_error() {
    assert!(matches!(
        parse_answer_str(r#"{"status": "ok"}"#),
        Err(ReportError::Assistant(_))
    ));
    assert!(matches!(parse_answer_str("not json"), Err(ReportError::Parse(_))));
}
