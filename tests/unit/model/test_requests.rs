use assert_json_diff::assert_json_eq;
use notedx_client::error::AppError;
use notedx_client::model::requests::{
    AccountUpdate, CreateAccountRequest, NoteRequest, RegenerateRequest,
};
use notedx_client::presentation::note::{
    DocumentationStyle, Language, RecordingType, Template, VisitType,
};
use serde_json::json;

#[test]
fn test_note_request_serializes_wire_values() {
    let request = NoteRequest::new(Template::PrimaryCare)
        .with_visit_type(VisitType::FollowUp)
        .with_recording_type(RecordingType::Conversation)
        .with_patient_consent(true)
        .with_lang(Language::Fr)
        .with_documentation_style(DocumentationStyle::ProblemBased);

    assert!(request.validate().is_ok());
    assert_json_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "template": "primaryCare",
            "visit_type": "followUp",
            "recording_type": "conversation",
            "patient_consent": true,
            "lang": "fr",
            "documentation_style": "problemBased"
        })
    );
}

#[test]
fn test_note_request_reports_first_missing_field() {
    let err = NoteRequest::default().validate().unwrap_err();
    assert!(matches!(err, AppError::MissingField(ref m) if m.ends_with("template")));

    let err = NoteRequest::new(Template::Er)
        .with_visit_type(VisitType::InitialEncounter)
        .validate()
        .unwrap_err();
    assert!(matches!(err, AppError::MissingField(ref m) if m.ends_with("recording_type")));
}

#[test]
fn test_regenerate_request_omits_unset_fields() {
    let request = RegenerateRequest::default().with_template(Template::Letter);
    assert_json_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({ "template": "letter" })
    );
}

#[test]
fn test_account_update_validation() {
    assert!(AccountUpdate::default().is_empty());
    assert!(matches!(
        AccountUpdate::default().validate(),
        Err(AppError::InvalidField { .. })
    ));
    assert!(
        AccountUpdate::default()
            .with_contact_email("not-an-email")
            .validate()
            .is_err()
    );
    assert!(
        AccountUpdate::default()
            .with_company_name("Clinique Santé")
            .validate()
            .is_ok()
    );
}

#[test]
fn test_create_account_request_validation() {
    let ok = CreateAccountRequest::new("doctor@clinic.com", "s3cret!", "Clinic");
    assert!(ok.validate().is_ok());

    let err = CreateAccountRequest::new("doctor@clinic.com", "", "Clinic")
        .validate()
        .unwrap_err();
    assert!(matches!(err, AppError::MissingField(ref m) if m.ends_with("password")));

    let err = CreateAccountRequest::new("doctor@clinic.com", "pw", "  ")
        .validate()
        .unwrap_err();
    assert!(matches!(err, AppError::MissingField(ref m) if m.ends_with("company_name")));

    let err = CreateAccountRequest::new("doctor", "pw", "Clinic")
        .validate()
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidField { ref field, .. } if field == "email"));
}
