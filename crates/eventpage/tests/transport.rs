/// Fire-and-forget hand-off: outcomes never touch the committed view state
use async_trait::async_trait;
use eventpage::validation::rules;
use eventpage::{
    hand_off, FormController, FormSnapshot, RegistrationAck, SubmitOutcome, Transport,
    TransportError, ViewState,
};
use futures::executor::block_on;
use std::cell::RefCell;

#[derive(Default)]
struct RecordingTransport {
    sent: RefCell<Vec<String>>,
    fail_with: Option<u16>,
}

#[async_trait(?Send)]
impl Transport for RecordingTransport {
    async fn submit(&self, snapshot: &FormSnapshot) -> Result<RegistrationAck, TransportError> {
        let body = snapshot
            .to_json()
            .map_err(|e| TransportError::Serialize(e.to_string()))?;
        self.sent.borrow_mut().push(body);

        match self.fail_with {
            Some(status) => Err(TransportError::Rejected { status }),
            None => Ok(serde_json::from_str(r#"{"success":true,"id":42}"#)
                .map_err(|e| TransportError::Decode(e.to_string()))?),
        }
    }
}

fn submitted_form() -> (FormController, FormSnapshot) {
    let mut form = FormController::registration();
    for (field, value) in [
        (rules::FIRST_NAME, "Ada"),
        (rules::LAST_NAME, "Lovelace"),
        (rules::EMAIL, "a@b.co"),
        (rules::PHONE, "1234567890"),
        (rules::COLLEGE, "KCL"),
        (rules::DEPARTMENT, "Maths"),
        (rules::YEAR, "1"),
        (rules::DAYS, "day1"),
    ] {
        form.set_value(field, value);
    }
    form.set_terms(true);

    match form.submit() {
        SubmitOutcome::Submitted(snapshot) => (form, snapshot),
        other => panic!("expected submission, got {:?}", other),
    }
}

#[test]
fn test_ack_is_parsed() {
    let (form, snapshot) = submitted_form();
    let transport = RecordingTransport::default();

    let ack = block_on(hand_off(&transport, &snapshot)).unwrap();

    assert_eq!(ack.success, Some(true));
    assert_eq!(ack.extra.get("id"), Some(&serde_json::json!(42)));
    assert_eq!(form.view_state(), ViewState::Submitted);

    let sent = transport.sent.borrow();
    assert_eq!(sent.len(), 1);
    let body: serde_json::Value = serde_json::from_str(&sent[0]).unwrap();
    assert_eq!(body["email"], "a@b.co");
    assert_eq!(body["terms"], true);
    assert!(body.get("valid").is_none());
}

#[test]
fn test_failure_keeps_submitted_state() {
    let (form, snapshot) = submitted_form();
    let transport = RecordingTransport {
        fail_with: Some(503),
        ..Default::default()
    };

    let err = block_on(hand_off(&transport, &snapshot)).unwrap_err();

    assert!(matches!(err, TransportError::Rejected { status: 503 }));
    assert_eq!(
        err.to_string(),
        "Server rejected registration with status 503"
    );
    assert_eq!(form.view_state(), ViewState::Submitted);
}
