use relayline::core::OutboundCommand;
use relayline::core::commands::InboundFrame;
use serde_json::json;

fn to_value(command: &OutboundCommand) -> serde_json::Value {
    serde_json::from_str(&command.to_line().unwrap()).unwrap()
}

#[test]
fn test_send_message_wire_shape() {
    let command =
        OutboundCommand::send_message(vec!["+31638555555".to_string()], "hello there");
    assert_eq!(
        to_value(&command),
        json!({"sendMessage": {"contacts": ["+31638555555"], "message": "hello there"}})
    );
}

#[test]
fn test_send_message_includes_groups_when_present() {
    let command = OutboundCommand::SendMessage(relayline::core::commands::SendMessage {
        contacts: vec!["+1".to_string()],
        groups: vec!["Y5555rtl2p/TnLYvY555dA==".to_string()],
        message: "group broadcast".to_string(),
    });
    assert_eq!(
        to_value(&command),
        json!({"sendMessage": {
            "contacts": ["+1"],
            "groups": ["Y5555rtl2p/TnLYvY555dA=="],
            "message": "group broadcast"
        }})
    );
}

#[test]
fn test_trust_and_end_session_wire_shapes() {
    assert_eq!(
        to_value(&OutboundCommand::trust(vec!["+1".to_string()])),
        json!({"trust": {"contacts": ["+1"]}})
    );
    assert_eq!(
        to_value(&OutboundCommand::end_session(vec!["+1".to_string()])),
        json!({"endSession": {"contacts": ["+1"]}})
    );
}

#[test]
fn test_parameterless_queries_carry_empty_string_payload() {
    assert_eq!(
        to_value(&OutboundCommand::get_contacts()),
        json!({"getContacts": ""})
    );
    assert_eq!(
        to_value(&OutboundCommand::get_groups()),
        json!({"getGroups": ""})
    );
}

#[test]
fn test_to_line_is_single_line() {
    let command = OutboundCommand::send_message(vec!["+1".to_string()], "multi\nword");
    let line = command.to_line().unwrap();
    assert!(!line.contains('\n'));
}

#[test]
fn test_inbound_text_message_extraction() {
    let frame: InboundFrame = serde_json::from_str(
        r#"{"envelope":{"source":"+1555","dataMessage":{"message":"hey"}}}"#,
    )
    .unwrap();
    assert_eq!(frame.text_message(), Some(("+1555", "hey")));
}

#[test]
fn test_inbound_missing_paths_yield_none() {
    let receipt: InboundFrame = serde_json::from_str(
        r#"{"envelope":{"source":"+1555","receiptMessage":{"isDelivery":true}}}"#,
    )
    .unwrap();
    assert_eq!(receipt.text_message(), None);

    let empty: InboundFrame = serde_json::from_str("{}").unwrap();
    assert_eq!(empty.text_message(), None);
}
