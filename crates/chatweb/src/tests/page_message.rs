use crate::PageMessage;

/// WHAT: Notification messages carry title and URL
/// WHY: Keyword filters match against both
#[test]
fn given_notification_body_when_parsing_then_fields_kept() {
    // Given
    let raw = r#"{"type":"notification","title":"New message","url":"https://chat.example.com/c/1"}"#;

    // When
    let message = PageMessage::parse(raw);

    // Then
    assert_eq!(
        message,
        Some(PageMessage::Notification {
            title: "New message".to_string(),
            url: "https://chat.example.com/c/1".to_string(),
        })
    );
}

/// WHAT: A notification without a title still parses
/// WHY: Pages may construct `new Notification()` with odd arguments
#[test]
fn given_notification_without_title_when_parsing_then_defaults_empty() {
    let message = PageMessage::parse(r#"{"type":"notification"}"#);

    assert_eq!(
        message,
        Some(PageMessage::Notification {
            title: String::new(),
            url: String::new(),
        })
    );
}

/// WHAT: Placeholder buttons map to their actions
#[test]
fn given_placeholder_actions_when_parsing_then_recognized() {
    assert_eq!(
        PageMessage::parse(r#"{"type":"openConfig"}"#),
        Some(PageMessage::OpenConfig)
    );
    assert_eq!(
        PageMessage::parse(r#"{"type":"clearConfig"}"#),
        Some(PageMessage::ClearConfig)
    );
}

/// WHAT: Unknown or malformed bodies are dropped
/// WHY: Any script on a remote page can post to the bridge
#[test]
fn given_garbage_when_parsing_then_none() {
    assert_eq!(PageMessage::parse("not json"), None);
    assert_eq!(PageMessage::parse(r#"{"type":"deleteEverything"}"#), None);
    assert_eq!(PageMessage::parse(r#"{"title":"no type"}"#), None);
}
