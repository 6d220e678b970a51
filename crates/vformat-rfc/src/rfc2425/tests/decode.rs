//! End-to-end decoding of sample documents.

use super::fixtures::*;
use crate::error::DecodeErrorKind;
use crate::rfc2425::{
    Diagnostic, ParseOptions, Value, ValueType, WhitespacePolicy, Zone, decode, decode_raw,
    parse_structure, registry,
};

#[test_log::test]
fn simple_event_decodes_raw() {
    let calendars = decode_raw(SIMPLE_EVENT, None, None);
    assert_eq!(calendars.len(), 1);

    let calendar = &calendars[0];
    assert_eq!(calendar.name, "VCALENDAR");
    assert_eq!(calendar.version.as_deref(), Some("2.0"));
    assert_eq!(calendar.components.len(), 1);

    let event = calendar.component("VEVENT").unwrap();
    assert_eq!(event.attribute("SUMMARY").unwrap().as_text(), Some("Demo"));
    assert_eq!(
        event.attribute("DTSTART").unwrap().value,
        Value::Raw("20170711T150000".to_string())
    );
    assert_eq!(
        event.attribute("DTEND").unwrap().value,
        Value::Raw("20170711T173000".to_string())
    );
    assert_eq!(event.attribute("STATUS").unwrap().as_text(), Some("REQUEST"));
}

#[test_log::test]
fn simple_event_normalizes() {
    let calendars = decode(SIMPLE_EVENT, None, None);
    let event = calendars[0].component("VEVENT").unwrap();

    assert_eq!(
        event.attribute("SUMMARY").unwrap().value,
        Value::Text("Demo".to_string())
    );
    let start = event.attribute("DTSTART").unwrap().value.as_date_time().unwrap();
    assert_eq!(start.date_time.to_string(), "2017-07-11 15:00:00");
    assert_eq!(start.zone, Zone::Floating);
    assert!(calendars[0].is_valid());
}

#[test_log::test]
fn exchange_invite() {
    let calendars = decode(EXCHANGE_INVITE, None, None);
    assert_eq!(calendars.len(), 1);

    let calendar = &calendars[0];
    assert_eq!(calendar.version.as_deref(), Some("2.0"));
    assert!(calendar.is_valid());
    assert!(calendar.ensure_valid().is_ok());

    let names: Vec<_> = calendar.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["VTIMEZONE", "VEVENT"]);

    let timezone = calendar.component("VTIMEZONE").unwrap();
    let nested: Vec<_> = timezone.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(nested, vec!["STANDARD", "DAYLIGHT"]);
    assert_eq!(timezone.components[0].version.as_deref(), Some("2.0"));

    let event = calendar.component("VEVENT").unwrap();
    let attendees = event.attributes_named("ATTENDEE");
    assert_eq!(attendees.len(), 5);
    assert_eq!(attendees[0].param("CN"), Some("JaneRoe"));
    assert_eq!(attendees[1].param("CN"), Some("ab@example.org"));
    assert_eq!(attendees[0].as_text(), Some("MAILTO:jane.roe@example.org"));

    let uid = event.attribute("UID").unwrap().as_text().unwrap();
    assert_eq!(uid.len(), 112);
    assert!(uid.ends_with("000010000000BFC5EC344F3C644EB7D547C356EA6766"));

    let start = event.attribute("DTSTART").unwrap();
    assert_eq!(
        start.param("TZID"),
        Some("(UTC-05:00)EasternTime(US&Canada)")
    );
    assert_eq!(
        start.naive_date_time().unwrap().to_string(),
        "2017-07-11 15:00:00"
    );

    let stamp = event.attribute("DTSTAMP").unwrap().value.as_date_time().unwrap();
    assert_eq!(stamp.zone, Zone::Utc);
    assert_eq!(event.attribute("PRIORITY").unwrap().as_integer(), Some(1));
    assert_eq!(
        event.attribute("DESCRIPTION").unwrap().value,
        Value::Text("\n".to_string())
    );
}

#[test_log::test]
fn exchange_invite_keeps_spaces_when_folding_only() {
    let options = ParseOptions {
        whitespace: WhitespacePolicy::FoldOnly,
        ..ParseOptions::default()
    };
    let calendars = registry().decode_with(EXCHANGE_INVITE, &options, None, None);
    let event = calendars[0].component("VEVENT").unwrap();

    assert_eq!(
        event.attribute("SUMMARY").unwrap().as_text(),
        Some("Mid July Design Demo")
    );
    assert_eq!(
        event.attributes_named("ATTENDEE")[0].param("CN"),
        Some("Jane Roe")
    );
    assert_eq!(
        event.attribute("ORGANIZER").unwrap().param("CN"),
        Some("John Doe")
    );
}

#[test_log::test]
fn attendee_parameters() {
    let input = "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\n\
                 ATTENDEE;ROLE=REQ-PARTICIPANT;RSVP=TRUE;CN=Name:MAILTO:x@example.com\r\n\
                 END:VEVENT\r\nEND:VCALENDAR\r\n";
    let calendars = decode_raw(input, None, None);
    let attendee = calendars[0]
        .component("VEVENT")
        .unwrap()
        .attribute("ATTENDEE")
        .unwrap();

    let names: Vec<_> = attendee.params.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["CN", "ROLE", "RSVP"]);
    assert_eq!(attendee.param("ROLE"), Some("REQ-PARTICIPANT"));
    assert_eq!(attendee.param("RSVP"), Some("TRUE"));
    assert_eq!(attendee.param("CN"), Some("Name"));
    assert_eq!(attendee.as_text(), Some("MAILTO:x@example.com"));
}

#[test_log::test]
fn vcard_21() {
    let cards = decode(VCARD_21, None, None);
    let card = &cards[0];

    assert_eq!(card.version.as_deref(), Some("2.1"));
    assert!(card.is_valid(), "{:?}", card.invalid_attributes);

    let tel = card.attribute("TEL").unwrap();
    assert_eq!(tel.group.as_deref(), Some("item1"));
    assert!(tel.params.has_value("TYPE", "voice"));

    let note = card.attribute("NOTE").unwrap();
    assert_eq!(note.value, Value::Text("Café=bar".to_string()));
    assert!(note.params.is_empty());

    assert!(card.attribute("BDAY").unwrap().value.as_date().is_some());
    assert_eq!(
        card.attribute("N").unwrap().value,
        Value::Raw("Roe;Jane".to_string())
    );

    let photo = card.attribute("PHOTO").unwrap();
    assert_eq!(
        photo.value.as_binary(),
        Some(b"GIF89a\x01\x00\x01\x00".as_slice())
    );
    assert_eq!(photo.param("TYPE"), Some("GIF"));
}

#[test_log::test]
fn vcard_30() {
    let cards = decode(VCARD_30, None, None);
    let card = &cards[0];

    assert_eq!(card.version.as_deref(), Some("3.0"));
    assert_eq!(
        card.attribute("NOTE").unwrap().value,
        Value::Text("Line1\nLine2,done".to_string())
    );
    assert_eq!(
        card.attribute("NICKNAME").unwrap().value,
        Value::Raw("JR,Janie".to_string())
    );
    assert_eq!(
        card.attribute("PHOTO").unwrap().value,
        Value::Url("http://example.com/jane.jpg".to_string())
    );
    let rev = card.attribute("REV").unwrap().value.as_date_time().unwrap();
    assert_eq!(rev.zone, Zone::Utc);
}

#[test_log::test]
fn vcalendar_10() {
    let calendars = decode(VCALENDAR_10, None, None);
    let todo = calendars[0].component("VTODO").unwrap();

    assert_eq!(todo.version.as_deref(), Some("1.0"));
    let due = todo.attribute("DUE").unwrap();
    assert_eq!(due.default_value_type, ValueType::DateTime);
    assert_eq!(due.value.as_date_time().unwrap().zone, Zone::Utc);
    assert_eq!(todo.attribute("PRIORITY").unwrap().as_integer(), Some(2));
    assert_eq!(
        todo.attribute("AALARM").unwrap().value,
        Value::Raw("20170801T110000;;;".to_string())
    );
}

#[test_log::test]
fn calendar_absent_payload() {
    assert!(decode_raw(NO_CALENDAR, None, None).is_empty());
    assert!(decode(NO_CALENDAR, None, None).is_empty());
    assert!(decode("", None, None).is_empty());
}

#[test_log::test]
fn decoding_is_idempotent() {
    assert_eq!(
        decode(EXCHANGE_INVITE, None, None),
        decode(EXCHANGE_INVITE, None, None)
    );

    let mut once = decode(VCARD_21, None, None);
    let twice = once.clone();
    for card in &mut once {
        card.normalize_attributes();
    }
    assert_eq!(once, twice);
}

#[test_log::test]
fn folded_line_matches_unfolded() {
    let folded = "BEGIN:VCARD\r\nVERSION:3.0\r\nEMAIL:jane.roe@ex\r\n ample.org\r\nEND:VCARD\r\n";
    let unfolded = "BEGIN:VCARD\r\nVERSION:3.0\r\nEMAIL:jane.roe@example.org\r\nEND:VCARD\r\n";

    assert_eq!(decode(folded, None, None), decode(unfolded, None, None));
}

#[test_log::test]
fn nesting_mirrors_begin_end() {
    let input = "BEGIN:VCALENDAR\r\nBEGIN:VEVENT\r\nBEGIN:VALARM\r\nACTION:DISPLAY\r\nEND:VALARM\r\n\
                 END:VEVENT\r\nBEGIN:VTODO\r\nEND:VTODO\r\nBEGIN:VEVENT\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
    let calendars = decode_raw(input, None, None);

    let names: Vec<_> = calendars[0]
        .components
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["VEVENT", "VTODO", "VEVENT"]);
    assert_eq!(calendars[0].components[0].components[0].name, "VALARM");
}

#[test_log::test]
fn stray_end_does_not_stop_decoding() {
    let input = "BEGIN:VCALENDAR\r\nEND:VTODO\r\nBEGIN:VEVENT\r\nSUMMARY:Demo\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";

    let parsed = parse_structure(input);
    assert!(matches!(parsed.diagnostics[0], Diagnostic::StrayEnd { line: 2, .. }));

    let calendars = decode_raw(input, None, None);
    let event = calendars[0].component("VEVENT").unwrap();
    assert_eq!(event.attribute("SUMMARY").unwrap().as_text(), Some("Demo"));
}

#[test_log::test]
fn version_fallback() {
    // No VERSION and no override: default decoder, tagged with its version.
    let cards = decode_raw("BEGIN:VCARD\r\nNICKNAME:x\r\nEND:VCARD\r\n", None, None);
    assert_eq!(cards[0].version.as_deref(), Some("3.0"));
    assert_eq!(
        cards[0].attribute("NICKNAME").unwrap().default_value_type,
        ValueType::Raw
    );

    // Override stands in for the missing VERSION line.
    let cards = decode_raw("BEGIN:VCARD\r\nNICKNAME:x\r\nEND:VCARD\r\n", Some("2.1"), None);
    assert_eq!(cards[0].version.as_deref(), Some("2.1"));
    assert_eq!(
        cards[0].attribute("NICKNAME").unwrap().default_value_type,
        ValueType::Text
    );

    // A VERSION line wins over the override.
    let cards = decode_raw(VCARD_30, Some("2.1"), None);
    assert_eq!(cards[0].version.as_deref(), Some("3.0"));

    // Unknown version: default decoder, the node keeps its own version.
    let cards = decode_raw("BEGIN:VCARD\r\nVERSION:4.0\r\nNICKNAME:x\r\nEND:VCARD\r\n", None, None);
    assert_eq!(cards[0].version.as_deref(), Some("4.0"));
    assert_eq!(
        cards[0].attribute("NICKNAME").unwrap().default_value_type,
        ValueType::Raw
    );

    // Unknown component: generic decoder.
    let notes = decode_raw("BEGIN:VNOTE\r\nVERSION:1.1\r\nBODY:x\r\nEND:VNOTE\r\n", None, None);
    assert_eq!(notes[0].version.as_deref(), Some("1.1"));
    assert_eq!(
        notes[0].attribute("BODY").unwrap().default_value_type,
        ValueType::Raw
    );
}

#[test_log::test]
fn explicit_decoder_wins() {
    let v21 = registry().decoder("VCARD", Some("2.1")).unwrap();
    let cards = decode_raw(VCARD_30, None, Some(v21));

    assert_eq!(cards[0].version.as_deref(), Some("3.0"));
    assert_eq!(
        cards[0].attribute("NICKNAME").unwrap().default_value_type,
        ValueType::Text
    );
}

#[test_log::test]
fn root_attributes_are_dropped() {
    let input = "X-STRAY:1\r\nBEGIN:VCARD\r\nFN:x\r\nEND:VCARD\r\nX-AFTER:2\r\n";
    let cards = decode_raw(input, None, None);

    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].attributes.len(), 1);
}

#[test_log::test]
fn invalid_lines_are_recorded() {
    let input = "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:x\r\nnot a content line\r\nEND:VCARD\r\n";
    let cards = decode(input, None, None);

    assert_eq!(cards[0].invalid_lines.len(), 1);
    assert_eq!(cards[0].invalid_lines[0].line, 4);
    assert_eq!(cards[0].invalid_lines[0].text, "notacontentline");
    assert!(cards[0].ensure_valid().is_err());
}

#[test_log::test]
fn invalid_values_are_recorded() {
    let input = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nBEGIN:VEVENT\r\nDTSTART:20170231T100000\r\n\
                 SEQUENCE:one\r\nSUMMARY:ok\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
    let calendars = decode(input, None, None);
    let event = calendars[0].component("VEVENT").unwrap();

    let kinds: Vec<_> = event
        .invalid_attributes
        .iter()
        .map(|a| a.error.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![DecodeErrorKind::InvalidDateTime, DecodeErrorKind::InvalidInteger]
    );
    assert_eq!(event.attributes.len(), 1);
    assert!(!calendars[0].is_valid());
}

#[test_log::test]
fn depth_guard() {
    let mut input = String::new();
    for _ in 0..100 {
        input.push_str("BEGIN:X-NEST\r\n");
    }
    input.push_str("X-LEAF:1\r\n");
    for _ in 0..100 {
        input.push_str("END:X-NEST\r\n");
    }

    let parsed = parse_structure(&input);
    let guarded = parsed
        .diagnostics
        .iter()
        .filter(|d| matches!(d, Diagnostic::DepthLimitExceeded { .. }))
        .count();
    assert_eq!(guarded, 36);
    assert_eq!(parsed.diagnostics.len(), 36);

    let mut depth = 0;
    let mut node = parsed.root.components().next();
    while let Some(current) = node {
        depth += 1;
        node = current.components().next();
    }
    assert_eq!(depth, 64);

    let components = decode(&input, None, None);
    assert_eq!(components.len(), 1);
}

#[test_log::test]
fn serializes_to_json() {
    let calendars = decode(SIMPLE_EVENT, None, None);
    let json = serde_json::to_value(&calendars[0]).unwrap();

    assert_eq!(json["name"], "VCALENDAR");
    assert_eq!(json["components"][0]["attributes"][0]["name"], "SUMMARY");
    assert_eq!(
        json["components"][0]["attributes"][0]["value"]["type"],
        "text"
    );
}
