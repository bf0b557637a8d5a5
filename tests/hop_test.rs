use chrono::{DateTime, TimeDelta};
use mail_header_analyzer::*;

#[test]
fn test_from_form() {
    let hop = extract_hop(
        "from mail.a.example by mail.b.example with ESMTP id ABC123; Mon, 02 Jan 2006 15:04:05 -0700",
    )
    .unwrap();

    assert!(hop.from.contains("mail.a.example"));
    assert!(hop.by.contains("mail.b.example"));
    assert!(hop.with.contains("ESMTP"));
    assert_eq!(
        hop.time,
        DateTime::parse_from_rfc3339("2006-01-02T15:04:05-07:00").unwrap()
    );
    assert_eq!(hop.delay, TimeDelta::zero());
}

#[test]
fn test_fields_are_kept_raw() {
    let hop = extract_hop(
        "from mail.a.example by mail.b.example with ESMTP id ABC123; Mon, 02 Jan 2006 15:04:05 -0700",
    )
    .unwrap();

    assert_eq!(hop.from, "mail.a.example");
    assert_eq!(hop.by, " mail.b.example ");
    assert_eq!(hop.with, " ESMTP");
}

#[test]
fn test_by_only_form() {
    let hop = extract_hop("by mail.b.example; Mon, 02 Jan 2006 15:04:05 -0700").unwrap();

    assert_eq!(hop.from, "");
    assert!(hop.by.contains("mail.b.example"));
    assert_eq!(hop.with, "");
}

#[test]
fn test_by_only_form_with_protocol() {
    let hop = extract_hop(
        "by 2002:a05:6a10:1234 with SMTP id x1csp123; Mon, 02 Jan 2006 15:04:05 -0800 (PST)",
    )
    .unwrap();

    assert_eq!(hop.from, "");
    assert!(hop.by.contains("2002:a05:6a10:1234"));
    assert!(hop.with.contains("SMTP"));
    assert!(!hop.with.contains("x1csp123"));
}

#[test]
fn test_via_clause() {
    let hop = extract_hop("from web.example by relay.example via HTTP; Mon, 02 Jan 2006 15:04:05 -0700")
        .unwrap();

    assert!(hop.by.contains("relay.example"));
    assert!(hop.with.contains("HTTP"));
}

#[test]
fn test_from_form_without_protocol() {
    let hop = extract_hop("from a.example by b.example id 77; Mon, 02 Jan 2006 15:04:05 -0700")
        .unwrap();

    assert_eq!(hop.from, "a.example");
    assert_eq!(hop.by, " b.example");
    assert_eq!(hop.with, "");
}

#[test]
fn test_from_form_without_id() {
    let hop =
        extract_hop("from a.example by b.example with LMTP; Mon, 02 Jan 2006 15:04:05 -0700").unwrap();

    assert_eq!(hop.by, " b.example ");
    assert_eq!(hop.with, " LMTP");
}

#[test]
fn test_timestamp_after_last_semicolon() {
    let hop = extract_hop(
        "from a.example by b.example with ESMTPS; envelope-from <x@a.example>; Mon, 02 Jan 2006 15:04:05 +0000",
    )
    .unwrap();

    assert!(hop.by.contains("b.example"));
    assert_eq!(
        hop.time,
        DateTime::parse_from_rfc3339("2006-01-02T15:04:05Z").unwrap()
    );
}

#[test]
fn test_unmatched_relay_text_is_soft_miss() {
    let hop = extract_hop("qmail 12345 invoked for bounce; Mon, 02 Jan 2006 15:04:05 -0700").unwrap();

    assert_eq!(hop.from, "");
    assert_eq!(hop.by, "");
    assert_eq!(hop.with, "");
    assert_eq!(
        hop.time,
        DateTime::parse_from_rfc3339("2006-01-02T15:04:05-07:00").unwrap()
    );
}

#[test]
fn test_bad_timestamp_fails() {
    let err = extract_hop("from a.example by b.example; yesterday").unwrap_err();
    assert_eq!(err, ParseError::Date("yesterday".to_string()));
}

#[test]
fn test_missing_semicolon_fails() {
    let err = extract_hop("from a.example by b.example with SMTP").unwrap_err();
    assert!(err.is_date());
}

#[test]
fn test_hop_json_shape() {
    let hop = extract_hop("by mail.b.example; Mon, 02 Jan 2006 15:04:05 -0700").unwrap();
    let json = serde_json::to_value(&hop).unwrap();

    assert_eq!(json["from"], "");
    assert_eq!(json["by"], " mail.b.example");
    assert_eq!(json["with"], "");
    assert_eq!(json["time"], "2006-01-02T15:04:05-07:00");
    assert_eq!(json["delay"], 0);
}

#[test]
fn test_delay_beyond_nanosecond_range_saturates() {
    let hops = mail_header_analyzer::chain::order_hops(vec![
        extract_hop("by late.example; 2200-01-02T15:04:05Z").unwrap(),
        extract_hop("by early.example; 1700-01-02T15:04:05Z").unwrap(),
    ]);
    assert!(hops[1].delay.num_nanoseconds().is_none());

    let json = serde_json::to_value(&hops).unwrap();
    assert_eq!(json[0]["delay"], 0);
    assert_eq!(json[1]["delay"], i64::MAX);
}

#[test]
fn test_negative_delay_saturates() {
    let mut hop = extract_hop("by x.example; 2200-01-02T15:04:05Z").unwrap();
    hop.delay = TimeDelta::days(-200 * 365);

    let json = serde_json::to_value(&hop).unwrap();
    assert_eq!(json["delay"], i64::MIN);
}
