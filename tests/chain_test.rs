use chrono::TimeDelta;
use mail_header_analyzer::chain::{order_hops, total_transit};
use mail_header_analyzer::*;

fn hop(by: &str, stamp: &str) -> Hop {
    extract_hop(&format!("by {by}; {stamp}")).unwrap()
}

#[test]
fn test_orders_by_time_and_computes_delays() {
    // Header order: newest first
    let hops = order_hops(vec![
        hop("c.example", "Mon, 02 Jan 2006 15:05:00 -0700"),
        hop("b.example", "Mon, 02 Jan 2006 15:04:10 -0700"),
        hop("a.example", "Mon, 02 Jan 2006 15:04:05 -0700"),
    ]);

    assert_eq!(hops.len(), 3);
    assert!(hops[0].by.contains("a.example"));
    assert!(hops[1].by.contains("b.example"));
    assert!(hops[2].by.contains("c.example"));

    assert_eq!(hops[0].delay, TimeDelta::zero());
    assert_eq!(hops[1].delay, TimeDelta::seconds(5));
    assert_eq!(hops[2].delay, TimeDelta::seconds(50));
}

#[test]
fn test_delays_match_time_differences() {
    let hops = order_hops(vec![
        hop("x.example", "2006-01-02T15:04:05.250Z"),
        hop("y.example", "Mon, 02 Jan 2006 16:04:05 +0100"),
        hop("z.example", "Mon, 02 Jan 2006 08:00:00 -0700"),
    ]);

    assert!(hops.windows(2).all(|pair| pair[0].time <= pair[1].time));
    assert_eq!(hops[0].delay, TimeDelta::zero());
    for i in 1..hops.len() {
        assert_eq!(hops[i].delay, hops[i].time - hops[i - 1].time);
    }
    assert_eq!(hops[2].delay, TimeDelta::milliseconds(250));
}

#[test]
fn test_offsets_compare_as_instants() {
    let hops = order_hops(vec![
        hop("later.example", "Mon, 02 Jan 2006 15:00:00 -0700"),
        hop("earlier.example", "Mon, 02 Jan 2006 22:00:00 +0100"),
    ]);

    assert!(hops[0].by.contains("earlier.example"));
    assert_eq!(hops[1].delay, TimeDelta::hours(1));
}

#[test]
fn test_single_hop() {
    let hops = order_hops(vec![hop("only.example", "Mon, 02 Jan 2006 15:04:05 -0700")]);

    assert_eq!(hops.len(), 1);
    assert_eq!(hops[0].delay, TimeDelta::zero());
}

#[test]
fn test_equal_timestamps_keep_extraction_order() {
    let stamp = "Mon, 02 Jan 2006 15:04:05 -0700";
    let input = vec![
        hop("first.example", stamp),
        hop("second.example", stamp),
        hop("third.example", stamp),
    ];

    let once = order_hops(input.clone());
    let twice = order_hops(input);

    assert_eq!(once, twice);
    assert!(once[0].by.contains("first.example"));
    assert!(once[1].by.contains("second.example"));
    assert!(once[2].by.contains("third.example"));
    assert!(once.iter().all(|h| h.delay == TimeDelta::zero()));
}

#[test]
fn test_empty_chain() {
    assert!(order_hops(Vec::new()).is_empty());
    assert_eq!(total_transit(&[]), TimeDelta::zero());
}

#[test]
fn test_total_transit() {
    let hops = order_hops(vec![
        hop("b.example", "Mon, 02 Jan 2006 15:06:05 -0700"),
        hop("a.example", "Mon, 02 Jan 2006 15:04:05 -0700"),
    ]);

    assert_eq!(total_transit(&hops), TimeDelta::minutes(2));
}
