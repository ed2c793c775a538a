#![allow(clippy::panic_in_result_fn)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::indexing_slicing)]

use evtree::{build, Config, ErrorKind, Event};

fn nested(depth: usize) -> Vec<Event> {
    let mut events: Vec<Event> = (0..depth).map(|i| Event::open(format!("n{i}"))).collect();
    events.extend((0..depth).rev().map(|i| Event::close(format!("n{i}"))));
    events
}

#[test]
fn test_default_config_accepts_any_depth() {
    let depth = 5_000;
    let forest = build(&nested(depth), Config::default()).unwrap();
    assert_eq!(forest.depth(), depth);

    let strict = build(&nested(depth), Config::default().with_strict(true)).unwrap();
    assert_eq!(strict.element_count(), forest.element_count());
}

#[test]
fn test_explicit_depth_limit() {
    let limit: u16 = 256;
    let depth = usize::from(limit);
    assert!(build(&nested(depth), Config::new(limit)).is_ok());

    let result = build(&nested(depth + 1), Config::new(limit));
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(matches!(
            e.kind(),
            ErrorKind::MaxDepthExceeded { max } if *max == limit
        ));
        assert_eq!(e.position(), Some(depth));
        assert!(e.path().unwrap().ends_with(&format!("/n{depth}")));
    }
}

#[test]
fn test_depth_limit_applies_in_lenient_mode() {
    // lenient recovery never hides a depth violation
    let mut events = nested(4);
    events.truncate(4);
    let result = build(&events, Config::new(3));
    assert!(matches!(
        result.map_err(|e| e.kind().clone()),
        Err(ErrorKind::MaxDepthExceeded { max: 3 })
    ));
}

#[test]
fn test_complete_events_do_not_count_as_nesting() {
    let events = [
        Event::open("a"),
        Event::complete("b"),
        Event::complete("b"),
        Event::close("a"),
    ];
    assert!(build(&events, Config::new(1)).is_ok());
}

#[test]
fn test_many_siblings() {
    let width = 100_000;
    let events: Vec<Event> = (0..width)
        .map(|i| Event::complete("item").with_attribute("i", i.to_string()))
        .collect();

    let forest = build(&events, Config::default()).unwrap();
    assert_eq!(forest.len(), width);
    assert_eq!(forest.group("item").unwrap().len(), width);
}
