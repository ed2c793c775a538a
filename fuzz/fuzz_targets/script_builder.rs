#![no_main]
use evtree::{build, flatten, parse_script, Config};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(events) = parse_script(s) {
            let _ = build(&events, Config::default().with_strict(true));
            if let Ok(forest) = build(&events, Config::default()) {
                let _ = build(&flatten(&forest), Config::default());
            }
        }
    }
});
