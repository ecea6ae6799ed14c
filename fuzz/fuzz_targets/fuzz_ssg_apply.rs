//! Fuzz target for the ssg-apply `key = value` format.
//!
//! Besides never panicking, a rendered file must parse back and render identically.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_ssg_apply
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use secpol_settings::parse_ssg_apply;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = parse_ssg_apply(text) else {
        return;
    };

    let rendered = config.render();
    let reparsed = parse_ssg_apply(&rendered).expect("rendered ssg-apply file must parse");
    assert_eq!(reparsed.render(), rendered);
    let _ = config.disabled_rules();
});
