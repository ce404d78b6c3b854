//! Domain-specific assertion macros for sltail harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* rendering outcome was expected and what came back.

// ---------------------------------------------------------------------------
// Render outcome assertions
// ---------------------------------------------------------------------------

/// Assert that rendering produced a substituted string.
///
/// ```rust
/// assert_rendered!(render("%s", payload), "value");
/// ```
#[macro_export]
macro_rules! assert_rendered {
    ($outcome:expr, $expected:expr) => {{
        let outcome: sltail_core::RenderOutcome = $outcome;
        let expected: &str = $expected;
        match &outcome {
            sltail_core::RenderOutcome::Rendered(text) => {
                pretty_assertions::assert_eq!(text.as_str(), expected)
            }
            other => panic!(
                "assert_rendered! failed:\n  expected Rendered({:?})\n  actual:   {:?}",
                expected, other
            ),
        }
    }};
}

/// Assert that rendering failed with a malformed template and fell back to
/// the original text.
#[macro_export]
macro_rules! assert_malformed {
    ($outcome:expr, $template:expr) => {{
        let outcome: sltail_core::RenderOutcome = $outcome;
        let template: &str = $template;
        match &outcome {
            sltail_core::RenderOutcome::Failed {
                fallback,
                error: sltail_core::RenderError::MalformedTemplate(_),
            } if fallback == template => {}
            other => panic!(
                "assert_malformed! failed:\n  expected Failed(MalformedTemplate) with fallback {:?}\n  actual:   {:?}",
                template, other
            ),
        }
    }};
}

/// Assert that the payload failed to decode and the normalized template was
/// kept as the fallback.
#[macro_export]
macro_rules! assert_undecodable {
    ($outcome:expr, $normalized:expr) => {{
        let outcome: sltail_core::RenderOutcome = $outcome;
        let normalized: &str = $normalized;
        match &outcome {
            sltail_core::RenderOutcome::Failed {
                fallback,
                error: sltail_core::RenderError::PayloadDecode(_),
            } if fallback == normalized => {}
            other => panic!(
                "assert_undecodable! failed:\n  expected Failed(PayloadDecode) with fallback {:?}\n  actual:   {:?}",
                normalized, other
            ),
        }
    }};
}

// ---------------------------------------------------------------------------
// Output line assertions
// ---------------------------------------------------------------------------

/// Split captured output into lines, panicking on invalid UTF-8.
pub fn output_lines(out: &[u8]) -> Vec<String> {
    std::str::from_utf8(out)
        .expect("output must be UTF-8")
        .lines()
        .map(str::to_string)
        .collect()
}

/// Assert that every line of `lines` looks like `<ip> [<time>] <message>` or
/// is the skip marker.
pub fn assert_line_shapes(lines: &[String], skip_marker: &str) {
    for line in lines {
        if line == skip_marker {
            continue;
        }
        let (ip, rest) = line
            .split_once(' ')
            .unwrap_or_else(|| panic!("line has no ip field: {line:?}"));
        assert!(!ip.is_empty(), "empty ip field: {line:?}");
        assert!(rest.starts_with('['), "missing time field: {line:?}");
        assert!(rest.contains("] "), "unterminated time field: {line:?}");
    }
}
