//! Template literal bodies: separating static text from `${...}` interpolations.

use crate::escape::is_escaped;

/// A run of static text between interpolations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticRun<'a> {
    pub text: &'a str,
    /// Offset of `text[0]` relative to the template body
    pub offset: usize,
}

/// Splits a template literal body into its static runs.
///
/// An interpolation ends at the first `}` after its `${`; nested braces are
/// not tracked. An escaped `\${` is static text. An interpolation without a
/// closing brace swallows the rest of the body. Runs that are empty or
/// whitespace-only are dropped.
pub fn static_runs(body: &str) -> Vec<StaticRun<'_>> {
    let bytes = body.as_bytes();
    let mut runs = Vec::new();
    let mut run_start = 0;
    let mut search = 0;

    while let Some(rel) = body[search..].find("${") {
        let open = search + rel;
        if is_escaped(bytes, open) {
            search = open + 2;
            continue;
        }
        push_run(body, run_start, open, &mut runs);
        match body[open + 2..].find('}') {
            Some(close) => {
                run_start = open + 2 + close + 1;
                search = run_start;
            }
            None => {
                run_start = body.len();
                break;
            }
        }
    }

    push_run(body, run_start, body.len(), &mut runs);
    runs
}

fn push_run<'a>(body: &'a str, start: usize, end: usize, runs: &mut Vec<StaticRun<'a>>) {
    let text = &body[start..end];
    if !text.trim().is_empty() {
        runs.push(StaticRun { text, offset: start });
    }
}
