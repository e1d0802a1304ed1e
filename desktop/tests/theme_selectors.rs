#![cfg(test)]
/*!
Theme selector lint for the desktop build.

The desktop shell embeds `ui/assets/theme/main.css` with `include_str!`, so a
renamed or dropped class only shows up as unstyled markup at runtime. This
test checks that the classes the Rust components emit are still defined.

If you intentionally rename a selector, update the component markup and
REQUIRED_SELECTORS together.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

/// Selectors the shared components rely on.
const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".page {",
    ".visually-hidden",
    // Buttons & status line
    ".button {",
    ".button--ghost",
    ".status {",
    ".status--working",
    ".status--success",
    ".status--error",
    // Diagnosis form
    ".diagnose-form",
    ".diagnose-form__row",
    ".diagnose-form__field",
    // Report regions
    ".report__panels",
    ".report-card",
    ".report-card__meta",
    ".report-card__placeholder",
    ".report-headline__total",
    ".report-headline__label",
    ".report-headline__meta",
    ".report-chart__image",
    ".report-legend",
    ".report-table",
    ".report-table__row",
    ".report-table__row--unmeasured",
    ".report-evidence__item",
    ".report-evidence__emphasis",
    ".report-recommendations",
    ".report-reasons",
    ".report-export__actions",
    // Admin dashboard
    ".admin__login",
    ".admin__grid",
    ".admin-card",
    ".admin-card__value",
    ".admin-card__placeholder",
    ".admin-chart__line",
    ".admin-chart__legend",
    ".admin-chart__swatch",
    // Responsive block
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let mut missing = Vec::new();
    for sel in REQUIRED_SELECTORS {
        if !THEME_CSS.contains(sel) {
            missing.push(*sel);
        }
    }

    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in unified theme:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "Embedded theme appears unexpectedly small ({} non-whitespace chars); \
         did the file get truncated or the path change?",
        non_ws_len
    );
}

#[test]
fn unmeasured_rows_are_visually_distinct() {
    let start = THEME_CSS
        .find(".report-table__row--unmeasured {")
        .expect("unmeasured row rule present");
    let block = &THEME_CSS[start..];
    let end = block.find('}').expect("rule is closed");
    assert!(
        block[..end].contains("color:") || block[..end].contains("background:"),
        "unmeasured rows need their own color or background"
    );
}
