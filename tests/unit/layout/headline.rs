use super::*;
use crate::assets::font::FixedAdvance;

/// One pixel per char per px of size; spaces are one char wide.
fn unit_measure() -> FixedAdvance {
    FixedAdvance::new(1.0, 0.8, 0.2)
}

fn params(canvas_width: u32, start: u32, min: u32, step: u32, max_lines: usize) -> HeadlineParams {
    HeadlineParams {
        canvas_width,
        safe_margin: 0,
        size_start: start,
        size_min: min,
        size_step: step,
        max_lines,
        line_spacing: 0,
        gap: 0,
        padding: BadgePadding { x: 0.0, y: 0.0 },
    }
}

#[test]
fn span_covers_prefix_through_end_of_phrase() {
    let words = ["City", "Reports", "Record", "Rainfall", "This", "Week"];
    assert_eq!(resolve_span_end(&words, "Record Rainfall"), Some(3));
    assert_eq!(
        HighlightStrategy::resolve(&words, Some("Record Rainfall")),
        HighlightStrategy::Span { end: 3 }
    );
}

#[test]
fn span_matching_ignores_case_and_punctuation() {
    let words = ["Stocks", "Fall,", "Bonds", "Rise."];
    assert_eq!(resolve_span_end(&words, "stocks fall"), Some(1));
    assert_eq!(resolve_span_end(&words, "BONDS RISE"), Some(3));
}

#[test]
fn single_word_phrase_matches_first_occurrence() {
    let words = ["up", "and", "up", "again"];
    assert_eq!(resolve_span_end(&words, "Up"), Some(0));
    assert_eq!(resolve_span_end(&words, "again"), Some(3));
}

#[test]
fn unmatched_phrase_highlights_nothing() {
    let words = ["City", "Reports", "Record", "Rainfall"];
    assert_eq!(resolve_span_end(&words, "Snowfall"), None);
    assert_eq!(resolve_span_end(&words, "Rainfall Record"), None);
    assert_eq!(
        HighlightStrategy::resolve(&words, Some("nothing here")),
        HighlightStrategy::None
    );
}

#[test]
fn only_missing_phrase_uses_first_line() {
    let words = ["City", "Reports", "Record"];
    assert_eq!(HighlightStrategy::resolve(&words, None), HighlightStrategy::FirstLine);
    for blank in ["", "   ", "..."] {
        assert_eq!(
            HighlightStrategy::resolve(&words, Some(blank)),
            HighlightStrategy::None,
            "{blank:?}"
        );
    }
}

#[test]
fn span_resolution_is_idempotent() {
    let words = ["City", "Reports", "Record", "Rainfall", "This", "Week"];
    let a = HighlightStrategy::resolve(&words, Some("record rainfall"));
    let b = HighlightStrategy::resolve(&words, Some("record rainfall"));
    assert_eq!(a, b);
}

#[test]
fn padding_override_couples_vertical_padding() {
    assert_eq!(
        BadgePadding::from_override(None),
        BadgePadding { x: 3.0, y: 1.0 }
    );
    assert_eq!(
        BadgePadding::from_override(Some(10)),
        BadgePadding { x: 10.0, y: 6.0 }
    );
    assert_eq!(
        BadgePadding::from_override(Some(1)),
        BadgePadding { x: 1.0, y: 2.0 }
    );
}

#[test]
fn candidate_sizes_walk_down_to_min() {
    assert_eq!(candidate_sizes(40, 30, 4).collect::<Vec<_>>(), vec![40, 36, 32]);
    assert_eq!(candidate_sizes(10, 10, 4).collect::<Vec<_>>(), vec![10]);
    assert_eq!(candidate_sizes(5, 1, 10).collect::<Vec<_>>(), vec![5]);
}

#[test]
fn pack_lines_breaks_greedily() {
    let mut m = unit_measure();
    m.set_size(10.0);
    let packing = pack_lines(&["aaaa", "bbbb", "cccc"], &mut m, 100.0);
    assert!(packing.all_fit);
    assert_eq!(packing.lines.len(), 2);
    assert_eq!(packing.lines[0].words.len(), 2);
    assert_eq!(packing.lines[0].width(packing.space_width), 90.0);
    assert_eq!(packing.lines[1].words[0].index, 2);
}

#[test]
fn oversized_word_gets_own_line_and_fails_fit() {
    let mut m = unit_measure();
    m.set_size(10.0);
    let packing = pack_lines(&["ab", "abcdefghijklmnop", "cd"], &mut m, 100.0);
    assert!(!packing.all_fit);
    assert_eq!(packing.lines.len(), 3);
    assert_eq!(packing.lines[1].words[0].text, "abcdefghijklmnop");
}

#[test]
fn fit_picks_largest_size_within_line_cap() {
    let words = ["aaaa", "bbbb", "cccc", "dddd"];
    let mut m = unit_measure();
    let fit = fit_headline(
        &words,
        &mut m,
        &FitParams {
            size_start: 40,
            size_min: 8,
            size_step: 1,
            max_lines: 2,
            max_width: 100.0,
        },
    );
    // Two words per line need 9 * size <= 100.
    assert!(fit.fitted);
    assert_eq!(fit.font_size, 11);
    assert_eq!(fit.packing.lines.len(), 2);

    m.set_size(12.0);
    let bigger = pack_lines(&words, &mut m, 100.0);
    assert!(bigger.lines.len() > 2);
}

#[test]
fn fit_degrades_to_smallest_attempt() {
    let mut m = unit_measure();
    let fit = fit_headline(
        &["abcdefghijklmnopqrst"],
        &mut m,
        &FitParams {
            size_start: 20,
            size_min: 10,
            size_step: 5,
            max_lines: 4,
            max_width: 100.0,
        },
    );
    assert!(!fit.fitted);
    assert_eq!(fit.font_size, 10);
    assert_eq!(fit.packing.lines.len(), 1);
}

#[test]
fn fitted_result_never_exceeds_line_cap() {
    let text = "one two three four five six seven eight nine ten eleven twelve";
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut m = unit_measure();
    for max_lines in 1..=4 {
        let fit = fit_headline(
            &words,
            &mut m,
            &FitParams {
                size_start: 60,
                size_min: 2,
                size_step: 2,
                max_lines,
                max_width: 300.0,
            },
        );
        assert!(fit.fitted);
        assert!(fit.packing.lines.len() <= max_lines);
    }
}

#[test]
fn legacy_plan_highlights_exactly_line_zero() {
    let text = "Prime Minister Announces New Policy Today";
    let mut m = unit_measure();
    let plan = plan_headline(text, 500.0, &params(400, 20, 10, 2, 4), &mut m, None, false);
    assert_eq!(plan.strategy, HighlightStrategy::FirstLine);
    assert!(plan.lines.len() > 1);
    assert!(plan.lines[0].words.iter().all(|w| w.highlighted));
    assert!(plan.lines[1..]
        .iter()
        .all(|l| l.words.iter().all(|w| !w.highlighted) && l.badges.is_empty()));
    assert_eq!(plan.lines[0].badges.len(), 1);
}

#[test]
fn span_plan_splits_badges_across_lines() {
    let text = "City Reports Record Rainfall This Week";
    let mut m = unit_measure();
    // Narrow canvas forces the span to wrap.
    let plan = plan_headline(
        text,
        600.0,
        &params(200, 10, 10, 1, 4),
        &mut m,
        Some("Record Rainfall"),
        false,
    );
    assert_eq!(plan.strategy, HighlightStrategy::Span { end: 3 });
    assert_eq!(plan.highlighted_indices(), vec![0, 1, 2, 3]);
    assert!(plan.lines.len() >= 2);
    let badge_lines = plan.lines.iter().filter(|l| !l.badges.is_empty()).count();
    assert!(badge_lines >= 2);
    assert!(plan.lines.iter().all(|l| l.badges.len() <= 1));
}

#[test]
fn plan_stacks_lines_above_anchor() {
    let mut m = unit_measure();
    let mut p = params(1000, 20, 20, 1, 4);
    p.line_spacing = 5;
    p.gap = 7;
    p.padding = BadgePadding { x: 3.0, y: 1.0 };
    let plan = plan_headline("aaa bbb", 300.0, &p, &mut m, None, false);
    // ascent 16 + descent 4.
    assert_eq!(plan.line_height, 20.0);
    assert_eq!(plan.lines.len(), 1);
    assert_eq!(plan.top, 300.0 - 20.0 - 7.0);

    // Centered: "aaa bbb" is 7 chars * 20px.
    let line = &plan.lines[0];
    assert_eq!(line.words[0].x, 500.0 - 70.0);
    assert_eq!(line.words[1].x, 500.0 - 70.0 + 60.0 + 20.0);

    let badge = line.badges[0];
    assert_eq!(badge.x0, 430.0 - 3.0);
    assert_eq!(badge.x1, 570.0 + 3.0);
    assert_eq!(badge.y0, plan.top - 1.0);
    assert_eq!(badge.y1, plan.top + 20.0 + 1.0);
}

#[test]
fn empty_headline_plans_nothing() {
    let mut m = unit_measure();
    let plan = plan_headline("   ", 300.0, &params(400, 20, 10, 2, 4), &mut m, None, false);
    assert!(plan.lines.is_empty());
    assert_eq!(plan.badges().count(), 0);
    assert_eq!(plan.top, 300.0);
}

#[test]
fn naive_mode_keeps_everything_on_one_line() {
    let text = "a very long headline that would normally wrap several times";
    let mut m = unit_measure();
    let plan = plan_headline(text, 300.0, &params(100, 30, 10, 2, 4), &mut m, None, true);
    assert!(plan.naive);
    assert_eq!(plan.font_size, 30);
    assert_eq!(plan.lines.len(), 1);
    assert_eq!(plan.line_texts(), vec![text.to_owned()]);
}
