use guide_layout::{
    AxisSide, Bounds, ConstraintSolver, EllipsisOptions, EllipsisStep, HideMethod, HideOptions,
    Label, Margin, Op, ResolveOptions, RotateOptions, Term, Visibility, auto_hide, has_overlap,
    resolve_overlaps,
};
use guide_layout::text_metrics::FixedWidthMeasurer;

fn axis_labels(n: usize, spacing: f64, text: &str) -> Vec<Label> {
    (0..n)
        .map(|i| Label::text(text, i as f64 * spacing, 0.0))
        .collect()
}

#[test]
fn bounds_scenario() {
    let bounds = Bounds::new(20.0, 20.0, 100.0, 220.0);
    assert_eq!(bounds.width(), 80.0);
    assert_eq!(bounds.height(), 200.0);
}

#[test]
fn full_pipeline_rotates_before_hiding() {
    let measurer = FixedWidthMeasurer::default();
    // 57.6px wide labels every 24px: rotation alone resolves the overlap,
    // so every label stays visible.
    let mut labels = axis_labels(6, 24.0, "AAAAAAAA");
    let options = ResolveOptions {
        margin: Margin::ZERO,
        rotate: Some(RotateOptions::default()),
        ellipsis: None,
        hide: Some(HideOptions::default()),
    };
    resolve_overlaps(&mut labels, &measurer, &options);
    assert!(labels.iter().all(Label::is_visible));
    assert!(labels.iter().all(|l| l.rotation == 90.0));
    assert!(!has_overlap(&labels, &measurer, Margin::ZERO));
}

#[test]
fn full_pipeline_falls_back_to_hiding() {
    let measurer = FixedWidthMeasurer::default();
    // 8px of spacing defeats rotation (14.4px line height) too; the hide
    // pass must thin the sequence out.
    let mut labels = axis_labels(10, 8.0, "AAAAAAAA");
    let options = ResolveOptions {
        margin: Margin::ZERO,
        rotate: Some(RotateOptions::default()),
        ellipsis: None,
        hide: Some(HideOptions::default()),
    };
    resolve_overlaps(&mut labels, &measurer, &options);
    assert!(labels[0].is_visible());
    assert!(labels.iter().any(|l| l.visibility == Visibility::Hidden));
    let visible: Vec<Label> = labels.iter().filter(|l| l.is_visible()).cloned().collect();
    assert!(!has_overlap(&visible, &measurer, Margin::ZERO));
}

#[test]
fn ellipsis_runs_before_hiding_and_preserves_labels() {
    let measurer = FixedWidthMeasurer::default();
    let mut labels = axis_labels(4, 100.0, "Category Alpha One");
    let options = ResolveOptions {
        margin: Margin::ZERO,
        rotate: None,
        ellipsis: Some(EllipsisOptions {
            max_length: 120.0,
            min_length: 0.0,
            step: EllipsisStep::Px(8.0),
            ellipsis: "...".to_string(),
        }),
        hide: Some(HideOptions::default()),
    };
    resolve_overlaps(&mut labels, &measurer, &options);
    assert!(labels.iter().all(Label::is_visible));
    assert!(labels.iter().all(|l| l.text.ends_with("...")));
    assert!(labels.iter().all(|l| l.origin_text == "Category Alpha One"));
}

#[test]
fn already_clear_labels_are_left_untouched() {
    let measurer = FixedWidthMeasurer::default();
    let mut labels = axis_labels(4, 200.0, "AAAA");
    let options = ResolveOptions {
        margin: Margin::ZERO,
        rotate: Some(RotateOptions::default()),
        ellipsis: Some(EllipsisOptions {
            max_length: 40.0,
            ..EllipsisOptions::default()
        }),
        hide: Some(HideOptions::default()),
    };
    resolve_overlaps(&mut labels, &measurer, &options);
    assert!(labels.iter().all(|l| l.rotation == 0.0));
    assert!(labels.iter().all(|l| l.text == "AAAA"));
    assert!(labels.iter().all(Label::is_visible));
}

#[test]
fn parity_hide_over_margins() {
    let measurer = FixedWidthMeasurer::default();
    let mut labels = axis_labels(10, 40.0, "AAAA");
    let options = HideOptions {
        method: HideMethod::Parity,
        ..HideOptions::default()
    };
    // 28.8px labels fit a 40px pitch bare, but a 10px margin on each side
    // pushes adjacent boxes into collision.
    auto_hide(&mut labels, &measurer, Margin::uniform(10.0), &options);
    let visible: Vec<Label> = labels.iter().filter(|l| l.is_visible()).cloned().collect();
    assert!(visible.len() < labels.len());
    assert!(!has_overlap(&visible, &measurer, Margin::uniform(10.0)));
}

#[test]
fn options_round_trip_through_serde() {
    let options = ResolveOptions {
        margin: Margin::uniform(2.0),
        rotate: Some(RotateOptions {
            candidates: vec![0.0, 45.0, 90.0],
            side: AxisSide::Left,
        }),
        ellipsis: Some(EllipsisOptions {
            max_length: 120.0,
            min_length: 24.0,
            step: EllipsisStep::Sample("ab".to_string()),
            ellipsis: "…".to_string(),
        }),
        hide: Some(HideOptions {
            method: HideMethod::Parity,
            seq: 3,
            timeout_ms: 250,
        }),
    };
    let json = serde_json::to_string(&options).expect("serialize options");
    let parsed: ResolveOptions = serde_json::from_str(&json).expect("parse options");
    assert_eq!(parsed.margin, Margin::uniform(2.0));
    let rotate = parsed.rotate.expect("rotate options");
    assert_eq!(rotate.candidates, vec![0.0, 45.0, 90.0]);
    assert_eq!(rotate.side, AxisSide::Left);
    let ellipsis = parsed.ellipsis.expect("ellipsis options");
    assert_eq!(ellipsis.step, EllipsisStep::Sample("ab".to_string()));
    let hide = parsed.hide.expect("hide options");
    assert_eq!(hide.method, HideMethod::Parity);
    assert_eq!(hide.seq, 3);
}

#[test]
fn paired_panel_layout_via_constraints() {
    // Two legend panels side by side in a container: A takes a quarter of
    // the width, capped at 18px; B fills the rest after a 12px gap.
    let mut solver = ConstraintSolver::new();
    let container = Bounds::new(20.0, 20.0, 100.0, 220.0);
    solver.set("container.w", container.width());
    solver.set("container.x", container.left());
    solver.add_constraint(vec![Term::scaled(4.0, "a.w")], Op::Eq, "container.w");
    solver.add_constraint(vec![Term::var("a.w")], Op::Le, 18.0);
    solver.add_constraint(vec![Term::var("a.x")], Op::Eq, "container.x");
    solver.add_constraint(
        vec![Term::var("b.x"), Term::num(-12.0), Term::scaled(-1.0, "a.w")],
        Op::Eq,
        "a.x",
    );
    solver.add_constraint(
        vec![Term::var("b.w"), Term::num(12.0), Term::var("a.w")],
        Op::Eq,
        "container.w",
    );

    assert_eq!(solver.get("a.w").unwrap(), 18.0);
    assert_eq!(solver.get("a.x").unwrap(), 20.0);
    assert_eq!(solver.get("b.x").unwrap(), 50.0);
    assert_eq!(solver.get("b.w").unwrap(), 50.0);

    let snapshot = solver.collect().unwrap();
    assert_eq!(snapshot.len(), 6);
    assert_eq!(snapshot["b.w"], 50.0);
}
