use anyhow::Result;
use wrapgen::{
    Declaration, DiagnosticSink, DispatchMode, Parameter, RankError, SourceLoc, Span,
    TranslationUnitContext, TypeDesc, precedence, rank,
};

fn loc(line: usize) -> SourceLoc {
    SourceLoc::new("example.i", line, Span::new(line * 40, line * 40 + 10))
}

fn int_param() -> Parameter {
    Parameter::new(TypeDesc::named("int"))
        .with_precedence(precedence::INTEGER)
        .with_typecheck("is_int($input)")
}

fn double_param() -> Parameter {
    Parameter::new(TypeDesc::named("double"))
        .with_precedence(precedence::DOUBLE)
        .with_typecheck("is_double($input)")
}

fn class_ptr_param(class: &str) -> Parameter {
    Parameter::new(TypeDesc::pointer_to(class))
        .with_precedence(precedence::POINTER)
        .with_typecheck(format!("is_{class}_ptr($input)"))
}

fn decl(line: usize, wrapper: &str, params: Vec<Parameter>) -> Declaration {
    Declaration::new("f", wrapper, loc(line)).with_parameters(params)
}

fn wrapper_order(ranked: &[Declaration]) -> Vec<&str> {
    ranked.iter().map(|d| d.wrapper_name.as_str()).collect()
}

#[test]
fn ranking_is_deterministic() -> Result<()> {
    let ctx = TranslationUnitContext::new();
    let group = vec![
        decl(1, "w_int_int", vec![int_param(), int_param()]),
        decl(2, "w_double", vec![double_param()]),
        decl(3, "w_int", vec![int_param()]),
        decl(4, "w_none", vec![]),
    ];

    let mut sink_a = DiagnosticSink::new();
    let first = rank(group.clone(), DispatchMode::Scripting, &ctx, &mut sink_a)?;
    let mut sink_b = DiagnosticSink::new();
    let second = rank(group, DispatchMode::Scripting, &ctx, &mut sink_b)?;

    assert_eq!(wrapper_order(&first), wrapper_order(&second));
    let flags_first: Vec<bool> = first.iter().map(|d| d.ambiguous).collect();
    let flags_second: Vec<bool> = second.iter().map(|d| d.ambiguous).collect();
    assert_eq!(flags_first, flags_second);
    Ok(())
}

#[test]
fn output_is_sorted_by_required_count() -> Result<()> {
    let ctx = TranslationUnitContext::new();
    let group = vec![
        decl(1, "w3", vec![int_param(), int_param(), int_param()]),
        decl(2, "w0", vec![]),
        decl(3, "w2", vec![int_param(), double_param()]),
        decl(4, "w1", vec![double_param()]),
    ];

    let mut sink = DiagnosticSink::new();
    let ranked = rank(group, DispatchMode::Scripting, &ctx, &mut sink)?;

    for pair in ranked.windows(2) {
        assert!(pair[0].required_count() <= pair[1].required_count());
    }
    assert_eq!(wrapper_order(&ranked), vec!["w0", "w1", "w2", "w3"]);
    Ok(())
}

#[test]
fn lower_precedence_sorts_first_within_a_band() -> Result<()> {
    let ctx = TranslationUnitContext::new();
    // Declared double-first; the int overload is more specific and must be
    // tried before the coercing double check.
    let group = vec![
        decl(1, "w_double", vec![double_param()]),
        decl(2, "w_int", vec![int_param()]),
    ];

    let mut sink = DiagnosticSink::new();
    let ranked = rank(group, DispatchMode::Scripting, &ctx, &mut sink)?;

    assert_eq!(wrapper_order(&ranked), vec!["w_int", "w_double"]);
    assert!(ranked.iter().all(|d| !d.ambiguous));
    Ok(())
}

#[test]
fn parse_error_declarations_are_skipped_not_flagged() -> Result<()> {
    let ctx = TranslationUnitContext::new();
    let group = vec![
        decl(1, "w_ok", vec![int_param()]),
        decl(2, "w_bad", vec![int_param()]).with_parse_error(),
        decl(3, "w_also_ok", vec![double_param()]),
    ];

    let mut sink = DiagnosticSink::new();
    let ranked = rank(group, DispatchMode::Static, &ctx, &mut sink)?;

    assert_eq!(ranked.len(), 2);
    assert!(ranked.iter().all(|d| d.wrapper_name != "w_bad"));
    assert!(ranked.iter().all(|d| !d.ambiguous));
    Ok(())
}

#[test]
fn const_overload_is_shadowed_in_scripting_mode() -> Result<()> {
    let ctx = TranslationUnitContext::new();
    // Declared const-first so the swap is observable.
    let group = vec![
        decl(1, "w_const", vec![int_param()]).const_qualified(),
        decl(2, "w_mut", vec![int_param()]),
    ];

    let mut sink = DiagnosticSink::new();
    let ranked = rank(group, DispatchMode::Scripting, &ctx, &mut sink)?;

    assert_eq!(wrapper_order(&ranked), vec!["w_mut", "w_const"]);
    assert!(!ranked[0].ambiguous);
    assert!(ranked[1].ambiguous);
    assert_eq!(sink.warning_count(), 1);
    assert!(sink.diagnostics()[0].message().contains("shadowed"));
    Ok(())
}

#[test]
fn const_overload_keeps_declared_order_in_static_mode() -> Result<()> {
    let ctx = TranslationUnitContext::new();
    let group = vec![
        decl(1, "w_const", vec![int_param()]).const_qualified(),
        decl(2, "w_mut", vec![int_param()]),
    ];

    let mut sink = DiagnosticSink::new();
    let ranked = rank(group, DispatchMode::Static, &ctx, &mut sink)?;

    // Whichever was declared first keeps its slot; the later one is flagged.
    assert_eq!(wrapper_order(&ranked), vec!["w_const", "w_mut"]);
    assert!(!ranked[0].ambiguous);
    assert!(ranked[1].ambiguous);
    assert!(sink.diagnostics()[0].message().contains("ignored"));
    Ok(())
}

#[test]
fn true_duplicate_is_flagged_in_both_modes() -> Result<()> {
    for mode in [DispatchMode::Scripting, DispatchMode::Static] {
        let ctx = TranslationUnitContext::new();
        let group = vec![
            decl(10, "w_first", vec![int_param()]),
            decl(20, "w_second", vec![int_param()]),
        ];

        let mut sink = DiagnosticSink::new();
        let ranked = rank(group, mode, &ctx, &mut sink)?;

        assert_eq!(wrapper_order(&ranked), vec!["w_first", "w_second"]);
        assert!(!ranked[0].ambiguous);
        assert!(ranked[1].ambiguous);
        // The diagnostic names the surviving declaration's location.
        assert!(sink.diagnostics()[0].message().contains("example.i:10"));
    }
    Ok(())
}

#[test]
fn subtype_overload_outranks_its_base() -> Result<()> {
    let mut ctx = TranslationUnitContext::new();
    ctx.register_class("Base", &[]);
    ctx.register_class("Derived", &["Base"]);

    let group = vec![
        decl(1, "w_base", vec![class_ptr_param("Base")]),
        decl(2, "w_derived", vec![class_ptr_param("Derived")]),
    ];

    let mut sink = DiagnosticSink::new();
    let ranked = rank(group, DispatchMode::Scripting, &ctx, &mut sink)?;

    assert_eq!(wrapper_order(&ranked), vec!["w_derived", "w_base"]);
    assert!(ranked.iter().all(|d| !d.ambiguous));
    Ok(())
}

#[test]
fn missing_typecheck_rule_warns_once_and_keeps_the_declaration() -> Result<()> {
    let ctx = TranslationUnitContext::new();
    let unchecked = Parameter::new(TypeDesc::named("opaque_handle"));
    let group = vec![
        decl(1, "w_unchecked", vec![unchecked]),
        decl(2, "w_int", vec![int_param()]),
    ];

    let mut sink = DiagnosticSink::new();
    let ranked = rank(group, DispatchMode::Scripting, &ctx, &mut sink)?;

    assert_eq!(ranked.len(), 2);
    assert_eq!(sink.warning_count(), 1);
    // The unorderable declaration loses its band but is not flagged.
    assert_eq!(wrapper_order(&ranked), vec!["w_int", "w_unchecked"]);
    assert!(ranked.iter().all(|d| !d.ambiguous));
    Ok(())
}

#[test]
fn equal_required_count_with_distinct_optional_tails_keeps_both() -> Result<()> {
    let ctx = TranslationUnitContext::new();
    let group = vec![
        decl(1, "w_one", vec![int_param()]),
        decl(2, "w_one_opt", vec![int_param(), int_param().with_default()]),
    ];

    let mut sink = DiagnosticSink::new();
    let ranked = rank(group, DispatchMode::Static, &ctx, &mut sink)?;

    assert_eq!(wrapper_order(&ranked), vec!["w_one", "w_one_opt"]);
    assert!(ranked.iter().all(|d| !d.ambiguous));
    assert!(sink.is_empty());
    Ok(())
}

#[test]
fn required_after_optional_is_an_error_but_ranking_continues() -> Result<()> {
    let ctx = TranslationUnitContext::new();
    let group = vec![
        decl(1, "w_bad", vec![int_param().with_default(), int_param()]),
        decl(2, "w_ok", vec![int_param()]),
    ];

    let mut sink = DiagnosticSink::new();
    let ranked = rank(group, DispatchMode::Static, &ctx, &mut sink)?;

    assert_eq!(ranked.len(), 2);
    assert_eq!(sink.error_count(), 1);
    let bad = ranked
        .iter()
        .find(|d| d.wrapper_name == "w_bad")
        .expect("declaration must not be dropped");
    assert!(bad.ambiguous);
    let ok = ranked
        .iter()
        .find(|d| d.wrapper_name == "w_ok")
        .expect("sibling must survive");
    assert!(!ok.ambiguous);
    Ok(())
}

#[test]
fn oversized_group_is_a_hard_error() {
    let ctx = TranslationUnitContext::new();
    let group: Vec<Declaration> = (0..=wrapgen::overload::MAX_OVERLOAD)
        .map(|i| decl(i + 1, &format!("w{i}"), vec![int_param()]))
        .collect();

    let mut sink = DiagnosticSink::new();
    let err = rank(group, DispatchMode::Scripting, &ctx, &mut sink)
        .expect_err("group above the cap must not rank");
    match err {
        RankError::GroupTooLarge { symbol, count } => {
            assert_eq!(symbol, "f");
            assert_eq!(count, wrapgen::overload::MAX_OVERLOAD + 1);
        }
    }
}
