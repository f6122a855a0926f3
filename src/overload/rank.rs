use thiserror::Error;
use tracing::debug;
use wrapc_utils::{Diagnostic, DiagnosticSink};

use crate::model::{Declaration, TranslationUnitContext, precedence};

/// Hard cap on the size of one overload group. Exceeding it aborts ranking
/// for that symbol; truncating instead would emit a dispatcher that silently
/// never tries the dropped candidates.
pub const MAX_OVERLOAD: usize = 4096;

/// Selects how ambiguity between siblings is resolved and worded.
///
/// Scripting targets fold every overload into one dispatcher, so a const
/// method shadowed by its non-const twin is reordered behind it and left in
/// place as an unreachable arm. Static targets wrap each overload
/// individually, keep declaration order, and skip flagged losers entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    Scripting,
    Static,
}

#[derive(Debug, Error)]
pub enum RankError {
    #[error("overload group for `{symbol}` has {count} members, above the limit of {}", MAX_OVERLOAD)]
    GroupTooLarge { symbol: String, count: usize },
}

/// Outcome of comparing two declarations with equal required-argument count.
enum Outcome {
    /// The earlier declaration stays first.
    Ordered,
    /// The later declaration is preferred; swap.
    Reversed,
    /// Identical effective signatures; fall through to const/duplicate
    /// resolution.
    Identical,
}

/// Order a sibling group for dispatch.
///
/// Parse-error declarations are skipped up front. The result contains every
/// remaining declaration, sorted so that earlier entries are tried first,
/// with `ambiguous` set on declarations that lost to a preferred sibling.
/// Nothing is ever dropped; callers filter on the flag.
///
/// Ranking is deterministic: the same input order always produces the same
/// output order and the same flags.
pub fn rank(
    group: Vec<Declaration>,
    mode: DispatchMode,
    ctx: &TranslationUnitContext,
    sink: &mut DiagnosticSink,
) -> Result<Vec<Declaration>, RankError> {
    let symbol = group
        .first()
        .map(|d| d.symbol.clone())
        .unwrap_or_default();
    let mut nodes: Vec<Declaration> = group.into_iter().filter(|d| !d.parse_error).collect();
    if nodes.len() > MAX_OVERLOAD {
        return Err(RankError::GroupTooLarge {
            symbol,
            count: nodes.len(),
        });
    }

    check_declaration_order(&mut nodes, sink);
    warn_missing_typechecks(&nodes, sink);

    // Stable insertion sort by required argument count; groups are small.
    for i in 1..nodes.len() {
        let mut j = i;
        while j > 0 && nodes[j - 1].required_count() > nodes[j].required_count() {
            nodes.swap(j - 1, j);
            j -= 1;
        }
    }

    // Within each equal-arity band, pull the most specific candidate to the
    // front, one slot at a time.
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            if nodes[i].required_count() != nodes[j].required_count() {
                continue;
            }
            match compare(&nodes[i], &nodes[j], ctx) {
                Outcome::Ordered => {}
                Outcome::Reversed => nodes.swap(i, j),
                Outcome::Identical => resolve_identical(&mut nodes, i, j, mode, sink),
            }
        }
    }

    debug!(
        symbol = %symbol,
        count = nodes.len(),
        "ranked overload group"
    );
    Ok(nodes)
}

/// A required parameter after a defaulted one makes the declaration
/// unwrappable: hard error, flag it so emitters skip it, keep ranking the
/// rest of the group.
fn check_declaration_order(nodes: &mut [Declaration], sink: &mut DiagnosticSink) {
    for decl in nodes.iter_mut() {
        if let Some(pos) = decl.order_violation() {
            sink.report(
                Diagnostic::error(
                    decl.location.clone(),
                    format!(
                        "in `{}`, non-optional parameter {} follows an optional parameter",
                        decl.signature(),
                        pos + 1
                    ),
                )
                .with_label("this overload cannot be wrapped"),
            );
            decl.ambiguous = true;
        }
    }
}

/// One warning per declaration that has a caller-visible parameter with no
/// typecheck rule. Such declarations stay in the output but always lose the
/// affected comparison position.
fn warn_missing_typechecks(nodes: &[Declaration], sink: &mut DiagnosticSink) {
    for decl in nodes {
        let missing = decl
            .parameters
            .iter()
            .filter(|p| p.consumes_input())
            .position(|p| p.precedence.is_none());
        if let Some(arg) = missing {
            sink.report(
                Diagnostic::warning(
                    decl.location.clone(),
                    format!(
                        "no type-checking rule available for argument {} of `{}`; \
                         overloaded dispatch for this signature is unreliable",
                        arg + 1,
                        decl.signature()
                    ),
                )
                .with_help("add a typecheck typemap for this parameter type"),
            );
        }
    }
}

/// Lock-step walk over the caller-visible parameters of two declarations
/// with equal required count. The first position that differs decides the
/// order.
fn compare(a: &Declaration, b: &Declaration, ctx: &TranslationUnitContext) -> Outcome {
    let required = a.required_count();
    let mut pa = a.parameters.iter().filter(|p| p.consumes_input());
    let mut pb = b.parameters.iter().filter(|p| p.consumes_input());
    let mut consumed = 0usize;
    while consumed < required {
        let (Some(x), Some(y)) = (pa.next(), pb.next()) else {
            break;
        };
        match (x.precedence, y.precedence) {
            // Neither side has a rule here; the position cannot decide.
            (None, None) => {}
            // A declaration without a typecheck rule always loses to one
            // that has one.
            (Some(_), None) => return Outcome::Ordered,
            (None, Some(_)) => return Outcome::Reversed,
            (Some(px), Some(py)) => {
                if px != py {
                    return if px < py {
                        Outcome::Ordered
                    } else {
                        Outcome::Reversed
                    };
                }
                if px == precedence::POINTER {
                    let lx = ctx.ltype_of(x);
                    let ly = ctx.ltype_of(y);
                    if lx != ly {
                        if ctx.is_subtype_of(&lx, &ly) {
                            return Outcome::Ordered;
                        }
                        if ctx.is_subtype_of(&ly, &lx) {
                            return Outcome::Reversed;
                        }
                        // Unrelated pointer types: any consistent order
                        // works, so fall back to the rendered spelling.
                        return if lx.to_string() <= ly.to_string() {
                            Outcome::Ordered
                        } else {
                            Outcome::Reversed
                        };
                    }
                }
            }
        }
        consumed += usize::from(x.num_inputs);
    }
    Outcome::Identical
}

/// Every checked position of two declarations compared equal. If their
/// structural signatures differ only in the optional tail, arity guards can
/// still tell them apart at runtime; keep both unflagged in sorted order. If
/// they differ only by a trailing const, the const one loses; if they are
/// identical outright, the later one is a true duplicate. Losers are
/// flagged, never dropped.
fn resolve_identical(
    nodes: &mut [Declaration],
    i: usize,
    j: usize,
    mode: DispatchMode,
    sink: &mut DiagnosticSink,
) {
    if nodes[j].ambiguous {
        return;
    }
    if nodes[i].declaration_key_stripped() != nodes[j].declaration_key_stripped() {
        return;
    }
    let const_only = nodes[i].declaration_key() != nodes[j].declaration_key();

    if const_only && mode == DispatchMode::Scripting && nodes[i].is_const && !nodes[j].is_const {
        // Scripting targets prefer the non-const method; move it first.
        nodes.swap(i, j);
    }

    nodes[j].ambiguous = true;
    let loser = &nodes[j];
    let winner = &nodes[i];
    let message = match mode {
        DispatchMode::Scripting => format!(
            "overloaded method `{}` is shadowed by `{}` at {}",
            loser.signature(),
            winner.signature(),
            winner.location
        ),
        DispatchMode::Static => format!(
            "overloaded method `{}` ignored, using `{}` at {}",
            loser.signature(),
            winner.signature(),
            winner.location
        ),
    };
    sink.report(Diagnostic::warning(loser.location.clone(), message));
}
