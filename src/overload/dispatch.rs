use std::fmt::Write as _;

use tracing::debug;

use crate::emitter::EmitterConfig;
use crate::model::Declaration;

/// Emit the runtime dispatch cascade for a ranked overload group.
///
/// Candidates are tried in ranked order: an arity guard first, then one
/// nested type check per caller-visible argument, with a short-circuit call
/// before each optional position so a call that omits trailing defaulted
/// arguments matches as soon as enough arguments are present. A failed type
/// check falls through to the next candidate; what happens after the last
/// candidate (the "no matching overload" tail) is the caller's code.
///
/// `call_template` is the per-target call-through line with a `$wrapper`
/// placeholder for the candidate's wrapper identifier.
///
/// Returns the cascade text and the maximum total argument count seen across
/// all candidates, so the caller can size its argument-vector buffer.
pub fn emit_dispatch(
    ranked: &[Declaration],
    call_template: &str,
    config: &EmitterConfig,
) -> (String, usize) {
    let mut out = String::new();
    let mut max_args = 0usize;
    let argc = config.argc_expr;

    for decl in ranked {
        let required = decl.required_count();
        let total = decl.total_count();
        max_args = max_args.max(total);
        let call_line = call_template.replace("$wrapper", &decl.wrapper_name);

        if decl.is_variadic {
            let _ = writeln!(out, "if ({argc} >= {required}) {{");
        } else if required == total {
            let _ = writeln!(out, "if ({argc} == {required}) {{");
        } else {
            let _ = writeln!(out, "if ({argc} >= {required} && {argc} <= {total}) {{");
        }
        let mut depth = 1usize;

        let mut position = 0usize;
        for param in decl.parameters.iter().filter(|p| p.consumes_input()) {
            if position >= required {
                // Optional tail: call through once the supplied arguments
                // run out, before checking a type the caller never passed.
                indent(&mut out, depth);
                let _ = writeln!(out, "if ({argc} <= {position}) {{");
                indent(&mut out, depth + 1);
                out.push_str(&call_line);
                out.push('\n');
                indent(&mut out, depth);
                out.push_str("}\n");
            }
            if let Some(code) = &param.typecheck_code {
                let check = code.replace("$input", &config.argv(position));
                indent(&mut out, depth);
                let _ = writeln!(out, "if ({check}) {{");
                depth += 1;
            }
            position += usize::from(param.num_inputs);
        }

        indent(&mut out, depth);
        out.push_str(&call_line);
        out.push('\n');
        while depth > 0 {
            depth -= 1;
            indent(&mut out, depth);
            out.push_str("}\n");
        }
    }

    debug!(
        candidates = ranked.len(),
        max_args, "emitted dispatch cascade"
    );
    (out, max_args)
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}
