use crate::overload::DispatchMode;

/// The closed set of supported target languages.
///
/// Per-target syntax emission lives in the target emitters; this crate only
/// needs the handful of spellings that shape the dispatch cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Python,
    Ruby,
    Tcl,
    Java,
    CSharp,
}

impl Target {
    /// Scripting targets fold every overload into one dispatcher; static
    /// targets wrap overloads individually and pre-filter flagged losers.
    pub fn dispatch_mode(self) -> DispatchMode {
        match self {
            Target::Python | Target::Ruby | Target::Tcl => DispatchMode::Scripting,
            Target::Java | Target::CSharp => DispatchMode::Static,
        }
    }
}

/// Dispatch-relevant spellings for one target language.
#[derive(Debug, Clone)]
pub struct EmitterConfig {
    pub target: Target,
    pub dispatch_mode: DispatchMode,
    /// Expression yielding the live argument count.
    pub argc_expr: &'static str,
    /// Format of one argument-vector slot; `{}` is the zero-based index.
    argv_fmt: &'static str,
    /// Caller-side "no matching overload" tail with a `$symbol` placeholder.
    /// Exposed for the target emitters; the cascade itself never emits it.
    no_match_fmt: &'static str,
}

impl EmitterConfig {
    pub fn for_target(target: Target) -> Self {
        match target {
            Target::Python => Self::python(),
            Target::Ruby => Self::ruby(),
            Target::Tcl => Self::tcl(),
            Target::Java => Self::java(),
            Target::CSharp => Self::csharp(),
        }
    }

    pub fn python() -> Self {
        Self {
            target: Target::Python,
            dispatch_mode: DispatchMode::Scripting,
            argc_expr: "argc",
            argv_fmt: "argv[{}]",
            no_match_fmt: "PyErr_SetString(PyExc_TypeError, \"no matching overload for '$symbol'\");",
        }
    }

    pub fn ruby() -> Self {
        Self {
            target: Target::Ruby,
            dispatch_mode: DispatchMode::Scripting,
            argc_expr: "argc",
            argv_fmt: "argv[{}]",
            no_match_fmt: "rb_raise(rb_eArgError, \"no matching overload for '$symbol'\");",
        }
    }

    pub fn tcl() -> Self {
        Self {
            target: Target::Tcl,
            dispatch_mode: DispatchMode::Scripting,
            argc_expr: "objc",
            argv_fmt: "objv[{}]",
            no_match_fmt:
                "Tcl_SetResult(interp, (char *)\"no matching overload for '$symbol'\", TCL_STATIC);",
        }
    }

    pub fn java() -> Self {
        Self {
            target: Target::Java,
            dispatch_mode: DispatchMode::Static,
            argc_expr: "argc",
            argv_fmt: "argv[{}]",
            no_match_fmt:
                "throw new IllegalArgumentException(\"no matching overload for '$symbol'\");",
        }
    }

    pub fn csharp() -> Self {
        Self {
            target: Target::CSharp,
            dispatch_mode: DispatchMode::Static,
            argc_expr: "argc",
            argv_fmt: "argv[{}]",
            no_match_fmt: "throw new ArgumentException(\"no matching overload for '$symbol'\");",
        }
    }

    /// Spelling of the argument-vector slot for zero-based index `i`.
    pub fn argv(&self, i: usize) -> String {
        self.argv_fmt.replace("{}", &i.to_string())
    }

    /// The target's "no matching overload" statement for `symbol`.
    pub fn no_match(&self, symbol: &str) -> String {
        self.no_match_fmt.replace("$symbol", symbol)
    }
}
