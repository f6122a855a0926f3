use std::fmt::Write as _;

use wrapc_span::SourceLoc;

use crate::model::Parameter;

/// One member of an overload group: a single declaration sharing its symbol
/// with its siblings.
///
/// Declarations are produced fully annotated by the parser/typemap stage,
/// mutated once by the ranker (`ambiguous`, physical position in the group),
/// and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub symbol: String,
    /// Identifier of the generated wrapper function for this declaration,
    /// substituted into the dispatch call template.
    pub wrapper_name: String,
    pub parameters: Vec<Parameter>,
    /// `const` member-function qualifier.
    pub is_const: bool,
    /// Trailing `...` in the parameter list.
    pub is_variadic: bool,
    /// The parser failed on this declaration; it is never ranked and never
    /// flagged.
    pub parse_error: bool,
    /// Set by the ranker when this declaration loses to a preferred sibling.
    /// Flagged declarations are never dropped from the ranked list; callers
    /// filter on the flag.
    pub ambiguous: bool,
    pub location: SourceLoc,
}

impl Declaration {
    pub fn new(
        symbol: impl Into<String>,
        wrapper_name: impl Into<String>,
        location: SourceLoc,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            wrapper_name: wrapper_name.into(),
            parameters: Vec::new(),
            is_const: false,
            is_variadic: false,
            parse_error: false,
            ambiguous: false,
            location,
        }
    }

    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn const_qualified(mut self) -> Self {
        self.is_const = true;
        self
    }

    pub fn variadic(mut self) -> Self {
        self.is_variadic = true;
        self
    }

    pub fn with_parse_error(mut self) -> Self {
        self.parse_error = true;
        self
    }

    /// Call-site arguments that must be present: `num_inputs` summed over the
    /// leading run of parameters without defaults.
    pub fn required_count(&self) -> usize {
        self.parameters
            .iter()
            .take_while(|p| !p.has_default)
            .map(|p| usize::from(p.num_inputs))
            .sum()
    }

    /// Call-site arguments accepted when every optional parameter is supplied.
    pub fn total_count(&self) -> usize {
        self.parameters
            .iter()
            .map(|p| usize::from(p.num_inputs))
            .sum()
    }

    /// Structural signature of the argument list, ignoring parameter names,
    /// with the trailing member-function qualifier. Two declarations that
    /// "differ only by const" have equal [`Self::declaration_key_stripped`]
    /// but unequal keys.
    pub fn declaration_key(&self) -> String {
        let mut key = self.declaration_key_stripped();
        if self.is_const {
            key.push_str(" const");
        }
        key
    }

    pub fn declaration_key_stripped(&self) -> String {
        let mut key = String::from("(");
        for (i, p) in self.parameters.iter().enumerate() {
            if i > 0 {
                key.push(',');
            }
            let _ = write!(key, "{}", p.ty);
        }
        key.push(')');
        key
    }

    /// Human-readable rendering for diagnostics, e.g. `f(int,char const *)`.
    pub fn signature(&self) -> String {
        format!("{}{}", self.symbol, self.declaration_key())
    }

    /// Index of the first parameter violating declaration order (a
    /// non-defaulted parameter after a defaulted one), if any.
    pub fn order_violation(&self) -> Option<usize> {
        let mut seen_default = false;
        for (i, p) in self.parameters.iter().enumerate() {
            if p.has_default {
                seen_default = true;
            } else if seen_default {
                return Some(i);
            }
        }
        None
    }
}
