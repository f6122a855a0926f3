use std::cell::OnceCell;

use crate::model::TypeDesc;

/// One formal parameter of an overloaded declaration, annotated with the
/// typemap facts the ranker consumes.
#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: Option<String>,
    pub ty: TypeDesc,
    /// Carries a default value; everything from the first defaulted parameter
    /// onwards is the optional tail.
    pub has_default: bool,
    /// Call-site arguments this parameter consumes after typemap
    /// transformation. 0 means invisible to the caller (ignored or
    /// output-only parameters).
    pub num_inputs: u8,
    /// Typecheck precedence from the typemap; `None` means no runtime
    /// type-check rule exists for this type.
    pub precedence: Option<u32>,
    /// Runtime type-check template with a `$input` placeholder, or `None`
    /// when the position is checked by arity alone.
    pub typecheck_code: Option<String>,
    /// The typemap matches this parameter through its pointer-equivalent
    /// form, so ltype resolution adds one level of indirection.
    pub pointer_equivalent: bool,
    ltype: OnceCell<TypeDesc>,
}

impl Parameter {
    pub fn new(ty: TypeDesc) -> Self {
        Self {
            name: None,
            ty,
            has_default: false,
            num_inputs: 1,
            precedence: None,
            typecheck_code: None,
            pointer_equivalent: false,
            ltype: OnceCell::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_default(mut self) -> Self {
        self.has_default = true;
        self
    }

    pub fn with_num_inputs(mut self, num_inputs: u8) -> Self {
        self.num_inputs = num_inputs;
        self
    }

    pub fn with_precedence(mut self, precedence: u32) -> Self {
        self.precedence = Some(precedence);
        self
    }

    pub fn with_typecheck(mut self, code: impl Into<String>) -> Self {
        self.typecheck_code = Some(code.into());
        self
    }

    pub fn through_pointer(mut self) -> Self {
        self.pointer_equivalent = true;
        self
    }

    pub fn consumes_input(&self) -> bool {
        self.num_inputs > 0
    }

    pub(crate) fn ltype_cache(&self) -> &OnceCell<TypeDesc> {
        &self.ltype
    }
}
