use std::fmt;

/// Named typecheck precedence levels supplied by typemaps.
///
/// Lower values are checked earlier in the dispatch cascade: an exact class
/// pointer should win over `void *`, an integer over a double-with-coercion.
/// `POINTER` doubles as the sentinel that forces a deep type comparison when
/// two parameters tie on it.
pub mod precedence {
    pub const POINTER: u32 = 0;
    pub const VOIDPTR: u32 = 10;
    pub const BOOL: u32 = 15;
    pub const INTEGER: u32 = 50;
    pub const FLOAT: u32 = 80;
    pub const DOUBLE: u32 = 90;
    pub const CHAR: u32 = 100;
    pub const STRING: u32 = 135;
}

/// Structural spelling of a parameter type.
///
/// This is deliberately not a full C++ type model: the ranker only needs the
/// base name (for typedef resolution and subtype lookup), the indirection
/// depth, and qualifiers for the "differs only by const" rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDesc {
    base: String,
    pointer_depth: u8,
    is_reference: bool,
    is_const: bool,
}

impl TypeDesc {
    pub fn named(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            pointer_depth: 0,
            is_reference: false,
            is_const: false,
        }
    }

    pub fn pointer_to(base: impl Into<String>) -> Self {
        Self {
            pointer_depth: 1,
            ..Self::named(base)
        }
    }

    pub fn reference_to(base: impl Into<String>) -> Self {
        Self {
            is_reference: true,
            ..Self::named(base)
        }
    }

    pub fn with_const(mut self) -> Self {
        self.is_const = true;
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn pointer_depth(&self) -> u8 {
        self.pointer_depth
    }

    pub fn is_reference(&self) -> bool {
        self.is_reference
    }

    pub fn is_const(&self) -> bool {
        self.is_const
    }

    /// One more level of indirection, e.g. when a by-reference parameter is
    /// passed through its pointer-equivalent representation.
    pub fn add_pointer(&self) -> Self {
        let mut ty = self.clone();
        ty.pointer_depth += 1;
        ty.is_reference = false;
        ty
    }

    pub fn strip_const(&self) -> Self {
        let mut ty = self.clone();
        ty.is_const = false;
        ty
    }

    /// Rebase onto a typedef target, keeping this spelling's extra
    /// indirection and qualifiers on top of the target's.
    pub fn rebase(&self, target: &TypeDesc) -> Self {
        Self {
            base: target.base.clone(),
            pointer_depth: self.pointer_depth + target.pointer_depth,
            is_reference: self.is_reference || target.is_reference,
            is_const: self.is_const || target.is_const,
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        if self.is_const {
            write!(f, " const")?;
        }
        for _ in 0..self.pointer_depth {
            write!(f, " *")?;
        }
        if self.is_reference {
            write!(f, " &")?;
        }
        Ok(())
    }
}
