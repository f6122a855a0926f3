use ahash::AHashMap;

use crate::model::{Parameter, TypeDesc};

/// Index into the class arena of a [`TranslationUnitContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(usize);

#[derive(Debug)]
struct ClassInfo {
    name: String,
    bases: Vec<ClassId>,
}

#[derive(Debug, Default)]
struct ScopeFrame {
    typedefs: AHashMap<String, TypeDesc>,
}

/// Per-translation-unit state threaded explicitly through ranking and
/// dispatch emission: typedef scopes and the class hierarchy.
///
/// Typedef scoping is an explicit stack of frames; class relationships live
/// in an arena indexed by [`ClassId`] and are queried by DAG traversal, so
/// diamond (or even accidentally cyclic) hierarchies never loop.
#[derive(Debug)]
pub struct TranslationUnitContext {
    scopes: Vec<ScopeFrame>,
    classes: Vec<ClassInfo>,
    class_index: AHashMap<String, ClassId>,
}

impl Default for TranslationUnitContext {
    fn default() -> Self {
        Self {
            scopes: vec![ScopeFrame::default()],
            classes: Vec::new(),
            class_index: AHashMap::new(),
        }
    }
}

impl TranslationUnitContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(ScopeFrame::default());
    }

    /// Discard the innermost scope. The file-level scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Collapse the innermost scope into its parent: typedefs not already
    /// shadowed in the parent are merged upward.
    pub fn collapse_scope(&mut self) {
        if self.scopes.len() < 2 {
            return;
        }
        if let Some(frame) = self.scopes.pop() {
            if let Some(parent) = self.scopes.last_mut() {
                for (name, ty) in frame.typedefs {
                    parent.typedefs.entry(name).or_insert(ty);
                }
            }
        }
    }

    pub fn add_typedef(&mut self, name: impl Into<String>, ty: TypeDesc) {
        if let Some(frame) = self.scopes.last_mut() {
            frame.typedefs.insert(name.into(), ty);
        }
    }

    fn lookup_typedef(&self, name: &str) -> Option<&TypeDesc> {
        self.scopes
            .iter()
            .rev()
            .find_map(|frame| frame.typedefs.get(name))
    }

    /// Chase typedef chains from the innermost scope outward. Qualifiers and
    /// indirection accumulate across the chain; cycles terminate at the first
    /// repeated name.
    pub fn resolve_typedef(&self, ty: &TypeDesc) -> TypeDesc {
        let mut resolved = ty.clone();
        let mut seen: Vec<String> = vec![resolved.base().to_string()];
        while let Some(target) = self.lookup_typedef(resolved.base()) {
            if seen.iter().any(|name| name == target.base()) {
                break;
            }
            seen.push(target.base().to_string());
            resolved = resolved.rebase(target);
        }
        resolved
    }

    /// Intern a class and its direct bases. Bases may be registered before or
    /// after the class naming them; re-registering replaces the base list.
    pub fn register_class(&mut self, name: &str, bases: &[&str]) -> ClassId {
        let id = self.intern_class(name);
        let base_ids: Vec<ClassId> = bases.iter().map(|base| self.intern_class(base)).collect();
        self.classes[id.0].bases = base_ids;
        id
    }

    fn intern_class(&mut self, name: &str) -> ClassId {
        if let Some(&id) = self.class_index.get(name) {
            return id;
        }
        let id = ClassId(self.classes.len());
        self.classes.push(ClassInfo {
            name: name.to_string(),
            bases: Vec::new(),
        });
        self.class_index.insert(name.to_string(), id);
        id
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.class_index.get(name).copied()
    }

    pub fn class_name(&self, id: ClassId) -> &str {
        &self.classes[id.0].name
    }

    /// Proper-subtype test over the registered hierarchy. Both spellings must
    /// carry the same indirection depth; a class is not a subtype of itself.
    pub fn is_subtype_of(&self, derived: &TypeDesc, base: &TypeDesc) -> bool {
        if derived.pointer_depth() != base.pointer_depth() {
            return false;
        }
        let (Some(&from), Some(&to)) = (
            self.class_index.get(derived.base()),
            self.class_index.get(base.base()),
        ) else {
            return false;
        };
        if from == to {
            return false;
        }
        let mut visited = vec![false; self.classes.len()];
        let mut stack = vec![from];
        while let Some(ClassId(i)) = stack.pop() {
            if visited[i] {
                continue;
            }
            visited[i] = true;
            for &b in &self.classes[i].bases {
                if b == to {
                    return true;
                }
                stack.push(b);
            }
        }
        false
    }

    /// Typedef-resolved comparison type of a parameter, with one pointer
    /// level added for pointer-equivalent typemap matches. Memoised on the
    /// parameter after the first computation.
    pub fn ltype_of(&self, param: &Parameter) -> TypeDesc {
        param
            .ltype_cache()
            .get_or_init(|| {
                let resolved = self.resolve_typedef(&param.ty);
                let resolved = if param.pointer_equivalent {
                    resolved.add_pointer()
                } else {
                    resolved
                };
                resolved.strip_const()
            })
            .clone()
    }
}
