//! Type identity for conversion.
//!
//! Shunt does not reflect on Rust types. Every message body carries a
//! [`TypeTag`], and the relationships between tags are declared up front in a
//! [`TypeCatalog`]. The catalog linearises each tag's ancestry once, so the
//! registry can walk from the concrete type to progressively broader ones
//! without recomputing the hierarchy on every lookup.

use crate::error::CatalogError;
use std::{
    collections::{HashMap, HashSet},
    fmt,
    ops::Deref,
};

/// Identifier of a runtime value type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeTag(&'static str);

impl TypeTag {
    /// Root of every hierarchy. Always last in an ancestry chain.
    pub const OBJECT: TypeTag = TypeTag("Object");
    /// Type of [`Value::Null`](crate::Value::Null).
    pub const NULL: TypeTag = TypeTag("Null");
    /// Plain text.
    pub const TEXT: TypeTag = TypeTag("Text");
    /// Signed integer.
    pub const INT: TypeTag = TypeTag("Int");
    /// Boolean.
    pub const BOOL: TypeTag = TypeTag("Bool");
    /// Any list-like body.
    pub const LIST: TypeTag = TypeTag("List");
    /// The general-purpose list implementation.
    pub const ARRAY_LIST: TypeTag = TypeTag("ArrayList");
    /// Capability shared by framework-internal multi-value containers.
    pub const MESSAGE_CONTENTS: TypeTag = TypeTag("MessageContents");
    /// Framework-internal multi-value container, itself an `ArrayList`.
    pub const CONTENTS_LIST: TypeTag = TypeTag("ContentsList");

    /// Create a tag for a user-defined type.
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The type name.
    pub const fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A `(target, source)` pair used as the converter lookup key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeKey {
    /// The type the converter produces.
    pub target: TypeTag,
    /// The type the converter accepts.
    pub source: TypeTag,
}

impl TypeKey {
    /// Create a key converting `source` into `target`.
    pub const fn new(target: TypeTag, source: TypeTag) -> Self {
        Self { target, source }
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// Declaration of one type in a [`TypeCatalog`].
#[derive(Clone, Debug)]
pub struct TypeDecl {
    tag: TypeTag,
    parents: Vec<TypeTag>,
    nullable: bool,
}

impl TypeDecl {
    /// Declare `tag` as a nullable direct descendant of [`TypeTag::OBJECT`].
    pub fn new(tag: TypeTag) -> Self {
        Self {
            tag,
            parents: Vec::new(),
            nullable: true,
        }
    }

    /// Add a parent. Parents are searched in the order they are added.
    pub fn extends(mut self, parent: TypeTag) -> Self {
        self.parents.push(parent);
        self
    }

    /// Mark the type as unable to hold null.
    pub fn non_nullable(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// The declared tag.
    pub fn tag(&self) -> TypeTag {
        self.tag
    }
}

/// A linearised ancestry chain.
///
/// Declared tags borrow the chain computed when the catalog was built.
/// Undeclared tags carry their two-element chain inline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ancestry<'a> {
    /// Chain of a declared tag.
    Declared(&'a [TypeTag]),
    /// `[tag, Object]` for a tag the catalog does not know.
    Undeclared([TypeTag; 2]),
}

impl Deref for Ancestry<'_> {
    type Target = [TypeTag];

    fn deref(&self) -> &[TypeTag] {
        match self {
            Ancestry::Declared(chain) => *chain,
            Ancestry::Undeclared(chain) => chain.as_slice(),
        }
    }
}

impl AsRef<[TypeTag]> for Ancestry<'_> {
    fn as_ref(&self) -> &[TypeTag] {
        self
    }
}

/// The closed set of declared types and their linearised ancestry.
#[derive(Clone, Debug)]
pub struct TypeCatalog {
    ancestry: HashMap<TypeTag, Vec<TypeTag>>,
    non_nullable: HashSet<TypeTag>,
}

impl TypeCatalog {
    /// Start declaring a catalog. [`TypeTag::OBJECT`] is always present.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// The built-in hierarchy.
    pub fn builtin() -> Self {
        Self::builder()
            .with_builtins()
            .build()
            .expect("built-in type hierarchy is well formed")
    }

    /// Ancestry of `tag`, most specific first, ending with [`TypeTag::OBJECT`].
    ///
    /// Undeclared tags resolve to `[tag, Object]`.
    pub fn ancestry(&self, tag: TypeTag) -> Ancestry<'_> {
        match self.ancestry.get(&tag) {
            Some(chain) => Ancestry::Declared(chain.as_slice()),
            None => Ancestry::Undeclared([tag, TypeTag::OBJECT]),
        }
    }

    /// Whether a value of type `from` is already a `to`.
    pub fn is_assignable(&self, from: TypeTag, to: TypeTag) -> bool {
        self.ancestry(from).contains(&to)
    }

    /// Whether `tag` can hold null. Undeclared types are nullable.
    pub fn is_nullable(&self, tag: TypeTag) -> bool {
        !self.non_nullable.contains(&tag)
    }

    /// Whether `tag` was declared.
    pub fn contains(&self, tag: TypeTag) -> bool {
        self.ancestry.contains_key(&tag)
    }
}

impl Default for TypeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Builder for [`TypeCatalog`].
#[derive(Default)]
pub struct CatalogBuilder {
    decls: Vec<TypeDecl>,
}

impl CatalogBuilder {
    /// Declare a type.
    pub fn declare(mut self, decl: TypeDecl) -> Self {
        self.decls.push(decl);
        self
    }

    /// Declare the built-in types.
    pub fn with_builtins(self) -> Self {
        self.declare(TypeDecl::new(TypeTag::NULL))
            .declare(TypeDecl::new(TypeTag::TEXT))
            .declare(TypeDecl::new(TypeTag::INT).non_nullable())
            .declare(TypeDecl::new(TypeTag::BOOL).non_nullable())
            .declare(TypeDecl::new(TypeTag::LIST))
            .declare(TypeDecl::new(TypeTag::ARRAY_LIST).extends(TypeTag::LIST))
            .declare(TypeDecl::new(TypeTag::MESSAGE_CONTENTS))
            .declare(
                TypeDecl::new(TypeTag::CONTENTS_LIST)
                    .extends(TypeTag::ARRAY_LIST)
                    .extends(TypeTag::MESSAGE_CONTENTS),
            )
    }

    /// Validate the declarations and linearise every ancestry chain.
    pub fn build(self) -> Result<TypeCatalog, CatalogError> {
        let mut parents: HashMap<TypeTag, Vec<TypeTag>> = HashMap::new();
        let mut non_nullable = HashSet::new();
        parents.insert(TypeTag::OBJECT, Vec::new());

        for decl in self.decls {
            if parents.contains_key(&decl.tag) {
                return Err(CatalogError::Duplicate(decl.tag));
            }
            if !decl.nullable {
                non_nullable.insert(decl.tag);
            }
            parents.insert(decl.tag, decl.parents);
        }

        for (tag, direct) in &parents {
            if let Some(missing) = direct.iter().find(|p| !parents.contains_key(p)) {
                return Err(CatalogError::UnknownParent {
                    tag: *tag,
                    parent: *missing,
                });
            }
        }

        let mut ancestry = HashMap::with_capacity(parents.len());
        for tag in parents.keys() {
            let mut chain = Vec::new();
            linearize(*tag, &parents, &mut Vec::new(), &mut chain)?;
            chain.push(TypeTag::OBJECT);
            ancestry.insert(*tag, chain);
        }

        Ok(TypeCatalog {
            ancestry,
            non_nullable,
        })
    }
}

// Depth-first, parents in declaration order, first occurrence wins.
// OBJECT is appended by the caller so it always ends the chain.
fn linearize(
    tag: TypeTag,
    parents: &HashMap<TypeTag, Vec<TypeTag>>,
    visiting: &mut Vec<TypeTag>,
    out: &mut Vec<TypeTag>,
) -> Result<(), CatalogError> {
    if tag == TypeTag::OBJECT {
        return Ok(());
    }
    if visiting.contains(&tag) {
        return Err(CatalogError::Cycle(tag));
    }
    if out.contains(&tag) {
        return Ok(());
    }
    out.push(tag);
    visiting.push(tag);
    for parent in parents.get(&tag).map(Vec::as_slice).unwrap_or_default() {
        linearize(*parent, parents, visiting, out)?;
    }
    visiting.pop();
    Ok(())
}
