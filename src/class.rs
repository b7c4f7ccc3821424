//! Self-describing class metadata.
//!
//! There is no runtime reflection to probe, so every copyable class carries
//! its own shape: an ordered attribute list, an optional parent class, and
//! an ordered list of construction paths. The reconstructor consumes this
//! metadata instead of introspecting live objects.

use std::fmt;
use std::rc::Rc;

use crate::value::{CopyError, Value};

/// Declared parameter type of a constructor, used by the argument
/// synthesizer to produce a placeholder.
#[derive(Debug, Clone)]
pub enum TypeHint {
    Bool,
    Int,
    BigInt,
    Num,
    Str,
    Array,
    Map,
    Seq,
    Class(Rc<ClassSpec>),
}

/// One declared attribute. The engine reads and writes private attributes
/// the same as public ones; the flag exists for accessors built on top.
#[derive(Debug, Clone)]
pub struct AttrSpec {
    pub name: String,
    pub public: bool,
}

/// One construction path. `build` receives the class being constructed and
/// one argument per entry in `params`, and must return an `Object` of that
/// class. Non-public constructors are still usable by the engine.
#[derive(Clone)]
pub struct CtorSpec {
    pub params: Vec<TypeHint>,
    pub public: bool,
    build: Rc<dyn Fn(&Rc<ClassSpec>, &[Value]) -> Result<Value, CopyError>>,
}

impl CtorSpec {
    pub fn invoke(&self, class: &Rc<ClassSpec>, args: &[Value]) -> Result<Value, CopyError> {
        (self.build)(class, args)
    }
}

impl fmt::Debug for CtorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CtorSpec")
            .field("params", &self.params)
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

/// Shape of a class: name, parent, attributes, constructors. Immutable once
/// built and shared behind `Rc`.
#[derive(Debug)]
pub struct ClassSpec {
    name: String,
    parent: Option<Rc<ClassSpec>>,
    attributes: Vec<AttrSpec>,
    constructors: Vec<CtorSpec>,
}

impl ClassSpec {
    pub fn builder(name: impl Into<String>) -> ClassSpecBuilder {
        ClassSpecBuilder {
            name: name.into(),
            parent: None,
            attributes: Vec::new(),
            constructors: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Rc<ClassSpec>> {
        self.parent.as_ref()
    }

    /// Constructors declared by this class, in declaration order.
    /// Construction paths are not inherited.
    pub fn constructors(&self) -> &[CtorSpec] {
        &self.constructors
    }

    /// All attributes, ancestors first, then this class's own. Object field
    /// storage is indexed in this order.
    pub fn all_attributes(&self) -> Vec<AttrSpec> {
        let mut attrs = match &self.parent {
            Some(parent) => parent.all_attributes(),
            None => Vec::new(),
        };
        attrs.extend(self.attributes.iter().cloned());
        attrs
    }

    /// Field index for `name`; a leaf declaration shadows a parent's.
    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        let attrs = self.all_attributes();
        attrs.iter().rposition(|a| a.name == name)
    }

    /// First no-parameter construction path, if any.
    pub fn no_arg_constructor(&self) -> Option<&CtorSpec> {
        self.constructors.iter().find(|c| c.params.is_empty())
    }
}

pub struct ClassSpecBuilder {
    name: String,
    parent: Option<Rc<ClassSpec>>,
    attributes: Vec<AttrSpec>,
    constructors: Vec<CtorSpec>,
}

impl ClassSpecBuilder {
    pub fn parent(mut self, parent: Rc<ClassSpec>) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(AttrSpec {
            name: name.into(),
            public: true,
        });
        self
    }

    pub fn private_attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(AttrSpec {
            name: name.into(),
            public: false,
        });
        self
    }

    /// Declare a construction path. Declaration order is significant: the
    /// reconstructor accepts the first constructor whose arguments it can
    /// synthesize.
    pub fn constructor(
        mut self,
        params: Vec<TypeHint>,
        build: impl Fn(&Rc<ClassSpec>, &[Value]) -> Result<Value, CopyError> + 'static,
    ) -> Self {
        self.constructors.push(CtorSpec {
            params,
            public: true,
            build: Rc::new(build),
        });
        self
    }

    pub fn private_constructor(
        mut self,
        params: Vec<TypeHint>,
        build: impl Fn(&Rc<ClassSpec>, &[Value]) -> Result<Value, CopyError> + 'static,
    ) -> Self {
        self.constructors.push(CtorSpec {
            params,
            public: false,
            build: Rc::new(build),
        });
        self
    }

    pub fn build(self) -> Rc<ClassSpec> {
        Rc::new(ClassSpec {
            name: self.name,
            parent: self.parent,
            attributes: self.attributes,
            constructors: self.constructors,
        })
    }
}
