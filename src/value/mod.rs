use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use num_bigint::BigInt as NumBigInt;

use crate::class::ClassSpec;

mod display;
mod error;

pub use error::{CopyError, CopyErrorCode};

/// A node in a dynamic value graph.
///
/// Scalars (`Nil`, `Bool`, `Int`, `BigInt`, `Num`, `Str`) are inherently
/// immutable and copied by handle. The ref-typed variants (`Array`, `Map`,
/// `Seq`, `Object`) share storage through `Rc`, so aliasing and cycles are
/// expressed through handles and mutation is observable across them.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Int(i64),
    BigInt(NumBigInt),
    Num(f64),
    Str(Rc<str>),
    Array(ArrayRef),
    /// A standalone key/value pair. Transient view object: owned, not
    /// identity-tracked.
    Pair(Box<Value>, Box<Value>),
    Map(MapRef),
    Seq(SeqRef),
    Object(ObjectRef),
}

/// Concrete kind of an associative container. `Hash` preserves insertion
/// order; `Sorted` keeps entries ordered by the key's rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapKind {
    Hash,
    Sorted,
}

/// Concrete kind of a general collection. `Set` refuses structural
/// duplicates on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqKind {
    List,
    Set,
}

// --- Array: fixed-length indexed sequence ---

struct ArrayObj {
    elems: RefCell<Vec<Value>>,
    frozen: bool,
}

#[derive(Clone)]
pub struct ArrayRef {
    inner: Rc<ArrayObj>,
}

impl ArrayRef {
    pub fn new(elems: Vec<Value>) -> Self {
        Self {
            inner: Rc::new(ArrayObj {
                elems: RefCell::new(elems),
                frozen: false,
            }),
        }
    }

    pub fn frozen(elems: Vec<Value>) -> Self {
        Self {
            inner: Rc::new(ArrayObj {
                elems: RefCell::new(elems),
                frozen: true,
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.elems.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_frozen(&self) -> bool {
        self.inner.frozen
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.inner.elems.borrow().get(index).cloned()
    }

    /// Replace the element at `index`. The length of an array never changes
    /// after allocation.
    pub fn set(&self, index: usize, value: Value) {
        assert!(!self.inner.frozen, "cannot assign into a frozen array");
        self.inner.elems.borrow_mut()[index] = value;
    }

    pub fn items(&self) -> Vec<Value> {
        self.inner.elems.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn key(&self) -> usize {
        Rc::as_ptr(&self.inner) as usize
    }
}

impl fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Shallow on purpose: arrays can contain themselves.
        f.debug_struct("ArrayRef")
            .field("len", &self.len())
            .field("frozen", &self.inner.frozen)
            .finish()
    }
}

// --- Map: associative container ---

struct MapObj {
    kind: MapKind,
    entries: RefCell<Vec<(Value, Value)>>,
    frozen: bool,
}

#[derive(Clone)]
pub struct MapRef {
    inner: Rc<MapObj>,
}

impl MapRef {
    pub fn new(kind: MapKind) -> Self {
        Self {
            inner: Rc::new(MapObj {
                kind,
                entries: RefCell::new(Vec::new()),
                frozen: false,
            }),
        }
    }

    pub fn frozen(kind: MapKind, entries: Vec<(Value, Value)>) -> Self {
        let map = Self::new(kind);
        for (key, value) in entries {
            map.insert(key, value);
        }
        Self {
            inner: Rc::new(MapObj {
                kind,
                entries: RefCell::new(map.entries()),
                frozen: true,
            }),
        }
    }

    pub fn kind(&self) -> MapKind {
        self.inner.kind
    }

    pub fn len(&self) -> usize {
        self.inner.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_frozen(&self) -> bool {
        self.inner.frozen
    }

    /// Insert or replace. Keys match by structural equivalence, never by
    /// identity.
    pub fn insert(&self, key: Value, value: Value) {
        assert!(!self.inner.frozen, "cannot insert into a frozen map");
        let mut entries = self.inner.entries.borrow_mut();
        for slot in entries.iter_mut() {
            if slot.0.eqv(&key) {
                slot.1 = value;
                return;
            }
        }
        match self.inner.kind {
            MapKind::Hash => entries.push((key, value)),
            MapKind::Sorted => {
                let rendered = key.gist();
                let pos = entries
                    .iter()
                    .position(|(k, _)| k.gist() > rendered)
                    .unwrap_or(entries.len());
                entries.insert(pos, (key, value));
            }
        }
    }

    pub fn get(&self, key: &Value) -> Option<Value> {
        self.inner
            .entries
            .borrow()
            .iter()
            .find(|(k, _)| k.eqv(key))
            .map(|(_, v)| v.clone())
    }

    pub fn get_str(&self, key: &str) -> Option<Value> {
        self.get(&Value::str(key))
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    pub fn entries(&self) -> Vec<(Value, Value)> {
        self.inner.entries.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn key(&self) -> usize {
        Rc::as_ptr(&self.inner) as usize
    }
}

impl fmt::Debug for MapRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapRef")
            .field("kind", &self.inner.kind)
            .field("len", &self.len())
            .field("frozen", &self.inner.frozen)
            .finish()
    }
}

// --- Seq: general collection (list/set) ---

struct SeqObj {
    kind: SeqKind,
    elems: RefCell<Vec<Value>>,
    frozen: bool,
}

#[derive(Clone)]
pub struct SeqRef {
    inner: Rc<SeqObj>,
}

impl SeqRef {
    pub fn new(kind: SeqKind) -> Self {
        Self {
            inner: Rc::new(SeqObj {
                kind,
                elems: RefCell::new(Vec::new()),
                frozen: false,
            }),
        }
    }

    pub fn frozen(kind: SeqKind, elems: Vec<Value>) -> Self {
        let seq = Self::new(kind);
        for elem in elems {
            seq.push(elem);
        }
        Self {
            inner: Rc::new(SeqObj {
                kind,
                elems: RefCell::new(seq.items()),
                frozen: true,
            }),
        }
    }

    pub fn list_of(elems: Vec<Value>) -> Self {
        let seq = Self::new(SeqKind::List);
        for elem in elems {
            seq.push(elem);
        }
        seq
    }

    pub fn kind(&self) -> SeqKind {
        self.inner.kind
    }

    pub fn len(&self) -> usize {
        self.inner.elems.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_frozen(&self) -> bool {
        self.inner.frozen
    }

    /// Append an element. A `Set` drops structural duplicates.
    pub fn push(&self, value: Value) {
        assert!(!self.inner.frozen, "cannot push into a frozen collection");
        if self.inner.kind == SeqKind::Set && self.contains(&value) {
            return;
        }
        self.inner.elems.borrow_mut().push(value);
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.inner.elems.borrow().get(index).cloned()
    }

    pub fn set(&self, index: usize, value: Value) {
        assert!(!self.inner.frozen, "cannot assign into a frozen collection");
        self.inner.elems.borrow_mut()[index] = value;
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.inner.elems.borrow().iter().any(|e| e.eqv(value))
    }

    pub fn items(&self) -> Vec<Value> {
        self.inner.elems.borrow().clone()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn key(&self) -> usize {
        Rc::as_ptr(&self.inner) as usize
    }
}

impl fmt::Debug for SeqRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeqRef")
            .field("kind", &self.inner.kind)
            .field("len", &self.len())
            .field("frozen", &self.inner.frozen)
            .finish()
    }
}

// --- Object: instance of a self-describing class ---

struct ObjObj {
    class: Rc<ClassSpec>,
    /// Indexed by the class's flattened attribute list (parents first).
    fields: RefCell<Vec<Value>>,
}

#[derive(Clone)]
pub struct ObjectRef {
    inner: Rc<ObjObj>,
}

impl ObjectRef {
    /// `fields` must supply one value per attribute in
    /// [`ClassSpec::all_attributes`] order.
    pub fn new(class: Rc<ClassSpec>, fields: Vec<Value>) -> Self {
        assert_eq!(
            fields.len(),
            class.all_attributes().len(),
            "field count must match the attribute list of {}",
            class.name()
        );
        Self {
            inner: Rc::new(ObjObj {
                class,
                fields: RefCell::new(fields),
            }),
        }
    }

    pub fn class(&self) -> Rc<ClassSpec> {
        Rc::clone(&self.inner.class)
    }

    pub fn class_name(&self) -> String {
        self.inner.class.name().to_string()
    }

    /// Look up an attribute by name; a leaf-declared attribute shadows a
    /// parent's attribute of the same name.
    pub fn get(&self, name: &str) -> Option<Value> {
        let index = self.inner.class.attribute_index(name)?;
        self.inner.fields.borrow().get(index).cloned()
    }

    pub fn set(&self, name: &str, value: Value) -> bool {
        match self.inner.class.attribute_index(name) {
            Some(index) => {
                self.inner.fields.borrow_mut()[index] = value;
                true
            }
            None => false,
        }
    }

    pub(crate) fn field_at(&self, index: usize) -> Value {
        self.inner.fields.borrow()[index].clone()
    }

    pub(crate) fn set_field_at(&self, index: usize, value: Value) {
        self.inner.fields.borrow_mut()[index] = value;
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn key(&self) -> usize {
        Rc::as_ptr(&self.inner) as usize
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRef")
            .field("class", &self.inner.class.name())
            .finish()
    }
}

impl Value {
    pub fn str(s: &str) -> Value {
        Value::Str(Rc::from(s))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "Nil",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::BigInt(_) => "BigInt",
            Value::Num(_) => "Num",
            Value::Str(_) => "Str",
            Value::Array(_) => "Array",
            Value::Pair(..) => "Pair",
            Value::Map(_) => "Map",
            Value::Seq(_) => "Seq",
            Value::Object(_) => "Object",
        }
    }

    /// Reference identity of a ref-typed value, `None` for scalars and
    /// pairs. This is what the copy context keys on: two structurally
    /// equivalent values at different addresses have different keys.
    pub(crate) fn identity_key(&self) -> Option<usize> {
        match self {
            Value::Array(arr) => Some(arr.key()),
            Value::Map(map) => Some(map.key()),
            Value::Seq(seq) => Some(seq.key()),
            Value::Object(obj) => Some(obj.key()),
            _ => None,
        }
    }

    /// Identity comparison: the same allocation, or the same scalar.
    pub fn same_identity(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Array(a), Value::Array(b)) => a.ptr_eq(b),
            (Value::Map(a), Value::Map(b)) => a.ptr_eq(b),
            (Value::Seq(a), Value::Seq(b)) => a.ptr_eq(b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Str(a), Value::Str(b)) => Rc::ptr_eq(a, b),
            (Value::Pair(..), Value::Pair(..)) => false,
            _ => self.eqv(other),
        }
    }

    /// Type-strict structural equivalence. Containers must match in kind
    /// and (recursively) contents; objects compare by identity only, since
    /// object state is not part of any value-level contract.
    pub fn eqv(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            // Bit-exact so 0e0 and -0e0 stay distinguishable.
            (Value::Num(a), Value::Num(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len()
                    && a.items()
                        .iter()
                        .zip(b.items().iter())
                        .all(|(x, y)| x.eqv(y))
            }
            (Value::Pair(ak, av), Value::Pair(bk, bv)) => ak.eqv(bk) && av.eqv(bv),
            (Value::Map(a), Value::Map(b)) => {
                a.kind() == b.kind()
                    && a.len() == b.len()
                    && a.entries()
                        .iter()
                        .all(|(k, v)| b.get(k).is_some_and(|bv| v.eqv(&bv)))
            }
            (Value::Seq(a), Value::Seq(b)) => {
                if a.kind() != b.kind() || a.len() != b.len() {
                    return false;
                }
                match a.kind() {
                    SeqKind::List => a
                        .items()
                        .iter()
                        .zip(b.items().iter())
                        .all(|(x, y)| x.eqv(y)),
                    SeqKind::Set => a.items().iter().all(|x| b.contains(x)),
                }
            }
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.eqv(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eqv_is_type_strict() {
        assert!(Value::Int(1).eqv(&Value::Int(1)));
        assert!(!Value::Int(1).eqv(&Value::Num(1.0)));
        assert!(!Value::str("1").eqv(&Value::Int(1)));
    }

    #[test]
    fn eqv_distinguishes_container_kinds() {
        let list = Value::Seq(SeqRef::list_of(vec![Value::Int(1)]));
        let set = Value::Seq(SeqRef::frozen(SeqKind::Set, vec![Value::Int(1)]));
        assert!(!list.eqv(&set));
    }

    #[test]
    fn identity_differs_from_equivalence() {
        let a = Value::Array(ArrayRef::new(vec![Value::Int(1)]));
        let b = Value::Array(ArrayRef::new(vec![Value::Int(1)]));
        assert!(a.eqv(&b));
        assert!(!a.same_identity(&b));
        assert!(a.same_identity(&a.clone()));
        assert_ne!(a.identity_key(), b.identity_key());
    }

    #[test]
    fn set_refuses_structural_duplicates() {
        let set = SeqRef::new(SeqKind::Set);
        set.push(Value::str("a"));
        set.push(Value::str("b"));
        set.push(Value::str("a"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn sorted_map_keeps_keys_ordered() {
        let map = MapRef::new(MapKind::Sorted);
        map.insert(Value::str("b"), Value::Int(2));
        map.insert(Value::str("a"), Value::Int(1));
        map.insert(Value::str("c"), Value::Int(3));
        let keys: Vec<String> = map.entries().iter().map(|(k, _)| k.gist()).collect();
        assert_eq!(keys, ["a", "b", "c"]);
    }

    #[test]
    fn map_insert_replaces_equivalent_key() {
        let map = MapRef::new(MapKind::Hash);
        map.insert(Value::str("k"), Value::Int(1));
        map.insert(Value::str("k"), Value::Int(2));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get_str("k"), Some(Value::Int(2)));
    }

    #[test]
    #[should_panic(expected = "frozen")]
    fn frozen_collection_rejects_push() {
        let seq = SeqRef::frozen(SeqKind::List, vec![Value::Int(1)]);
        seq.push(Value::Int(2));
    }
}
