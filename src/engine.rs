//! Entry point and value classification.

use crate::containers::{copy_array, copy_map, copy_pair, copy_seq};
use crate::context::CopyContext;
use crate::reconstruct::copy_object;
use crate::trace::trace_log;
use crate::value::{CopyError, Value};

/// Classification of an encountered value, computed from its runtime shape,
/// never from a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    PassThrough,
    Array,
    Pair,
    Map,
    Collection,
    Object,
}

pub(crate) fn classify(value: &Value) -> Shape {
    match value {
        Value::Nil
        | Value::Bool(_)
        | Value::Int(_)
        | Value::BigInt(_)
        | Value::Num(_)
        | Value::Str(_) => Shape::PassThrough,
        Value::Array(_) => Shape::Array,
        Value::Pair(..) => Shape::Pair,
        Value::Map(_) => Shape::Map,
        Value::Seq(_) => Shape::Collection,
        Value::Object(_) => Shape::Object,
    }
}

/// Deep-copy a value graph.
///
/// Returns a structurally identical graph sharing no mutable storage with
/// the original. Shared nodes stay shared (two paths to one source node
/// yield two paths to one copied node), cycles terminate, and values
/// classified immutable (scalars, frozen containers) come back as the same
/// handle. Any failure anywhere in the graph fails the whole call.
pub fn deep_copy(value: &Value) -> Result<Value, CopyError> {
    let mut ctx = CopyContext::new();
    copy_value(value, &mut ctx)
}

/// One step of the traversal: memo lookup, classification, dispatch. All
/// recursion comes back through here with the same context.
pub(crate) fn copy_value(value: &Value, ctx: &mut CopyContext) -> Result<Value, CopyError> {
    if matches!(value, Value::Nil) {
        return Ok(Value::Nil);
    }
    if let Some(existing) = ctx.lookup(value) {
        return Ok(existing);
    }
    let shape = classify(value);
    trace_log!("classify", "{} -> {:?}", value.type_name(), shape);
    match (shape, value) {
        (Shape::PassThrough, v) => Ok(v.clone()),
        (Shape::Array, Value::Array(arr)) => copy_array(value, arr, ctx),
        (Shape::Pair, Value::Pair(key, val)) => copy_pair(key, val, ctx),
        (Shape::Map, Value::Map(map)) => copy_map(value, map, ctx),
        (Shape::Collection, Value::Seq(seq)) => copy_seq(value, seq, ctx),
        (Shape::Object, Value::Object(obj)) => copy_object(value, obj, ctx),
        _ => unreachable!("classification disagrees with value shape"),
    }
}
