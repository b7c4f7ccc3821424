//! Specialized copy strategies for the container shapes.
//!
//! Every strategy first honors the frozen marker (return the original
//! handle; no mutation can be observed through either side), and otherwise
//! records its freshly-allocated copy in the context *before* populating
//! it, so a cycle looping back through a container terminates the same way
//! an object-field cycle does.

use crate::context::CopyContext;
use crate::engine::copy_value;
use crate::trace::trace_log;
use crate::value::{ArrayRef, CopyError, MapRef, SeqRef, Value};

pub(crate) fn copy_array(
    source: &Value,
    arr: &ArrayRef,
    ctx: &mut CopyContext,
) -> Result<Value, CopyError> {
    if arr.is_frozen() {
        trace_log!("container", "frozen array passed through");
        return Ok(Value::Array(arr.clone()));
    }
    let items = arr.items();
    // Same length up front; slots are overwritten in place.
    let copy = ArrayRef::new(vec![Value::Nil; items.len()]);
    ctx.record(source, Value::Array(copy.clone()));
    for (i, elem) in items.iter().enumerate() {
        copy.set(i, copy_value(elem, ctx)?);
    }
    Ok(Value::Array(copy))
}

pub(crate) fn copy_pair(
    key: &Value,
    value: &Value,
    ctx: &mut CopyContext,
) -> Result<Value, CopyError> {
    let (key_copy, value_copy) = copy_entry(key, value, ctx)?;
    Ok(Value::Pair(Box::new(key_copy), Box::new(value_copy)))
}

fn copy_entry(
    key: &Value,
    value: &Value,
    ctx: &mut CopyContext,
) -> Result<(Value, Value), CopyError> {
    Ok((copy_value(key, ctx)?, copy_value(value, ctx)?))
}

pub(crate) fn copy_map(
    source: &Value,
    map: &MapRef,
    ctx: &mut CopyContext,
) -> Result<Value, CopyError> {
    if map.is_frozen() {
        trace_log!("container", "frozen map passed through");
        return Ok(Value::Map(map.clone()));
    }
    let copy = MapRef::new(map.kind());
    ctx.record(source, Value::Map(copy.clone()));
    for (key, value) in map.entries() {
        let (key_copy, value_copy) = copy_entry(&key, &value, ctx)?;
        copy.insert(key_copy, value_copy);
    }
    Ok(Value::Map(copy))
}

pub(crate) fn copy_seq(
    source: &Value,
    seq: &SeqRef,
    ctx: &mut CopyContext,
) -> Result<Value, CopyError> {
    if seq.is_frozen() {
        trace_log!("container", "frozen collection passed through");
        return Ok(Value::Seq(seq.clone()));
    }
    let copy = SeqRef::new(seq.kind());
    ctx.record(source, Value::Seq(copy.clone()));
    for elem in seq.items() {
        copy.push(copy_value(&elem, ctx)?);
    }
    Ok(Value::Seq(copy))
}
