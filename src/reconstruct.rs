//! Generic reconstruction for values with no specialized strategy.

use std::rc::Rc;

use crate::context::CopyContext;
use crate::engine::copy_value;
use crate::synthesize::synthesize_argument;
use crate::trace::trace_log;
use crate::value::{CopyError, ObjectRef, Value};

/// Copy an object by rebuilding it from class metadata:
///
/// 1. Try the class's constructors in declaration order, synthesizing one
///    placeholder per parameter; the first candidate whose every parameter
///    synthesizes wins.
/// 2. Invoke it to get a structurally-valid but semantically-wrong
///    instance.
/// 3. Record that instance in the context keyed by the source identity
///    *before* touching any field, so back-edges to the source resolve to
///    it instead of recursing. This is what makes cyclic graphs terminate.
/// 4. Overwrite every field, inherited ones included, with the deep copy
///    of the source's field.
pub(crate) fn copy_object(
    source: &Value,
    obj: &ObjectRef,
    ctx: &mut CopyContext,
) -> Result<Value, CopyError> {
    let class = obj.class();

    let mut chosen = None;
    for ctor in class.constructors() {
        let mut args = Vec::with_capacity(ctor.params.len());
        let mut usable = true;
        for hint in &ctor.params {
            match synthesize_argument(hint, ctx) {
                Some(arg) => args.push(arg),
                None => {
                    usable = false;
                    break;
                }
            }
        }
        if usable {
            chosen = Some((ctor, args));
            break;
        }
    }

    let (ctor, args) = chosen.ok_or_else(|| {
        CopyError::reconstruction(class.name(), "no usable constructor found")
    })?;
    trace_log!(
        "reconstruct",
        "{} via constructor with {} parameter(s)",
        class.name(),
        ctor.params.len()
    );

    let built = ctor.invoke(&class, &args)?;
    let copy = match &built {
        Value::Object(copy) if Rc::ptr_eq(&copy.class(), &class) => copy.clone(),
        other => {
            return Err(CopyError::reconstruction(
                class.name(),
                format!(
                    "constructor produced {} instead of a {} instance",
                    other.type_name(),
                    class.name()
                ),
            ))
        }
    };

    ctx.record(source, Value::Object(copy.clone()));

    for index in 0..class.all_attributes().len() {
        let field = obj.field_at(index);
        copy.set_field_at(index, copy_value(&field, ctx)?);
    }

    Ok(Value::Object(copy))
}
