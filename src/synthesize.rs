//! Placeholder arguments for constructor probing.

use num_bigint::BigInt as NumBigInt;
use num_traits::Zero;

use crate::class::TypeHint;
use crate::context::CopyContext;
use crate::engine::copy_value;
use crate::trace::trace_log;
use crate::value::{ArrayRef, MapKind, MapRef, SeqKind, SeqRef, Value};

/// Produce a placeholder for one declared parameter type, or `None` when
/// the parameter cannot be satisfied (which marks the whole constructor
/// candidate unusable). Placeholders are scaffolding: they only need to get
/// past constructor invocation, since every field is overwritten with the
/// real deep-copied value afterwards.
pub(crate) fn synthesize_argument(hint: &TypeHint, ctx: &mut CopyContext) -> Option<Value> {
    match hint {
        TypeHint::Bool => Some(Value::Bool(false)),
        TypeHint::Int => Some(Value::Int(0)),
        TypeHint::BigInt => Some(Value::BigInt(NumBigInt::zero())),
        TypeHint::Num => Some(Value::Num(0.0)),
        TypeHint::Str => Some(Value::str("")),
        TypeHint::Array => Some(Value::Array(ArrayRef::new(Vec::new()))),
        TypeHint::Map => Some(Value::Map(MapRef::new(MapKind::Hash))),
        TypeHint::Seq => Some(Value::Seq(SeqRef::new(SeqKind::List))),
        TypeHint::Class(spec) => {
            let ctor = spec.no_arg_constructor()?;
            let instance = match ctor.invoke(spec, &[]) {
                Ok(instance) => instance,
                Err(err) => {
                    trace_log!("synthesize", "placeholder for {} failed: {}", spec.name(), err);
                    return None;
                }
            };
            // Route the fresh instance through the engine so it takes the
            // same cycle-safe path as every other value.
            match copy_value(&instance, ctx) {
                Ok(copy) => Some(copy),
                Err(err) => {
                    trace_log!("synthesize", "placeholder for {} failed: {}", spec.name(), err);
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::synthesize_argument;
    use crate::class::{ClassSpec, TypeHint};
    use crate::context::CopyContext;
    use crate::value::{ObjectRef, Value};

    #[test]
    fn scalar_hints_yield_zero_equivalents() {
        let mut ctx = CopyContext::new();
        assert_eq!(
            synthesize_argument(&TypeHint::Bool, &mut ctx),
            Some(Value::Bool(false))
        );
        assert_eq!(
            synthesize_argument(&TypeHint::Int, &mut ctx),
            Some(Value::Int(0))
        );
        assert_eq!(
            synthesize_argument(&TypeHint::Str, &mut ctx),
            Some(Value::str(""))
        );
    }

    #[test]
    fn container_hints_yield_fresh_empty_containers() {
        let mut ctx = CopyContext::new();
        let a = synthesize_argument(&TypeHint::Seq, &mut ctx).unwrap();
        let b = synthesize_argument(&TypeHint::Seq, &mut ctx).unwrap();
        assert!(!a.same_identity(&b));
    }

    #[test]
    fn class_hint_without_no_arg_path_fails() {
        let spec = ClassSpec::builder("NoDefault")
            .attribute("x")
            .constructor(vec![TypeHint::Int], |class, args| {
                Ok(Value::Object(ObjectRef::new(
                    Rc::clone(class),
                    vec![args[0].clone()],
                )))
            })
            .build();
        let mut ctx = CopyContext::new();
        assert!(synthesize_argument(&TypeHint::Class(spec), &mut ctx).is_none());
    }

    #[test]
    fn class_hint_with_no_arg_path_builds_an_instance() {
        let spec = ClassSpec::builder("Defaulted")
            .attribute("x")
            .constructor(vec![], |class, _args| {
                Ok(Value::Object(ObjectRef::new(
                    Rc::clone(class),
                    vec![Value::Int(42)],
                )))
            })
            .build();
        let mut ctx = CopyContext::new();
        let value = synthesize_argument(&TypeHint::Class(spec), &mut ctx).unwrap();
        match value {
            Value::Object(obj) => assert_eq!(obj.get("x"), Some(Value::Int(42))),
            other => panic!("expected an object, got {}", other.type_name()),
        }
    }
}
