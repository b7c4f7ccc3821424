use std::fmt;

use super::{SeqKind, Value};

impl Value {
    /// Human-readable rendering: scalars plainly, arrays as `[a b c]`,
    /// lists as `(a b c)`, sets as `set(a b c)`, maps as `{k => v}`,
    /// objects as `Name(attr => v, ...)` in attribute order. A node already
    /// being rendered on the current path prints as `...` inside its
    /// delimiters, so cyclic graphs render finitely.
    pub fn gist(&self) -> String {
        let mut out = String::new();
        let mut visiting = Vec::new();
        self.gist_into(&mut out, &mut visiting);
        out
    }

    fn gist_into(&self, out: &mut String, visiting: &mut Vec<usize>) {
        if let Some(key) = self.identity_key() {
            if visiting.contains(&key) {
                match self {
                    Value::Array(_) => out.push_str("[...]"),
                    Value::Map(_) => out.push_str("{...}"),
                    Value::Seq(_) => out.push_str("(...)"),
                    Value::Object(obj) => {
                        out.push_str(&obj.class_name());
                        out.push_str("(...)");
                    }
                    _ => out.push_str("..."),
                }
                return;
            }
            visiting.push(key);
        }
        match self {
            Value::Nil => out.push_str("Nil"),
            Value::Bool(true) => out.push_str("True"),
            Value::Bool(false) => out.push_str("False"),
            Value::Int(i) => out.push_str(&i.to_string()),
            Value::BigInt(i) => out.push_str(&i.to_string()),
            Value::Num(n) => out.push_str(&n.to_string()),
            Value::Str(s) => out.push_str(s),
            Value::Array(arr) => {
                out.push('[');
                for (i, elem) in arr.items().iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    elem.gist_into(out, visiting);
                }
                out.push(']');
            }
            Value::Pair(key, value) => {
                key.gist_into(out, visiting);
                out.push_str(" => ");
                value.gist_into(out, visiting);
            }
            Value::Map(map) => {
                out.push('{');
                for (i, (key, value)) in map.entries().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    key.gist_into(out, visiting);
                    out.push_str(" => ");
                    value.gist_into(out, visiting);
                }
                out.push('}');
            }
            Value::Seq(seq) => {
                if seq.kind() == SeqKind::Set {
                    out.push_str("set");
                }
                out.push('(');
                for (i, elem) in seq.items().iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    elem.gist_into(out, visiting);
                }
                out.push(')');
            }
            Value::Object(obj) => {
                out.push_str(&obj.class_name());
                out.push('(');
                for (i, attr) in obj.class().all_attributes().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(&attr.name);
                    out.push_str(" => ");
                    obj.field_at(i).gist_into(out, visiting);
                }
                out.push(')');
            }
        }
        if let Some(key) = self.identity_key() {
            let popped = visiting.pop();
            debug_assert_eq!(popped, Some(key));
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gist())
    }
}

#[cfg(test)]
mod tests {
    use crate::value::{ArrayRef, MapKind, MapRef, SeqKind, SeqRef, Value};

    #[test]
    fn scalars_render_plainly() {
        assert_eq!(Value::Nil.gist(), "Nil");
        assert_eq!(Value::Bool(true).gist(), "True");
        assert_eq!(Value::Int(-3).gist(), "-3");
        assert_eq!(Value::str("hi").gist(), "hi");
    }

    #[test]
    fn containers_render_with_delimiters() {
        let arr = Value::Array(ArrayRef::new(vec![Value::Int(1), Value::Int(2)]));
        assert_eq!(arr.gist(), "[1 2]");
        let set = Value::Seq(SeqRef::frozen(SeqKind::Set, vec![Value::str("a")]));
        assert_eq!(set.gist(), "set(a)");
        let map = MapRef::new(MapKind::Hash);
        map.insert(Value::str("k"), Value::Int(1));
        assert_eq!(Value::Map(map).gist(), "{k => 1}");
    }

    #[test]
    fn cyclic_array_renders_finitely() {
        let arr = ArrayRef::new(vec![Value::Nil]);
        arr.set(0, Value::Array(arr.clone()));
        assert_eq!(Value::Array(arr).gist(), "[[...]]");
    }
}
