#![allow(dead_code)]

use std::rc::Rc;

use utsushi::{ClassSpec, CopyError, MapKind, MapRef, ObjectRef, SeqRef, TypeHint, Value};

/// Sample entity mirroring the demo: name, age, favorite-books list, and a
/// name-to-friend map. The specific three-argument constructor is declared
/// first, the no-arg defaults path second.
pub fn man_class() -> Rc<ClassSpec> {
    ClassSpec::builder("Man")
        .attribute("name")
        .attribute("age")
        .attribute("favorite-books")
        .private_attribute("friends")
        .constructor(
            vec![TypeHint::Str, TypeHint::Int, TypeHint::Seq],
            |class, args| {
                if args.len() != 3 {
                    return Err(CopyError::reconstruction(
                        class.name(),
                        "Man constructor takes name, age, favorite-books",
                    ));
                }
                Ok(Value::Object(ObjectRef::new(
                    Rc::clone(class),
                    vec![
                        args[0].clone(),
                        args[1].clone(),
                        args[2].clone(),
                        Value::Map(MapRef::new(MapKind::Hash)),
                    ],
                )))
            },
        )
        .constructor(vec![], |class, _args| {
            Ok(Value::Object(ObjectRef::new(
                Rc::clone(class),
                vec![
                    Value::str("John"),
                    Value::Int(40),
                    Value::Seq(SeqRef::list_of(vec![
                        Value::str("90 days around the world"),
                        Value::str("Harry potter"),
                        Value::str("Little Price"),
                    ])),
                    Value::Map(MapRef::new(MapKind::Hash)),
                ],
            )))
        })
        .build()
}

pub fn new_man(class: &Rc<ClassSpec>, name: &str, age: i64, books: Vec<&str>) -> Value {
    let books = SeqRef::list_of(books.into_iter().map(Value::str).collect());
    class.constructors()[0]
        .invoke(
            class,
            &[Value::str(name), Value::Int(age), Value::Seq(books)],
        )
        .expect("build a Man")
}

pub fn as_object(value: &Value) -> ObjectRef {
    match value {
        Value::Object(obj) => obj.clone(),
        other => panic!("expected an object, got {}", other.type_name()),
    }
}

pub fn friends_of(man: &Value) -> MapRef {
    match as_object(man).get("friends") {
        Some(Value::Map(map)) => map,
        _ => panic!("Man has no friends map"),
    }
}

pub fn books_of(man: &Value) -> SeqRef {
    match as_object(man).get("favorite-books") {
        Some(Value::Seq(seq)) => seq,
        _ => panic!("Man has no favorite-books list"),
    }
}
