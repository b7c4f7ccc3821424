use std::process;
use std::rc::Rc;

use utsushi::{
    deep_copy, ClassSpec, CopyError, MapKind, MapRef, ObjectRef, SeqKind, SeqRef, TypeHint, Value,
};

fn print_error(prefix: &str, err: &CopyError) {
    eprintln!("{}: {}", prefix, err.message);
    let mut meta = vec![format!("code={}", err.code)];
    if let Some(class_name) = &err.class_name {
        meta.push(format!("class={}", class_name));
    }
    eprintln!("{} metadata: {}", prefix, meta.join(", "));
}

/// The sample entity: name, age, a favorite-books list, and a name-to-friend
/// map. Two construction paths, declared most-specific first.
fn man_class() -> Rc<ClassSpec> {
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
                    Value::Seq(book_list(&[
                        "90 days around the world",
                        "Harry potter",
                        "Little Price",
                    ])),
                    Value::Map(MapRef::new(MapKind::Hash)),
                ],
            )))
        })
        .build()
}

/// Frozen lists stand in for known-unmodifiable collections; the engine
/// passes them through by reference.
fn book_list(titles: &[&str]) -> SeqRef {
    SeqRef::frozen(SeqKind::List, titles.iter().map(|t| Value::str(t)).collect())
}

fn new_man(class: &Rc<ClassSpec>, name: &str, age: i64, books: SeqRef) -> Value {
    match class.constructors()[0].invoke(
        class,
        &[Value::str(name), Value::Int(age), Value::Seq(books)],
    ) {
        Ok(man) => man,
        Err(err) => {
            print_error("utsushi", &err);
            process::exit(1);
        }
    }
}

fn friends_map(man: &Value) -> MapRef {
    match man {
        Value::Object(obj) => match obj.get("friends") {
            Some(Value::Map(map)) => map,
            _ => unreachable!("Man always has a friends map"),
        },
        _ => unreachable!("expected a Man object"),
    }
}

fn main() {
    let man = man_class();

    let sam = new_man(
        &man,
        "Sam",
        40,
        book_list(&["90 days, around the world", "Harry potter", "Little Price"]),
    );
    let jason = new_man(
        &man,
        "Jason",
        35,
        book_list(&["Nebula Raging", "The Gun in the Village", "Birds of a Feather"]),
    );
    let michael = new_man(
        &man,
        "Michael",
        40,
        book_list(&["Saturn Firing", "Dirty Sheets", "Built for Pleasure"]),
    );

    let sam_friends = friends_map(&sam);
    sam_friends.insert(Value::str("Jason"), jason);
    sam_friends.insert(Value::str("Michael"), michael);

    let copy = match deep_copy(&sam) {
        Ok(copy) => copy,
        Err(err) => {
            print_error("utsushi", &err);
            process::exit(1);
        }
    };

    println!("Original: {}", sam);
    println!("Copy: {}", copy);

    // Mutating the copy's friend map leaves the original untouched.
    friends_map(&copy).insert(Value::str("John"), new_man(&man, "John", 40, book_list(&[])));
    println!(
        "After adding a friend to the copy: original has {}, copy has {}",
        sam_friends.len(),
        friends_map(&copy).len()
    );
}
