mod common;

use common::{as_object, friends_of, man_class, new_man};
use utsushi::{deep_copy, ArrayRef, MapKind, MapRef, SeqRef, Value};

#[test]
fn self_referential_friend_map_terminates() {
    let man = man_class();
    let sam = new_man(&man, "Sam", 40, vec![]);
    friends_of(&sam).insert(Value::str("Sam"), sam.clone());

    let copy = deep_copy(&sam).expect("copy self-referential graph");

    // The back-edge lands on the copy itself, not on a second copy.
    let self_entry = friends_of(&copy).get_str("Sam").expect("self entry");
    assert!(self_entry.same_identity(&copy));
    assert!(!self_entry.same_identity(&sam));
}

#[test]
fn mutual_friend_cycle_terminates() {
    let man = man_class();
    let sam = new_man(&man, "Sam", 40, vec![]);
    let jason = new_man(&man, "Jason", 35, vec![]);
    friends_of(&sam).insert(Value::str("Jason"), jason.clone());
    friends_of(&jason).insert(Value::str("Sam"), sam.clone());

    let copy = deep_copy(&sam).expect("copy mutual cycle");

    let copied_jason = friends_of(&copy).get_str("Jason").expect("copied Jason");
    let back = friends_of(&copied_jason).get_str("Sam").expect("back-edge");
    assert!(back.same_identity(&copy));
    assert_eq!(as_object(&copied_jason).get("name"), Some(Value::str("Jason")));
}

#[test]
fn shared_subobject_stays_shared() {
    let man = man_class();
    let sam = new_man(&man, "Sam", 40, vec![]);
    let jason = new_man(&man, "Jason", 35, vec![]);
    let michael = new_man(&man, "Michael", 40, vec![]);
    // Two paths to the same node.
    friends_of(&sam).insert(Value::str("Jason"), jason.clone());
    friends_of(&michael).insert(Value::str("Jason"), jason.clone());
    friends_of(&sam).insert(Value::str("Michael"), michael);

    let copy = deep_copy(&sam).expect("copy shared graph");

    let direct = friends_of(&copy).get_str("Jason").expect("direct path");
    let copied_michael = friends_of(&copy).get_str("Michael").expect("Michael");
    let via_michael = friends_of(&copied_michael)
        .get_str("Jason")
        .expect("path via Michael");
    assert!(direct.same_identity(&via_michael));
    assert!(!direct.same_identity(&jason));
}

#[test]
fn cycle_through_array_terminates() {
    let arr = ArrayRef::new(vec![Value::Int(1), Value::Nil]);
    arr.set(1, Value::Array(arr.clone()));

    let copy = match deep_copy(&Value::Array(arr.clone())).expect("copy cyclic array") {
        Value::Array(copy) => copy,
        other => panic!("expected an Array, got {}", other.type_name()),
    };

    assert!(!copy.ptr_eq(&arr));
    assert_eq!(copy.get(0), Some(Value::Int(1)));
    match copy.get(1) {
        Some(Value::Array(inner)) => assert!(inner.ptr_eq(&copy)),
        other => panic!("expected the copy itself, got {:?}", other),
    }
}

#[test]
fn cycle_through_map_terminates() {
    let map = MapRef::new(MapKind::Hash);
    map.insert(Value::str("self"), Value::Map(map.clone()));

    let copy = match deep_copy(&Value::Map(map.clone())).expect("copy cyclic map") {
        Value::Map(copy) => copy,
        other => panic!("expected a Map, got {}", other.type_name()),
    };

    assert!(!copy.ptr_eq(&map));
    match copy.get_str("self") {
        Some(Value::Map(inner)) => assert!(inner.ptr_eq(&copy)),
        other => panic!("expected the copy itself, got {:?}", other),
    }
}

#[test]
fn cycle_through_collection_terminates() {
    let seq = SeqRef::list_of(vec![Value::str("head")]);
    seq.push(Value::Seq(seq.clone()));

    let copy = match deep_copy(&Value::Seq(seq.clone())).expect("copy cyclic collection") {
        Value::Seq(copy) => copy,
        other => panic!("expected a Seq, got {}", other.type_name()),
    };

    assert!(!copy.ptr_eq(&seq));
    match copy.get(1) {
        Some(Value::Seq(inner)) => assert!(inner.ptr_eq(&copy)),
        other => panic!("expected the copy itself, got {:?}", other),
    }
}

#[test]
fn shared_list_between_two_fields_stays_shared() {
    let shared = SeqRef::list_of(vec![Value::Int(1), Value::Int(2)]);
    let holder = ArrayRef::new(vec![
        Value::Seq(shared.clone()),
        Value::Seq(shared.clone()),
    ]);

    let copy = match deep_copy(&Value::Array(holder)).expect("copy aliased graph") {
        Value::Array(copy) => copy,
        other => panic!("expected an Array, got {}", other.type_name()),
    };

    match (copy.get(0), copy.get(1)) {
        (Some(Value::Seq(a)), Some(Value::Seq(b))) => {
            assert!(a.ptr_eq(&b));
            assert!(!a.ptr_eq(&shared));
        }
        other => panic!("expected two Seq elements, got {:?}", other),
    }
}
