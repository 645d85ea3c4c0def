use tagcache::{Cached, MemoryStore, Tag, ValueStore};

#[test]
fn null_is_not_a_value() {
    let null = Cached::<Option<u8>>::NULL;
    let some_none = Cached::Value(None::<u8>);

    assert!(null.is_null());
    assert!(!some_none.is_null());
    assert_ne!(null, some_none);
    assert_eq!(some_none.value(), Some(&None));
}

#[test]
fn option_conversions() {
    assert_eq!(Cached::from(Some(3)), Cached::Value(3));
    assert_eq!(Cached::<i32>::from(None), Cached::NULL);
    assert_eq!(Cached::Value("a").into_value(), Some("a"));
    assert_eq!(Cached::<&str>::Null.into_value(), None);
}

#[test]
fn map_keeps_null() {
    assert_eq!(Cached::Value(2).map(|v| v * 10), Cached::Value(20));
    assert_eq!(Cached::<i32>::NULL.map(|v| v * 10), Cached::NULL);
}

#[test]
fn blank_ids() {
    assert!("".is_blank());
    assert!("  \t".is_blank());
    assert!(!" t1 ".is_blank());
    assert!(String::new().is_blank());
}

#[test]
fn boxed_and_borrowed_tags_share_the_id() {
    let owned = String::from("users");
    let boxed: Box<dyn Tag> = Box::new(owned.clone());

    assert_eq!(boxed.id(), "users");
    assert_eq!((&owned).id(), "users");
    assert_eq!(Tag::id("users"), "users");
}

#[test]
fn memory_store_contract() {
    let mut store = MemoryStore::<&str>::new();

    store.set("a".into(), Cached::Value("x")).unwrap();
    store.set("b".into(), Cached::NULL).unwrap();

    assert_eq!(ValueStore::get(&store, "a").unwrap(), Some(Cached::Value("x")));
    assert_eq!(ValueStore::get(&store, "b").unwrap(), Some(Cached::NULL));
    assert_eq!(ValueStore::get(&store, "A").unwrap(), None);
    assert_eq!(ValueStore::get(&store, "a ").unwrap(), None);

    ValueStore::remove(&mut store, "a").unwrap();
    ValueStore::remove(&mut store, "a").unwrap();
    assert_eq!(ValueStore::get(&store, "a").unwrap(), None);

    ValueStore::clear(&mut store).unwrap();
    assert!(store.is_empty());
}
