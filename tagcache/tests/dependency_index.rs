use tagcache::DependencyIndex;

fn sorted<'a>(members: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut members = members.collect::<Vec<_>>();
    members.sort_unstable();
    members
}

#[test]
fn add_member_is_a_union() {
    let mut index = DependencyIndex::new();

    assert!(index.add_member("t1", "k1"));
    assert!(index.add_member("t1", "k2"));
    assert!(!index.add_member("t1", "k1"));

    assert_eq!(sorted(index.members("t1")), ["k1", "k2"]);
}

#[test]
fn unknown_tag_has_no_members() {
    let index = DependencyIndex::new();

    assert_eq!(index.members("nope").count(), 0);
    assert!(!index.contains_tag("nope"));
}

#[test]
fn remove_tag_drops_every_member() {
    let mut index = DependencyIndex::new();
    index.add_member("t1", "k1");
    index.add_member("t1", "k2");
    index.add_member("t2", "k1");

    let removed = index.remove_tag("t1").unwrap_or_default();

    assert_eq!(removed.len(), 2);
    assert!(!index.contains_tag("t1"));
    assert_eq!(sorted(index.members("t2")), ["k1"]);
    assert!(index.remove_tag("t1").is_none());
}

#[test]
fn forget_key_leaves_every_tag() {
    let mut index = DependencyIndex::new();
    index.add_member("t1", "k1");
    index.add_member("t2", "k1");
    index.add_member("t2", "k2");

    index.forget_key("k1");

    assert!(!index.contains_tag("t1"));
    assert_eq!(sorted(index.members("t2")), ["k2"]);

    index.forget_key("k1");
    index.forget_key("never-added");
    assert_eq!(sorted(index.members("t2")), ["k2"]);
}

#[test]
fn forget_key_after_remove_tag_spares_the_removed_tag() {
    let mut index = DependencyIndex::new();
    index.add_member("t1", "k1");
    index.add_member("t2", "k1");

    let removed = index.remove_tag("t1").unwrap_or_default();
    for key in &removed {
        index.forget_key(key);
    }

    assert!(!index.contains_tag("t2"));

    // a fresh membership under the removed tag is not confused with the old one
    index.add_member("t1", "k1");
    assert_eq!(sorted(index.members("t1")), ["k1"]);
    assert!(!index.contains_tag("t2"));
}

#[test]
fn clear_forgets_all_tags() {
    let mut index = DependencyIndex::new();
    index.add_member("t1", "k1");
    index.add_member("t2", "k2");

    index.clear();

    assert!(!index.contains_tag("t1"));
    assert!(!index.contains_tag("t2"));

    index.forget_key("k1");
    assert!(index.add_member("t1", "k1"));
}
