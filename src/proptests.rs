use crate::error::TreeError;
use crate::rbtree::Tree;
use crate::tree::SortedCollection;

use proptest::prelude::*;
use std::collections::BTreeSet;

#[derive(Clone, Debug)]
enum Op {
    Insert(i16),
    Remove(i16),
    Contains(i16),
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    // a narrow key range so removes and duplicates actually hit
    let key = -64i16..64;
    let op = prop_oneof![
        50 => key.clone().prop_map(Op::Insert),
        25 => key.clone().prop_map(Op::Remove),
        25 => key.prop_map(Op::Contains),
    ];
    prop::collection::vec(op, 0..=400)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence(ops in ops_strategy()) {
        let mut t: Tree<i16> = Tree::new();
        let mut m: BTreeSet<i16> = BTreeSet::new();
        let mut removed_any = false;

        for op in ops {
            match op {
                Op::Insert(v) => {
                    let expected = if m.insert(v) { Ok(()) } else { Err(TreeError::DuplicateValue) };
                    prop_assert_eq!(t.insert(v), expected);
                }
                Op::Remove(v) => {
                    let expected = if m.remove(&v) { Ok(v) } else { Err(TreeError::ValueNotFound) };
                    removed_any |= expected.is_ok();
                    prop_assert_eq!(t.remove(&v), expected);
                }
                Op::Contains(v) => {
                    prop_assert_eq!(t.contains(&v), m.contains(&v));
                }
            }

            let audit = t.audit();
            prop_assert_eq!(audit.reachable, t.len());
            prop_assert_eq!(t.len(), m.len());
            prop_assert!(audit.ordered);
            prop_assert!(audit.parents_consistent);
            if !removed_any {
                prop_assert!(audit.is_red_black(), "{:?}", audit);
            }
        }

        prop_assert!(t.iter().eq(m.iter()));
    }

    #[test]
    fn prop_insert_only_height_bound(values in prop::collection::btree_set(any::<i32>(), 0..=2000)) {
        let mut t = Tree::new();
        for &v in values.iter().rev() {
            t.insert(v).unwrap();
        }
        let bound = 2.0 * ((t.len() + 1) as f64).log2();
        prop_assert!(t.height() as f64 <= bound);
        prop_assert!(t.audit().is_red_black());
    }
}
