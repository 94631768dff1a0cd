use std::collections::BTreeMap;

use proptest::prelude::*;

use super::*;

use crate::{
    Error, SearchTree,
    sequencer::{AnyTree, Kind, Operation}
};

fn kind_strategy() -> impl Strategy<Value = Kind> {
    prop_oneof![
        Just(Kind::Bst),
        Just(Kind::Avl),
        Just(Kind::RedBlack),
        (2usize..5).prop_map( |degree| Kind::BTree { degree } )
    ]
}
fn operation_strategy() -> impl Strategy<Value = Operation> {
    (proptest::bool::weighted(0.6), -40..40 as Value)
        .prop_map( |(insert, value)| Operation { value, insert } )
}
fn operations() -> impl Strategy<Value = Vec<Operation>> {
    proptest::collection::vec(operation_strategy(), 0..120)
}

/// Structure and order of a snapshot, balance is only promised between operations.
fn check_snapshot(snapshot: &AnyTree) -> Result<(), Error> {
    match snapshot {
        AnyTree::Bst(tree) => tree.is_well_formed().and_then( |_| tree.is_ordered() ),
        AnyTree::Avl(tree) => tree.is_well_formed().and_then( |_| tree.is_ordered() ),
        AnyTree::RedBlack(tree) => tree.is_well_formed().and_then( |_| tree.is_ordered() ),
        AnyTree::BTree(tree) => tree.validate()
    }
}

/// Binary trees record the operation before repairing, b-trees after splitting or merging on the way down.
fn operation_step(kind: Kind, trace: &Trace<AnyTree>) -> Option<Action> {
    let step = match kind {
        Kind::BTree { .. } => trace.last(),
        _ => trace.steps().first()
    };
    step.map( |step| step.action )
}

fn check_against_multiset(kind: Kind, operations: &[Operation]) -> Result<(), TestCaseError> {
    let mut tree = kind.build().map_err( |e| TestCaseError::fail(e.to_string()) )?;
    let mut expected = BTreeMap::<Value, usize>::new();
    for op in operations {
        let before = tree.clone();
        let mut trace = Trace::new();
        if op.insert {
            tree.insert(op.value, &mut trace);
            *expected.entry(op.value).or_default() += 1;
            prop_assert_eq!(operation_step(kind, &trace), Some(Action::Insert(op.value)));
        } else {
            match expected.get_mut(&op.value) {
                Some(count) => {
                    tree.delete(op.value, &mut trace).map_err( |e| TestCaseError::fail(e.to_string()) )?;
                    *count -= 1;
                    if *count == 0 {
                        expected.remove(&op.value);
                    }
                    prop_assert_eq!(operation_step(kind, &trace), Some(Action::Delete(op.value)));
                },
                None => {
                    prop_assert_eq!(tree.delete(op.value, &mut trace), Err(Error::ValueNotFound(op.value)));
                    prop_assert!(trace.is_empty());
                    prop_assert_eq!(&tree, &before);
                }
            }
        }
        for (i, step) in trace.iter().enumerate() {
            if let Err(e) = check_snapshot(&step.snapshot) {
                return Err(TestCaseError::fail(format!("{op}, step {i} ({}): {e}", step.action)));
            }
        }
        if let Err(e) = tree.validate() {
            return Err(TestCaseError::fail(format!("{op}: {e}")));
        }
        let values = expected.iter()
            .flat_map( |(value, count)| std::iter::repeat(*value).take(*count) )
            .collect::<Vec<_>>();
        prop_assert_eq!(tree.values(), values);
        prop_assert_eq!(tree.len(), tree.values().len());
    }
    Ok(())
}

proptest::proptest! {
    #[test]
    fn matches_a_multiset(kind in kind_strategy(), operations in operations()) {
        check_against_multiset(kind, &operations)?;
    }

    #[test]
    fn traces_are_reproducible(kind in kind_strategy(), operations in operations()) {
        let run = || {
            let mut tree = kind.build().expect("valid kind");
            let mut trace = Trace::new();
            for op in &operations {
                if op.insert {
                    tree.insert(op.value, &mut trace);
                } else {
                    let _ = tree.delete(op.value, &mut trace);
                }
            }
            (tree, trace)
        };
        prop_assert_eq!(run(), run());
    }

    #[test]
    fn deleted_value_cannot_be_deleted_again(kind in kind_strategy(), mut values in proptest::collection::btree_set(-100..100 as Value, 1..60)) {
        let mut tree = kind.build().expect("valid kind");
        let mut trace = Trace::silent();
        for value in &values {
            tree.insert(*value, &mut trace);
        }
        while let Some(value) = values.pop_first() {
            prop_assert_eq!(tree.delete(value, &mut trace), Ok(()));
            prop_assert_eq!(tree.delete(value, &mut trace), Err(Error::ValueNotFound(value)));
            prop_assert!(tree.validate().is_ok());
        }
        prop_assert!(SearchTree::is_empty(&tree));
    }
}

proptest::proptest! {
    #![proptest_config(ProptestConfig {
        cases: 16, .. ProptestConfig::default()
    })]
    #[test]
    fn avl_height_stays_logarithmic(values in proptest::collection::vec(-1000..1000 as Value, 1..400)) {
        let tree: crate::tree::AvlTree = build(&values);
        let n = values.len() as f64;
        // an avl tree of height h holds at least fib(h + 3) - 1 nodes
        let bound = 1.45 * (n + 2.0).log2();
        prop_assert!((tree.height(tree.root()) as f64) < bound);
    }

    #[test]
    fn red_black_height_stays_logarithmic(values in proptest::collection::vec(-1000..1000 as Value, 1..400)) {
        let tree: RbTree = build(&values);
        let n = values.len() as f64;
        prop_assert!((tree.height(tree.root()) as f64) <= 2.0 * (n + 1.0).log2());
    }
}
