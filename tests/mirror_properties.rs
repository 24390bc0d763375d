//! Property tests: any pair of trees converges to a mirror, and a second run
//! changes nothing.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use dirmirror::{MirrorOptions, mirror};
use proptest::prelude::*;
use test_support::{assert_mirrors, setup_mirror_test_with_dest, snapshot_tree};

/// Small fixed name pool so that source and destination trees collide often.
const NAMES: [&str; 4] = ["a", "b", "c", "d"];

#[derive(Clone, Debug)]
enum Node {
    File(Vec<u8>),
    Dir(BTreeMap<usize, Node>),
}

fn node_strategy() -> impl Strategy<Value = Node> {
    let leaf = prop::collection::vec(any::<u8>(), 0..16).prop_map(Node::File);
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop::collection::btree_map(0..NAMES.len(), inner, 0..4).prop_map(Node::Dir)
    })
}

fn tree_strategy() -> impl Strategy<Value = BTreeMap<usize, Node>> {
    prop::collection::btree_map(0..NAMES.len(), node_strategy(), 0..4)
}

fn materialize(root: &Path, children: &BTreeMap<usize, Node>) {
    fs::create_dir_all(root).expect("create dir");
    for (index, node) in children {
        let path = root.join(NAMES[*index]);
        match node {
            Node::File(content) => fs::write(&path, content).expect("write file"),
            Node::Dir(grandchildren) => materialize(&path, grandchildren),
        }
    }
}

/// Reports whether a destination directory sits where the source has a file.
///
/// Without pruning such a directory survives and the file is never copied.
fn shadows_a_source_file(source: &BTreeMap<usize, Node>, dest: &BTreeMap<usize, Node>) -> bool {
    source.iter().any(|(index, node)| match (node, dest.get(index)) {
        (Node::File(_), Some(Node::Dir(_))) => true,
        (Node::Dir(source_children), Some(Node::Dir(dest_children))) => {
            shadows_a_source_file(source_children, dest_children)
        }
        _ => false,
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn mirror_converges_and_is_idempotent(
        source in tree_strategy(),
        dest in tree_strategy(),
        prune in any::<bool>(),
        buffer in 1usize..64,
    ) {
        prop_assume!(prune || !shadows_a_source_file(&source, &dest));

        let ctx = setup_mirror_test_with_dest();
        materialize(&ctx.source, &source);
        materialize(&ctx.dest, &dest);
        let options = MirrorOptions::new()
            .digest_buffer_size(buffer)
            .prune_empty_directories(prune);

        let source_before = snapshot_tree(&ctx.source);
        mirror(&ctx.source, &ctx.dest, &options).expect("first run");

        assert_mirrors(&ctx.source, &ctx.dest);
        prop_assert_eq!(snapshot_tree(&ctx.source), source_before);

        let dest_after_first = snapshot_tree(&ctx.dest);
        let second = mirror(&ctx.source, &ctx.dest, &options).expect("second run");
        prop_assert!(second.is_noop());
        prop_assert_eq!(snapshot_tree(&ctx.dest), dest_after_first);
    }
}
