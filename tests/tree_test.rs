//! Structural behavior of BookmarkTree: attach, detach, ordering, release.

use bmtree::domain::{
    parse_position, BookmarkKind, BookmarkTree, DomainError, InvalidOperation, NodeId,
    TreeNodeConvert,
};
use bmtree::util::testing;
use rstest::{fixture, rstest};

fn titled(tree: &mut BookmarkTree, kind: BookmarkKind, title: &str) -> NodeId {
    let id = tree.create_node(kind);
    tree.node_mut(id).unwrap().set_title(title);
    id
}

fn titles(tree: &BookmarkTree, parent: NodeId) -> Vec<String> {
    tree.children(parent)
        .unwrap()
        .iter()
        .map(|&c| tree.node(c).unwrap().title().to_string())
        .collect()
}

/// root
/// └── Folder
///     ├── a
///     └── b
#[fixture]
fn folder_with_two() -> (BookmarkTree, NodeId, NodeId, NodeId) {
    testing::init_test_setup();
    let mut tree = BookmarkTree::new();
    let folder = titled(&mut tree, BookmarkKind::Folder, "Folder");
    let a = titled(&mut tree, BookmarkKind::Url, "a");
    let b = titled(&mut tree, BookmarkKind::Url, "b");
    tree.add_child(tree.root(), folder, None).unwrap();
    tree.add_child(folder, a, None).unwrap();
    tree.add_child(folder, b, None).unwrap();
    (tree, folder, a, b)
}

// ============================================================
// Construction
// ============================================================

#[test]
fn given_new_tree_then_root_has_no_parent_and_no_children() {
    let tree = BookmarkTree::new();
    let root = tree.node(tree.root()).unwrap();
    assert_eq!(root.kind(), BookmarkKind::Root);
    assert!(root.is_root());
    assert_eq!(root.parent(), None);
    assert!(root.children().is_empty());
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.depth(), 1);
}

#[test]
fn given_created_node_then_it_is_detached() {
    let mut tree = BookmarkTree::new();
    let id = tree.create_node(BookmarkKind::Url);

    assert_eq!(tree.parent(id).unwrap(), None);
    assert!(tree.children(tree.root()).unwrap().is_empty());
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.attached_len(), 1);
    assert_eq!(tree.position_of(id).unwrap(), None);
}

#[test]
fn given_node_then_field_accessors_store_values_without_validation() {
    let mut tree = BookmarkTree::new();
    let id = tree.create_node(BookmarkKind::Folder);
    let node = tree.node_mut(id).unwrap();
    node.set_url("https://example.org/");
    node.set_title("Example");
    node.set_description("desc");
    node.set_keyword("ex");
    node.set_expanded(true);

    let node = tree.node(id).unwrap();
    assert!(node.is_folder());
    assert!(!node.is_url());
    assert!(!node.is_separator());
    assert_eq!(node.url(), "https://example.org/");
    assert_eq!(node.title(), "Example");
    assert_eq!(node.description(), "desc");
    assert_eq!(node.keyword(), "ex");
    assert!(node.is_expanded());
}

#[rstest]
fn given_folder_with_children_when_kind_changes_then_children_stay(
    folder_with_two: (BookmarkTree, NodeId, NodeId, NodeId),
) {
    let (mut tree, folder, a, b) = folder_with_two;
    tree.node_mut(folder).unwrap().set_kind(BookmarkKind::Separator);

    assert!(tree.node(folder).unwrap().is_separator());
    assert_eq!(tree.children(folder).unwrap(), &[a, b]);
}

// ============================================================
// add_child
// ============================================================

#[rstest]
#[case(Some(0), 0)]
#[case(Some(1), 1)]
#[case(Some(2), 2)]
#[case(Some(99), 2)]
#[case(None, 2)]
fn given_two_children_when_adding_at_index_then_position_is_clamped(
    folder_with_two: (BookmarkTree, NodeId, NodeId, NodeId),
    #[case] index: Option<usize>,
    #[case] expected: usize,
) {
    let (mut tree, folder, _, _) = folder_with_two;
    let c = titled(&mut tree, BookmarkKind::Url, "c");

    let position = tree.add_child(folder, c, index).unwrap();

    assert_eq!(position, expected);
    assert_eq!(tree.children(folder).unwrap()[expected], c);
    assert_eq!(tree.parent(c).unwrap(), Some(folder));
    assert_eq!(tree.children(folder).unwrap().len(), 3);
}

#[test]
fn given_empty_parent_when_inserting_at_0_0_1_then_order_is_b_c_a() {
    let mut tree = BookmarkTree::new();
    let root = tree.root();
    let a = titled(&mut tree, BookmarkKind::Url, "A");
    let b = titled(&mut tree, BookmarkKind::Url, "B");
    let c = titled(&mut tree, BookmarkKind::Url, "C");

    tree.add_child(root, a, Some(0)).unwrap();
    assert_eq!(titles(&tree, root), ["A"]);
    tree.add_child(root, b, Some(0)).unwrap();
    assert_eq!(titles(&tree, root), ["B", "A"]);
    tree.add_child(root, c, Some(1)).unwrap();
    assert_eq!(titles(&tree, root), ["B", "C", "A"]);
}

#[rstest]
fn given_attached_node_when_adding_elsewhere_then_already_attached(
    folder_with_two: (BookmarkTree, NodeId, NodeId, NodeId),
) {
    let (mut tree, folder, a, b) = folder_with_two;
    let root = tree.root();

    let err = tree.add_child(root, a, None).unwrap_err();

    assert_eq!(
        err,
        DomainError::InvalidOperation(InvalidOperation::AlreadyAttached {
            child: a,
            parent: folder
        })
    );
    assert_eq!(tree.children(folder).unwrap(), &[a, b]);
    assert_eq!(tree.children(root).unwrap(), &[folder]);
    assert_eq!(tree.parent(a).unwrap(), Some(folder));
}

#[rstest]
fn given_attached_node_when_adding_to_same_parent_again_then_no_duplicate(
    folder_with_two: (BookmarkTree, NodeId, NodeId, NodeId),
) {
    let (mut tree, folder, a, b) = folder_with_two;

    assert!(tree.add_child(folder, a, Some(0)).is_err());
    assert_eq!(tree.children(folder).unwrap(), &[a, b]);
}

#[test]
fn given_root_when_attaching_it_then_root_not_attachable() {
    let mut tree = BookmarkTree::new();
    let folder = tree.create_node(BookmarkKind::Folder);
    let root = tree.root();

    let err = tree.add_child(folder, root, None).unwrap_err();

    assert_eq!(
        err,
        DomainError::InvalidOperation(InvalidOperation::RootNotAttachable)
    );
}

#[rstest]
fn given_detached_folder_when_attaching_under_its_own_child_then_would_cycle(
    folder_with_two: (BookmarkTree, NodeId, NodeId, NodeId),
) {
    let (mut tree, folder, a, _) = folder_with_two;
    tree.remove_child(tree.root(), folder).unwrap();

    let err = tree.add_child(a, folder, None).unwrap_err();
    assert_eq!(
        err,
        DomainError::InvalidOperation(InvalidOperation::WouldCycle {
            parent: a,
            child: folder
        })
    );

    let err = tree.add_child(folder, folder, None).unwrap_err();
    assert!(matches!(
        err,
        DomainError::InvalidOperation(InvalidOperation::WouldCycle { .. })
    ));
}

// ============================================================
// remove_child
// ============================================================

#[rstest]
fn given_attached_child_when_removed_then_parent_cleared_and_siblings_shift(
    folder_with_two: (BookmarkTree, NodeId, NodeId, NodeId),
) {
    let (mut tree, folder, a, b) = folder_with_two;

    let former = tree.remove_child(folder, a).unwrap();

    assert_eq!(former, 0);
    assert_eq!(tree.parent(a).unwrap(), None);
    assert_eq!(tree.children(folder).unwrap(), &[b]);
    // Still alive, just detached
    assert!(tree.contains(a));
}

#[rstest]
fn given_non_child_when_removed_then_not_a_child_and_tree_unchanged(
    folder_with_two: (BookmarkTree, NodeId, NodeId, NodeId),
) {
    let (mut tree, folder, a, b) = folder_with_two;
    let root = tree.root();

    let err = tree.remove_child(root, a).unwrap_err();

    assert_eq!(
        err,
        DomainError::InvalidOperation(InvalidOperation::NotAChild { parent: root, child: a })
    );
    assert_eq!(tree.parent(a).unwrap(), Some(folder));
    assert_eq!(tree.children(folder).unwrap(), &[a, b]);
}

#[rstest]
fn given_removed_child_when_removed_again_then_not_a_child(
    folder_with_two: (BookmarkTree, NodeId, NodeId, NodeId),
) {
    let (mut tree, folder, a, _) = folder_with_two;
    tree.remove_child(folder, a).unwrap();

    assert!(matches!(
        tree.remove_child(folder, a),
        Err(DomainError::InvalidOperation(InvalidOperation::NotAChild { .. }))
    ));
}

#[rstest]
fn given_folder_with_children_when_removed_then_detach_does_not_cascade(
    folder_with_two: (BookmarkTree, NodeId, NodeId, NodeId),
) {
    let (mut tree, folder, a, b) = folder_with_two;
    let root = tree.root();

    tree.remove_child(root, folder).unwrap();

    assert_eq!(tree.parent(folder).unwrap(), None);
    assert_eq!(tree.parent(a).unwrap(), Some(folder));
    assert_eq!(tree.parent(b).unwrap(), Some(folder));
    assert_eq!(tree.children(folder).unwrap(), &[a, b]);
    assert_eq!(tree.attached_len(), 1);
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.position_of(a).unwrap(), None);

    // The subtree can be attached again as a whole
    tree.add_child(root, folder, None).unwrap();
    assert_eq!(tree.position_of(b).unwrap(), Some(vec![0, 1]));
}

#[rstest]
fn given_detached_child_when_reattached_elsewhere_then_succeeds(
    folder_with_two: (BookmarkTree, NodeId, NodeId, NodeId),
) {
    let (mut tree, folder, a, _) = folder_with_two;
    let root = tree.root();

    tree.remove_child(folder, a).unwrap();
    tree.add_child(root, a, Some(0)).unwrap();

    assert_eq!(tree.children(root).unwrap(), &[a, folder]);
    assert_eq!(tree.parent(a).unwrap(), Some(root));
}

// ============================================================
// move_node and release
// ============================================================

#[rstest]
fn given_sibling_when_moved_within_parent_then_index_counts_after_removal(
    folder_with_two: (BookmarkTree, NodeId, NodeId, NodeId),
) {
    let (mut tree, folder, a, b) = folder_with_two;
    let c = titled(&mut tree, BookmarkKind::Url, "c");
    tree.add_child(folder, c, None).unwrap();

    let position = tree.move_node(a, folder, Some(1)).unwrap();

    assert_eq!(position, 1);
    assert_eq!(tree.children(folder).unwrap(), &[b, a, c]);
}

#[rstest]
fn given_folder_when_moved_into_own_child_then_rejected_without_change(
    folder_with_two: (BookmarkTree, NodeId, NodeId, NodeId),
) {
    let (mut tree, folder, a, b) = folder_with_two;
    let root = tree.root();

    assert!(tree.move_node(folder, a, None).is_err());
    assert!(tree.move_node(root, folder, None).is_err());

    assert_eq!(tree.parent(folder).unwrap(), Some(root));
    assert_eq!(tree.children(folder).unwrap(), &[a, b]);
}

#[rstest]
fn given_detached_node_when_moved_then_it_is_attached(
    folder_with_two: (BookmarkTree, NodeId, NodeId, NodeId),
) {
    let (mut tree, folder, _, _) = folder_with_two;
    let loose = tree.create_node(BookmarkKind::Separator);

    assert_eq!(tree.move_node(loose, folder, Some(0)).unwrap(), 0);
    assert_eq!(tree.parent(loose).unwrap(), Some(folder));
}

#[rstest]
fn given_detached_subtree_when_released_then_all_nodes_are_freed(
    folder_with_two: (BookmarkTree, NodeId, NodeId, NodeId),
) {
    let (mut tree, folder, a, b) = folder_with_two;
    let root = tree.root();

    assert_eq!(
        tree.release(folder).unwrap_err(),
        DomainError::InvalidOperation(InvalidOperation::StillAttached(folder))
    );

    tree.remove_child(root, folder).unwrap();
    assert_eq!(tree.release(folder).unwrap(), 3);

    assert_eq!(tree.len(), 1);
    for id in [folder, a, b] {
        assert!(!tree.contains(id));
        assert_eq!(tree.node(id).unwrap_err(), DomainError::NodeNotFound(id));
    }
}

#[test]
fn given_released_node_when_slot_reused_then_old_handle_stays_invalid() {
    let mut tree = BookmarkTree::new();
    let old = tree.create_node(BookmarkKind::Url);
    tree.release(old).unwrap();
    let new = tree.create_node(BookmarkKind::Url);

    assert_ne!(old, new);
    assert!(tree.get(old).is_none());
    assert!(tree.add_child(tree.root(), old, None).is_err());
}

#[test]
fn given_root_when_released_then_release_root() {
    let mut tree = BookmarkTree::new();
    let root = tree.root();
    assert_eq!(
        tree.release(root).unwrap_err(),
        DomainError::InvalidOperation(InvalidOperation::ReleaseRoot)
    );
}

// ============================================================
// Traversal and positions
// ============================================================

#[rstest]
fn given_tree_then_preorder_and_postorder_visit_in_display_order(
    folder_with_two: (BookmarkTree, NodeId, NodeId, NodeId),
) {
    let (mut tree, folder, a, b) = folder_with_two;
    let root = tree.root();
    let sep = tree.create_node(BookmarkKind::Separator);
    tree.add_child(root, sep, None).unwrap();

    let pre: Vec<NodeId> = tree.iter().map(|(id, _)| id).collect();
    let post: Vec<NodeId> = tree.iter_postorder().map(|(id, _)| id).collect();
    let sub: Vec<NodeId> = tree.iter_from(folder).map(|(id, _)| id).collect();

    assert_eq!(pre, vec![root, folder, a, b, sep]);
    assert_eq!(post, vec![a, b, folder, sep, root]);
    assert_eq!(sub, vec![folder, a, b]);
    assert_eq!(tree.depth(), 3);
}

#[rstest]
fn given_tree_then_positions_resolve_both_ways(
    folder_with_two: (BookmarkTree, NodeId, NodeId, NodeId),
) {
    let (tree, folder, _, b) = folder_with_two;

    assert_eq!(tree.resolve_position(&[]).unwrap(), tree.root());
    assert_eq!(tree.resolve_position(&[0]).unwrap(), folder);
    assert_eq!(tree.resolve_position(&parse_position("0.1").unwrap()).unwrap(), b);
    assert_eq!(tree.position_of(b).unwrap(), Some(vec![0, 1]));
    assert_eq!(tree.index_of(folder, b), Some(1));

    assert_eq!(
        tree.resolve_position(&[0, 5]).unwrap_err(),
        DomainError::InvalidPosition {
            position: "0.5".to_string()
        }
    );
}

#[rstest]
fn given_tree_then_renders_labels_in_order(
    folder_with_two: (BookmarkTree, NodeId, NodeId, NodeId),
) {
    let (mut tree, _, a, _) = folder_with_two;
    tree.node_mut(a).unwrap().set_url("https://a.example/");

    let rendered = tree.to_tree_string().to_string();

    assert!(rendered.starts_with("Bookmarks"));
    assert!(rendered.contains("Folder/"));
    assert!(rendered.contains("a <https://a.example/>"));
    assert!(rendered.find("a <").unwrap() < rendered.find("b <").unwrap());
}
