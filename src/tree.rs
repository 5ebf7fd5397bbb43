//! Page Tree Utilities
//!
//! Client-side reconstruction of the page hierarchy from the flat
//! list the backend returns. The tree is rebuilt in full after every
//! mutation; nodes are never patched incrementally.

use crate::models::{Page, PageTreeNode, HOME_PAGE_ID};
use std::collections::{HashMap, HashSet};

/// Build a rooted forest from an unordered flat list.
///
/// Two passes: group pages by parent, then attach recursively from the
/// roots. Pages whose `parent_id` references a missing id are silently
/// dropped. Siblings sort by case-insensitive title, except the home
/// page which always sorts first.
pub fn build_page_tree(pages: &[Page]) -> Vec<PageTreeNode> {
    let ids: HashSet<u32> = pages.iter().map(|p| p.id).collect();

    let mut children_map: HashMap<Option<u32>, Vec<&Page>> = HashMap::new();
    for page in pages {
        if let Some(pid) = page.parent_id {
            if !ids.contains(&pid) {
                continue; // orphan
            }
        }
        children_map.entry(page.parent_id).or_default().push(page);
    }

    fn collect(
        parent_id: Option<u32>,
        children_map: &HashMap<Option<u32>, Vec<&Page>>,
    ) -> Vec<PageTreeNode> {
        let mut nodes: Vec<PageTreeNode> = children_map
            .get(&parent_id)
            .map(|pages| {
                pages
                    .iter()
                    .map(|page| PageTreeNode {
                        page: (*page).clone(),
                        children: collect(Some(page.id), children_map),
                        is_expanded: page.id == HOME_PAGE_ID,
                    })
                    .collect()
            })
            .unwrap_or_default();
        nodes.sort_by_key(|n| (!n.page.is_home(), n.page.title.to_lowercase()));
        nodes
    }

    collect(None, &children_map)
}

/// Render order as (page, depth) pairs using recursive DFS,
/// skipping the children of collapsed nodes.
pub fn flatten_tree(roots: &[PageTreeNode]) -> Vec<(Page, usize)> {
    fn walk(nodes: &[PageTreeNode], depth: usize, out: &mut Vec<(Page, usize)>) {
        for node in nodes {
            out.push((node.page.clone(), depth));
            if node.is_expanded {
                walk(&node.children, depth + 1, out);
            }
        }
    }
    let mut out = Vec::new();
    walk(roots, 0, &mut out);
    out
}

/// Full flatten ignoring expansion state. `build_page_tree` of the
/// result reproduces the same forest.
pub fn flatten_all(roots: &[PageTreeNode]) -> Vec<Page> {
    fn walk(nodes: &[PageTreeNode], out: &mut Vec<Page>) {
        for node in nodes {
            out.push(node.page.clone());
            walk(&node.children, out);
        }
    }
    let mut out = Vec::new();
    walk(roots, &mut out);
    out
}

/// Overlay UI expansion state onto a freshly built forest. The home
/// root stays expanded regardless.
pub fn apply_expansion(nodes: &mut [PageTreeNode], expanded: &HashSet<u32>) {
    for node in nodes {
        node.is_expanded = node.page.is_home() || expanded.contains(&node.page.id);
        apply_expansion(&mut node.children, expanded);
    }
}

/// Prune the forest to nodes matching `query` (case-insensitive
/// substring on title or description) plus all ancestors of matches.
/// Retained nodes are forced expanded so matches stay visible.
/// An empty or whitespace query returns the input unchanged.
pub fn filter_tree(roots: &[PageTreeNode], query: &str) -> Vec<PageTreeNode> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return roots.to_vec();
    }

    fn prune(node: &PageTreeNode, query: &str) -> Option<PageTreeNode> {
        let matched = node.page.title.to_lowercase().contains(query)
            || node
                .page
                .description
                .as_ref()
                .is_some_and(|d| d.to_lowercase().contains(query));
        let children: Vec<PageTreeNode> = node
            .children
            .iter()
            .filter_map(|child| prune(child, query))
            .collect();
        if matched || !children.is_empty() {
            Some(PageTreeNode {
                page: node.page.clone(),
                children,
                is_expanded: true,
            })
        } else {
            None
        }
    }

    roots.iter().filter_map(|node| prune(node, &query)).collect()
}

/// Would re-parenting `page_id` under `new_parent_id` create a cycle?
/// True when the new parent is the page itself or any of its
/// descendants. Walks the parent chain with a visited guard so a
/// corrupt flat list cannot loop forever.
pub fn would_create_cycle(pages: &[Page], page_id: u32, new_parent_id: Option<u32>) -> bool {
    let Some(mut cursor) = new_parent_id else {
        return false;
    };
    let parents: HashMap<u32, Option<u32>> =
        pages.iter().map(|p| (p.id, p.parent_id)).collect();
    let mut seen = HashSet::new();
    loop {
        if cursor == page_id {
            return true;
        }
        if !seen.insert(cursor) {
            return false;
        }
        match parents.get(&cursor) {
            Some(Some(next)) => cursor = *next,
            _ => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Page;

    fn make_page(id: u32, title: &str, parent_id: Option<u32>) -> Page {
        Page {
            id,
            title: title.to_string(),
            description: None,
            parent_id,
            is_published: true,
            is_private: false,
            slug: None,
            url_path: None,
            created_at: None,
        }
    }

    fn titles(nodes: &[PageTreeNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.page.title.as_str()).collect()
    }

    #[test]
    fn test_build_tree_example() {
        let pages = vec![
            make_page(1, "Home", None),
            make_page(2, "Team", Some(1)),
            make_page(3, "Zeta", Some(1)),
            make_page(4, "Alpha", Some(2)),
        ];

        let tree = build_page_tree(&pages);

        // Home -> [Team -> [Alpha], Zeta]
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].page.id, 1);
        assert_eq!(titles(&tree[0].children), vec!["Team", "Zeta"]);
        assert_eq!(titles(&tree[0].children[0].children), vec!["Alpha"]);
    }

    #[test]
    fn test_home_pins_first_regardless_of_title() {
        let pages = vec![
            make_page(5, "Aardvark", None),
            make_page(1, "Zzz Home", None),
        ];
        let tree = build_page_tree(&pages);
        assert_eq!(tree[0].page.id, 1);
        assert_eq!(tree[1].page.title, "Aardvark");
    }

    #[test]
    fn test_sibling_sort_is_case_insensitive() {
        let pages = vec![
            make_page(1, "Home", None),
            make_page(2, "banana", Some(1)),
            make_page(3, "Apple", Some(1)),
        ];
        let tree = build_page_tree(&pages);
        assert_eq!(titles(&tree[0].children), vec!["Apple", "banana"]);
    }

    #[test]
    fn test_orphan_is_dropped() {
        let pages = vec![
            make_page(1, "Home", None),
            make_page(2, "Lost", Some(99)),
            make_page(3, "Deep Lost", Some(2)),
        ];
        let tree = build_page_tree(&pages);
        let flat = flatten_all(&tree);
        assert!(flat.iter().all(|p| p.id != 2 && p.id != 3));
    }

    #[test]
    fn test_rebuild_roundtrip_is_idempotent() {
        let pages = vec![
            make_page(1, "Home", None),
            make_page(2, "Team", Some(1)),
            make_page(4, "Alpha", Some(2)),
            make_page(3, "Zeta", Some(1)),
        ];
        let tree = build_page_tree(&pages);
        let rebuilt = build_page_tree(&flatten_all(&tree));
        assert_eq!(tree, rebuilt);
    }

    #[test]
    fn test_flatten_skips_collapsed_children() {
        let pages = vec![
            make_page(1, "Home", None),
            make_page(2, "Team", Some(1)),
            make_page(4, "Alpha", Some(2)),
        ];
        let mut tree = build_page_tree(&pages);
        // Home is expanded by default, Team is not.
        let rows = flatten_tree(&tree);
        assert_eq!(rows.iter().map(|(p, _)| p.id).collect::<Vec<_>>(), vec![1, 2]);

        let mut expanded = HashSet::new();
        expanded.insert(2);
        apply_expansion(&mut tree, &expanded);
        let rows = flatten_tree(&tree);
        assert_eq!(
            rows.iter().map(|(p, d)| (p.id, *d)).collect::<Vec<_>>(),
            vec![(1, 0), (2, 1), (4, 2)]
        );
    }

    #[test]
    fn test_filter_empty_query_returns_input() {
        let pages = vec![make_page(1, "Home", None), make_page(2, "Team", Some(1))];
        let tree = build_page_tree(&pages);
        assert_eq!(filter_tree(&tree, "   "), tree);
    }

    #[test]
    fn test_filter_preserves_ancestor_path() {
        let pages = vec![
            make_page(1, "Home", None),
            make_page(2, "Team", Some(1)),
            make_page(4, "Alpha", Some(2)),
            make_page(3, "Zeta", Some(1)),
        ];
        let tree = build_page_tree(&pages);
        let filtered = filter_tree(&tree, "alpha");

        // Home -> Team -> Alpha survives, Zeta is elided.
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].page.id, 1);
        assert!(filtered[0].is_expanded);
        assert_eq!(titles(&filtered[0].children), vec!["Team"]);
        assert_eq!(titles(&filtered[0].children[0].children), vec!["Alpha"]);
    }

    #[test]
    fn test_filter_matches_description() {
        let mut page = make_page(2, "Team", Some(1));
        page.description = Some("Litigation staff".to_string());
        let pages = vec![make_page(1, "Home", None), page];
        let filtered = filter_tree(&build_page_tree(&pages), "staff");
        assert_eq!(titles(&filtered[0].children), vec!["Team"]);
    }

    #[test]
    fn test_cycle_detection() {
        let pages = vec![
            make_page(1, "Home", None),
            make_page(2, "Team", Some(1)),
            make_page(4, "Alpha", Some(2)),
        ];
        // Moving Team under its own child Alpha would orphan the subtree.
        assert!(would_create_cycle(&pages, 2, Some(4)));
        // Moving a page under itself is also a cycle.
        assert!(would_create_cycle(&pages, 2, Some(2)));
        // Legitimate reparent.
        assert!(!would_create_cycle(&pages, 4, Some(1)));
        // Moving to root never cycles.
        assert!(!would_create_cycle(&pages, 2, None));
    }
}
