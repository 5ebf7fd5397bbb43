//! Drop Intent Resolution
//!
//! Translates tree-view drop zone identifiers into page move
//! intents. Zone ids encode a reference page and a position
//! qualifier; the backend only ever receives a new parent id,
//! since sibling order is title-sorted server side.

use crate::models::{Page, HOME_PAGE_ID};
use crate::tree;

/// Where the dragged page lands relative to the reference page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropPosition {
    /// Previous sibling of the reference page
    Above,
    /// Next sibling after the reference page's last child
    Below,
    /// Child of the reference page
    Inside,
}

/// A parsed drop zone identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropSpot {
    pub position: DropPosition,
    pub page_id: u32,
}

/// The move request to issue against the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveIntent {
    pub page_id: u32,
    pub new_parent_id: Option<u32>,
    pub position: DropPosition,
}

impl MoveIntent {
    /// Reparenting moves expand the new parent so the moved node
    /// stays visible after the refetch.
    pub fn is_reparent(&self) -> bool {
        self.position == DropPosition::Inside
    }
}

/// Parse a drop zone id: `before-<id>`, `after-children-<id>`,
/// `child-<id>`, or a bare `page-<id>` (treated as inside).
pub fn parse_drop_spot(target: &str) -> Option<DropSpot> {
    let (position, rest) = if let Some(rest) = target.strip_prefix("before-") {
        (DropPosition::Above, rest)
    } else if let Some(rest) = target.strip_prefix("after-children-") {
        (DropPosition::Below, rest)
    } else if let Some(rest) = target.strip_prefix("child-") {
        (DropPosition::Inside, rest)
    } else if let Some(rest) = target.strip_prefix("page-") {
        (DropPosition::Inside, rest)
    } else {
        return None;
    };
    let page_id = rest.parse().ok()?;
    Some(DropSpot { position, page_id })
}

/// Resolve a drop gesture into a move intent, or `None` when the
/// move is not allowed: the home page is immovable, the reference
/// page must exist, and a page may not land under itself or any of
/// its own descendants.
pub fn resolve_move(dragged_id: u32, spot: DropSpot, pages: &[Page]) -> Option<MoveIntent> {
    if dragged_id == HOME_PAGE_ID {
        return None;
    }
    let reference = pages.iter().find(|p| p.id == spot.page_id)?;
    let new_parent_id = match spot.position {
        DropPosition::Inside => Some(reference.id),
        DropPosition::Above | DropPosition::Below => reference.parent_id,
    };
    if tree::would_create_cycle(pages, dragged_id, new_parent_id) {
        return None;
    }
    Some(MoveIntent {
        page_id: dragged_id,
        new_parent_id,
        position: spot.position,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_page(id: u32, parent_id: Option<u32>) -> Page {
        Page {
            id,
            title: format!("Page {}", id),
            description: None,
            parent_id,
            is_published: true,
            is_private: false,
            slug: None,
            url_path: None,
            created_at: None,
        }
    }

    // Home(1) -> [Seven(7) -> [Eight(8)], Nine(9)]
    fn sample_pages() -> Vec<Page> {
        vec![
            make_page(1, None),
            make_page(7, Some(1)),
            make_page(8, Some(7)),
            make_page(9, Some(1)),
        ]
    }

    #[test]
    fn test_parse_drop_spot_variants() {
        assert_eq!(
            parse_drop_spot("before-7"),
            Some(DropSpot { position: DropPosition::Above, page_id: 7 })
        );
        assert_eq!(
            parse_drop_spot("after-children-7"),
            Some(DropSpot { position: DropPosition::Below, page_id: 7 })
        );
        assert_eq!(
            parse_drop_spot("child-7"),
            Some(DropSpot { position: DropPosition::Inside, page_id: 7 })
        );
        assert_eq!(
            parse_drop_spot("page-7"),
            Some(DropSpot { position: DropPosition::Inside, page_id: 7 })
        );
    }

    #[test]
    fn test_parse_drop_spot_malformed() {
        assert_eq!(parse_drop_spot("before-"), None);
        assert_eq!(parse_drop_spot("before-x"), None);
        assert_eq!(parse_drop_spot("sibling-7"), None);
        assert_eq!(parse_drop_spot(""), None);
    }

    #[test]
    fn test_inside_reparents_under_reference() {
        let pages = sample_pages();
        let spot = parse_drop_spot("page-7").unwrap();
        let intent = resolve_move(9, spot, &pages).unwrap();
        assert_eq!(intent.new_parent_id, Some(7));
        assert!(intent.is_reparent());
    }

    #[test]
    fn test_above_below_keep_reference_parent() {
        let pages = sample_pages();

        let above = resolve_move(9, parse_drop_spot("before-8").unwrap(), &pages).unwrap();
        assert_eq!(above.new_parent_id, Some(7));
        assert!(!above.is_reparent());

        let below = resolve_move(9, parse_drop_spot("after-children-7").unwrap(), &pages).unwrap();
        assert_eq!(below.new_parent_id, Some(1));
    }

    #[test]
    fn test_home_page_never_moves() {
        let pages = sample_pages();
        let spot = parse_drop_spot("child-7").unwrap();
        assert_eq!(resolve_move(1, spot, &pages), None);
    }

    #[test]
    fn test_missing_reference_resolves_to_none() {
        let pages = sample_pages();
        let spot = parse_drop_spot("page-42").unwrap();
        assert_eq!(resolve_move(9, spot, &pages), None);
    }

    #[test]
    fn test_drop_onto_own_descendant_is_rejected() {
        let pages = sample_pages();
        // 8 is a child of 7; 7 may not become a child of 8.
        assert_eq!(resolve_move(7, parse_drop_spot("page-8").unwrap(), &pages), None);
        // Dropping onto itself is likewise rejected.
        assert_eq!(resolve_move(7, parse_drop_spot("child-7").unwrap(), &pages), None);
        // Above a descendant is still a cycle (parent is the dragged page).
        assert_eq!(resolve_move(7, parse_drop_spot("before-8").unwrap(), &pages), None);
    }
}
