//! Structure role to semantic container mapping.
//!
//! Standard roles are resolved through a static table; numbered headings
//! (`H1`, `H2`, ...) through a pattern. Roles missing from both fall back to
//! a custom container named after the lowercase role, so their content is
//! never dropped. Documents may alias their own role names to standard ones.

use crate::semantic::ContainerKind;
use lazy_static::lazy_static;
use phf::phf_map;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    /// Numbered heading roles
    static ref RE_HEADING: Regex = Regex::new(r"^H([1-9][0-9]?)$").unwrap();
}

/// Maximum alias hops followed before giving up on a role map chain.
const MAX_ALIAS_DEPTH: usize = 8;

/// What the compiler does with a node of a given role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleAction {
    /// Open a container of this kind under the current parent
    Emit(ContainerKind),
    /// No container; content and children attach to the current parent
    PassThrough,
    /// Drop the node and its whole subtree
    SkipSubtree,
    /// Role with no useful target; handled like pass-through
    Unsupported,
}

static ROLE_TABLE: phf::Map<&'static str, RoleAction> = phf_map! {
    // Grouping roles
    "Root" => RoleAction::PassThrough,
    "Document" => RoleAction::PassThrough,
    "DocumentFragment" => RoleAction::PassThrough,
    "LBody" => RoleAction::PassThrough,
    "Part" => RoleAction::PassThrough,
    "NonStruct" => RoleAction::PassThrough,
    "Sub" => RoleAction::PassThrough,
    "Artifact" => RoleAction::PassThrough,

    // Omitted roles
    "Lbl" => RoleAction::SkipSubtree,

    // Ruby and warichu annotations
    "Ruby" => RoleAction::Unsupported,
    "RB" => RoleAction::Unsupported,
    "RT" => RoleAction::Unsupported,
    "RP" => RoleAction::Unsupported,
    "Warichu" => RoleAction::Unsupported,
    "WT" => RoleAction::Unsupported,
    "WP" => RoleAction::Unsupported,

    // Block containers
    "Sect" => RoleAction::Emit(ContainerKind::Section),
    "Div" => RoleAction::Emit(ContainerKind::Division),
    "Art" => RoleAction::Emit(ContainerKind::Article),
    "P" => RoleAction::Emit(ContainerKind::Paragraph),
    "H" => RoleAction::Emit(ContainerKind::Heading(1)),
    "BlockQuote" => RoleAction::Emit(ContainerKind::BlockQuote),
    "Caption" => RoleAction::Emit(ContainerKind::Caption),

    // Lists
    "L" => RoleAction::Emit(ContainerKind::List),
    "LI" => RoleAction::Emit(ContainerKind::ListItem),
    "TOC" => RoleAction::Emit(ContainerKind::OrderedList),
    "TOCI" => RoleAction::Emit(ContainerKind::ListItem),

    // Tables
    "Table" => RoleAction::Emit(ContainerKind::Table),
    "THead" => RoleAction::Emit(ContainerKind::TableHead),
    "TBody" => RoleAction::Emit(ContainerKind::TableBody),
    "TFoot" => RoleAction::Emit(ContainerKind::TableFoot),
    "TR" => RoleAction::Emit(ContainerKind::TableRow),
    "TH" => RoleAction::Emit(ContainerKind::TableHeaderCell),
    "TD" => RoleAction::Emit(ContainerKind::TableDataCell),

    // Inline
    "Span" => RoleAction::Emit(ContainerKind::Span),
    "Quote" => RoleAction::Emit(ContainerKind::Quote),
    "Code" => RoleAction::Emit(ContainerKind::Code),
    "Link" => RoleAction::Emit(ContainerKind::Link),

    // Notes
    "Note" => RoleAction::Emit(ContainerKind::Note),
    "FENote" => RoleAction::Emit(ContainerKind::Note),
    "Annot" => RoleAction::Emit(ContainerKind::Note),

    // Illustrations and forms
    "Figure" => RoleAction::Emit(ContainerKind::Figure),
    "Formula" => RoleAction::Emit(ContainerKind::FormulaBlock),
    "Form" => RoleAction::Emit(ContainerKind::Form),
};

/// Resolve a standard role name, without aliasing.
///
/// Unknown roles yield a custom container named after the lowercase role.
pub fn map_role(role: &str) -> RoleAction {
    if let Some(action) = ROLE_TABLE.get(role) {
        return action.clone();
    }
    if let Some(level) = heading_level(role) {
        return RoleAction::Emit(ContainerKind::Heading(level));
    }
    RoleAction::Emit(ContainerKind::Custom(role.to_lowercase()))
}

/// Level of a numbered heading role (`H3` -> 3).
pub fn heading_level(role: &str) -> Option<u8> {
    RE_HEADING
        .captures(role)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Role mapper with document-specific aliases layered over the standard table.
#[derive(Debug, Clone, Default)]
pub struct RoleMapper {
    aliases: HashMap<String, String>,
}

impl RoleMapper {
    /// Mapper with no aliases.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapper with a custom-to-standard role map.
    pub fn with_aliases(aliases: HashMap<String, String>) -> Self {
        Self { aliases }
    }

    /// Add one alias.
    pub fn add_alias(&mut self, custom: impl Into<String>, standard: impl Into<String>) {
        self.aliases.insert(custom.into(), standard.into());
    }

    /// Resolve a role, following aliases for names the standard table lacks.
    pub fn resolve(&self, role: &str) -> RoleAction {
        let mut current = role;
        for _ in 0..MAX_ALIAS_DEPTH {
            if ROLE_TABLE.contains_key(current) || heading_level(current).is_some() {
                break;
            }
            match self.aliases.get(current) {
                Some(next) if next != current => current = next,
                _ => break,
            }
        }
        map_role(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_roles() {
        assert_eq!(map_role("Sect"), RoleAction::Emit(ContainerKind::Section));
        assert_eq!(map_role("TOC"), RoleAction::Emit(ContainerKind::OrderedList));
        assert_eq!(map_role("TOCI"), RoleAction::Emit(ContainerKind::ListItem));
        assert_eq!(map_role("TH"), RoleAction::Emit(ContainerKind::TableHeaderCell));
        assert_eq!(map_role("Formula"), RoleAction::Emit(ContainerKind::FormulaBlock));
        assert_eq!(map_role("FENote"), RoleAction::Emit(ContainerKind::Note));
        assert_eq!(map_role("Annot"), RoleAction::Emit(ContainerKind::Note));
    }

    #[test]
    fn test_special_roles() {
        assert_eq!(map_role("Lbl"), RoleAction::SkipSubtree);
        for role in ["Root", "Document", "LBody", "Part", "NonStruct", "Sub", "Artifact"] {
            assert_eq!(map_role(role), RoleAction::PassThrough, "{}", role);
        }
        for role in ["Warichu", "WT", "WP", "Ruby"] {
            assert_eq!(map_role(role), RoleAction::Unsupported, "{}", role);
        }
    }

    #[test]
    fn test_numbered_headings() {
        assert_eq!(map_role("H1"), RoleAction::Emit(ContainerKind::Heading(1)));
        assert_eq!(map_role("H4"), RoleAction::Emit(ContainerKind::Heading(4)));
        assert_eq!(map_role("H12"), RoleAction::Emit(ContainerKind::Heading(12)));
        assert_eq!(heading_level("H0"), None);
        assert_eq!(heading_level("Hx"), None);
        assert_eq!(heading_level("h2"), None);
    }

    #[test]
    fn test_unknown_role_is_custom() {
        assert_eq!(
            map_role("CustomThing"),
            RoleAction::Emit(ContainerKind::Custom("customthing".to_string()))
        );
    }

    #[test]
    fn test_aliases() {
        let mut mapper = RoleMapper::new();
        mapper.add_alias("Chapter", "Sect");
        mapper.add_alias("Title", "Heading");
        mapper.add_alias("Heading", "H1");
        mapper.add_alias("Sect", "P");

        assert_eq!(mapper.resolve("Chapter"), RoleAction::Emit(ContainerKind::Section));
        assert_eq!(mapper.resolve("Title"), RoleAction::Emit(ContainerKind::Heading(1)));
        // Standard roles are never remapped
        assert_eq!(mapper.resolve("Sect"), RoleAction::Emit(ContainerKind::Section));
    }

    #[test]
    fn test_alias_cycle_terminates() {
        let mut mapper = RoleMapper::new();
        mapper.add_alias("A", "B");
        mapper.add_alias("B", "A");
        assert!(matches!(mapper.resolve("A"), RoleAction::Emit(ContainerKind::Custom(_))));
    }
}
