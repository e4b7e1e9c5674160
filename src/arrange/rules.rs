//! The configured arranger: kind filter, grouping, sorting, region wrapping.

use std::sync::LazyLock;

use regex::Regex;

use crate::arrange::chain::{ChainElementArranger, ElementArranger};
use crate::error::Result;
use crate::model::{CodeElement, ElementKind, GroupSeparatorType};

/// Pattern for `$(Placeholder)` substitutions in region name templates.
static TEMPLATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\((\w+)\)").unwrap());

/// Expand a region name template against the element that opens the group.
///
/// Recognized placeholders: `$(Access)`, `$(ElementType)`, `$(Name)`.
/// Unknown placeholders are left as-is.
#[must_use]
pub fn expand_region_template(template: &str, element: &CodeElement) -> String {
    TEMPLATE_RE
        .replace_all(template, |caps: &regex::Captures<'_>| match &caps[1] {
            "Access" => element.access.display_name().to_string(),
            "ElementType" => element.kind.display_name().to_string(),
            "Name" => element.name.clone(),
            other => format!("$({other})"),
        })
        .into_owned()
}

/// Grouping key for partitioning a sibling scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    Access,
    Kind,
    Static,
    FirstLetter,
}

impl GroupBy {
    /// Human-readable label of the partition an element falls into.
    #[must_use]
    pub fn label(self, element: &CodeElement) -> String {
        match self {
            GroupBy::Access => element.access.display_name().to_string(),
            GroupBy::Kind => element.kind.display_name().to_string(),
            GroupBy::Static => {
                (if element.is_static() { "Static" } else { "Instance" }).to_string()
            }
            GroupBy::FirstLetter => element
                .name
                .chars()
                .next()
                .map(|c| c.to_ascii_uppercase().to_string())
                .unwrap_or_default(),
        }
    }

    /// Ordering rank of the partition among its sibling partitions.
    #[must_use]
    pub fn rank(self, element: &CodeElement) -> usize {
        match self {
            GroupBy::Access => element.access.sort_rank(),
            GroupBy::Kind => kind_rank(&element.kind),
            GroupBy::Static => usize::from(!element.is_static()),
            GroupBy::FirstLetter => element
                .name
                .chars()
                .next()
                .map(|c| c.to_ascii_uppercase() as usize)
                .unwrap_or(usize::MAX),
        }
    }
}

/// Sort key applied within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Access,
    Kind,
    Type,
}

/// Comparable value of one element under a sort key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Rank(usize),
    Text(String),
}

impl SortKey {
    #[must_use]
    pub fn value_of(self, element: &CodeElement) -> SortValue {
        match self {
            SortKey::Name => SortValue::Text(element.name.to_lowercase()),
            SortKey::Access => SortValue::Rank(element.access.sort_rank()),
            SortKey::Kind => SortValue::Rank(kind_rank(&element.kind)),
            SortKey::Type => SortValue::Text(declared_type(element).to_lowercase()),
        }
    }
}

/// Conventional member ordering used for kind grouping and kind sorting.
fn kind_rank(kind: &ElementKind) -> usize {
    match kind {
        ElementKind::Using { .. } => 0,
        ElementKind::Field { .. } => 1,
        ElementKind::Constructor { .. } => 2,
        ElementKind::Destructor { .. } => 3,
        ElementKind::Delegate { .. } => 4,
        ElementKind::Event { .. } => 5,
        ElementKind::Property { .. } => 6,
        ElementKind::Method { .. } => 7,
        ElementKind::Type { .. } => 8,
        ElementKind::Namespace => 9,
        ElementKind::Comment { .. } => 10,
        ElementKind::Group { .. } => 11,
    }
}

/// The declared/return type of an element, for type-keyed sorting.
fn declared_type(element: &CodeElement) -> &str {
    match &element.kind {
        ElementKind::Field { type_name, .. }
        | ElementKind::Property { type_name, .. }
        | ElementKind::Event { type_name, .. } => type_name,
        ElementKind::Method { return_type, .. } | ElementKind::Delegate { return_type, .. } => {
            return_type
        }
        _ => &element.name,
    }
}

/// One configuration rule compiled into an arranger: accepts the configured
/// element kinds, recursively arranges their children with a nested chain,
/// then places each element into its group at its sorted position.
pub struct ConfiguredArranger {
    kinds: Vec<String>,
    group_by: Option<GroupBy>,
    sort_key: Option<SortKey>,
    descending: bool,
    region_template: Option<String>,
    custom_separator: Option<String>,
    children_chain: Option<ChainElementArranger>,
    /// Position of the source rule; orders this rule's groups among the
    /// groups of sibling rules.
    rule_index: usize,
}

impl ConfiguredArranger {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        kinds: Vec<String>,
        group_by: Option<GroupBy>,
        sort_key: Option<SortKey>,
        descending: bool,
        region_template: Option<String>,
        custom_separator: Option<String>,
        children_chain: Option<ChainElementArranger>,
        rule_index: usize,
    ) -> Self {
        Self {
            kinds,
            group_by,
            sort_key,
            descending,
            region_template,
            custom_separator,
            children_chain,
            rule_index,
        }
    }

    /// Group identity tag: rule position, partition rank, partition label.
    /// Lexicographic order of tags is the output order of groups.
    fn group_tag(&self, group_by: GroupBy, element: &CodeElement) -> String {
        format!(
            "{:03}:{:03}:{}",
            self.rule_index,
            group_by.rank(element),
            group_by.label(element)
        )
    }

    /// Find the destination group for an element, creating it at its ordered
    /// position among sibling groups when missing. Returns its index.
    fn find_or_create_group(
        &self,
        parent: &mut CodeElement,
        group_by: GroupBy,
        element: &CodeElement,
    ) -> usize {
        let tag = self.group_tag(group_by, element);
        if let Some(i) = parent
            .children
            .iter()
            .position(|c| c.is_group() && c.name == tag)
        {
            return i;
        }

        let mut group = CodeElement::group(tag.clone());
        if let ElementKind::Group {
            separator,
            custom_separator,
            region_name,
        } = &mut group.kind
        {
            if let Some(sep) = &self.custom_separator {
                *separator = GroupSeparatorType::Custom;
                *custom_separator = Some(sep.clone());
            }
            if let Some(template) = &self.region_template {
                *region_name = Some(expand_region_template(template, element));
            }
        }

        let pos = parent
            .children
            .iter()
            .position(|c| c.is_group() && c.name.as_str() > tag.as_str())
            .unwrap_or(parent.children.len());
        parent.children.insert(pos, group);
        pos
    }

    /// Insert into the container at the sorted position; equal keys insert
    /// after existing elements, preserving source order.
    fn insert_sorted(&self, container: &mut CodeElement, element: CodeElement) {
        let Some(sort_key) = self.sort_key else {
            container.children.push(element);
            return;
        };
        let key = sort_key.value_of(&element);
        let mut index = container.children.len();
        for (i, child) in container.children.iter().enumerate() {
            if !self.can_arrange(child) {
                continue;
            }
            let child_key = sort_key.value_of(child);
            let insert_before = if self.descending {
                child_key < key
            } else {
                child_key > key
            };
            if insert_before {
                index = i;
                break;
            }
        }
        container.children.insert(index, element);
    }
}

impl ElementArranger for ConfiguredArranger {
    fn can_arrange(&self, element: &CodeElement) -> bool {
        let kind_name = element.kind.kind_name();
        self.kinds.iter().any(|k| k == kind_name)
    }

    fn arrange(&self, parent: &mut CodeElement, mut element: CodeElement) -> Result<()> {
        // arrange the element's own scope before placing it
        if let Some(chain) = &self.children_chain {
            if !element.children.is_empty() {
                let children = std::mem::take(&mut element.children);
                for child in children {
                    chain.arrange_element(Some(&mut element), child)?;
                }
            }
        }

        match self.group_by {
            Some(group_by) => {
                let index = self.find_or_create_group(parent, group_by, &element);
                let group = &mut parent.children[index];
                self.insert_sorted(group, element);
            }
            None => self.insert_sorted(parent, element),
        }
        Ok(())
    }
}
