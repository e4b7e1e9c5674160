//! Per-file arrangement entry point.

use crate::arrange::chain::ChainElementArranger;
use crate::arrange::factory::build_arranger_chain;
use crate::config::{Config, ElementRule};
use crate::error::Result;
use crate::model::{CodeElement, ElementKind};

/// Arranges one parsed tree according to a configuration's rule tree.
///
/// Each instance is exclusively owned by the thread processing its file;
/// there is no shared state between arrangers.
pub struct CodeArranger {
    chain: ChainElementArranger,
    strip_regions: bool,
}

impl CodeArranger {
    /// Build the arranger chain for the configuration. Fails with an
    /// `InvalidConfiguration`/`InvalidArgument` error on malformed rules.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            chain: build_arranger_chain(&config.rules)?,
            strip_regions: config.regions_enabled && rules_request_regions(&config.rules),
        })
    }

    /// Arrange top-level elements, returning the rearranged forest.
    ///
    /// When region wrapping is configured, pre-existing region markers are
    /// dissolved first so the writer's regenerated regions do not stack up
    /// across repeated runs.
    pub fn arrange(&self, mut elements: Vec<CodeElement>) -> Result<Vec<CodeElement>> {
        if self.strip_regions {
            strip_region_markers(&mut elements);
        }
        let mut root = CodeElement::group("root");
        for element in elements {
            self.chain.arrange_element(Some(&mut root), element)?;
        }
        Ok(root.children)
    }
}

/// Whether any rule in the tree asks for region wrapping.
fn rules_request_regions(rules: &[ElementRule]) -> bool {
    rules
        .iter()
        .any(|r| r.region.is_some() || rules_request_regions(&r.rules))
}

/// Remove `#region`/`#endregion` lines from header texts and drop comment
/// blocks that contained nothing else.
fn strip_region_markers(elements: &mut Vec<CodeElement>) {
    elements.retain_mut(|element| {
        element.header_text = remove_region_lines(&element.header_text);
        if let ElementKind::Comment { text } = &mut element.kind {
            *text = remove_region_lines(text);
            if text.trim().is_empty() {
                return false;
            }
        }
        strip_region_markers(&mut element.children);
        true
    });
}

fn remove_region_lines(text: &str) -> String {
    text.split_inclusive('\n')
        .filter(|line| {
            let trimmed = line.trim_start();
            !(trimmed.starts_with("#region") || trimmed.starts_with("#endregion"))
        })
        .collect()
}
