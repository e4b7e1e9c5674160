//! Chain-of-responsibility composition of element arrangers.

use crate::error::{ArrangeError, Result};
use crate::model::CodeElement;

/// A rule object that knows how to place certain elements under a parent.
pub trait ElementArranger {
    /// Whether this arranger can place the given element (no parent context).
    fn can_arrange(&self, element: &CodeElement) -> bool;

    /// Context-sensitive variant; default ignores the parent.
    fn can_arrange_in(&self, _parent: &CodeElement, element: &CodeElement) -> bool {
        self.can_arrange(element)
    }

    /// Place `element` under `parent`: insert at a computed position, or
    /// group/region-wrap it. Mutates the parent in place.
    fn arrange(&self, parent: &mut CodeElement, element: CodeElement) -> Result<()>;
}

/// Tries member arrangers in order; the first one that accepts an element
/// handles it alone.
#[derive(Default)]
pub struct ChainElementArranger {
    arrangers: Vec<Box<dyn ElementArranger>>,
}

impl std::fmt::Debug for ChainElementArranger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainElementArranger")
            .field("arrangers", &self.arrangers.len())
            .finish()
    }
}

impl ChainElementArranger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an arranger to the chain. Earlier arrangers take precedence.
    pub fn add_arranger(&mut self, arranger: Box<dyn ElementArranger>) {
        self.arrangers.push(arranger);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.arrangers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arrangers.is_empty()
    }

    /// Whether any member arranger accepts the element. An empty chain
    /// accepts nothing.
    #[must_use]
    pub fn can_arrange(&self, element: &CodeElement) -> bool {
        self.arrangers.iter().any(|a| a.can_arrange(element))
    }

    /// Delegate to the first member arranger that accepts the element.
    ///
    /// With no accepting member and a parent supplied, the element is
    /// appended to the parent unchanged; content is never dropped. With no
    /// accepting member and no parent, the chain is misconfigured for this
    /// element and the call fails.
    pub fn arrange_element(
        &self,
        parent: Option<&mut CodeElement>,
        element: CodeElement,
    ) -> Result<()> {
        match parent {
            Some(parent) => {
                for arranger in &self.arrangers {
                    if arranger.can_arrange_in(parent, &element) {
                        return arranger.arrange(parent, element);
                    }
                }
                parent.children.push(element);
                Ok(())
            }
            None => Err(ArrangeError::InvalidOperation(format!(
                "no arranger in the chain can place root element '{}' and no parent was supplied",
                element.name
            ))),
        }
    }
}
