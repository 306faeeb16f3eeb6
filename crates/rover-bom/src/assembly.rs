//! Assembly tree consumed by the BOM aggregator.
//!
//! The geometry layer produces a fully materialised tree of named
//! assemblies.  Rather than a generic metadata bag, each node carries two
//! typed annotation maps: the internal parts the node directly contributes,
//! and the catalogue fasteners that hold it together.  Both preserve
//! insertion order so repeated aggregation runs are byte-identical.

use indexmap::IndexMap;

use crate::fastener::Fastener;
use crate::parts::PartIdentifier;

/// Node in an assembly tree.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    name: String,
    parts: IndexMap<String, PartIdentifier>,
    fasteners: IndexMap<String, Fastener>,
    children: Vec<Assembly>,
}

impl Assembly {
    pub fn new(name: impl Into<String>) -> Self {
        Assembly {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Annotate a part directly contributed by this node.  The key is the
    /// producer-side name of the constituent and is informational only; it
    /// never affects BOM attribution.
    pub fn with_part(mut self, key: impl Into<String>, part: PartIdentifier) -> Self {
        self.parts.insert(key.into(), part);
        self
    }

    pub fn with_fastener(mut self, key: impl Into<String>, fastener: Fastener) -> Self {
        self.fasteners.insert(key.into(), fastener);
        self
    }

    pub fn with_child(mut self, child: Assembly) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn part_annotations(&self) -> &IndexMap<String, PartIdentifier> {
        &self.parts
    }

    pub fn fastener_annotations(&self) -> &IndexMap<String, Fastener> {
        &self.fasteners
    }

    pub fn children(&self) -> &[Assembly] {
        &self.children
    }

    /// Depth-first pre-order traversal over this node and every descendant.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

pub struct Walk<'a> {
    stack: Vec<&'a Assembly>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Assembly;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Reversed so children pop in declaration order.
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_is_pre_order() {
        let tree = Assembly::new("root")
            .with_child(
                Assembly::new("left")
                    .with_child(Assembly::new("left_inner")),
            )
            .with_child(Assembly::new("right"));

        let names: Vec<&str> = tree.walk().map(Assembly::name).collect();
        assert_eq!(vec!["root", "left", "left_inner", "right"], names);
    }

    #[test]
    fn walk_includes_self_only_for_leaf() {
        let leaf = Assembly::new("leaf");
        let names: Vec<&str> = leaf.walk().map(Assembly::name).collect();
        assert_eq!(vec!["leaf"], names);
    }
}
