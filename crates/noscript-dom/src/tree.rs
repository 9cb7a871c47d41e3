//! DOM Tree (arena-based allocation)

use crate::{DomError, DomResult, ElementData, Namespace, Node, NodeData, NodeId};

/// Elements whose text is not part of the rendered text content
const NON_TEXT_CONTAINERS: &[&str] = &["script", "style", "template"];

/// Arena-based DOM tree
///
/// Slot 0 is always the document node. Detached nodes keep their slot
/// until the tree is dropped; they are simply unreachable from the root.
#[derive(Debug, Clone)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree holding only the document node
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
        }
    }

    /// The document node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    /// Element data of a node, if it is an element
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(Node::as_element)
    }

    /// Mutable element data of a node, if it is an element
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(Node::as_element_mut)
    }

    /// Number of allocated nodes, detached ones included. Never zero: the
    /// document node always occupies slot 0.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Add an unlinked node to the arena
    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(Node::element(name))
    }

    pub fn create_element_ns(&mut self, name: &str, namespace: Namespace) -> NodeId {
        self.push(Node::element_ns(name, namespace))
    }

    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.push(Node::text(content))
    }

    pub fn create_comment(&mut self, content: &str) -> NodeId {
        self.push(Node::comment(content))
    }

    pub fn create_doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        self.push(Node::doctype(name, public_id, system_id))
    }

    /// Append `child` as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.check_insert(parent, child)?;

        let prev = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = NodeId::NONE;
        }
        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
        Ok(child)
    }

    /// Insert `child` as the first child of `parent`
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.check_insert(parent, child)?;

        let next = self.nodes[parent.index()].first_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = child;
        } else {
            self.nodes[parent.index()].last_child = child;
        }
        self.nodes[parent.index()].first_child = child;
        Ok(child)
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let parent_node = self.get(parent).ok_or(DomError::NotFound(parent))?;
        let child_node = self.get(child).ok_or(DomError::NotFound(child))?;

        if !parent_node.is_container() {
            return Err(DomError::InvalidNodeType(parent));
        }
        if child_node.parent.is_valid() {
            return Err(DomError::AlreadyAttached(child));
        }
        if child == NodeId::ROOT || self.is_ancestor_or_self(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    /// Unlink a node from its parent, taking its subtree with it.
    ///
    /// Detaching an already detached node is a no-op.
    pub fn detach(&mut self, id: NodeId) -> DomResult<()> {
        let node = self.get(id).ok_or(DomError::NotFound(id))?;
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);
        if !parent.is_valid() {
            return Ok(());
        }

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[id.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;
        Ok(())
    }

    /// Whether `ancestor` is `node` or one of its ancestors
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while current.is_valid() {
            if current == ancestor {
                return true;
            }
            current = match self.get(current) {
                Some(n) => n.parent,
                None => return false,
            };
        }
        false
    }

    /// Whether the node is still reachable from the document root
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.is_ancestor_or_self(NodeId::ROOT, id)
    }

    /// Iterate over direct children in order
    pub fn children(&self, parent: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.get(parent).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Iterate over all descendants of `start` in document order
    /// (depth-first, pre-order), not including `start` itself
    pub fn descendants(&self, start: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            start,
            next: self.get(start).map_or(NodeId::NONE, |n| n.first_child),
        }
    }

    /// Descendant elements with the given tag, in document order
    pub fn elements_by_tag(&self, start: NodeId, tag: &str) -> Vec<NodeId> {
        self.descendants(start)
            .filter(|(_, node)| node.is_tag(tag))
            .map(|(id, _)| id)
            .collect()
    }

    /// First descendant element with the given tag
    pub fn first_element_by_tag(&self, start: NodeId, tag: &str) -> Option<NodeId> {
        self.find_element(start, |elem| elem.name == tag)
    }

    /// First descendant element matching `pred`, in document order
    pub fn find_element<F>(&self, start: NodeId, mut pred: F) -> Option<NodeId>
    where
        F: FnMut(&ElementData) -> bool,
    {
        self.descendants(start)
            .find(|(_, node)| node.as_element().is_some_and(&mut pred))
            .map(|(id, _)| id)
    }

    /// All descendant elements matching `pred`, in document order
    pub fn filter_elements<F>(&self, start: NodeId, mut pred: F) -> Vec<NodeId>
    where
        F: FnMut(&ElementData) -> bool,
    {
        self.descendants(start)
            .filter(|(_, node)| node.as_element().is_some_and(&mut pred))
            .map(|(id, _)| id)
            .collect()
    }

    /// Whether any descendant is an element with the given tag
    pub fn has_descendant_tag(&self, start: NodeId, tag: &str) -> bool {
        self.first_element_by_tag(start, tag).is_some()
    }

    /// Concatenated text of the subtree, skipping script/style/template
    /// contents
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.data {
            NodeData::Text(text) => out.push_str(&text.content),
            NodeData::Element(elem) if NON_TEXT_CONTAINERS.contains(&elem.name.as_str()) => {}
            NodeData::Element(_) | NodeData::Document => {
                for (child, _) in self.children(id) {
                    self.collect_text(child, out);
                }
            }
            NodeData::Comment(_) | NodeData::Doctype { .. } => {}
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of a node
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl<'a> Iterator for Children<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;
        self.next = node.next_sibling;
        Some((id, node))
    }
}

/// Pre-order iterator over a subtree
pub struct Descendants<'a> {
    tree: &'a DomTree,
    start: NodeId,
    next: NodeId,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        let node = self.tree.get(id)?;

        self.next = if node.first_child.is_valid() {
            node.first_child
        } else {
            // Climb until a next sibling exists, never leaving the subtree
            let mut current = id;
            loop {
                if current == self.start {
                    break NodeId::NONE;
                }
                let Some(n) = self.tree.get(current) else {
                    break NodeId::NONE;
                };
                if n.next_sibling.is_valid() {
                    break n.next_sibling;
                }
                current = n.parent;
            }
        };

        Some((id, node))
    }
}
