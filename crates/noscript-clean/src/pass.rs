//! Cleaning passes
//!
//! Each pass is a self-contained mutation over the whole tree. Passes run
//! in [`Pass::ALL`] order and each sees the tree as left by the previous
//! one.

use noscript_dom::{Document, DomError, DomTree, ElementData, NodeId};

use crate::rules;

/// One cleaning step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    /// Insert an `<h1>` at the start of the third `<div>` of the first `<article>`
    InjectHeading,
    /// Remove `<div>`s with no visible text and no `<img>` below them
    PruneEmptyDivs,
    /// Remove every `<script>`
    StripScripts,
    /// Remove `<link>`s whose href (minus query string) ends in `.js`
    StripScriptLinks,
    /// Remove elements whose `id` is in [`rules::REMOVED_IDS`]
    RemoveById,
    /// Remove elements whose `class` is in [`rules::REMOVED_CLASSES`]
    RemoveByClass,
    /// Remove elements whose `style` is [`rules::REMOVED_STYLE`]
    RemoveByStyle,
    /// Drop the `crossorigin` attribute from `<link>`s
    StripCrossorigin,
    /// Remove the first `<div>` carrying the `draggable` class
    RemoveDraggable,
}

impl Pass {
    /// All passes in execution order
    pub const ALL: [Pass; 9] = [
        Pass::InjectHeading,
        Pass::PruneEmptyDivs,
        Pass::StripScripts,
        Pass::StripScriptLinks,
        Pass::RemoveById,
        Pass::RemoveByClass,
        Pass::RemoveByStyle,
        Pass::StripCrossorigin,
        Pass::RemoveDraggable,
    ];

    /// Short name used in logs
    pub fn name(self) -> &'static str {
        match self {
            Pass::InjectHeading => "inject-heading",
            Pass::PruneEmptyDivs => "prune-empty-divs",
            Pass::StripScripts => "strip-scripts",
            Pass::StripScriptLinks => "strip-script-links",
            Pass::RemoveById => "remove-by-id",
            Pass::RemoveByClass => "remove-by-class",
            Pass::RemoveByStyle => "remove-by-style",
            Pass::StripCrossorigin => "strip-crossorigin",
            Pass::RemoveDraggable => "remove-draggable",
        }
    }

    /// Position in [`Pass::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Run this pass, returning how many nodes were inserted or removed
    /// (attributes, for [`Pass::StripCrossorigin`]).
    ///
    /// `heading` is only read by [`Pass::InjectHeading`]; an empty heading
    /// makes that pass a no-op.
    pub fn apply(self, doc: &mut Document, heading: Option<&str>) -> Result<usize, PassError> {
        let tree = doc.tree_mut();
        match self {
            Pass::InjectHeading => match heading {
                Some(text) if !text.is_empty() => inject_heading(tree, text),
                _ => Ok(0),
            },
            Pass::PruneEmptyDivs => prune_empty_divs(tree),
            Pass::StripScripts => remove_matching(tree, |e| e.name == "script"),
            Pass::StripScriptLinks => remove_matching(tree, is_script_link),
            Pass::RemoveById => remove_by_attr(tree, "id", rules::REMOVED_IDS),
            Pass::RemoveByClass => remove_by_attr(tree, "class", rules::REMOVED_CLASSES),
            Pass::RemoveByStyle => remove_by_attr(tree, "style", &[rules::REMOVED_STYLE]),
            Pass::StripCrossorigin => Ok(strip_link_attr(tree, rules::STRIPPED_LINK_ATTR)),
            Pass::RemoveDraggable => remove_draggable(tree),
        }
    }
}

/// A pass stopped on a DOM error after `completed` changes were made
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stopped after {completed} changes: {source}")]
pub struct PassError {
    pub completed: usize,
    #[source]
    pub source: DomError,
}

impl PassError {
    fn at(completed: usize) -> impl FnOnce(DomError) -> PassError {
        move |source| PassError { completed, source }
    }

    /// Account for changes made before the failing step
    fn after(mut self, earlier: usize) -> Self {
        self.completed += earlier;
        self
    }
}

fn inject_heading(tree: &mut DomTree, text: &str) -> Result<usize, PassError> {
    let Some(article) = tree.first_element_by_tag(tree.root(), rules::HEADING_SCOPE_TAG) else {
        return Ok(0);
    };
    let divs = tree.elements_by_tag(article, "div");
    let Some(&target) = divs.get(rules::HEADING_DIV_INDEX) else {
        return Ok(0);
    };

    let heading = tree.create_element(rules::HEADING_TAG);
    let content = tree.create_text(text);
    tree.append_child(heading, content).map_err(PassError::at(0))?;
    tree.prepend_child(target, heading).map_err(PassError::at(0))?;
    Ok(1)
}

fn prune_empty_divs(tree: &mut DomTree) -> Result<usize, PassError> {
    // Candidates are fixed up front; ones inside an already pruned div
    // are gone with it.
    let divs = tree.elements_by_tag(tree.root(), "div");
    let mut removed = 0;
    for div in divs {
        if !tree.is_connected(div) {
            continue;
        }
        let has_text = !tree.text_content(div).trim().is_empty();
        if !has_text && !tree.has_descendant_tag(div, "img") {
            tree.detach(div).map_err(PassError::at(removed))?;
            removed += 1;
        }
    }
    Ok(removed)
}

fn is_script_link(elem: &ElementData) -> bool {
    elem.name == "link"
        && elem.get_attr("href").is_some_and(|href| {
            let path = href.split('?').next().unwrap_or(href);
            path.ends_with(rules::SCRIPT_LINK_SUFFIX)
        })
}

fn remove_by_attr(tree: &mut DomTree, attr: &str, values: &[&str]) -> Result<usize, PassError> {
    let mut removed = 0;
    for value in values {
        removed += remove_matching(tree, |e| e.get_attr(attr) == Some(*value))
            .map_err(|err| err.after(removed))?;
    }
    Ok(removed)
}

fn strip_link_attr(tree: &mut DomTree, attr: &str) -> usize {
    let links = tree.filter_elements(tree.root(), |e| e.name == "link" && e.has_attr(attr));
    links
        .into_iter()
        .filter_map(|id| tree.element_mut(id)?.remove_attr(attr))
        .count()
}

fn remove_draggable(tree: &mut DomTree) -> Result<usize, PassError> {
    let found = tree.find_element(tree.root(), |e| {
        e.name == "div" && e.has_class(rules::DRAGGABLE_CLASS)
    });
    match found {
        Some(div) => {
            tree.detach(div).map_err(PassError::at(0))?;
            Ok(1)
        }
        None => Ok(0),
    }
}

/// Detach every connected element matching `pred`, in document order
fn remove_matching<F>(tree: &mut DomTree, pred: F) -> Result<usize, PassError>
where
    F: FnMut(&ElementData) -> bool,
{
    let matches: Vec<NodeId> = tree.filter_elements(tree.root(), pred);
    let mut removed = 0;
    for id in matches {
        // A match nested in an earlier match is already gone
        if tree.is_connected(id) {
            tree.detach(id).map_err(PassError::at(removed))?;
            removed += 1;
        }
    }
    Ok(removed)
}
