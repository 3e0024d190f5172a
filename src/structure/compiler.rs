//! Structure tree compiler.
//!
//! Walks a page's structure tree depth-first in declared child order and
//! builds the semantic tree: roles open containers (or not), content leaves
//! pull their assembled text, and figures take the page's images in
//! encounter order.

use super::roles::{RoleAction, RoleMapper};
use super::types::{NodeKind, StructureNode};
use crate::content::ContentMap;
use crate::error::Error;
use crate::images::{ImageResource, image_resource_id};
use crate::semantic::{ContainerKind, SemanticNode};
use std::collections::HashMap;

/// Page-scoped compilation state.
///
/// Created fresh for each page so nothing leaks between pages. The content
/// record map is only read; images are moved out as figures bind them.
#[derive(Debug)]
pub struct PageState<'a> {
    page_counter: u32,
    records: &'a ContentMap,
    images: HashMap<String, ImageResource>,
    next_image_index: usize,
    roles: &'a RoleMapper,
    figure_captions: bool,
    figures: usize,
    diagnostics: Vec<Error>,
}

impl<'a> PageState<'a> {
    /// Create state for the page at `page_counter` in the render run.
    pub fn new(page_counter: u32, records: &'a ContentMap, roles: &'a RoleMapper) -> Self {
        Self {
            page_counter,
            records,
            images: HashMap::new(),
            next_image_index: 1,
            roles,
            figure_captions: true,
            figures: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Provide the page's decoded images, keyed by resource id.
    pub fn with_images(mut self, images: HashMap<String, ImageResource>) -> Self {
        self.images = images;
        self
    }

    /// Enable figure captions.
    pub fn with_figure_captions(mut self, enable: bool) -> Self {
        self.figure_captions = enable;
        self
    }

    /// Record a non-fatal problem.
    pub fn report(&mut self, diagnostic: Error) {
        self.diagnostics.push(diagnostic);
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    /// Number of figures compiled so far.
    pub fn figure_count(&self) -> usize {
        self.figures
    }

    /// Ids of decoded images no figure has claimed.
    pub fn unbound_images(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.images.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Consume the state and return its diagnostics.
    pub fn into_diagnostics(self) -> Vec<Error> {
        self.diagnostics
    }

    /// Take the next image of the page, by sequential index.
    fn next_image(&mut self) -> (String, Option<ImageResource>) {
        let id = image_resource_id(self.page_counter, self.next_image_index);
        self.next_image_index += 1;
        let image = self.images.remove(&id);
        (id, image)
    }
}

/// Compile `node` and its subtree, appending the result under `parent`.
pub fn compile(node: &StructureNode, parent: &mut SemanticNode, state: &mut PageState<'_>) {
    let action = node.role.as_deref().map(|role| state.roles.resolve(role));

    let target: &mut SemanticNode = match action {
        Some(RoleAction::SkipSubtree) => return,
        Some(RoleAction::Emit(ContainerKind::Figure)) => {
            let figure = open_figure(node, state);
            parent.push_child(figure)
        },
        Some(RoleAction::Emit(kind)) => parent.push_child(SemanticNode::new(kind)),
        Some(RoleAction::Unsupported) => {
            log::debug!("Unsupported role {:?}, passing content through", node.role);
            parent
        },
        Some(RoleAction::PassThrough) | None => parent,
    };

    match node.kind {
        NodeKind::Content => attach_content(node, target, state),
        NodeKind::Object => {
            log::debug!("Object reference {:?} not rendered", node.content_id);
        },
        NodeKind::None => {},
    }

    for child in &node.children {
        compile(child, target, state);
    }
}

/// Build a figure container bound to the page's next image.
fn open_figure(node: &StructureNode, state: &mut PageState<'_>) -> SemanticNode {
    state.figures += 1;
    let mut figure = SemanticNode::new(ContainerKind::Figure);

    let (id, image) = state.next_image();
    match image {
        Some(image) => figure.image = Some(image),
        None => log::warn!("Figure has no decoded image {}", id),
    }

    if let Some(alt) = node.alt_text.as_deref().filter(|alt| !alt.is_empty()) {
        figure.alt_text = Some(alt.to_string());
        if state.figure_captions {
            figure.push_child(SemanticNode::new(ContainerKind::Caption).with_text(alt));
        }
    }

    figure
}

/// Append the assembled text of a content leaf to `target`.
fn attach_content(node: &StructureNode, target: &mut SemanticNode, state: &mut PageState<'_>) {
    let Some(id) = node.content_id.as_deref() else {
        log::warn!("Content node without marked-content id");
        return;
    };

    match state.records.get(id) {
        Some(record) => target.append_text(&record.text),
        None => {
            log::warn!("Missing content record {}", id);
            state.report(Error::MissingContentRecord(id.to_string()));
        },
    }
}
