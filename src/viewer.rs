//! Page orchestration.
//!
//! [`TaggedViewer`] drives a [`DocumentSource`] page by page: it fetches the
//! page's structure tree, text fragments and images, decodes the images,
//! assembles the marked content and compiles the structure tree into a
//! [`CompiledPage`]. Pages are compiled strictly in increasing order and all
//! per-page state is rebuilt for every page; only the page counter (which
//! namespaces image ids) carries over.

use crate::config::ViewerConfig;
use crate::content::{TextFragment, assemble_marked_content};
use crate::document::DocumentSource;
use crate::error::{Error, Result};
use crate::images::{ImageResource, RasterImageObject, image_resource_id};
use crate::semantic::{CompiledPage, SemanticDocument, SemanticNode};
use crate::structure::{PageState, RoleMapper, StructureNode, compile};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Decode a page's raster images in paint order.
///
/// The `n`-th object (1-based) becomes `img_p<page_counter>_<n>`. An object
/// that fails to decode still consumes its index, so later images keep
/// their position; its error is returned alongside the decoded images.
pub fn decode_page_images(
    page_counter: u32,
    objects: &[RasterImageObject],
) -> (HashMap<String, ImageResource>, Vec<Error>) {
    let mut images = HashMap::with_capacity(objects.len());
    let mut errors = Vec::new();

    for (i, object) in objects.iter().enumerate() {
        let id = image_resource_id(page_counter, i + 1);
        match object.decode(id.clone()) {
            Ok(image) => {
                images.insert(id, image);
            },
            Err(e) => {
                log::warn!("Failed to decode image {} ({}): {}", id, object.object_id, e);
                errors.push(e);
            },
        }
    }

    (images, errors)
}

/// Compiles single pages from already-fetched inputs.
#[derive(Debug, Clone)]
pub struct PageCompiler {
    roles: RoleMapper,
    figure_captions: bool,
}

impl Default for PageCompiler {
    fn default() -> Self {
        Self::new(RoleMapper::new(), true)
    }
}

impl PageCompiler {
    /// Create a page compiler.
    pub fn new(roles: RoleMapper, figure_captions: bool) -> Self {
        Self {
            roles,
            figure_captions,
        }
    }

    /// Create a page compiler from a viewer configuration.
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(RoleMapper::with_aliases(config.role_map.clone()), config.figure_captions)
    }

    /// Compile one page.
    ///
    /// `page_counter` is the page's position in the render run and
    /// namespaces its image ids.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UntaggedDocument`] when `structure_tree` is `None`.
    /// Image and content problems are recorded in
    /// [`CompiledPage::diagnostics`] instead.
    pub fn compile_page(
        &self,
        page_number: u32,
        page_counter: u32,
        fragments: &[TextFragment],
        structure_tree: Option<&StructureNode>,
        images: &[RasterImageObject],
    ) -> Result<CompiledPage> {
        let tree = structure_tree.ok_or(Error::UntaggedDocument { page: page_number })?;

        let (decoded, mut diagnostics) = decode_page_images(page_counter, images);
        let images_decoded = decoded.len();
        let records = assemble_marked_content(fragments);

        let mut state = PageState::new(page_counter, &records, &self.roles)
            .with_images(decoded)
            .with_figure_captions(self.figure_captions);
        let mut root = SemanticNode::root();
        compile(tree, &mut root, &mut state);

        let unbound = state.unbound_images();
        if !unbound.is_empty() {
            log::debug!("Page {}: {} images not bound to a figure", page_number, unbound.len());
        }
        log::debug!(
            "Page {}: {} nodes, {} records, {} images, {} figures",
            page_number,
            root.node_count(),
            records.len(),
            images_decoded,
            state.figure_count()
        );

        diagnostics.extend(state.into_diagnostics());
        Ok(CompiledPage {
            page_number,
            page_counter,
            root,
            images_decoded,
            diagnostics,
        })
    }
}

/// Renders a tagged document into a [`SemanticDocument`].
///
/// # Example
///
/// ```
/// use pdf_tagview::config::ViewerConfig;
/// use pdf_tagview::content::TextFragment;
/// use pdf_tagview::document::{MemorySource, PageDump};
/// use pdf_tagview::structure::StructureNode;
/// use pdf_tagview::viewer::TaggedViewer;
///
/// let mut source = MemorySource::default();
/// source.push_page(PageDump {
///     structure_tree: Some(StructureNode::with_role("P").child(StructureNode::content("mc0"))),
///     text_fragments: vec![TextFragment::tagged("mc0", "Hello")],
///     images: vec![],
/// });
///
/// let mut viewer = TaggedViewer::new(source, ViewerConfig::default());
/// let document = viewer.render().unwrap();
/// assert_eq!(document.pages[0].root.text_content(), "Hello");
/// ```
pub struct TaggedViewer<S: DocumentSource> {
    source: S,
    config: ViewerConfig,
    compiler: PageCompiler,
    page_counter: u32,
}

impl<S: DocumentSource> TaggedViewer<S> {
    /// Create a viewer over a document source.
    pub fn new(source: S, config: ViewerConfig) -> Self {
        let compiler = PageCompiler::from_config(&config);
        Self {
            source,
            config,
            compiler,
            page_counter: 0,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Number of pages compiled or attempted so far.
    pub fn page_counter(&self) -> u32 {
        self.page_counter
    }

    /// Whether the first page of the configured range has a structure tree.
    pub fn is_tagged(&mut self) -> Result<bool> {
        let start = self.config.start_page;
        if start > self.source.page_count() {
            return Ok(false);
        }
        Ok(self.source.structure_tree(start)?.is_some())
    }

    /// Fetch and compile one page.
    ///
    /// Every attempt advances the page counter, so a failed page never
    /// shares an image id namespace with the next one.
    pub fn compile_page(&mut self, page_number: u32) -> Result<CompiledPage> {
        let page_count = self.source.page_count();
        if page_number == 0 || page_number > page_count {
            return Err(Error::PageOutOfRange {
                page: page_number,
                page_count,
            });
        }

        let tree = self.source.structure_tree(page_number);
        self.compile_fetched(page_number, tree)
    }

    /// Compile a page whose structure tree has already been requested.
    fn compile_fetched(
        &mut self,
        page_number: u32,
        tree: Result<Option<StructureNode>>,
    ) -> Result<CompiledPage> {
        let page_counter = self.page_counter;
        self.page_counter += 1;

        let Some(tree) = tree? else {
            return Err(Error::UntaggedDocument { page: page_number });
        };
        let fragments = self.source.text_fragments(page_number)?;
        let images = self.source.raster_images(page_number)?;

        self.compiler
            .compile_page(page_number, page_counter, &fragments, Some(&tree), &images)
    }

    /// Render every page of the configured range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UntaggedDocument`] if the first page of the range has
    /// no structure tree. Later pages that fail are logged and listed in
    /// [`SemanticDocument::skipped_pages`].
    pub fn render(&mut self) -> Result<SemanticDocument> {
        self.render_until(&AtomicBool::new(false))
    }

    /// Render like [`render`](Self::render), stopping between pages once
    /// `cancel` is set.
    ///
    /// Pages completed before cancellation are returned and
    /// [`SemanticDocument::cancelled_before`] names the first page left out.
    pub fn render_until(&mut self, cancel: &AtomicBool) -> Result<SemanticDocument> {
        let page_count = self.source.page_count();
        let Some((start, end)) = self.config.page_range(page_count) else {
            log::info!("No pages to render ({} in document)", page_count);
            return Ok(SemanticDocument::default());
        };

        let Some(first_tree) = self.source.structure_tree(start)? else {
            return Err(Error::UntaggedDocument { page: start });
        };
        let mut first_tree = Some(first_tree);

        let metadata = self.source.metadata().unwrap_or_else(|e| {
            log::warn!("Failed to read document metadata: {}", e);
            Default::default()
        });
        let mut document = SemanticDocument {
            metadata,
            ..Default::default()
        };

        log::info!("Rendering pages {}-{} of {}", start, end, page_count);
        for page_number in start..=end {
            if cancel.load(Ordering::Relaxed) {
                log::info!("Render cancelled before page {}", page_number);
                document.cancelled_before = Some(page_number);
                break;
            }

            let compiled = match first_tree.take() {
                Some(tree) => self.compile_fetched(page_number, Ok(Some(tree))),
                None => self.compile_page(page_number),
            };
            match compiled {
                Ok(page) => {
                    for diagnostic in &page.diagnostics {
                        if diagnostic.is_recoverable() {
                            log::debug!("Page {}: {}", page_number, diagnostic);
                        } else {
                            log::warn!("Page {}: {}", page_number, diagnostic);
                        }
                    }
                    document.pages.push(page);
                },
                Err(e) => {
                    log::warn!("Skipping page {}: {}", page_number, e);
                    document.skipped_pages.push(page_number);
                },
            }
        }

        log::info!(
            "Rendered {} pages ({} skipped, {} diagnostics)",
            document.pages.len(),
            document.skipped_pages.len(),
            document.diagnostic_count()
        );
        Ok(document)
    }
}
