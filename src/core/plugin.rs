//! Plugin lifecycle: registration with the host and crop-flow orchestration
//!
//! [`CropPlugin`] is loaded and unloaded by a runtime it does not own:
//! `start` takes the injected collaborators and registers the renderer's
//! reprocess pass with the host's event bus, `stop` unregisters everything.
//! In between it drives the crop session from entry point to confirmation.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{Context, Result, bail};
use image::RgbaImage;

use crate::config::CropConfig;
use crate::domain::embed::{self, Embed};
use crate::host::{FileStore, HostContext, SubscriptionId, WorkspaceEvent};
use crate::render::{EmbedNode, EmbedRenderer};
use crate::session::{CropCanvas, CropSession};

/// Renderer state shared with the event-bus callbacks
struct RendererState {
    renderer: EmbedRenderer,
    embeds: Vec<EmbedNode>,
}

/// The crop plugin: settings, renderer wiring, and session entry points
pub struct CropPlugin {
    host: Option<HostContext>,
    config: CropConfig,
    state: Rc<RefCell<RendererState>>,
    subscriptions: Vec<SubscriptionId>,
}

impl Default for CropPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl CropPlugin {
    pub fn new() -> Self {
        Self {
            host: None,
            config: CropConfig::default(),
            state: Rc::new(RefCell::new(RendererState {
                renderer: EmbedRenderer::default(),
                embeds: Vec::new(),
            })),
            subscriptions: Vec::new(),
        }
    }

    /// Register with the host: load settings and subscribe the renderer to
    /// every content-change signal
    ///
    /// Starting while already started unregisters from the previous host
    /// first.
    pub fn start(&mut self, host: HostContext) {
        self.stop();
        self.config = CropConfig::load(host.settings.as_ref());
        self.state.borrow_mut().renderer = EmbedRenderer::new(self.config.show_preview_on_hover);

        for event in [
            WorkspaceEvent::LayoutChanged,
            WorkspaceEvent::ActiveViewChanged,
            WorkspaceEvent::ContentInserted,
        ] {
            let state = Rc::clone(&self.state);
            let files = Rc::clone(&host.files);
            let id = host
                .events
                .subscribe(event, Rc::new(move || reprocess(&state, files.as_ref())));
            self.subscriptions.push(id);
        }
        self.host = Some(host);
    }

    /// Unregister from the host and drop the rendered view; safe to call
    /// more than once
    pub fn stop(&mut self) {
        if let Some(host) = self.host.take() {
            for id in self.subscriptions.drain(..) {
                host.events.unsubscribe(id);
            }
        }
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.embeds.clear();
        }
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    /// Change settings, persist them, and refresh the renderer
    pub fn update_config(&mut self, mutate: impl FnOnce(&mut CropConfig)) {
        mutate(&mut self.config);
        if let Some(host) = &self.host {
            self.config.save(host.settings.as_ref());
        }
        if let Ok(mut state) = self.state.try_borrow_mut() {
            state.renderer = EmbedRenderer::new(self.config.show_preview_on_hover);
        }
    }

    /// Entry point: open the picker over the vault's images
    ///
    /// Returns `None` with a user-visible notice when the vault holds no
    /// images, or when the plugin has not been started.
    pub fn open_crop_session(&self) -> Option<CropSession> {
        let host = self.host.as_ref()?;
        let files = host.files.list_images();
        if files.is_empty() {
            host.notices.notice("No images found");
            return None;
        }
        Some(CropSession::new(files))
    }

    /// Advance the session from the picker to the crop canvas
    ///
    /// Reads and decodes the chosen image; on failure the canvas does not
    /// open and the session stays in the picker phase.
    pub fn open_canvas(&self, session: &mut CropSession) -> Result<()> {
        let host = self.host.as_ref().context("plugin not started")?;
        let Some(file) = session.picker().selection().map(str::to_string) else {
            bail!("no image selected");
        };

        let image = match self.load_bitmap(&file) {
            Ok(image) => image,
            Err(err) => {
                host.notices.notice("Failed to load image");
                return Err(err);
            }
        };
        session.open_canvas(CropCanvas::new(image));
        Ok(())
    }

    /// Accept the crop: encode it, append the embed line to the active
    /// document, and rerun the renderer
    ///
    /// Consumes the session; its state is discarded either way. Returns the
    /// written embed line.
    pub fn confirm_crop(&self, session: CropSession) -> Result<String> {
        let host = self.host.as_ref().context("plugin not started")?;
        let Some(canvas) = session.canvas() else {
            bail!("crop canvas was never opened");
        };
        let Some(file) = session.picker().selection() else {
            bail!("no image selected");
        };

        // The file must still be present in the store at confirm time
        if host.files.read_binary(file).is_err() {
            host.notices.notice("Image file not found");
            bail!("image file {file} disappeared before confirmation");
        }

        let alias = canvas.confirm().encode();
        let line = embed::embed_line(file, &alias);
        // New embeds go on their own line at the end of the document
        let written = host
            .files
            .read_document()
            .and_then(|document| host.files.insert_text(document.len(), &format!("\n{line}\n")));
        if let Err(err) = written {
            host.notices.notice("Failed to update note");
            return Err(err);
        }

        self.reprocess_visible_embeds();
        Ok(line)
    }

    /// Cancel the session: discard all state with no document mutation
    pub fn cancel(&self, session: CropSession) {
        drop(session);
    }

    /// Single renderer entry point, also invoked by the event subscriptions
    pub fn reprocess_visible_embeds(&self) {
        if let Some(host) = &self.host {
            reprocess(&self.state, host.files.as_ref());
        }
    }

    /// Hover handling for a rendered embed, by index into [`Self::embeds`]
    pub fn embed_pointer(&self, index: usize, over_embed: bool, over_preview: bool) {
        let Ok(mut state) = self.state.try_borrow_mut() else {
            return;
        };
        let renderer = state.renderer;
        if let Some(node) = state.embeds.get_mut(index) {
            if over_embed && !node.preview_open {
                renderer.pointer_entered(node);
            } else {
                renderer.pointer_moved(node, over_embed, over_preview);
            }
        }
    }

    /// Snapshot of the rendered embed view for the host to paint
    pub fn embeds(&self) -> Vec<EmbedNode> {
        self.state.borrow().embeds.clone()
    }

    fn load_bitmap(&self, file: &str) -> Result<RgbaImage> {
        let host = self.host.as_ref().context("plugin not started")?;
        let bytes = host.files.read_binary(file)?;
        let image = image::load_from_memory(&bytes)
            .with_context(|| format!("decoding {file}"))?;
        Ok(image.to_rgba8())
    }
}

/// Re-scan the active document and run the embed pass
///
/// May be invoked repeatedly and from overlapping event deliveries; a pass
/// already in flight simply wins and the next event catches up.
fn reprocess(state: &RefCell<RendererState>, files: &dyn FileStore) {
    let document = match files.read_document() {
        Ok(text) => text,
        Err(err) => {
            log::warn!("skipping embed pass, document unreadable: {err:?}");
            return;
        }
    };

    let Ok(mut state) = state.try_borrow_mut() else {
        return;
    };
    sync_embeds(&mut state.embeds, embed::find_embeds(&document), files);
    let renderer = state.renderer;
    renderer.reprocess_visible_embeds(&mut state.embeds);
}

/// Reconcile the rendered nodes with the embeds currently in the document
///
/// Nodes whose source and alias are unchanged are reused so their processed
/// flag keeps repeated passes idempotent; new embeds get fresh nodes with
/// the image's natural size resolved up front. An unprocessed node whose
/// bitmap never decoded is probed again on every pass, so an embed becomes
/// croppable as soon as its file turns up decodable.
fn sync_embeds(nodes: &mut Vec<EmbedNode>, found: Vec<Embed>, files: &dyn FileStore) {
    let mut previous: Vec<Option<EmbedNode>> = nodes.drain(..).map(Some).collect();
    for embed in found {
        let reused = previous
            .iter_mut()
            .find(|slot| {
                matches!(slot, Some(node) if node.source == embed.source && node.alias == embed.alias)
            })
            .and_then(Option::take);
        let mut node = reused.unwrap_or_else(|| EmbedNode::new(embed.source.clone(), embed.alias));
        if !node.processed && node.natural_size.is_none() && node.crop().is_some() {
            node.natural_size = natural_size(files, &node.source);
        }
        nodes.push(node);
    }
}

/// Natural bitmap dimensions, `None` when the file is missing or the
/// platform decoder rejects it (the embed is then left unprocessed)
fn natural_size(files: &dyn FileStore, source: &str) -> Option<(u32, u32)> {
    let bytes = files.read_binary(source).ok()?;
    let image = image::load_from_memory(&bytes).ok()?;
    Some((image.width(), image.height()))
}
