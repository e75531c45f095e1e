//! Render target contracts.
//!
//! The scheduler never touches GPU memory itself; it routes each pass to
//! one of three logical targets and leaves the backing store to the
//! [`DrawBackend`](crate::graph::DrawBackend). Attachments are exposed as
//! opaque [`TextureHandle`]s so that pass outputs can flow through the
//! frame context without the crate depending on any graphics API.

use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TEXTURE_HANDLE: AtomicU64 = AtomicU64::new(1);

/// Opaque identifier of a texture-like resource.
///
/// Handles are unique per allocation; [`TextureHandle::ZERO`] names the
/// documented zero-filled fallback texture used when a context binding is
/// resolved before its producer pass has run (frame 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureHandle(u64);

impl TextureHandle {
    /// The zero-filled fallback texture.
    pub const ZERO: Self = Self(0);

    /// Allocates a fresh, process-unique handle.
    #[must_use]
    pub fn generate() -> Self {
        Self(NEXT_TEXTURE_HANDLE.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Which of the frame's targets a pass draws into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// Off-screen depth-only target (depth pre-pass).
    OffscreenDepth,
    /// Off-screen shadow-map target.
    OffscreenShadow,
    /// The on-screen framebuffer.
    Screen,
}

/// Texture filtering for target attachments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    Nearest,
    Linear,
}

/// How a target's attachments are sampled by downstream passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampling {
    pub filter: FilterMode,
    pub generate_mipmaps: bool,
}

impl Sampling {
    /// Depth and shadow attachments: nearest-neighbour, no mipmaps.
    /// Filtering or mip chains would corrupt depth comparisons.
    pub const DEPTH: Self = Self {
        filter: FilterMode::Nearest,
        generate_mipmaps: false,
    };

    /// Color attachments: linear filtering with mipmaps.
    pub const COLOR: Self = Self {
        filter: FilterMode::Linear,
        generate_mipmaps: true,
    };
}

/// An off-screen color/depth buffer pair or the on-screen framebuffer.
pub trait RenderTarget {
    /// Color attachment, if the target has one.
    fn color_attachment(&self) -> Option<TextureHandle>;

    /// Depth attachment. Only off-screen depth/shadow targets expose one.
    fn depth_attachment(&self) -> Option<TextureHandle>;

    /// How downstream passes sample this target's attachments.
    fn sampling(&self) -> Sampling;

    /// Reallocates the backing store for a new viewport size.
    fn resize(&mut self, width: u32, height: u32);
}

/// Handle-based off-screen target with no GPU backing.
///
/// Suitable for composition, tests and recording backends; a GPU-backed
/// implementation of [`RenderTarget`] belongs to the draw backend.
#[derive(Debug)]
pub struct OffscreenTarget {
    color: Option<TextureHandle>,
    depth: Option<TextureHandle>,
    sampling: Sampling,
    size: (u32, u32),
}

impl OffscreenTarget {
    /// Depth-only target for a depth pre-pass.
    #[must_use]
    pub fn depth_only(width: u32, height: u32) -> Self {
        Self {
            color: None,
            depth: Some(TextureHandle::generate()),
            sampling: Sampling::DEPTH,
            size: (width, height),
        }
    }

    /// Square shadow-map target.
    #[must_use]
    pub fn shadow_map(map_size: u32) -> Self {
        Self {
            color: None,
            depth: Some(TextureHandle::generate()),
            sampling: Sampling::DEPTH,
            size: (map_size, map_size),
        }
    }

    /// Off-screen color target with a depth buffer.
    #[must_use]
    pub fn color(width: u32, height: u32) -> Self {
        Self {
            color: Some(TextureHandle::generate()),
            depth: Some(TextureHandle::generate()),
            sampling: Sampling::COLOR,
            size: (width, height),
        }
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}

impl RenderTarget for OffscreenTarget {
    fn color_attachment(&self) -> Option<TextureHandle> {
        self.color
    }

    fn depth_attachment(&self) -> Option<TextureHandle> {
        self.depth
    }

    fn sampling(&self) -> Sampling {
        self.sampling
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.size == (width, height) || width == 0 || height == 0 {
            return;
        }
        self.size = (width, height);
        // Reallocation invalidates previously published attachment handles,
        // matching GPU texture recreation.
        if self.color.is_some() {
            self.color = Some(TextureHandle::generate());
        }
        if self.depth.is_some() {
            self.depth = Some(TextureHandle::generate());
        }
    }
}

/// The on-screen framebuffer. Color only; its buffer is presented by the
/// host after the final pass.
#[derive(Debug)]
pub struct ScreenTarget {
    color: TextureHandle,
    size: (u32, u32),
}

impl ScreenTarget {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            color: TextureHandle::generate(),
            size: (width, height),
        }
    }

    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }
}

impl RenderTarget for ScreenTarget {
    fn color_attachment(&self) -> Option<TextureHandle> {
        Some(self.color)
    }

    fn depth_attachment(&self) -> Option<TextureHandle> {
        None
    }

    fn sampling(&self) -> Sampling {
        Sampling::COLOR
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.size == (width, height) || width == 0 || height == 0 {
            return;
        }
        self.size = (width, height);
        self.color = TextureHandle::generate();
    }
}

/// One render target per [`TargetKind`], owned for the process lifetime.
pub struct RenderTargetSet {
    offscreen_depth: Box<dyn RenderTarget>,
    offscreen_shadow: Box<dyn RenderTarget>,
    screen: Box<dyn RenderTarget>,
}

impl RenderTargetSet {
    #[must_use]
    pub fn new(
        offscreen_depth: Box<dyn RenderTarget>,
        offscreen_shadow: Box<dyn RenderTarget>,
        screen: Box<dyn RenderTarget>,
    ) -> Self {
        Self {
            offscreen_depth,
            offscreen_shadow,
            screen,
        }
    }

    /// Handle-based default set for a viewport.
    #[must_use]
    pub fn offscreen(width: u32, height: u32, shadow_map_size: u32) -> Self {
        Self::new(
            Box::new(OffscreenTarget::depth_only(width, height)),
            Box::new(OffscreenTarget::shadow_map(shadow_map_size)),
            Box::new(ScreenTarget::new(width, height)),
        )
    }

    #[must_use]
    pub fn get(&self, kind: TargetKind) -> &dyn RenderTarget {
        match kind {
            TargetKind::OffscreenDepth => self.offscreen_depth.as_ref(),
            TargetKind::OffscreenShadow => self.offscreen_shadow.as_ref(),
            TargetKind::Screen => self.screen.as_ref(),
        }
    }

    pub fn get_mut(&mut self, kind: TargetKind) -> &mut dyn RenderTarget {
        match kind {
            TargetKind::OffscreenDepth => self.offscreen_depth.as_mut(),
            TargetKind::OffscreenShadow => self.offscreen_shadow.as_mut(),
            TargetKind::Screen => self.screen.as_mut(),
        }
    }

    /// Resizes the viewport-sized targets. The shadow map keeps its own
    /// resolution.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.offscreen_depth.resize(width, height);
        self.screen.resize(width, height);
    }
}
