//! Scene composition: the static inputs a frame draws from.
//!
//! A [`Composition`] is assembled once at setup and lives for the process
//! lifetime. The render loop never observes a partially built scene:
//! the builder either returns a fully populated composition or the setup
//! phase fails with [`PrismError::AssetLoad`](crate::errors::PrismError).
//!
//! Between frame ticks an external debug UI may edit surface static
//! uniforms ([`ShaderSurface::set_static`]) and the light configuration;
//! each change takes effect on the next tick without a setup re-run. The
//! single-threaded host loop makes the between-ticks rule automatic.

pub mod camera;
pub mod light;
pub mod presets;
pub mod surface;

use slotmap::SlotMap;

use crate::errors::{PrismError, Result};
use crate::graph::pass::LayerMask;

pub use camera::Camera;
pub use light::{Light, ShadowConfig, ShadowProjection};
pub use surface::{
    ClockBinding, DerivedBinding, GeometryRef, ShaderSurface, SurfaceKey, UniformBinding,
    UniformName,
};

/// Provides the geometry referenced by surfaces during setup.
///
/// Decoding stays outside the crate; the builder only asks the source to
/// load each reference before the composition is handed to the render
/// loop. A load failure is fatal and aborts the whole setup.
pub trait AssetSource {
    /// Loads the referenced geometry, or reports why it cannot.
    fn load(&mut self, geometry: &GeometryRef) -> std::io::Result<()>;
}

/// The static scene inputs: shader surfaces, the camera and the light.
pub struct Composition {
    surfaces: SlotMap<SurfaceKey, ShaderSurface>,
    pub camera: Camera,
    pub light: Light,
}

impl Composition {
    /// Starts a builder with the two required collaborators.
    #[must_use]
    pub fn builder(camera: Camera, light: Light) -> CompositionBuilder {
        CompositionBuilder {
            camera,
            light,
            surfaces: Vec::new(),
        }
    }

    #[must_use]
    pub fn surface(&self, key: SurfaceKey) -> Option<&ShaderSurface> {
        self.surfaces.get(key)
    }

    /// Mutable access for the debug-control surface (between ticks only).
    pub fn surface_mut(&mut self, key: SurfaceKey) -> Option<&mut ShaderSurface> {
        self.surfaces.get_mut(key)
    }

    /// Surfaces whose layers intersect `mask`, i.e. the scene subset one
    /// pass draws.
    pub fn surfaces_on(
        &self,
        mask: LayerMask,
    ) -> impl Iterator<Item = (SurfaceKey, &ShaderSurface)> {
        self.surfaces
            .iter()
            .filter(move |(_, s)| s.layers.intersects(mask))
    }

    #[must_use]
    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }
}

/// Collects surfaces, then builds the composition atomically.
pub struct CompositionBuilder {
    camera: Camera,
    light: Light,
    surfaces: Vec<ShaderSurface>,
}

impl CompositionBuilder {
    /// Adds a surface (chainable).
    #[must_use]
    pub fn with_surface(mut self, surface: ShaderSurface) -> Self {
        self.surfaces.push(surface);
        self
    }

    /// Loads every referenced geometry from `assets`, then builds the
    /// composition.
    ///
    /// The failure is atomic: on the first load error the builder is
    /// dropped and no composition escapes.
    ///
    /// # Errors
    ///
    /// [`PrismError::AssetLoad`] naming the geometry that failed.
    pub fn try_build(
        self,
        assets: &mut dyn AssetSource,
    ) -> Result<(Composition, Vec<SurfaceKey>)> {
        for surface in &self.surfaces {
            assets
                .load(&surface.geometry)
                .map_err(|source| PrismError::AssetLoad {
                    path: surface.geometry.name().to_owned(),
                    source,
                })?;
        }
        Ok(self.build())
    }

    /// Builds the composition from already-loaded surfaces and returns the
    /// keys of the added surfaces, in insertion order.
    #[must_use]
    pub fn build(self) -> (Composition, Vec<SurfaceKey>) {
        let mut surfaces = SlotMap::with_key();
        let keys = self
            .surfaces
            .into_iter()
            .map(|s| surfaces.insert(s))
            .collect();
        (
            Composition {
                surfaces,
                camera: self.camera,
                light: self.light,
            },
            keys,
        )
    }
}
