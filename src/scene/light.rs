use std::cell::Cell;

use glam::{Mat4, Vec3};

/// Projection used for the light's shadow pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShadowProjection {
    /// Directional-style light: fixed orthographic volume.
    Orthographic { extent: f32, near: f32, far: f32 },
    /// Spot-style light: perspective cone. `fov` is in radians.
    Perspective { fov: f32, near: f32, far: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowConfig {
    pub map_size: u32,
    pub bias: f32,
    pub normal_bias: f32,
    pub projection: ShadowProjection,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            map_size: 1024,
            bias: 0.005,
            normal_bias: 0.02,
            projection: ShadowProjection::Orthographic {
                extent: 30.0,
                near: 0.1,
                far: 150.0,
            },
        }
    }
}

/// A shadow-casting light.
///
/// The light-space view-projection matrix is a cached derived value: it is
/// recomputed only when the position, direction or shadow configuration
/// changes (a debug-UI edit between ticks), not every frame.
#[derive(Debug)]
pub struct Light {
    position: Vec3,
    direction: Vec3,
    shadow: ShadowConfig,
    pub color: Vec3,
    pub intensity: f32,

    cached_vp: Cell<Option<Mat4>>,
}

impl Light {
    /// Creates a light at `position` aimed at the origin.
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            direction: -position,
            shadow: ShadowConfig::default(),
            color: Vec3::ONE,
            intensity: 1.0,
            cached_vp: Cell::new(None),
        }
    }

    #[must_use]
    pub fn with_shadow(mut self, shadow: ShadowConfig) -> Self {
        self.shadow = shadow;
        self
    }

    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Moves the light and invalidates the cached shadow matrix.
    pub fn set_position(&mut self, position: Vec3) {
        if self.position != position {
            self.position = position;
            self.cached_vp.set(None);
        }
    }

    /// Aims the light at `target` and invalidates the cached shadow matrix.
    pub fn look_at(&mut self, target: Vec3) {
        let direction = target - self.position;
        if self.direction != direction {
            self.direction = direction;
            self.cached_vp.set(None);
        }
    }

    #[must_use]
    pub fn shadow(&self) -> ShadowConfig {
        self.shadow
    }

    /// Replaces the shadow configuration and invalidates the cached matrix.
    pub fn set_shadow(&mut self, shadow: ShadowConfig) {
        if self.shadow != shadow {
            self.shadow = shadow;
            self.cached_vp.set(None);
        }
    }

    /// Light-space view-projection matrix, recomputed only after an edit.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        if let Some(vp) = self.cached_vp.get() {
            return vp;
        }
        let (view, projection) = self.view_and_projection();
        let vp = projection * view;
        self.cached_vp.set(Some(vp));
        vp
    }

    /// The view and projection halves of the shadow matrix.
    #[must_use]
    pub fn view_and_projection(&self) -> (Mat4, Mat4) {
        let safe_dir = if self.direction.length_squared() > 1e-6 {
            self.direction.normalize()
        } else {
            -Vec3::Z
        };
        // Degenerate up vector when looking straight down or up.
        let up = if safe_dir.y.abs() > 0.99 { Vec3::X } else { Vec3::Y };

        match self.shadow.projection {
            ShadowProjection::Orthographic { extent, near, far } => {
                let center = self.position + safe_dir;
                let view = Mat4::look_at_rh(self.position, center, up);
                let proj = Mat4::orthographic_rh(-extent, extent, -extent, extent, near, far);
                (view, proj)
            }
            ShadowProjection::Perspective { fov, near, far } => {
                let view = Mat4::look_at_rh(self.position, self.position + safe_dir, up);
                let fov = fov.clamp(0.1, std::f32::consts::PI - 0.01);
                let proj = Mat4::perspective_rh(fov, 1.0, near, far.max(near + 1.0));
                (view, proj)
            }
        }
    }
}
