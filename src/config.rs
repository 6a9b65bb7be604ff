/// Frame-to-frame render toggles, passed by reference into the
/// renderer and scene update at each call site.
#[derive(Clone, Copy, Debug)]
pub struct RenderConfig {
    /// Run the stencil volume pass. Off, lights still illuminate but
    /// nothing occludes them.
    pub draw_shadows: bool,
    /// Rasterize the extruded volumes translucently instead of
    /// stencil-only.
    pub draw_shadow_volumes: bool,
    /// Skip the whole per-light loop; ambient pass only.
    pub ambient_only: bool,
    /// Draw a marker at each visible point light's position.
    pub draw_light_markers: bool,
    /// Overlay each caster's silhouette edges for the current light.
    pub draw_silhouettes: bool,
    /// Lights past this count are skipped, not an error.
    pub max_visible_lights: usize,
    pub animate: bool,
    /// Flat ambient term applied in the ambient pass.
    pub ambient_level: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            draw_shadows: true,
            draw_shadow_volumes: false,
            ambient_only: false,
            draw_light_markers: true,
            draw_silhouettes: false,
            max_visible_lights: 1,
            animate: true,
            ambient_level: 0.08,
        }
    }
}
