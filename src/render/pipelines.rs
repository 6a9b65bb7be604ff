use wgpu::*;

pub const DEPTH_STENCIL_FORMAT: TextureFormat = TextureFormat::Depth24PlusStencil8;

pub fn create_primitive_state(cull_mode: Option<Face>) -> PrimitiveState {
    PrimitiveState {
        topology: PrimitiveTopology::TriangleList,
        strip_index_format: None,
        front_face: FrontFace::Ccw,
        cull_mode,
        polygon_mode: PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}

/// Volume geometry must rasterize past the far plane for the dark cap
/// at infinity, so depth clipping is off (`DEPTH_CLIP_CONTROL`).
pub fn create_volume_primitive_state() -> PrimitiveState {
    PrimitiveState {
        unclipped_depth: true,
        ..create_primitive_state(None)
    }
}

/// Silhouette overlays rasterize the extracted edges as lines.
pub fn create_line_primitive_state() -> PrimitiveState {
    PrimitiveState {
        topology: PrimitiveTopology::LineList,
        ..create_primitive_state(None)
    }
}

pub fn create_multisample_state() -> MultisampleState {
    MultisampleState {
        count: 1,
        mask: !0,
        alpha_to_coverage_enabled: false,
    }
}

/// Ambient pass: depth test + write, no stencil involvement.
pub fn create_ambient_depth_stencil_state() -> DepthStencilState {
    DepthStencilState {
        format: DEPTH_STENCIL_FORMAT,
        depth_write_enabled: true,
        depth_compare: CompareFunction::Less,
        stencil: StencilState::default(),
        bias: DepthBiasState::default(),
    }
}

/// The z-fail stencil rule: depth-test *failures* drive the counter.
/// Front faces decrement on depth fail, back faces increment, both
/// wrapping; depth passes leave the stencil alone. Counting failures
/// instead of passes keeps the count correct with the viewer inside a
/// volume.
pub fn zfail_stencil_state() -> StencilState {
    StencilState {
        front: StencilFaceState {
            compare: CompareFunction::Always,
            fail_op: StencilOperation::Keep,
            depth_fail_op: StencilOperation::DecrementWrap,
            pass_op: StencilOperation::Keep,
        },
        back: StencilFaceState {
            compare: CompareFunction::Always,
            fail_op: StencilOperation::Keep,
            depth_fail_op: StencilOperation::IncrementWrap,
            pass_op: StencilOperation::Keep,
        },
        read_mask: 0xff,
        write_mask: 0xff,
    }
}

/// Volume sides and dark cap: depth readonly Less, z-fail stencil ops.
pub fn create_volume_depth_stencil_state() -> DepthStencilState {
    DepthStencilState {
        format: DEPTH_STENCIL_FORMAT,
        depth_write_enabled: false,
        depth_compare: CompareFunction::Less,
        stencil: zfail_stencil_state(),
        bias: DepthBiasState::default(),
    }
}

/// Debug overlays (light markers, silhouette lines): tested against
/// the scene's depth but writing neither depth nor stencil.
pub fn create_overlay_depth_stencil_state() -> DepthStencilState {
    DepthStencilState {
        format: DEPTH_STENCIL_FORMAT,
        depth_write_enabled: false,
        depth_compare: CompareFunction::Less,
        stencil: StencilState::default(),
        bias: DepthBiasState::default(),
    }
}

/// Light cap: drawn with a depth compare of Never, so every fragment
/// is a depth failure and the z-fail ops always apply. This caps the
/// volume at the near surface without touching the depth buffer.
pub fn create_light_cap_depth_stencil_state() -> DepthStencilState {
    DepthStencilState {
        depth_compare: CompareFunction::Never,
        ..create_volume_depth_stencil_state()
    }
}

/// Illumination pass: re-light only the exact surface of the ambient
/// pass (depth Equal) and only outside every shadow volume (stencil
/// Equal to the zero reference, read-only).
pub fn create_illumination_depth_stencil_state() -> DepthStencilState {
    let gate = StencilFaceState {
        compare: CompareFunction::Equal,
        fail_op: StencilOperation::Keep,
        depth_fail_op: StencilOperation::Keep,
        pass_op: StencilOperation::Keep,
    };
    DepthStencilState {
        format: DEPTH_STENCIL_FORMAT,
        depth_write_enabled: false,
        depth_compare: CompareFunction::Equal,
        stencil: StencilState {
            front: gate,
            back: gate,
            read_mask: 0xff,
            write_mask: 0,
        },
        bias: DepthBiasState::default(),
    }
}

pub fn create_opaque_color_target(surface_format: TextureFormat) -> ColorTargetState {
    ColorTargetState {
        format: surface_format,
        blend: None,
        write_mask: ColorWrites::ALL,
    }
}

/// Illumination accumulates one contribution per light on top of the
/// ambient pass: destination += source.
pub fn create_additive_color_target(surface_format: TextureFormat) -> ColorTargetState {
    ColorTargetState {
        format: surface_format,
        blend: Some(BlendState {
            color: BlendComponent {
                src_factor: BlendFactor::One,
                dst_factor: BlendFactor::One,
                operation: BlendOperation::Add,
            },
            alpha: BlendComponent {
                src_factor: BlendFactor::One,
                dst_factor: BlendFactor::One,
                operation: BlendOperation::Add,
            },
        }),
        write_mask: ColorWrites::ALL,
    }
}

/// Stencil-only rendering: color writes fully masked.
pub fn create_masked_color_target(surface_format: TextureFormat) -> ColorTargetState {
    ColorTargetState {
        format: surface_format,
        blend: None,
        write_mask: ColorWrites::empty(),
    }
}

/// Debug volume rendering: translucent alpha blend over the scene.
pub fn create_debug_volume_color_target(surface_format: TextureFormat) -> ColorTargetState {
    ColorTargetState {
        format: surface_format,
        blend: Some(BlendState::ALPHA_BLENDING),
        write_mask: ColorWrites::ALL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zfail_ops_move_on_depth_failure_only() {
        let s = zfail_stencil_state();
        assert_eq!(s.front.depth_fail_op, StencilOperation::DecrementWrap);
        assert_eq!(s.back.depth_fail_op, StencilOperation::IncrementWrap);
        // Depth passes and stencil failures leave the counter alone.
        for face in [s.front, s.back] {
            assert_eq!(face.compare, CompareFunction::Always);
            assert_eq!(face.pass_op, StencilOperation::Keep);
            assert_eq!(face.fail_op, StencilOperation::Keep);
        }
    }

    #[test]
    fn illumination_gate_is_readonly_equal_zero() {
        let ds = create_illumination_depth_stencil_state();
        assert!(!ds.depth_write_enabled);
        assert_eq!(ds.depth_compare, CompareFunction::Equal);
        assert_eq!(ds.stencil.front.compare, CompareFunction::Equal);
        assert_eq!(ds.stencil.write_mask, 0);
    }

    #[test]
    fn overlay_state_reads_depth_but_writes_nothing() {
        let ds = create_overlay_depth_stencil_state();
        assert!(!ds.depth_write_enabled);
        assert_eq!(ds.depth_compare, CompareFunction::Less);
        assert_eq!(ds.stencil, StencilState::default());
        assert_eq!(
            create_line_primitive_state().topology,
            PrimitiveTopology::LineList
        );
    }

    #[test]
    fn volume_passes_never_write_depth() {
        assert!(!create_volume_depth_stencil_state().depth_write_enabled);
        let cap = create_light_cap_depth_stencil_state();
        assert!(!cap.depth_write_enabled);
        assert_eq!(cap.depth_compare, CompareFunction::Never);
    }
}
