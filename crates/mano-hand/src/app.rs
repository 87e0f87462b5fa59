use anyhow::{Context, Result};

use mano_engine::core::{App, AppControl, FrameCtx};
use mano_engine::render::{CubeRenderer, Texture, TextureImage};
use mano_engine::scene::DrawList;

use crate::camera::{projection, view_transform};
use crate::config::HandConfig;
use crate::controls::{pose_delta, scroll_lines};
use crate::hand::draw_hand;
use crate::pose::HandPose;

/// Decodes the exoskeleton texture named by `config` and checks it fits the
/// device limits that will be requested.
pub fn load_texture(config: &HandConfig) -> Result<TextureImage> {
    let texture = TextureImage::open(&config.texture_path)
        .and_then(|t| {
            t.check_size(config.gpu.required_limits.max_texture_dimension_2d)?;
            Ok(t)
        })
        .context("failed to load exoskeleton texture")?;

    log::info!(
        "loaded {} ({}x{}, {} channels)",
        config.texture_path.display(),
        texture.width,
        texture.height,
        texture.channels
    );
    Ok(texture)
}

/// Engine-facing application state of the viewer.
pub struct HandApp {
    config: HandConfig,
    pose: HandPose,

    draw_list: DrawList,
    renderer: CubeRenderer,

    /// Decoded exoskeleton texture, uploaded on the first rendered frame.
    pending_texture: Option<TextureImage>,
    fatal: Option<anyhow::Error>,
}

impl HandApp {
    pub fn new(config: HandConfig, texture: TextureImage) -> Self {
        let pose = HandPose::new(&config.controls);
        Self {
            config,
            pose,
            draw_list: DrawList::new(),
            renderer: CubeRenderer::new(),
            pending_texture: Some(texture),
            fatal: None,
        }
    }
}

impl App for HandApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        // ── Input → pose ──────────────────────────────────────────────────
        let controls = &self.config.controls;
        let lines = scroll_lines(ctx.input_frame, controls);
        let delta = pose_delta(&ctx.input.keys_down, lines, controls);
        if !delta.is_zero() {
            self.pose.apply(&delta, controls);
            log::trace!("pose {:?}", self.pose);
        }

        // ── Scene ─────────────────────────────────────────────────────────
        let view = view_transform(&self.pose.camera, &self.config.projection);
        self.draw_list.clear();
        draw_hand(&mut self.draw_list, view, &self.pose.joints);

        // ── Render ────────────────────────────────────────────────────────
        let renderer = &mut self.renderer;
        let pending = &mut self.pending_texture;
        let draw_list = &self.draw_list;
        let material = &self.config.material;
        let proj_cfg = &self.config.projection;
        let fatal = &mut self.fatal;

        let control = ctx.render(self.config.clear_color, |rctx, target| {
            if let Some(image) = pending.take() {
                match Texture::from_image(rctx.device, rctx.queue, &image, "exoskeleton") {
                    Ok(texture) => {
                        log::info!(
                            "exoskeleton texture ready ({}x{})",
                            texture.width,
                            texture.height
                        );
                        renderer.set_texture(texture);
                    }
                    Err(err) => {
                        *fatal = Some(anyhow::Error::new(err).context("failed to upload texture"));
                        return;
                    }
                }
            }

            let proj = projection(proj_cfg, rctx.aspect());
            renderer.render(rctx, target, draw_list, proj, material);
        });

        if self.fatal.is_some() {
            return AppControl::Exit;
        }
        control
    }

    fn take_error(&mut self) -> Option<anyhow::Error> {
        self.fatal.take()
    }
}
