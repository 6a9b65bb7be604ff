use std::sync::Arc;

use anyhow::{Context, Result};
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::render::GpuContext;

/// Window plus GPU context. Created once the event loop is running,
/// since winit 0.30 only hands out windows from `resumed`.
pub struct App {
    pub window: Arc<Window>,
    pub gpu: GpuContext,
}

impl App {
    pub async fn new(event_loop: &ActiveEventLoop, title: &str) -> Result<Self> {
        let window_attributes = Window::default_attributes()
            .with_title(title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        let gpu = GpuContext::new(window.clone()).await?;

        Ok(Self { window, gpu })
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.gpu.resize(new_size);
    }
}
