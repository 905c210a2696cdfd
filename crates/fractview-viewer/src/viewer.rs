use anyhow::Result;

use fractview_engine::coords::{ViewState, Viewport};
use fractview_engine::core::{App, AppControl, FrameCtx, ParamSliders, WindowCtx};
use fractview_engine::input::{ButtonState, InputEvent, PanZoomController};
use fractview_engine::render::{FrameRenderer, RenderCtx, ShaderSources};

use crate::config::ViewerConfig;
use crate::controls::{command_for, Command};

/// What an input event did to the viewer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum InputOutcome {
    Ignored,
    Redraw,
    Exit,
}

/// The viewer application: one renderer, one view, one control surface.
pub struct Viewer {
    renderer: FrameRenderer,
    view: ViewState,
    controller: PanZoomController,
    sliders: ParamSliders,
    title: String,
    /// Latest FPS sample, shown in the title after the frame that produced it.
    pending_fps: Option<u32>,
}

impl Viewer {
    pub fn new(config: &ViewerConfig) -> Self {
        let mut renderer = FrameRenderer::new(ShaderSources::mandelbrot());
        renderer.set_continuous(config.continuous);

        Self {
            renderer,
            view: ViewState::default(),
            controller: PanZoomController::new(),
            sliders: config.sliders(),
            title: config.title.clone(),
            pending_fps: None,
        }
    }

    fn handle_input(&mut self, event: &InputEvent, viewport: Viewport) -> InputOutcome {
        if let InputEvent::Key {
            key,
            state: ButtonState::Pressed,
            modifiers,
            ..
        } = event
        {
            return match command_for(*key, *modifiers) {
                Some(cmd) => self.apply(cmd),
                None => InputOutcome::Ignored,
            };
        }

        if self.controller.handle(event, viewport, &mut self.view) {
            InputOutcome::Redraw
        } else {
            InputOutcome::Ignored
        }
    }

    fn apply(&mut self, cmd: Command) -> InputOutcome {
        let changed = match cmd {
            Command::NudgeIterations(delta) => self.sliders.nudge_iterations(delta),
            Command::NudgeChannel(channel, delta) => self.sliders.nudge_channel(channel, delta),
            Command::ToggleContinuous => {
                let on = !self.renderer.is_continuous();
                self.renderer.set_continuous(on);
                log::info!("continuous redraw {}", if on { "on" } else { "off" });
                true
            }
            Command::ResetView => {
                let reset = ViewState::default();
                let changed = self.view != reset;
                self.view = reset;
                changed
            }
            Command::Exit => return InputOutcome::Exit,
        };

        if changed {
            log::debug!(
                "sliders: iterations={} view: zoom_log={:.3} center={}",
                self.sliders.iterations(),
                self.view.zoom_log,
                self.view.center
            );
            InputOutcome::Redraw
        } else {
            InputOutcome::Ignored
        }
    }
}

fn title_with_fps(title: &str, fps: u32) -> String {
    format!("{title} | FPS: {fps}")
}

impl App for Viewer {
    fn on_init(&mut self, ctx: &RenderCtx<'_>) -> Result<()> {
        self.renderer.on_init(ctx)
    }

    fn on_resize(&mut self, ctx: &RenderCtx<'_>, width: u32, height: u32) {
        log::debug!("resize to {width}x{height}");
        self.renderer.on_resize(ctx, width, height);
    }

    fn on_input(&mut self, window: &WindowCtx<'_>, event: &InputEvent) -> AppControl {
        match self.handle_input(event, window.viewport()) {
            InputOutcome::Ignored => {}
            InputOutcome::Redraw => window.request_redraw(),
            InputOutcome::Exit => return AppControl::Exit,
        }
        AppControl::Continue
    }

    fn on_render(&mut self, frame: &mut FrameCtx<'_, '_>) -> AppControl {
        let Self {
            renderer,
            view,
            sliders,
            pending_fps,
            ..
        } = self;
        let params = sliders.params();

        let mut redraw = false;
        let control = frame.render(|ctx, target| {
            let mut on_fps = |fps: u32| *pending_fps = Some(fps);
            let report = renderer.on_render(ctx, target, view, &params, &mut on_fps);
            redraw = report.redraw_requested;
        });

        if let Some(fps) = self.pending_fps.take() {
            log::info!("FPS: {fps}");
            frame.window.set_title(&title_with_fps(&self.title, fps));
        }
        if redraw {
            frame.window.request_redraw();
        }

        control
    }

    fn on_exit(&mut self, ctx: &RenderCtx<'_>) {
        self.renderer.dispose(ctx);
    }
}
