use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;

use crate::camera::FrameInput;

/// Sleeps away whatever is left of each frame's time slice.
///
/// Pacing is advisory: a frame that overran its slice is followed
/// immediately by the next one, with no attempt to catch up.
pub struct FrameLimiter {
    frame_target_time: u64,
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window, fps: u32) -> Self {
        Self {
            frame_target_time: 1000 / u64::from(fps.max(1)),
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Waits if necessary to maintain frame rate and returns the delta time in milliseconds.
    /// Delta time represents the time elapsed since the last call to this method.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time.saturating_sub(self.previous_frame_time);

        if delta_time < self.frame_target_time {
            let time_to_wait = self.frame_target_time - delta_time;
            std::thread::sleep(std::time::Duration::from_millis(time_to_wait));
            current_time = window.timer().ticks64();
            delta_time = current_time.saturating_sub(self.previous_frame_time);
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

// Fields drop in declaration order. `texture` must go before `canvas` and
// `texture_creator`: dropping the last renderer handle destroys the SDL
// renderer together with every texture it owns.
pub struct Window {
    texture: sdl2::render::Texture<'static>,
    canvas: sdl2::render::Canvas<sdl2::video::Window>,
    texture_creator: Box<sdl2::render::TextureCreator<sdl2::video::WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    width: u32,
    height: u32,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        let timer_subsystem = sdl_context.timer()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump()?;

        // SAFETY: texture_creator is boxed, so its address is stable once moved
        // into Window, and `texture` is declared first so it is dropped before
        // both `canvas` and `texture_creator`.
        let texture_creator_ref: &'static sdl2::render::TextureCreator<sdl2::video::WindowContext> =
            unsafe { &*(texture_creator.as_ref() as *const _) };
        let texture = texture_creator_ref
            .create_texture_streaming(PixelFormatEnum::RGB888, width, height)
            .map_err(|e| e.to_string())?;

        Ok(Self {
            texture,
            canvas,
            texture_creator,
            event_pump,
            timer_subsystem,
            width,
            height,
        })
    }

    /// Drains pending events and reads mouse motion since the last call.
    pub fn poll_input(&mut self) -> FrameInput {
        let mut input = FrameInput::default();
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => input.quit = true,
                Event::MouseMotion { xrel, yrel, .. } => {
                    input.dx += xrel;
                    input.dy += yrel;
                }
                _ => {}
            }
        }
        input
    }

    /// Upload a display-oriented `0x00RRGGBB` frame and show it.
    pub fn present(&mut self, pixels: &[u32]) -> Result<(), String> {
        if pixels.len() != (self.width * self.height) as usize {
            return Err(format!(
                "frame has {} pixels, window needs {}x{}",
                pixels.len(),
                self.width,
                self.height
            ));
        }
        // SAFETY: u32 has no padding and a stricter alignment than u8; the
        // byte view covers exactly the same memory.
        let bytes = unsafe {
            std::slice::from_raw_parts(pixels.as_ptr() as *const u8, std::mem::size_of_val(pixels))
        };
        self.texture
            .update(None, bytes, (self.width * 4) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
        self.canvas.present();
        Ok(())
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}
