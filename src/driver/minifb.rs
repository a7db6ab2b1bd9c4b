//! GUI frontend. `minifb::Window` must be created, polled, and drawn from the
//! thread that created it (this is a real constraint on some of its platform
//! backends, not merely a design preference), so this frontend is driven by
//! the single-threaded loop in `emulator::run_gui` rather than the two-thread
//! reader/interpreter split the TUI frontend uses.

use crate::chip8::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::driver::DisplaySink;

// minifb::Window pixels use ARGB encoding; alpha-channel (MSB) is ignored => 0RGB
const PX_OFF_COLOR: u32 = 0x1E1C2D;
const PX_ON_COLOR: u32 = 0xE0DEF4;

pub struct Minifb {
    window: minifb::Window,
    framebuf: [u32; DISPLAY_WIDTH * DISPLAY_HEIGHT],
}

impl Minifb {
    pub fn new(name: &str) -> Self {
        Minifb {
            window: minifb::Window::new(
                &("CHIP-8: ".to_owned() + name),
                DISPLAY_WIDTH,
                DISPLAY_HEIGHT,
                minifb::WindowOptions {
                    resize: true,
                    scale: minifb::Scale::X16,
                    ..Default::default()
                },
            )
            .expect("GUI window creation failed"),
            framebuf: [PX_OFF_COLOR; DISPLAY_WIDTH * DISPLAY_HEIGHT],
        }
    }

    /// Pumps the window's event loop and presents the current framebuffer.
    /// Must be called once per cycle from the owning thread. Returns `false`
    /// once the window has been closed.
    pub fn pump(&mut self) -> bool {
        if !self.window.is_open() {
            return false;
        }
        self.window
            .update_with_buffer(&self.framebuf, DISPLAY_WIDTH, DISPLAY_HEIGHT)
            .unwrap();
        true
    }

    //    Keyboard                   CHIP-8
    //    +---+---+---+---+          +---+---+---+---+
    //    | 1 | 2 | 3 | 4 |          | 1 | 2 | 3 | C |
    //    +---+---+---+---+          +---+---+---+---+
    //    | Q | W | E | R |          | 4 | 5 | 6 | D |
    //    +---+---+---+---+    =>    +---+---+---+---+
    //    | A | S | D | F |          | 7 | 8 | 9 | E |
    //    +---+---+---+---+          +---+---+---+---+
    //    | Z | X | C | V |          | A | 0 | B | F |
    //    +---+---+---+---+          +---+---+---+---+
    //
    /// Every CHIP-8 key currently held, read fresh each call (`minifb` has no
    /// concept of edges beyond `get_keys_pressed`, so decay/held semantics
    /// live entirely in the shared `Keypad` this feeds).
    pub fn pressed_keys(&self) -> impl Iterator<Item = u8> {
        self.window.get_keys().into_iter().filter_map(|key| match key {
            minifb::Key::Key1 => Some(0x1),
            minifb::Key::Key2 => Some(0x2),
            minifb::Key::Key3 => Some(0x3),
            minifb::Key::Key4 => Some(0xC),
            minifb::Key::Q => Some(0x4),
            minifb::Key::W => Some(0x5),
            minifb::Key::E => Some(0x6),
            minifb::Key::R => Some(0xD),
            minifb::Key::A => Some(0x7),
            minifb::Key::S => Some(0x8),
            minifb::Key::D => Some(0x9),
            minifb::Key::F => Some(0xE),
            minifb::Key::Z => Some(0xA),
            minifb::Key::X => Some(0x0),
            minifb::Key::C => Some(0xB),
            minifb::Key::V => Some(0xF),
            _ => None,
        })
    }
}

impl DisplaySink for Minifb {
    fn display_present(&mut self, framebuffer: &[u8; 256]) {
        for row in 0..DISPLAY_HEIGHT {
            for col in 0..DISPLAY_WIDTH {
                let byte = framebuffer[row * (DISPLAY_WIDTH / 8) + col / 8];
                let bit = 0x80 >> (col % 8);
                self.framebuf[row * DISPLAY_WIDTH + col] = if byte & bit != 0 {
                    PX_ON_COLOR
                } else {
                    PX_OFF_COLOR
                };
            }
        }
    }
}
