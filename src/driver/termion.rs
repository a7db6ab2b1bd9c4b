//! TUI frontend: raw-mode alternate screen for rendering plus a blocking
//! stdin reader meant to live on its own thread, matching the two-thread
//! concurrency model the Cycle Driver expects.

use std::fmt::Write as _;
use std::io::{stdin, stdout, Stdin, Stdout, Write};

use termion::event::Key;
use termion::input::{Keys, TermRead};
use termion::raw::{IntoRawMode, RawTerminal};
use termion::screen::{AlternateScreen, IntoAlternateScreen};

use crate::chip8::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::driver::{BeepSink, DisplaySink, KeyReader};

/// Alternate-screen writer, owned by the interpreter thread. Raw mode is
/// required because canonical mode buffers input until a newline, which
/// would make the keypad unusable; entering it here also makes the
/// `TermionReader`'s blocking stdin reads unbuffered, since raw mode is a
/// terminal-wide attribute rather than per-descriptor.
pub struct TermionScreen {
    screen: AlternateScreen<RawTerminal<Stdout>>,
    term_size: (u16, u16),
    framebuf: String,
}

impl TermionScreen {
    pub fn new() -> Self {
        let mut screen = stdout()
            .into_raw_mode()
            .expect("failed to enter raw mode")
            .into_alternate_screen()
            .expect("TUI screen creation failed");

        write!(screen, "{}", termion::cursor::Hide).unwrap();
        screen.flush().unwrap();

        TermionScreen {
            screen,
            term_size: termion::terminal_size()
                .unwrap_or((DISPLAY_WIDTH as u16, DISPLAY_HEIGHT as u16)),
            framebuf: String::new(),
        }
    }
}

impl Drop for TermionScreen {
    fn drop(&mut self) {
        let _ = write!(self.screen, "{}", termion::cursor::Show);
    }
}

impl DisplaySink for TermionScreen {
    fn display_present(&mut self, framebuffer: &[u8; 256]) {
        use termion::color;

        if let Ok(term_size) = termion::terminal_size() {
            if self.term_size != term_size {
                self.term_size = term_size;
                write!(self.screen, "{}", termion::clear::All).unwrap();
            }
        }

        let (x_offset, y_offset) = (
            self.term_size.0.saturating_sub(DISPLAY_WIDTH as u16) / 2,
            self.term_size.1.saturating_sub(DISPLAY_HEIGHT as u16) / 2,
        );

        self.framebuf.clear();
        for row in 0..DISPLAY_HEIGHT {
            write!(
                self.framebuf,
                "{}",
                termion::cursor::Goto(x_offset + 1, y_offset + 1 + row as u16)
            )
            .unwrap();

            for col in 0..DISPLAY_WIDTH {
                let byte = framebuffer[row * (DISPLAY_WIDTH / 8) + col / 8];
                let bit = 0x80 >> (col % 8);
                // https://en.wikipedia.org/wiki/ANSI_escape_code#8-bit
                if byte & bit != 0 {
                    write!(self.framebuf, "{}█", color::Fg(color::White)).unwrap();
                } else {
                    write!(self.framebuf, "{}█", color::Fg(color::Black)).unwrap();
                }
            }
        }

        write!(self.screen, "{}", self.framebuf).unwrap();
    }
}

impl BeepSink for TermionScreen {
    fn beep_request(&mut self, active: bool) {
        if active {
            write!(self.screen, "\x07").unwrap();
        }
    }
}

/// Blocking key reader, intended to run on its own thread. `Keys::next`
/// parks the thread in a `read(2)` syscall until a byte arrives.
pub struct TermionReader {
    keys: Keys<Stdin>,
}

impl TermionReader {
    pub fn new() -> Self {
        TermionReader {
            keys: stdin().keys(),
        }
    }
}

impl KeyReader for TermionReader {
    //
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
    /// Returns `None` on Esc, Ctrl-C, a read error, or end of input — the
    /// reader thread treats any of these as a request to quit.
    fn read_mapped_key(&mut self) -> Option<u8> {
        loop {
            let key = self.keys.next()?.ok()?;
            let mapped = match key {
                Key::Char('1') => Some(0x1),
                Key::Char('2') => Some(0x2),
                Key::Char('3') => Some(0x3),
                Key::Char('4') => Some(0xC),
                Key::Char('q') => Some(0x4),
                Key::Char('w') => Some(0x5),
                Key::Char('e') => Some(0x6),
                Key::Char('r') => Some(0xD),
                Key::Char('a') => Some(0x7),
                Key::Char('s') => Some(0x8),
                Key::Char('d') => Some(0x9),
                Key::Char('f') => Some(0xE),
                Key::Char('z') => Some(0xA),
                Key::Char('x') => Some(0x0),
                Key::Char('c') => Some(0xB),
                Key::Char('v') => Some(0xF),
                Key::Esc | Key::Ctrl('c') => return None,
                _ => None,
            };
            if let Some(mapped) = mapped {
                return Some(mapped);
            }
        }
    }
}
