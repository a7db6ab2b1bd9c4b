mod chip8;
mod clock;
mod cycle_driver;
mod driver;
mod emulator;
mod error;
mod keypad;
mod timers;

use std::path::Path;

use driver::ansiterm::AnsiTerm;
use driver::minifb::Minifb;
use driver::rodio::Rodio;
use driver::termion::{TermionReader, TermionScreen};

// Command line arguments
struct Args {
    rom: String,
    gui: bool,
    native_audio: bool,
    emu_clock_hz: u32,
}

const DEFAULT_CLOCK_HZ: u32 = 500;

fn parse_args() -> Result<Args, lexopt::Error> {
    use lexopt::prelude::*;

    let help_msg = "\
USAGE:
    cargo run -- [OPTIONS] [ROM]

ARGS:
    <ROM>    Filepath to the CHIP-8 ROM to be read by the emulator. A list of
             ROMs released to the public domain can be found at:
                 - https://zophar.net/pdroms/chip8/chip-8-games-pack.html
                 - https://johnearnest.github.io/chip8Archive/?sort=platform

OPTIONS:
    -h, --help          Print this help message.
    -g, --gui           GUI mode — run this program in a native window.
    -t, --tui           TUI mode — run this program in the terminal. (default)
    -a                  Use the native audio host API. You may want to enable
                          this if your terminal emulator does not support the
                          BEL control code. Enabled by default with --gui.
    -f, --freq=NUM      Set the clock rate of the emulator (Hz) to uint NUM
                          in the range 1–2000. (default: 500)

KEYMAP:
    +---+---+---+---+
    | 1 | 2 | 3 | 4 |
    +---+---+---+---+
    | Q | W | E | R |
    +---+---+---+---+
    | A | S | D | F |
    +---+---+---+---+
    | Z | X | C | V |
    +---+---+---+---+    ";

    let mut rom = None;
    let mut gui = false;
    let mut native_audio = false;
    let mut emu_clock_hz = DEFAULT_CLOCK_HZ;

    let mut parser = lexopt::Parser::from_env();

    while let Some(arg) = parser.next()? {
        match arg {
            Short('g') | Long("gui") => {
                gui = true;
                native_audio = true;
            }
            Short('t') | Long("tui") => {
                gui = false;
            }
            Short('a') => {
                native_audio = true;
            }
            Short('f') | Long("freq") => {
                emu_clock_hz = parser.value()?.parse()?;
                if !(1..=2000).contains(&emu_clock_hz) {
                    return Err("out of bounds value for option '--freq'".into());
                }
            }
            Value(path) if rom.is_none() => {
                rom = Some(path.string()?);
            }

            Short('h') | Long("help") => {
                println!("{}", help_msg);
                std::process::exit(0);
            }
            _ => return Err(arg.unexpected()),
        }
    }

    Ok(Args {
        rom: rom.ok_or(
            "missing argument <ROM>\n
  Refer to --help for more information",
        )?,
        gui,
        native_audio,
        emu_clock_hz,
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let program_name = Path::new(&args.rom)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("rom");
    let cycle_ns = cycle_driver::cycle_ns_for_hz(args.emu_clock_hz);

    let rom = match emulator::load_rom(&args.rom) {
        Ok(rom) => rom,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(err.exit_code());
        }
    };

    let result = if args.gui {
        let mut window = Minifb::new(program_name);
        if args.native_audio {
            let speaker = Rodio::new();
            emulator::run_gui(&rom, cycle_ns, &mut window, speaker)
        } else {
            emulator::run_gui(&rom, cycle_ns, &mut window, AnsiTerm)
        }
    } else {
        let screen = TermionScreen::new();
        let reader = TermionReader::new();
        if args.native_audio {
            let speaker = Rodio::new();
            emulator::run_threaded(&rom, cycle_ns, reader, screen, speaker)
        } else {
            emulator::run_threaded(&rom, cycle_ns, reader, screen, AnsiTerm)
        }
    };

    if let Err(err) = result {
        std::process::exit(err.exit_code());
    }
}
