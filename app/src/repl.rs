//! Prompt Loop
//!
//! Reads commands line by line, runs them, and redraws the lot after
//! every change. Works the same over a terminal or a script file.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Instant;

use parking_ring::view::slot_labels;

use crate::commands::{self, Command};
use crate::render;
use crate::state::AppState;

pub struct Repl<R, W> {
    state: AppState,
    input: R,
    output: W,
    /// Play the highlight blink in place
    animate: bool,
    /// Interactive session: print a prompt and banner
    interactive: bool,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(state: AppState, input: R, output: W) -> Self {
        Self {
            state,
            input,
            output,
            animate: true,
            interactive: true,
        }
    }

    /// Script mode: no prompt, no banner, no animation.
    pub fn scripted(mut self) -> Self {
        self.animate = false;
        self.interactive = false;
        self
    }

    pub fn run(&mut self) -> io::Result<()> {
        if self.interactive {
            writeln!(self.output, "Circular queue parking. Type 'help' for commands.")?;
            writeln!(self.output, "{}", commands::show(&self.state))?;
        }

        loop {
            if self.interactive {
                write!(self.output, "parking> ")?;
                self.output.flush()?;
            }

            let Some(line) = self.read_line()? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    writeln!(self.output, "{}", e)?;
                    continue;
                }
            };

            let outcome = match command {
                Command::Quit => {
                    writeln!(self.output, "Bye.")?;
                    break;
                }
                Command::Clear => {
                    let confirmed =
                        !self.state.confirm_clear() || self.confirm("Clear all parked cars?")?;
                    commands::clear_all(&self.state, confirmed)
                }
                other => commands::execute(&self.state, &other),
            };

            if !outcome.success {
                log::debug!("Command failed: {}", outcome.message);
            }
            writeln!(self.output, "{}", outcome.message)?;

            if outcome.redraw {
                writeln!(self.output, "{}", commands::show(&self.state))?;
                if self.animate {
                    self.play_pulse()?;
                }
            }
        }

        self.output.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf))
    }

    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        write!(self.output, "{} [y/N] ", question)?;
        self.output.flush()?;

        let answer = self.read_line()?.unwrap_or_default();
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }

    /// Redraws the highlighted slot in place until its pulse settles.
    fn play_pulse(&mut self) -> io::Result<()> {
        let interval = self.state.lot.lock().config().pulse_interval();

        loop {
            let Some((slot, frame)) = self.state.highlight_frame(Instant::now()) else {
                return Ok(());
            };

            let line = {
                let lot = self.state.lot.lock();
                let labels = slot_labels(&lot.snapshot());
                match labels.get(slot) {
                    Some(label) => render::render_slot(label, Some(frame)),
                    None => return Ok(()),
                }
            };
            write!(self.output, "\r{}\x1b[K", line)?;
            self.output.flush()?;

            if frame.finished {
                return writeln!(self.output);
            }
            thread::sleep(interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_ring::Config;
    use std::io::Cursor;

    fn run_script(config: Config, script: &str) -> (String, AppState) {
        let state = AppState::new(config).unwrap();
        let mut out = Vec::new();
        let mut repl = Repl::new(state, Cursor::new(script.to_string()), &mut out).scripted();
        repl.run().unwrap();
        let state = repl.state;
        (String::from_utf8(out).unwrap(), state)
    }

    #[test]
    fn test_script_round_trip() {
        let script = "park A\npark B\npark C\nexit\npark D\nshow\nquit\npark E\n";
        let (out, state) = run_script(Config::compact(), script);

        assert!(out.contains("Car A has exited."));
        assert!(out.contains("Occupancy: 3 / 4 | Front: 1  Rear: 3 | Free Slots: 1"));
        assert!(out.trim_end().ends_with("Bye."));

        // Nothing after quit runs
        let lot = state.lot.lock();
        assert_eq!(lot.search("E"), None);
        assert_eq!(lot.search("D"), Some(3));
    }

    #[test]
    fn test_clear_declined_then_accepted() {
        let script = "park A\nclear\nn\nclear\ny\n";
        let (out, state) = run_script(Config::compact(), script);

        assert!(out.contains("Clear all parked cars? [y/N] Clear cancelled."));
        assert!(out.contains("All parked cars cleared."));
        assert!(state.lot.lock().queue().is_empty());
    }

    #[test]
    fn test_clear_without_confirmation() {
        let config = Config {
            confirm_clear: false,
            ..Config::compact()
        };
        let (out, state) = run_script(config, "park A\nclear\n");

        assert!(!out.contains("[y/N]"));
        assert!(state.lot.lock().queue().is_empty());
    }

    #[test]
    fn test_bad_lines_are_reported() {
        let (out, _) = run_script(Config::compact(), "\nfly away\nresize lots\n");
        assert!(out.contains("Unknown command 'fly'"));
        assert!(out.contains("resize needs a whole number"));
    }
}
