use std::io::{stdout, Stdout, Write};
use std::{thread::sleep, time::Duration};

use crossterm::{cursor, execute, queue, style, terminal, Result};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{poll, read, Event, KeyEvent};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TermMode {
    /// Alternate screen, raw mode, frame redrawn in place.
    Fullscreen,
    /// Frames appended to stdout; no key input.
    Plain,
}

pub struct TermManager {
    mode: TermMode,
    stdout: Stdout,
    active: bool,
}

impl TermManager {
    pub fn new(mode: TermMode) -> Self {
        TermManager { mode, stdout: stdout(), active: false }
    }

    pub fn mode(&self) -> TermMode {
        self.mode
    }

    pub fn setup(&mut self) -> Result<()> {
        if self.mode == TermMode::Plain || self.active {
            return Ok(());
        }

        execute!(self.stdout, EnterAlternateScreen)?;
        self.active = true;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking, terminal::Clear(ClearType::All))?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }

        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Key events that arrive within `timeout`. Plain mode has no input and
    /// just waits the timeout out.
    pub fn read_key_events(&self, timeout: Duration) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];

        if self.mode == TermMode::Plain {
            sleep(timeout);
            return Ok(events);
        }

        if poll(timeout)? {
            while poll(Duration::from_millis(0))? {
                if let Event::Key(ev) = read()? {
                    events.push(ev);
                }
            }
        }

        Ok(events)
    }

    pub fn draw_frame(&mut self, lines: &[String]) -> Result<()> {
        match self.mode {
            TermMode::Plain => {
                for line in lines {
                    writeln!(self.stdout, "{}", line)?;
                }
                writeln!(self.stdout)?;
            }
            TermMode::Fullscreen => {
                for (row, line) in lines.iter().enumerate() {
                    queue!(
                        self.stdout,
                        cursor::MoveTo(0, row as u16),
                        style::Print(line),
                        terminal::Clear(ClearType::UntilNewLine)
                    )?;
                }
            }
        }

        self.flush()
    }

    /// Boxed message centred on the screen. The next frame draws over it.
    pub fn show_message(&mut self, lines: &[&str]) -> Result<()> {
        if self.mode == TermMode::Plain {
            return Ok(());
        }

        let (width, height) = terminal::size()?;
        let msg_height = (lines.len() + 2) as u16;
        let msg_width = (lines.iter().map(|x| x.len()).max().unwrap_or(0) + 2) as u16;
        let top_left = (
            (width / 2).saturating_sub(msg_width / 2),
            (height / 2).saturating_sub(msg_height / 2),
        );

        let blank = " ".repeat(msg_width as usize);
        for y in [top_left.1, top_left.1 + msg_height - 1].iter() {
            queue!(self.stdout, cursor::MoveTo(top_left.0, *y), style::Print(&blank))?;
        }

        for (i, line) in lines.iter().enumerate() {
            let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
            let y = top_left.1 + i as u16 + 1;
            queue!(self.stdout, cursor::MoveTo(top_left.0, y), style::Print(padded_line))?;
        }

        self.flush()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TermManager {
    fn drop(&mut self) {
        // Errors here have nowhere to go.
        let _ = self.restore();
    }
}
