//! Renders to a terminal with crossterm, in raw mode on the alternate screen.

use std::{collections::VecDeque, io::Write, time::Duration};

use crossterm::{
    cursor::{Hide, MoveDown, MoveTo, MoveToColumn, Show},
    event::{
        self as ct, DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    style::{
        Attribute, Color as CrosstermColor, ResetColor, SetAttribute, SetAttributes,
        SetBackgroundColor, SetForegroundColor,
    },
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen, SetTitle,
    },
};

use crate::{
    io::{
        fmt::{Cell, Color, Formatted},
        Action, Key, MouseButton, Screen, XY,
    },
    Result,
};

use super::IoSystem;

fn io4ct_btn(ct: ct::MouseButton) -> MouseButton {
    match ct {
        ct::MouseButton::Left => MouseButton::Left,
        ct::MouseButton::Middle => MouseButton::Middle,
        ct::MouseButton::Right => MouseButton::Right,
    }
}

fn io4ct_key(code: ct::KeyCode) -> Option<Key> {
    let key = match code {
        ct::KeyCode::Char(c) => Key::Char(c),
        ct::KeyCode::F(c) => Key::F(c as usize),
        ct::KeyCode::Backspace => Key::Backspace,
        ct::KeyCode::Enter => Key::Enter,
        ct::KeyCode::Left => Key::Left,
        ct::KeyCode::Right => Key::Right,
        ct::KeyCode::Up => Key::Up,
        ct::KeyCode::Down => Key::Down,
        ct::KeyCode::Home => Key::Home,
        ct::KeyCode::End => Key::End,
        ct::KeyCode::PageUp => Key::PageUp,
        ct::KeyCode::PageDown => Key::PageDown,
        ct::KeyCode::Tab => Key::Tab,
        ct::KeyCode::Delete => Key::Delete,
        ct::KeyCode::Insert => Key::Insert,
        ct::KeyCode::Esc => Key::Escape,
        _ => return None,
    };
    Some(key)
}

/// Crossterm color for morsel colors
fn ct4ms_color(c: Color) -> CrosstermColor {
    match c {
        Color::BrightBlack => CrosstermColor::DarkGrey,
        Color::Black => CrosstermColor::Black,
        Color::BrightRed => CrosstermColor::Red,
        Color::Red => CrosstermColor::DarkRed,
        Color::BrightGreen => CrosstermColor::Green,
        Color::Green => CrosstermColor::DarkGreen,
        Color::BrightYellow => CrosstermColor::Yellow,
        Color::Yellow => CrosstermColor::DarkYellow,
        Color::BrightBlue => CrosstermColor::Blue,
        Color::Blue => CrosstermColor::DarkBlue,
        Color::BrightMagenta => CrosstermColor::Magenta,
        Color::Magenta => CrosstermColor::DarkMagenta,
        Color::BrightCyan => CrosstermColor::Cyan,
        Color::Cyan => CrosstermColor::DarkCyan,
        Color::BrightWhite => CrosstermColor::White,
        Color::White => CrosstermColor::Grey,
    }
}

/// Render a single row of cells into a `Vec<u8>` that can be printed
fn render_row(row: &[Cell], out: &mut Vec<u8>) -> Result<()> {
    let Some(first) = row.first() else {
        return Ok(());
    };
    let mut ch_b = [0u8; 4];

    let mut fmt = first.get_fmt().clone();
    let mut attrs = [Attribute::NormalIntensity, Attribute::NoUnderline];
    if fmt.bold {
        attrs[0] = Attribute::Bold;
    }
    if fmt.underline {
        attrs[1] = Attribute::Underlined;
    }
    crossterm::queue!(
        out,
        ResetColor,
        SetAttribute(Attribute::Reset),
        SetForegroundColor(ct4ms_color(fmt.fg)),
        SetBackgroundColor(ct4ms_color(fmt.bg)),
        SetAttributes(attrs.as_ref().into()),
    )?;
    out.extend_from_slice(first.ch.encode_utf8(&mut ch_b).as_bytes());

    for cell in &row[1..] {
        let next = cell.get_fmt();
        if next.fg != fmt.fg {
            crossterm::queue!(out, SetForegroundColor(ct4ms_color(next.fg)))?;
        }
        if next.bg != fmt.bg {
            crossterm::queue!(out, SetBackgroundColor(ct4ms_color(next.bg)))?;
        }
        if next.bold != fmt.bold {
            let attr = if next.bold {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            };
            crossterm::queue!(out, SetAttribute(attr))?;
        }
        if next.underline != fmt.underline {
            let attr = if next.underline {
                Attribute::Underlined
            } else {
                Attribute::NoUnderline
            };
            crossterm::queue!(out, SetAttribute(attr))?;
        }
        fmt = next.clone();
        out.extend_from_slice(cell.ch.encode_utf8(&mut ch_b).as_bytes());
    }
    crossterm::queue!(out, MoveDown(1), MoveToColumn(0))?;
    Ok(())
}

/// Turns crossterm events into [`Action`]s and queues them up.
///
/// Most terminals only report key presses. There, each press is followed by a made-up release, held back until
/// the poll cycle after the press so the press gets drawn on its own first.
struct InputQueue {
    pending: VecDeque<Action>,
    /// Made-up releases, sent once the current poll cycle is over.
    deferred: VecDeque<Action>,
    /// Whether the last poll came up empty, i.e. the caller finished a poll cycle.
    idle: bool,
    /// Whether key releases arrive from the terminal at all.
    releases: bool,
}

impl InputQueue {
    fn new(releases: bool) -> Self {
        Self {
            pending: VecDeque::new(),
            deferred: VecDeque::new(),
            idle: true,
            releases,
        }
    }

    /// The next action. `read` is only asked for more events when nothing is queued, and should return `None`
    /// once no more are waiting.
    fn next(
        &mut self,
        mut read: impl FnMut() -> Option<core::result::Result<ct::Event, String>>,
    ) -> Option<Action> {
        if self.pending.is_empty() && self.idle {
            self.pending.extend(self.deferred.drain(..));
        }
        if self.pending.is_empty() {
            while let Some(ev) = read() {
                match ev {
                    Ok(ev) => self.translate(ev),
                    Err(e) => {
                        self.pending.push_back(Action::Error(e));
                        break;
                    }
                }
            }
        }
        let next = self.pending.pop_front();
        self.idle = next.is_none();
        next
    }

    /// Turn one crossterm event into zero or more [`Action`]s.
    fn translate(&mut self, ev: ct::Event) {
        macro_rules! send {
            ( $type:ident $( ($nt:expr) )? $( { $($br:tt)* } )? ) => {
                self.pending.push_back(Action::$type $(($nt))? $({$($br)*})? )
            }
        }
        macro_rules! mods {
            ( $queue:ident, $mods:ident, $action:ident ) => {
                if $mods.contains(ct::KeyModifiers::SHIFT) {
                    self.$queue.push_back(Action::$action { key: Key::LeftShift });
                }
                if $mods.contains(ct::KeyModifiers::CONTROL) {
                    self.$queue.push_back(Action::$action { key: Key::LeftCtrl });
                }
                if $mods.contains(ct::KeyModifiers::ALT) {
                    self.$queue.push_back(Action::$action { key: Key::LeftAlt });
                }
            };
        }
        match ev {
            ct::Event::Key(ct::KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) => {
                if kind == ct::KeyEventKind::Release {
                    if let (true, Some(key)) = (self.releases, io4ct_key(code)) {
                        send!(KeyRelease { key });
                        mods!(pending, modifiers, KeyRelease);
                    }
                    return;
                }
                // raw mode swallows the signal, so treat it like closing the window
                if modifiers.contains(ct::KeyModifiers::CONTROL) && code == ct::KeyCode::Char('c') {
                    send!(Closed);
                    return;
                }
                let Some(key) = io4ct_key(code) else {
                    send!(Unknown(format!("key {:?}", code)));
                    return;
                };
                mods!(pending, modifiers, KeyPress);
                send!(KeyPress { key });
                if !self.releases {
                    self.deferred.push_back(Action::KeyRelease { key });
                    mods!(deferred, modifiers, KeyRelease);
                }
            }
            ct::Event::Mouse(ct::MouseEvent {
                row,
                column: col,
                kind,
                ..
            }) => {
                let pos = XY(col as usize, row as usize);
                match kind {
                    ct::MouseEventKind::Up(btn) => send!(MouseRelease {
                        pos,
                        button: io4ct_btn(btn)
                    }),
                    ct::MouseEventKind::Down(btn) => send!(MousePress {
                        pos,
                        button: io4ct_btn(btn)
                    }),
                    ct::MouseEventKind::Drag(_) | ct::MouseEventKind::Moved => send!(MouseMove { pos }),
                    ct::MouseEventKind::ScrollUp => send!(MousePress {
                        pos,
                        button: MouseButton::ScrollUp
                    }),
                    ct::MouseEventKind::ScrollDown => send!(MousePress {
                        pos,
                        button: MouseButton::ScrollDown
                    }),
                    #[allow(unreachable_patterns)]
                    other => send!(Unknown(format!("mouse {:?}", other))),
                }
            }
            ct::Event::Resize(..) | ct::Event::FocusGained => send!(Redraw),
            #[allow(unreachable_patterns)]
            _ => (),
        }
    }
}

/// The terminal backend.
pub struct AnsiSystem {
    input: InputQueue,
    /// Whether the terminal was asked to report key releases (kitty keyboard protocol).
    enhanced: bool,
    stopped: bool,
}

impl AnsiSystem {
    /// Returns whether the keyboard enhancement flags were pushed.
    fn init_term() -> Result<bool> {
        terminal::enable_raw_mode()?;
        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                std::io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        execute!(
            std::io::stdout(),
            EnableMouseCapture,
            EnterAlternateScreen,
            DisableLineWrap,
            Hide,
            Clear(ClearType::All),
        )?;
        Ok(enhanced)
    }

    fn clean_term(enhanced: bool) -> Result<()> {
        if enhanced {
            execute!(std::io::stdout(), PopKeyboardEnhancementFlags)?;
        }
        execute!(
            std::io::stdout(),
            Clear(ClearType::All),
            Show,
            EnableLineWrap,
            LeaveAlternateScreen,
            DisableMouseCapture,
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn new() -> Result<Self> {
        let enhanced = Self::init_term()?;
        let prev = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            // put the terminal back first, so the message is actually readable
            let _ = Self::clean_term(enhanced);
            prev(info);
        }));
        // the Windows console reports releases without being asked
        let releases = enhanced || cfg!(windows);
        tracing::debug!(enhanced, releases, "terminal ready");
        Ok(Self {
            input: InputQueue::new(releases),
            enhanced,
            stopped: false,
        })
    }
}

impl Drop for AnsiSystem {
    fn drop(&mut self) {
        self.stop();
    }
}

impl IoSystem for AnsiSystem {
    fn size(&self) -> XY {
        terminal::size().map(XY::from).unwrap_or(XY(80, 24))
    }

    fn draw(&mut self, screen: &Screen) -> Result<()> {
        let mut out = vec![];
        crossterm::queue!(&mut out, MoveTo(0, 0))?;
        for row in screen.rows() {
            render_row(row, &mut out)?;
        }
        let stdout = std::io::stdout();
        let mut stdout = stdout.lock();
        stdout.write_all(&out)?;
        stdout.flush()?;
        Ok(())
    }

    fn poll_input(&mut self) -> Result<Option<Action>> {
        // zero timeout; the game loop does its own waiting
        Ok(self.input.next(|| match ct::poll(Duration::ZERO) {
            Ok(false) => None,
            Ok(true) => Some(ct::read().map_err(|e| format!("reading: {}", e))),
            Err(e) => Some(Err(format!("polling: {}", e))),
        }))
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        execute!(std::io::stdout(), SetTitle(title))?;
        Ok(())
    }

    fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        if let Err(e) = Self::clean_term(self.enhanced) {
            tracing::error!("failed to restore the terminal: {}", e);
        }
    }
}
