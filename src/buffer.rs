//! Styled-text painting for help/error rendering, grounded on
//! `examples/pacak-bpaf/src/buffer.rs` and `src/color.rs`: a handful of
//! [`Style`]s are applied through `owo-colors` when the `color` feature is
//! enabled and the output stream supports it, otherwise styling is a
//! no-op.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Literal,
    Invalid,
    Metavar,
    Section,
}

#[cfg(feature = "color")]
fn paint(s: &str, style: Style) -> String {
    use owo_colors::OwoColorize;
    match style {
        Style::Literal => s.green().to_string(),
        Style::Invalid => s.red().bold().to_string(),
        Style::Metavar => s.cyan().to_string(),
        Style::Section => s.bold().underline().to_string(),
    }
}

#[cfg(not(feature = "color"))]
fn paint(s: &str, _style: Style) -> String {
    s.to_string()
}

/// Paint `s` under `style` when `use_color` says the destination stream
/// wants it, otherwise pass it through unchanged. The sole entry point
/// the renderer uses to conditionally color one flag name or section
/// heading at a time.
pub fn style(s: &str, sty: Style, use_color: bool) -> String {
    if use_color {
        paint(s, sty)
    } else {
        s.to_string()
    }
}

/// Whether `stdout` is an interactive terminal — spec §6 `is_tty()`.
pub fn stdout_is_tty() -> bool {
    is_terminal::IsTerminal::is_terminal(&std::io::stdout())
}

/// Whether the destination stream both is a terminal and advertises color
/// support, matching the two-part check `examples/pacak-bpaf/src/
/// inner_buffer.rs` performs: `is_terminal` for the tty check,
/// `supports-color` for the stream-capability negotiation (dumb terminals,
/// `NO_COLOR`, CI pipes, etc).
#[cfg(feature = "color")]
pub fn stdout_supports_color() -> bool {
    stdout_is_tty() && supports_color::on(supports_color::Stream::Stdout).is_some()
}

#[cfg(not(feature = "color"))]
pub fn stdout_supports_color() -> bool {
    false
}
