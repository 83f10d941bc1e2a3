// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for the quire CLI: boxed sections, scores, teasers.
//!
//! Colors come from a role-based palette (borders, headings, scores, matches)
//! picked once per process. `QUIRE_THEME=light|dark` forces a palette,
//! otherwise a light `COLORFGBG` background selects the light one. Output is
//! plain when `NO_COLOR` is set or stdout is not a TTY, so `quire search`
//! pipes cleanly into other tools.

use std::sync::OnceLock;

/// Width between the two `│` borders.
pub const BOX_WIDTH: usize = 80;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

type Rgb = (u8, u8, u8);

/// What each piece of output is drawn with.
struct Palette {
    border: Rgb,
    title: Rgb,
    heading: Rgb,
    field: Rgb,
    good: Rgb,
    strong: Rgb,
    warn: Rgb,
    bad: Rgb,
    muted: Rgb,
}

// OneDark
const DARK: Palette = Palette {
    border: (92, 99, 112),
    title: (97, 175, 239),
    heading: (86, 182, 194),
    field: (198, 120, 221),
    good: (152, 195, 121),
    strong: (166, 226, 46),
    warn: (229, 192, 123),
    bad: (224, 108, 117),
    muted: (92, 99, 112),
};

// One Light
const LIGHT: Palette = Palette {
    border: (160, 161, 167),
    title: (64, 120, 242),
    heading: (1, 132, 188),
    field: (166, 38, 164),
    good: (80, 161, 79),
    strong: (68, 140, 39),
    warn: (193, 132, 1),
    bad: (228, 86, 73),
    muted: (160, 161, 167),
};

fn light_background() -> bool {
    match std::env::var("QUIRE_THEME").map(|t| t.to_lowercase()) {
        Ok(t) if t == "light" => return true,
        Ok(t) if t == "dark" => return false,
        _ => {}
    }
    // "fg;bg": background 7 and up (except 8) is a light color
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|v| v.rsplit(';').next().and_then(|bg| bg.parse::<u8>().ok()))
        .is_some_and(|bg| bg >= 7 && bg != 8)
}

fn palette() -> &'static Palette {
    static PALETTE: OnceLock<&'static Palette> = OnceLock::new();
    *PALETTE.get_or_init(|| if light_background() { &LIGHT } else { &DARK })
}

/// Whether to emit colors: stdout is a TTY and `NO_COLOR` is unset.
pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
}

fn fg((r, g, b): Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

fn paint(role: fn(&Palette) -> Rgb, bold: bool, text: &str) -> String {
    if !use_colors() {
        return text.to_string();
    }
    let weight = if bold { BOLD } else { "" };
    format!("{}{}{}{}", weight, fg(role(palette())), text, RESET)
}

pub fn bold(text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", BOLD, text, RESET)
    } else {
        text.to_string()
    }
}

pub fn dim(text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", DIM, text, RESET)
    } else {
        text.to_string()
    }
}

pub fn muted(text: &str) -> String {
    paint(|p| p.muted, false, text)
}

/// Visible length, not counting ANSI escapes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        match (in_escape, c) {
            (false, '\x1b') => in_escape = true,
            (true, 'm') => in_escape = false,
            (false, _) => len += 1,
            (true, _) => {}
        }
    }
    len
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

fn border(text: &str) -> String {
    paint(|p| p.border, false, text)
}

/// `left─ LABEL ───…right`, filled to the box width.
fn rule(left: char, label: &str, right: char) {
    let label = if label.is_empty() {
        String::new()
    } else {
        format!("─ {} ", paint(|p| p.heading, true, label))
    };
    let fill = "─".repeat(BOX_WIDTH.saturating_sub(visible_len(&label)));
    println!("{}{}{}", border(&left.to_string()), label, border(&format!("{}{}", fill, right)));
}

/// │ content          │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content));
    println!("{}{}{}{}", border("│"), content, " ".repeat(pad), border("│"));
}

/// │ label      value │
pub fn row_kv(label: &str, value: &str) {
    row(&format!(" {} {}", pad_right(&dim(label), 18), value));
}

pub fn section_top(label: &str) {
    rule('┌', label, '┐');
}

pub fn section_mid(label: &str) {
    rule('├', label, '┤');
}

pub fn section_bot() {
    rule('└', "", '┘');
}

/// A double-lined box with `text` centered in it.
pub fn title_box(text: &str) {
    let line = "═".repeat(BOX_WIDTH);
    let text = paint(|p| p.title, true, text);
    let pad = BOX_WIDTH.saturating_sub(visible_len(&text));
    let frame = |s: &str| paint(|p| p.title, false, s);

    println!("{}", frame(&format!("╔{}╗", line)));
    println!(
        "{}{}{}{}{}",
        frame("║"),
        " ".repeat(pad / 2),
        text,
        " ".repeat(pad - pad / 2),
        frame("║")
    );
    println!("{}", frame(&format!("╚{}╝", line)));
}

// ═══════════════════════════════════════════════════════════════════════════
// SEMANTIC FORMATTERS
// ═══════════════════════════════════════════════════════════════════════════

pub fn status_mark(ok: bool) -> String {
    if ok {
        paint(|p| p.good, true, "✓")
    } else {
        paint(|p| p.bad, true, "✗")
    }
}

pub fn field_label(field: &str) -> String {
    paint(|p| p.field, false, field)
}

/// Relevance score, colored by band.
pub fn score_value(score: f64) -> String {
    let text = format!("{:>8.3}", score);
    let role: fn(&Palette) -> Rgb = if score >= 5.0 {
        |p| p.strong
    } else if score >= 2.0 {
        |p| p.good
    } else if score >= 0.5 {
        |p| p.warn
    } else {
        |p| p.muted
    };
    paint(role, false, &text)
}

/// Swap a teaser's `<em>` markers for highlighting, or drop them when plain.
pub fn highlight_teaser(teaser: &str) -> String {
    if !use_colors() {
        return teaser.replace("<em>", "").replace("</em>", "");
    }
    let on = format!("{}{}", BOLD, fg(palette().warn));
    teaser.replace("<em>", &on).replace("</em>", RESET)
}

/// Compressed size as a percentage saved.
pub fn savings_colored(raw: usize, compressed: usize) -> String {
    if raw == 0 {
        return muted("N/A");
    }
    let saved = (1.0 - compressed as f64 / raw as f64) * 100.0;
    if saved.abs() < 0.5 {
        muted("0%")
    } else if saved > 0.0 {
        paint(|p| p.good, true, &format!("-{:.0}%", saved))
    } else {
        paint(|p| p.bad, true, &format!("+{:.0}%", -saved))
    }
}

pub fn pad_left(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_len(s));
    format!("{}{}", " ".repeat(pad), s)
}

pub fn pad_right(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(visible_len(s));
    format!("{}{}", s, " ".repeat(pad))
}

pub fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    let b = bytes as f64;
    if b >= KB * KB {
        format!("{:.1} MB", b / KB / KB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

/// Keep the last `max_len` characters, with a `...` prefix when cut.
pub fn truncate_path(path: &str, max_len: usize) -> String {
    let len = path.chars().count();
    if len <= max_len {
        return path.to_string();
    }
    let tail: String = path.chars().skip(len - max_len.saturating_sub(3)).collect();
    format!("...{}", tail)
}

/// Greedy word wrap to `width` visible characters per line.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && visible_len(&line) + 1 + visible_len(word) > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
