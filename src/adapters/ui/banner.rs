//! Welcome banner: "CAMPUS VOICE" in figlet's standard font.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Portal teal (#0891b2).
const PORTAL_TEAL: Color = Color::Rgb {
    r: 0x08,
    g: 0x91,
    b: 0xb2,
};

const TITLE: &str = "CAMPUS VOICE";

/// Falls back to the plain title when the bundled font cannot be loaded.
fn banner_art() -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(TITLE).map(|figure| figure.to_string()))
        .unwrap_or_else(|| TITLE.to_string())
}

pub fn print_welcome() {
    let mut out = stdout();
    let _ = out.execute(SetForegroundColor(PORTAL_TEAL));
    for line in banner_art().lines() {
        let _ = out.execute(Print(format!("{}\r\n", line)));
    }
    let _ = out.execute(ResetColor);
    let _ = out.execute(Print(format!(
        "v{}  Say \"open subjects\", \"read <title>\", \"recommend\" or \"stop\".\r\n",
        env!("CARGO_PKG_VERSION")
    )));
    let _ = out.flush();
}
