use anyhow::Result;

use dialclock_engine::logging::{init_logging, LoggingConfig};
use dialclock_face::Application;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    Application::new()
        .title("dialclock")
        .size(480.0, 480.0)
        .font(load_font())
        .run()
}

/// First readable system font, heaviest first. Empty if none is installed.
fn load_font() -> Vec<u8> {
    let found = [
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/noto/NotoSans-Black.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Black.ttf",
        "/usr/share/fonts/noto/NotoSans-Bold.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Bold.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
        "C:\\Windows\\Fonts\\arialbd.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok().map(|bytes| (p, bytes)));

    match found {
        Some((path, bytes)) => {
            log::info!("using font {path}");
            bytes
        }
        None => Vec::new(),
    }
}
