//! Casual-mode toggle on the terminal suspend key.
//!
//! On Unix, SIGTSTP (ctrl+z) flips the casual-mode flag instead of stopping
//! the process. SIGINT is left alone.

use sharpdrill_core::casual::CasualMode;
use tokio::task::JoinHandle;

use crate::terminal::Theme;

/// Spawn the listener. Abort the returned handle once the drill is over.
#[cfg(unix)]
pub fn spawn_casual_listener(casual: CasualMode, theme: Theme) -> anyhow::Result<JoinHandle<()>> {
    use anyhow::Context;
    use sharpdrill_core::casual::banner;
    use sharpdrill_core::console::Tone;
    use tokio::signal::unix::{signal, SignalKind};

    let mut stream = signal(SignalKind::from_raw(libc::SIGTSTP))
        .context("failed to install the SIGTSTP handler")?;

    Ok(tokio::spawn(async move {
        while stream.recv().await.is_some() {
            let active = casual.toggle();
            tracing::debug!(active, "casual mode toggled");
            println!();
            println!("{}", theme.paint(Tone::Accent, banner(active)));
        }
    }))
}

#[cfg(not(unix))]
pub fn spawn_casual_listener(_casual: CasualMode, _theme: Theme) -> anyhow::Result<JoinHandle<()>> {
    Ok(tokio::spawn(async {}))
}
