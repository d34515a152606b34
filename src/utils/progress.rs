//! Build spinner that becomes a no-op when the `progress` feature is disabled

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};
#[cfg(feature = "progress")]
use std::time::Duration;

/// Spinner shown on stderr while an index is being built
pub struct BuildSpinner {
    #[cfg(feature = "progress")]
    bar: Option<ProgressBar>,
}

impl BuildSpinner {
    /// Start a spinner with `message`, or a silent one when `enabled` is false
    pub fn start(message: &str, enabled: bool) -> Self {
        #[cfg(feature = "progress")]
        {
            let bar = enabled.then(|| {
                let bar = ProgressBar::new_spinner();
                if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
                    bar.set_style(style);
                }
                bar.set_message(message.to_string());
                bar.enable_steady_tick(Duration::from_millis(80));
                bar
            });
            Self { bar }
        }

        #[cfg(not(feature = "progress"))]
        {
            let _ = (message, enabled);
            Self {}
        }
    }

    /// Stop the spinner and clear its line
    pub fn finish(self) {
        #[cfg(feature = "progress")]
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
