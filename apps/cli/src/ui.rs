use std::{future::Future, time::Duration};

use console::{StyledObject, style};
use indicatif::{ProgressBar, ProgressStyle};

pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .expect("static spinner template"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn check() -> StyledObject<&'static str> {
    style("✓").green().bold()
}

pub fn cross() -> StyledObject<&'static str> {
    style("✗").red().bold()
}

/// Run `fut` unless the user hits Ctrl-C first.
pub async fn until_cancelled<T>(fut: impl Future<Output = T>) -> Option<T> {
    tokio::select! {
        out = fut => Some(out),
        _ = tokio::signal::ctrl_c() => None,
    }
}

pub fn print_banner(subtitle: &str) {
    println!(
        "\n{}  {}\n",
        style("livecut").cyan().bold(),
        style(subtitle).dim()
    );
}
