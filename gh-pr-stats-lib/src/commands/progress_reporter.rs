use crate::facts::Progress;
use core::fmt::{Debug, Formatter};
use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::task::JoinHandle;

const REFRESH_INTERVAL: Duration = Duration::from_millis(100);

const BAR_TEMPLATE: &str = "{prefix:>12.bold.cyan} [{bar:25}] {msg}";
const BAR_TEMPLATE_NO_COLOR: &str = "{prefix:>12} [{bar:25}] {msg}";
const SPINNER_TEMPLATE: &str = "{prefix:>12.bold.cyan} {spinner:.cyan} {msg}";
const SPINNER_TEMPLATE_NO_COLOR: &str = "{prefix:>12} {spinner} {msg}";
const SPINNER_TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "];

type MeasuredCallback = Box<dyn Fn() -> (u64, u64, String) + Send + Sync>;
type MessageCallback = Box<dyn Fn() -> String + Send + Sync>;

/// What the indicator currently displays.
enum Status {
    Idle,
    Determinate(MeasuredCallback),
    Indeterminate(MessageCallback),
}

struct Shared {
    visible_after: Instant,
    visible: AtomicBool,
    status: Mutex<Status>,
}

/// A progress indicator on stderr that stays hidden until an operation has run past a delay.
pub struct ProgressReporter {
    bar: ProgressBar,
    shared: Arc<Shared>,
    refresh_task: JoinHandle<()>,
    use_colors: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(delay: Duration, use_colors: bool) -> Self {
        let bar = ProgressBar::hidden();
        let shared = Arc::new(Shared {
            visible_after: Instant::now() + delay,
            visible: AtomicBool::new(false),
            status: Mutex::new(Status::Idle),
        });

        Self {
            refresh_task: tokio::spawn(refresh(bar.clone(), Arc::clone(&shared))),
            bar,
            shared,
            use_colors,
        }
    }

    fn set_status(&self, status: Status) {
        *self.shared.status.lock().expect("lock poisoned") = status;
    }
}

impl Progress for ProgressReporter {
    fn set_phase(&self, phase: &str) {
        self.bar.set_prefix(phase.to_string());
    }

    fn set_determinate(&self, callback: Box<dyn Fn() -> (u64, u64, String) + Send + Sync + 'static>) {
        self.set_status(Status::Determinate(callback));
        self.bar.disable_steady_tick();
        self.bar.set_position(0);

        let template = if self.use_colors { BAR_TEMPLATE } else { BAR_TEMPLATE_NO_COLOR };
        self.bar.set_style(
            ProgressStyle::default_bar()
                .template(template)
                .expect("could not create progress bar style")
                .progress_chars("=> "),
        );
    }

    fn set_indeterminate(&self, callback: Box<dyn Fn() -> String + Send + Sync + 'static>) {
        self.set_status(Status::Indeterminate(callback));
        self.bar.enable_steady_tick(REFRESH_INTERVAL);

        let template = if self.use_colors { SPINNER_TEMPLATE } else { SPINNER_TEMPLATE_NO_COLOR };
        self.bar.set_style(
            ProgressStyle::default_spinner()
                .template(template)
                .expect("could not create progress bar style")
                .tick_strings(SPINNER_TICKS),
        );
    }

    fn done(&self) {
        self.refresh_task.abort();
        if self.shared.visible.load(Ordering::Relaxed) {
            self.bar.finish_and_clear();
        }
    }
}

impl Debug for ProgressReporter {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("bar", &self.bar)
            .field("visible", &self.shared.visible)
            .field("use_colors", &self.use_colors)
            .finish_non_exhaustive()
    }
}

/// Reveal the indicator once the delay has passed, then keep its message current until aborted.
async fn refresh(bar: ProgressBar, shared: Arc<Shared>) {
    let mut interval = tokio::time::interval(REFRESH_INTERVAL);
    #[expect(clippy::infinite_loop, reason = "task runs until aborted")]
    loop {
        let _ = interval.tick().await;

        if !shared.visible.load(Ordering::Relaxed) {
            if Instant::now() < shared.visible_after {
                continue;
            }
            shared.visible.store(true, Ordering::Relaxed);
            bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(10));
        }

        let message = match &*shared.status.lock().expect("lock poisoned") {
            Status::Idle => continue,
            Status::Indeterminate(callback) => callback(),
            Status::Determinate(callback) => {
                let (length, position, message) = callback();
                bar.set_length(length);
                bar.set_position(position);
                message
            }
        };
        bar.set_message(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hidden_before_delay() {
        let reporter = ProgressReporter::new(Duration::from_secs(3600), false);
        reporter.set_phase("Fetching");
        reporter.set_indeterminate(Box::new(|| "0 pages".to_string()));

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(!reporter.shared.visible.load(Ordering::Relaxed));

        reporter.done();
    }

    #[tokio::test]
    async fn test_visible_after_delay() {
        let reporter = ProgressReporter::new(Duration::ZERO, false);
        reporter.set_indeterminate(Box::new(|| "1 page".to_string()));

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!(reporter.shared.visible.load(Ordering::Relaxed));

        reporter.done();
    }

    #[tokio::test]
    async fn test_switch_to_determinate() {
        let reporter = ProgressReporter::new(Duration::from_secs(3600), true);
        reporter.set_indeterminate(Box::new(|| "starting".to_string()));
        assert!(matches!(*reporter.shared.status.lock().unwrap(), Status::Indeterminate(_)));

        reporter.set_determinate(Box::new(|| (4, 1, "1/4 pages".to_string())));
        match &*reporter.shared.status.lock().unwrap() {
            Status::Determinate(callback) => {
                let (total, current, message) = callback();
                assert_eq!((total, current, message.as_str()), (4, 1, "1/4 pages"));
            }
            _ => panic!("expected determinate status"),
        }

        reporter.done();
    }
}
