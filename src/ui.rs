/// User interface and status output utilities
///
/// This module handles:
/// - Thread-safe status output on stderr
/// - Colored terminal text
///
/// Status lines go to stderr so they never mix into a report on stdout.

use lazy_static::lazy_static;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Execute a function with exclusive access to status output
fn status_lock<F>(f: F)
where
    F: FnOnce(),
{
    lazy_static! {
        static ref LOCK: Mutex<()> = Mutex::new(());
    }
    let _guard = LOCK.lock();
    f();
}

/// Print colored text to stderr, with fallback to plain text
fn print_color(s: &str, fg: term::color::Color) {
    if !really_print_color(s, fg) {
        eprint!("{}", s);
    }

    fn really_print_color(s: &str, fg: term::color::Color) -> bool {
        let Some(mut t) = term::stderr() else { return false };
        if t.fg(fg).is_err() {
            return false;
        }
        let _ = t.attr(term::Attr::Bold);
        if write!(t, "{}", s).is_err() {
            return false;
        }
        let _ = t.reset();
        true
    }
}

/// Print a status message (thread-safe)
pub fn status(s: &str) {
    status_lock(|| {
        eprintln!("{}", s);
    });
}

/// Tell the user where the report was written
pub fn log_output_file(path: &Path) {
    status_lock(|| {
        print_color("Scan results saved.", term::color::BRIGHT_GREEN);
        eprintln!(" filename: {}", path.display());
    });
}

/// Print an error message with colored "error" prefix
pub fn print_error(msg: &str) {
    status_lock(|| {
        eprintln!();
        print_color("error", term::color::BRIGHT_RED);
        eprintln!(": {}", msg);
        eprintln!();
    });
}
