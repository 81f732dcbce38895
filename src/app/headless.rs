// LogViewer - app/headless.rs
//
// Command-line runs of the controller without a window: list the files, or
// run one search and print the matched lines. Notices go to `err`, results
// to `out`.

use crate::app::controller::QueryController;
use std::io::{self, Write};
use std::time::Duration;

/// Print the file list, one name per line. Returns false on failure.
pub fn run_list<W: Write, E: Write>(
    controller: &mut QueryController,
    out: &mut W,
    err: &mut E,
    timeout: Duration,
) -> io::Result<bool> {
    controller.refresh_file_list();
    if !settle(controller, err, timeout)? {
        return Ok(false);
    }
    for file in &controller.state().file_list {
        writeln!(out, "{file}")?;
    }
    Ok(true)
}

/// Run the current payload as a search and print the lines.
/// Returns false when the search was blocked or failed.
pub fn run_search<W: Write, E: Write>(
    controller: &mut QueryController,
    out: &mut W,
    err: &mut E,
    timeout: Duration,
) -> io::Result<bool> {
    controller.search();
    if !settle(controller, err, timeout)? {
        return Ok(false);
    }
    for line in &controller.state().log_data {
        writeln!(out, "{}", line.display_text())?;
    }
    Ok(true)
}

/// Wait for outstanding calls, then report any notices. True if none.
fn settle<E: Write>(
    controller: &mut QueryController,
    err: &mut E,
    timeout: Duration,
) -> io::Result<bool> {
    if !controller.wait_idle(timeout) {
        writeln!(err, "Timed out waiting for the log server.")?;
        return Ok(false);
    }
    let mut clean = true;
    while let Some(notice) = controller.state().current_notice() {
        writeln!(err, "{}: {}", notice.title(), notice.text())?;
        controller.dismiss_notice();
        clean = false;
    }
    Ok(clean)
}
