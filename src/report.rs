//! Where classified orientations go.

use core::fmt::Write;

use crate::orientation::OrientationState;

/// One-way consumer of orientation updates, e.g. a console or a display.
pub trait OrientationSink {
    /// Called once per classification cycle with the latest orientation.
    fn report(&mut self, orientation: OrientationState);

    /// Called once when the sensing task faults. No reports follow.
    fn fault(&mut self, _code: u32, _message: &'static str) {}
}

impl<S: OrientationSink + ?Sized> OrientationSink for &mut S {
    fn report(&mut self, orientation: OrientationState) {
        (**self).report(orientation)
    }

    fn fault(&mut self, code: u32, message: &'static str) {
        (**self).fault(code, message)
    }
}

/// Logs every orientation.
#[derive(Debug, Default, Copy, Clone)]
pub struct LogSink;

impl OrientationSink for LogSink {
    fn report(&mut self, orientation: OrientationState) {
        info!("Orientation = {}", orientation.label());
    }
}

/// Terminal output that keeps the orientation on a single, rewritten line.
///
/// For hosts with an ANSI text console; the firmware binary logs through
/// [`LogSink`] instead.
///
/// ```
/// use orientation_sensing::{ConsoleSink, OrientationSink, OrientationState};
///
/// let mut console = ConsoleSink::new(String::new());
/// console.write_banner().unwrap();
/// console.report(OrientationState::FaceUp);
///
/// assert!(console.into_inner().ends_with("\x1b[1FOrientation = DISP_UP    \n"));
/// ```
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Clear the screen and print the title box.
    pub fn write_banner(&mut self) -> core::fmt::Result {
        const RULE: &str =
            "***************************************************************************";

        // ANSI: clear screen, cursor home
        self.out.write_str("\x1b[2J\x1b[;H")?;
        writeln!(self.out, "{}", RULE)?;
        writeln!(self.out, "    Board orientation from LIS3DH motion sensor (embassy)")?;
        writeln!(self.out, "{}", RULE)?;
        // the first report moves up onto this line
        writeln!(self.out)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OrientationSink for ConsoleSink<W> {
    fn report(&mut self, orientation: OrientationState) {
        if orientation == OrientationState::Unknown {
            return;
        }

        // ANSI: cursor to start of previous line; pad to overwrite longer labels
        let _ = writeln!(self.out, "\x1b[1FOrientation = {:<11}", orientation.label());
    }

    fn fault(&mut self, code: u32, message: &'static str) {
        let _ = writeln!(self.out, " Error : {} !!\n [Error code: {:#x}]", message, code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::String;

    #[test]
    fn rewrites_one_line_per_report() {
        let mut sink = ConsoleSink::new(String::new());

        sink.report(OrientationState::TopEdgeUp);
        sink.report(OrientationState::BottomEdgeUp);
        sink.report(OrientationState::Unknown);
        sink.report(OrientationState::FaceDown);

        assert_eq!(
            sink.into_inner(),
            "\x1b[1FOrientation = TOP_EDGE   \n\
             \x1b[1FOrientation = BOTTOM_EDGE\n\
             \x1b[1FOrientation = DISP_DOWN  \n"
        );
    }

    #[test]
    fn banner_clears_the_screen_first() {
        let mut sink = ConsoleSink::new(String::new());
        sink.write_banner().unwrap();

        let out = sink.into_inner();
        assert!(out.starts_with("\x1b[2J\x1b[;H"));
        assert!(out.ends_with("\n\n"));
    }

    #[test]
    fn fault_prints_code() {
        let mut sink = ConsoleSink::new(String::new());
        sink.fault(0x4, "Could not read motion sensor data");

        assert_eq!(
            sink.into_inner(),
            " Error : Could not read motion sensor data !!\n [Error code: 0x4]\n"
        );
    }
}
