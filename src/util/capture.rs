use std::{cell::RefCell, io, rc::Rc};

/// A cloneable in-memory writer.
///
/// Every clone appends to the same buffer, so one clone can be given to a
/// context as its output stream while another is kept to inspect what the
/// program printed.
///
/// ## Example
/// ```
/// use std::io::Write;
///
/// use cshs::util::capture::SharedOutput;
///
/// let output = SharedOutput::default();
/// let mut writer = output.clone();
/// writeln!(writer, "hello").unwrap();
///
/// assert_eq!(output.contents(), "hello\n");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedOutput(Rc<RefCell<Vec<u8>>>);

impl SharedOutput {
    /// Returns everything written so far, decoded as UTF-8 with invalid
    /// sequences replaced.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl io::Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
