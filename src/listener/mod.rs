mod count_printer;
mod count_writer;

use std::fmt;

use crate::model::*;

pub use count_printer::CountPrinter;
pub use count_writer::CountWriter;

pub trait Listener: Send {
    fn notify_counts(&mut self, _counts: &BoardCounts) {}
}

impl fmt::Debug for dyn Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener")
    }
}
