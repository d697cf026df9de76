//! Pretty printing utilities.

use core::fmt::{Display, Error as FmtError, Formatter};

/// Displays a slice as `[ a, b, c ]`.
pub struct PrettySlice<'a, T>(pub &'a [T]);

impl<'a, T: Display> Display for PrettySlice<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "[ ")?;
        let mut iter = self.0.iter().peekable();
        while let Some(element) = iter.next() {
            write!(f, "{element}")?;
            if iter.peek().is_some() {
                write!(f, ", ")?;
            }
        }
        write!(f, " ]")
    }
}
