//! Declaration modifier flags.

use bitflags::bitflags;

bitflags! {
    /// Modifier keywords attached to a type, method, or field declaration.
    ///
    /// Stored as a bit set because declarations may carry any combination
    /// and the processor only ever asks membership questions.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct Modifiers: u16 {
        const PUBLIC       = 1 << 0;
        const PRIVATE      = 1 << 1;
        const PROTECTED    = 1 << 2;
        const STATIC       = 1 << 3;
        const FINAL        = 1 << 4;
        const ABSTRACT     = 1 << 5;
        const NATIVE       = 1 << 6;
        const SYNCHRONIZED = 1 << 7;
        const TRANSIENT    = 1 << 8;
        const VOLATILE     = 1 << 9;
        const STRICTFP     = 1 << 10;
        const DEFAULT      = 1 << 11;
        const SEALED       = 1 << 12;
        const NON_SEALED   = 1 << 13;
    }
}

impl Modifiers {
    /// A terminal type cannot be extended, so it is never a graft candidate.
    #[inline]
    pub fn is_terminal(self) -> bool {
        self.contains(Modifiers::FINAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_is_terminal() {
        assert!((Modifiers::PUBLIC | Modifiers::FINAL).is_terminal());
        assert!(!(Modifiers::PUBLIC | Modifiers::ABSTRACT).is_terminal());
    }
}
