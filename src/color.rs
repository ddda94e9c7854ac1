use strum::{Display, VariantArray};

/// The closed palette available to panel elements.
///
/// Rules only ever compare colors for equality, so the palette is a plain
/// enum rather than an RGB triple. `VariantArray` exposes the full palette
/// for generators and tests.
#[derive(Copy, Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, VariantArray)]
pub enum Color {
    /// Black.
    Black,
    /// White.
    White,
    /// Red.
    Red,
    /// Green.
    Green,
    /// Blue.
    Blue,
    /// Yellow.
    Yellow,
    /// Orange.
    Orange,
    /// Magenta.
    Magenta,
    /// Cyan.
    Cyan,
}
