//! Flash read modes of the memory-mapped controller

use super::SpiCtrl;

/// Data-line configuration used for memory-mapped flash reads
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FlashMode {
    /// Standard SPI: 1-1-1
    #[default]
    Single,
    /// Dual I/O: 1-2-2
    Dual,
    /// Quad I/O: 1-4-4 (needs the chip's quad flag)
    Quad,
    /// Quad I/O with double data rate
    QuadDdr,
}

impl FlashMode {
    /// Number of data lines used in the data phase
    pub const fn data_lines(&self) -> u8 {
        match self {
            Self::Single => 1,
            Self::Dual => 2,
            Self::Quad | Self::QuadDdr => 4,
        }
    }

    /// Returns true if this mode needs the chip's quad enable flag
    pub const fn requires_quad(&self) -> bool {
        matches!(self, Self::Quad | Self::QuadDdr)
    }

    /// Control register bits selecting this mode
    pub const fn ctrl_bits(&self) -> SpiCtrl {
        match self {
            Self::Single => SpiCtrl::empty(),
            Self::Dual => SpiCtrl::DDR,
            Self::Quad => SpiCtrl::QSPI,
            Self::QuadDdr => SpiCtrl::DDR.union(SpiCtrl::QSPI),
        }
    }

    /// Decode the mode from a control register value
    pub fn from_ctrl(ctrl: SpiCtrl) -> Self {
        match (ctrl.contains(SpiCtrl::DDR), ctrl.contains(SpiCtrl::QSPI)) {
            (false, false) => Self::Single,
            (true, false) => Self::Dual,
            (false, true) => Self::Quad,
            (true, true) => Self::QuadDdr,
        }
    }
}
