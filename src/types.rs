//! Value types shared across the driver surface.

use strum_macros::EnumIter;

/// Measurement channels: two current channels and the voltage channel.
///
/// The discriminants are the chip's channel bits and must stay wire-exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
#[repr(u8)]
pub enum Channel {
    A = 0x01,
    B = 0x02,
    U = 0x04,
}

/// A set of channels, built with `|`.
///
/// ```
/// use hlw811x::{Channel, ChannelSet};
///
/// let set = Channel::A | Channel::U;
/// assert!(set.contains(Channel::A));
/// assert_eq!(set.bits(), 0x05);
/// assert_eq!(ChannelSet::ALL.bits(), 0x07);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelSet(u8);

impl ChannelSet {
    pub const ALL: ChannelSet = ChannelSet(0x07);

    pub const fn empty() -> Self {
        ChannelSet(0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The raw channel bits as the chip encodes them.
    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, channel: Channel) -> bool {
        self.0 & channel as u8 != 0
    }
}

impl From<Channel> for ChannelSet {
    fn from(channel: Channel) -> Self {
        ChannelSet(channel as u8)
    }
}

impl core::ops::BitOr for Channel {
    type Output = ChannelSet;

    fn bitor(self, rhs: Channel) -> ChannelSet {
        ChannelSet(self as u8 | rhs as u8)
    }
}

impl core::ops::BitOr<Channel> for ChannelSet {
    type Output = ChannelSet;

    fn bitor(self, rhs: Channel) -> ChannelSet {
        ChannelSet(self.0 | rhs as u8)
    }
}

impl core::ops::BitOr for ChannelSet {
    type Output = ChannelSet;

    fn bitor(self, rhs: ChannelSet) -> ChannelSet {
        ChannelSet(self.0 | rhs.0)
    }
}

/// Programmable gain amplifier settings.
///
/// The discriminants are the 3-bit field codes of the SYSCON gain fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter)]
#[repr(u8)]
pub enum PgaGain {
    #[default]
    X1 = 0,
    X2 = 1,
    X4 = 2,
    X8 = 3,
    X16 = 4,
}

impl PgaGain {
    /// Analog gain factor.
    pub const fn factor(self) -> u32 {
        1 << (self as u32)
    }

    /// Decode a 3-bit SYSCON gain field.
    pub(crate) const fn from_field(bits: u8) -> Option<PgaGain> {
        match bits {
            0 => Some(PgaGain::X1),
            1 => Some(PgaGain::X2),
            2 => Some(PgaGain::X4),
            3 => Some(PgaGain::X8),
            4 => Some(PgaGain::X16),
            _ => None,
        }
    }
}

/// Per-channel PGA gains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pga {
    pub a: PgaGain,
    pub b: PgaGain,
    pub u: PgaGain,
}

/// External sense-resistor and divider constants supplied by the integrator.
///
/// All three are plain multipliers independent of the chip's own calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResistorRatio {
    /// Current channel A.
    pub k1_a: f32,
    /// Current channel B.
    pub k1_b: f32,
    /// Voltage channel.
    pub k2: f32,
}

impl Default for ResistorRatio {
    fn default() -> Self {
        Self {
            k1_a: 1.0,
            k1_b: 1.0,
            k2: 1.0,
        }
    }
}

/// How active power accumulates positive and negative half-waves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
#[repr(u8)]
pub enum ActivePowerMode {
    /// Positive and negative power add algebraically.
    Algebraic = 0,
    /// Only positive power accumulates.
    PositiveOnly = 1,
    /// Positive and negative power add by absolute value.
    Absolute = 2,
}

/// RMS computation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RmsMode {
    Ac,
    Dc,
}

/// Measurement data refresh rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
#[repr(u8)]
pub enum DataUpdateFreq {
    Hz3_4 = 0,
    Hz6_8 = 1,
    Hz13_65 = 2,
    Hz27_3 = 3,
}

/// What channel B measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelBMode {
    /// The chip's internal temperature sensor.
    Temperature,
    /// Normal current measurement.
    Normal,
}

/// Which edges the zero-crossing detector reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
#[repr(u8)]
pub enum ZeroCrossingMode {
    Positive = 0,
    Negative = 1,
    Both = 2,
}

/// Mains frequency, used to scale the phase-angle register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFreq {
    Hz50,
    Hz60,
}

/// Bus the chip is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusInterface {
    Uart,
    Spi,
}

/// RMS conversion coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RmsCoefficients {
    pub a: u16,
    pub b: u16,
    pub u: u16,
}

/// Active and apparent power conversion coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PowerCoefficients {
    pub a: u16,
    pub b: u16,
    pub s: u16,
}

/// Energy conversion coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnergyCoefficients {
    pub a: u16,
    pub b: u16,
}

/// The chip's conversion coefficients, read by
/// [`read_coeff`](crate::Hlw811x::read_coeff).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Coefficients {
    pub rms: RmsCoefficients,
    pub power: PowerCoefficients,
    pub energy: EnergyCoefficients,
    /// Pulse frequency constant.
    pub hfconst: u16,
}

/// A full set of correction codes for
/// [`apply_calibration`](crate::Hlw811x::apply_calibration).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Calibration {
    pub hfconst: u16,
    pub pa_gain: u16,
    pub pb_gain: u16,
    pub phase_a: u8,
    pub phase_b: u8,
    pub pa_offset: u16,
    pub pb_offset: u16,
    pub rms_ia_offset: u16,
    pub rms_ib_offset: u16,
    pub ib_gain: u16,
    pub ps_gain: u16,
    pub ps_offset: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn channel_bits_match_wire_encoding() {
        assert_eq!(Channel::A as u8, 0x01);
        assert_eq!(Channel::B as u8, 0x02);
        assert_eq!(Channel::U as u8, 0x04);
        assert_eq!((Channel::A | Channel::B | Channel::U).bits(), 0x07);
        assert_eq!((Channel::A | Channel::B | Channel::U), ChannelSet::ALL);
    }

    #[test]
    fn channel_set_membership() {
        let set = Channel::A | Channel::U;
        assert!(set.contains(Channel::A));
        assert!(!set.contains(Channel::B));
        assert!(set.contains(Channel::U));
        assert!(ChannelSet::empty().is_empty());
        assert!(!set.is_empty());
    }

    #[test]
    fn pga_gain_factors() {
        let factors: Vec<u32> = PgaGain::iter().map(|g| g.factor()).collect();
        assert_eq!(factors, [1, 2, 4, 8, 16]);
    }

    #[test]
    fn pga_gain_field_round_trip() {
        for gain in PgaGain::iter() {
            assert_eq!(PgaGain::from_field(gain as u8), Some(gain));
        }
        for bits in 5..8 {
            assert_eq!(PgaGain::from_field(bits), None);
        }
    }

    #[test]
    fn resistor_ratio_defaults_to_unity() {
        let ratio = ResistorRatio::default();
        assert_eq!(ratio.k1_a, 1.0);
        assert_eq!(ratio.k1_b, 1.0);
        assert_eq!(ratio.k2, 1.0);
    }
}
