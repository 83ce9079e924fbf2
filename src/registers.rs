//! Register map and control-register layouts of the HLW811x chips.

use modular_bitfield::prelude::*;
use strum_macros::EnumIter;

/// Every directly addressable register this driver touches.
///
/// Multi-byte registers are transferred big-endian. Widths and signedness
/// follow the chip reference manual; the measurement registers wider than
/// three bytes are read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
#[repr(u8)]
pub enum Register {
    /// __R/W__ - System control: ADC enables and PGA gain fields.
    SysCon = 0x00,
    /// __R/W__ - Metering control: accumulation enables, power/RMS/zero-crossing modes.
    EmuCon = 0x01,
    /// __R/W__ - Pulse frequency constant.
    HfConst = 0x02,
    /// __R/W__ - Channel A active power gain correction.
    PaGain = 0x05,
    /// __R/W__ - Channel B active power gain correction.
    PbGain = 0x06,
    /// __R/W__ - Channel A phase compensation.
    PhaseA = 0x07,
    /// __R/W__ - Channel B phase compensation.
    PhaseB = 0x08,
    /// __R/W__ - Channel A active power offset correction.
    PaOffset = 0x0A,
    /// __R/W__ - Channel B active power offset correction.
    PbOffset = 0x0B,
    /// __R/W__ - Channel A RMS offset correction.
    RmsIaOffset = 0x0E,
    /// __R/W__ - Channel B RMS offset correction.
    RmsIbOffset = 0x0F,
    /// __R/W__ - Channel B current gain correction.
    IbGain = 0x10,
    /// __R/W__ - Apparent power gain correction.
    PsGain = 0x11,
    /// __R/W__ - Apparent power offset correction.
    PsOffset = 0x12,
    /// __R/W__ - Metering control 2: feature enables and data update rate.
    EmuCon2 = 0x13,
    /// __R__ - Phase angle between voltage and current.
    Angle = 0x22,
    /// __R__ - Mains frequency counter.
    UFreq = 0x23,
    /// __R__ - Channel A current RMS.
    RmsIa = 0x24,
    /// __R__ - Channel B current RMS.
    RmsIb = 0x25,
    /// __R__ - Voltage RMS.
    RmsU = 0x26,
    /// __R__ - Power factor, signed fraction of full scale.
    PowerFactor = 0x27,
    /// __R__ - Channel A active energy accumulator.
    EnergyPa = 0x28,
    /// __R__ - Channel B active energy accumulator.
    EnergyPb = 0x29,
    /// __R__ - Channel A active power.
    PowerPa = 0x2C,
    /// __R__ - Channel B active power.
    PowerPb = 0x2D,
    /// __R__ - Apparent power.
    PowerS = 0x2E,
    /// __R__ - Two's-complement cover value for the conversion coefficients.
    CoeffChecksum = 0x6F,
    /// __R__ - Channel A RMS conversion coefficient.
    RmsIaCoeff = 0x70,
    /// __R__ - Channel B RMS conversion coefficient.
    RmsIbCoeff = 0x71,
    /// __R__ - Voltage RMS conversion coefficient.
    RmsUCoeff = 0x72,
    /// __R__ - Channel A active power conversion coefficient.
    PowerPaCoeff = 0x73,
    /// __R__ - Channel B active power conversion coefficient.
    PowerPbCoeff = 0x74,
    /// __R__ - Apparent power conversion coefficient.
    PowerSCoeff = 0x75,
    /// __R__ - Channel A energy conversion coefficient.
    EnergyACoeff = 0x76,
    /// __R__ - Channel B energy conversion coefficient.
    EnergyBCoeff = 0x77,
}

impl Register {
    /// Wire address.
    pub const fn addr(self) -> u8 {
        self as u8
    }

    /// Payload width in bytes.
    pub const fn width(self) -> usize {
        match self {
            Register::PhaseA | Register::PhaseB => 1,
            Register::RmsIa
            | Register::RmsIb
            | Register::RmsU
            | Register::PowerFactor
            | Register::EnergyPa
            | Register::EnergyPb => 3,
            Register::PowerPa | Register::PowerPb | Register::PowerS => 4,
            _ => 2,
        }
    }

    /// Whether the payload is a two's-complement value at its declared width.
    pub const fn signed(self) -> bool {
        matches!(
            self,
            Register::PowerFactor | Register::PowerPa | Register::PowerPb | Register::PowerS
        )
    }
}

/// SYSCON register layout.
///
/// Gain fields hold the 3-bit codes of [`crate::PgaGain`]; the enable bits
/// power the per-channel ADCs.
#[bitfield]
#[derive(Debug)]
pub(crate) struct SysCon {
    pub pga_ia: B3,
    pub pga_u: B3,
    pub pga_ib: B3,
    pub adc_ia_on: bool,
    pub adc_ib_on: bool,
    pub adc_u_on: bool,
    #[skip]
    __: B4,
}

/// EMUCON register layout.
#[bitfield]
#[derive(Debug)]
pub(crate) struct EmuCon {
    pub pa_run: bool,
    pub pb_run: bool,
    #[skip]
    __: B7,
    pub dc_mode: bool,
    pub pmode: B2,
    pub zxd: B2,
    #[skip]
    __: B2,
}

/// EMUCON2 register layout.
#[bitfield]
#[derive(Debug)]
pub(crate) struct EmuCon2 {
    pub pf_en: bool,
    pub wave_en: bool,
    pub zx_en: bool,
    pub epa_clr: bool,
    pub epb_clr: bool,
    pub b_temp: bool,
    #[skip]
    __: B2,
    pub dup_sel: B2,
    #[skip]
    __: B6,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn register_addresses_are_unique() {
        let mut seen: Vec<u8> = Register::iter().map(|r| r.addr()).collect();
        seen.sort_unstable();
        let len = seen.len();
        seen.dedup();
        assert_eq!(seen.len(), len);
    }

    #[test]
    fn register_widths_are_in_range() {
        for register in Register::iter() {
            assert!((1..=4).contains(&register.width()), "{register:?}");
        }
    }

    #[test]
    fn only_power_quantities_are_signed() {
        for register in Register::iter() {
            let expected = matches!(
                register,
                Register::PowerFactor | Register::PowerPa | Register::PowerPb | Register::PowerS
            );
            assert_eq!(register.signed(), expected, "{register:?}");
        }
    }

    #[test]
    fn syscon_layout_matches_power_on_value() {
        // 0x0A04: channel A gain x16, channels A and U powered.
        let syscon = SysCon::from_bytes(0x0A04u16.to_le_bytes());
        assert_eq!(syscon.pga_ia(), 4);
        assert_eq!(syscon.pga_u(), 0);
        assert_eq!(syscon.pga_ib(), 0);
        assert!(syscon.adc_ia_on());
        assert!(!syscon.adc_ib_on());
        assert!(syscon.adc_u_on());
    }

    #[test]
    fn syscon_enable_bits_round_trip() {
        let syscon = SysCon::from_bytes(0x0A04u16.to_le_bytes())
            .with_adc_ia_on(true)
            .with_adc_ib_on(true)
            .with_adc_u_on(true);
        assert_eq!(u16::from_le_bytes(syscon.into_bytes()), 0x0E04);
    }

    #[test]
    fn emucon_fields_map_to_expected_bits() {
        let emucon = EmuCon::new()
            .with_pa_run(true)
            .with_pb_run(true)
            .with_dc_mode(true)
            .with_pmode(2)
            .with_zxd(1);
        let raw = u16::from_le_bytes(emucon.into_bytes());
        assert_eq!(raw, 0x0001 | 0x0002 | 0x0200 | 0x0800 | 0x1000);
    }

    #[test]
    fn emucon2_fields_map_to_expected_bits() {
        let emucon2 = EmuCon2::new()
            .with_pf_en(true)
            .with_wave_en(true)
            .with_zx_en(true)
            .with_epa_clr(true)
            .with_epb_clr(true)
            .with_b_temp(true)
            .with_dup_sel(3);
        let raw = u16::from_le_bytes(emucon2.into_bytes());
        assert_eq!(raw, 0x003F | 0x0300);
    }
}
