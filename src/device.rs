//! The driver proper: owns the transport, the per-instance device state and
//! every public chip operation.

use crate::{
    calib,
    error::{Error, Result},
    frame::{self, Opcode},
    registers::{EmuCon, EmuCon2, Register, SysCon},
    scaling,
    types::{
        ActivePowerMode, BusInterface, Calibration, Channel, ChannelBMode, ChannelSet,
        Coefficients, DataUpdateFreq, EnergyCoefficients, LineFreq, Pga, PgaGain,
        PowerCoefficients, ResistorRatio, RmsCoefficients, RmsMode, ZeroCrossingMode,
    },
};

/// Minimum settle time after [`Hlw811x::reset`] before the chip answers
/// again; its oscillator needs this long to restart. Waiting is the caller's
/// job, the driver carries no delay source.
pub const RESET_SETTLE_TIME: fugit::MillisDurationU32 = fugit::MillisDurationU32::from_ticks(60);

/// Driver for one HLW811x device behind any [`embedded_io::Read`] +
/// [`embedded_io::Write`] transport.
///
/// Method naming: "set"/plain-noun pairs configure the chip, where the getter
/// issues a fresh register read so the answer reflects the hardware rather
/// than a cache; measurement methods such as [`Self::rms`] read a live
/// quantity. Purely software-side state (resistor ratio, line frequency) is
/// cached and never touches the transport on read.
///
/// All calls are synchronous and blocking; a transport fault is returned
/// immediately, never retried. Instances are not internally synchronized.
pub struct Hlw811x<S: embedded_io::Read + embedded_io::Write> {
    interface: S,
    bus: BusInterface,
    ratio: ResistorRatio,
    pga: Pga,
    coeff: Coefficients,
    channel: Channel,
    line_freq: LineFreq,
}

impl<S: embedded_io::Read + embedded_io::Write> Hlw811x<S> {
    /// Create a driver over `interface`.
    ///
    /// No traffic is generated; readings are meaningless until
    /// [`Self::read_coeff`] has populated the conversion coefficients.
    // @TODO implement the SPI framing; until then only `BusInterface::Uart`
    // performs transfers and SPI operations report `Unimplemented`.
    pub fn new(interface: S, bus: BusInterface) -> Self {
        Self {
            interface,
            bus,
            ratio: ResistorRatio::default(),
            pga: Pga::default(),
            coeff: Coefficients::default(),
            channel: Channel::A,
            line_freq: LineFreq::Hz50,
        }
    }

    /// Issue the reset command.
    ///
    /// The chip accepts no traffic for [`RESET_SETTLE_TIME`] afterwards.
    pub fn reset(&mut self) -> Result<(), S::Error> {
        self.command(Opcode::Reset)
    }

    /// Read a register into `buf`, returning the payload width.
    ///
    /// `buf` is written only after the response checksum has been verified.
    pub fn read_register(&mut self, reg: Register, buf: &mut [u8]) -> Result<usize, S::Error> {
        let width = reg.width();
        if buf.len() < width {
            return Err(Error::BufferTooSmall);
        }
        let (payload, width) = self.read_frame(reg)?;
        buf[..width].copy_from_slice(&payload[..width]);
        Ok(width)
    }

    /// Write `data` to a register, wrapped in the chip's write-enable /
    /// write-disable bracket. `data` must match the register width.
    pub fn write_register(&mut self, reg: Register, data: &[u8]) -> Result<(), S::Error> {
        if data.len() != reg.width() || data.len() > 3 {
            return Err(Error::InvalidParam);
        }
        self.send(&frame::command_frame(Opcode::WriteEnable))?;
        self.send(&frame::write_frame(reg.addr(), data))?;
        self.send(&frame::command_frame(Opcode::WriteDisable))
    }

    /// Power up the ADCs of every channel in `channels`.
    pub fn enable_channel(&mut self, channels: impl Into<ChannelSet>) -> Result<(), S::Error> {
        self.update_adc_enables(channels.into(), true)
    }

    /// Power down the ADCs of every channel in `channels`.
    pub fn disable_channel(&mut self, channels: impl Into<ChannelSet>) -> Result<(), S::Error> {
        self.update_adc_enables(channels.into(), false)
    }

    /// Route a current channel to the shared measurement path.
    pub fn select_channel(&mut self, channel: Channel) -> Result<(), S::Error> {
        let opcode = match channel {
            Channel::A => Opcode::SelectChannelA,
            Channel::B => Opcode::SelectChannelB,
            Channel::U => return Err(Error::InvalidParam),
        };
        self.command(opcode)?;
        self.channel = channel;
        Ok(())
    }

    /// The channel last routed by [`Self::select_channel`].
    pub fn current_channel(&self) -> Channel {
        self.channel
    }

    /// Read the chip's conversion coefficients into the instance cache.
    ///
    /// Ten registers are read in a fixed order; the eight conversion
    /// coefficients plus the cover register must sum to zero mod 2^16,
    /// anything else is reported as [`Error::InvalidData`]. The cache is
    /// replaced only after the whole sequence has succeeded, so a failed
    /// call leaves the previous coefficients intact.
    pub fn read_coeff(&mut self) -> Result<Coefficients, S::Error> {
        let hfconst = self.read_u16(Register::HfConst)?;
        let rms_ia = self.read_u16(Register::RmsIaCoeff)?;
        let rms_ib = self.read_u16(Register::RmsIbCoeff)?;
        let rms_u = self.read_u16(Register::RmsUCoeff)?;
        let power_a = self.read_u16(Register::PowerPaCoeff)?;
        let power_b = self.read_u16(Register::PowerPbCoeff)?;
        let power_s = self.read_u16(Register::PowerSCoeff)?;
        let energy_a = self.read_u16(Register::EnergyACoeff)?;
        let energy_b = self.read_u16(Register::EnergyBCoeff)?;
        let cover = self.read_u16(Register::CoeffChecksum)?;

        let sum = [
            rms_ia, rms_ib, rms_u, power_a, power_b, power_s, energy_a, energy_b, cover,
        ]
        .iter()
        .fold(0u16, |acc, v| acc.wrapping_add(*v));
        if sum != 0 {
            return Err(Error::InvalidData);
        }

        self.coeff = Coefficients {
            rms: RmsCoefficients {
                a: rms_ia,
                b: rms_ib,
                u: rms_u,
            },
            power: PowerCoefficients {
                a: power_a,
                b: power_b,
                s: power_s,
            },
            energy: EnergyCoefficients {
                a: energy_a,
                b: energy_b,
            },
            hfconst,
        };
        Ok(self.coeff)
    }

    /// The coefficients last read by [`Self::read_coeff`].
    pub fn coefficients(&self) -> Coefficients {
        self.coeff
    }

    /// Set the external sense-resistor / divider constants. All three must
    /// be positive.
    pub fn set_resistor_ratio(&mut self, ratio: ResistorRatio) -> Result<(), S::Error> {
        if ratio.k1_a <= 0.0 || ratio.k1_b <= 0.0 || ratio.k2 <= 0.0 {
            return Err(Error::InvalidParam);
        }
        self.ratio = ratio;
        Ok(())
    }

    /// The cached resistor ratio. No transport access.
    pub fn resistor_ratio(&self) -> ResistorRatio {
        self.ratio
    }

    /// Program the per-channel PGA gains, preserving the rest of SYSCON.
    pub fn set_pga(&mut self, pga: Pga) -> Result<(), S::Error> {
        self.update_syscon(|r| {
            r.with_pga_ia(pga.a as u8)
                .with_pga_ib(pga.b as u8)
                .with_pga_u(pga.u as u8)
        })?;
        self.pga = pga;
        Ok(())
    }

    /// Read the PGA gains back from the chip.
    pub fn pga(&mut self) -> Result<Pga, S::Error> {
        let syscon = SysCon::from_bytes(self.read_u16(Register::SysCon)?.to_le_bytes());
        let decode = |field: u8| PgaGain::from_field(field).ok_or(Error::InvalidData);
        Ok(Pga {
            a: decode(syscon.pga_ia())?,
            b: decode(syscon.pga_ib())?,
            u: decode(syscon.pga_u())?,
        })
    }

    /// Select how active power accumulates positive and negative half-waves.
    pub fn set_active_power_mode(&mut self, mode: ActivePowerMode) -> Result<(), S::Error> {
        self.update_emucon(|r| r.with_pmode(mode as u8))
    }

    /// Read the active power accumulation mode back from the chip.
    pub fn active_power_mode(&mut self) -> Result<ActivePowerMode, S::Error> {
        let emucon = EmuCon::from_bytes(self.read_u16(Register::EmuCon)?.to_le_bytes());
        match emucon.pmode() {
            0 => Ok(ActivePowerMode::Algebraic),
            1 => Ok(ActivePowerMode::PositiveOnly),
            2 => Ok(ActivePowerMode::Absolute),
            _ => Err(Error::InvalidData),
        }
    }

    /// Select AC or DC RMS computation.
    pub fn set_rms_mode(&mut self, mode: RmsMode) -> Result<(), S::Error> {
        self.update_emucon(|r| r.with_dc_mode(mode == RmsMode::Dc))
    }

    /// Read the RMS computation mode back from the chip.
    pub fn rms_mode(&mut self) -> Result<RmsMode, S::Error> {
        let emucon = EmuCon::from_bytes(self.read_u16(Register::EmuCon)?.to_le_bytes());
        Ok(if emucon.dc_mode() {
            RmsMode::Dc
        } else {
            RmsMode::Ac
        })
    }

    /// Select which edges the zero-crossing detector reports.
    pub fn set_zero_crossing_mode(&mut self, mode: ZeroCrossingMode) -> Result<(), S::Error> {
        self.update_emucon(|r| r.with_zxd(mode as u8))
    }

    /// Read the zero-crossing mode back from the chip.
    pub fn zero_crossing_mode(&mut self) -> Result<ZeroCrossingMode, S::Error> {
        let emucon = EmuCon::from_bytes(self.read_u16(Register::EmuCon)?.to_le_bytes());
        match emucon.zxd() {
            0 => Ok(ZeroCrossingMode::Positive),
            1 => Ok(ZeroCrossingMode::Negative),
            2 => Ok(ZeroCrossingMode::Both),
            _ => Err(Error::InvalidData),
        }
    }

    /// Select the measurement refresh rate.
    pub fn set_data_update_frequency(&mut self, freq: DataUpdateFreq) -> Result<(), S::Error> {
        self.update_emucon2(|r| r.with_dup_sel(freq as u8))
    }

    /// Read the measurement refresh rate back from the chip.
    pub fn data_update_frequency(&mut self) -> Result<DataUpdateFreq, S::Error> {
        let emucon2 = EmuCon2::from_bytes(self.read_u16(Register::EmuCon2)?.to_le_bytes());
        Ok(match emucon2.dup_sel() {
            0 => DataUpdateFreq::Hz3_4,
            1 => DataUpdateFreq::Hz6_8,
            2 => DataUpdateFreq::Hz13_65,
            _ => DataUpdateFreq::Hz27_3,
        })
    }

    /// Select what channel B measures.
    pub fn set_channel_b_mode(&mut self, mode: ChannelBMode) -> Result<(), S::Error> {
        self.update_emucon2(|r| r.with_b_temp(mode == ChannelBMode::Temperature))
    }

    /// Read the channel B mode back from the chip.
    pub fn channel_b_mode(&mut self) -> Result<ChannelBMode, S::Error> {
        let emucon2 = EmuCon2::from_bytes(self.read_u16(Register::EmuCon2)?.to_le_bytes());
        Ok(if emucon2.b_temp() {
            ChannelBMode::Temperature
        } else {
            ChannelBMode::Normal
        })
    }

    /// Set the mains frequency used by the phase-angle conversion.
    /// Software-side state, no transport access.
    pub fn set_line_frequency(&mut self, freq: LineFreq) {
        self.line_freq = freq;
    }

    /// The configured mains frequency.
    pub fn line_frequency(&self) -> LineFreq {
        self.line_freq
    }

    /// Enable waveform capture.
    pub fn enable_waveform(&mut self) -> Result<(), S::Error> {
        self.update_emucon2(|r| r.with_wave_en(true))
    }

    /// Disable waveform capture.
    pub fn disable_waveform(&mut self) -> Result<(), S::Error> {
        self.update_emucon2(|r| r.with_wave_en(false))
    }

    /// Enable zero-crossing detection.
    pub fn enable_zero_crossing(&mut self) -> Result<(), S::Error> {
        self.update_emucon2(|r| r.with_zx_en(true))
    }

    /// Disable zero-crossing detection.
    pub fn disable_zero_crossing(&mut self) -> Result<(), S::Error> {
        self.update_emucon2(|r| r.with_zx_en(false))
    }

    /// Enable the power factor function.
    pub fn enable_power_factor(&mut self) -> Result<(), S::Error> {
        self.update_emucon2(|r| r.with_pf_en(true))
    }

    /// Disable the power factor function.
    pub fn disable_power_factor(&mut self) -> Result<(), S::Error> {
        self.update_emucon2(|r| r.with_pf_en(false))
    }

    /// Enable pulse output and energy accumulation for current channels.
    pub fn enable_pulse(&mut self, channels: impl Into<ChannelSet>) -> Result<(), S::Error> {
        self.update_accumulation(channels.into(), true)
    }

    /// Disable pulse output and energy accumulation for current channels.
    pub fn disable_pulse(&mut self, channels: impl Into<ChannelSet>) -> Result<(), S::Error> {
        self.update_accumulation(channels.into(), false)
    }

    /// Enable clear-on-read behaviour for the energy accumulators.
    pub fn enable_energy_clearance(
        &mut self,
        channels: impl Into<ChannelSet>,
    ) -> Result<(), S::Error> {
        self.update_energy_clearance(channels.into(), true)
    }

    /// Disable clear-on-read behaviour for the energy accumulators.
    pub fn disable_energy_clearance(
        &mut self,
        channels: impl Into<ChannelSet>,
    ) -> Result<(), S::Error> {
        self.update_energy_clearance(channels.into(), false)
    }

    /// RMS of a channel: milliamps for the current channels, millivolts for
    /// the voltage channel.
    pub fn rms(&mut self, channel: Channel) -> Result<i32, S::Error> {
        match channel {
            Channel::A => {
                let raw = self.read_raw(Register::RmsIa)?;
                Ok(scaling::rms_current_ma(
                    raw,
                    self.coeff.rms.a,
                    self.pga.a,
                    self.ratio.k1_a,
                ))
            }
            Channel::B => {
                let raw = self.read_raw(Register::RmsIb)?;
                Ok(scaling::rms_current_ma(
                    raw,
                    self.coeff.rms.b,
                    self.pga.b,
                    self.ratio.k1_b,
                ))
            }
            Channel::U => {
                let raw = self.read_raw(Register::RmsU)?;
                Ok(scaling::rms_voltage_mv(
                    raw,
                    self.coeff.rms.u,
                    self.pga.u,
                    self.ratio.k2,
                ))
            }
        }
    }

    /// Active power of a current channel in milliwatts, signed.
    pub fn power(&mut self, channel: Channel) -> Result<i32, S::Error> {
        let (reg, coeff, gain, k1) = match channel {
            Channel::A => (
                Register::PowerPa,
                self.coeff.power.a,
                self.pga.a,
                self.ratio.k1_a,
            ),
            Channel::B => (
                Register::PowerPb,
                self.coeff.power.b,
                self.pga.b,
                self.ratio.k1_b,
            ),
            Channel::U => return Err(Error::InvalidParam),
        };
        let raw = self.read_raw(reg)?;
        Ok(scaling::active_power_mw(
            raw,
            coeff,
            gain,
            self.pga.u,
            k1,
            self.ratio.k2,
        ))
    }

    /// Accumulated active energy of a current channel in watt-hours.
    pub fn energy(&mut self, channel: Channel) -> Result<i32, S::Error> {
        let (reg, coeff, gain, k1) = match channel {
            Channel::A => (
                Register::EnergyPa,
                self.coeff.energy.a,
                self.pga.a,
                self.ratio.k1_a,
            ),
            Channel::B => (
                Register::EnergyPb,
                self.coeff.energy.b,
                self.pga.b,
                self.ratio.k1_b,
            ),
            Channel::U => return Err(Error::InvalidParam),
        };
        let raw = self.read_raw(reg)?;
        Ok(scaling::energy_wh(
            raw,
            coeff,
            self.coeff.hfconst,
            gain,
            self.pga.u,
            k1,
            self.ratio.k2,
        ))
    }

    /// Mains frequency in centihertz.
    ///
    /// Waveform capture and zero-crossing detection must be enabled first;
    /// the driver does not enable them implicitly, and without them the
    /// chip's silence or garbage is surfaced as the corresponding error. A
    /// zeroed counter register reads as [`Error::InvalidData`].
    pub fn frequency(&mut self) -> Result<i32, S::Error> {
        let raw = self.read_raw(Register::UFreq)?;
        if raw == 0 {
            return Err(Error::InvalidData);
        }
        Ok(scaling::frequency_chz(raw as u16))
    }

    /// Power factor in hundredths, signed. Same preconditions as
    /// [`Self::frequency`].
    pub fn power_factor(&mut self) -> Result<i32, S::Error> {
        let raw = self.read_raw(Register::PowerFactor)?;
        Ok(scaling::power_factor_centi(raw))
    }

    /// Phase angle between voltage and current in hundredths of a degree,
    /// scaled for the configured line frequency. Same preconditions as
    /// [`Self::frequency`].
    pub fn phase_angle(&mut self) -> Result<i32, S::Error> {
        let raw = self.read_raw(Register::Angle)?;
        Ok(scaling::phase_angle_cdeg(raw as u16, self.line_freq))
    }

    /// Write a full calibration bundle, one bracketed register write at a
    /// time, in a fixed order. There is no rollback: a failure partway
    /// leaves the earlier registers written.
    pub fn apply_calibration(&mut self, cal: &Calibration) -> Result<(), S::Error> {
        self.write_u16(Register::HfConst, cal.hfconst)?;
        self.write_u16(Register::PaGain, cal.pa_gain)?;
        self.write_u16(Register::PbGain, cal.pb_gain)?;
        self.write_register(Register::PhaseA, &[cal.phase_a])?;
        self.write_register(Register::PhaseB, &[cal.phase_b])?;
        self.write_u16(Register::PaOffset, cal.pa_offset)?;
        self.write_u16(Register::PbOffset, cal.pb_offset)?;
        self.write_u16(Register::RmsIaOffset, cal.rms_ia_offset)?;
        self.write_u16(Register::RmsIbOffset, cal.rms_ib_offset)?;
        self.write_u16(Register::IbGain, cal.ib_gain)?;
        self.write_u16(Register::PsGain, cal.ps_gain)?;
        self.write_u16(Register::PsOffset, cal.ps_offset)
    }

    /// Gain code for the active power registers, from an error percentage
    /// measured against a reference meter.
    pub fn calc_active_power_gain(&mut self, error_pct: f32) -> Result<u16, S::Error> {
        Ok(calib::power_gain(error_pct))
    }

    /// Offset code for a current channel's active power, from the live
    /// reading and a measured error percentage.
    pub fn calc_active_power_offset(
        &mut self,
        channel: Channel,
        error_pct: f32,
    ) -> Result<u16, S::Error> {
        let reg = match channel {
            Channel::A => Register::PowerPa,
            Channel::B => Register::PowerPb,
            Channel::U => return Err(Error::InvalidParam),
        };
        let raw = self.read_raw(reg)?;
        Ok(calib::power_offset(raw, error_pct))
    }

    /// Offset code zeroing a current channel's no-load RMS reading.
    pub fn calc_rms_offset(&mut self, channel: Channel) -> Result<u16, S::Error> {
        let reg = match channel {
            Channel::A => Register::RmsIa,
            Channel::B => Register::RmsIb,
            Channel::U => return Err(Error::InvalidParam),
        };
        let raw = self.read_raw(reg)?;
        Ok(calib::rms_offset(raw))
    }

    /// Gain code matching apparent power against active power, both read
    /// live at unity power factor.
    pub fn calc_apparent_power_gain(&mut self) -> Result<u16, S::Error> {
        let active = self.read_raw(Register::PowerPa)?;
        let apparent = self.read_raw(Register::PowerS)?;
        if active == 0 {
            return Err(Error::InvalidData);
        }
        Ok(calib::apparent_power_gain(active, apparent))
    }

    /// Offset code for the residual between active and apparent power.
    pub fn calc_apparent_power_offset(&mut self) -> Result<u16, S::Error> {
        let active = self.read_raw(Register::PowerPa)?;
        let apparent = self.read_raw(Register::PowerS)?;
        Ok(calib::apparent_power_offset(active, apparent))
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), S::Error> {
        if self.bus == BusInterface::Spi {
            return Err(Error::Unimplemented);
        }
        self.interface.write_all(bytes).map_err(Error::Serial)
    }

    /// Read exactly `buf.len()` bytes, surfacing silence and short reads as
    /// their own error kinds.
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), S::Error> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.interface.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(count) => filled += count,
                Err(e) => return Err(Error::Serial(e)),
            }
        }
        if filled == buf.len() {
            Ok(())
        } else if filled == 0 {
            Err(Error::NoResponse)
        } else {
            Err(Error::MissingBytes)
        }
    }

    /// Issue a register read and validate the response checksum.
    fn read_frame(&mut self, reg: Register) -> Result<([u8; 4], usize), S::Error> {
        let width = reg.width();
        self.send(&frame::read_request(reg.addr()))?;

        let mut response = [0u8; 5];
        self.read_exact(&mut response[..width + 1])?;

        let (payload, ck) = response[..width + 1].split_at(width);
        if !frame::verify_response(reg.addr(), payload, ck[0]) {
            return Err(Error::ChecksumMismatch);
        }
        let mut out = [0u8; 4];
        out[..width].copy_from_slice(payload);
        Ok((out, width))
    }

    fn read_raw(&mut self, reg: Register) -> Result<i32, S::Error> {
        let (payload, width) = self.read_frame(reg)?;
        Ok(scaling::decode(&payload[..width], reg.signed()))
    }

    fn read_u16(&mut self, reg: Register) -> Result<u16, S::Error> {
        Ok(self.read_raw(reg)? as u16)
    }

    fn write_u16(&mut self, reg: Register, value: u16) -> Result<(), S::Error> {
        self.write_register(reg, &value.to_be_bytes())
    }

    fn command(&mut self, opcode: Opcode) -> Result<(), S::Error> {
        self.send(&frame::command_frame(opcode))
    }

    fn update_syscon(&mut self, f: impl FnOnce(SysCon) -> SysCon) -> Result<(), S::Error> {
        let syscon = f(SysCon::from_bytes(
            self.read_u16(Register::SysCon)?.to_le_bytes(),
        ));
        self.write_u16(Register::SysCon, u16::from_le_bytes(syscon.into_bytes()))
    }

    fn update_emucon(&mut self, f: impl FnOnce(EmuCon) -> EmuCon) -> Result<(), S::Error> {
        let emucon = f(EmuCon::from_bytes(
            self.read_u16(Register::EmuCon)?.to_le_bytes(),
        ));
        self.write_u16(Register::EmuCon, u16::from_le_bytes(emucon.into_bytes()))
    }

    fn update_emucon2(&mut self, f: impl FnOnce(EmuCon2) -> EmuCon2) -> Result<(), S::Error> {
        let emucon2 = f(EmuCon2::from_bytes(
            self.read_u16(Register::EmuCon2)?.to_le_bytes(),
        ));
        self.write_u16(Register::EmuCon2, u16::from_le_bytes(emucon2.into_bytes()))
    }

    fn update_adc_enables(&mut self, channels: ChannelSet, on: bool) -> Result<(), S::Error> {
        if channels.is_empty() {
            return Err(Error::InvalidParam);
        }
        self.update_syscon(|mut r| {
            if channels.contains(Channel::A) {
                r = r.with_adc_ia_on(on);
            }
            if channels.contains(Channel::B) {
                r = r.with_adc_ib_on(on);
            }
            if channels.contains(Channel::U) {
                r = r.with_adc_u_on(on);
            }
            r
        })
    }

    fn update_accumulation(&mut self, channels: ChannelSet, on: bool) -> Result<(), S::Error> {
        if channels.is_empty() || channels.contains(Channel::U) {
            return Err(Error::InvalidParam);
        }
        self.update_emucon(|mut r| {
            if channels.contains(Channel::A) {
                r = r.with_pa_run(on);
            }
            if channels.contains(Channel::B) {
                r = r.with_pb_run(on);
            }
            r
        })
    }

    fn update_energy_clearance(&mut self, channels: ChannelSet, on: bool) -> Result<(), S::Error> {
        if channels.is_empty() || channels.contains(Channel::U) {
            return Err(Error::InvalidParam);
        }
        self.update_emucon2(|mut r| {
            if channels.contains(Channel::A) {
                r = r.with_epa_clr(on);
            }
            if channels.contains(Channel::B) {
                r = r.with_epb_clr(on);
            }
            r
        })
    }
}
