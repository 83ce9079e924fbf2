use std::env;

use hlw811x::{BusInterface, Channel, Hlw811x, Pga, PgaGain, RESET_SETTLE_TIME};
use inquire::Select;
use serialport::SerialPort;

// The chip's UART is fixed at 9600 8E1.
const BAUD_RATE: u32 = 9600;
const SERIAL_TIMEOUT_MS: u64 = 300;

pub struct PortWrapper(Box<dyn SerialPort>);

#[derive(Debug)]
pub struct IoError(std::io::Error);

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl embedded_io::Error for IoError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self.0.kind() {
            std::io::ErrorKind::NotFound => embedded_io::ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => embedded_io::ErrorKind::PermissionDenied,
            std::io::ErrorKind::BrokenPipe => embedded_io::ErrorKind::BrokenPipe,
            std::io::ErrorKind::InvalidInput => embedded_io::ErrorKind::InvalidInput,
            std::io::ErrorKind::InvalidData => embedded_io::ErrorKind::InvalidData,
            std::io::ErrorKind::TimedOut => embedded_io::ErrorKind::TimedOut,
            std::io::ErrorKind::Interrupted => embedded_io::ErrorKind::Interrupted,
            std::io::ErrorKind::Unsupported => embedded_io::ErrorKind::Unsupported,
            std::io::ErrorKind::OutOfMemory => embedded_io::ErrorKind::OutOfMemory,
            _ => embedded_io::ErrorKind::Other,
        }
    }
}

impl embedded_io::ErrorType for PortWrapper {
    type Error = IoError;
}

impl embedded_io::Read for PortWrapper {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        std::io::Read::read(&mut self.0, buf).map_err(IoError)
    }
}

impl embedded_io::Write for PortWrapper {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        std::io::Write::write(&mut self.0, buf).map_err(IoError)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        std::io::Write::flush(&mut self.0).map_err(IoError)
    }
}

fn main() {
    let port_name = env::args().nth(1).unwrap_or_else(|| {
        let ports = serialport::available_ports().expect("Failed to enumerate serial ports");

        if ports.is_empty() {
            eprintln!("No serial ports found!");
            std::process::exit(1);
        }

        let port_names: Vec<String> = ports.iter().map(|p| p.port_name.clone()).collect();

        Select::new("Select a serial port:", port_names)
            .prompt()
            .expect("Failed to select port")
    });

    println!("Using port: {}", port_name);

    let port = serialport::new(&port_name, BAUD_RATE)
        .parity(serialport::Parity::Even)
        .timeout(std::time::Duration::from_millis(SERIAL_TIMEOUT_MS))
        .open()
        .expect("Failed to open serial port");

    let mut meter = Hlw811x::new(PortWrapper(port), BusInterface::Uart);

    meter.reset().unwrap();
    std::thread::sleep(std::time::Duration::from_millis(u64::from(
        RESET_SETTLE_TIME.ticks(),
    )));

    let coeff = meter.read_coeff().unwrap();
    println!("Conversion coefficients: {:#?}", coeff);

    meter.enable_channel(Channel::A | Channel::U).unwrap();
    meter
        .set_pga(Pga {
            a: PgaGain::X2,
            b: PgaGain::X1,
            u: PgaGain::X2,
        })
        .unwrap();
    meter.enable_pulse(Channel::A).unwrap();

    let voltage_mv = meter.rms(Channel::U).unwrap();
    let current_ma = meter.rms(Channel::A).unwrap();
    let power_mw = meter.power(Channel::A).unwrap();
    let energy_wh = meter.energy(Channel::A).unwrap();

    println!("Voltage: {:.3} V", voltage_mv as f64 / 1000.0);
    println!("Current: {:.3} A", current_ma as f64 / 1000.0);
    println!("Power:   {:.3} W", power_mw as f64 / 1000.0);
    println!("Energy:  {} Wh", energy_wh);

    meter.enable_waveform().unwrap();
    meter.enable_zero_crossing().unwrap();
    meter.enable_power_factor().unwrap();

    match meter.frequency() {
        Ok(centihertz) => println!("Mains:   {:.2} Hz", centihertz as f64 / 100.0),
        Err(err) => println!("Mains frequency not ready yet: {:?}", err),
    }
    match meter.power_factor() {
        Ok(centi) => println!("PF:      {:.2}", centi as f64 / 100.0),
        Err(err) => println!("Power factor not ready yet: {:?}", err),
    }
}
