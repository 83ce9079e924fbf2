//! Mocked serial port used by the unit tests to script chip responses and
//! capture every byte the driver emits.

/// Scripted stand-in for a serial port.
pub struct MockSerial {
    /// Everything the driver wrote, in order.
    write_buffer: heapless::Vec<u8, 512>,
    /// Pre-loaded response bytes handed out by `read`.
    read_buffer: heapless::Vec<u8, 512>,
    read_position: usize,
    fail_writes: bool,
    fail_reads: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum MockSerialError {
    #[error("buffer overflow")]
    BufferOverflow,
    #[error("simulated error")]
    SimulatedError,
}

impl embedded_io::Error for MockSerialError {
    fn kind(&self) -> embedded_io::ErrorKind {
        match self {
            MockSerialError::BufferOverflow => embedded_io::ErrorKind::OutOfMemory,
            MockSerialError::SimulatedError => embedded_io::ErrorKind::Other,
        }
    }
}

impl embedded_io::ErrorType for MockSerial {
    type Error = MockSerialError;
}

impl embedded_io::Write for MockSerial {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.fail_writes {
            return Err(MockSerialError::SimulatedError);
        }
        self.write_buffer
            .extend_from_slice(buf)
            .map_err(|_| MockSerialError::BufferOverflow)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl embedded_io::Read for MockSerial {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if self.fail_reads {
            return Err(MockSerialError::SimulatedError);
        }
        let available = self.read_buffer.len() - self.read_position;
        let count = buf.len().min(available);
        buf[..count]
            .copy_from_slice(&self.read_buffer[self.read_position..self.read_position + count]);
        self.read_position += count;
        // An exhausted script reads as end-of-stream.
        Ok(count)
    }
}

impl MockSerial {
    pub fn new() -> Self {
        Self {
            write_buffer: heapless::Vec::new(),
            read_buffer: heapless::Vec::new(),
            read_position: 0,
            fail_writes: false,
            fail_reads: false,
        }
    }

    /// Replace the scripted response bytes.
    pub fn set_read_data(&mut self, data: &[u8]) -> Result<(), MockSerialError> {
        self.read_buffer.clear();
        self.read_position = 0;
        self.read_buffer
            .extend_from_slice(data)
            .map_err(|_| MockSerialError::BufferOverflow)
    }

    /// Everything the driver has written so far.
    pub fn written_data(&self) -> &[u8] {
        &self.write_buffer
    }

    pub fn clear_written_data(&mut self) {
        self.write_buffer.clear();
    }

    pub fn set_write_error(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn set_read_error(&mut self, fail: bool) {
        self.fail_reads = fail;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_io::{Read, Write};

    #[test]
    fn captures_written_bytes_in_order() {
        let mut mock = MockSerial::new();
        mock.write(&[0xA5, 0x00]).unwrap();
        mock.write(&[0x01]).unwrap();
        assert_eq!(mock.written_data(), &[0xA5, 0x00, 0x01]);

        mock.clear_written_data();
        assert!(mock.written_data().is_empty());
    }

    #[test]
    fn hands_out_scripted_reads_sequentially() {
        let mut mock = MockSerial::new();
        mock.set_read_data(&[1, 2, 3, 4, 5]).unwrap();

        let mut first = [0u8; 3];
        assert_eq!(mock.read(&mut first).unwrap(), 3);
        assert_eq!(first, [1, 2, 3]);

        let mut second = [0u8; 3];
        assert_eq!(mock.read(&mut second).unwrap(), 2);
        assert_eq!(&second[..2], &[4, 5]);
    }

    #[test]
    fn exhausted_script_reads_as_end_of_stream() {
        let mut mock = MockSerial::new();
        let mut buf = [0u8; 4];
        assert_eq!(mock.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn error_flags_fail_the_matching_direction() {
        let mut mock = MockSerial::new();
        mock.set_write_error(true);
        assert!(mock.write(&[0x00]).is_err());
        mock.set_write_error(false);
        assert!(mock.write(&[0x00]).is_ok());

        mock.set_read_data(&[1]).unwrap();
        mock.set_read_error(true);
        let mut buf = [0u8; 1];
        assert!(mock.read(&mut buf).is_err());
    }
}
