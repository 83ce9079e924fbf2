//! Wire frame construction and validation.
//!
//! Every frame opens with the `0xA5` header byte. Writes and commands carry a
//! trailing checksum: the bitwise complement of the byte sum, truncated to
//! eight bits. Read requests are the only unchecksummed frames; the chip
//! instead appends a checksum to its response, computed over the request
//! header and address plus the payload it returns.

/// First byte of every outgoing frame.
pub(crate) const HEADER: u8 = 0xA5;

/// Address of the pseudo register that accepts single-byte commands.
pub(crate) const COMMAND_ADDR: u8 = 0xEA;

/// OR-ed into the register address of a data write frame.
pub(crate) const WRITE_FLAG: u8 = 0x80;

/// Widest write frame: header, address, three payload bytes, checksum.
pub(crate) const MAX_FRAME: usize = 6;

/// Opcodes accepted by the command register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub(crate) enum Opcode {
    WriteEnable = 0xE5,
    WriteDisable = 0xDC,
    Reset = 0x96,
    SelectChannelA = 0x5A,
    SelectChannelB = 0xA5,
}

/// Complement-of-sum checksum over every preceding byte of a frame.
pub(crate) fn checksum(bytes: &[u8]) -> u8 {
    let sum = bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    !sum
}

/// Two-byte read request for a register address.
pub(crate) fn read_request(addr: u8) -> [u8; 2] {
    [HEADER, addr]
}

/// Command frame against the command register.
pub(crate) fn command_frame(opcode: Opcode) -> [u8; 4] {
    let mut frame = [HEADER, COMMAND_ADDR, opcode as u8, 0x00];
    frame[3] = checksum(&frame[..3]);
    frame
}

/// Data write frame carrying `payload` for register address `addr`.
///
/// Callers keep `payload` within three bytes; the register map only exposes
/// writable registers up to that width.
pub(crate) fn write_frame(addr: u8, payload: &[u8]) -> heapless::Vec<u8, MAX_FRAME> {
    let mut frame: heapless::Vec<u8, MAX_FRAME> = heapless::Vec::new();
    frame.push(HEADER).ok();
    frame.push(addr | WRITE_FLAG).ok();
    frame.extend_from_slice(payload).ok();
    let ck = checksum(&frame);
    frame.push(ck).ok();
    frame
}

/// Validate a response payload against its trailing checksum byte.
///
/// The chip folds the request bytes it is answering into the sum, so the
/// computation covers `{header, addr} ++ payload`.
pub(crate) fn verify_response(addr: u8, payload: &[u8], received: u8) -> bool {
    let sum = payload
        .iter()
        .fold(HEADER.wrapping_add(addr), |acc, b| acc.wrapping_add(*b));
    !sum == received
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checksum_complements_byte_sum() {
        assert_eq!(checksum(&[0xA5, 0xEA, 0xE5]), 0x8B);
        assert_eq!(checksum(&[0xA5, 0xEA, 0xDC]), 0x94);
        assert_eq!(checksum(&[0xA5, 0x00, 0x0A, 0x04]), 0x4C);
        assert_eq!(checksum(&[]), 0xFF);
    }

    #[test]
    fn command_frames_match_wire_vectors() {
        assert_eq!(command_frame(Opcode::WriteEnable), [0xA5, 0xEA, 0xE5, 0x8B]);
        assert_eq!(command_frame(Opcode::WriteDisable), [0xA5, 0xEA, 0xDC, 0x94]);
        assert_eq!(command_frame(Opcode::Reset), [0xA5, 0xEA, 0x96, 0xDA]);
        assert_eq!(command_frame(Opcode::SelectChannelA), [0xA5, 0xEA, 0x5A, 0x16]);
        assert_eq!(command_frame(Opcode::SelectChannelB), [0xA5, 0xEA, 0xA5, 0xCB]);
    }

    #[test]
    fn write_frame_sets_write_flag_and_checksum() {
        let frame = write_frame(0x00, &[0x0A, 0x04]);
        assert_eq!(frame.as_slice(), &[0xA5, 0x80, 0x0A, 0x04, 0xCC]);

        let frame = write_frame(0x07, &[0xDE]);
        assert_eq!(frame.as_slice(), &[0xA5, 0x87, 0xDE, 0xF5]);
    }

    #[test]
    fn write_frames_satisfy_their_own_checksum() {
        let payloads: [&[u8]; 3] = [&[0x12], &[0x12, 0x34], &[0x12, 0x34, 0x56]];
        for payload in payloads {
            let frame = write_frame(0x05, payload);
            let (body, ck) = frame.split_at(frame.len() - 1);
            assert_eq!(checksum(body), ck[0]);
            assert_eq!(body[0], HEADER);
            assert_eq!(body[1], 0x05 | WRITE_FLAG);
            assert_eq!(&body[2..], payload);
        }
    }

    #[test]
    fn response_validation_accepts_matching_checksum() {
        assert!(verify_response(0x00, &[0x0A, 0x04], 0x4C));
        assert!(verify_response(0x28, &[0x00, 0x00, 0x01], 0x31));
    }

    #[test]
    fn response_validation_rejects_any_single_bit_corruption() {
        let payload = [0x0A, 0x04];
        for index in 0..payload.len() {
            for bit in 0..8 {
                let mut corrupted = payload;
                corrupted[index] ^= 1 << bit;
                assert!(!verify_response(0x00, &corrupted, 0x4C));
            }
        }
        for bit in 0..8 {
            assert!(!verify_response(0x00, &payload, 0x4C ^ (1 << bit)));
        }
        assert!(!verify_response(0x01, &payload, 0x4C));
    }
}
