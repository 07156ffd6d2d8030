/// Compute the CRC-16/CCITT-FALSE checksum of `data` as 4 uppercase hex digits.
///
/// This is the variant mandated by the EMVCo QR profile: initial register
/// `0xFFFF`, polynomial `0x1021`, MSB-first, no reflection, no final XOR.
///
/// # Returns
///
/// The checksum as a 4-character uppercase hexadecimal string.
pub fn checksum16(data: &[u8]) -> String {
    let mut crc: u16 = 0xFFFF;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    format!("{crc:04X}")
}
