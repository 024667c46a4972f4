//! BCH codes protecting the format (15,5) and version (18,6) information

/// x^10 + x^8 + x^5 + x^4 + x^2 + x + 1
const FORMAT_GENERATOR: u32 = 0x537;
/// x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
const VERSION_GENERATOR: u32 = 0x1F25;
/// Keeps the format codeword from ever being all zero
const FORMAT_MASK: u16 = 0x5412;

/// Encoders and checks for the two BCH-protected info blocks
pub struct BchEncoder;

impl BchEncoder {
    /// Remainder of `data * x^degree` divided by `generator`
    fn remainder(data: u32, generator: u32, degree: u32) -> u32 {
        let mut rem = data;
        for _ in 0..degree {
            rem = (rem << 1) ^ ((rem >> (degree - 1)) * generator);
        }
        rem & ((1 << degree) - 1)
    }

    /// 15-bit masked format codeword for 5 data bits (EC bits << 3 | mask id)
    pub fn encode_format(data: u8) -> u16 {
        let data = (data & 0x1F) as u32;
        let codeword = (data << 10) | Self::remainder(data, FORMAT_GENERATOR, 10);
        codeword as u16 ^ FORMAT_MASK
    }

    /// 18-bit version codeword
    pub fn encode_version(version: u8) -> u32 {
        let data = (version & 0x3F) as u32;
        (data << 12) | Self::remainder(data, VERSION_GENERATOR, 12)
    }

    /// Syndrome check on an unmasked format codeword
    pub fn check_format(codeword: u16) -> bool {
        Self::syndrome(codeword as u32 ^ FORMAT_MASK as u32, FORMAT_GENERATOR, 15, 10) == 0
    }

    /// Syndrome check on an 18-bit version codeword
    pub fn check_version(codeword: u32) -> bool {
        Self::syndrome(codeword, VERSION_GENERATOR, 18, 12) == 0
    }

    /// Polynomial remainder of a whole codeword
    fn syndrome(codeword: u32, generator: u32, length: u32, degree: u32) -> u32 {
        let mut rem = codeword;
        for shift in (0..=(length - degree - 1)).rev() {
            if rem & (1 << (shift + degree)) != 0 {
                rem ^= generator << shift;
            }
        }
        rem
    }
}
