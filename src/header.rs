use crate::error::{Annotate, ErrorChain, ErrorCode, Result};
use crate::packet_buffer::PacketBuffer;

/// Response status set by the server. Values 6-15 are reserved and carried
/// through numerically; the full registry is at
/// https://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-6
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResponseCode {
    NOERROR,
    FORMERR,
    SERVFAIL,
    NXDOMAIN,
    NOTIMP,
    REFUSED,
    RESERVED(u8),
}

impl ResponseCode {
    pub fn from_num(num: u8) -> Self {
        match num {
            0 => ResponseCode::NOERROR,
            1 => ResponseCode::FORMERR,
            2 => ResponseCode::SERVFAIL,
            3 => ResponseCode::NXDOMAIN,
            4 => ResponseCode::NOTIMP,
            5 => ResponseCode::REFUSED,
            other => ResponseCode::RESERVED(other & 0x0F),
        }
    }

    pub fn to_num(&self) -> u8 {
        match *self {
            ResponseCode::NOERROR => 0,
            ResponseCode::FORMERR => 1,
            ResponseCode::SERVFAIL => 2,
            ResponseCode::NXDOMAIN => 3,
            ResponseCode::NOTIMP => 4,
            ResponseCode::REFUSED => 5,
            ResponseCode::RESERVED(num) => num,
        }
    }
}

// wire layout of the 12 header bytes:
// 86 2a 01 20 00 01 00 00 00 00 00 00
// 86 2a is the id, 01 20 the flags word, then the four section counts
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DnsHeader {
    pub id: u16,
    pub is_response: bool,
    pub opcode: u8, // 4 bits, low nibble
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub reserved: u8, // 3 bits, now used for dnssec
    pub response_code: ResponseCode,
    pub question_count: u16,
    pub answer_count: u16,
    pub authority_count: u16,
    pub additional_count: u16,
}

impl DnsHeader {
    pub fn new() -> Self {
        Self {
            id: 0,
            is_response: false,
            opcode: 0,
            authoritative: false,
            truncated: false,
            recursion_desired: false,
            recursion_available: false,
            reserved: 0,
            response_code: ResponseCode::NOERROR,
            question_count: 0,
            answer_count: 0,
            authority_count: 0,
            additional_count: 0,
        }
    }

    /// Decode the 12 byte header at the buffer's read cursor.
    ///
    /// The flags word splits as:
    /// 1000000000000000 = 0x8000 = query/response
    /// 0111100000000000 = 0x7800 = operation code
    /// 0000010000000000 = 0x0400 = authoritative answer
    /// 0000001000000000 = 0x0200 = truncated message
    /// 0000000100000000 = 0x0100 = recursion desired
    /// 0000000010000000 = 0x0080 = recursion available
    /// 0000000001110000 = 0x0070 = reserved
    /// 0000000000001111 = 0x000F = response code
    pub fn read(&mut self, buffer: &mut PacketBuffer) -> Result<()> {
        if buffer.remaining_to_read() < 12 {
            return Err(ErrorChain::new(
                ErrorCode::OutOfBounds,
                "the header needs at least 12 readable bytes",
            ));
        }

        self.id = buffer
            .read_u16()
            .annotate(ErrorCode::FailedToParseHeader, "failed to read the packet id")?;

        let flags = buffer
            .read_u16()
            .annotate(ErrorCode::FailedToParseHeader, "failed to read the flags word")?;

        self.is_response = (flags & 0x8000) != 0;
        self.opcode = ((flags >> 11) & 0x0F) as u8;
        self.authoritative = (flags & 0x0400) != 0;
        self.truncated = (flags & 0x0200) != 0;
        self.recursion_desired = (flags & 0x0100) != 0;
        self.recursion_available = (flags & 0x0080) != 0;
        self.reserved = ((flags >> 4) & 0x07) as u8;
        self.response_code = ResponseCode::from_num((flags & 0x000F) as u8);

        self.question_count = buffer.read_u16().annotate(
            ErrorCode::FailedToParseHeader,
            "failed to read the question count",
        )?;
        self.answer_count = buffer.read_u16().annotate(
            ErrorCode::FailedToParseHeader,
            "failed to read the answer count",
        )?;
        self.authority_count = buffer.read_u16().annotate(
            ErrorCode::FailedToParseHeader,
            "failed to read the authority count",
        )?;
        self.additional_count = buffer.read_u16().annotate(
            ErrorCode::FailedToParseHeader,
            "failed to read the additional count",
        )?;

        Ok(())
    }

    /// Encode the header at the start of the buffer. Buffer contents are
    /// undefined if any step fails.
    pub fn write(&self, buffer: &mut PacketBuffer) -> Result<()> {
        buffer.seek_write(0).annotate(
            ErrorCode::FailedToWriteHeader,
            "failed to seek to the start of the buffer",
        )?;

        buffer
            .write_u16(self.id)
            .annotate(ErrorCode::FailedToWriteHeader, "failed to write the packet id")?;

        let flags = ((self.is_response as u16) << 15)
            | (((self.opcode & 0x0F) as u16) << 11)
            | ((self.authoritative as u16) << 10)
            | ((self.truncated as u16) << 9)
            | ((self.recursion_desired as u16) << 8)
            | ((self.recursion_available as u16) << 7)
            | (((self.reserved & 0x07) as u16) << 4)
            | ((self.response_code.to_num() & 0x0F) as u16);

        buffer
            .write_u16(flags)
            .annotate(ErrorCode::FailedToWriteHeader, "failed to write the flags word")?;

        buffer.write_u16(self.question_count).annotate(
            ErrorCode::FailedToWriteHeader,
            "failed to write the question count",
        )?;
        buffer.write_u16(self.answer_count).annotate(
            ErrorCode::FailedToWriteHeader,
            "failed to write the answer count",
        )?;
        buffer.write_u16(self.authority_count).annotate(
            ErrorCode::FailedToWriteHeader,
            "failed to write the authority count",
        )?;
        buffer.write_u16(self.additional_count).annotate(
            ErrorCode::FailedToWriteHeader,
            "failed to write the additional count",
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_flags_pack_to_0x8180() {
        let mut header = DnsHeader::new();
        header.id = 0x1234;
        header.is_response = true;
        header.recursion_desired = true;
        header.recursion_available = true;
        header.question_count = 1;
        header.answer_count = 1;

        let mut buffer = PacketBuffer::new();
        header.write(&mut buffer).unwrap();
        assert_eq!(&buffer.data[..4], &[0x12, 0x34, 0x81, 0x80]);
        assert_eq!(&buffer.data[4..12], &[0, 1, 0, 1, 0, 0, 0, 0]);

        let mut decoded = DnsHeader::new();
        decoded.read(&mut buffer).unwrap();
        assert_eq!(decoded, header);
        assert_eq!(buffer.read_offset, 12);
    }

    #[test]
    fn every_flag_field_round_trips() {
        let mut header = DnsHeader::new();
        header.id = 0xBEEF;
        header.opcode = 2;
        header.authoritative = true;
        header.truncated = true;
        header.reserved = 5;
        header.response_code = ResponseCode::REFUSED;
        header.authority_count = 7;
        header.additional_count = 3;

        let mut buffer = PacketBuffer::new();
        header.write(&mut buffer).unwrap();
        assert_eq!(&buffer.data[2..4], &[0x16, 0x55]);

        let mut decoded = DnsHeader::new();
        decoded.read(&mut buffer).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn short_buffer_is_rejected() {
        let mut buffer = PacketBuffer::new();
        buffer.seek_read(505).unwrap();

        let mut header = DnsHeader::new();
        let err = header.read(&mut buffer).unwrap_err();
        assert_eq!(err.first().unwrap().code(), ErrorCode::OutOfBounds);
    }

    #[test]
    fn reserved_response_codes_keep_their_value() {
        assert_eq!(ResponseCode::from_num(3), ResponseCode::NXDOMAIN);
        assert_eq!(ResponseCode::from_num(9), ResponseCode::RESERVED(9));
        assert_eq!(ResponseCode::from_num(9).to_num(), 9);
        assert_eq!(ResponseCode::from_num(15).to_num(), 15);
    }
}
