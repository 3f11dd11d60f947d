use log::debug;

use crate::error::{Annotate, ErrorCode, Result};
use crate::header::DnsHeader;
use crate::packet_buffer::PacketBuffer;
use crate::question::DnsQuestion;
use crate::record::DnsRecord;

/// A full DNS message: header plus the four sections the header counts
/// describe.
#[derive(Clone, Debug)]
pub struct DnsPacket {
    pub header: DnsHeader,
    pub questions: Vec<DnsQuestion>,
    pub answers: Vec<DnsRecord>,
    pub authorities: Vec<DnsRecord>,
    pub additionals: Vec<DnsRecord>,
}

impl DnsPacket {
    pub fn new() -> Self {
        Self {
            header: DnsHeader::new(),
            questions: Vec::new(),
            answers: Vec::new(),
            authorities: Vec::new(),
            additionals: Vec::new(),
        }
    }

    /// Decode a whole message. The header counts drive each section loop;
    /// a failure at any entry aborts the decode and nothing partial is
    /// returned.
    pub fn from_buffer(buffer: &mut PacketBuffer) -> Result<DnsPacket> {
        let mut result = DnsPacket::new();

        result
            .header
            .read(buffer)
            .annotate(ErrorCode::FailedToParseHeader, "failed to parse packet header")?;

        debug!(
            "decoding {} questions, {} answers, {} authorities, {} additionals",
            result.header.question_count,
            result.header.answer_count,
            result.header.authority_count,
            result.header.additional_count
        );

        for _ in 0..result.header.question_count {
            let mut question = DnsQuestion::new();
            question.read(buffer).annotate(
                ErrorCode::FailedToParseQuestion,
                "failed to parse packet question",
            )?;
            result.questions.push(question);
        }

        for _ in 0..result.header.answer_count {
            let record = DnsRecord::read(buffer).annotate(
                ErrorCode::FailedToParseRecord,
                "failed to parse packet answer record",
            )?;
            result.answers.push(record);
        }

        for _ in 0..result.header.authority_count {
            let record = DnsRecord::read(buffer).annotate(
                ErrorCode::FailedToParseRecord,
                "failed to parse packet authority record",
            )?;
            result.authorities.push(record);
        }

        for _ in 0..result.header.additional_count {
            let record = DnsRecord::read(buffer).annotate(
                ErrorCode::FailedToParseRecord,
                "failed to parse packet additional record",
            )?;
            result.additionals.push(record);
        }

        Ok(result)
    }

    /// Encode the whole message from the start of the buffer. The header
    /// counts are recomputed from the section lists first, so stale counts
    /// can never disagree with what is actually written.
    pub fn write(&mut self, buffer: &mut PacketBuffer) -> Result<()> {
        self.header.question_count = self.questions.len() as u16;
        self.header.answer_count = self.answers.len() as u16;
        self.header.authority_count = self.authorities.len() as u16;
        self.header.additional_count = self.additionals.len() as u16;

        self.header
            .write(buffer)
            .annotate(ErrorCode::FailedToWriteHeader, "failed to write packet header")?;

        for question in &self.questions {
            question.write(buffer).annotate(
                ErrorCode::FailedToWriteQuestion,
                "failed to write packet question",
            )?;
        }

        for record in &self.answers {
            record.write(buffer).annotate(
                ErrorCode::FailedToWriteRecord,
                "failed to write packet answer record",
            )?;
        }

        for record in &self.authorities {
            record.write(buffer).annotate(
                ErrorCode::FailedToWriteRecord,
                "failed to write packet authority record",
            )?;
        }

        for record in &self.additionals {
            record.write(buffer).annotate(
                ErrorCode::FailedToWriteRecord,
                "failed to write packet additional record",
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::ResponseCode;
    use crate::query_type::QueryType;
    use std::net::Ipv4Addr;

    #[test]
    fn full_message_round_trips_and_counts_are_normalized() {
        let mut packet = DnsPacket::new();
        packet.header.id = 0x4242;
        packet.header.is_response = true;
        packet.header.recursion_desired = true;
        packet.header.recursion_available = true;
        packet.header.response_code = ResponseCode::NOERROR;
        // stale counts on purpose, write must fix them up
        packet.header.question_count = 40;
        packet.header.answer_count = 0;

        packet.questions.push(DnsQuestion {
            name: "example.com".to_string(),
            query_type: QueryType::A,
            class: 1,
        });
        packet.answers.push(DnsRecord::A {
            domain: "example.com".to_string(),
            class: 1,
            ttl: 3600,
            addr: Ipv4Addr::new(93, 184, 216, 34),
        });
        packet.answers.push(DnsRecord::MX {
            domain: "example.com".to_string(),
            class: 1,
            ttl: 3600,
            priority: 10,
            host: "mail.example.com".to_string(),
        });
        packet.authorities.push(DnsRecord::NS {
            domain: "example.com".to_string(),
            class: 1,
            ttl: 86400,
            host: "ns1.example.com".to_string(),
        });
        packet.additionals.push(DnsRecord::AAAA {
            domain: "ns1.example.com".to_string(),
            class: 1,
            ttl: 3600,
            addr: "2001:db8::1".parse().unwrap(),
        });

        let mut buffer = PacketBuffer::new();
        packet.write(&mut buffer).unwrap();
        assert_eq!(packet.header.question_count, 1);
        assert_eq!(packet.header.answer_count, 2);

        let decoded = DnsPacket::from_buffer(&mut buffer).unwrap();
        assert_eq!(decoded.header, packet.header);
        assert_eq!(decoded.questions, packet.questions);
        assert_eq!(decoded.answers, packet.answers);
        assert_eq!(decoded.authorities, packet.authorities);
        assert_eq!(decoded.additionals, packet.additionals);
    }

    #[test]
    fn count_driven_parsing_rejects_a_truncated_question_section() {
        let mut packet = DnsPacket::new();
        packet.questions.push(DnsQuestion {
            name: "example.com".to_string(),
            query_type: QueryType::A,
            class: 1,
        });

        let mut buffer = PacketBuffer::new();
        packet.write(&mut buffer).unwrap();

        // claim a second question and leave a pointer whose target label
        // runs past the end of the buffer
        buffer.data[4..6].copy_from_slice(&[0, 2]);
        buffer.data[510] = 63;
        let tail = buffer.write_offset;
        buffer.data[tail] = 0xC1;
        buffer.data[tail + 1] = 0xFE;

        let err = DnsPacket::from_buffer(&mut buffer).unwrap_err();
        assert_eq!(err.first().unwrap().code(), ErrorCode::OutOfBounds);
        assert_eq!(err.last().unwrap().code(), ErrorCode::FailedToParseQuestion);
        assert_eq!(err.last().unwrap().message(), "failed to parse packet question");
    }

    #[test]
    fn answers_may_point_back_into_the_question() {
        // hand-assembled response where the answer's domain is a pointer to
        // the question name at offset 12
        let mut buffer = PacketBuffer::new();

        let mut header = DnsHeader::new();
        header.id = 0x1001;
        header.is_response = true;
        header.question_count = 1;
        header.answer_count = 1;
        header.write(&mut buffer).unwrap();

        let question = DnsQuestion {
            name: "abc.example".to_string(),
            query_type: QueryType::A,
            class: 1,
        };
        question.write(&mut buffer).unwrap();

        buffer.write_u8(0xC0).unwrap();
        buffer.write_u8(0x0C).unwrap();
        buffer.write_u16(QueryType::A.to_num()).unwrap();
        buffer.write_u16(1).unwrap();
        buffer.write_u32(60).unwrap();
        buffer.write_u32(u32::from(Ipv4Addr::new(127, 0, 0, 1))).unwrap();

        let decoded = DnsPacket::from_buffer(&mut buffer).unwrap();
        assert_eq!(decoded.questions[0], question);
        assert_eq!(
            decoded.answers[0],
            DnsRecord::A {
                domain: "abc.example".to_string(),
                class: 1,
                ttl: 60,
                addr: Ipv4Addr::new(127, 0, 0, 1),
            }
        );
        assert_eq!(buffer.read_offset, buffer.write_offset);
    }
}
