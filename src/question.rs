use crate::error::{Annotate, ErrorCode, Result};
use crate::packet_buffer::PacketBuffer;
use crate::query_type::QueryType;

/// One query entry: the name to resolve, the record type asked for, and the
/// class (in practice always 1).
#[derive(PartialEq, Eq, Debug, Clone, Hash)]
pub struct DnsQuestion {
    pub name: String,
    pub query_type: QueryType,
    pub class: u16,
}

impl DnsQuestion {
    pub fn new() -> Self {
        Self {
            name: String::new(),
            query_type: QueryType::UNKNOWN(0),
            class: 1,
        }
    }

    pub fn read(&mut self, buffer: &mut PacketBuffer) -> Result<()> {
        self.name = buffer
            .read_qname()
            .annotate(ErrorCode::FailedToParseQuestion, "invalid domain name")?;
        self.query_type = QueryType::from_num(
            buffer
                .read_u16()
                .annotate(ErrorCode::FailedToParseQuestion, "invalid query type")?,
        );
        self.class = buffer
            .read_u16()
            .annotate(ErrorCode::FailedToParseQuestion, "invalid query class")?;

        Ok(())
    }

    pub fn write(&self, buffer: &mut PacketBuffer) -> Result<()> {
        buffer.write_qname(&self.name).annotate(
            ErrorCode::FailedToWriteQuestion,
            "failed to write the domain name",
        )?;
        buffer.write_u16(self.query_type.to_num()).annotate(
            ErrorCode::FailedToWriteQuestion,
            "failed to write the query type",
        )?;
        buffer.write_u16(self.class).annotate(
            ErrorCode::FailedToWriteQuestion,
            "failed to write the query class",
        )?;

        Ok(())
    }
}
