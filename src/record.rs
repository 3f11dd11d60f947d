use std::net::{Ipv4Addr, Ipv6Addr};

use log::debug;

use crate::error::{Annotate, ErrorCode, Result};
use crate::packet_buffer::PacketBuffer;
use crate::query_type::QueryType;

/// A resource record, keyed by its type. Types without a dedicated decoder
/// land in `UNKNOWN`, which keeps the declared payload verbatim so the
/// record can be re-encoded byte for byte.
#[derive(PartialEq, Eq, Debug, Clone, Hash)]
pub enum DnsRecord {
    UNKNOWN {
        domain: String,
        qtype: QueryType,
        class: u16,
        ttl: u32,
        data_len: u16,
        data: Vec<u8>,
    },
    A {
        domain: String,
        class: u16,
        ttl: u32,
        addr: Ipv4Addr,
    },
    NS {
        domain: String,
        class: u16,
        ttl: u32,
        host: String,
    },
    CNAME {
        domain: String,
        class: u16,
        ttl: u32,
        host: String,
    },
    MX {
        domain: String,
        class: u16,
        ttl: u32,
        priority: u16,
        host: String,
    },
    AAAA {
        domain: String,
        class: u16,
        ttl: u32,
        addr: Ipv6Addr,
    },
}

impl DnsRecord {
    pub fn read(buffer: &mut PacketBuffer) -> Result<DnsRecord> {
        let domain = buffer
            .read_qname()
            .annotate(ErrorCode::FailedToParseRecord, "invalid record domain")?;
        let qtype = QueryType::from_num(
            buffer
                .read_u16()
                .annotate(ErrorCode::FailedToParseRecord, "invalid record type")?,
        );
        let class = buffer
            .read_u16()
            .annotate(ErrorCode::FailedToParseRecord, "invalid record class")?;
        let ttl = buffer
            .read_u32()
            .annotate(ErrorCode::FailedToParseRecord, "invalid record ttl")?;

        match qtype {
            QueryType::A => {
                let raw = buffer
                    .read_u32()
                    .annotate(ErrorCode::FailedToParseRecord, "invalid ipv4 address")?;

                Ok(DnsRecord::A {
                    domain,
                    class,
                    ttl,
                    addr: Ipv4Addr::from(raw),
                })
            }
            QueryType::AAAA => {
                let mut raw: u128 = 0;
                for _ in 0..4 {
                    let word = buffer
                        .read_u32()
                        .annotate(ErrorCode::FailedToParseRecord, "invalid ipv6 address")?;
                    raw = (raw << 32) | word as u128;
                }

                Ok(DnsRecord::AAAA {
                    domain,
                    class,
                    ttl,
                    addr: Ipv6Addr::from(raw),
                })
            }
            QueryType::NS => {
                // the host is a name in its own right, compression included
                let host = buffer
                    .read_qname()
                    .annotate(ErrorCode::FailedToParseRecord, "invalid name server host")?;

                Ok(DnsRecord::NS {
                    domain,
                    class,
                    ttl,
                    host,
                })
            }
            QueryType::CNAME => {
                let host = buffer
                    .read_qname()
                    .annotate(ErrorCode::FailedToParseRecord, "invalid canonical host")?;

                Ok(DnsRecord::CNAME {
                    domain,
                    class,
                    ttl,
                    host,
                })
            }
            QueryType::MX => {
                let priority = buffer
                    .read_u16()
                    .annotate(ErrorCode::FailedToParseRecord, "invalid mx priority")?;
                let host = buffer
                    .read_qname()
                    .annotate(ErrorCode::FailedToParseRecord, "invalid mx host")?;

                Ok(DnsRecord::MX {
                    domain,
                    class,
                    ttl,
                    priority,
                    host,
                })
            }
            _ => {
                let data_len = buffer
                    .read_u16()
                    .annotate(ErrorCode::FailedToParseRecord, "invalid record data length")?;
                debug!(
                    "keeping type {} record as {} opaque bytes",
                    qtype.to_num(),
                    data_len
                );

                let data = buffer
                    .peek_range(buffer.read_offset, data_len as usize)
                    .annotate(ErrorCode::FailedToParseRecord, "invalid opaque record data")?
                    .to_vec();
                buffer.step_read(data_len as usize).annotate(
                    ErrorCode::FailedToParseRecord,
                    "failed to skip the opaque record data",
                )?;

                Ok(DnsRecord::UNKNOWN {
                    domain,
                    qtype,
                    class,
                    ttl,
                    data_len,
                    data,
                })
            }
        }
    }

    pub fn write(&self, buffer: &mut PacketBuffer) -> Result<()> {
        match self {
            DnsRecord::A {
                domain,
                class,
                ttl,
                addr,
            } => {
                self.write_preamble(buffer, domain, QueryType::A, *class, *ttl)?;
                buffer
                    .write_u32(u32::from(*addr))
                    .annotate(ErrorCode::FailedToWriteRecord, "failed to write the ipv4 address")?;
            }
            DnsRecord::AAAA {
                domain,
                class,
                ttl,
                addr,
            } => {
                self.write_preamble(buffer, domain, QueryType::AAAA, *class, *ttl)?;
                let raw = u128::from(*addr);
                for shift in [96, 64, 32, 0] {
                    buffer.write_u32((raw >> shift) as u32).annotate(
                        ErrorCode::FailedToWriteRecord,
                        "failed to write the ipv6 address",
                    )?;
                }
            }
            DnsRecord::NS {
                domain,
                class,
                ttl,
                host,
            } => {
                self.write_preamble(buffer, domain, QueryType::NS, *class, *ttl)?;
                buffer.write_qname(host).annotate(
                    ErrorCode::FailedToWriteRecord,
                    "failed to write the name server host",
                )?;
            }
            DnsRecord::CNAME {
                domain,
                class,
                ttl,
                host,
            } => {
                self.write_preamble(buffer, domain, QueryType::CNAME, *class, *ttl)?;
                buffer.write_qname(host).annotate(
                    ErrorCode::FailedToWriteRecord,
                    "failed to write the canonical host",
                )?;
            }
            DnsRecord::MX {
                domain,
                class,
                ttl,
                priority,
                host,
            } => {
                self.write_preamble(buffer, domain, QueryType::MX, *class, *ttl)?;
                buffer
                    .write_u16(*priority)
                    .annotate(ErrorCode::FailedToWriteRecord, "failed to write the mx priority")?;
                buffer
                    .write_qname(host)
                    .annotate(ErrorCode::FailedToWriteRecord, "failed to write the mx host")?;
            }
            DnsRecord::UNKNOWN {
                domain,
                qtype,
                class,
                ttl,
                data_len,
                data,
            } => {
                self.write_preamble(buffer, domain, *qtype, *class, *ttl)?;
                buffer.write_u16(*data_len).annotate(
                    ErrorCode::FailedToWriteRecord,
                    "failed to write the record data length",
                )?;
                for &byte in data {
                    buffer.write_u8(byte).annotate(
                        ErrorCode::FailedToWriteRecord,
                        "failed to write the opaque record data",
                    )?;
                }
            }
        }

        Ok(())
    }

    // domain, type, class and ttl lead every record kind
    fn write_preamble(
        &self,
        buffer: &mut PacketBuffer,
        domain: &str,
        qtype: QueryType,
        class: u16,
        ttl: u32,
    ) -> Result<()> {
        buffer
            .write_qname(domain)
            .annotate(ErrorCode::FailedToWriteRecord, "failed to write the record domain")?;
        buffer
            .write_u16(qtype.to_num())
            .annotate(ErrorCode::FailedToWriteRecord, "failed to write the record type")?;
        buffer
            .write_u16(class)
            .annotate(ErrorCode::FailedToWriteRecord, "failed to write the record class")?;
        buffer
            .write_u32(ttl)
            .annotate(ErrorCode::FailedToWriteRecord, "failed to write the record ttl")?;

        Ok(())
    }
}
