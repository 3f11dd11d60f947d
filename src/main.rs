use anyhow::Result;
use log::info;
use std::env;
use std::fs::File;
use std::io::Read;

use dns_codec::{DnsPacket, PacketBuffer};

fn main() -> Result<()> {
    env_logger::init();

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "response_packet.txt".to_string());
    info!("decoding {path}");

    let mut f = File::open(&path)?;
    let mut buffer = PacketBuffer::new();
    #[allow(clippy::unused_io_amount)]
    f.read(&mut buffer.data)?;

    let packet = DnsPacket::from_buffer(&mut buffer)?;
    println!("{:#?}", packet.header);

    for q in packet.questions {
        println!("{q:#?}");
    }
    for rec in packet.answers {
        println!("{rec:#?}");
    }
    for rec in packet.authorities {
        println!("{rec:#?}");
    }
    for rec in packet.additionals {
        println!("{rec:#?}");
    }

    Ok(())
}
