use std::fs::File;
use std::io::BufReader;

use civetta_jpeg::{Marker, Scanner};
use tracing_subscriber::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("Usage: civetta-structure <image.jpg>")?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::builder().from_env_lossy())
        .with(tracing_subscriber::fmt::Layer::default().compact())
        .init();

    let mut scanner = Scanner::new(BufReader::new(File::open(path)?));

    println!("JPEG Segments:");
    loop {
        let header = scanner.next_segment()?;
        println!(
            " - {:?} at {} ({} bytes)",
            header.marker,
            header.pos,
            header.data_len()
        );

        if header.marker == Marker::SOS {
            break;
        }
    }

    Ok(())
}
