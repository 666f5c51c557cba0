use std::fs::File;
use std::io::BufReader;

use civetta_common::orientation::Orientation;
use civetta_exif::Session;
use tracing_subscriber::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let usage = "Usage: civetta-thumbnail <image.jpg> <thumbnail.jpg>";
    let mut args = std::env::args().skip(1);
    let src = args.next().ok_or(usage)?;
    let dst = args.next().ok_or(usage)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::builder().from_env_lossy())
        .with(tracing_subscriber::fmt::Layer::default().compact())
        .init();

    let file = BufReader::new(File::open(src)?);
    let session = Session::open(file)?.ok_or("No Exif data")?;
    let thumbnail = session.extract_thumbnail()?;

    match thumbnail.orientation {
        Some(value) => match Orientation::try_from(value) {
            Ok(orientation) => println!(
                "Orientation: {orientation:?} ({value}), rotate {}°{}",
                orientation.rotate().degrees(),
                if orientation.mirror() { " after mirroring" } else { "" }
            ),
            Err(_) => println!("Orientation: invalid ({value})"),
        },
        None => println!("Orientation: –"),
    }

    let data = thumbnail.data.ok_or("No thumbnail")?;
    std::fs::write(&dst, data)?;
    println!("Wrote {} bytes to {dst}", data.len());

    Ok(())
}
