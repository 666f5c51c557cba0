use std::fs::File;
use std::io::BufReader;

use civetta_exif::Session;
use tracing_subscriber::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("Usage: civetta-dump <image.jpg>")?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::builder().from_env_lossy())
        .with(tracing_subscriber::fmt::Layer::default().compact())
        .init();

    let file = BufReader::new(File::open(path)?);
    let Some(session) = Session::open(file)? else {
        println!("No Exif data");
        return Ok(());
    };

    println!("{}", session.debug_dump()?);

    Ok(())
}
